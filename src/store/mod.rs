//! Durable meeting storage
//!
//! One meeting is the aggregate root; transcript, task, and speaker rows all
//! hang off its id and cascade with it. The writer performs its inserts in a
//! fixed order and fails loudly, naming the entity that could not be written.

mod schema;
mod writer;

pub use writer::{
    MeetingRecord, MeetingStore, NewMeeting, SpeakerRow, TaskRow, TranscriptRow,
};
