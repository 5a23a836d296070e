// Integration tests for the meeting persistence writer
//
// Each test runs against its own file-backed SQLite database in a temp
// directory.

use meeting_insights::{normalize, MeetingStore, NewMeeting, TaskItem, TranscriptSegment};
use serde_json::json;
use tempfile::TempDir;

async fn test_store() -> (MeetingStore, TempDir) {
    let dir = TempDir::new().unwrap();
    let url = format!("sqlite://{}/meetings.db", dir.path().display());
    let store = MeetingStore::connect(&url).await.unwrap();
    store.init_schema().await.unwrap();
    (store, dir)
}

fn segment(label: &str, text: &str, start: f64, end: f64) -> TranscriptSegment {
    TranscriptSegment {
        speaker_label: label.to_string(),
        text: text.to_string(),
        start_seconds: start,
        end_seconds: end,
    }
}

#[tokio::test]
async fn test_speakers_are_deduplicated() {
    let (store, _dir) = test_store().await;

    let segments = vec![
        segment("Speaker 0", "one", 0.0, 1.0),
        segment("Speaker 1", "two", 1.0, 2.0),
        segment("Speaker 0", "three", 2.0, 3.0),
        segment("Speaker 1", "four", 3.0, 4.0),
        segment("Speaker 0", "five", 4.0, 5.0),
    ];

    let meeting_id = store
        .save_meeting(
            NewMeeting {
                user_id: "u1",
                title: "Dedup",
                summary: "s",
            },
            &segments,
            &[],
        )
        .await
        .unwrap();

    let speakers = store.list_speakers(&meeting_id).await.unwrap();
    assert_eq!(speakers.len(), 2, "5 segments, 2 distinct speakers");

    let names: Vec<&str> = speakers.iter().map(|s| s.default_name.as_str()).collect();
    assert_eq!(names, vec!["Speaker 0", "Speaker 1"]);
    for speaker in &speakers {
        assert_eq!(speaker.custom_name, speaker.default_name);
    }
}

#[tokio::test]
async fn test_order_index_matches_retained_positions() {
    let (store, _dir) = test_store().await;

    // 5 paragraphs, 2 of them whitespace-only; the normalizer retains 3
    let resp = serde_json::from_value(json!({
        "results": { "channels": [{ "alternatives": [{
            "transcript": "",
            "paragraphs": { "paragraphs": [
                { "speaker": 0, "start": 0.0, "end": 1.0,
                  "sentences": [{ "text": "alpha", "start": 0.0, "end": 1.0 }] },
                { "speaker": 1, "start": 1.0, "end": 2.0,
                  "sentences": [{ "text": " ", "start": 1.0, "end": 2.0 }] },
                { "speaker": 0, "start": 2.0, "end": 3.0,
                  "sentences": [{ "text": "beta", "start": 2.0, "end": 3.0 }] },
                { "speaker": 1, "start": 3.0, "end": 4.0,
                  "sentences": [{ "text": "", "start": 3.0, "end": 4.0 }] },
                { "speaker": 0, "start": 4.0, "end": 5.0,
                  "sentences": [{ "text": "gamma", "start": 4.0, "end": 5.0 }] }
            ]}
        }]}]}
    }))
    .unwrap();

    let segments = normalize(&resp, None);
    assert_eq!(segments.len(), 3);

    let meeting_id = store
        .save_meeting(
            NewMeeting {
                user_id: "u1",
                title: "Ordering",
                summary: "s",
            },
            &segments,
            &[],
        )
        .await
        .unwrap();

    let rows = store.list_transcripts(&meeting_id).await.unwrap();
    assert_eq!(rows.len(), 3);

    let indices: Vec<i64> = rows.iter().map(|r| r.order_index).collect();
    assert_eq!(indices, vec![1, 2, 3], "indices follow the retained sequence");

    let texts: Vec<&str> = rows.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, vec!["alpha", "beta", "gamma"]);
}

#[tokio::test]
async fn test_diarized_meeting_scenario() {
    let (store, _dir) = test_store().await;

    let segments = vec![
        segment("Speaker 0", "hello team", 0.0, 5.0),
        segment("Speaker 1", "hi there", 5.0, 9.0),
    ];

    let meeting_id = store
        .save_meeting(
            NewMeeting {
                user_id: "u1",
                title: "Standup",
                summary: "Short standup.",
            },
            &segments,
            &[],
        )
        .await
        .unwrap();

    let meeting = store.get_meeting(&meeting_id).await.unwrap().unwrap();
    assert_eq!(meeting.title, "Standup");
    assert_eq!(meeting.user_id, "u1");
    assert_eq!(meeting.summary, "Short standup.");

    let rows = store.list_transcripts(&meeting_id).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].speaker_name, "Speaker 0");
    assert_eq!(rows[0].speaker_id, "speaker_0");
    assert_eq!(rows[0].timestamp_seconds, 0);
    assert_eq!(rows[1].speaker_name, "Speaker 1");
    assert_eq!(rows[1].timestamp_seconds, 5);

    let speakers = store.list_speakers(&meeting_id).await.unwrap();
    assert_eq!(speakers.len(), 2);
}

#[tokio::test]
async fn test_flat_transcript_scenario() {
    let (store, _dir) = test_store().await;

    let resp = serde_json::from_value(json!({
        "metadata": { "duration": 12.0 },
        "results": { "channels": [{ "alternatives": [{
            "transcript": "quick sync done"
        }]}]}
    }))
    .unwrap();
    let segments = normalize(&resp, Some(12.0));

    let meeting_id = store
        .save_meeting(
            NewMeeting {
                user_id: "u1",
                title: "Quick sync",
                summary: "s",
            },
            &segments,
            &[],
        )
        .await
        .unwrap();

    let rows = store.list_transcripts(&meeting_id).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].speaker_id, "speaker_0");
    assert_eq!(rows[0].timestamp_seconds, 0);

    let speakers = store.list_speakers(&meeting_id).await.unwrap();
    assert_eq!(speakers.len(), 1);
    assert_eq!(speakers[0].default_name, "Speaker 0");
}

#[tokio::test]
async fn test_tasks_are_persisted() {
    let (store, _dir) = test_store().await;

    let tasks = vec![
        TaskItem {
            task: "Ship the report".to_string(),
            owner: Some("Ana".to_string()),
            deadline: Some("Friday".to_string()),
        },
        TaskItem {
            task: "Book the room".to_string(),
            owner: None,
            deadline: None,
        },
    ];

    let meeting_id = store
        .save_meeting(
            NewMeeting {
                user_id: "u1",
                title: "Tasks",
                summary: "s",
            },
            &[segment("Speaker 0", "talk", 0.0, 1.0)],
            &tasks,
        )
        .await
        .unwrap();

    let rows = store.list_tasks(&meeting_id).await.unwrap();
    assert_eq!(rows.len(), 2);

    let shipped = rows.iter().find(|r| r.task == "Ship the report").unwrap();
    assert_eq!(shipped.owner.as_deref(), Some("Ana"));
    assert_eq!(shipped.deadline.as_deref(), Some("Friday"));

    let booked = rows.iter().find(|r| r.task == "Book the room").unwrap();
    assert_eq!(booked.owner, None);
    assert_eq!(booked.deadline, None);
}

#[tokio::test]
async fn test_empty_collections_are_skipped_cleanly() {
    let (store, _dir) = test_store().await;

    let meeting_id = store
        .save_meeting(
            NewMeeting {
                user_id: "u1",
                title: "Silent meeting",
                summary: "No speech detected in the recording.",
            },
            &[],
            &[],
        )
        .await
        .unwrap();

    assert!(store.get_meeting(&meeting_id).await.unwrap().is_some());
    assert!(store.list_transcripts(&meeting_id).await.unwrap().is_empty());
    assert!(store.list_tasks(&meeting_id).await.unwrap().is_empty());
    assert!(store.list_speakers(&meeting_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_rename_speaker() {
    let (store, _dir) = test_store().await;

    let meeting_id = store
        .save_meeting(
            NewMeeting {
                user_id: "u1",
                title: "Rename",
                summary: "s",
            },
            &[segment("Speaker 0", "hello", 0.0, 1.0)],
            &[],
        )
        .await
        .unwrap();

    let speakers = store.list_speakers(&meeting_id).await.unwrap();
    let speaker = &speakers[0];

    let updated = store
        .set_speaker_custom_name(&meeting_id, &speaker.id, "Alice")
        .await
        .unwrap();
    assert!(updated);

    let speakers = store.list_speakers(&meeting_id).await.unwrap();
    assert_eq!(speakers[0].custom_name, "Alice");
    assert_eq!(speakers[0].default_name, "Speaker 0", "default stays put");

    let missing = store
        .set_speaker_custom_name(&meeting_id, "nonexistent", "Bob")
        .await
        .unwrap();
    assert!(!missing);
}

#[tokio::test]
async fn test_list_meetings_newest_first_per_user() {
    let (store, _dir) = test_store().await;

    for title in ["Monday sync", "Tuesday sync", "Wednesday sync"] {
        store
            .save_meeting(
                NewMeeting {
                    user_id: "u1",
                    title,
                    summary: "s",
                },
                &[],
                &[],
            )
            .await
            .unwrap();
        // Distinct created_at values for a stable ordering check
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
    store
        .save_meeting(
            NewMeeting {
                user_id: "u2",
                title: "Someone else's meeting",
                summary: "s",
            },
            &[],
            &[],
        )
        .await
        .unwrap();

    let meetings = store.list_meetings("u1").await.unwrap();

    assert_eq!(meetings.len(), 3, "only u1's meetings are listed");
    let titles: Vec<&str> = meetings.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Wednesday sync", "Tuesday sync", "Monday sync"],
        "newest first"
    );
    for pair in meetings.windows(2) {
        assert!(pair[0].created_at >= pair[1].created_at);
    }

    assert!(store.list_meetings("nobody").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_connect_failure_is_not_a_write_entity_error() {
    let err = MeetingStore::connect("sqlite:///nonexistent-dir/deeper/meetings.db")
        .await
        .unwrap_err();

    assert!(
        matches!(err, meeting_insights::Error::Internal(_)),
        "got: {}",
        err
    );
}

#[tokio::test]
async fn test_unknown_meeting_lookup_returns_none() {
    let (store, _dir) = test_store().await;

    assert!(store.get_meeting("no-such-id").await.unwrap().is_none());
}
