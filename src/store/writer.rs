use crate::error::{Error, Result};
use crate::insights::TaskItem;
use crate::transcription::TranscriptSegment;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{FromRow, SqlitePool};
use std::collections::BTreeSet;
use std::str::FromStr;
use tracing::info;
use uuid::Uuid;

/// Metadata for a meeting about to be persisted
#[derive(Debug, Clone)]
pub struct NewMeeting<'a> {
    pub user_id: &'a str,
    pub title: &'a str,
    pub summary: &'a str,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MeetingRecord {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub summary: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TranscriptRow {
    pub id: String,
    pub meeting_id: String,
    pub speaker_id: String,
    pub speaker_name: String,
    pub text: String,
    pub order_index: i64,
    pub timestamp_seconds: i64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TaskRow {
    pub id: String,
    pub meeting_id: String,
    pub task: String,
    pub owner: Option<String>,
    pub deadline: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SpeakerRow {
    pub id: String,
    pub meeting_id: String,
    pub default_name: String,
    pub custom_name: String,
}

/// SQLite-backed meeting store
#[derive(Clone, Debug)]
pub struct MeetingStore {
    pool: SqlitePool,
}

impl MeetingStore {
    /// Open (creating if missing) the database behind `url` and set up a pool
    pub async fn connect(url: &str) -> Result<Self> {
        info!("connecting to meeting store at {}", url);

        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| Error::Config(format!("invalid database url: {}", e)))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| Error::Internal(format!("failed to open meeting store: {}", e)))?;

        Ok(Self { pool })
    }

    pub async fn init_schema(&self) -> Result<()> {
        super::schema::init_schema(&self.pool).await
    }

    /// Persist one fully processed meeting.
    ///
    /// Writes happen in a fixed order: meeting, transcript rows, task rows,
    /// then one speaker row per distinct label. A failure aborts the
    /// remaining steps without rolling back earlier ones, so callers must
    /// treat an error as "meeting may be partially created". Steps with an
    /// empty input collection are skipped.
    pub async fn save_meeting(
        &self,
        meeting: NewMeeting<'_>,
        segments: &[TranscriptSegment],
        tasks: &[TaskItem],
    ) -> Result<String> {
        let meeting_id = Uuid::new_v4().to_string();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO meetings (id, user_id, title, summary, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&meeting_id)
        .bind(meeting.user_id)
        .bind(meeting.title)
        .bind(meeting.summary)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| Error::storage("meeting", e))?;

        info!(%meeting_id, "meeting record created");

        for (position, segment) in segments.iter().enumerate() {
            sqlx::query(
                "INSERT INTO transcripts \
                 (id, meeting_id, speaker_id, speaker_name, text, order_index, timestamp_seconds) \
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&meeting_id)
            .bind(speaker_id(&segment.speaker_label))
            .bind(&segment.speaker_label)
            .bind(&segment.text)
            .bind(position as i64 + 1)
            .bind(segment.start_seconds.floor() as i64)
            .execute(&self.pool)
            .await
            .map_err(|e| Error::storage("transcript", e))?;
        }

        for task in tasks {
            sqlx::query(
                "INSERT INTO tasks (id, meeting_id, task, owner, deadline) VALUES (?, ?, ?, ?, ?)",
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&meeting_id)
            .bind(&task.task)
            .bind(&task.owner)
            .bind(&task.deadline)
            .execute(&self.pool)
            .await
            .map_err(|e| Error::storage("task", e))?;
        }

        // Uniqueness is the only requirement for the speaker registry
        let labels: BTreeSet<&str> = segments.iter().map(|s| s.speaker_label.as_str()).collect();
        for label in labels {
            sqlx::query(
                "INSERT INTO speakers (id, meeting_id, default_name, custom_name) \
                 VALUES (?, ?, ?, ?)",
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&meeting_id)
            .bind(label)
            .bind(label)
            .execute(&self.pool)
            .await
            .map_err(|e| Error::storage("speaker", e))?;
        }

        info!(
            %meeting_id,
            transcripts = segments.len(),
            tasks = tasks.len(),
            "meeting persisted"
        );

        Ok(meeting_id)
    }

    /// All meetings recorded by one user, newest first
    pub async fn list_meetings(&self, user_id: &str) -> Result<Vec<MeetingRecord>> {
        sqlx::query_as("SELECT * FROM meetings WHERE user_id = ? ORDER BY created_at DESC")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Error::storage("meeting", e))
    }

    pub async fn get_meeting(&self, meeting_id: &str) -> Result<Option<MeetingRecord>> {
        sqlx::query_as("SELECT * FROM meetings WHERE id = ?")
            .bind(meeting_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Error::storage("meeting", e))
    }

    pub async fn list_transcripts(&self, meeting_id: &str) -> Result<Vec<TranscriptRow>> {
        sqlx::query_as("SELECT * FROM transcripts WHERE meeting_id = ? ORDER BY order_index")
            .bind(meeting_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Error::storage("transcript", e))
    }

    pub async fn list_tasks(&self, meeting_id: &str) -> Result<Vec<TaskRow>> {
        sqlx::query_as("SELECT * FROM tasks WHERE meeting_id = ?")
            .bind(meeting_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Error::storage("task", e))
    }

    pub async fn list_speakers(&self, meeting_id: &str) -> Result<Vec<SpeakerRow>> {
        sqlx::query_as("SELECT * FROM speakers WHERE meeting_id = ? ORDER BY default_name")
            .bind(meeting_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Error::storage("speaker", e))
    }

    /// Update the one mutable speaker field. Returns false when the speaker
    /// does not exist for that meeting.
    pub async fn set_speaker_custom_name(
        &self,
        meeting_id: &str,
        speaker_id: &str,
        custom_name: &str,
    ) -> Result<bool> {
        let result = sqlx::query("UPDATE speakers SET custom_name = ? WHERE id = ? AND meeting_id = ?")
            .bind(custom_name)
            .bind(speaker_id)
            .bind(meeting_id)
            .execute(&self.pool)
            .await
            .map_err(|e| Error::storage("speaker", e))?;

        Ok(result.rows_affected() > 0)
    }
}

/// Stable identifier derived from a display label, e.g. "Speaker 0" -> "speaker_0"
fn speaker_id(label: &str) -> String {
    label.to_lowercase().replace(' ', "_")
}
