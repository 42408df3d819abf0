use std::path::Path;

use anyhow::Context;
use axum::async_trait;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteConnection},
    Connection,
};
use tracing::debug;

use super::repo_types::NewWorkoutSession;

#[async_trait]
pub trait WorkoutStore: Send + Sync {
    /// Append one session and return its surrogate id.
    async fn insert_session(&self, session: &NewWorkoutSession) -> anyhow::Result<i64>;
}

/// File-backed store. Opens a fresh connection for every write and closes it
/// afterwards; there is no pool.
#[derive(Clone)]
pub struct SqliteStore {
    options: SqliteConnectOptions,
}

impl SqliteStore {
    pub fn new(path: &Path) -> Self {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        Self { options }
    }

    async fn connect(&self) -> anyhow::Result<SqliteConnection> {
        SqliteConnection::connect_with(&self.options)
            .await
            .context("open workout database")
    }

    pub async fn migrate(&self) -> anyhow::Result<()> {
        let mut conn = self.connect().await?;
        sqlx::migrate!("./migrations")
            .run(&mut conn)
            .await
            .context("run migrations")?;
        conn.close().await.context("close workout database")?;
        Ok(())
    }
}

#[async_trait]
impl WorkoutStore for SqliteStore {
    async fn insert_session(&self, s: &NewWorkoutSession) -> anyhow::Result<i64> {
        let mut conn = self.connect().await?;
        let result = sqlx::query(
            r#"
            INSERT INTO workout_sessions (
                activity_id, session_date, duration_hhmm, duration_minutes, day_of_week,
                notes, sleep_quality_score, meal_before, temperature_celsius,
                avg_heart_rate_bpm, effort_score, post_workout_score, distance_km,
                avg_pace_min_per_km, trail_fatigue_score, trail_safety_score,
                trail_overall_score, gym_plan_type, gym_total_weight_kg
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(s.activity_id)
        .bind(&s.session_date)
        .bind(&s.duration_hhmm)
        .bind(s.duration_minutes)
        .bind(s.day_of_week)
        .bind(&s.notes)
        .bind(s.sleep_quality_score)
        .bind(&s.meal_before)
        .bind(s.temperature_celsius)
        .bind(s.avg_heart_rate_bpm)
        .bind(s.effort_score)
        .bind(s.post_workout_score)
        .bind(s.distance_km)
        .bind(s.avg_pace_min_per_km)
        .bind(s.trail_fatigue_score)
        .bind(s.trail_safety_score)
        .bind(s.trail_overall_score)
        .bind(&s.gym_plan_type)
        .bind(s.gym_total_weight_kg)
        .execute(&mut conn)
        .await
        .context("insert workout session")?;
        conn.close().await.context("close workout database")?;

        let id = result.last_insert_rowid();
        debug!(session_id = id, "workout session inserted");
        Ok(id)
    }
}

#[cfg(test)]
pub mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Keeps inserted sessions in memory so tests can see what was written.
    #[derive(Default)]
    pub struct MemoryStore {
        rows: Mutex<Vec<NewWorkoutSession>>,
    }

    impl MemoryStore {
        pub fn rows(&self) -> Vec<NewWorkoutSession> {
            self.rows.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl WorkoutStore for MemoryStore {
        async fn insert_session(&self, session: &NewWorkoutSession) -> anyhow::Result<i64> {
            let mut rows = self.rows.lock().unwrap();
            rows.push(session.clone());
            Ok(rows.len() as i64)
        }
    }

    /// Always fails, like a locked or missing database file.
    pub struct FailingStore;

    #[async_trait]
    impl WorkoutStore for FailingStore {
        async fn insert_session(&self, _session: &NewWorkoutSession) -> anyhow::Result<i64> {
            anyhow::bail!("database is locked")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::FromRow;

    #[derive(Debug, FromRow)]
    struct StoredSession {
        id: i64,
        activity_id: i64,
        session_date: String,
        duration_minutes: f64,
        day_of_week: i64,
        distance_km: Option<f64>,
        effort_score: Option<i64>,
        notes: Option<String>,
        avg_heart_rate_bpm: Option<i64>,
    }

    fn sample() -> NewWorkoutSession {
        NewWorkoutSession {
            activity_id: 1,
            session_date: "2024-01-01".into(),
            duration_hhmm: "01:30".into(),
            duration_minutes: 90.0,
            day_of_week: 0,
            notes: Some("easy run".into()),
            sleep_quality_score: None,
            meal_before: None,
            temperature_celsius: None,
            avg_heart_rate_bpm: None,
            effort_score: Some(7),
            post_workout_score: None,
            distance_km: Some(12.5),
            avg_pace_min_per_km: None,
            trail_fatigue_score: None,
            trail_safety_score: None,
            trail_overall_score: None,
            gym_plan_type: None,
            gym_total_weight_kg: None,
        }
    }

    #[tokio::test]
    async fn insert_appends_rows_with_increasing_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fitlog.db");
        let store = SqliteStore::new(&path);
        store.migrate().await.unwrap();

        let first = store.insert_session(&sample()).await.unwrap();
        let second = store.insert_session(&sample()).await.unwrap();
        assert!(second > first);

        let mut conn = store.connect().await.unwrap();
        let rows = sqlx::query_as::<_, StoredSession>(
            r#"
            SELECT id, activity_id, session_date, duration_minutes, day_of_week,
                   distance_km, effort_score, notes, avg_heart_rate_bpm
              FROM workout_sessions
             ORDER BY id
            "#,
        )
        .fetch_all(&mut conn)
        .await
        .unwrap();

        assert_eq!(rows.len(), 2);
        let row = &rows[0];
        assert_eq!(row.id, first);
        assert_eq!(row.activity_id, 1);
        assert_eq!(row.session_date, "2024-01-01");
        assert_eq!(row.duration_minutes, 90.0);
        assert_eq!(row.day_of_week, 0);
        assert_eq!(row.distance_km, Some(12.5));
        assert_eq!(row.effort_score, Some(7));
        assert_eq!(row.notes.as_deref(), Some("easy run"));
        assert_eq!(row.avg_heart_rate_bpm, None);
    }

    #[tokio::test]
    async fn migrate_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteStore::new(&dir.path().join("fitlog.db"));
        store.migrate().await.unwrap();
        store.migrate().await.unwrap();
    }

    #[tokio::test]
    async fn insert_without_schema_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteStore::new(&dir.path().join("empty.db"));
        let err = store.insert_session(&sample()).await.unwrap_err();
        assert!(format!("{:#}", err).contains("workout_sessions"));
    }
}
