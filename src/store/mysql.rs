use super::{AttemptStore, ChildStore, DataAccessError, Store};

use crate::models::{Attempt, Child, GroupTally, NewAttempt, NewChild};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{self, MySqlPool};

#[derive(Clone)]
pub struct MySqlStore {
    db: MySqlPool,
}

impl MySqlStore {
    pub fn new(db: MySqlPool) -> Self {
        return Self { db };
    }
}

#[async_trait]
impl AttemptStore for MySqlStore {
    async fn insert_attempt(&self, attempt: &NewAttempt) -> Result<(), DataAccessError> {
        sqlx::query(
            "INSERT INTO attempts (child_id, game_code, level, target_color, target_size, target_letter, result, reaction_ms) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(attempt.child_id)
        .bind(&attempt.game_code)
        .bind(attempt.level)
        .bind(&attempt.target_color)
        .bind(&attempt.target_size)
        .bind(&attempt.target_letter)
        .bind(attempt.result)
        .bind(attempt.reaction_ms)
        .execute(&self.db)
        .await?;

        return Ok(());
    }

    async fn attempts_for_child(&self, child_id: i64) -> Result<Vec<Attempt>, DataAccessError> {
        let attempts: Vec<Attempt> =
            sqlx::query_as("SELECT * FROM attempts WHERE child_id = ? ORDER BY attempt_id")
                .bind(child_id)
                .fetch_all(&self.db)
                .await?;

        return Ok(attempts);
    }

    async fn tally_for_child(&self, child_id: i64) -> Result<Vec<GroupTally>, DataAccessError> {
        // SUM over integers comes back as DECIMAL, cast so the counters decode as BIGINT
        let tallies: Vec<GroupTally> = sqlx::query_as(
            r#"
SELECT
    game_code,
    level,
    CAST(SUM(result = 1) AS SIGNED) AS correct,
    CAST(SUM(result = 0) AS SIGNED) AS wrong,
    CAST(SUM(reaction_ms) AS SIGNED) AS latency_total,
    COUNT(reaction_ms) AS latency_samples
FROM attempts
WHERE child_id = ?
GROUP BY game_code, level
            "#,
        )
        .bind(child_id)
        .fetch_all(&self.db)
        .await?;

        return Ok(tallies);
    }
}

#[async_trait]
impl ChildStore for MySqlStore {
    async fn list_children(&self) -> Result<Vec<Child>, DataAccessError> {
        let children: Vec<Child> =
            sqlx::query_as("SELECT * FROM children ORDER BY created_at DESC, child_id DESC")
                .fetch_all(&self.db)
                .await?;

        return Ok(children);
    }

    async fn insert_child(&self, child: &NewChild) -> Result<Child, DataAccessError> {
        let inserted = sqlx::query("INSERT INTO children (user_id, name, birthdate) VALUES (?, ?, ?)")
            .bind(child.user_id)
            .bind(&child.name)
            .bind(child.birthdate)
            .execute(&self.db)
            .await?;

        let child: Child = sqlx::query_as("SELECT * FROM children WHERE child_id = ? LIMIT 1")
            .bind(inserted.last_insert_id())
            .fetch_one(&self.db)
            .await?;

        return Ok(child);
    }
}

#[async_trait]
impl Store for MySqlStore {
    async fn now(&self) -> Result<DateTime<Utc>, DataAccessError> {
        let (now,): (NaiveDateTime,) = sqlx::query_as("SELECT UTC_TIMESTAMP(6) AS now")
            .fetch_one(&self.db)
            .await?;

        return Ok(now.and_utc());
    }

    async fn close(&self) {
        self.db.close().await;
    }
}
