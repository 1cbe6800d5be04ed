mod memory;
pub use memory::MemoryStore;

mod mysql;
pub use mysql::MySqlStore;

use crate::{
    models::{Attempt, Child, GroupTally, NewAttempt, NewChild},
    progress,
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Failures of the backing store. Never caused by the caller's input.
#[derive(thiserror::Error, Debug)]
pub enum DataAccessError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("query failed: {0}")]
    Query(String),
}

impl From<sqlx::Error> for DataAccessError {
    fn from(err: sqlx::Error) -> Self {
        return match &err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => DataAccessError::Unavailable(err.to_string()),
            _ => DataAccessError::Query(err.to_string()),
        };
    }
}

#[async_trait]
pub trait AttemptStore: Send + Sync {
    /// Appends one attempt. Returns once the row is stored.
    async fn insert_attempt(&self, attempt: &NewAttempt) -> Result<(), DataAccessError>;

    async fn attempts_for_child(&self, child_id: i64) -> Result<Vec<Attempt>, DataAccessError>;

    /// Per (game_code, level) counters for a child, in no particular order.
    /// Stores that can group natively should override this.
    async fn tally_for_child(&self, child_id: i64) -> Result<Vec<GroupTally>, DataAccessError> {
        let attempts = self.attempts_for_child(child_id).await?;

        return Ok(progress::tally(&attempts));
    }
}

#[async_trait]
pub trait ChildStore: Send + Sync {
    /// Newest first.
    async fn list_children(&self) -> Result<Vec<Child>, DataAccessError>;

    async fn insert_child(&self, child: &NewChild) -> Result<Child, DataAccessError>;
}

#[async_trait]
pub trait Store: AttemptStore + ChildStore {
    /// Current time as seen by the store, used by the health check.
    async fn now(&self) -> Result<DateTime<Utc>, DataAccessError>;

    async fn close(&self);
}
