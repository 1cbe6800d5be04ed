use super::{AttemptStore, ChildStore, DataAccessError, Store};

use crate::models::{Attempt, Child, NewAttempt, NewChild};

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Process local store. Groups attempts in memory and keeps nothing across restarts.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

#[derive(Default)]
struct Tables {
    attempts: Vec<Attempt>,
    children: Vec<Child>,
}

impl MemoryStore {
    pub fn new() -> Self {
        return Self::default();
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>, DataAccessError> {
        return self
            .tables
            .lock()
            .map_err(|_| DataAccessError::Query("memory store lock poisoned".to_string()));
    }
}

#[async_trait]
impl AttemptStore for MemoryStore {
    async fn insert_attempt(&self, attempt: &NewAttempt) -> Result<(), DataAccessError> {
        let mut tables = self.tables()?;

        let attempt_id = tables.attempts.len() as i64 + 1;
        tables.attempts.push(Attempt {
            attempt_id,
            child_id: attempt.child_id,

            game_code: attempt.game_code.clone(),
            level: attempt.level,

            target_color: attempt.target_color.clone(),
            target_size: attempt.target_size.clone(),
            target_letter: attempt.target_letter.clone(),

            result: attempt.result,
            reaction_ms: attempt.reaction_ms,

            created_at: Utc::now(),
        });

        return Ok(());
    }

    async fn attempts_for_child(&self, child_id: i64) -> Result<Vec<Attempt>, DataAccessError> {
        let tables = self.tables()?;

        return Ok(tables
            .attempts
            .iter()
            .filter(|attempt| attempt.child_id == child_id)
            .cloned()
            .collect());
    }
}

#[async_trait]
impl ChildStore for MemoryStore {
    async fn list_children(&self) -> Result<Vec<Child>, DataAccessError> {
        let tables = self.tables()?;

        let mut children = tables.children.clone();
        children.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.child_id.cmp(&a.child_id))
        });

        return Ok(children);
    }

    async fn insert_child(&self, child: &NewChild) -> Result<Child, DataAccessError> {
        let mut tables = self.tables()?;

        let child = Child {
            child_id: tables.children.len() as i64 + 1,
            user_id: child.user_id,

            name: child.name.clone(),
            birthdate: child.birthdate,

            created_at: Utc::now(),
        };
        tables.children.push(child.clone());

        return Ok(child);
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn now(&self) -> Result<DateTime<Utc>, DataAccessError> {
        return Ok(Utc::now());
    }

    async fn close(&self) {}
}
