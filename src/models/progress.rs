use serde::{Deserialize, Serialize};
use sqlx;

/// Per (game, level) counters as a store hands them over, before the mean is taken.
#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Eq)]
pub struct GroupTally {
    pub game_code: String,
    pub level: i32,

    pub correct: i64,
    pub wrong: i64,

    pub latency_total: Option<i64>,
    pub latency_samples: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProgressSummary {
    pub game_code: String,
    pub level: i32,

    pub correct: i64,
    pub wrong: i64,

    pub avg_ms: Option<f64>,
}
