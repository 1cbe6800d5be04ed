use super::validation::{as_text, as_whole_number, is_truthy, within_length, ValidationError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx;

/// Width of the `game_code` and `target_*` columns.
pub const MAX_CODE_LEN: usize = 64;

/// One hour. Longer reactions are not a measurement anymore.
pub const MAX_REACTION_MS: i64 = 3_600_000;

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Attempt {
    pub attempt_id: i64,
    pub child_id: i64,

    pub game_code: String,
    pub level: i32,

    pub target_color: Option<String>,
    pub target_size: Option<String>,
    pub target_letter: Option<String>,

    pub result: bool,
    pub reaction_ms: Option<i64>,

    pub created_at: DateTime<Utc>,
}

/// Body of `POST /attempts` as the client sends it, before any type checks.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct AttemptPayload {
    pub child_id: Value,
    pub game_code: Value,
    pub level: Value,

    pub target_color: Value,
    pub target_size: Value,
    pub target_letter: Value,

    pub result: Value,
    pub reaction_ms: Value,
}

/// A validated attempt, ready to be appended to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAttempt {
    pub child_id: i64,
    pub game_code: String,
    pub level: i32,

    pub target_color: Option<String>,
    pub target_size: Option<String>,
    pub target_letter: Option<String>,

    pub result: bool,
    pub reaction_ms: Option<i64>,
}

impl TryFrom<AttemptPayload> for NewAttempt {
    type Error = ValidationError;

    fn try_from(payload: AttemptPayload) -> Result<Self, Self::Error> {
        let child_id = Some(&payload.child_id)
            .filter(|v| is_truthy(v))
            .and_then(as_whole_number)
            .filter(|id| *id > 0)
            .ok_or(ValidationError::MissingRequiredFields)?;

        let game_code = Some(&payload.game_code)
            .filter(|v| is_truthy(v))
            .and_then(as_text)
            .ok_or(ValidationError::MissingRequiredFields)?;
        let game_code = within_length("game_code", game_code, MAX_CODE_LEN)?;

        // level and result have to arrive with their JSON type, strings are not coerced
        let level = match &payload.level {
            Value::Number(_) => as_whole_number(&payload.level)
                .and_then(|level| i32::try_from(level).ok())
                .ok_or(ValidationError::MissingRequiredFields)?,
            _ => return Err(ValidationError::MissingRequiredFields),
        };

        let Value::Bool(result) = payload.result else {
            return Err(ValidationError::MissingRequiredFields);
        };

        let reaction_ms = if is_truthy(&payload.reaction_ms) {
            let ms = as_whole_number(&payload.reaction_ms)
                .filter(|ms| (0..=MAX_REACTION_MS).contains(ms))
                .ok_or(ValidationError::InvalidReactionMs)?;
            Some(ms)
        } else {
            None
        };

        return Ok(NewAttempt {
            child_id,
            game_code,
            level,

            target_color: target_field("target_color", payload.target_color)?,
            target_size: target_field("target_size", payload.target_size)?,
            target_letter: target_field("target_letter", payload.target_letter)?,

            result,
            reaction_ms,
        });
    }
}

fn target_field(name: &'static str, value: Value) -> Result<Option<String>, ValidationError> {
    return match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(within_length(name, s, MAX_CODE_LEN)?)),
        _ => Err(ValidationError::InvalidTargetField(name)),
    };
}
