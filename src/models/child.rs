use super::validation::{as_whole_number, is_truthy, within_length, ValidationError};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx;

pub const DEFAULT_USER_ID: i64 = 1;

/// Width of the `children.name` column.
pub const MAX_NAME_LEN: usize = 255;

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Child {
    #[serde(rename = "id")]
    pub child_id: i64,
    pub user_id: i64,

    pub name: String,
    pub birthdate: Option<NaiveDate>,

    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct ChildPayload {
    pub name: Value,
    pub birthdate: Value,
    #[serde(rename = "userId")]
    pub user_id: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewChild {
    pub user_id: i64,
    pub name: String,
    pub birthdate: Option<NaiveDate>,
}

impl TryFrom<ChildPayload> for NewChild {
    type Error = ValidationError;

    fn try_from(payload: ChildPayload) -> Result<Self, Self::Error> {
        let name = match payload.name {
            Value::String(name) if !name.trim().is_empty() => name,
            _ => return Err(ValidationError::NameRequired),
        };
        let name = within_length("name", name, MAX_NAME_LEN)?;

        let user_id = match &payload.user_id {
            Value::Null => DEFAULT_USER_ID,
            other => as_whole_number(other)
                .filter(|id| *id > 0)
                .ok_or(ValidationError::InvalidUserId)?,
        };

        let birthdate = if is_truthy(&payload.birthdate) {
            let Value::String(raw) = &payload.birthdate else {
                return Err(ValidationError::InvalidBirthdate);
            };
            Some(parse_birthdate(raw.trim()).ok_or(ValidationError::InvalidBirthdate)?)
        } else {
            None
        };

        return Ok(NewChild {
            user_id,
            name,
            birthdate,
        });
    }
}

fn parse_birthdate(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }

    return DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|ts| ts.with_timezone(&Utc).date_naive());
}
