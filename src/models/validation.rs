use serde_json::Value;

/// Rejections of caller supplied input. Each one carries a stable code that
/// is sent back to the client as `{"error": code}`.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("child_id, game_code, level and result are required")]
    MissingRequiredFields,

    #[error("reaction_ms must be a non-negative whole number of milliseconds")]
    InvalidReactionMs,

    #[error("{0} must be a string")]
    InvalidTargetField(&'static str),

    #[error("{0} is longer than the store accepts")]
    FieldTooLong(&'static str),

    #[error("name is required")]
    NameRequired,

    #[error("userId must be a positive integer")]
    InvalidUserId,

    #[error("birthdate must be a YYYY-MM-DD date or an RFC 3339 timestamp")]
    InvalidBirthdate,

    #[error("child id must be a non-negative integer")]
    InvalidChildId,
}

impl ValidationError {
    pub fn code(&self) -> &'static str {
        return match self {
            ValidationError::MissingRequiredFields => "missing_required_fields",
            ValidationError::InvalidReactionMs => "invalid_reaction_ms",
            ValidationError::InvalidTargetField(_) => "invalid_target_field",
            ValidationError::FieldTooLong(_) => "field_too_long",
            ValidationError::NameRequired => "name_required",
            ValidationError::InvalidUserId => "invalid_user_id",
            ValidationError::InvalidBirthdate => "invalid_birthdate",
            ValidationError::InvalidChildId => "invalid_child_id",
        };
    }
}

/// Rejects text with more than `max` characters, the width of its column.
pub(crate) fn within_length(
    name: &'static str,
    text: String,
    max: usize,
) -> Result<String, ValidationError> {
    if text.chars().count() > max {
        return Err(ValidationError::FieldTooLong(name));
    }

    return Ok(text);
}

/// Loose truthiness for request bodies: `null`, `false`, `0` and `""` are all "not given".
pub(crate) fn is_truthy(value: &Value) -> bool {
    return match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().map_or(false, |n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    };
}

/// Whole number from a JSON number or a numeric string.
pub(crate) fn as_whole_number(value: &Value) -> Option<i64> {
    return match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(whole)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(whole))
        }
        _ => None,
    };
}

/// Non-blank text from a JSON string, or a number rendered as text.
pub(crate) fn as_text(value: &Value) -> Option<String> {
    return match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    };
}

fn whole(n: f64) -> Option<i64> {
    if !n.is_finite() || n.fract() != 0.0 || n < i64::MIN as f64 || n >= i64::MAX as f64 {
        return None;
    }

    return Some(n as i64);
}
