use crate::{
    models::{AttemptPayload, NewAttempt},
    prelude::*,
};

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use serde_json::json;

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    return router.route("/attempts", post(post_attempt));
}

async fn post_attempt(
    State(state): State<AppState>,
    body: Option<Json<AttemptPayload>>,
) -> Result<impl IntoResponse> {
    // an unreadable body is treated like an empty one
    let payload = body.map(|Json(payload)| payload).unwrap_or_default();

    let attempt = NewAttempt::try_from(payload)?;

    state.store.insert_attempt(&attempt).await?;

    tracing::info!(
        child_id = attempt.child_id,
        game_code = %attempt.game_code,
        level = attempt.level,
        result = attempt.result,
        "recorded attempt"
    );

    return Ok((StatusCode::CREATED, Json(json!({ "ok": true }))));
}
