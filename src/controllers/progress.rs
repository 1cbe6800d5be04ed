use crate::{
    models::{ProgressSummary, ValidationError},
    prelude::*,
    progress::compute_progress,
};

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    return router.route("/progress/:child_id", get(progress));
}

async fn progress(
    Path(child_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<ProgressSummary>>> {
    let child_id = child_id
        .trim()
        .parse::<u64>()
        .ok()
        .and_then(|id| i64::try_from(id).ok())
        .ok_or(ValidationError::InvalidChildId)?;

    let rows = compute_progress(&*state.store, child_id).await?;

    return Ok(Json(rows));
}
