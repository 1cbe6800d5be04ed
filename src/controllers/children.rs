use crate::{
    models::{Child, ChildPayload, NewChild},
    prelude::*,
};

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    return router.route("/children", get(children).post(post_child));
}

// no auth yet, every child is listed
async fn children(State(state): State<AppState>) -> Result<Json<Vec<Child>>> {
    let children = state.store.list_children().await?;

    return Ok(Json(children));
}

async fn post_child(
    State(state): State<AppState>,
    body: Option<Json<ChildPayload>>,
) -> Result<impl IntoResponse> {
    let payload = body.map(|Json(payload)| payload).unwrap_or_default();

    let child = NewChild::try_from(payload)?;

    let child = state.store.insert_child(&child).await?;

    tracing::info!(child_id = child.child_id, user_id = child.user_id, "created child");

    return Ok((StatusCode::CREATED, Json(child)));
}
