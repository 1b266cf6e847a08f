use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use uuid::Uuid;

use crate::presentation::{admin::views as admin_views, views::render_template_response};

use super::AdminState;

pub(super) async fn admin_submissions(State(state): State<AdminState>) -> Response {
    let chrome = state.chrome.load("/submissions");

    let content = match state.submissions.list().await {
        Ok(view) => view,
        Err(err) => return err.into_response(),
    };

    let view = admin_views::AdminLayout::new(chrome, content);
    render_template_response(admin_views::SubmissionsTemplate { view }, StatusCode::OK)
}

pub(super) async fn admin_submission_mark_read(
    State(state): State<AdminState>,
    Path(id): Path<Uuid>,
) -> Response {
    match state.submissions.mark_read(id).await {
        Ok(()) => Redirect::to("/submissions").into_response(),
        Err(err) => err.into_response(),
    }
}

pub(super) async fn admin_submission_delete(
    State(state): State<AdminState>,
    Path(id): Path<Uuid>,
) -> Response {
    match state.submissions.delete(id).await {
        Ok(()) => Redirect::to("/submissions").into_response(),
        Err(err) => err.into_response(),
    }
}
