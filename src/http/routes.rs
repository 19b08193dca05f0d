use std::sync::Arc;

use axum::extract::{Path, RawQuery, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Json, Redirect, Response};
use axum::Form;

use crate::core::workflow::{SelectionForm, SelectionOutcome};
use crate::domain::model::{Operator, PortalId, RollId};
use crate::http::state::AppState;
use crate::utils::error::Result;

pub async fn list_portals(
    State(state): State<Arc<AppState>>,
    operator: Operator,
) -> Result<Response> {
    let portals = state.workflow.portals(&operator).await?;
    Ok(Json(portals).into_response())
}

pub async fn selection_form(
    State(state): State<Arc<AppState>>,
    Path(portal_id): Path<PortalId>,
    operator: Operator,
) -> Result<Response> {
    let context = state.workflow.selection_form(portal_id, &operator).await?;
    Ok(Json(context).into_response())
}

pub async fn submit_selection(
    State(state): State<Arc<AppState>>,
    Path(portal_id): Path<PortalId>,
    operator: Operator,
    Form(form): Form<SelectionForm>,
) -> Result<Response> {
    match state.workflow.select(portal_id, &operator, form).await? {
        SelectionOutcome::Redirect(url) => Ok(Redirect::to(&url).into_response()),
        SelectionOutcome::Retry(retry) => {
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(retry)).into_response())
        }
    }
}

pub async fn render_print(
    State(state): State<Arc<AppState>>,
    Path((portal_id, roll_id, printer_type)): Path<(PortalId, RollId, String)>,
    RawQuery(query): RawQuery,
    operator: Operator,
) -> Result<Response> {
    let document = state
        .workflow
        .render(
            portal_id,
            roll_id,
            &printer_type,
            query.as_deref().unwrap_or(""),
            &operator,
        )
        .await?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        document,
    )
        .into_response())
}
