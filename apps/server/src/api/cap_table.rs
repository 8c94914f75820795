use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use captable_core::{
    CalculatedCapTable, CapTableEdit, CapTableState, InitialTerms, InitialTermsEdit,
};
use serde::{Deserialize, Serialize};

use super::ApiJson;
use crate::{error::ApiResult, main_lib::AppState};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EditRequest {
    state: CapTableState,
    edit: CapTableEdit,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EditResponse {
    state: CapTableState,
    table: CalculatedCapTable,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InitialTermsRequest {
    terms: InitialTerms,
    edit: InitialTermsEdit,
}

async fn calculate(
    State(state): State<Arc<AppState>>,
    ApiJson(cap_table): ApiJson<CapTableState>,
) -> ApiResult<Json<CalculatedCapTable>> {
    let table = state.cap_table_service.calculate(&cap_table);
    Ok(Json(table))
}

/// Applies one edit and returns the edited state together with its recalculated table.
async fn apply_edit(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<EditRequest>,
) -> ApiResult<Json<EditResponse>> {
    let next = state.cap_table_service.apply_edit(&body.state, body.edit)?;
    let table = state.cap_table_service.calculate(&next);
    Ok(Json(EditResponse { state: next, table }))
}

async fn resolve_initial_terms(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<InitialTermsRequest>,
) -> ApiResult<Json<InitialTerms>> {
    let terms = state
        .cap_table_service
        .resolve_initial_terms(body.terms, body.edit);
    Ok(Json(terms))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/cap-table/calculate", post(calculate))
        .route("/cap-table/edits", post(apply_edit))
        .route("/cap-table/initial-terms", post(resolve_initial_terms))
}
