use axum::extract::State;
use axum::Json;
use serde::Serialize;

use super::AppState;
use crate::error::AppError;
use crate::session::Session;
use crate::source::parse_import_document;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResponse {
    pub imported: usize,
    pub trades: usize,
}

/// Replace the dataset with an uploaded JSON array of trade records.
///
/// The new session is fully rendered before it is swapped in; a rejected
/// document leaves the current session untouched.
pub async fn post_import(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<ImportResponse>, AppError> {
    let records = parse_import_document(&body).map_err(|e| {
        tracing::warn!(error = %e, "Rejected import");
        AppError::from(e)
    })?;

    let session = Session::from_records(
        &records,
        state.config.matcher(),
        state.config.calendar_year,
    );
    let response = ImportResponse {
        imported: session.events().len(),
        trades: session.dashboard().trades.len(),
    };

    state.replace_session(session).await;
    tracing::info!(
        imported = response.imported,
        trades = response.trades,
        "Imported trade records"
    );

    Ok(Json(response))
}
