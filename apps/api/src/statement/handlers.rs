//! Axum route handler for the personal statement endpoint.

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::LlmError;
use crate::statement::generator::SourceReference;
use crate::statement::request::StatementForm;
use crate::statement::sanitize::sanitize_statement;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StatementResponse {
    pub statement: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<SourceReference>,
}

/// POST /api/statement
///
/// Multipart form: job locator, CV file, optional reference locators.
/// Makes exactly one generation call; never retries.
pub async fn handle_generate_statement(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<StatementResponse>, AppError> {
    let request_id = Uuid::new_v4();
    let span = info_span!("statement", %request_id);

    async move {
        let multipart = multipart?;
        let settings = &state.statement;

        let request = StatementForm::from_multipart(multipart, settings)
            .await?
            .into_request(settings)?;

        info!(
            job_reference = %request.job_reference,
            file_name = request.cv.file_name.as_deref().unwrap_or("-"),
            media_type = %request.cv.media_type,
            "Statement request validated"
        );

        let result = tokio::time::timeout(settings.timeout, state.generator.generate(&request))
            .await
            .map_err(|_| AppError::Timeout(settings.timeout.as_secs()))??;

        let statement = if settings.sanitize_output {
            sanitize_statement(&result.body)
        } else {
            result.body
        };

        if statement.trim().is_empty() {
            return Err(AppError::Upstream(LlmError::EmptyContent));
        }

        info!(
            statement_len = statement.len(),
            sources = result.sources.len(),
            "Statement generated"
        );

        Ok(Json(StatementResponse {
            statement,
            sources: result.sources,
        }))
    }
    .instrument(span)
    .await
}
