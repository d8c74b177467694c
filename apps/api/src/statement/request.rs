//! Inbound form handling: multipart fields → validated `GenerationRequest`.

use axum::extract::Multipart;
use bytes::Bytes;

use crate::config::{split_locators, StatementSettings};
use crate::errors::AppError;

const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// The uploaded CV. The declared media type is forwarded unexamined.
#[derive(Debug, Clone)]
pub struct CvDocument {
    pub file_name: Option<String>,
    pub media_type: String,
    pub bytes: Bytes,
}

/// Everything one generation call needs. Lives for a single request.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub job_reference: String,
    pub auxiliary_references: Vec<String>,
    pub cv: CvDocument,
}

/// Raw fields collected from the form, before validation.
#[derive(Debug, Default)]
pub struct StatementForm {
    pub job_reference: Option<String>,
    pub auxiliary_references: Vec<String>,
    pub cv: Option<CvDocument>,
}

impl StatementForm {
    /// Drains the multipart stream. Unknown fields are skipped; a repeated
    /// job or CV field keeps the last value.
    pub async fn from_multipart(
        mut multipart: Multipart,
        settings: &StatementSettings,
    ) -> Result<Self, AppError> {
        let mut form = StatementForm::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();

            if name == settings.cv_field {
                let file_name = field.file_name().map(str::to_string);
                let media_type = field
                    .content_type()
                    .filter(|ct| !ct.trim().is_empty())
                    .unwrap_or(FALLBACK_MEDIA_TYPE)
                    .to_string();
                let bytes = field.bytes().await?;
                form.cv = Some(CvDocument {
                    file_name,
                    media_type,
                    bytes,
                });
            } else if name == settings.job_field {
                let text = field.text().await?;
                form.job_reference = Some(text);
            } else if name == settings.reference_field {
                let text = field.text().await?;
                form.auxiliary_references.extend(split_locators(&text));
            } else {
                tracing::debug!("Ignoring unknown form field '{name}'");
            }
        }

        Ok(form)
    }

    /// Checks required fields and fills in default references.
    pub fn into_request(self, settings: &StatementSettings) -> Result<GenerationRequest, AppError> {
        let job_reference = self
            .job_reference
            .map(|j| j.trim().to_string())
            .filter(|j| !j.is_empty())
            .ok_or_else(|| AppError::MissingField(settings.job_field.clone()))?;

        // Browsers submit an empty file part when nothing was selected.
        let cv = self
            .cv
            .filter(|cv| !cv.bytes.is_empty())
            .ok_or_else(|| AppError::MissingField(settings.cv_field.clone()))?;

        let auxiliary_references = if self.auxiliary_references.is_empty() {
            settings.default_references.clone()
        } else {
            self.auxiliary_references
        };

        Ok(GenerationRequest {
            job_reference,
            auxiliary_references,
            cv,
        })
    }
}
