//! Statement generator — trait seam between the handler and the model backend.
//!
//! Default: `GeminiStatementGenerator` (one `generateContent` call via `LlmClient`).
//! `AppState` holds an `Arc<dyn StatementGenerator>`, so tests swap in a mock.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;
use tracing::{info, warn};

use crate::llm_client::{
    strip_code_fences, Blob, Content, FileData, GenerateContentRequest, GenerationConfig,
    LlmClient, LlmError, Part, Tool,
};
use crate::statement::prompts::{instruction_text, job_reference_text};
use crate::statement::request::GenerationRequest;

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

/// A reference the service reports having consulted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceReference {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Generated statement body plus optional diagnostics.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub body: String,
    pub sources: Vec<SourceReference>,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Turns one validated request into one generated statement.
/// Implementations make at most one outbound call per invocation.
#[async_trait]
pub trait StatementGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Part assembly
// ────────────────────────────────────────────────────────────────────────────

/// Builds the ordered content parts: instruction, job reference, CV, then
/// each auxiliary reference.
pub fn build_content_parts(request: &GenerationRequest) -> Vec<Part> {
    let mut parts = Vec::with_capacity(3 + request.auxiliary_references.len());

    parts.push(Part::Text(instruction_text()));
    parts.push(Part::Text(job_reference_text(&request.job_reference)));
    parts.push(Part::InlineData(Blob {
        mime_type: request.cv.media_type.clone(),
        data: STANDARD.encode(&request.cv.bytes),
    }));
    parts.extend(request.auxiliary_references.iter().map(|uri| {
        Part::FileData(FileData {
            file_uri: uri.clone(),
            mime_type: None,
        })
    }));

    parts
}

pub fn build_generate_request(
    request: &GenerationRequest,
    url_context: bool,
) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: "user",
            parts: build_content_parts(request),
        }],
        tools: if url_context {
            vec![Tool::url_context()]
        } else {
            Vec::new()
        },
        generation_config: GenerationConfig::default(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// GeminiStatementGenerator
// ────────────────────────────────────────────────────────────────────────────

pub struct GeminiStatementGenerator {
    llm: LlmClient,
}

impl GeminiStatementGenerator {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl StatementGenerator for GeminiStatementGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, LlmError> {
        let body = build_generate_request(request, self.llm.url_context_enabled());

        info!(
            model = self.llm.model(),
            cv_bytes = request.cv.bytes.len(),
            references = request.auxiliary_references.len(),
            "Requesting personal statement"
        );

        let response = self.llm.generate(&body).await?;

        let Some(text) = response.text() else {
            warn!(
                finish_reason = response.finish_reason().unwrap_or("none"),
                "Model returned no text"
            );
            return Err(LlmError::EmptyContent);
        };

        let statement = strip_code_fences(&text);
        if statement.is_empty() {
            return Err(LlmError::EmptyContent);
        }

        let sources = response
            .sources()
            .into_iter()
            .map(|m| SourceReference {
                url: m.retrieved_url,
                status: m.url_retrieval_status,
            })
            .collect();

        Ok(GenerationResult {
            body: statement.to_string(),
            sources,
        })
    }
}
