//! In-process stand-in for the Gemini REST endpoint.
//!
//! Binds an axum router on `127.0.0.1:0`, replies with a fixed status and
//! JSON body, and records every request it receives.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::Path,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};

use crate::config::GeminiSettings;

pub const TEST_API_KEY: &str = "test-key";
pub const TEST_MODEL: &str = "gemini-test";

/// One request as the stub saw it.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// Last path segment, e.g. `gemini-test:generateContent`.
    pub action: String,
    pub api_key: Option<String>,
    pub body: Value,
}

pub struct StubGemini {
    pub base_url: String,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl StubGemini {
    pub async fn start(status: StatusCode, reply: Value) -> Self {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let recorder = calls.clone();

        let app = Router::new().route(
            "/v1beta/models/:action",
            post(
                move |Path(action): Path<String>, headers: HeaderMap, Json(body): Json<Value>| {
                    let recorder = recorder.clone();
                    let reply = reply.clone();
                    async move {
                        let api_key = headers
                            .get("x-goog-api-key")
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_string);
                        recorder.lock().unwrap().push(RecordedCall {
                            action,
                            api_key,
                            body,
                        });
                        (status, Json(reply))
                    }
                },
            ),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            calls,
        }
    }

    pub fn settings(&self, url_context: bool) -> GeminiSettings {
        GeminiSettings {
            api_key: TEST_API_KEY.to_string(),
            api_base: self.base_url.clone(),
            model: TEST_MODEL.to_string(),
            url_context,
            timeout: Duration::from_secs(5),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

/// A successful `generateContent` reply with one text candidate.
pub fn text_reply(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }],
        "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 3}
    })
}

/// The envelope Gemini returns for a rejected key.
pub fn key_rejected_reply() -> Value {
    json!({
        "error": {
            "code": 403,
            "message": "Method doesn't allow unregistered callers.",
            "status": "PERMISSION_DENIED"
        }
    })
}
