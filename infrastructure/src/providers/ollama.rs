//! Ollama gateway adapter
//!
//! Implements the `AgentGateway` port over the Ollama HTTP API. One
//! blocking generate call per invocation, no streaming. The adapter
//! carries no timeout of its own: time-boxing is the scoring engine's
//! job, and the reqwest client is built without a request timeout so a
//! slow local model is not cut off mid-generation.

use async_trait::async_trait;
use council_application::ports::agent_gateway::{AgentGateway, GatewayError};
use council_domain::PanelMember;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// AgentGateway adapter for an Ollama server
pub struct OllamaGateway {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaGateway {
    /// Create a gateway for the given base URL, e.g. `http://localhost:11434`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }
}

#[async_trait]
impl AgentGateway for OllamaGateway {
    async fn invoke(&self, member: &PanelMember, prompt: &str) -> Result<String, GatewayError> {
        debug!("Invoking {} via {}", member, self.generate_url());

        let request = GenerateRequest {
            model: &member.name,
            prompt,
            stream: false,
        };

        let response = self
            .client
            .post(self.generate_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(GatewayError::ModelNotAvailable(member.name.clone()));
        }
        if !response.status().is_success() {
            return Err(GatewayError::RequestFailed(format!(
                "{} returned {}",
                member.name,
                response.status()
            )));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        Ok(body.response)
    }
}
