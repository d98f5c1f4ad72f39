use crate::error::CompletionError;
use async_trait::async_trait;
use rig::completion::Prompt;
use rig::prelude::*;
use rig::providers::groq;

pub const MODEL: &str = "llama-3.3-70b-versatile";
const TEMPERATURE: f64 = 0.3;
const MAX_TOKENS: u64 = 4000;

/// Text-completion collaborator. One prompt in, one text blob out; the
/// pipeline stages only ever talk to this seam.
#[async_trait]
pub trait Completion: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

pub struct GroqCompletion {
    agent: rig::agent::Agent<groq::CompletionModel>,
}

impl GroqCompletion {
    pub fn new(api_key: &str) -> Self {
        let client = groq::Client::new(api_key);
        let agent = client
            .agent(MODEL)
            .temperature(TEMPERATURE)
            .max_tokens(MAX_TOKENS)
            .build();
        Self { agent }
    }
}

#[async_trait]
impl Completion for GroqCompletion {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        self.agent
            .prompt(prompt)
            .await
            .map_err(|e| CompletionError::Provider(e.to_string()))
    }
}
