use crate::error::RetrievalError;
use crate::models::{TavilySearchRequest, TavilySearchResponse};
use async_trait::async_trait;

const TAVILY_ENDPOINT: &str = "https://api.tavily.com/search";

/// Web-search collaborator over the Tavily wire contract. The aggregator
/// only depends on this seam, so tests swap in scripted providers.
#[async_trait]
pub trait Search: Send + Sync {
    async fn search(
        &self,
        request: TavilySearchRequest,
    ) -> Result<TavilySearchResponse, RetrievalError>;
}

pub struct TavilyClient {
    http: reqwest::Client,
    api_key: String,
}

impl TavilyClient {
    pub fn new(api_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait]
impl Search for TavilyClient {
    async fn search(
        &self,
        request: TavilySearchRequest,
    ) -> Result<TavilySearchResponse, RetrievalError> {
        let response = self
            .http
            .post(TAVILY_ENDPOINT)
            .header("api-key", &self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }
}
