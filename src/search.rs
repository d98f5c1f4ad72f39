use crate::error::RetrievalError;
use crate::models::{SearchDepth, TavilySearchRequest, TavilySearchResponse};
use crate::tools::tavily::Search;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Domains favoured by the primary search; business and tech press with
/// reliable startup coverage.
const PRIMARY_DOMAINS: &[&str] = &[
    "yourstory.com",
    "economictimes.indiatimes.com",
    "techcrunch.com",
    "inc42.com",
    "business-standard.com",
    "livemint.com",
    "forbesindia.com",
    "moneycontrol.com",
];

/// Fixed suffixes for the two narrower follow-up searches.
const FOLLOWUP_SUFFIXES: &[&str] = &[
    "funding investment 2024 2025",
    "latest news recent developments",
];

const PRIMARY_MAX_RESULTS: u32 = 15;
const FOLLOWUP_MAX_RESULTS: u32 = 5;
const SOURCE_SEPARATOR_LEN: usize = 30;
const BLOCK_DIVIDER_LEN: usize = 50;

/// Issues one broad primary search plus two narrower follow-ups and folds
/// the responses into a single text bundle for the pipeline. Only the
/// primary search is load-bearing; a failed follow-up is skipped.
pub struct SearchAggregator {
    provider: Arc<dyn Search>,
}

impl SearchAggregator {
    pub fn new(provider: Arc<dyn Search>) -> Self {
        Self { provider }
    }

    #[instrument(skip(self))]
    pub async fn aggregate(&self, query: &str) -> Result<String, RetrievalError> {
        let primary = self
            .provider
            .search(TavilySearchRequest {
                query: query.to_string(),
                search_depth: SearchDepth::Advanced,
                max_results: PRIMARY_MAX_RESULTS,
                include_answer: true,
                include_raw_content: true,
                include_domains: Some(
                    PRIMARY_DOMAINS.iter().map(|d| d.to_string()).collect(),
                ),
            })
            .await?;

        let mut blocks = vec![format_response(&primary)];

        for suffix in FOLLOWUP_SUFFIXES {
            let request = TavilySearchRequest {
                query: format!("{query} {suffix}"),
                search_depth: SearchDepth::Basic,
                max_results: FOLLOWUP_MAX_RESULTS,
                include_answer: true,
                include_raw_content: false,
                include_domains: None,
            };
            match self.provider.search(request).await {
                Ok(response) => blocks.push(format_response(&response)),
                Err(err) => debug!("follow-up search \"{suffix}\" skipped: {err}"),
            }
        }

        info!("aggregated {} search block(s)", blocks.len());
        let divider = format!("\n\n{}\n\n", "=".repeat(BLOCK_DIVIDER_LEN));
        Ok(blocks.join(&divider))
    }
}

/// One response becomes a text block: an optional top-line insight followed
/// by numbered source entries.
fn format_response(response: &TavilySearchResponse) -> String {
    let mut lines = Vec::new();

    if let Some(answer) = response.answer.as_deref().filter(|a| !a.is_empty()) {
        lines.push(format!("**INSIGHT:** {answer}\n"));
    }

    for (i, result) in response.results.iter().enumerate() {
        lines.push(format!("**SOURCE {}:** {}", i + 1, result.title));
        lines.push(format!("**URL:** {}", result.url));
        lines.push(format!("**CONTENT:** {}", result.content));
        lines.push("-".repeat(SOURCE_SEPARATOR_LEN));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TavilyResult;
    use async_trait::async_trait;

    /// Scripted provider: fails primary and/or follow-up searches on demand.
    struct ScriptedSearch {
        fail_primary: bool,
        fail_followups: bool,
    }

    #[async_trait]
    impl Search for ScriptedSearch {
        async fn search(
            &self,
            request: TavilySearchRequest,
        ) -> Result<TavilySearchResponse, RetrievalError> {
            let is_primary = request.search_depth == SearchDepth::Advanced;
            if (is_primary && self.fail_primary) || (!is_primary && self.fail_followups) {
                return Err(RetrievalError::Provider("scripted failure".into()));
            }
            Ok(TavilySearchResponse {
                answer: is_primary.then(|| "broad overview".to_string()),
                results: vec![TavilyResult {
                    title: format!("result for {}", request.query),
                    url: "https://example.test/a".into(),
                    content: "snippet".into(),
                }],
            })
        }
    }

    fn aggregator(fail_primary: bool, fail_followups: bool) -> SearchAggregator {
        SearchAggregator::new(Arc::new(ScriptedSearch {
            fail_primary,
            fail_followups,
        }))
    }

    #[tokio::test]
    async fn primary_failure_is_fatal() {
        let result = aggregator(true, false).aggregate("quantum batteries").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn followup_failures_are_skipped() {
        let bundle = aggregator(false, true)
            .aggregate("quantum batteries")
            .await
            .unwrap();
        assert!(bundle.contains("**INSIGHT:** broad overview"));
        assert!(bundle.contains("**SOURCE 1:**"));
        // no follow-up block means no divider
        assert!(!bundle.contains(&"=".repeat(50)));
    }

    #[tokio::test]
    async fn successful_followups_are_divided_from_the_primary_block() {
        let bundle = aggregator(false, false)
            .aggregate("quantum batteries")
            .await
            .unwrap();
        let divider = "=".repeat(50);
        assert_eq!(bundle.matches(&divider).count(), 2);
        assert!(bundle.contains("funding investment 2024 2025"));
        assert!(bundle.contains("latest news recent developments"));
    }

    #[test]
    fn insight_line_is_omitted_without_an_answer() {
        let block = format_response(&TavilySearchResponse {
            answer: None,
            results: vec![TavilyResult {
                title: "t".into(),
                url: "https://example.test".into(),
                content: "c".into(),
            }],
        });
        assert!(!block.contains("**INSIGHT:**"));
        assert!(block.starts_with("**SOURCE 1:** t"));
        assert!(block.contains(&"-".repeat(30)));
    }
}
