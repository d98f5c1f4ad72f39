use crate::error::CompletionError;
use crate::tools::llm::Completion;
use tracing::{info, instrument};

/// Stage 1: pull concrete facts out of the raw search bundle.
#[instrument(skip(llm, search_results))]
pub async fn extract_research(
    llm: &dyn Completion,
    query: &str,
    search_results: &str,
) -> Result<String, CompletionError> {
    info!("Starting research extraction stage");

    let prompt = format!(
        r#"You are an expert research analyst. Analyze this search data about: {query}

SEARCH RESULTS:
{search_results}

Extract:
1. Specific company and organization names, funding amounts, recent developments
2. Key market players and leaders
3. Concrete statistics and growth data
4. Expert quotes and industry insights
5. Recent news and technological breakthroughs

Focus on factual, recent information and current developments."#
    );

    let facts = llm.complete(&prompt).await?;
    info!("Extracted research facts ({} characters)", facts.len());
    Ok(facts)
}
