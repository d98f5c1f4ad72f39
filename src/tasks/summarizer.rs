use crate::error::CompletionError;
use crate::tools::llm::Completion;
use tracing::{info, instrument};

/// Stage 2: restructure the extracted facts into a sectioned summary.
#[instrument(skip(llm, research_content))]
pub async fn summarize(
    llm: &dyn Completion,
    research_content: &str,
) -> Result<String, CompletionError> {
    info!("Starting summarization stage");

    let prompt = format!(
        r#"Process this research content:
{research_content}

Create structured summary:

## Key Players
- Organization name, founding year, headquarters
- Core technology and focus area
- Key products/services and recent funding

## Market Intelligence
- Market size, growth statistics
- Investment trends, key partnerships
- Technology applications and innovations

## Recent Developments
- Latest news, product launches
- Awards, recognitions, expansions

Include specific numbers, dates, and names."#
    );

    let summary = llm.complete(&prompt).await?;
    info!("Generated summary ({} characters)", summary.len());
    Ok(summary)
}
