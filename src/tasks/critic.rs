use crate::error::CompletionError;
use crate::tools::llm::Completion;
use tracing::{info, instrument};

/// Stage 3: fact-check the summary and score its reliability.
#[instrument(skip(llm, summary_content))]
pub async fn critique(
    llm: &dyn Completion,
    summary_content: &str,
) -> Result<String, CompletionError> {
    info!("Starting critique stage");

    let prompt = format!(
        r#"Evaluate this content for accuracy:
{summary_content}

Analyze:
- Information consistency and conflicts
- Data completeness and currency
- Source credibility and reliability
- Missing critical information

Provide reliability score (1-10) and improvement recommendations."#
    );

    let critique = llm.complete(&prompt).await?;
    info!("Generated critique ({} characters)", critique.len());
    Ok(critique)
}
