use crate::error::CompletionError;
use crate::tools::llm::Completion;
use tracing::{info, instrument};

/// Stage 4: compose the final markdown report from the three earlier
/// stage outputs.
#[instrument(skip(llm, research_data, summary, critique))]
pub async fn compose_report(
    llm: &dyn Completion,
    research_data: &str,
    summary: &str,
    critique: &str,
) -> Result<String, CompletionError> {
    info!("Starting report composition stage");

    let prompt = format!(
        r#"Create a comprehensive research report using:

RESEARCH: {research_data}
SUMMARY: {summary}
CRITIQUE: {critique}

Structure:

# Executive Summary
Brief overview of the topic, key insights, and top findings.

# Key Findings
For each major company or theme:
## [Name]
- **Founded:** Year, Location
- **Focus Area:** Core application
- **Technology:** Core technologies
- **Funding:** Latest rounds, total raised, valuation
- **Products:** Main offerings
- **Recent News:** Latest developments

# Market Analysis
- **Market Size:** Current and projected figures
- **Growth Trends:** Investment patterns and statistics
- **Key Technologies:** Popular applications
- **Challenges:** Market obstacles and opportunities

# Investment Landscape
- **Funding Trends:** Recent investment patterns
- **Key Investors:** Major VCs and sources
- **Success Stories:** Notable achievements

# Future Outlook
- **Emerging Trends:** Next-gen technologies
- **Predictions:** Market forecasts
- **Opportunities:** Development areas

# References and Sources
List sources with clickable URLs and publication dates.

Use professional tone with specific data, figures, and concrete details."#
    );

    let report = llm.complete(&prompt).await?;
    info!("Generated report ({} characters)", report.len());
    Ok(report)
}
