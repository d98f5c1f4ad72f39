//! Read-only export serializers over a completed research run. Each can be
//! invoked any number of times without touching the held session state.

use crate::models::{ExportMetadata, ExportRecord};
use crate::tools::llm;
use chrono::{DateTime, Utc};

pub const SEARCH_ENGINE: &str = "tavily_advanced";
const SEARCH_ENGINE_LABEL: &str = "Tavily AI Search (Advanced)";
const MODEL_LABEL: &str = "LLaMA-3.3-70B-Versatile via Groq";

/// Self-contained markdown document: header, body, metadata footer.
pub fn markdown_document(query: &str, report: &str, generated_at: DateTime<Utc>) -> String {
    let stamp = generated_at.format("%Y-%m-%d %H:%M:%S");
    format!(
        r#"# AI Research Report

**Research Query:** {query}
**Generated:** {stamp}
**Powered by:** LLaMA-3.3-70B + Tavily Advanced Search

---

{report}

---

## Report Metadata
- **Search Engine:** {SEARCH_ENGINE_LABEL}
- **AI Model:** {MODEL_LABEL}
- **Generated:** {stamp}

*Generated by an automated research pipeline with comprehensive web search.*
"#
    )
}

/// Structured record for machine consumption; timestamp is ISO-8601.
pub fn export_record(query: &str, report: &str, generated_at: DateTime<Utc>) -> ExportRecord {
    ExportRecord {
        query: query.to_string(),
        report: report.to_string(),
        timestamp: generated_at.to_rfc3339(),
        metadata: ExportMetadata {
            ai_model: llm::MODEL.to_string(),
            search_engine: SEARCH_ENGINE.to_string(),
        },
    }
}
