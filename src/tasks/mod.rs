//! The four-stage report pipeline: extraction, summarization, critique,
//! composition. Stages run strictly in order; the first failure aborts the
//! run and no partial report survives it.

mod critic;
mod researcher;
mod summarizer;
mod writer;

use crate::error::CompletionError;
use crate::tools::llm::Completion;
use std::collections::HashMap;
use std::time::Instant;
use tracing::{info, instrument};

pub struct PipelineOutcome {
    pub report: String,
    pub stage_times_ms: HashMap<String, u64>,
}

#[instrument(skip(llm, search_results))]
pub async fn run_pipeline(
    llm: &dyn Completion,
    query: &str,
    search_results: &str,
) -> Result<PipelineOutcome, CompletionError> {
    let mut stage_times_ms = HashMap::new();

    let start = Instant::now();
    let research = researcher::extract_research(llm, query, search_results).await?;
    stage_times_ms.insert("research".to_string(), start.elapsed().as_millis() as u64);

    let start = Instant::now();
    let summary = summarizer::summarize(llm, &research).await?;
    stage_times_ms.insert("summarize".to_string(), start.elapsed().as_millis() as u64);

    let start = Instant::now();
    let critique = critic::critique(llm, &summary).await?;
    stage_times_ms.insert("critique".to_string(), start.elapsed().as_millis() as u64);

    let start = Instant::now();
    let report = writer::compose_report(llm, &research, &summary, &critique).await?;
    stage_times_ms.insert("compose".to_string(), start.elapsed().as_millis() as u64);

    info!("Pipeline completed, report is {} characters", report.len());
    Ok(PipelineOutcome {
        report,
        stage_times_ms,
    })
}


#[cfg(test)]
mod tests {
    use super::testing::ScriptedCompletion;
    use super::*;

    #[tokio::test]
    async fn report_is_the_final_stage_output_and_all_stages_are_timed() {
        let llm = ScriptedCompletion::new(vec![
            Ok("facts".to_string()),
            Ok("summary".to_string()),
            Ok("critique".to_string()),
            Ok("final report".to_string()),
        ]);

        let outcome = run_pipeline(&llm, "quantum batteries", "bundle")
            .await
            .unwrap();
        assert_eq!(outcome.report, "final report");
        assert_eq!(outcome.stage_times_ms.len(), 4);
        for stage in ["research", "summarize", "critique", "compose"] {
            assert!(outcome.stage_times_ms.contains_key(stage), "missing {stage}");
        }
    }

    #[tokio::test]
    async fn stages_feed_forward_in_order() {
        let llm = ScriptedCompletion::new(vec![
            Ok("FACTS".to_string()),
            Ok("SUMMARY".to_string()),
            Ok("CRITIQUE".to_string()),
            Ok("REPORT".to_string()),
        ]);

        run_pipeline(&llm, "topic", "bundle").await.unwrap();

        let prompts = llm.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 4);
        assert!(prompts[0].contains("bundle"));
        assert!(prompts[1].contains("FACTS"));
        assert!(prompts[2].contains("SUMMARY"));
        // composition sees all three prior outputs
        assert!(prompts[3].contains("FACTS"));
        assert!(prompts[3].contains("SUMMARY"));
        assert!(prompts[3].contains("CRITIQUE"));
    }

    #[tokio::test]
    async fn critique_failure_aborts_without_a_report() {
        let llm = ScriptedCompletion::new(vec![
            Ok("facts".to_string()),
            Ok("summary".to_string()),
            Err("model overloaded".to_string()),
        ]);

        let result = run_pipeline(&llm, "topic", "bundle").await;
        assert!(result.is_err());
        // the composition stage never ran
        assert_eq!(llm.prompts.lock().unwrap().len(), 3);
    }
}
