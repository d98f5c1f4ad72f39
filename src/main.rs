mod config;
mod error;
mod export;
mod models;
mod render;
mod search;
mod session;
mod tasks;
mod tools;

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::header,
    response::{Html, Json},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use config::Config;
use error::AppError;
use models::{ResearchRequest, ResearchResponse};
use search::SearchAggregator;
use session::{CompletedResearch, SessionStore};
use std::sync::Arc;
use std::time::Instant;
use tools::llm::{Completion, GroqCompletion};
use tools::tavily::{Search, TavilyClient};
use tower_http::cors::CorsLayer;
use tracing::{info, instrument};
use uuid::Uuid;

#[derive(Clone)]
struct AppState {
    sessions: Arc<SessionStore>,
    search: Arc<dyn Search>,
    llm: Arc<dyn Completion>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("deepbrief=debug")
        .init();

    // credentials are checked before the server accepts any work
    let config = Config::from_env()?;

    let state = AppState {
        sessions: Arc::new(SessionStore::new()),
        search: Arc::new(TavilyClient::new(&config.tavily_api_key)),
        llm: Arc::new(GroqCompletion::new(&config.groq_api_key)),
    };

    let app = router(state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
    info!("deepbrief research server running on http://0.0.0.0:3000");

    axum::serve(listener, app).await?;
    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/research", post(research))
        .route("/sessions/:id/report", get(report_html))
        .route("/sessions/:id/export/markdown", get(export_markdown))
        .route("/sessions/:id/export/pdf", get(export_pdf))
        .route("/sessions/:id/export/json", get(export_json))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

#[instrument(skip(state))]
async fn research(
    State(state): State<AppState>,
    Json(req): Json<ResearchRequest>,
) -> Result<Json<ResearchResponse>, AppError> {
    Ok(Json(execute_research(&state, req).await?))
}

/// Runs one full research cycle: aggregate searches, run the four-stage
/// pipeline, and replace the session's held result. A failure anywhere
/// leaves the previously held result in place.
async fn execute_research(
    state: &AppState,
    req: ResearchRequest,
) -> Result<ResearchResponse, AppError> {
    let query = req.query.trim().to_string();
    if query.is_empty() {
        return Err(AppError::EmptyQuery);
    }
    let session_id = req
        .session_id
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    info!("starting research run for session {session_id}");

    let start = Instant::now();
    let bundle = SearchAggregator::new(state.search.clone())
        .aggregate(&query)
        .await?;
    let outcome = tasks::run_pipeline(state.llm.as_ref(), &query, &bundle).await?;

    state.sessions.store(
        &session_id,
        CompletedResearch {
            query: query.clone(),
            report: outcome.report.clone(),
            completed_at: Utc::now(),
        },
    );
    info!("research run completed in {:?}", start.elapsed());

    Ok(ResearchResponse {
        session_id,
        query,
        report: outcome.report,
        total_time_ms: start.elapsed().as_millis() as u64,
        stage_times_ms: outcome.stage_times_ms,
    })
}

async fn report_html(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let held = state.sessions.get(&id).ok_or(AppError::UnknownSession)?;
    Ok(Html(render::html::render_display(&held.report)))
}

async fn export_markdown(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<([(header::HeaderName, &'static str); 1], String), AppError> {
    let held = state.sessions.get(&id).ok_or(AppError::UnknownSession)?;
    let document = export::markdown_document(&held.query, &held.report, held.completed_at);
    Ok(([(header::CONTENT_TYPE, "text/markdown")], document))
}

async fn export_pdf(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<([(header::HeaderName, &'static str); 1], Vec<u8>), AppError> {
    let held = state.sessions.get(&id).ok_or(AppError::UnknownSession)?;
    let bytes = render::pdf::render_pdf(&held.query, &held.report, held.completed_at)?;
    Ok(([(header::CONTENT_TYPE, "application/pdf")], bytes))
}

async fn export_json(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<models::ExportRecord>, AppError> {
    let held = state.sessions.get(&id).ok_or(AppError::UnknownSession)?;
    Ok(Json(export::export_record(
        &held.query,
        &held.report,
        held.completed_at,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CompletionError, RetrievalError};
    use crate::models::{TavilySearchRequest, TavilySearchResponse, TavilyResult};
    use async_trait::async_trait;
    use crate::tasks::testing::ScriptedCompletion;

    struct OkSearch;

    #[async_trait]
    impl Search for OkSearch {
        async fn search(
            &self,
            request: TavilySearchRequest,
        ) -> Result<TavilySearchResponse, RetrievalError> {
            Ok(TavilySearchResponse {
                answer: Some(format!("answer for {}", request.query)),
                results: vec![TavilyResult {
                    title: "t".into(),
                    url: "https://example.test".into(),
                    content: "c".into(),
                }],
            })
        }
    }

    struct FailingSearch;

    #[async_trait]
    impl Search for FailingSearch {
        async fn search(
            &self,
            _request: TavilySearchRequest,
        ) -> Result<TavilySearchResponse, RetrievalError> {
            Err(RetrievalError::Provider("provider down".into()))
        }
    }

    fn state_with(search: Arc<dyn Search>, llm: Arc<dyn Completion>) -> AppState {
        AppState {
            sessions: Arc::new(SessionStore::new()),
            search,
            llm,
        }
    }

    fn request(query: &str, session_id: Option<&str>) -> ResearchRequest {
        ResearchRequest {
            query: query.to_string(),
            session_id: session_id.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn successful_run_stores_the_report() {
        let llm = ScriptedCompletion::new(vec![
            Ok("facts".into()),
            Ok("summary".into()),
            Ok("critique".into()),
            Ok("# Report\nbody".into()),
        ]);
        let state = state_with(Arc::new(OkSearch), Arc::new(llm));

        let response = execute_research(&state, request("quantum batteries", Some("s1")))
            .await
            .unwrap();
        assert_eq!(response.report, "# Report\nbody");
        assert_eq!(response.stage_times_ms.len(), 4);

        let held = state.sessions.get("s1").unwrap();
        assert_eq!(held.query, "quantum batteries");
        assert_eq!(held.report, "# Report\nbody");
    }

    #[tokio::test]
    async fn empty_query_is_rejected_before_any_collaborator_call() {
        let llm = ScriptedCompletion::new(vec![]);
        let state = state_with(Arc::new(FailingSearch), Arc::new(llm));

        let err = execute_research(&state, request("   ", None)).await.unwrap_err();
        assert!(matches!(err, AppError::EmptyQuery));
    }

    #[tokio::test]
    async fn stage_failure_leaves_the_previous_result_in_place() {
        let llm = ScriptedCompletion::new(vec![
            Ok("facts".into()),
            Ok("summary".into()),
            Err("critique model down".into()),
        ]);
        let state = state_with(Arc::new(OkSearch), Arc::new(llm));
        state.sessions.store(
            "s1",
            CompletedResearch {
                query: "old query".into(),
                report: "old report".into(),
                completed_at: Utc::now(),
            },
        );

        let err = execute_research(&state, request("new query", Some("s1")))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Completion(CompletionError::Provider(_))
        ));

        let held = state.sessions.get("s1").unwrap();
        assert_eq!(held.query, "old query");
        assert_eq!(held.report, "old report");
    }

    #[tokio::test]
    async fn primary_search_failure_aborts_the_run() {
        let llm = ScriptedCompletion::new(vec![Ok("never reached".into())]);
        let state = state_with(Arc::new(FailingSearch), Arc::new(llm));

        let err = execute_research(&state, request("topic", Some("s1")))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Retrieval(_)));
        assert!(state.sessions.get("s1").is_none());
    }
}
