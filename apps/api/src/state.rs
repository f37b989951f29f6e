use std::sync::Arc;

use axum::extract::FromRef;

use crate::auth::AuthKeys;
use crate::diagram::hub::DiagramHub;
use crate::execution::client::Judge0Client;
use crate::insights::service::InsightService;
use crate::interview::repository::InterviewRepository;
use crate::llm_client::Completion;

/// Shared application state injected into all route handlers via Axum extractors.
/// Every collaborator is built once in `main` and handed in here.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthKeys,
    pub interviews: Arc<dyn InterviewRepository>,
    /// Cache-or-generate policy over the insight store and generator.
    pub insights: InsightService,
    pub executor: Judge0Client,
    /// Model access for roadmaps, resume reviews and diagrams.
    pub completion: Arc<dyn Completion>,
    pub diagrams: DiagramHub,
    /// Role a resume is judged against when the upload names none.
    pub resume_role: Arc<str>,
}

impl FromRef<AppState> for DiagramHub {
    fn from_ref(state: &AppState) -> Self {
        state.diagrams.clone()
    }
}
