//! Application state shared across handlers

use std::{sync::Arc, time::Duration};

use application::{DenylistStore, FeedbackIntakeService};
use infrastructure::AppConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Evaluates and records submissions
    pub intake: Arc<FeedbackIntakeService>,
    /// Active denylist, also held by the content filter
    pub denylist: Arc<DenylistStore>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Bundle the services built at startup
    pub fn new(
        intake: FeedbackIntakeService,
        denylist: Arc<DenylistStore>,
        config: AppConfig,
    ) -> Self {
        Self {
            intake: Arc::new(intake),
            denylist,
            config: Arc::new(config),
        }
    }

    /// Upper bound on one evaluation's store query
    #[must_use]
    pub fn evaluation_timeout(&self) -> Duration {
        self.config.moderation.evaluation_timeout()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("intake", &self.intake)
            .field("denylist_terms", &self.denylist.len())
            .field("environment", &self.config.environment)
            .finish_non_exhaustive()
    }
}
