//! Calculator module definition
//!
//! Builds the session store and domain service from configuration, exposes
//! the HTTP routes of both presentation bindings, and runs the idle-session
//! reaper.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use calculator_sdk::CalculatorClientV1;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::config::CalculatorConfig;
use crate::domain::service::{Service, ServiceConfig};
use crate::infra::storage::InMemorySessionRepository;
use crate::local_client::LocalClient;

/// Calculator module.
pub struct CalculatorModule {
    service: Arc<Service>,
    reaper_interval: Duration,
}

impl CalculatorModule {
    #[must_use]
    pub fn new(config: &CalculatorConfig) -> Self {
        tracing::info!(
            max_sessions = config.max_sessions,
            max_display_length = config.max_display_length,
            "Initializing calculator module"
        );

        let repo = Arc::new(InMemorySessionRepository::new(config.max_sessions));
        let service = Arc::new(Service::new(repo, ServiceConfig::from(config)));

        Self {
            service,
            reaper_interval: config.effective_reaper_interval(),
        }
    }

    #[must_use]
    pub fn service(&self) -> Arc<Service> {
        Arc::clone(&self.service)
    }

    /// Client for in-process consumers.
    #[must_use]
    pub fn client(&self) -> Arc<dyn CalculatorClientV1> {
        Arc::new(LocalClient::new(self.service()))
    }

    /// Routes of the JSON event API and the HTML form binding.
    #[must_use]
    pub fn router(&self) -> Router {
        let router = crate::api::rest::routes::register_routes(Router::new(), self.service());
        crate::api::web::routes::register_routes(router, self.service())
    }

    /// Periodically evict idle sessions until `cancel` fires.
    #[must_use]
    pub fn spawn_session_reaper(&self, cancel: CancellationToken) -> JoinHandle<()> {
        let service = self.service();
        let period = self.reaper_interval;

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // the first tick completes immediately
            ticker.tick().await;

            loop {
                tokio::select! {
                    () = cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        let _evicted = service.evict_idle_sessions();
                    }
                }
            }
            tracing::debug!("calculator session reaper stopped");
        })
    }
}

impl Default for CalculatorModule {
    fn default() -> Self {
        Self::new(&CalculatorConfig::default())
    }
}
