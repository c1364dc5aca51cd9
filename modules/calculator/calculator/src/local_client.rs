use std::sync::Arc;

use async_trait::async_trait;
use calculator_sdk::{
    CalculatorClientV1, CalculatorError, CalculatorEvent, CalculatorSession, SessionId,
};

use crate::domain::service::Service;

/// In-process `CalculatorClientV1` backed directly by the domain service.
pub struct LocalClient {
    service: Arc<Service>,
}

impl LocalClient {
    #[must_use]
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl CalculatorClientV1 for LocalClient {
    async fn create_session(&self) -> Result<CalculatorSession, CalculatorError> {
        let (id, state) = self.service.create_session()?;
        Ok(CalculatorSession { id, state })
    }

    async fn get_session(&self, id: SessionId) -> Result<CalculatorSession, CalculatorError> {
        let state = self.service.get_state(id)?;
        Ok(CalculatorSession { id, state })
    }

    async fn handle_event(
        &self,
        id: SessionId,
        event: CalculatorEvent,
    ) -> Result<CalculatorSession, CalculatorError> {
        let state = self.service.handle_event(id, event)?;
        Ok(CalculatorSession { id, state })
    }

    async fn delete_session(&self, id: SessionId) -> Result<(), CalculatorError> {
        self.service.delete_session(id).map_err(Into::into)
    }
}
