//! Negotiation desk hosts independent sessions side by side

use crate::chooser::PhraseChooser;
use crate::config::SessionConfig;
use crate::error::{BargainError, Result};
use crate::types::SessionId;
use rust_decimal::Decimal;
use std::collections::HashMap;

use super::session::{NegotiationSession, SharedLocalizer};
use super::types::OfferResponse;

/// Owns every open negotiation; sessions share only the localizer
pub struct NegotiationDesk {
    active_sessions: HashMap<SessionId, NegotiationSession>,
    localizer: SharedLocalizer,
    next_id: u64,
}

impl NegotiationDesk {
    /// Create a desk that phrases messages through `localizer`
    pub fn new(localizer: SharedLocalizer) -> Self {
        Self {
            active_sessions: HashMap::new(),
            localizer,
            next_id: 1,
        }
    }

    /// Open a new session
    pub fn open(
        &mut self,
        config: SessionConfig,
        chooser: Box<dyn PhraseChooser + Send>,
    ) -> Result<SessionId> {
        let session = NegotiationSession::new(config, self.localizer.clone(), chooser)?;

        let session_id = SessionId::sequential(self.next_id);
        self.next_id += 1;

        tracing::info!(
            "Opened {} for {} (ask {}, floor {})",
            session_id,
            session.product_name(),
            session.ideal_price(),
            session.min_price()
        );
        self.active_sessions.insert(session_id.clone(), session);

        Ok(session_id)
    }

    /// Forward a customer offer to its session
    pub fn submit(&mut self, session_id: &SessionId, offer: Decimal) -> Result<OfferResponse> {
        let session = self
            .active_sessions
            .get_mut(session_id)
            .ok_or_else(|| BargainError::SessionNotFound(session_id.0.clone()))?;

        session.process_offer(offer)
    }

    /// Remove a session, returning it to the caller
    pub fn close(&mut self, session_id: &SessionId) -> Result<NegotiationSession> {
        let session = self
            .active_sessions
            .remove(session_id)
            .ok_or_else(|| BargainError::SessionNotFound(session_id.0.clone()))?;

        tracing::info!(
            "Closed {} ({})",
            session_id,
            if session.is_accepted() { "deal" } else { "abandoned" }
        );
        Ok(session)
    }

    /// Get a session
    pub fn get(&self, session_id: &SessionId) -> Option<&NegotiationSession> {
        self.active_sessions.get(session_id)
    }

    /// Get a session for updates such as loyalty points
    pub fn get_mut(&mut self, session_id: &SessionId) -> Option<&mut NegotiationSession> {
        self.active_sessions.get_mut(session_id)
    }

    /// Get all open sessions
    pub fn sessions(&self) -> &HashMap<SessionId, NegotiationSession> {
        &self.active_sessions
    }
}
