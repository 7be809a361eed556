use crate::{
    database::{session_store::SessionStore, DataStore},
    models::{SessionIdentity, SESSION_KEY},
    utils::AppError,
};

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    LoggedOut,
    LoggedIn(SessionIdentity),
}

/// Two-state login machine mirrored into a `SessionStore`.
pub struct SessionGate<S: SessionStore> {
    store: S,
    state: SessionState,
}

impl<S: SessionStore> SessionGate<S> {
    /// Starts from whatever identity the store holds, without re-validating it.
    pub async fn restore(mut store: S) -> Self {
        let state = match store.get_item(SESSION_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<SessionIdentity>(&raw) {
                Ok(identity) => {
                    log::info!("🔓 Restored session for official: {}", identity.id);
                    SessionState::LoggedIn(identity)
                }
                Err(e) => {
                    log::warn!("⚠️  Discarding unreadable session: {}", e);
                    if let Err(e) = store.remove_item(SESSION_KEY).await {
                        log::error!("❌ {}", e);
                    }
                    SessionState::LoggedOut
                }
            },
            Ok(None) => SessionState::LoggedOut,
            Err(e) => {
                log::error!("❌ {}", e);
                SessionState::LoggedOut
            }
        };

        Self { store, state }
    }

    #[cfg(test)]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn identity(&self) -> Option<&SessionIdentity> {
        match &self.state {
            SessionState::LoggedIn(identity) => Some(identity),
            SessionState::LoggedOut => None,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.identity().is_some()
    }

    /// Validates against the officials collection; first exact match wins.
    pub async fn login(
        &mut self,
        data: &DataStore,
        id: &str,
        pass: &str,
    ) -> Result<SessionIdentity, AppError> {
        if self.is_logged_in() {
            return Err(AppError::AlreadyLoggedIn);
        }

        let identity = data
            .find_official(id, pass)
            .ok_or_else(|| {
                log::warn!("❌ Login failed for official id: {}", id);
                AppError::InvalidCredentials
            })?
            .identity();

        match serde_json::to_string(&identity) {
            Ok(raw) => {
                if let Err(e) = self.store.set_item(SESSION_KEY, &raw).await {
                    log::error!("❌ Session not persisted: {}", e);
                }
            }
            Err(e) => log::error!("❌ Session not persisted: {}", e),
        }

        log::info!("✅ Login successful: {} ({})", identity.id, identity.name);
        self.state = SessionState::LoggedIn(identity.clone());
        Ok(identity)
    }

    pub async fn logout(&mut self) -> Result<(), AppError> {
        let previous = std::mem::replace(&mut self.state, SessionState::LoggedOut);
        if let SessionState::LoggedIn(identity) = previous {
            log::info!("👋 Logout: {}", identity.id);
        }
        self.store.remove_item(SESSION_KEY).await
    }

    #[cfg(test)]
    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::session_store::MemorySessionStore;
    use crate::database::tests::{official, sample_store};

    #[tokio::test]
    async fn test_login_with_exact_credentials() {
        let data = DataStore::new(vec![official("A1", "x", "Alice")], vec![], vec![]);
        let mut gate = SessionGate::restore(MemorySessionStore::default()).await;

        let identity = gate.login(&data, "A1", "x").await.unwrap();

        let expected = SessionIdentity {
            id: "A1".to_string(),
            name: "Alice".to_string(),
        };
        assert_eq!(identity, expected);
        assert_eq!(gate.state(), &SessionState::LoggedIn(expected));
    }

    #[tokio::test]
    async fn test_login_mismatch_stays_logged_out_and_persists_nothing() {
        let data = DataStore::new(vec![official("A1", "x", "Alice")], vec![], vec![]);
        let mut gate = SessionGate::restore(MemorySessionStore::default()).await;

        let err = gate.login(&data, "A1", "y").await.unwrap_err();

        assert_eq!(err, AppError::InvalidCredentials);
        assert_eq!(err.to_string(), "Invalid Official ID or Password.");
        assert_eq!(gate.state(), &SessionState::LoggedOut);
        assert_eq!(gate.into_store().get_item(SESSION_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_login_against_empty_officials_always_fails() {
        let mut gate = SessionGate::restore(MemorySessionStore::default()).await;
        assert!(gate.login(&DataStore::default(), "", "").await.is_err());
    }

    #[tokio::test]
    async fn test_first_matching_official_wins() {
        let data = DataStore::new(
            vec![official("A1", "x", "Alice"), official("A1", "x", "Impostor")],
            vec![],
            vec![],
        );
        let mut gate = SessionGate::restore(MemorySessionStore::default()).await;
        assert_eq!(gate.login(&data, "A1", "x").await.unwrap().name, "Alice");
    }

    #[tokio::test]
    async fn test_restore_trusts_persisted_identity() {
        let mut store = MemorySessionStore::default();
        store
            .set_item(SESSION_KEY, r#"{"id":"ZZ9","name":"Nobody"}"#)
            .await
            .unwrap();

        assert!(!sample_store().officials().iter().any(|o| o.id.as_deref() == Some("ZZ9")));
        let gate = SessionGate::restore(store).await;

        assert_eq!(
            gate.identity(),
            Some(&SessionIdentity {
                id: "ZZ9".to_string(),
                name: "Nobody".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_restore_discards_unreadable_identity() {
        let mut store = MemorySessionStore::default();
        store.set_item(SESSION_KEY, "{broken").await.unwrap();

        let gate = SessionGate::restore(store).await;

        assert_eq!(gate.state(), &SessionState::LoggedOut);
        assert_eq!(gate.into_store().get_item(SESSION_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_logout_clears_persisted_identity() {
        let data = DataStore::new(vec![official("A1", "x", "Alice")], vec![], vec![]);
        let mut gate = SessionGate::restore(MemorySessionStore::default()).await;
        gate.login(&data, "A1", "x").await.unwrap();

        gate.logout().await.unwrap();
        assert_eq!(gate.state(), &SessionState::LoggedOut);

        let fresh = SessionGate::restore(gate.into_store()).await;
        assert_eq!(fresh.state(), &SessionState::LoggedOut);
    }

    #[tokio::test]
    async fn test_login_while_logged_in_is_rejected() {
        let data = DataStore::new(vec![official("A1", "x", "Alice")], vec![], vec![]);
        let mut gate = SessionGate::restore(MemorySessionStore::default()).await;
        gate.login(&data, "A1", "x").await.unwrap();

        assert_eq!(gate.login(&data, "A1", "x").await, Err(AppError::AlreadyLoggedIn));
    }
}
