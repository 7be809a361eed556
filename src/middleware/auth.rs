use crate::{
    database::session_store::SessionStore,
    models::SessionIdentity,
    services::SessionGate,
    utils::AppError,
};

/// Dashboard controls only respond to a logged-in official.
pub fn require_session<S: SessionStore>(gate: &SessionGate<S>) -> Result<&SessionIdentity, AppError> {
    gate.identity().ok_or(AppError::NotLoggedIn)
}

/// The login form only responds while nobody is logged in.
pub fn require_logged_out<S: SessionStore>(gate: &SessionGate<S>) -> Result<(), AppError> {
    if gate.is_logged_in() {
        return Err(AppError::AlreadyLoggedIn);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::session_store::MemorySessionStore;
    use crate::models::SESSION_KEY;

    #[tokio::test]
    async fn test_guards_follow_session_state() {
        let logged_out = SessionGate::restore(MemorySessionStore::default()).await;
        assert_eq!(require_session(&logged_out), Err(AppError::NotLoggedIn));
        assert!(require_logged_out(&logged_out).is_ok());

        let mut store = MemorySessionStore::default();
        store
            .set_item(SESSION_KEY, r#"{"id":"A1","name":"Alice"}"#)
            .await
            .unwrap();
        let logged_in = SessionGate::restore(store).await;
        assert_eq!(require_session(&logged_in).unwrap().id, "A1");
        assert_eq!(require_logged_out(&logged_in), Err(AppError::AlreadyLoggedIn));
    }
}
