use std::time::Duration;

use crate::{
    api::render::{render_screen, Node, Screen},
    database::{session_store::SessionStore, DataStore},
    jobs::{Clock, TimerQueue},
    middleware::auth::{require_logged_out, require_session},
    services::{
        FormField, InstitutionBrowser, IntakeForm, MemberSearch, SearchInput, SessionGate,
        ViewRouter, DEFAULT_TAB,
    },
    utils::AppError,
};

/// Events raised by the portal's controls.
#[derive(Debug, Clone, PartialEq)]
pub enum PortalEvent {
    LoginSubmitted { id: String, pass: String },
    LogoutClicked,
    TabClicked(String),
    InstitutionChanged(String),
    SearchInput(String),
    IntakeSubmitted(Vec<FormField>),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PortalTask {
    MemberSearch,
    IntakeReset,
}

#[derive(Debug, Clone, Copy)]
pub struct Timing {
    pub search_debounce: Duration,
    pub intake_reset: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            search_debounce: Duration::from_millis(300),
            intake_reset: Duration::from_millis(2000),
        }
    }
}

/// Application state: owns the data, the session and every view.
pub struct Portal<S: SessionStore, C: Clock> {
    data: DataStore,
    gate: SessionGate<S>,
    clock: C,
    timing: Timing,
    login_error: Option<String>,
    router: ViewRouter,
    browser: InstitutionBrowser,
    search: MemberSearch,
    intake: IntakeForm,
    timers: TimerQueue<PortalTask>,
}

impl<S: SessionStore, C: Clock> Portal<S, C> {
    /// Call once the data is loaded: a restored session goes straight to
    /// the dashboard.
    pub async fn start(data: DataStore, store: S, clock: C, timing: Timing) -> Self {
        let gate = SessionGate::restore(store).await;
        let mut portal = Self {
            data,
            gate,
            clock,
            timing,
            login_error: None,
            router: ViewRouter::new(),
            browser: InstitutionBrowser::new(),
            search: MemberSearch::new(),
            intake: IntakeForm::new(),
            timers: TimerQueue::new(),
        };

        if portal.gate.is_logged_in() {
            portal.activate_dashboard();
        }
        portal
    }

    pub async fn handle(&mut self, event: PortalEvent) -> Result<(), AppError> {
        match event {
            PortalEvent::LoginSubmitted { id, pass } => self.submit_login(&id, &pass).await,
            PortalEvent::LogoutClicked => self.logout().await,
            PortalEvent::TabClicked(tab) => {
                require_session(&self.gate)?;
                self.router.show_tab(&tab)
            }
            PortalEvent::InstitutionChanged(name) => {
                require_session(&self.gate)?;
                self.browser.select(&self.data, &name);
                Ok(())
            }
            PortalEvent::SearchInput(text) => {
                require_session(&self.gate)?;
                self.timers.cancel(PortalTask::MemberSearch);
                if let SearchInput::Debounce(_) = self.search.input(&text) {
                    let at = self.clock.now() + self.timing.search_debounce;
                    self.timers.schedule(PortalTask::MemberSearch, at);
                }
                Ok(())
            }
            PortalEvent::IntakeSubmitted(fields) => {
                require_session(&self.gate)?;
                self.intake.submit(fields);
                let at = self.clock.now() + self.timing.intake_reset;
                self.timers.schedule(PortalTask::IntakeReset, at);
                Ok(())
            }
        }
    }

    async fn submit_login(&mut self, id: &str, pass: &str) -> Result<(), AppError> {
        require_logged_out(&self.gate)?;
        self.login_error = None;

        match self.gate.login(&self.data, id.trim(), pass).await {
            Ok(_) => {
                self.activate_dashboard();
                Ok(())
            }
            Err(AppError::InvalidCredentials) => {
                self.login_error = Some(AppError::InvalidCredentials.to_string());
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    async fn logout(&mut self) -> Result<(), AppError> {
        require_session(&self.gate)?;
        let result = self.gate.logout().await;
        self.reset_views();
        result
    }

    fn activate_dashboard(&mut self) {
        self.browser.populate(self.data.institutions());
        if let Err(e) = self.router.show_tab(DEFAULT_TAB) {
            log::error!("❌ {}", e);
        }
    }

    // Same view state as a fresh start; collections stay loaded.
    fn reset_views(&mut self) {
        self.login_error = None;
        self.router = ViewRouter::new();
        self.browser = InstitutionBrowser::new();
        self.search = MemberSearch::new();
        self.intake = IntakeForm::new();
        self.timers.clear();
    }

    /// Fires every task whose deadline has passed. Returns how many ran.
    pub fn run_due_tasks(&mut self) -> usize {
        let due = self.timers.take_due(self.clock.now());
        for task in &due {
            match task {
                PortalTask::MemberSearch => {
                    self.search.execute(&self.data);
                }
                PortalTask::IntakeReset => self.intake.reset(),
            }
        }
        due.len()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    pub fn render(&self) -> Node {
        render_screen(&Screen {
            data: &self.data,
            identity: self.gate.identity(),
            login_error: self.login_error.as_deref(),
            router: &self.router,
            browser: &self.browser,
            search: &self.search,
            intake: &self.intake,
        })
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    #[cfg(test)]
    pub fn session(&self) -> &crate::services::SessionState {
        self.gate.state()
    }

    #[cfg(test)]
    pub fn login_error(&self) -> Option<&str> {
        self.login_error.as_deref()
    }

    #[cfg(test)]
    pub fn data(&self) -> &DataStore {
        &self.data
    }

    #[cfg(test)]
    pub fn router(&self) -> &ViewRouter {
        &self.router
    }

    #[cfg(test)]
    pub fn browser(&self) -> &InstitutionBrowser {
        &self.browser
    }

    #[cfg(test)]
    pub fn search(&self) -> &MemberSearch {
        &self.search
    }

    #[cfg(test)]
    pub fn intake(&self) -> &IntakeForm {
        &self.intake
    }

    #[cfg(test)]
    pub fn pending_tasks(&self) -> usize {
        self.timers.len()
    }

    /// Tears the portal down, handing back the session store.
    #[cfg(test)]
    pub fn shutdown(self) -> S {
        self.gate.into_store()
    }
}
