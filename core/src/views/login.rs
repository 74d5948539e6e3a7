use tracing::{debug, info, warn};

use super::{Navigation, Phase, RequestGuard, Ticket};
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::Transport;
use crate::router::Route;
use crate::session::Session;
use crate::types::{Credentials, SessionInfo};

pub const LOGIN_FAILED: &str = "Login failed. Please try again.";

#[derive(Debug, Default)]
pub struct LoginView {
    pub email: String,
    pub password: String,
    phase: Phase,
    guard: RequestGuard,
}

impl LoginView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn error(&self) -> Option<&str> {
        self.phase.error()
    }

    /// The submit control is disabled while a login is in flight.
    pub fn can_submit(&self) -> bool {
        !self.phase.is_loading()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.phase.is_loading() {
            "Signing in..."
        } else {
            "Sign In"
        }
    }

    pub fn begin_submit(&mut self) -> Option<(Ticket, Credentials)> {
        if !self.can_submit() {
            return None;
        }
        self.phase = Phase::Loading;
        let credentials = Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
        };
        Some((self.guard.begin(), credentials))
    }

    pub fn finish_submit(
        &mut self,
        ticket: Ticket,
        result: Result<SessionInfo, ApiError>,
        session: &mut Session,
    ) -> Option<Navigation> {
        if !self.guard.accepts(ticket) {
            debug!("dropping stale login result");
            return None;
        }
        match result {
            Ok(info) => {
                info!(user = ?info.user.as_ref().map(|u| u.id), "login successful");
                session.sign_in(info);
                self.phase = Phase::Success;
                Some(Navigation::To(Route::Users))
            }
            Err(err) => {
                warn!(error = %err, "login error");
                self.phase = Phase::Failed(err.display_message(LOGIN_FAILED));
                None
            }
        }
    }

    pub fn submit<T: Transport>(
        &mut self,
        client: &ApiClient<T>,
        session: &mut Session,
    ) -> Option<Navigation> {
        let (ticket, credentials) = self.begin_submit()?;
        let result = client.auth().login(&credentials);
        self.finish_submit(ticket, result, session)
    }

    pub fn unmount(&mut self) {
        self.guard.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedTransport;

    fn filled() -> LoginView {
        let mut view = LoginView::new();
        view.email = "ada@example.com".into();
        view.password = "secret1".into();
        view
    }

    fn client() -> ApiClient<ScriptedTransport> {
        ApiClient::with_transport("http://api.test", ScriptedTransport::new())
    }

    #[test]
    fn accepted_credentials_navigate_to_users_once() {
        let client = client();
        client.transport().push_response(200, r#"{"token":"abc"}"#);
        let mut session = Session::in_memory();
        let mut view = filled();

        let nav = view.submit(&client, &mut session);
        assert_eq!(nav, Some(Navigation::To(Route::Users)));
        assert_eq!(view.phase(), &Phase::Success);
        assert!(session.is_logged_in());
        assert_eq!(client.transport().request_count(), 1);
    }

    #[test]
    #[tracing_test::traced_test]
    fn success_is_logged_by_user_id() {
        let client = client();
        client
            .transport()
            .push_response(200, r#"{"token":"abc","user":{"id":7,"name":"Ada","email":"ada@example.com"}}"#);
        let mut session = Session::in_memory();
        filled().submit(&client, &mut session);

        assert!(logs_contain("login successful"));
        assert!(logs_contain("user=Some(7)"));
        assert!(!logs_contain("ada@example.com"));
    }

    #[test]
    fn rejected_credentials_show_server_message() {
        let client = client();
        client
            .transport()
            .push_response(401, r#"{"message":"Invalid credentials"}"#);
        let mut session = Session::in_memory();
        let mut view = filled();

        let nav = view.submit(&client, &mut session);
        assert_eq!(nav, None);
        assert_eq!(view.error(), Some("Invalid credentials"));
        assert!(view.can_submit());
        assert!(!session.is_logged_in());
    }

    #[test]
    fn transport_failure_shows_fallback() {
        let client = client();
        client.transport().push_error(ApiError::Network("refused".into()));
        let mut session = Session::in_memory();
        let mut view = filled();

        view.submit(&client, &mut session);
        assert_eq!(view.error(), Some(LOGIN_FAILED));
    }

    #[test]
    fn submit_is_blocked_while_loading() {
        let mut view = filled();
        let (ticket, credentials) = view.begin_submit().unwrap();
        assert_eq!(credentials.email, "ada@example.com");
        assert!(view.phase().is_loading());
        assert_eq!(view.submit_label(), "Signing in...");
        assert!(view.begin_submit().is_none());

        let mut session = Session::in_memory();
        view.finish_submit(ticket, Err(ApiError::Timeout { after_ms: 10 }), &mut session);
        assert!(view.begin_submit().is_some());
    }

    #[test]
    fn result_after_unmount_is_ignored() {
        let mut view = filled();
        let (ticket, _) = view.begin_submit().unwrap();
        view.unmount();

        let mut session = Session::in_memory();
        let nav = view.finish_submit(ticket, Ok(SessionInfo::default()), &mut session);
        assert_eq!(nav, None);
        assert!(view.phase().is_loading());
        assert!(!session.is_logged_in());
    }
}
