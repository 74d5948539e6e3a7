use tracing::{debug, info, warn};

use super::{Navigation, Phase, RequestGuard, Ticket};
use crate::client::ApiClient;
use crate::error::{ApiError, ValidationError};
use crate::http::Transport;
use crate::router::Route;
use crate::session::Session;
use crate::types::{Registration, SessionInfo};

pub const REGISTRATION_FAILED: &str = "Registration failed. Please try again.";
/// Counted in Unicode scalar values (`char`s), not bytes or UTF-16 units.
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Default)]
pub struct RegisterView {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    phase: Phase,
    guard: RequestGuard,
}

impl RegisterView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn error(&self) -> Option<&str> {
        self.phase.error()
    }

    pub fn can_submit(&self) -> bool {
        !self.phase.is_loading()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.phase.is_loading() {
            "Creating Account..."
        } else {
            "Create Account"
        }
    }

    /// Check the form locally. Mismatch is reported before length.
    pub fn validate(&self) -> Result<Registration, ValidationError> {
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort {
                min: MIN_PASSWORD_LEN,
            });
        }
        Ok(Registration {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        })
    }

    /// Validation failures land in `Failed` without ever entering `Loading`.
    pub fn begin_submit(&mut self) -> Option<(Ticket, Registration)> {
        if !self.can_submit() {
            return None;
        }
        match self.validate() {
            Ok(registration) => {
                self.phase = Phase::Loading;
                Some((self.guard.begin(), registration))
            }
            Err(err) => {
                debug!(reason = %err, "registration form rejected");
                self.phase = Phase::Failed(err.to_string());
                None
            }
        }
    }

    pub fn finish_submit(
        &mut self,
        ticket: Ticket,
        result: Result<SessionInfo, ApiError>,
        session: &mut Session,
    ) -> Option<Navigation> {
        if !self.guard.accepts(ticket) {
            debug!("dropping stale registration result");
            return None;
        }
        match result {
            Ok(info) => {
                info!(user = ?info.user.as_ref().map(|u| u.id), "registration successful");
                session.sign_in(info);
                self.phase = Phase::Success;
                Some(Navigation::To(Route::Users))
            }
            Err(err) => {
                warn!(error = %err, "registration error");
                self.phase = Phase::Failed(err.display_message(REGISTRATION_FAILED));
                None
            }
        }
    }

    pub fn submit<T: Transport>(
        &mut self,
        client: &ApiClient<T>,
        session: &mut Session,
    ) -> Option<Navigation> {
        let (ticket, registration) = self.begin_submit()?;
        let result = client.auth().register(&registration);
        self.finish_submit(ticket, result, session)
    }

    pub fn unmount(&mut self) {
        self.guard.unmount();
    }
}
