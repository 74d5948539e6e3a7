//! User list with add and delete.
//!
//! Mutations are applied to the local list only after the server confirmed
//! them; a failure leaves the list as it was and shows the error.

use tracing::{debug, warn};

use super::{Phase, RequestGuard, Ticket};
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::Transport;
use crate::types::{NewUser, User, UserId};

pub const FETCH_FAILED: &str = "Failed to fetch users";
pub const CREATE_FAILED: &str = "Failed to create user";
pub const DELETE_FAILED: &str = "Failed to delete user";

/// The user created by "Add User".
pub fn placeholder_user() -> NewUser {
    NewUser {
        name: "John Doe".to_string(),
        email: "john@example.com".to_string(),
    }
}

#[derive(Debug, Default)]
pub struct UserListView {
    users: Vec<User>,
    phase: Phase,
    guard: RequestGuard,
}

impl UserListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn error(&self) -> Option<&str> {
        self.phase.error()
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn begin_load(&mut self) -> Ticket {
        self.phase = Phase::Loading;
        self.guard.begin()
    }

    pub fn finish_load(&mut self, ticket: Ticket, result: Result<Vec<User>, ApiError>) {
        if !self.guard.accepts(ticket) {
            debug!("dropping stale user list");
            return;
        }
        match result {
            Ok(users) => {
                self.users = users;
                self.phase = Phase::Success;
            }
            Err(err) => {
                warn!(error = %err, "error fetching users");
                self.phase = Phase::Failed(err.display_message(FETCH_FAILED));
            }
        }
    }

    pub fn load<T: Transport>(&mut self, client: &ApiClient<T>) {
        let ticket = self.begin_load();
        let result = client.users().list();
        self.finish_load(ticket, result);
    }

    /// Mutations do not supersede each other, only a reload or unmount does.
    pub fn begin_mutation(&self) -> Ticket {
        self.guard.current()
    }

    pub fn finish_add(&mut self, ticket: Ticket, result: Result<User, ApiError>) {
        if !self.guard.accepts(ticket) {
            debug!("dropping stale create result");
            return;
        }
        match result {
            Ok(user) => {
                debug!(id = user.id, "user created");
                self.users.push(user);
            }
            Err(err) => {
                warn!(error = %err, "error creating user");
                self.phase = Phase::Failed(err.display_message(CREATE_FAILED));
            }
        }
    }

    pub fn finish_delete(&mut self, ticket: Ticket, id: UserId, result: Result<(), ApiError>) {
        if !self.guard.accepts(ticket) {
            debug!("dropping stale delete result");
            return;
        }
        match result {
            Ok(()) => {
                debug!(id, "user deleted");
                self.users.retain(|user| user.id != id);
            }
            Err(err) => {
                warn!(id, error = %err, "error deleting user");
                self.phase = Phase::Failed(err.display_message(DELETE_FAILED));
            }
        }
    }

    pub fn add_user<T: Transport>(&mut self, client: &ApiClient<T>) {
        let ticket = self.begin_mutation();
        let result = client.users().create(&placeholder_user());
        self.finish_add(ticket, result);
    }

    pub fn delete_user<T: Transport>(&mut self, client: &ApiClient<T>, id: UserId) {
        let ticket = self.begin_mutation();
        let result = client.users().delete(id);
        self.finish_delete(ticket, id, result);
    }

    pub fn unmount(&mut self) {
        self.guard.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedTransport;

    const THREE_USERS: &str = r#"[
        {"id":1,"name":"Ada","email":"ada@example.com"},
        {"id":2,"name":"Grace","email":"grace@example.com"},
        {"id":3,"name":"Linus","email":"linus@example.com"}
    ]"#;

    fn loaded() -> (ApiClient<ScriptedTransport>, UserListView) {
        let client = ApiClient::with_transport("http://api.test", ScriptedTransport::new());
        client.transport().push_response(200, THREE_USERS);
        let mut view = UserListView::new();
        view.load(&client);
        assert_eq!(view.users().len(), 3);
        (client, view)
    }

    fn ids(view: &UserListView) -> Vec<UserId> {
        view.users().iter().map(|u| u.id).collect()
    }

    #[test]
    fn add_appends_exactly_one_user() {
        let (client, mut view) = loaded();
        client
            .transport()
            .push_response(201, r#"{"id":4,"name":"John Doe","email":"john@example.com"}"#);

        view.add_user(&client);
        assert_eq!(ids(&view), vec![1, 2, 3, 4]);

        let sent = &client.transport().requests()[1];
        let body: serde_json::Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"name": "John Doe", "email": "john@example.com"}));
    }

    #[test]
    fn failed_add_leaves_list_unchanged() {
        let (client, mut view) = loaded();
        client.transport().push_response(500, r#"{"message":"Database down"}"#);

        view.add_user(&client);
        assert_eq!(ids(&view), vec![1, 2, 3]);
        assert_eq!(view.error(), Some("Database down"));
    }

    #[test]
    fn delete_removes_only_the_matching_user() {
        let (client, mut view) = loaded();
        client.transport().push_response(204, "");

        view.delete_user(&client, 2);
        assert_eq!(ids(&view), vec![1, 3]);
        assert_eq!(client.transport().requests()[1].url, "http://api.test/users/2");
    }

    #[test]
    fn failed_delete_removes_nothing() {
        let (client, mut view) = loaded();
        client.transport().push_error(ApiError::Network("reset".into()));

        view.delete_user(&client, 2);
        assert_eq!(ids(&view), vec![1, 2, 3]);
        assert_eq!(view.error(), Some(DELETE_FAILED));
    }

    #[test]
    fn fetch_failure_uses_fallback() {
        let client = ApiClient::with_transport("http://api.test", ScriptedTransport::new());
        client.transport().push_response(502, "<html>bad gateway</html>");
        let mut view = UserListView::new();
        view.load(&client);
        assert_eq!(view.error(), Some(FETCH_FAILED));
        assert!(view.users().is_empty());
    }

    #[test]
    fn create_confirmed_after_reload_is_dropped() {
        let (_, mut view) = loaded();
        let ticket = view.begin_mutation();
        let reload = view.begin_load();
        view.finish_load(reload, Ok(Vec::new()));
        view.finish_add(
            ticket,
            Ok(User {
                id: 9,
                name: "John Doe".into(),
                email: "john@example.com".into(),
            }),
        );
        assert!(view.users().is_empty());
    }

    #[test]
    fn results_after_unmount_are_ignored() {
        let (_, mut view) = loaded();
        let ticket = view.begin_mutation();
        view.unmount();
        view.finish_delete(ticket, 1, Ok(()));
        assert_eq!(ids(&view), vec![1, 2, 3]);
    }
}
