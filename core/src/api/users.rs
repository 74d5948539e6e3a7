use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::Transport;
use crate::types::{NewUser, User, UserId, UserUpdate};

pub struct UsersApi<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> UsersApi<'a, T> {
    pub fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    pub fn list(&self) -> Result<Vec<User>, ApiError> {
        self.client.get("/users")
    }

    pub fn get(&self, id: UserId) -> Result<User, ApiError> {
        self.client.get(&format!("/users/{id}"))
    }

    pub fn create(&self, input: &NewUser) -> Result<User, ApiError> {
        self.client.post("/users", input)
    }

    pub fn update(&self, id: UserId, input: &UserUpdate) -> Result<User, ApiError> {
        self.client.put(&format!("/users/{id}"), input)
    }

    pub fn delete(&self, id: UserId) -> Result<(), ApiError> {
        self.client.delete(&format!("/users/{id}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;
    use crate::testing::ScriptedTransport;

    #[test]
    fn create_posts_new_user() {
        let c = ApiClient::with_transport("http://api.test", ScriptedTransport::new());
        c.transport()
            .push_response(201, r#"{"id":3,"name":"John Doe","email":"john@example.com"}"#);

        let user = c
            .users()
            .create(&NewUser {
                name: "John Doe".into(),
                email: "john@example.com".into(),
            })
            .unwrap();
        assert_eq!(user.id, 3);

        let sent = &c.transport().requests()[0];
        assert_eq!(sent.method, HttpMethod::Post);
        assert_eq!(sent.url, "http://api.test/users");
    }

    #[test]
    fn errors_are_not_retried() {
        let c = ApiClient::with_transport("http://api.test", ScriptedTransport::new());
        c.transport().push_response(500, "boom");
        c.transport().push_response(200, "[]");

        assert!(c.users().list().is_err());
        assert_eq!(c.transport().request_count(), 1);
        assert_eq!(c.transport().pending(), 1);
    }

    #[test]
    fn get_and_update_address_one_user() {
        let c = ApiClient::with_transport("http://api.test", ScriptedTransport::new());
        c.transport()
            .push_response(200, r#"{"id":5,"name":"Ada","email":"ada@example.com"}"#);
        c.transport()
            .push_response(200, r#"{"id":5,"name":"Ada L.","email":"ada@example.com"}"#);

        assert_eq!(c.users().get(5).unwrap().name, "Ada");
        let updated = c
            .users()
            .update(
                5,
                &UserUpdate {
                    name: Some("Ada L.".into()),
                    email: None,
                },
            )
            .unwrap();
        assert_eq!(updated.name, "Ada L.");

        let requests = c.transport().requests();
        assert_eq!(requests[0].url, "http://api.test/users/5");
        assert_eq!(requests[1].body.as_deref(), Some(r#"{"name":"Ada L."}"#));
    }
}
