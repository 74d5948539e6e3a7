use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::Transport;
use crate::types::{Credentials, Registration, SessionInfo};

pub struct AuthApi<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> AuthApi<'a, T> {
    pub fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    /// `POST /auth/login`
    pub fn login(&self, credentials: &Credentials) -> Result<SessionInfo, ApiError> {
        self.client.post("/auth/login", credentials)
    }

    /// `POST /auth/register`
    pub fn register(&self, profile: &Registration) -> Result<SessionInfo, ApiError> {
        self.client.post("/auth/register", profile)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::http::HttpMethod;
    use crate::testing::ScriptedTransport;

    #[test]
    fn login_posts_credentials() {
        let client = ApiClient::with_transport("http://api.test", ScriptedTransport::new());
        client.transport().push_response(200, r#"{"token":"abc"}"#);

        let info = client
            .auth()
            .login(&Credentials {
                email: "ada@example.com".into(),
                password: "secret1".into(),
            })
            .unwrap();
        assert_eq!(info.token.as_deref(), Some("abc"));

        let sent = &client.transport().requests()[0];
        assert_eq!(sent.method, HttpMethod::Post);
        assert_eq!(sent.url, "http://api.test/auth/login");
        let body: Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"email": "ada@example.com", "password": "secret1"}));
    }

    #[test]
    fn register_propagates_server_message() {
        let client = ApiClient::with_transport("http://api.test", ScriptedTransport::new());
        client
            .transport()
            .push_response(409, r#"{"message":"Email already registered"}"#);

        let err = client
            .auth()
            .register(&Registration {
                name: "Ada".into(),
                email: "ada@example.com".into(),
                password: "secret1".into(),
            })
            .unwrap_err();
        assert_eq!(err.status(), Some(409));
        assert_eq!(err.message(), Some("Email already registered"));
        assert_eq!(client.transport().requests()[0].url, "http://api.test/auth/register");
    }
}
