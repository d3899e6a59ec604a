//! # Login and signup
//!
//! [`AuthClient`] talks to the two unauthenticated endpoints. The backend answers
//! both with `{success, message, ...}`, and a 401 still carries that JSON body, so
//! the status is read only after the body has been checked for `success: false`.
//! Gateway failures (502/504) are the exception: the proxy answers those, so
//! they are reported as such whatever the body says.
//!
//! The form rules live in [`validate`]; persisting the result of a login is the
//! job of [`crate::session::SessionService`].

mod validate;

pub use validate::{is_valid_email, validate_login, validate_signup};

use crate::endpoints::Endpoints;
use crate::error::ApiError;
use crate::models::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, UserInfo};
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, Method};

pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check if the server is running.";
pub const GATEWAY_ERROR_MESSAGE: &str =
    "The server is temporarily unreachable (bad gateway). Please try again in a moment.";

/// A successful login.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggedIn {
    pub user: UserInfo,
    pub token: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct AuthClient<T> {
    transport: T,
    endpoints: Endpoints,
}

impl<T: HttpTransport> AuthClient<T> {
    pub fn new(transport: T, endpoints: Endpoints) -> Self {
        Self {
            transport,
            endpoints,
        }
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<LoggedIn, ApiError> {
        validate_login(username, password)?;
        let username = username.trim();
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let request = ApiRequest::with_json(Method::Post, self.endpoints.login(), &body)?;
        let response = self.transport.send(request).await?;

        let reply: LoginResponse = decode_reply(&response)?;
        if !reply.success {
            tracing::warn!(%username, status = response.status, "login rejected");
            return Err(ApiError::Rejected(non_empty_or(
                reply.message,
                "Login failed. Please check your credentials.",
            )));
        }
        response.into_result()?;

        // Older backends answer success without echoing the user.
        let user = reply.user.unwrap_or_else(|| UserInfo {
            id: None,
            username: username.to_string(),
            email: None,
        });
        Ok(LoggedIn {
            user,
            token: reply.token.filter(|t| !t.is_empty()),
            message: reply.message,
        })
    }

    /// Register a new account; returns the message to show.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<String, ApiError> {
        validate_signup(username, email, password)?;
        let body = RegisterRequest {
            username: username.trim().to_string(),
            password: password.to_string(),
            email: email.trim().to_string(),
        };
        let request = ApiRequest::with_json(Method::Post, self.endpoints.register(), &body)?;
        let response = self.transport.send(request).await?;

        let reply: RegisterResponse = decode_reply(&response)?;
        if !reply.success {
            return Err(ApiError::Rejected(non_empty_or(
                reply.message,
                "Registration failed. Please try again.",
            )));
        }
        response.into_result()?;
        Ok(non_empty_or(reply.message, "Registration successful! You can now login."))
    }
}

/// Decode a `{success, message}` reply; a body that is not JSON falls back to
/// the HTTP status.
fn decode_reply<R: serde::de::DeserializeOwned>(response: &ApiResponse) -> Result<R, ApiError> {
    if response.is_gateway() {
        return Err(ApiError::Status {
            status: response.status,
            message: response.error_message(),
        });
    }
    match response.json() {
        Ok(reply) => Ok(reply),
        Err(decode) if response.is_success() => Err(decode),
        Err(_) => Err(ApiError::Status {
            status: response.status,
            message: response.error_message(),
        }),
    }
}

fn non_empty_or(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

/// What the login page shows for `err`.
pub fn login_error_message(err: &ApiError) -> String {
    match err {
        e if e.is_gateway() => GATEWAY_ERROR_MESSAGE.to_string(),
        ApiError::Network(_) => NETWORK_ERROR_MESSAGE.to_string(),
        ApiError::Status { message, .. } => message.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::mock::MockTransport;

    fn client(transport: &MockTransport) -> AuthClient<MockTransport> {
        AuthClient::new(transport.clone(), Endpoints::new("http://api.test"))
    }

    #[tokio::test]
    async fn test_login_success() {
        let transport = MockTransport::new();
        transport.respond(
            200,
            r#"{"success":true,"message":"Login successful","user":{"id":3,"username":"kop","email":"kop@uni.edu"}}"#,
        );

        let logged_in = client(&transport).login(" kop ", "secret").await.unwrap();
        assert_eq!(logged_in.user.username, "kop");
        assert_eq!(logged_in.user.id, Some(3));
        assert!(logged_in.token.is_none());

        let request = &transport.requests()[0];
        assert_eq!(request.url, "http://api.test/auth/login");
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.body.as_ref().unwrap()["username"], "kop");
    }

    #[tokio::test]
    async fn test_login_rejected_with_401_body() {
        let transport = MockTransport::new();
        transport.respond(401, r#"{"success":false,"message":"Invalid username or password"}"#);

        let err = client(&transport).login("kop", "nope").await.unwrap_err();
        assert_eq!(err, ApiError::Rejected("Invalid username or password".into()));
        assert_eq!(login_error_message(&err), "Invalid username or password");
    }

    #[tokio::test]
    async fn test_login_validation_sends_nothing() {
        let transport = MockTransport::new();
        let err = client(&transport).login("", "secret").await.unwrap_err();
        assert!(matches!(err, ApiError::Invalid(_)));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_gateway_copy() {
        let transport = MockTransport::new();
        transport
            .respond_text(502, "<html>Bad Gateway</html>")
            .respond_text(504, "")
            .respond_text(500, "boom");

        let client = client(&transport);
        for _ in 0..2 {
            let err = client.login("kop", "secret").await.unwrap_err();
            assert_eq!(login_error_message(&err), GATEWAY_ERROR_MESSAGE);
        }
        let err = client.login("kop", "secret").await.unwrap_err();
        assert_eq!(login_error_message(&err), "boom");
    }

    #[tokio::test]
    async fn test_gateway_json_body_is_not_a_rejection() {
        let transport = MockTransport::new();
        transport
            .respond(502, r#"{"error":"Bad Gateway"}"#)
            .respond(504, r#"{"success":false,"message":"upstream timed out"}"#);

        let client = client(&transport);
        let err = client.login("kop", "secret").await.unwrap_err();
        assert_eq!(err.status(), Some(502));
        assert_eq!(login_error_message(&err), GATEWAY_ERROR_MESSAGE);

        let err = client.login("kop", "secret").await.unwrap_err();
        assert!(err.is_gateway());
        assert_eq!(login_error_message(&err), GATEWAY_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn test_network_failure_copy() {
        let transport = MockTransport::new();
        transport.fail("connection refused");
        let err = client(&transport).login("kop", "secret").await.unwrap_err();
        assert_eq!(login_error_message(&err), NETWORK_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn test_register() {
        let transport = MockTransport::new();
        transport
            .respond(200, r#"{"success":true,"message":"Student registered successfully","data":{"id":1}}"#)
            .respond(400, r#"{"success":false,"message":"Username already exists"}"#);
        let client = client(&transport);

        let message = client.register("kop", "kop@uni.edu", "secret").await.unwrap();
        assert_eq!(message, "Student registered successfully");
        assert_eq!(transport.requests()[0].url, "http://api.test/students/register");

        let err = client.register("kop", "kop@uni.edu", "secret").await.unwrap_err();
        assert_eq!(err.to_string(), "Username already exists");
    }
}
