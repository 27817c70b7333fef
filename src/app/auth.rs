use async_trait::async_trait;

use crate::api::{ApiClient, ApiError};

pub const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";
pub const SIGNUP_FAILED: &str = "Signup failed. Please try another username.";

/// The two auth calls the login flow composes.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> Result<String, ApiError>;
    async fn register(&self, username: &str, password: &str) -> Result<(), ApiError>;
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        ApiClient::login(self, username, password).await
    }

    async fn register(&self, username: &str, password: &str) -> Result<(), ApiError> {
        ApiClient::register(self, username, password).await
    }
}

/// Log in, and on "invalid credentials" try registering the same
/// credentials once and logging in again. Returns the bearer token or the
/// message to show. Any non-401 failure short-circuits to a generic
/// login-failure message.
pub async fn login_with_fallback(
    api: &dyn AuthApi,
    username: &str,
    password: &str,
) -> Result<String, String> {
    match api.login(username, password).await {
        Ok(token) => Ok(token),
        Err(ApiError::Unauthorized) => {
            log::info!("Login unauthorized for {username}, trying registration fallback");
            if let Err(e) = api.register(username, password).await {
                log::warn!("Fallback registration failed: {e}");
                return Err(SIGNUP_FAILED.to_string());
            }
            match api.login(username, password).await {
                Ok(token) => Ok(token),
                Err(e) => {
                    log::warn!("Login retry after registration failed: {e}");
                    Err(SIGNUP_FAILED.to_string())
                }
            }
        }
        Err(e) => {
            log::warn!("Login failed: {e}");
            Err(LOGIN_FAILED.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Scripted auth backend that records the call sequence.
    struct ScriptedAuth {
        calls: Mutex<Vec<&'static str>>,
        first_login: Option<&'static str>,
        register_ok: bool,
        retry_login: Option<&'static str>,
    }

    impl ScriptedAuth {
        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AuthApi for ScriptedAuth {
        async fn login(&self, _username: &str, _password: &str) -> Result<String, ApiError> {
            let mut calls = self.calls.lock().unwrap();
            calls.push("login");
            let outcome = if calls.iter().filter(|c| **c == "login").count() == 1 {
                self.first_login
            } else {
                self.retry_login
            };
            match outcome {
                Some(token) => Ok(token.to_string()),
                None => Err(ApiError::Unauthorized),
            }
        }

        async fn register(&self, _username: &str, _password: &str) -> Result<(), ApiError> {
            self.calls.lock().unwrap().push("register");
            if self.register_ok {
                Ok(())
            } else {
                Err(ApiError::Status {
                    status: reqwest::StatusCode::BAD_REQUEST,
                    body: "User already exists".into(),
                })
            }
        }
    }

    #[tokio::test]
    async fn successful_login_makes_no_extra_calls() {
        let api = ScriptedAuth {
            calls: Mutex::new(Vec::new()),
            first_login: Some("tok-1"),
            register_ok: true,
            retry_login: None,
        };
        let result = login_with_fallback(&api, "admin", "admin").await;
        assert_eq!(result, Ok("tok-1".to_string()));
        assert_eq!(api.calls(), vec!["login"]);
    }

    #[tokio::test]
    async fn unauthorized_triggers_one_register_and_one_retry() {
        let api = ScriptedAuth {
            calls: Mutex::new(Vec::new()),
            first_login: None,
            register_ok: true,
            retry_login: Some("tok-2"),
        };
        let result = login_with_fallback(&api, "newuser", "pw").await;
        assert_eq!(result, Ok("tok-2".to_string()));
        assert_eq!(api.calls(), vec!["login", "register", "login"]);
    }

    #[tokio::test]
    async fn failed_registration_reports_signup_failure() {
        let api = ScriptedAuth {
            calls: Mutex::new(Vec::new()),
            first_login: None,
            register_ok: false,
            retry_login: None,
        };
        let result = login_with_fallback(&api, "taken", "pw").await;
        assert_eq!(result, Err(SIGNUP_FAILED.to_string()));
        assert_eq!(api.calls(), vec!["login", "register"]);
    }

    #[tokio::test]
    async fn failed_retry_reports_signup_failure() {
        let api = ScriptedAuth {
            calls: Mutex::new(Vec::new()),
            first_login: None,
            register_ok: true,
            retry_login: None,
        };
        let result = login_with_fallback(&api, "user", "pw").await;
        assert_eq!(result, Err(SIGNUP_FAILED.to_string()));
        assert_eq!(api.calls(), vec!["login", "register", "login"]);
    }

    #[tokio::test]
    async fn transport_error_reports_generic_login_failure() {
        struct Down;

        #[async_trait]
        impl AuthApi for Down {
            async fn login(&self, _u: &str, _p: &str) -> Result<String, ApiError> {
                Err(ApiError::Status {
                    status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                    body: String::new(),
                })
            }
            async fn register(&self, _u: &str, _p: &str) -> Result<(), ApiError> {
                panic!("register must not be called on non-401 failures");
            }
        }

        let result = login_with_fallback(&Down, "admin", "admin").await;
        assert_eq!(result, Err(LOGIN_FAILED.to_string()));
    }
}
