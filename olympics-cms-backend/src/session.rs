use core::convert::Infallible;

use axum::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::response::{IntoResponseParts, ResponseParts};
use axum_extra::extract::cookie::{Cookie, Key, SameSite};
use axum_extra::extract::PrivateCookieJar;
use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng as _};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A logged in backend user and the secret of their remote session.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Login {
    pub email: String,
    pub secret: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
struct SessionCookie {
    csrf_token: String,
    login: Option<Login>,
}

#[derive(Clone)]
pub struct Session {
    private_cookies: PrivateCookieJar,
    cookie: SessionCookie,
}

fn csrf_token() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(30)
        .map(char::from)
        .collect()
}

impl Session {
    const COOKIE_NAME_SESSION: &'static str = "__Host-session";

    #[must_use]
    pub fn new(private_cookies: PrivateCookieJar) -> Self {
        let existing = private_cookies
            .get(Self::COOKIE_NAME_SESSION)
            .and_then(|cookie| match serde_json::from_str(cookie.value()) {
                Ok(session) => Some(session),
                Err(err) => {
                    debug!("discarding unreadable session cookie: {err}");
                    None
                }
            });
        match existing {
            Some(cookie) => Self {
                private_cookies,
                cookie,
            },
            None => {
                let mut session = Self {
                    private_cookies,
                    cookie: SessionCookie {
                        csrf_token: csrf_token(),
                        login: None,
                    },
                };
                session.store();
                session
            }
        }
    }

    fn store(&mut self) {
        // serializing strings into a json object can't fail
        let value = serde_json::to_string(&self.cookie).unwrap_or_default();
        let cookie = Cookie::build((Self::COOKIE_NAME_SESSION, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true);
        self.private_cookies = self.private_cookies.clone().add(cookie);
    }

    #[must_use]
    pub fn csrf_token(&self) -> &str {
        &self.cookie.csrf_token
    }

    #[must_use]
    pub const fn login(&self) -> Option<&Login> {
        self.cookie.login.as_ref()
    }

    /// Starts a new session for `email`. The csrf token is rotated.
    pub fn log_in(&mut self, email: String, secret: String) {
        self.cookie = SessionCookie {
            csrf_token: csrf_token(),
            login: Some(Login { email, secret }),
        };
        self.store();
    }

    /// Forgets the login and returns it so the remote session can be ended.
    pub fn log_out(&mut self) -> Option<Login> {
        let login = self.cookie.login.take();
        self.cookie.csrf_token = csrf_token();
        self.store();
        login
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
    Key: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let private_cookies = PrivateCookieJar::<Key>::from_request_parts(parts, state).await?;
        Ok(Self::new(private_cookies))
    }
}

impl IntoResponseParts for Session {
    type Error = Infallible;

    fn into_response_parts(self, res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        self.private_cookies.into_response_parts(res)
    }
}
