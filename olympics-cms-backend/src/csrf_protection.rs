use axum::async_trait;
use axum::extract::{FromRef, FromRequest, Request};
use axum::http::Method;
use axum::RequestExt as _;
use axum_extra::extract::cookie::Key;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::AppError;
use crate::session::Session;

pub trait CsrfToken {
    fn csrf_token(&self) -> &str;
}

/// Form body whose `csrf_token` field was checked against the session.
///
/// Carries the session it was checked against, so handlers don't extract it twice.
pub struct CsrfSafeForm<T: CsrfToken> {
    pub session: Session,
    pub value: T,
}

#[async_trait]
impl<S, T> FromRequest<S> for CsrfSafeForm<T>
where
    S: Send + Sync,
    Key: FromRef<S>,
    T: DeserializeOwned + CsrfToken + Send,
{
    type Rejection = AppError;

    async fn from_request(mut req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let not_get_or_head = !(req.method() == Method::GET || req.method() == Method::HEAD);
        let session = match req.extract_parts_with_state::<Session, S>(state).await {
            Ok(session) => session,
            Err(infallible) => match infallible {},
        };

        let axum::Form(value) = axum::Form::<T>::from_request(req, state).await?;

        if not_get_or_head && value.csrf_token() != session.csrf_token() {
            return Err(AppError::WrongCsrfToken);
        }
        Ok(Self { session, value })
    }
}

/// A form that carries nothing but the token.
#[derive(Deserialize)]
pub struct CsrfOnly {
    csrf_token: String,
}

impl CsrfToken for CsrfOnly {
    fn csrf_token(&self) -> &str {
        &self.csrf_token
    }
}

/// Form fields of a create or update submission.
#[derive(Deserialize)]
pub struct Submission<D> {
    csrf_token: String,
    /// Empty when creating.
    #[serde(default)]
    pub edit_id: String,
    #[serde(flatten)]
    pub draft: D,
}

impl<D> CsrfToken for Submission<D> {
    fn csrf_token(&self) -> &str {
        &self.csrf_token
    }
}

#[derive(Deserialize)]
pub struct DeleteForm {
    csrf_token: String,
    pub id: String,
}

impl CsrfToken for DeleteForm {
    fn csrf_token(&self) -> &str {
        &self.csrf_token
    }
}
