use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::csrf_protection::{CsrfOnly, CsrfSafeForm, CsrfToken};
use crate::error::{AppError, ViewError};
use crate::routes::{Banner, DASHBOARD, LOGIN};
use crate::session::Session;
use crate::AppState;

#[derive(Deserialize)]
pub struct LoginPayload {
    csrf_token: String,
    email: String,
    password: String,
}

impl CsrfToken for LoginPayload {
    fn csrf_token(&self) -> &str {
        &self.csrf_token
    }
}

#[derive(Serialize)]
struct LoginPage<'a> {
    email_value: &'a str,
    banner: Banner,
}

pub async fn login_page(
    State(state): State<AppState>,
    session: Session,
) -> Result<(Session, Response), AppError> {
    if session.login().is_some() {
        return Ok((session, Redirect::to(DASHBOARD).into_response()));
    }
    let html = state.templates.render(
        &session,
        "login",
        "Login",
        LoginPage {
            email_value: "",
            banner: Banner::default(),
        },
    )?;
    Ok((session, html.into_response()))
}

pub async fn login(
    State(state): State<AppState>,
    CsrfSafeForm { mut session, value }: CsrfSafeForm<LoginPayload>,
) -> Result<(Session, Response), AppError> {
    match state
        .accounts
        .create_email_session(&value.email, &value.password)
        .await
    {
        Ok(secret) => {
            info!("{} logged in", value.email);
            session.log_in(value.email, secret);
            Ok((session, Redirect::to(DASHBOARD).into_response()))
        }
        Err(err) => {
            warn!("login of {} failed: {err}", value.email);
            let mut banner = Banner::default();
            banner.error(ViewError::Login);
            let html = state.templates.render(
                &session,
                "login",
                "Login",
                LoginPage {
                    email_value: &value.email,
                    banner,
                },
            )?;
            Ok((session, html.into_response()))
        }
    }
}

pub async fn logout(
    State(state): State<AppState>,
    CsrfSafeForm { mut session, .. }: CsrfSafeForm<CsrfOnly>,
) -> (Session, Redirect) {
    if let Some(login) = session.log_out() {
        // the local session is gone either way
        if let Err(err) = state.accounts.delete_session(&login.secret).await {
            warn!("ending the remote session of {} failed: {err}", login.email);
        }
        info!("{} logged out", login.email);
    }
    (session, Redirect::to(LOGIN))
}
