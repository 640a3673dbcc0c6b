use axum::extract::rejection::FormRejection;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use olympics_cms_config::ConfigError;
use olympics_cms_database::error::StoreError;
use tracing::error;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("form submission error: {0}")]
    FormRejection(#[from] FormRejection),
    #[error("template error: {0}")]
    Template(#[from] Box<handlebars::TemplateError>),
    #[error("render error: {0}")]
    Render(#[from] handlebars::RenderError),
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("document store error: {0}")]
    Store(#[from] StoreError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("the cookie secret must be at least 64 bytes long")]
    CookieSecret,
    #[error("wrong csrf token")]
    WrongCsrfToken,
}

impl From<handlebars::TemplateError> for AppError {
    fn from(value: handlebars::TemplateError) -> Self {
        Self::Template(Box::new(value))
    }
}

impl AppError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::FormRejection(_) | Self::WrongCsrfToken => StatusCode::BAD_REQUEST,
            Self::Template(_)
            | Self::Render(_)
            | Self::Config(_)
            | Self::Store(_)
            | Self::Io(_)
            | Self::CookieSecret => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("{self}");
        }
        // intentionally not using the template registry, it may be what failed
        (
            status,
            Html(format!(
                "<!doctype html><title>Error</title><h1>{}</h1><p>{}</p>",
                status,
                handlebars::html_escape(&self.to_string())
            )),
        )
            .into_response()
    }
}

/// Failures shown to the user as a banner on an otherwise working page.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewError {
    #[error("{0}")]
    Fetch(&'static str),
    #[error("{0}")]
    Save(&'static str),
    #[error("{0}")]
    Delete(&'static str),
    #[error("Please fill in all required fields")]
    Invalid,
    #[error("The selected record no longer exists")]
    EditTargetMissing,
    #[error("Failed to login")]
    Login,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csrf_errors_are_client_errors() {
        assert_eq!(AppError::WrongCsrfToken.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::CookieSecret.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn view_errors_show_their_static_message() {
        assert_eq!(
            ViewError::Fetch("Failed to fetch athletes").to_string(),
            "Failed to fetch athletes"
        );
        assert_eq!(ViewError::Login.to_string(), "Failed to login");
    }
}
