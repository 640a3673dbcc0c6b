use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use olympics_cms_database::models::NewsCard;
use olympics_cms_database::DocumentId;
use serde::Serialize;
use tracing::error;

use crate::error::{AppError, ViewError};
use crate::resource::Resource as _;
use crate::routes::Banner;
use crate::session::Session;
use crate::AppState;

#[derive(Serialize)]
struct FullNewsPage {
    card: Option<NewsCard>,
    banner: Banner,
}

pub async fn full_news(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<(Session, Response), AppError> {
    let fetched = match DocumentId::parse(&id) {
        Ok(id) => state
            .collection::<NewsCard>()
            .get(&id)
            .await
            .map_err(|err| {
                if err.is_not_found() {
                    StatusCode::NOT_FOUND
                } else {
                    error!("fetching news {id} failed: {err}");
                    StatusCode::BAD_GATEWAY
                }
            }),
        Err(_) => Err(StatusCode::NOT_FOUND),
    };
    let mut banner = Banner::default();
    let (status, card, title) = match fetched {
        Ok(record) => {
            let title = record.data.headline.clone();
            (StatusCode::OK, Some(record.data), title)
        }
        Err(status) => {
            banner.error(ViewError::Fetch(NewsCard::MESSAGES.fetch_failed));
            (status, None, "News".to_owned())
        }
    };
    let html = state.templates.render(
        &session,
        "full_news",
        &title,
        FullNewsPage { card, banner },
    )?;
    Ok((session, (status, html).into_response()))
}
