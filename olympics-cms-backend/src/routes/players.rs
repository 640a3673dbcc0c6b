use axum::extract::{Query, State};
use axum::response::Html;
use olympics_cms_database::models::{Athlete, Choice as _};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, ViewError};
use crate::resource::aggregate::eliminated_first;
use crate::resource::{Resource as _, ResourceList};
use crate::routes::{Banner, Pagination};
use crate::session::Session;
use crate::AppState;

#[derive(Deserialize, Debug, Default)]
pub struct PlayersQuery {
    page: Option<usize>,
    /// `out` lists eliminated athletes first.
    sort: Option<String>,
}

#[derive(Serialize)]
struct PlayerView<'a> {
    name: &'a str,
    image: &'a str,
    discipline: &'a str,
    is_out: bool,
    medal: &'static str,
}

#[derive(Serialize)]
struct PlayersPage<'a> {
    players: Vec<PlayerView<'a>>,
    sorted_out_first: bool,
    pagination: Pagination,
    banner: Banner,
}

pub async fn players(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<PlayersQuery>,
) -> Result<(Session, Html<String>), AppError> {
    let page = query.page.unwrap_or(1).max(1);
    let sorted_out_first = query.sort.as_deref() == Some("out");
    let collection = state.collection::<Athlete>();
    let failure = ViewError::Fetch(Athlete::MESSAGES.fetch_failed);

    let mut athletes = ResourceList::default();
    if sorted_out_first {
        // sorting needs every athlete
        athletes.load(&collection, failure).await;
        eliminated_first(athletes.records_mut());
    } else {
        athletes
            .load_for(state.listing, &collection, page, failure)
            .await;
    }
    let mut banner = Banner::default();
    banner.list(&athletes);

    let players = athletes
        .page(page)
        .iter()
        .map(|record| PlayerView {
            name: &record.data.name,
            image: &record.data.image,
            discipline: &record.data.discipline,
            is_out: record.data.is_out,
            medal: record.data.medal_type.label(),
        })
        .collect();
    let prefix = if sorted_out_first {
        "/players?sort=out&"
    } else {
        "/players?"
    };
    let html = state.templates.render(
        &session,
        "players",
        "Player Details",
        PlayersPage {
            players,
            sorted_out_first,
            pagination: Pagination::new(prefix, page, athletes.page_count()),
            banner,
        },
    )?;
    Ok((session, html))
}
