use axum::extract::State;
use axum::response::Html;
use olympics_cms_database::models::{Athlete, NewsCard, TallyRow};
use serde::Serialize;

use crate::error::{AppError, ViewError};
use crate::resource::aggregate::{discipline_frequency, medal_totals, newest_first, MedalTotals};
use crate::resource::{Resource, ResourceList};
use crate::routes::schedule::{load_events, EventView};
use crate::routes::Banner;
use crate::session::Session;
use crate::AppState;

#[derive(Serialize)]
pub struct NewsView<'a> {
    id: &'a str,
    card: &'a NewsCard,
}

#[derive(Serialize)]
struct Home<'a> {
    player_count: usize,
    discipline_count: usize,
    totals: MedalTotals,
    medal_count: u64,
    news: Vec<NewsView<'a>>,
    schedule: Vec<EventView<'a>>,
    banner: Banner,
}

async fn load_all<R: Resource>(state: &AppState, banner: &mut Banner) -> ResourceList<R> {
    let mut list = ResourceList::default();
    list.load(
        &state.collection::<R>(),
        ViewError::Fetch(R::MESSAGES.fetch_failed),
    )
    .await;
    banner.list(&list);
    list
}

pub async fn index(
    State(state): State<AppState>,
    session: Session,
) -> Result<(Session, Html<String>), AppError> {
    let mut banner = Banner::default();
    let athletes = load_all::<Athlete>(&state, &mut banner).await;
    let tally = load_all::<TallyRow>(&state, &mut banner).await;
    let mut news = load_all::<NewsCard>(&state, &mut banner).await;
    let events = load_events(&state, &mut banner).await;
    newest_first(news.records_mut());

    let totals = medal_totals(tally.records());
    let html = state.templates.render(
        &session,
        "index",
        "Olympics",
        Home {
            player_count: athletes.len(),
            discipline_count: discipline_frequency(athletes.records()).len(),
            totals,
            medal_count: totals.total(),
            news: news
                .records()
                .iter()
                .map(|record| NewsView {
                    id: record.id.as_str(),
                    card: &record.data,
                })
                .collect(),
            schedule: events.records().iter().map(EventView::from).collect(),
            banner,
        },
    )?;
    Ok((session, html))
}
