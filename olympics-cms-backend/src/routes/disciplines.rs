use axum::extract::State;
use axum::response::Html;
use olympics_cms_database::models::Athlete;
use serde::Serialize;

use crate::error::{AppError, ViewError};
use crate::resource::aggregate::discipline_frequency;
use crate::resource::{Resource as _, ResourceList};
use crate::routes::Banner;
use crate::session::Session;
use crate::AppState;

#[derive(Serialize)]
struct DisciplineCount<'a> {
    discipline: &'a str,
    athletes: usize,
}

#[derive(Serialize)]
struct DisciplinesPage<'a> {
    disciplines: Vec<DisciplineCount<'a>>,
    banner: Banner,
}

pub async fn disciplines(
    State(state): State<AppState>,
    session: Session,
) -> Result<(Session, Html<String>), AppError> {
    let mut athletes = ResourceList::default();
    athletes
        .load(
            &state.collection::<Athlete>(),
            ViewError::Fetch(Athlete::MESSAGES.fetch_failed),
        )
        .await;
    let mut banner = Banner::default();
    banner.list(&athletes);
    let disciplines = discipline_frequency(athletes.records())
        .into_iter()
        .map(|(discipline, athletes)| DisciplineCount {
            discipline,
            athletes,
        })
        .collect();
    let html = state.templates.render(
        &session,
        "disciplines",
        "Disciplines",
        DisciplinesPage {
            disciplines,
            banner,
        },
    )?;
    Ok((session, html))
}
