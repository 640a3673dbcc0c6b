use axum::extract::{Query, State};
use axum::response::Html;
use chrono::NaiveDate;
use olympics_cms_database::models::{Choice as _, Event, EventStatus, Record};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, ViewError};
use crate::resource::aggregate::on_day;
use crate::resource::{Resource as _, ResourceList};
use crate::routes::Banner;
use crate::session::Session;
use crate::templating::long_date;
use crate::AppState;

/// Shown when an event has no opposition image.
pub const WORLD_IMAGE: &str = "/images/world.jpg";

#[derive(Serialize, Debug)]
pub struct EventView<'a> {
    discipline: &'a str,
    opposition_image: &'a str,
    status: &'static str,
    result: &'static str,
    day: String,
    time: &'a str,
    /// Rendered greyed out.
    completed: bool,
}

impl<'a> From<&'a Record<Event>> for EventView<'a> {
    fn from(record: &'a Record<Event>) -> Self {
        let event = &record.data;
        Self {
            discipline: &event.discipline,
            opposition_image: event.opposition_image().unwrap_or(WORLD_IMAGE),
            status: event.status.label(),
            result: event.result.label(),
            day: long_date(event.begins_at),
            time: &event.time,
            completed: event.status == EventStatus::Completed,
        }
    }
}

/// Loads all events, failures end up in `banner`.
pub async fn load_events(state: &AppState, banner: &mut Banner) -> ResourceList<Event> {
    let mut events = ResourceList::default();
    events
        .load(
            &state.collection::<Event>(),
            ViewError::Fetch(Event::MESSAGES.fetch_failed),
        )
        .await;
    banner.list(&events);
    events
}

#[derive(Deserialize, Debug, Default)]
pub struct ScheduleQuery {
    date: Option<String>,
}

#[derive(Serialize)]
struct SchedulePage<'a> {
    selected_date: Option<String>,
    events: Vec<EventView<'a>>,
    banner: Banner,
}

pub async fn schedule(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ScheduleQuery>,
) -> Result<(Session, Html<String>), AppError> {
    let mut banner = Banner::default();
    let events = load_events(&state, &mut banner).await;
    // an unparsable date shows every day
    let day = query
        .date
        .as_deref()
        .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok());
    let events: Vec<EventView<'_>> = match day {
        Some(day) => on_day(events.records(), day)
            .into_iter()
            .map(EventView::from)
            .collect(),
        None => events.records().iter().map(EventView::from).collect(),
    };
    let html = state.templates.render(
        &session,
        "schedule",
        "Schedule",
        SchedulePage {
            selected_date: day.map(|day| day.format("%Y-%m-%d").to_string()),
            events,
            banner,
        },
    )?;
    Ok((session, html))
}
