use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use olympics_cms_config::CollectionIds;
use olympics_cms_database::models::{options, Choice as _, Event, EventResult, EventStatus};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{FieldErrors, Messages, Resource};

/// Format of `<input type="datetime-local" step="1">`.
const LOCAL_INPUT: &str = "%Y-%m-%dT%H:%M:%S";
/// Same input without the `step` attribute.
const LOCAL_INPUT_MINUTES: &str = "%Y-%m-%dT%H:%M";

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct EventDraft {
    #[serde(default)]
    pub opposition: String,
    #[serde(default)]
    pub discipline: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub result: String,
    #[serde(default)]
    pub begins_at: String,
    #[serde(default)]
    pub time: String,
}

/// Accepts RFC 3339, the browser's local date-time input (taken as UTC) or a plain date.
fn parse_begins_at(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    DateTime::parse_from_rfc3339(value)
        .map(|at| at.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, LOCAL_INPUT)
                .or_else(|_| NaiveDateTime::parse_from_str(value, LOCAL_INPUT_MINUTES))
                .ok()
                .map(|at| at.and_utc())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|day| day.and_hms_opt(0, 0, 0))
                .map(|at| at.and_utc())
        })
}

impl Resource for Event {
    type Draft = EventDraft;

    const CREATE_TITLE: &'static str = "Upload Event Details";
    const EDIT_TITLE: &'static str = "Edit Event Details";
    const KIND: &'static str = "events";
    const MESSAGES: Messages = Messages {
        fetch_failed: "Failed to fetch events",
        save_failed: "Failed to create event",
        delete_failed: "Failed to delete event",
        created: "Event details uploaded successfully!",
        updated: "Event details updated successfully!",
        deleted: "Event deleted successfully!",
    };

    fn collection(ids: &CollectionIds) -> &str {
        &ids.events
    }

    fn to_draft(&self) -> EventDraft {
        EventDraft {
            opposition: self.opposition.clone().unwrap_or_default(),
            discipline: self.discipline.clone(),
            status: self.status.as_str().to_owned(),
            result: self.result.as_str().to_owned(),
            begins_at: self.begins_at.format(LOCAL_INPUT).to_string(),
            time: self.time.clone(),
        }
    }

    fn from_draft(draft: &EventDraft) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();
        let discipline = errors.required("discipline", &draft.discipline);
        let status = errors.parse::<EventStatus>("status", &draft.status);
        let result = errors.parse::<EventResult>("result", &draft.result);
        let begins_at = parse_begins_at(&draft.begins_at);
        if begins_at.is_none() {
            errors.add("begins_at", "must be a date");
        }
        let time = errors.required("time", &draft.time);
        let opposition = Some(draft.opposition.trim().to_owned()).filter(|url| !url.is_empty());
        let event = status
            .zip(result)
            .zip(begins_at)
            .map(|((status, result), begins_at)| Self {
                opposition,
                discipline,
                status,
                result,
                begins_at,
                time,
            });
        errors.finish(event)
    }

    fn options() -> serde_json::Value {
        json!({
            "statuses": options::<EventStatus>(),
            "results": options::<EventResult>(),
        })
    }
}
