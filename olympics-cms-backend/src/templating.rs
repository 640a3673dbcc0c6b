use axum::response::Html;
use chrono::{DateTime, Datelike as _, Utc};
use handlebars::{handlebars_helper, Handlebars};
use serde::Serialize;

use crate::error::AppError;
use crate::session::Session;

// https://handlebarsjs.com/api-reference/
// https://github.com/sunng87/handlebars-rust/tree/master/src/helpers

const PARTIALS: &[(&str, &str)] = &[
    ("main_pre", include_str!("../templates/main_pre.hbs")),
    ("main_post", include_str!("../templates/main_post.hbs")),
    ("banner", include_str!("../templates/banner.hbs")),
    ("pagination", include_str!("../templates/pagination.hbs")),
    (
        "schedule_table",
        include_str!("../templates/schedule_table.hbs"),
    ),
];

const TEMPLATES: &[(&str, &str)] = &[
    ("index", include_str!("../templates/index.hbs")),
    ("schedule", include_str!("../templates/schedule.hbs")),
    ("players", include_str!("../templates/players.hbs")),
    ("disciplines", include_str!("../templates/disciplines.hbs")),
    ("full_news", include_str!("../templates/full_news.hbs")),
    ("login", include_str!("../templates/login.hbs")),
    ("athletes", include_str!("../templates/athletes.hbs")),
    ("events", include_str!("../templates/events.hbs")),
    ("tally", include_str!("../templates/tally.hbs")),
    ("news", include_str!("../templates/news.hbs")),
];

/// `August 8, 2024`
#[must_use]
pub fn long_date(value: DateTime<Utc>) -> String {
    value.format("%B %-d, %Y").to_string()
}

/// `August 8th 2024, 5:30:00 pm`
#[must_use]
pub fn long_datetime(value: DateTime<Utc>) -> String {
    let day = value.day();
    let suffix = if (11..=13).contains(&(day % 100)) {
        "th"
    } else {
        match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        }
    };
    format!(
        "{} {day}{suffix} {}",
        value.format("%B"),
        value.format("%Y, %-I:%M:%S %P")
    )
}

fn parse(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|value| value.with_timezone(&Utc))
}

handlebars_helper!(date: |value: str| parse(value).map_or_else(|| value.to_owned(), long_date));
handlebars_helper!(datetime: |value: str| parse(value).map_or_else(|| value.to_owned(), long_datetime));

#[derive(Serialize)]
pub struct TemplateWrapper<'a, T> {
    pub csrf_token: &'a str,
    pub email: Option<&'a str>,
    pub page_title: &'a str,
    #[serde(flatten)]
    pub inner: T,
}

pub struct Templates {
    registry: Handlebars<'static>,
}

impl Templates {
    pub fn new() -> Result<Self, AppError> {
        let mut registry = Handlebars::new();
        for (name, source) in PARTIALS {
            registry.register_partial(name, *source)?;
        }
        for (name, source) in TEMPLATES {
            registry.register_template_string(name, *source)?;
        }
        registry.register_helper("date", Box::new(date));
        registry.register_helper("datetime", Box::new(datetime));
        Ok(Self { registry })
    }

    pub fn render<T: Serialize>(
        &self,
        session: &Session,
        template_name: &str,
        page_title: &str,
        value: T,
    ) -> Result<Html<String>, AppError> {
        Ok(Html(self.registry.render(
            template_name,
            &TemplateWrapper {
                csrf_token: session.csrf_token(),
                email: session.login().map(|login| login.email.as_str()),
                page_title,
                inner: value,
            },
        )?))
    }
}
