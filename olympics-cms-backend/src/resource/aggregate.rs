use std::collections::BTreeMap;

use chrono::NaiveDate;
use olympics_cms_database::models::{Athlete, Event, NewsCard, Record, TallyRow};
use serde::Serialize;

/// How often each key occurs, ordered by key.
pub fn frequency<'a, T: 'a, K: Ord>(
    items: impl IntoIterator<Item = &'a T>,
    key: impl Fn(&'a T) -> K,
) -> BTreeMap<K, usize> {
    items.into_iter().fold(BTreeMap::new(), |mut counts, item| {
        *counts.entry(key(item)).or_default() += 1;
        counts
    })
}

pub fn discipline_frequency(athletes: &[Record<Athlete>]) -> BTreeMap<&str, usize> {
    frequency(athletes, |athlete| athlete.data.discipline.as_str())
}

#[derive(Serialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MedalTotals {
    pub gold: u64,
    pub silver: u64,
    pub bronze: u64,
}

impl MedalTotals {
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.gold + self.silver + self.bronze
    }
}

pub fn medal_totals<'a>(rows: impl IntoIterator<Item = &'a Record<TallyRow>>) -> MedalTotals {
    rows.into_iter()
        .fold(MedalTotals::default(), |totals, row| MedalTotals {
            gold: totals.gold + u64::from(row.data.gold),
            silver: totals.silver + u64::from(row.data.silver),
            bronze: totals.bronze + u64::from(row.data.bronze),
        })
}

/// Eliminated athletes first, otherwise keeping the stored order.
pub fn eliminated_first(athletes: &mut [Record<Athlete>]) {
    athletes.sort_by_key(|athlete| !athlete.data.is_out);
}

pub fn newest_first(news: &mut [Record<NewsCard>]) {
    news.sort_by(|a, b| b.data.published_at.cmp(&a.data.published_at));
}

/// Events beginning on `day` (UTC).
pub fn on_day(events: &[Record<Event>], day: NaiveDate) -> Vec<&Record<Event>> {
    events
        .iter()
        .filter(|event| event.data.begins_at.date_naive() == day)
        .collect()
}
