pub mod backend;
pub mod disciplines;
pub mod full_news;
pub mod health;
pub mod index;
pub mod indexcss;
pub mod players;
pub mod schedule;

use serde::{Deserialize, Serialize};

use crate::error::ViewError;
use crate::resource::ResourceList;

pub const LOGIN: &str = "/backend/login";
pub const DASHBOARD: &str = "/backend/dashboard";

#[derive(Deserialize, Debug, Default)]
pub struct PageQuery {
    pub page: Option<usize>,
}

impl PageQuery {
    #[must_use]
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }
}

/// Success and error messages shown above the page content.
#[derive(Serialize, Debug, Default)]
pub struct Banner {
    success: Option<&'static str>,
    errors: Vec<String>,
}

impl Banner {
    pub fn success(&mut self, message: &'static str) {
        self.success = Some(message);
    }

    pub fn error(&mut self, error: ViewError) {
        self.errors.push(error.to_string());
    }

    /// Adds the fetch error of `list`, if any.
    pub fn list<T>(&mut self, list: &ResourceList<T>) -> &mut Self {
        if let Some(error) = list.error() {
            self.error(error);
        }
        self
    }
}

#[derive(Serialize, Debug)]
struct PageLink {
    number: usize,
    current: bool,
}

#[derive(Serialize, Debug)]
pub struct Pagination {
    /// Link target up to and including the `?` or `&` before `page=`.
    prefix: String,
    previous: Option<usize>,
    next: Option<usize>,
    pages: Vec<PageLink>,
}

impl Pagination {
    #[must_use]
    pub fn new(prefix: impl Into<String>, current: usize, count: usize) -> Self {
        Self {
            prefix: prefix.into(),
            previous: (current > 1).then(|| current - 1),
            next: (current < count).then(|| current + 1),
            pages: (1..=count)
                .map(|number| PageLink {
                    number,
                    current: number == current,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_links() {
        let pagination = Pagination::new("/players?", 2, 3);
        assert_eq!(pagination.previous, Some(1));
        assert_eq!(pagination.next, Some(3));
        assert_eq!(
            pagination
                .pages
                .iter()
                .filter(|link| link.current)
                .map(|link| link.number)
                .collect::<Vec<_>>(),
            vec![2]
        );
        let past_the_end = Pagination::new("/players?", 7, 3);
        assert_eq!(past_the_end.next, None);
        assert_eq!(past_the_end.previous, Some(6));
    }
}
