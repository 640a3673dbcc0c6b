//! The list/form/edit pattern shared by every editable entity kind.
//!
//! A page request loads a [`ResourceList`], optionally moves one of its
//! records into a [`ResourceForm`] (the edit bridge) and renders both.
//! Submissions go through [`ResourceForm::submit`], which writes to the store
//! and patches the in-memory list the same request renders.

pub mod aggregate;
pub mod athletes;
pub mod edit_bridge;
pub mod events;
pub mod form;
pub mod list;
pub mod news;
pub mod tally;

use std::collections::BTreeMap;
use std::str::FromStr;

use olympics_cms_config::CollectionIds;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub use self::form::{FormMode, ResourceForm, Submitted};
pub use self::list::{FetchState, ResourceList, PAGE_SIZE};

/// User facing messages of one resource kind.
pub struct Messages {
    pub fetch_failed: &'static str,
    pub save_failed: &'static str,
    pub delete_failed: &'static str,
    pub created: &'static str,
    pub updated: &'static str,
    pub deleted: &'static str,
}

pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// String valued form fields, as posted by the browser.
    type Draft: Serialize + DeserializeOwned + Default + Clone + Send + Sync;

    /// Path segment below `/backend/` and name of the template.
    const KIND: &'static str;
    const CREATE_TITLE: &'static str;
    const EDIT_TITLE: &'static str;
    const MESSAGES: Messages;

    fn collection(ids: &CollectionIds) -> &str;

    fn to_draft(&self) -> Self::Draft;

    fn from_draft(draft: &Self::Draft) -> Result<Self, FieldErrors>;

    /// Option lists for the `<select>` fields of the form.
    fn options() -> serde_json::Value {
        serde_json::Value::Null
    }
}

/// Validation messages keyed by form field name.
#[derive(Serialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    /// Trimmed value, or an error if it is empty.
    pub fn required(&mut self, field: &'static str, value: &str) -> String {
        let value = value.trim();
        if value.is_empty() {
            self.add(field, "must not be empty");
        }
        value.to_owned()
    }

    pub fn parse<T: FromStr>(&mut self, field: &'static str, value: &str) -> Option<T>
    where
        T::Err: ToString,
    {
        match value.trim().parse() {
            Ok(value) => Some(value),
            Err(err) => {
                self.add(field, err.to_string());
                None
            }
        }
    }

    /// `Ok(value)` when no field had an error.
    pub fn finish<T>(self, value: Option<T>) -> Result<T, Self> {
        match value {
            Some(value) if self.is_empty() => Ok(value),
            _ => Err(self),
        }
    }
}
