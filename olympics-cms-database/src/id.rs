use core::fmt;

use chrono::{Timelike as _, Utc};
use rand::{thread_rng, Rng as _};
use serde::{Deserialize, Serialize};

const MAX_LEN: usize = 36;
const RANDOM_PADDING: usize = 7;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid document id {0:?}")]
pub struct InvalidDocumentId(pub String);

/// Identifier assigned to a document on creation. Never changes afterwards.
///
/// Valid ids are 1 to 36 characters of `[a-zA-Z0-9._-]` and don't start with a
/// special character, so they can be put into a url path as-is.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentId(String);

impl DocumentId {
    /// Hex seconds, hex microseconds (5 digits) and random hex padding.
    #[must_use]
    pub fn unique() -> Self {
        let now = Utc::now();
        let mut id = format!("{:x}{:05x}", now.timestamp(), now.nanosecond() / 1000 % 1_000_000);
        let mut rng = thread_rng();
        for _ in 0..RANDOM_PADDING {
            id.push(char::from_digit(rng.gen_range(0..16), 16).unwrap_or('0'));
        }
        Self(id)
    }

    pub fn parse(value: &str) -> Result<Self, InvalidDocumentId> {
        let valid_char = |c: char| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-');
        let starts_alphanumeric = value.chars().next().is_some_and(|c| c.is_ascii_alphanumeric());
        if value.len() <= MAX_LEN && starts_alphanumeric && value.chars().all(valid_char) {
            Ok(Self(value.to_owned()))
        } else {
            Err(InvalidDocumentId(value.to_owned()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DocumentId {
    type Error = InvalidDocumentId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DocumentId> for String {
    fn from(value: DocumentId) -> Self {
        value.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
