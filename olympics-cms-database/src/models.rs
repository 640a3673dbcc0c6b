use core::fmt;
use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::id::DocumentId;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{value:?} is not a valid {kind}")]
pub struct UnknownChoice {
    pub kind: &'static str,
    pub value: String,
}

/// A closed set of values for a categorical field.
pub trait Choice: Copy + Eq + 'static {
    const KIND: &'static str;
    const ALL: &'static [Self];

    /// Spelling stored in the document.
    fn as_str(self) -> &'static str;

    fn label(self) -> &'static str;
}

/// `value`/`label` pair for rendering a `<select>`.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceOption {
    pub value: &'static str,
    pub label: &'static str,
}

#[must_use]
pub fn options<C: Choice>() -> Vec<ChoiceOption> {
    C::ALL
        .iter()
        .map(|choice| ChoiceOption {
            value: choice.as_str(),
            label: choice.label(),
        })
        .collect()
}

macro_rules! choice {
    (
        $(#[$meta:meta])*
        $name:ident ($kind:literal) $(empty = $empty:ident)? {
            $($variant:ident => $wire:literal, $label:literal;)*
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $($variant,)*
        }

        impl Choice for $name {
            const KIND: &'static str = $kind;
            const ALL: &'static [Self] = &[$(Self::$variant,)*];

            fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)*
                }
            }

            fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)*
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownChoice;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($wire => Ok(Self::$variant),)*
                    $("" => Ok(Self::$empty),)?
                    other => Err(UnknownChoice {
                        kind: $kind,
                        value: other.to_owned(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = String::deserialize(deserializer)?;
                value.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

choice! {
    /// Medal an athlete has won so far. Old documents store `""` for none.
    MedalType ("medal type") empty = None {
        Gold => "Gold", "Gold";
        Silver => "Silver", "Silver";
        Bronze => "Bronze", "Bronze";
        None => "None", "None";
    }
}

choice! {
    EventStatus ("event status") {
        Upcoming => "upcoming", "Upcoming";
        Ongoing => "ongoing", "Ongoing";
        Completed => "completed", "Completed";
        Canceled => "canceled", "Canceled";
    }
}

choice! {
    EventResult ("event result") {
        Gold => "Gold", "Gold";
        Silver => "Silver", "Silver";
        Bronze => "Bronze", "Bronze";
        Out => "Out", "Out";
        Qualified => "Qualified", "Qualified";
        Disqualified => "Disqualified", "Disqualified";
        Abandoned => "Abandoned", "Abandoned";
        Waiting => "Waiting", "Waiting";
        Repechage => "repechage", "Repechage";
        Win => "Win", "Win";
    }
}

choice! {
    /// Sports a medal tally row can be recorded for.
    Sport ("sport") {
        Hockey => "Hockey", "Hockey";
        TableTennis => "Table Tennis", "Table Tennis";
        Golf => "Golf", "Golf";
        Equestrian => "Equestrian", "Equestrian";
        Athletics => "Athletics", "Athletics";
        Wrestling => "Wrestling", "Wrestling";
        Boxing => "Boxing", "Boxing";
        Shooting => "Shooting", "Shooting";
        Tennis => "Tennis", "Tennis";
        Archery => "Archery", "Archery";
        Badminton => "Badminton", "Badminton";
        Swimming => "Swimming", "Swimming";
        Sailing => "Sailing", "Sailing";
        Judo => "Judo", "Judo";
        Rowing => "Rowing", "Rowing";
        Weightlifting => "Weightlifting", "Weightlifting";
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Athlete {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Image")]
    pub image: String,
    #[serde(rename = "Discipline")]
    pub discipline: String,
    #[serde(rename = "IsOut", default)]
    pub is_out: bool,
    #[serde(rename = "MedalType")]
    pub medal_type: MedalType,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Event {
    #[serde(rename = "Opposition", default)]
    pub opposition: Option<String>,
    #[serde(rename = "Discipline")]
    pub discipline: String,
    pub status: EventStatus,
    #[serde(rename = "Result")]
    pub result: EventResult,
    #[serde(rename = "BeginsAt")]
    pub begins_at: DateTime<Utc>,
    #[serde(rename = "Time")]
    pub time: String,
}

impl Event {
    /// Opposition image, treating an empty url like a missing one.
    #[must_use]
    pub fn opposition_image(&self) -> Option<&str> {
        self.opposition.as_deref().filter(|url| !url.is_empty())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TallyRow {
    #[serde(rename = "Games")]
    pub games: Sport,
    #[serde(rename = "Gold")]
    pub gold: u32,
    #[serde(rename = "Silver")]
    pub silver: u32,
    #[serde(rename = "Bronze")]
    pub bronze: u32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NewsCard {
    #[serde(rename = "Headline")]
    pub headline: String,
    #[serde(rename = "NewsContents")]
    pub news_contents: String,
    #[serde(rename = "Image")]
    pub image: String,
    #[serde(rename = "PublishedAt")]
    pub published_at: DateTime<Utc>,
}

/// A stored document: its id plus the typed fields.
///
/// Service attributes like `$createdAt` are ignored when reading.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Record<T> {
    #[serde(rename = "$id")]
    pub id: DocumentId,
    #[serde(flatten)]
    pub data: T,
}
