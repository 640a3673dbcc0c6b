use chrono::{DateTime, SecondsFormat, Utc};
use olympics_cms_config::CollectionIds;
use olympics_cms_database::models::NewsCard;
use serde::{Deserialize, Serialize};

use super::{FieldErrors, Messages, Resource};

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct NewsDraft {
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub news_contents: String,
    #[serde(default)]
    pub image: String,
    /// Left empty for new cards, which are stamped with the current time.
    #[serde(default)]
    pub published_at: String,
}

impl Resource for NewsCard {
    type Draft = NewsDraft;

    const CREATE_TITLE: &'static str = "Upload News";
    const EDIT_TITLE: &'static str = "Edit News";
    const KIND: &'static str = "news";
    const MESSAGES: Messages = Messages {
        fetch_failed: "Error occurred while fetching news",
        save_failed: "Error occurred while saving card details",
        delete_failed: "Error occurred while deleting news",
        created: "News details uploaded successfully!",
        updated: "News details updated successfully!",
        deleted: "News deleted successfully!",
    };

    fn collection(ids: &CollectionIds) -> &str {
        &ids.breaking_news
    }

    fn to_draft(&self) -> NewsDraft {
        NewsDraft {
            headline: self.headline.clone(),
            news_contents: self.news_contents.clone(),
            image: self.image.clone(),
            published_at: self.published_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }

    fn from_draft(draft: &NewsDraft) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();
        let headline = errors.required("headline", &draft.headline);
        let news_contents = errors.required("news_contents", &draft.news_contents);
        let image = errors.required("image", &draft.image);
        let published_at = if draft.published_at.trim().is_empty() {
            Some(Utc::now())
        } else {
            errors
                .parse::<DateTime<Utc>>("published_at", &draft.published_at)
        };
        let card = published_at.map(|published_at| Self {
            headline,
            news_contents,
            image,
            published_at,
        });
        errors.finish(card)
    }
}
