use olympics_cms_config::CollectionIds;
use olympics_cms_database::models::{options, Choice as _, Sport, TallyRow};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{FieldErrors, Messages, Resource};

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct TallyDraft {
    #[serde(default)]
    pub games: String,
    #[serde(default)]
    pub gold: String,
    #[serde(default)]
    pub silver: String,
    #[serde(default)]
    pub bronze: String,
}

fn medals(errors: &mut FieldErrors, field: &'static str, value: &str) -> Option<u32> {
    let count = value.trim().parse().ok();
    if count.is_none() {
        errors.add(field, "must be a whole number of at least 0");
    }
    count
}

impl Resource for TallyRow {
    type Draft = TallyDraft;

    const CREATE_TITLE: &'static str = "Upload Tally";
    const EDIT_TITLE: &'static str = "Edit Tally";
    const KIND: &'static str = "tally";
    const MESSAGES: Messages = Messages {
        fetch_failed: "Failed to fetch tally",
        save_failed: "Failed to create/update tally",
        delete_failed: "Failed to delete tally",
        created: "Tally created successfully!",
        updated: "Tally updated successfully!",
        deleted: "Tally deleted successfully!",
    };

    fn collection(ids: &CollectionIds) -> &str {
        &ids.tally
    }

    fn to_draft(&self) -> TallyDraft {
        TallyDraft {
            games: self.games.as_str().to_owned(),
            gold: self.gold.to_string(),
            silver: self.silver.to_string(),
            bronze: self.bronze.to_string(),
        }
    }

    fn from_draft(draft: &TallyDraft) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();
        let games = errors.parse::<Sport>("games", &draft.games);
        let gold = medals(&mut errors, "gold", &draft.gold);
        let silver = medals(&mut errors, "silver", &draft.silver);
        let bronze = medals(&mut errors, "bronze", &draft.bronze);
        let row = games
            .zip(gold)
            .zip(silver.zip(bronze))
            .map(|((games, gold), (silver, bronze))| Self {
                games,
                gold,
                silver,
                bronze,
            });
        errors.finish(row)
    }

    fn options() -> serde_json::Value {
        json!({ "sports": options::<Sport>() })
    }
}
