use olympics_cms_config::CollectionIds;
use olympics_cms_database::models::{options, Athlete, Choice as _, MedalType};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{FieldErrors, Messages, Resource};

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct AthleteDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub discipline: String,
    /// Checkbox, only posted when ticked.
    #[serde(default)]
    pub is_out: Option<String>,
    #[serde(default)]
    pub medal_type: String,
}

impl Resource for Athlete {
    type Draft = AthleteDraft;

    const CREATE_TITLE: &'static str = "Upload Athlete Details";
    const EDIT_TITLE: &'static str = "Edit Athlete Details";
    const KIND: &'static str = "athletes";
    const MESSAGES: Messages = Messages {
        fetch_failed: "Failed to fetch athletes",
        save_failed: "Error occurred while saving athlete details",
        delete_failed: "Failed to delete athlete",
        created: "Athlete details uploaded successfully!",
        updated: "Athlete details updated successfully!",
        deleted: "Athlete deleted successfully!",
    };

    fn collection(ids: &CollectionIds) -> &str {
        &ids.athletes
    }

    fn to_draft(&self) -> AthleteDraft {
        AthleteDraft {
            name: self.name.clone(),
            image: self.image.clone(),
            discipline: self.discipline.clone(),
            is_out: self.is_out.then(|| "on".to_owned()),
            medal_type: self.medal_type.as_str().to_owned(),
        }
    }

    fn from_draft(draft: &AthleteDraft) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();
        let name = errors.required("name", &draft.name);
        let image = errors.required("image", &draft.image);
        let discipline = errors.required("discipline", &draft.discipline);
        let medal_type = errors.parse::<MedalType>("medal_type", &draft.medal_type);
        let athlete = medal_type.map(|medal_type| Self {
            name,
            image,
            discipline,
            is_out: draft.is_out.is_some(),
            medal_type,
        });
        errors.finish(athlete)
    }

    fn options() -> serde_json::Value {
        json!({ "medal_types": options::<MedalType>() })
    }
}
