use olympics_cms_database::models::Record;
use olympics_cms_database::{Collection, DocumentId};
use tracing::{error, info};

use super::{FieldErrors, Resource, ResourceList};
use crate::error::ViewError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Creating,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submitted {
    Created,
    Updated,
}

impl Submitted {
    #[must_use]
    pub const fn message<R: Resource>(self) -> &'static str {
        match self {
            Self::Created => R::MESSAGES.created,
            Self::Updated => R::MESSAGES.updated,
        }
    }
}

/// The draft record of one entity and, when editing, the id it will update.
pub struct ResourceForm<R: Resource> {
    pub(super) draft: R::Draft,
    pub(super) edit_target: Option<DocumentId>,
    errors: FieldErrors,
}

impl<R: Resource> Default for ResourceForm<R> {
    fn default() -> Self {
        Self {
            draft: R::Draft::default(),
            edit_target: None,
            errors: FieldErrors::default(),
        }
    }
}

impl<R: Resource> ResourceForm<R> {
    /// A form holding what the browser posted.
    #[must_use]
    pub fn submitted(draft: R::Draft, edit_target: Option<DocumentId>) -> Self {
        Self {
            draft,
            edit_target,
            errors: FieldErrors::default(),
        }
    }

    #[must_use]
    pub const fn mode(&self) -> FormMode {
        if self.edit_target.is_some() {
            FormMode::Editing
        } else {
            FormMode::Creating
        }
    }

    #[must_use]
    pub const fn draft(&self) -> &R::Draft {
        &self.draft
    }

    #[must_use]
    pub const fn edit_target(&self) -> Option<&DocumentId> {
        self.edit_target.as_ref()
    }

    #[must_use]
    pub const fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self.mode() {
            FormMode::Creating => R::CREATE_TITLE,
            FormMode::Editing => R::EDIT_TITLE,
        }
    }

    /// Back to an empty draft in create mode. Already stored changes stay.
    pub fn cancel(&mut self) {
        *self = Self::default();
    }

    /// Writes the draft to the store and patches `list` with the result.
    ///
    /// On success the form is reset. On failure the draft is kept and the list
    /// is left untouched.
    pub async fn submit(
        &mut self,
        collection: &Collection<'_, R>,
        list: &mut ResourceList<R>,
    ) -> Result<Submitted, ViewError> {
        let data = match R::from_draft(&self.draft) {
            Ok(data) => data,
            Err(errors) => {
                self.errors = errors;
                return Err(ViewError::Invalid);
            }
        };
        self.errors = FieldErrors::default();
        let (result, submitted) = match &self.edit_target {
            None => (collection.create(&data).await, Submitted::Created),
            Some(id) => (collection.update(id, &data).await, Submitted::Updated),
        };
        let record: Record<R> = result.map_err(|err| {
            error!("saving to {} failed: {err}", collection.id());
            ViewError::Save(R::MESSAGES.save_failed)
        })?;
        info!("{:?} {} {}", submitted, R::KIND, record.id);
        match submitted {
            Submitted::Created => list.apply_created(record),
            Submitted::Updated => {
                list.apply_updated(record);
            }
        }
        self.cancel();
        Ok(submitted)
    }
}
