use olympics_cms_database::DocumentId;

use super::{Resource, ResourceForm, ResourceList};
use crate::error::ViewError;

impl<R: Resource> ResourceForm<R> {
    /// Copies the listed record `id` into the draft and switches to update mode.
    ///
    /// If the list doesn't hold `id` the form is left in create mode.
    pub fn begin_edit(&mut self, list: &ResourceList<R>, id: &DocumentId) -> Result<(), ViewError> {
        let record = list.find(id).ok_or(ViewError::EditTargetMissing)?;
        self.draft = record.data.to_draft();
        self.edit_target = Some(record.id.clone());
        Ok(())
    }
}
