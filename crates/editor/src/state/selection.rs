use shared::ObjectId;

/// Single-object selection state
#[derive(Default, Debug)]
pub struct SelectionState {
    selected: Option<ObjectId>,
    /// Version counter for selection changes
    version: u64,
}

impl SelectionState {
    /// Currently selected object
    pub fn primary(&self) -> Option<&ObjectId> {
        self.selected.as_ref()
    }

    /// Check if an object is selected
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_deref() == Some(id)
    }

    /// Select a single object (replaces previous selection)
    pub fn select(&mut self, id: ObjectId) {
        if self.selected.as_ref() != Some(&id) {
            self.selected = Some(id);
            self.version += 1;
        }
    }

    /// Clear selection. Returns true if something was selected.
    pub fn clear(&mut self) -> bool {
        let had = self.selected.take().is_some();
        if had {
            self.version += 1;
        }
        had
    }

    /// Clear the selection only if it points at `id`
    pub fn deselect(&mut self, id: &str) -> bool {
        if self.is_selected(id) {
            self.clear()
        } else {
            false
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}
