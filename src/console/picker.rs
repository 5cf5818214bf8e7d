use uuid::Uuid;

use crate::console::category_index::CategoryIndex;
use crate::console::selection::{CategorySelection, SelectedCategory};

/// Screens of the two-step category picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickerState {
    #[default]
    Closed,
    /// Browsing top-level categories
    TopLevel,
    /// Browsing the children of a top-level category
    Children { parent_id: Uuid },
}

/// Result of a picker action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickOutcome {
    /// Category added to the selection, picker closed
    Added,
    /// Category was already selected, nothing changed
    AlreadySelected,
    /// Moved to the child screen of the chosen category
    Descended,
    /// Action not valid for the current screen or category
    Ignored,
}

#[derive(Debug, Clone, Default)]
pub struct CategoryPicker {
    state: PickerState,
}

impl CategoryPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PickerState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != PickerState::Closed
    }

    pub fn open(&mut self) {
        self.state = PickerState::TopLevel;
    }

    pub fn close(&mut self) {
        self.state = PickerState::Closed;
    }

    /// Child screen back to top-level browse
    pub fn back(&mut self) -> bool {
        match self.state {
            PickerState::Children { .. } => {
                self.state = PickerState::TopLevel;
                true
            }
            _ => false,
        }
    }

    /// Pick a top-level category. Leaves are added directly, parents open their child screen.
    pub fn choose_top_level(
        &mut self,
        index: &CategoryIndex,
        selection: &mut CategorySelection,
        category_id: Uuid,
    ) -> PickOutcome {
        if self.state != PickerState::TopLevel || !index.is_top_level(category_id) {
            return PickOutcome::Ignored;
        }

        if index.has_children(category_id) {
            self.state = PickerState::Children {
                parent_id: category_id,
            };
            return PickOutcome::Descended;
        }

        self.add(index, selection, category_id)
    }

    /// On the child screen, add the parent category itself
    pub fn choose_parent_only(
        &mut self,
        index: &CategoryIndex,
        selection: &mut CategorySelection,
    ) -> PickOutcome {
        match self.state {
            PickerState::Children { parent_id } => self.add(index, selection, parent_id),
            _ => PickOutcome::Ignored,
        }
    }

    /// On the child screen, add one specific child
    pub fn choose_child(
        &mut self,
        index: &CategoryIndex,
        selection: &mut CategorySelection,
        child_id: Uuid,
    ) -> PickOutcome {
        let PickerState::Children { parent_id } = self.state else {
            return PickOutcome::Ignored;
        };

        let is_child = index
            .get(child_id)
            .is_some_and(|c| c.parent_id == Some(parent_id));
        if !is_child {
            return PickOutcome::Ignored;
        }

        self.add(index, selection, child_id)
    }

    fn add(
        &mut self,
        index: &CategoryIndex,
        selection: &mut CategorySelection,
        category_id: Uuid,
    ) -> PickOutcome {
        let Some(category) = index.get(category_id) else {
            return PickOutcome::Ignored;
        };

        if selection.add(SelectedCategory::from(category)) {
            self.close();
            PickOutcome::Added
        } else {
            PickOutcome::AlreadySelected
        }
    }
}
