//! Click-to-edit field state machine.
//!
//! Report editors show a value, switch to an input on click, and either
//! confirm or cancel. Every field type shares this one implementation.

use serde::{Deserialize, Serialize};

/// Edit state of a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "draft", rename_all = "lowercase")]
pub enum EditState<T> {
    /// Showing the committed value
    Viewing,
    /// Input open with an uncommitted draft
    Editing(T),
}

/// Errors from edit transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    /// Transition requires an open edit
    #[error("field is not being edited")]
    NotEditing,
}

/// A value with a click-to-edit lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditableField<T> {
    value: T,
    state: EditState<T>,
}

impl<T: Clone> EditableField<T> {
    /// Create a field showing `value`.
    pub fn new(value: T) -> Self {
        Self {
            value,
            state: EditState::Viewing,
        }
    }

    /// Committed value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Current draft, if editing.
    pub fn draft(&self) -> Option<&T> {
        match &self.state {
            EditState::Editing(draft) => Some(draft),
            EditState::Viewing => None,
        }
    }

    /// Whether an edit is open.
    pub fn is_editing(&self) -> bool {
        matches!(self.state, EditState::Editing(_))
    }

    /// Open an edit seeded with the committed value. Keeps an existing draft.
    pub fn begin_edit(&mut self) {
        if let EditState::Viewing = self.state {
            self.state = EditState::Editing(self.value.clone());
        }
    }

    /// Replace the draft.
    pub fn set_draft(&mut self, draft: T) -> Result<(), EditError> {
        match &mut self.state {
            EditState::Editing(current) => {
                *current = draft;
                Ok(())
            }
            EditState::Viewing => Err(EditError::NotEditing),
        }
    }

    /// Store the draft as the value and notify `on_change` once.
    pub fn commit<F>(&mut self, on_change: F) -> Result<&T, EditError>
    where
        F: FnOnce(&T),
    {
        match std::mem::replace(&mut self.state, EditState::Viewing) {
            EditState::Editing(draft) => {
                self.value = draft;
                on_change(&self.value);
                Ok(&self.value)
            }
            EditState::Viewing => Err(EditError::NotEditing),
        }
    }

    /// Close the edit and discard the draft.
    pub fn cancel(&mut self) {
        self.state = EditState::Viewing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_fires_on_change_once() {
        let mut field = EditableField::new("R-13".to_string());
        field.begin_edit();
        assert_eq!(field.draft().map(String::as_str), Some("R-13"));

        field.set_draft("R-38".to_string()).unwrap();
        let mut changes = Vec::new();
        let committed = field.commit(|v| changes.push(v.clone())).unwrap().clone();

        assert_eq!(committed, "R-38");
        assert_eq!(field.value(), "R-38");
        assert_eq!(changes, vec!["R-38".to_string()]);
        assert!(!field.is_editing());
    }

    #[test]
    fn test_cancel_discards_draft_without_notifying() {
        let mut field = EditableField::new(72u32);
        field.begin_edit();
        field.set_draft(68).unwrap();
        field.cancel();

        assert_eq!(*field.value(), 72);
        assert!(field.draft().is_none());

        let mut fired = false;
        assert_eq!(field.commit(|_| fired = true), Err(EditError::NotEditing));
        assert!(!fired);
    }

    #[test]
    fn test_set_draft_requires_edit() {
        let mut field = EditableField::new(1.5f64);
        assert_eq!(field.set_draft(2.0), Err(EditError::NotEditing));
    }

    #[test]
    fn test_begin_edit_keeps_existing_draft() {
        let mut field = EditableField::new(vec!["attic".to_string()]);
        field.begin_edit();
        field.set_draft(vec!["attic".to_string(), "crawlspace".to_string()]).unwrap();
        field.begin_edit();
        assert_eq!(field.draft().map(Vec::len), Some(2));
    }
}
