//! Front-end neutral screen model.
//!
//! Front ends (terminal, Flutter) draw this model; they never read screen
//! state directly.

use crate::model::note::{Note, NoteId};

pub const INPUT_PLACEHOLDER: &str = "Enter your note";
pub const ADD_LABEL: &str = "Add Note";
pub const DELETE_LABEL: &str = "Delete";
pub const EMPTY_NOTE_ALERT_TITLE: &str = "Error";
pub const EMPTY_NOTE_ALERT_MESSAGE: &str = "Note cannot be empty";

/// Blocking user-facing alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    /// Alert shown when the draft is blank.
    pub fn empty_note() -> Self {
        Self {
            title: EMPTY_NOTE_ALERT_TITLE.to_string(),
            message: EMPTY_NOTE_ALERT_MESSAGE.to_string(),
        }
    }
}

/// Text input bound to the draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputField {
    pub value: String,
    /// Shown while `value` is empty.
    pub placeholder: String,
}

/// One list row with its delete trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRow {
    /// Id passed back to `delete` when the row trigger fires.
    pub id: NoteId,
    pub text: String,
    pub delete_label: String,
}

/// Everything needed to draw the notes screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenModel {
    pub input: InputField,
    pub add_label: String,
    /// Rows in insertion order.
    pub rows: Vec<NoteRow>,
}

impl ScreenModel {
    /// Builds the model from screen state.
    pub fn build(draft: &str, notes: &[Note]) -> Self {
        Self {
            input: InputField {
                value: draft.to_string(),
                placeholder: INPUT_PLACEHOLDER.to_string(),
            },
            add_label: ADD_LABEL.to_string(),
            rows: notes
                .iter()
                .map(|note| NoteRow {
                    id: note.id.clone(),
                    text: note.text.clone(),
                    delete_label: DELETE_LABEL.to_string(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ScreenModel, ADD_LABEL, DELETE_LABEL, INPUT_PLACEHOLDER};
    use crate::model::note::Note;

    #[test]
    fn build_binds_draft_and_rows_in_order() {
        let notes = vec![
            Note::try_new("1", "first").expect("fixture note should be valid"),
            Note::try_new("2", "second").expect("fixture note should be valid"),
        ];
        let model = ScreenModel::build("typing", &notes);

        assert_eq!(model.input.value, "typing");
        assert_eq!(model.input.placeholder, INPUT_PLACEHOLDER);
        assert_eq!(model.add_label, ADD_LABEL);
        let ids = model.rows.iter().map(|row| row.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["1", "2"]);
        assert!(model.rows.iter().all(|row| row.delete_label == DELETE_LABEL));
    }
}
