use crate::core::schema::FieldType;
use crate::core::value::{TrackerValue, split_list};
use crate::core::value_path::ValuePath;
use regex::Regex;

/// What a leaf click asks to edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTarget {
    pub path: ValuePath,
    pub key: String,
    pub field_type: FieldType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveEdit {
    pub path: ValuePath,
    pub key: String,
    pub field_type: FieldType,
    pub buffer: String,
    /// Display value at open time, restored on cancel.
    pub original: String,
}

impl ActiveEdit {
    /// Buffer after normalization and type coercion, ready to be written.
    pub fn committed_value(&self) -> TrackerValue {
        let cleaned = normalize_edited_value(&self.key, &self.buffer);
        coerce_value(&self.field_type, &cleaned)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    Opened,
    /// The same path is already being edited.
    AlreadyOpen,
    /// A different editor is open; the caller must commit it first.
    Busy,
}

#[derive(Debug, Clone, Default)]
pub enum EditState {
    #[default]
    Idle,
    Editing(ActiveEdit),
}

/// Single-editor state machine. Committing and cancelling are the caller's
/// work on the `ActiveEdit` handed back by `finish`/`cancel`; the session is
/// already idle by then, so no render can observe a half-closed editor.
#[derive(Debug, Clone, Default)]
pub struct EditSession {
    state: EditState,
    refresh_deferred: bool,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, EditState::Editing(_))
    }

    pub fn active(&self) -> Option<&ActiveEdit> {
        match &self.state {
            EditState::Editing(edit) => Some(edit),
            EditState::Idle => None,
        }
    }

    pub fn open(&mut self, target: EditTarget, original: String) -> OpenOutcome {
        if let EditState::Editing(edit) = &self.state {
            return if edit.path == target.path {
                OpenOutcome::AlreadyOpen
            } else {
                OpenOutcome::Busy
            };
        }
        tracing::debug!(path = %target.path, "edit opened");
        self.state = EditState::Editing(ActiveEdit {
            path: target.path,
            key: target.key,
            field_type: target.field_type,
            buffer: original.clone(),
            original,
        });
        OpenOutcome::Opened
    }

    pub fn set_buffer(&mut self, text: impl Into<String>) -> bool {
        match &mut self.state {
            EditState::Editing(edit) => {
                edit.buffer = text.into();
                true
            }
            EditState::Idle => false,
        }
    }

    /// Leaves `Editing` for a commit.
    pub fn finish(&mut self) -> Option<ActiveEdit> {
        self.take()
    }

    /// Leaves `Editing` without writing.
    pub fn cancel(&mut self) -> Option<ActiveEdit> {
        self.take()
    }

    /// Records that a refresh was skipped because an editor was open.
    pub fn defer_refresh(&mut self) {
        self.refresh_deferred = true;
    }

    /// Returns the deferred refresh at most once, and only once idle.
    pub fn take_deferred_refresh(&mut self) -> bool {
        if self.is_editing() {
            return false;
        }
        std::mem::take(&mut self.refresh_deferred)
    }

    fn take(&mut self) -> Option<ActiveEdit> {
        match std::mem::take(&mut self.state) {
            EditState::Editing(edit) => Some(edit),
            EditState::Idle => None,
        }
    }
}

/// Trims the input and strips a leading `"<key>:"` restatement
/// (case-insensitive), e.g. `"HP: 12"` for key `HP` becomes `"12"`.
pub fn normalize_edited_value(key: &str, raw: &str) -> String {
    let value = raw.trim();
    let key = key.trim();
    if key.is_empty() {
        return value.to_string();
    }
    let pattern = format!(r"(?i)^\s*{}\s*:\s*", regex::escape(key));
    match Regex::new(&pattern) {
        Ok(prefix) => prefix.replace(value, "").trim().to_string(),
        Err(_) => value.to_string(),
    }
}

/// `ARRAY` splits on `;`, trimming and dropping blanks; every other type
/// stays a string.
pub fn coerce_value(field_type: &FieldType, raw: &str) -> TrackerValue {
    let value = raw.trim();
    match field_type {
        FieldType::Array => TrackerValue::string_list(split_list(value)),
        _ => TrackerValue::text(value),
    }
}
