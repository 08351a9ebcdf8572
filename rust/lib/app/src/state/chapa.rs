//! Chapa form state: stored at `chapa/add` and `chapa/edit`.

use serde::{Deserialize, Serialize};

use crate::form::ChapaFields;

/// Which form a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormKind {
    Add,
    Edit,
}

impl FormKind {
    pub fn path(self) -> &'static str {
        match self {
            FormKind::Add => ChapaFormState::ADD_PATH,
            FormKind::Edit => ChapaFormState::EDIT_PATH,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapaFormState {
    pub id: String,
    pub fields: ChapaFields,
    pub busy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<String>,
    /// Operation finished; the screen should close.
    pub done: bool,
    /// A conversion created the retalho but the chapa delete failed.
    pub pending_delete: bool,
}

impl ChapaFormState {
    pub const ADD_PATH: &'static str = "chapa/add";
    pub const EDIT_PATH: &'static str = "chapa/edit";

    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Form is complete and both numbers parse; gates the save button.
    pub fn can_submit(&self) -> bool {
        !self.busy && self.fields.is_valid()
    }
}
