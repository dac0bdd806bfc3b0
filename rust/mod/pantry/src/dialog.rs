//! The "add item" dialog.
//!
//! Two states: `Closed` and `Open(form)`.
//! - open: any state → `Open` with empty fields;
//! - cancel: → `Closed`;
//! - submit with valid input: → `Closed`, yields the validated item;
//! - submit with invalid input: stays `Open`, message stored on the form.
//!
//! Edits and submits on a closed dialog do nothing.

use crate::validate::{validate_new_item, NewItem, ValidationError};

/// Field values of an open dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddForm {
    pub name: String,
    pub quantity: String,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AddDialog {
    #[default]
    Closed,
    Open(AddForm),
}

impl AddDialog {
    pub fn open(&mut self) {
        *self = AddDialog::Open(AddForm::default());
    }

    pub fn cancel(&mut self) {
        *self = AddDialog::Closed;
    }

    pub fn is_open(&self) -> bool {
        matches!(self, AddDialog::Open(_))
    }

    pub fn form(&self) -> Option<&AddForm> {
        match self {
            AddDialog::Open(form) => Some(form),
            AddDialog::Closed => None,
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        if let AddDialog::Open(form) = self {
            form.name = name.into();
        }
    }

    pub fn set_quantity(&mut self, quantity: impl Into<String>) {
        if let AddDialog::Open(form) = self {
            form.quantity = quantity.into();
        }
    }

    /// Validate the form.
    ///
    /// `Ok(None)` if the dialog is closed. On success the dialog closes
    /// (dropping its fields) and the item is returned. On failure the
    /// dialog stays open with the message in `form.error`.
    pub fn submit(&mut self) -> Result<Option<NewItem>, ValidationError> {
        let form = match self {
            AddDialog::Open(form) => form,
            AddDialog::Closed => return Ok(None),
        };

        match validate_new_item(&form.name, &form.quantity) {
            Ok(item) => {
                *self = AddDialog::Closed;
                Ok(Some(item))
            }
            Err(e) => {
                form.error = Some(e.to_string());
                Err(e)
            }
        }
    }
}
