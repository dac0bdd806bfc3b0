//! Validation gate for the add dialog.
//!
//! Runs before any store call; a rejected input never reaches the synchronizer.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Item name should contain only letters and spaces.")]
    InvalidName,

    #[error("Quantity should be a positive whole number.")]
    InvalidQuantity,
}

/// Input that passed the gate, ready for `InventorySync::add_item`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub quantity: u32,
}

/// Check raw dialog input. The name is checked first.
///
/// - name: one or more ASCII letters or whitespace characters, kept as typed;
/// - quantity: trimmed, then an integer in `1..=u32::MAX`.
pub fn validate_new_item(name: &str, quantity: &str) -> Result<NewItem, ValidationError> {
    let name_ok = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c.is_whitespace());
    if !name_ok {
        return Err(ValidationError::InvalidName);
    }

    let quantity = match quantity.trim().parse::<u32>() {
        Ok(n) if n > 0 => n,
        _ => return Err(ValidationError::InvalidQuantity),
    };

    Ok(NewItem {
        name: name.to_string(),
        quantity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_letters_and_spaces() {
        let item = validate_new_item("green beans", "3").unwrap();
        assert_eq!(item, NewItem { name: "green beans".into(), quantity: 3 });

        let item = validate_new_item("Rice", " 12 ").unwrap();
        assert_eq!(item.quantity, 12);
    }

    #[test]
    fn rejects_bad_names() {
        for name in ["", "apple2", "salt & pepper", "café", "jam-jar"] {
            assert_eq!(
                validate_new_item(name, "1"),
                Err(ValidationError::InvalidName),
                "name {name:?}"
            );
        }
    }

    #[test]
    fn rejects_bad_quantities() {
        for qty in ["", "0", "-1", "2.5", "abc", "99999999999"] {
            assert_eq!(
                validate_new_item("apple", qty),
                Err(ValidationError::InvalidQuantity),
                "quantity {qty:?}"
            );
        }
    }

    #[test]
    fn name_error_wins() {
        assert_eq!(validate_new_item("42", "0"), Err(ValidationError::InvalidName));
    }

    #[test]
    fn messages() {
        assert_eq!(
            ValidationError::InvalidName.to_string(),
            "Item name should contain only letters and spaces."
        );
        assert_eq!(
            ValidationError::InvalidQuantity.to_string(),
            "Quantity should be a positive whole number."
        );
    }
}
