use crate::record::Field;
use crate::staged::StagedError;

/// Errors raised by form operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// The operation needs a selected entry and none is selected.
    #[error("no entry selected")]
    NoSelection,
    /// The field text does not parse to the field's type.
    #[error("invalid {field} {input:?}: {reason}")]
    InvalidInput {
        field: Field,
        input: String,
        reason: String,
    },
    /// An amount cell does not hold a non-negative whole number.
    #[error("invalid amount {0:?}")]
    InvalidAmount(String),
    /// The field is not part of this table's form.
    #[error("{table} have no {field} field")]
    NoSuchField { table: &'static str, field: Field },
    /// An item name that does not exist in the ingredient catalog.
    #[error("unknown item: {0}")]
    UnknownItem(String),
    /// An ingredient/product row index outside the selected recipe's rows.
    #[error("row {row} out of range for length {len}")]
    RowOutOfRange { row: usize, len: usize },
    #[error(transparent)]
    Staged(#[from] StagedError),
}

/// Result type for form operations.
pub type FormResult<T = ()> = Result<T, FormError>;

impl FormError {
    /// Returns the `(field label, raw input)` pair for input validation
    /// failures, which hosts typically surface as "Invalid input".
    pub fn rejected_input(&self) -> Option<(&'static str, &str)> {
        match self {
            FormError::InvalidInput { field, input, .. } => Some((field.label(), input)),
            FormError::InvalidAmount(input) => Some(("amount", input)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(FormError::NoSelection.to_string(), "no entry selected");
        assert_eq!(
            FormError::InvalidInput {
                field: Field::Id,
                input: "x".into(),
                reason: "expected a number".into(),
            }
            .to_string(),
            "invalid id \"x\": expected a number"
        );
        assert_eq!(
            FormError::NoSuchField {
                table: "Ingredients",
                field: Field::Duration
            }
            .to_string(),
            "Ingredients have no duration field"
        );
        assert_eq!(
            FormError::from(StagedError::ValueNotFound).to_string(),
            "value not found"
        );
    }

    #[test]
    fn rejected_input_only_for_validation_errors() {
        assert_eq!(
            FormError::InvalidAmount("-2".into()).rejected_input(),
            Some(("amount", "-2"))
        );
        assert_eq!(FormError::NoSelection.rejected_input(), None);
    }
}
