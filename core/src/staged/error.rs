/// Error type for staged sequence operations.
///
/// Every operation that can fail validates its arguments before touching
/// either buffer, so a returned error means the sequence is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StagedError {
    /// The index is outside the valid range of the working buffer.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    /// No element equal to the requested value exists.
    #[error("value not found")]
    ValueNotFound,
}

/// Result type for staged sequence operations.
pub type StagedResult<T = ()> = Result<T, StagedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            StagedError::IndexOutOfRange { index: 5, len: 3 }.to_string(),
            "index 5 out of range for length 3"
        );
        assert_eq!(StagedError::ValueNotFound.to_string(), "value not found");
    }
}
