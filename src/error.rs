use thiserror::Error;

/// Structural validation failures raised by the codec. Both variants
/// indicate a caller bug or corrupted data upstream, never a transient
/// condition, so they are not meant to be retried.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SszError {
    /// A byte-sequence field's runtime length disagrees with the length
    /// declared in the record's field table
    #[error("{record}.{field} is {actual} bytes, expected {expected}")]
    FieldLengthMismatch {
        record: &'static str,
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Decode input length disagrees with the record's declared total size
    #[error("{record} input is {actual} bytes, expected exactly {expected}")]
    InputSizeMismatch {
        record: &'static str,
        expected: usize,
        actual: usize,
    },
}
