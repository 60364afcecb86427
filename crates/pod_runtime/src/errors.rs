//! Error types for the value runtime and dictionary.

use thiserror::Error;

use crate::core::dict::KEY_MAX_LEN;
use crate::core::value::Value;

/// Failures of value-level operations.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ValueError {
    #[error("shape `{shape}` has no copy support")]
    NotCopyable { shape: &'static str },
}

/// Failures of dictionary operations. The container is left unchanged
/// whenever one of these is returned.
#[derive(Debug, Error)]
pub enum DictError {
    #[error("key is {len} bytes, limit is {}", KEY_MAX_LEN)]
    KeyTooLong { len: usize },

    #[error("duplicate key `{key}`")]
    DuplicateKey { key: String },

    #[error(transparent)]
    Value(#[from] ValueError),

    /// An ownership-transfer insert was rejected; the value travels back to
    /// the caller instead of being destroyed.
    #[error("insert rejected: {reason}")]
    Rejected { value: Value, reason: Box<DictError> },
}

impl DictError {
    /// Recover the value from a rejected transfer, if this error carries one.
    pub fn into_value(self) -> Option<Value> {
        match self {
            DictError::Rejected { value, .. } => Some(value),
            _ => None,
        }
    }
}
