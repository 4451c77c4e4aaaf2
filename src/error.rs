use thiserror::Error;

/// Returned when calling an [`InplaceFunction`](crate::InplaceFunction) that
/// holds no target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("call of an empty inplace function")]
pub struct EmptyFunctionError;
