use std::{error, fmt};

/// Error enumerates over all possible errors that this package
/// shall return.
#[derive(Debug, Clone, PartialEq)]
pub enum Error<K> {
    /// Caller error, an ordered query or delete-min/delete-max invoked
    /// on an empty tree. Carries the name of the operation.
    EmptyTree(&'static str),
    /// Caller error, `select(k)` with `k` not in `[0, len)`. Carries
    /// `(k, len)`.
    SelectOutOfRange(usize, usize),
    /// Returned by create() API when key is already present.
    OverwriteKey,
    /// Fatal case, root node is red after a top-level call returned.
    RedRoot,
    /// Fatal case, a red link leaning right, below the key.
    RightLeaningRed(K),
    /// Fatal case, two consecutive left-leaning reds, below the key.
    ConsecutiveReds(K),
    /// Fatal case, breaking the perfect black balance. The String
    /// component of this variant can be used for debugging.
    UnbalancedBlacks(String),
    /// Fatal case, index entries are not in sort-order.
    SortError(K, K),
    /// Fatal case, (key, stored-size, counted-size) for a node whose
    /// subtree size is stale.
    SizeMismatch(K, usize, usize),
}

impl<K> Error<K> {
    /// Whether this error is a caller error, as opposed to a corrupted
    /// tree detected by `validate()`.
    pub fn is_precondition(&self) -> bool {
        match self {
            Error::EmptyTree(_) | Error::SelectOutOfRange(_, _) => true,
            Error::OverwriteKey => true,
            _ => false,
        }
    }
}

impl<K> fmt::Display for Error<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::EmptyTree(op) => write!(f, "{}() on empty tree", op),
            Error::SelectOutOfRange(k, n) => {
                write!(f, "select({}) out of range, len {}", k, n)
            }
            Error::OverwriteKey => write!(f, "key already present"),
            Error::RedRoot => write!(f, "root node is red"),
            Error::RightLeaningRed(key) => {
                write!(f, "right leaning red link below {:?}", key)
            }
            Error::ConsecutiveReds(key) => {
                write!(f, "consecutive red links below {:?}", key)
            }
            Error::UnbalancedBlacks(msg) => write!(f, "unbalanced blacks {}", msg),
            Error::SortError(a, b) => write!(f, "sort error {:?} vs {:?}", a, b),
            Error::SizeMismatch(key, have, want) => write!(
                f,
                "size mismatch at {:?} stored {} counted {}",
                key, have, want
            ),
        }
    }
}

impl<K> error::Error for Error<K> where K: fmt::Debug {}
