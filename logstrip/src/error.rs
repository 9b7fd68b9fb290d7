//! Library error type.

use thiserror::Error;

use crate::cst::ParseError;
use crate::splice::SpliceError;

/// Errors that can occur during one transform call.
#[derive(Debug, Error)]
pub enum StripError {
    /// The source could not be parsed; the file's transform is aborted with
    /// no partial output.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The splice buffer rejected a removal. Reaching this indicates a bug
    /// in the traversal's pruning, which is supposed to keep removals
    /// disjoint by construction.
    #[error(transparent)]
    Splice(#[from] SpliceError),
}
