use std::io;




/**
 * Errors raised at the outer boundary of the crate: reading or writing a grid
 * description, parsing user input, or attaching a communicator to a
 * decomposition. Geometric computations inside the core never fail; their
 * preconditions are asserted instead.
 */
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to encode grid description: {0}")]
    Encode(String),

    #[error("failed to decode grid description: {0}")]
    Decode(String),

    #[error("expected {expected} components, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("invalid periodic axis {axis} for a {dimension}-dimensional grid")]
    InvalidPeriodicAxis { axis: usize, dimension: usize },

    #[error("cannot parse multi-index from '{0}'")]
    ParseMultiIndex(String),

    #[error("invalid grid description: {0}")]
    InvalidDescription(String),

    #[error("communicator has {found} ranks but the decomposition was built for {expected}")]
    SizeMismatch { expected: usize, found: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
