use thiserror::Error;

/// Convenient result alias for the EV routing library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when the adjacency matrix input is not square.
    #[error("adjacency matrix must be square: read {values} values over {rows} rows")]
    NonSquareMatrix { rows: usize, values: usize },

    /// Raised when a matrix entry cannot be parsed as a non-negative distance.
    #[error("invalid matrix entry '{value}': {message}")]
    InvalidMatrixEntry { value: String, message: String },

    /// Raised when a node identifier falls outside the grid.
    #[error("node {node} is out of range for a grid of {nodes} nodes")]
    NodeOutOfRange { node: usize, nodes: usize },

    /// Raised when vehicle parameters fail validation.
    #[error("invalid vehicle parameters: {message}")]
    VehicleValidation { message: String },

    /// Raised when no feasible route exists between two nodes. Covers both an
    /// unreachable destination and the case where every remaining path is
    /// battery-infeasible: the search cannot tell them apart once all frontier
    /// candidates are exhausted.
    #[error("no feasible route from {start} to {goal} for vehicle {vehicle}")]
    RouteNotFound {
        vehicle: u32,
        start: usize,
        goal: usize,
    },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
