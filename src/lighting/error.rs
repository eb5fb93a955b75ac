use thiserror::Error;

/// Errors that prevent coefficients from being computed.
///
/// All of these are setup-time precondition failures; none are retried.
#[derive(Debug, Error)]
pub enum LightingError {
    #[error("Quadrature resolution must be at least 1x1, got {theta}x{phi}")]
    InvalidResolution { theta: usize, phi: usize },

    #[error("At least one worker thread is required")]
    NoWorkers,

    #[error("Mesh has no vertices to light")]
    EmptyMesh,

    #[error("Environment produced a non-finite coefficient at basis index {index}")]
    NonFiniteCoefficient { index: usize },

    #[error("A projection worker panicked")]
    WorkerPanicked,
}
