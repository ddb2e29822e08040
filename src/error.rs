use thiserror::Error;

/// Errors surfaced by the tracer.
///
/// Geometric edge cases (a ray missing a sphere, a ray parallel to a plane, a
/// shape whose transform cannot be inverted) are not errors; they produce
/// empty intersection lists. Everything else, from shading without a light to
/// an unreadable scene file, ends up here.
#[derive(Debug, Error)]
pub enum TracerError {
    #[error("transform matrix is not invertible")]
    NonInvertible,

    #[error("world has no light source to shade with")]
    MissingLight,

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed scene description: {0}")]
    Scene(#[from] serde_json::Error),

    #[error("invalid scene: {0}")]
    InvalidScene(String),
}

pub type Result<T> = std::result::Result<T, TracerError>;
