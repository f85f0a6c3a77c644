use thiserror::Error;

/// Errors surfaced by the build phase. The per-frame path never returns these;
/// it degrades in place instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SceneError {
    #[error("mesh has no position attribute")]
    MissingPositions,
    #[error("flat position buffer length {0} is not a multiple of 3")]
    RaggedPositions(usize),
    #[error("index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },
    #[error("reference transform is not invertible (det = {0})")]
    SingularTransform(f32),
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = std::result::Result<T, SceneError>;
