use pb_core::PbError;
use pb_project::ProjectError;
use thiserror::Error;

pub type EditorResult<T> = Result<T, EditorError>;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Invalid grid size {size}: must be a finite value of at least 1")]
    InvalidGridSize { size: f64 },

    #[error("Configuration error: {what}")]
    Config { what: String },

    #[error("Project error: {0}")]
    Project(#[from] ProjectError),

    #[error("Core error: {0}")]
    Core(#[from] PbError),
}
