pub type MeshyResult<T> = Result<T, MeshyError>;

#[derive(thiserror::Error, Debug)]
pub enum MeshyError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("document error: {0}")]
    Document(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MeshyError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn document(msg: impl Into<String>) -> Self {
        Self::Document(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}
