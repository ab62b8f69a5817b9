use thiserror::Error;

#[derive(Error, Debug)]
pub enum ActionError {
    #[error("{0}")]
    Input(String),

    #[error("{0}")]
    Output(String),

    #[error("{0}")]
    Context(String),

    #[error("Invalid action metadata: {0}")]
    Metadata(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ActionError {
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input(message.into())
    }

    pub fn output(message: impl Into<String>) -> Self {
        Self::Output(message.into())
    }

    pub fn context(message: impl Into<String>) -> Self {
        Self::Context(message.into())
    }
}

pub type Result<T> = std::result::Result<T, ActionError>;
