use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{program} not found! Make sure QEMU is installed and in your PATH.")]
    ToolNotFound { program: String },

    #[error("{program} failed ({status}): {stderr}")]
    ToolExecution {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("Invalid folder: {0}")]
    InvalidFolder(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl Error {
    pub fn is_tool_not_found(&self) -> bool {
        matches!(self, Error::ToolNotFound { .. })
    }
}
