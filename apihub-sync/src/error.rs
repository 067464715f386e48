use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No SwaggerHub owner configured")]
    MissingOwner,

    #[error("SwaggerHub returned status {status} for {url}")]
    Catalog { status: u16, url: String },

    #[error("API hub returned status {status}: {message}")]
    Registry { status: u16, message: String },

    #[error("API hub operation failed with code {code}: {message}")]
    OperationFailed { code: i32, message: String },

    #[error("API hub operation {0} did not complete in time")]
    OperationTimeout(String),

    #[error("Invalid resource name: {0}")]
    InvalidResourceName(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl SyncError {
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::MissingOwner | Self::InvalidResourceName(_) => 3,
            Self::Catalog { .. } => 4,
            Self::Registry { .. } | Self::OperationFailed { .. } | Self::OperationTimeout(_) => 5,
            Self::Auth(_) => 6,
            Self::Io(_) | Self::Serialization(_) | Self::Http(_) => 10,
        }
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
