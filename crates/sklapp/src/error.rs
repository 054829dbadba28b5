use crate::model::RecordId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SklError {
    #[error("Record not found: {0}")]
    RecordNotFound(RecordId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("{0}")]
    Validation(String),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Invalid value for {field}: {value:?}")]
    InvalidValue { field: String, value: String },

    #[error("Text assist failed: {0}")]
    Assist(String),

    #[error("A text assist request is already in progress")]
    AssistBusy,

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, SklError>;
