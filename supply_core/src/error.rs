use thiserror::Error;

#[derive(Debug, Error)]
pub enum SupplyError {
    #[error("Network error querying {query}: {source}")]
    Network {
        query: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Chain query {query} failed with status {status}: {message}")]
    ChainQuery {
        query: String,
        status: u16,
        message: String,
    },
    #[error("Account not found: {0}")]
    AccountNotFound(String),
    #[error("Failed to decode {context}: {message}")]
    Decode { context: String, message: String },
    #[error("Inconsistent chain state: {0}")]
    Inconsistent(String),
    #[error("Persistence error: {0}")]
    Persistence(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SupplyError {
    pub fn network(query: impl Into<String>, source: reqwest::Error) -> Self {
        SupplyError::Network {
            query: query.into(),
            source,
        }
    }

    pub fn decode(context: impl Into<String>, message: impl ToString) -> Self {
        SupplyError::Decode {
            context: context.into(),
            message: message.to_string(),
        }
    }
}

impl From<sled::Error> for SupplyError {
    fn from(err: sled::Error) -> Self {
        SupplyError::Persistence(err.to_string())
    }
}

pub type SupplyResult<T> = Result<T, SupplyError>;
