use thiserror::Error;

pub type QuoteResult<T> = Result<T, QuoteError>;

#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed template: {0}")]
    MalformedTemplate(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Order parsing error: {0}")]
    Order(String),
}

impl QuoteError {
    /// Short machine-readable name of the error kind (used by the HTTP API)
    pub fn kind(&self) -> &'static str {
        match self {
            QuoteError::Io(_) => "io",
            QuoteError::MalformedTemplate(_) => "malformed_template",
            QuoteError::InvalidData(_) => "invalid_data",
            QuoteError::Layout(_) => "layout",
            QuoteError::Order(_) => "order",
        }
    }

    /// True when the template file itself could not be found
    pub fn is_not_found(&self) -> bool {
        matches!(self, QuoteError::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}

impl From<serde_yaml::Error> for QuoteError {
    fn from(e: serde_yaml::Error) -> Self {
        QuoteError::Order(e.to_string())
    }
}

impl From<serde_json::Error> for QuoteError {
    fn from(e: serde_json::Error) -> Self {
        QuoteError::Order(e.to_string())
    }
}
