/// Errors surfaced by the catalog.
///
/// Data-store failures never carry driver detail: they are logged where they
/// happen and collapse into [`CatalogError::Internal`].
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("invalid {field} -> {value}")]
    Validation { field: String, value: String },

    #[error("missing parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("internal error")]
    Internal,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl CatalogError {
    pub(crate) fn validation(field: &str, value: &str) -> Self {
        CatalogError::Validation {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    /// HTTP-equivalent status for the boundary layer.
    pub fn status_code(&self) -> u16 {
        match self {
            CatalogError::Validation { .. }
            | CatalogError::MissingParameter(_)
            | CatalogError::InvalidArgument(_) => 400,
            CatalogError::NotFound(_) => 404,
            CatalogError::Conflict(_) => 409,
            _ => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
