use thiserror::Error;

// === StoreError ===

/// The data store is unreachable or rejected a statement.
///
/// Always fatal to the current request; never converted into a flash message.
#[derive(Debug, Error)]
#[error("Store error: {0}")]
pub struct StoreError(#[from] pub rusqlite::Error);

// === LinkError ===

/// Coarse classification of a [`LinkError`], inspected by the request router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Store,
}

/// Errors raised by the group and bookmark services.
///
/// The message carried by `Validation`, `NotFound` and `Conflict` is shown to the
/// user verbatim.
#[derive(Debug, Error)]
pub enum LinkError {
    /// Required input is missing or malformed.
    #[error("{0}")]
    Validation(String),
    /// A referenced identifier does not resolve.
    #[error("{0}")]
    NotFound(String),
    /// The operation would break name uniqueness or group emptiness rules.
    #[error("{0}")]
    Conflict(String),
    /// The underlying store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LinkError {
    pub fn validation(msg: impl Into<String>) -> Self {
        LinkError::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        LinkError::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        LinkError::Conflict(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            LinkError::Validation(_) => ErrorKind::Validation,
            LinkError::NotFound(_) => ErrorKind::NotFound,
            LinkError::Conflict(_) => ErrorKind::Conflict,
            LinkError::Store(_) => ErrorKind::Store,
        }
    }

    /// True for errors the user can correct; these become flash messages.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, LinkError::Store(_))
    }
}

impl From<rusqlite::Error> for LinkError {
    fn from(e: rusqlite::Error) -> Self {
        LinkError::Store(StoreError(e))
    }
}

// === RenderError ===

/// Errors raised while rendering a page section.
#[derive(Debug, Error)]
pub enum RenderError {
    /// No template is registered under the given name.
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),
    /// The view model could not be turned into a template context.
    #[error("Template context error: {0}")]
    Context(#[from] serde_json::Error),
}

// === FatalError ===

/// Failures that abort a request and surface as a generic error page.
#[derive(Debug, Error)]
pub enum FatalError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

// === ConfigError ===

/// Errors related to loading the application configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The config file is not valid JSON for `AppConfig`.
    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// A field holds a value the application cannot run with.
    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}
