use std::error::Error as StdError;

use thiserror::Error;

type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Failure raised by a score or roster backend.
///
/// Backends never produce anything else: deciding whether an absent row is a
/// client mistake belongs to the service layer.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("{context}")]
    Backend {
        context: String,
        #[source]
        source: BoxError,
    },
    #[error("{context}: lock poisoned")]
    Poisoned { context: String },
    /// A uniqueness rule of the store rejected the write.
    #[error("{context}: already exists")]
    Conflict { context: String },
    #[error("{operation} is not supported by a read-only store")]
    ReadOnly { operation: &'static str },
}

impl StorageError {
    pub fn backend<E>(context: impl Into<String>, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::Backend {
            context: context.into(),
            source: Box::new(source),
        }
    }

    pub fn poisoned(context: impl Into<String>) -> Self {
        Self::Poisoned {
            context: context.into(),
        }
    }

    pub fn conflict(context: impl Into<String>) -> Self {
        Self::Conflict {
            context: context.into(),
        }
    }
}

/// Error returned by the score and roster services.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request referenced something invalid; safe to show to the client.
    #[error("{0}")]
    Validation(String),
    #[error("{operation} failed")]
    Storage {
        operation: String,
        #[source]
        source: StorageError,
    },
}

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Build the context message for a failed storage operation
pub fn storage_context(operation: &str, key: &str) -> String {
    format!("Failed to {} for key: {}", operation, key)
}

/// Wrap a backend result with storage context
pub trait StorageContext<T> {
    fn storage_context(self, context: impl Into<String>) -> Result<T, StorageError>;

    fn with_storage_context<F>(self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce() -> String;
}

impl<T, E> StorageContext<T> for Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn storage_context(self, context: impl Into<String>) -> Result<T, StorageError> {
        self.map_err(|e| StorageError::backend(context, e))
    }

    fn with_storage_context<F>(self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| StorageError::backend(f(), e))
    }
}

/// Wrap a storage result with the name of the service operation that issued it
pub trait ServiceContext<T> {
    fn during(self, operation: impl Into<String>) -> Result<T, ServiceError>;
}

impl<T> ServiceContext<T> for Result<T, StorageError> {
    fn during(self, operation: impl Into<String>) -> Result<T, ServiceError> {
        self.map_err(|source| ServiceError::Storage {
            operation: operation.into(),
            source,
        })
    }
}

/// Render an error and its whole `source()` chain on one line.
pub fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut rendered = err.to_string();
    let mut current = err.source();
    while let Some(cause) = current {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        current = cause.source();
    }
    rendered
}
