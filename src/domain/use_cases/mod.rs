use crate::errors::AppError;

pub mod projects;
pub mod seed;
pub mod skills;

/// Logs unexpected store failures once, at the use-case boundary.
pub(crate) fn log_store_error(operation: &str, err: AppError) -> AppError {
    if let AppError::StoreError(msg) = &err {
        tracing::error!("Failed to {}: {}", operation, msg);
    }
    err
}
