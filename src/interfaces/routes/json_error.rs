use actix_web::{error::JsonPayloadError, web};

use crate::errors::AppError;

/// Malformed bodies and wrong field types surface as `invalid_input` errors.
pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        tracing::debug!("Rejected JSON body: {}", err);
        AppError::from(err).into()
    }));
}

impl From<JsonPayloadError> for AppError {
    fn from(err: JsonPayloadError) -> Self {
        match err {
            JsonPayloadError::Deserialize(e) => AppError::InvalidInput(format!("JSON error: {}", e)),
            JsonPayloadError::ContentType => {
                AppError::InvalidInput("Expected a JSON body (Content-Type: application/json)".into())
            }
            other => AppError::InvalidInput(format!("JSON payload error: {}", other)),
        }
    }
}
