use crate::config::ConfigError;
use crate::eligibility::EligibilityError;
use crate::schedule::DoseHistoryError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Eligibility(EligibilityError),
    DoseHistory(DoseHistoryError),
    InvalidInput(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Eligibility(err) => write!(f, "eligibility error: {}", err),
            AppError::DoseHistory(err) => write!(f, "dose history error: {}", err),
            AppError::InvalidInput(detail) => write!(f, "invalid input: {}", detail),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Eligibility(err) => Some(err),
            AppError::DoseHistory(err) => Some(err),
            AppError::InvalidInput(_) => None,
        }
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Eligibility(EligibilityError::Age(_))
            | AppError::DoseHistory(_)
            | AppError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Eligibility(EligibilityError::Config(_))
            | AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<EligibilityError> for AppError {
    fn from(value: EligibilityError) -> Self {
        Self::Eligibility(value)
    }
}

impl From<DoseHistoryError> for AppError {
    fn from(value: DoseHistoryError) -> Self {
        Self::DoseHistory(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eligibility::AgeError;
    use crate::program::ProgramConfigError;

    #[test]
    fn input_errors_map_to_unprocessable() {
        let age = AppError::from(EligibilityError::Age(AgeError::InvalidDate {
            value: "tomorrow".to_string(),
        }));
        assert_eq!(age.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let doses = AppError::from(DoseHistoryError::InvalidDoseNumber(7));
        assert_eq!(doses.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(doses.to_string().contains("dose number 7"));
    }

    #[test]
    fn broken_program_config_is_a_server_fault() {
        let err = AppError::from(EligibilityError::Config(ProgramConfigError::ZeroDoseInterval));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
