//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Índice parcial que garantiza una sola reserva activa por vehículo
pub const ACTIVE_BOOKING_CONSTRAINT: &str = "bookings_one_active_per_vehicle";

/// Restricción UNIQUE de la matrícula
pub const REGISTRATION_CONSTRAINT: &str = "vehicles_registration_number_key";

/// Clave foránea de la reserva hacia su cliente
pub const BOOKING_CUSTOMER_FK: &str = "bookings_customer_id_fkey";

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid payload: {0}")]
    InvalidPayload(#[from] validator::ValidationErrors),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> Self {
        let constraint = error
            .as_database_error()
            .and_then(|db| db.constraint())
            .map(str::to_owned);

        match constraint.as_deref() {
            Some(ACTIVE_BOOKING_CONSTRAINT) => {
                AppError::Conflict("Vehicle is not available for booking".to_string())
            }
            Some(REGISTRATION_CONSTRAINT) => {
                AppError::Conflict("Registration number is already registered".to_string())
            }
            Some(BOOKING_CUSTOMER_FK) => AppError::NotFound("Customer not found".to_string()),
            _ => AppError::Database(error),
        }
    }
}

/// Cuerpo JSON mal formado o con tipos incorrectos
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Parámetro de ruta que no se puede interpretar (p. ej. id no numérico)
impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl AppError {
    /// Código HTTP asociado a cada variante
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) | AppError::InvalidPayload(_) | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) | AppError::InvalidTransition(_) => StatusCode::CONFLICT,
        }
    }

    /// Código estable que consumen los clientes
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Database(_) => "DB_ERROR",
            AppError::Validation(_) | AppError::InvalidPayload(_) => "VALIDATION_ERROR",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::InvalidTransition(_) => "INVALID_TRANSITION",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    code: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();

        let (error, message, details) = match self {
            AppError::Database(e) => {
                tracing::error!("❌ Database error: {}", e);
                (
                    "Database Error",
                    "An error occurred while accessing the database".to_string(),
                    None,
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("❌ Internal error: {}", msg);
                (
                    "Internal Server Error",
                    "An unexpected error occurred".to_string(),
                    None,
                )
            }
            AppError::InvalidPayload(e) => {
                tracing::warn!("⚠️ Invalid payload: {}", e);
                (
                    "Validation Error",
                    "The provided data is invalid".to_string(),
                    Some(json!(e)),
                )
            }
            AppError::Validation(msg) => {
                tracing::warn!("⚠️ Validation error: {}", msg);
                ("Validation Error", msg, None)
            }
            AppError::Unauthorized(msg) => {
                tracing::warn!("🔒 Unauthorized access: {}", msg);
                ("Unauthorized", msg, None)
            }
            AppError::Forbidden(msg) => {
                tracing::warn!("🔒 Forbidden access: {}", msg);
                ("Forbidden", msg, None)
            }
            AppError::NotFound(msg) => {
                tracing::debug!("🔍 Resource not found: {}", msg);
                ("Not Found", msg, None)
            }
            AppError::Conflict(msg) => {
                tracing::warn!("⚠️ Conflict: {}", msg);
                ("Conflict", msg, None)
            }
            AppError::InvalidTransition(msg) => {
                tracing::warn!("⚠️ Invalid transition: {}", msg);
                ("Invalid Transition", msg, None)
            }
            AppError::BadRequest(msg) => {
                tracing::warn!("⚠️ Bad request: {}", msg);
                ("Bad Request", msg, None)
            }
        };

        let body = ErrorResponse {
            success: false,
            error: error.to_string(),
            message,
            details,
            code,
        };

        (status, Json(body)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: i32) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

/// Función helper para crear errores de acceso prohibido
pub fn forbidden_error(operation: &str, reason: &str) -> AppError {
    AppError::Forbidden(format!("Cannot {}: {}", operation, reason))
}
