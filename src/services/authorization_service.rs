//! Reglas de autorización para transiciones de reservas
//!
//! Tabla `(rol, estado solicitado, estado actual) → permitir | denegar`.
//! Se evalúa siempre antes de tocar la base de datos.

use crate::models::auth::{Principal, UserRole};
use crate::models::booking::BookingStatus;
use crate::utils::errors::{AppError, AppResult};

/// Resultado de consultar la tabla de transiciones
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionDecision {
    Allow(BookingStatus),
    Forbidden(&'static str),
    Invalid(&'static str),
}

/// Consulta la tabla sin tener en cuenta la propiedad de la reserva.
pub fn transition_rule(
    role: UserRole,
    requested: BookingStatus,
    current: BookingStatus,
) -> TransitionDecision {
    use BookingStatus::*;
    use TransitionDecision::*;

    match (role, requested, current) {
        (UserRole::Customer, Cancelled, Active) => Allow(Cancelled),
        (UserRole::Customer, Cancelled, _) => Invalid("Only active bookings can be cancelled"),
        (UserRole::Customer, Returned, _) => Forbidden("Customers can only cancel bookings"),
        (UserRole::Customer, Active, _) => Forbidden("Customers can only cancel bookings"),

        (UserRole::Admin, Returned, Active) => Allow(Returned),
        (UserRole::Admin, Returned, _) => {
            Invalid("Only active bookings can be marked as returned")
        }
        (UserRole::Admin, Cancelled, Active) => Allow(Cancelled),
        (UserRole::Admin, Cancelled, _) => Invalid("Only active bookings can be cancelled"),
        (UserRole::Admin, Active, _) => Invalid("A booking cannot be moved back to active"),
    }
}

/// Autoriza una transición completa y devuelve el siguiente estado.
pub fn authorize_transition(
    principal: &Principal,
    booking_customer_id: i32,
    requested: BookingStatus,
    current: BookingStatus,
) -> AppResult<BookingStatus> {
    if principal.role == UserRole::Customer && principal.id != booking_customer_id {
        return Err(AppError::Forbidden(
            "You can only cancel your own bookings".to_string(),
        ));
    }

    match transition_rule(principal.role, requested, current) {
        TransitionDecision::Allow(next) => Ok(next),
        TransitionDecision::Forbidden(reason) => Err(AppError::Forbidden(reason.to_string())),
        TransitionDecision::Invalid(reason) => {
            Err(AppError::InvalidTransition(reason.to_string()))
        }
    }
}

/// Convierte el estado textual de la petición; un valor desconocido no es alcanzable.
pub fn parse_requested_status(raw: &str) -> AppResult<BookingStatus> {
    raw.trim()
        .parse::<BookingStatus>()
        .map_err(AppError::InvalidTransition)
}
