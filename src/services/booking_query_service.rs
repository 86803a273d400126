//! Consultas de reservas
//!
//! Proyección de lectura: reserva + cliente + vehículo, filtrada por rol.

use sqlx::PgPool;

use crate::models::auth::{Principal, UserRole};
use crate::models::booking::BookingListItem;
use crate::repositories::booking_repository::BookingRepository;
use crate::utils::errors::AppResult;

#[derive(Clone)]
pub struct BookingQueryService {
    bookings: BookingRepository,
}

impl BookingQueryService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            bookings: BookingRepository::new(pool),
        }
    }

    /// Un cliente solo ve sus reservas; un admin las ve todas.
    pub async fn list_bookings(&self, principal: &Principal) -> AppResult<Vec<BookingListItem>> {
        let rows = self
            .bookings
            .list_with_details(customer_scope(principal))
            .await?;

        tracing::debug!(
            "🔍 {} reservas para {} {}",
            rows.len(),
            principal.role,
            principal.id
        );

        Ok(rows.into_iter().map(BookingListItem::from).collect())
    }
}

/// Filtro de cliente que corresponde a un principal
pub fn customer_scope(principal: &Principal) -> Option<i32> {
    match principal.role {
        UserRole::Customer => Some(principal.id),
        UserRole::Admin => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_is_scoped_to_own_rows() {
        assert_eq!(customer_scope(&Principal::customer(5)), Some(5));
    }

    #[test]
    fn test_admin_sees_everything() {
        assert_eq!(customer_scope(&Principal::admin(1)), None);
    }
}
