use crate::dto::api_response::ApiResponse;
use crate::dto::booking_dto::{CreateBookingRequest, UpdateBookingStatusRequest};
use crate::models::auth::Principal;
use crate::models::booking::{BookingListItem, BookingStatus, BookingWithVehicle};
use crate::services::authorization_service::parse_requested_status;
use crate::services::booking_query_service::BookingQueryService;
use crate::services::booking_service::{BookingService, CreateBookingCommand};
use crate::utils::errors::{forbidden_error, AppError};
use sqlx::PgPool;
use validator::Validate;

pub struct BookingController {
    engine: BookingService,
    queries: BookingQueryService,
}

impl BookingController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            engine: BookingService::new(pool.clone()),
            queries: BookingQueryService::new(pool),
        }
    }

    pub async fn create(
        &self,
        principal: &Principal,
        request: CreateBookingRequest,
    ) -> Result<ApiResponse<BookingWithVehicle>, AppError> {
        request.validate()?;

        let customer_id = resolve_customer_id(principal, request.customer_id)?;

        let booking = self
            .engine
            .create_booking(CreateBookingCommand {
                customer_id,
                vehicle_id: request.vehicle_id,
                rent_start_date: request.rent_start_date,
                rent_end_date: request.rent_end_date,
            })
            .await?;

        Ok(ApiResponse::success_with_message(
            booking,
            "Booking created successfully",
        ))
    }

    pub async fn list(
        &self,
        principal: &Principal,
    ) -> Result<ApiResponse<Vec<BookingListItem>>, AppError> {
        let bookings = self.queries.list_bookings(principal).await?;

        let message = if principal.is_admin() {
            "Bookings retrieved successfully"
        } else {
            "Your bookings retrieved successfully"
        };

        Ok(ApiResponse::success_with_message(bookings, message))
    }

    pub async fn update_status(
        &self,
        principal: &Principal,
        booking_id: i32,
        request: UpdateBookingStatusRequest,
    ) -> Result<ApiResponse<BookingWithVehicle>, AppError> {
        request.validate()?;

        let requested = parse_requested_status(&request.status)?;
        let booking = self
            .engine
            .transition_booking(booking_id, requested, principal)
            .await?;

        let message = match booking.booking.status {
            BookingStatus::Cancelled => "Booking cancelled successfully",
            _ => "Booking marked as returned. Vehicle is now available",
        };

        Ok(ApiResponse::success_with_message(booking, message))
    }
}

/// Un cliente solo reserva para sí mismo; un admin puede reservar para cualquiera
fn resolve_customer_id(principal: &Principal, requested: Option<i32>) -> Result<i32, AppError> {
    match requested {
        None => Ok(principal.id),
        Some(id) if id == principal.id || principal.is_admin() => Ok(id),
        Some(_) => Err(forbidden_error(
            "create booking",
            "customers can only book for themselves",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_customer_defaults_to_principal() {
        assert_eq!(resolve_customer_id(&Principal::customer(4), None).unwrap(), 4);
        assert_eq!(resolve_customer_id(&Principal::admin(1), None).unwrap(), 1);
    }

    #[test]
    fn test_customer_cannot_book_for_someone_else() {
        let result = resolve_customer_id(&Principal::customer(4), Some(9));
        assert!(matches!(result, Err(AppError::Forbidden(_))));
        assert_eq!(resolve_customer_id(&Principal::customer(4), Some(4)).unwrap(), 4);
    }

    #[test]
    fn test_admin_books_on_behalf_of_customer() {
        assert_eq!(resolve_customer_id(&Principal::admin(1), Some(9)).unwrap(), 9);
    }
}
