//! Motor de reservas
//!
//! Crea reservas y aplica transiciones de estado. Cada operación que cambia el
//! estado de una reserva modifica la disponibilidad del vehículo en la misma
//! transacción: o se aplican las dos escrituras o ninguna.

use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::models::auth::Principal;
use crate::models::booking::{BookedVehicleSummary, BookingStatus, BookingWithVehicle, NewBooking};
use crate::models::vehicle::AvailabilityStatus;
use crate::repositories::booking_repository::BookingRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::authorization_service::authorize_transition;
use crate::services::pricing_service::{calculate_total_price, rental_days};
use crate::utils::errors::{not_found_error, AppError, AppResult};

/// Intención de reserva ya autenticada y validada por la capa HTTP
#[derive(Debug, Clone)]
pub struct CreateBookingCommand {
    pub customer_id: i32,
    pub vehicle_id: i32,
    pub rent_start_date: NaiveDate,
    pub rent_end_date: NaiveDate,
}

#[derive(Clone)]
pub struct BookingService {
    pool: PgPool,
    bookings: BookingRepository,
    vehicles: VehicleRepository,
}

impl BookingService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            bookings: BookingRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool.clone()),
            pool,
        }
    }

    /// Crea una reserva `active` y marca el vehículo como `booked`.
    pub async fn create_booking(&self, command: CreateBookingCommand) -> AppResult<BookingWithVehicle> {
        // El rango se valida antes de abrir la transacción
        rental_days(command.rent_start_date, command.rent_end_date)?;

        let mut tx = self.pool.begin().await?;

        let vehicle = self
            .vehicles
            .lock_availability(&mut tx, command.vehicle_id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", command.vehicle_id))?;

        if !vehicle.is_available() {
            warn!(
                "⚠️ Vehículo {} no disponible ({}) para cliente {}",
                vehicle.id, vehicle.availability_status, command.customer_id
            );
            return Err(AppError::Conflict(
                "Vehicle is not available for booking".to_string(),
            ));
        }

        let total_price = calculate_total_price(
            vehicle.daily_rent_price,
            command.rent_start_date,
            command.rent_end_date,
        )?;

        let booking = self
            .bookings
            .insert(
                &mut tx,
                &NewBooking {
                    customer_id: command.customer_id,
                    vehicle_id: command.vehicle_id,
                    rent_start_date: command.rent_start_date,
                    rent_end_date: command.rent_end_date,
                    total_price,
                },
            )
            .await?;

        self.vehicles
            .set_availability(&mut tx, vehicle.id, AvailabilityStatus::Booked)
            .await?;

        tx.commit().await?;

        info!(
            "✅ Reserva {} creada: vehículo {} para cliente {} ({} → {}, total {})",
            booking.id,
            booking.vehicle_id,
            booking.customer_id,
            booking.rent_start_date,
            booking.rent_end_date,
            booking.total_price
        );

        Ok(BookingWithVehicle {
            booking,
            vehicle: BookedVehicleSummary {
                vehicle_name: vehicle.vehicle_name,
                daily_rent_price: vehicle.daily_rent_price,
                availability_status: None,
            },
        })
    }

    /// Aplica una transición de estado autorizada por rol.
    pub async fn transition_booking(
        &self,
        booking_id: i32,
        requested: BookingStatus,
        principal: &Principal,
    ) -> AppResult<BookingWithVehicle> {
        let mut tx = self.pool.begin().await?;

        // Orden de bloqueo: reserva y después vehículo
        let current = self
            .bookings
            .lock_by_id(&mut tx, booking_id)
            .await?
            .ok_or_else(|| not_found_error("Booking", booking_id))?;

        let next = authorize_transition(principal, current.customer_id, requested, current.status)
            .map_err(|e| {
                warn!(
                    "⚠️ Transición rechazada: reserva {} {} → {} por {} {}: {}",
                    booking_id, current.status, requested, principal.role, principal.id, e
                );
                e
            })?;

        let locked_vehicle = self
            .vehicles
            .lock_availability(&mut tx, current.vehicle_id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", current.vehicle_id))?;

        let booking = self.bookings.update_status(&mut tx, booking_id, next).await?;

        let vehicle = if next.is_terminal() {
            self.vehicles
                .set_availability(&mut tx, current.vehicle_id, AvailabilityStatus::Available)
                .await?
        } else {
            locked_vehicle
        };

        tx.commit().await?;

        info!(
            "✅ Reserva {} {} → {} por {} {}; vehículo {} ahora {}",
            booking.id,
            current.status,
            booking.status,
            principal.role,
            principal.id,
            vehicle.id,
            vehicle.availability_status
        );

        Ok(BookingWithVehicle {
            booking,
            vehicle: BookedVehicleSummary {
                vehicle_name: vehicle.vehicle_name,
                daily_rent_price: vehicle.daily_rent_price,
                availability_status: Some(vehicle.availability_status),
            },
        })
    }
}
