use crate::models::booking::{Booking, BookingListRow, BookingStatus, NewBooking};
use crate::utils::errors::AppError;
use sqlx::{PgPool, Postgres, Transaction};

#[derive(Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booking: &NewBooking,
    ) -> Result<Booking, AppError> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (customer_id, vehicle_id, rent_start_date, rent_end_date, total_price, status)
            VALUES ($1, $2, $3, $4, $5, 'active')
            RETURNING *
            "#,
        )
        .bind(booking.customer_id)
        .bind(booking.vehicle_id)
        .bind(booking.rent_start_date)
        .bind(booking.rent_end_date)
        .bind(booking.total_price)
        .fetch_one(&mut **tx)
        .await?;

        Ok(booking)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Booking>, AppError> {
        let booking = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(booking)
    }

    /// Lee la reserva bloqueando su fila hasta el final de la transacción
    pub async fn lock_by_id(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: i32,
    ) -> Result<Option<Booking>, AppError> {
        let booking = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?;

        Ok(booking)
    }

    pub async fn update_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: i32,
        status: BookingStatus,
    ) -> Result<Booking, AppError> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_one(&mut **tx)
        .await?;

        Ok(booking)
    }

    /// Listado con cliente y vehículo, más recientes primero.
    ///
    /// `customer_id = None` devuelve todas las reservas.
    pub async fn list_with_details(&self, customer_id: Option<i32>) -> Result<Vec<BookingListRow>, AppError> {
        let rows = sqlx::query_as::<_, BookingListRow>(
            r#"
            SELECT
                b.id,
                b.customer_id,
                b.vehicle_id,
                b.rent_start_date,
                b.rent_end_date,
                b.total_price,
                b.status,
                b.created_at,
                u.name AS customer_name,
                u.email AS customer_email,
                v.vehicle_name,
                v.registration_number,
                v.type AS vehicle_type
            FROM bookings b
            JOIN users u ON b.customer_id = u.id
            JOIN vehicles v ON b.vehicle_id = v.id
            WHERE ($1::INTEGER IS NULL OR b.customer_id = $1)
            ORDER BY b.created_at DESC, b.id DESC
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn count_active_for_vehicle(&self, vehicle_id: i32) -> Result<i64, AppError> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM bookings WHERE vehicle_id = $1 AND status = 'active'",
        )
        .bind(vehicle_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
