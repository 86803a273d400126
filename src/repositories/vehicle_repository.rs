use crate::models::vehicle::{AvailabilityStatus, NewVehicle, Vehicle, VehicleAvailability, VehiclePatch};
use crate::utils::errors::AppError;
use sqlx::{PgPool, Postgres, Transaction};

/// Acceso a la tabla vehicles.
///
/// Las operaciones que reciben una `Transaction` pertenecen al motor de reservas:
/// la disponibilidad solo se modifica dentro de su transacción.
#[derive(Clone)]
pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lectura simple de tarifa y disponibilidad
    pub async fn find_availability(&self, id: i32) -> Result<Option<VehicleAvailability>, AppError> {
        let vehicle = sqlx::query_as::<_, VehicleAvailability>(
            r#"
            SELECT id, vehicle_name, daily_rent_price, availability_status
            FROM vehicles
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vehicle)
    }

    /// Igual que `find_availability` pero bloqueando la fila hasta el commit
    pub async fn lock_availability(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: i32,
    ) -> Result<Option<VehicleAvailability>, AppError> {
        let vehicle = sqlx::query_as::<_, VehicleAvailability>(
            r#"
            SELECT id, vehicle_name, daily_rent_price, availability_status
            FROM vehicles
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(vehicle)
    }

    pub async fn set_availability(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: i32,
        status: AvailabilityStatus,
    ) -> Result<VehicleAvailability, AppError> {
        let vehicle = sqlx::query_as::<_, VehicleAvailability>(
            r#"
            UPDATE vehicles
            SET availability_status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, vehicle_name, daily_rent_price, availability_status
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Vehicle {} not found", id)))?;

        Ok(vehicle)
    }

    pub async fn create(&self, vehicle: &NewVehicle) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (vehicle_name, type, registration_number, daily_rent_price, availability_status)
            VALUES ($1, $2, $3, $4, 'available')
            RETURNING *
            "#,
        )
        .bind(&vehicle.vehicle_name)
        .bind(vehicle.vehicle_type)
        .bind(&vehicle.registration_number)
        .bind(vehicle.daily_rent_price)
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    pub async fn list_all(&self) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(vehicles)
    }

    pub async fn registration_exists(&self, registration_number: &str) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM vehicles WHERE registration_number = $1)",
        )
        .bind(registration_number)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    /// Aplica un patch con forma fija: los campos ausentes conservan su valor
    pub async fn update(&self, id: i32, patch: &VehiclePatch) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET vehicle_name = COALESCE($2, vehicle_name),
                type = COALESCE($3, type),
                registration_number = COALESCE($4, registration_number),
                daily_rent_price = COALESCE($5, daily_rent_price),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.vehicle_name.as_deref())
        .bind(patch.vehicle_type)
        .bind(patch.registration_number.as_deref())
        .bind(patch.daily_rent_price)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vehicle)
    }

    /// Borra el vehículo si ninguna reserva lo referencia.
    ///
    /// Devuelve `false` si el vehículo no existe.
    pub async fn delete_unbooked(&self, id: i32) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        if self.lock_availability(&mut tx, id).await?.is_none() {
            return Ok(false);
        }

        let (has_active, has_history): (bool, bool) = sqlx::query_as(
            r#"
            SELECT
                EXISTS(SELECT 1 FROM bookings WHERE vehicle_id = $1 AND status = 'active'),
                EXISTS(SELECT 1 FROM bookings WHERE vehicle_id = $1)
            "#,
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        if has_active {
            return Err(AppError::Conflict(
                "Cannot delete vehicle with active bookings. Please complete or cancel all active bookings first."
                    .to_string(),
            ));
        }

        // Las reservas no se borran nunca: un vehículo con historial se conserva
        if has_history {
            return Err(AppError::Conflict(
                "Cannot delete vehicle with booking history".to_string(),
            ));
        }

        sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }
}
