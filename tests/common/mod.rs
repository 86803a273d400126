//! Utilidades compartidas por los tests con base de datos.
//!
//! Requieren `DATABASE_URL` apuntando a un PostgreSQL de pruebas.

#![allow(dead_code)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::sync::atomic::{AtomicU32, Ordering};

use vehicle_rental::config::DatabaseConfig;
use vehicle_rental::database::DatabaseConnection;
use vehicle_rental::models::vehicle::AvailabilityStatus;

static SEQUENCE: AtomicU32 = AtomicU32::new(0);

/// Sufijo único entre procesos y dentro del proceso
pub fn unique_suffix() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!(
        "{}-{}-{}",
        std::process::id(),
        nanos,
        SEQUENCE.fetch_add(1, Ordering::SeqCst)
    )
}

pub async fn setup_pool() -> PgPool {
    let url = std::env::var("DATABASE_URL").unwrap();
    let connection = DatabaseConnection::new(&DatabaseConfig::with_url(url, 10))
        .await
        .unwrap();
    connection.pool().clone()
}

pub async fn insert_user(pool: &PgPool, role: &str) -> i32 {
    let suffix = unique_suffix();
    let (id,): (i32,) = sqlx::query_as(
        r#"
        INSERT INTO users (name, email, password, phone, role)
        VALUES ($1, $2, 'hashed', '000000', $3::user_role)
        RETURNING id
        "#,
    )
    .bind(format!("User {}", suffix))
    .bind(format!("user-{}@test.local", suffix))
    .bind(role)
    .fetch_one(pool)
    .await
    .unwrap();
    id
}

pub async fn insert_vehicle(pool: &PgPool, daily_rate: Decimal) -> i32 {
    let suffix = unique_suffix();
    let (id,): (i32,) = sqlx::query_as(
        r#"
        INSERT INTO vehicles (vehicle_name, type, registration_number, daily_rent_price)
        VALUES ($1, 'car', $2, $3)
        RETURNING id
        "#,
    )
    .bind(format!("Vehicle {}", suffix))
    .bind(format!("REG-{}", suffix))
    .bind(daily_rate)
    .fetch_one(pool)
    .await
    .unwrap();
    id
}

pub async fn vehicle_status(pool: &PgPool, vehicle_id: i32) -> AvailabilityStatus {
    let (status,): (AvailabilityStatus,) =
        sqlx::query_as("SELECT availability_status FROM vehicles WHERE id = $1")
            .bind(vehicle_id)
            .fetch_one(pool)
            .await
            .unwrap();
    status
}

pub async fn booking_count(pool: &PgPool, vehicle_id: i32) -> i64 {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM bookings WHERE vehicle_id = $1")
        .bind(vehicle_id)
        .fetch_one(pool)
        .await
        .unwrap();
    count
}

pub fn day(offset: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 1, 1).unwrap() + chrono::Duration::days(offset)
}
