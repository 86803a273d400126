//! Modelo de Booking
//!
//! Reservas, su máquina de estados y las proyecciones que devuelve la API.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use std::fmt;
use std::str::FromStr;

use super::vehicle::{AvailabilityStatus, VehicleType};

/// Estado de la reserva - mapea al ENUM booking_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Active,
    Cancelled,
    Returned,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 3] = [
        BookingStatus::Active,
        BookingStatus::Cancelled,
        BookingStatus::Returned,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Active => "active",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Returned => "returned",
        }
    }

    /// `cancelled` y `returned` no admiten más transiciones
    pub fn is_terminal(&self) -> bool {
        !matches!(self, BookingStatus::Active)
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(BookingStatus::Active),
            "cancelled" => Ok(BookingStatus::Cancelled),
            "returned" => Ok(BookingStatus::Returned),
            other => Err(format!("Unknown booking status '{}'", other)),
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Booking principal - mapea exactamente a la tabla bookings
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Booking {
    pub id: i32,
    pub customer_id: i32,
    pub vehicle_id: i32,
    pub rent_start_date: NaiveDate,
    pub rent_end_date: NaiveDate,
    pub total_price: Decimal,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Datos que necesita el motor para insertar una reserva
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub customer_id: i32,
    pub vehicle_id: i32,
    pub rent_start_date: NaiveDate,
    pub rent_end_date: NaiveDate,
    pub total_price: Decimal,
}

/// Resumen del vehículo adjunto a una reserva creada o actualizada
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BookedVehicleSummary {
    pub vehicle_name: String,
    pub daily_rent_price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_status: Option<AvailabilityStatus>,
}

/// Reserva junto con la instantánea del vehículo
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BookingWithVehicle {
    #[serde(flatten)]
    pub booking: Booking,
    pub vehicle: BookedVehicleSummary,
}

/// Fila plana del listado (reserva + cliente + vehículo)
#[derive(Debug, Clone, FromRow)]
pub struct BookingListRow {
    pub id: i32,
    pub customer_id: i32,
    pub vehicle_id: i32,
    pub rent_start_date: NaiveDate,
    pub rent_end_date: NaiveDate,
    pub total_price: Decimal,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub customer_name: String,
    pub customer_email: String,
    pub vehicle_name: String,
    pub registration_number: String,
    pub vehicle_type: VehicleType,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CustomerSummary {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VehicleSummary {
    pub vehicle_name: String,
    pub registration_number: String,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
}

/// Elemento del listado de reservas
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BookingListItem {
    pub id: i32,
    pub customer_id: i32,
    pub vehicle_id: i32,
    pub rent_start_date: NaiveDate,
    pub rent_end_date: NaiveDate,
    pub total_price: Decimal,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub customer: CustomerSummary,
    pub vehicle: VehicleSummary,
}

impl From<BookingListRow> for BookingListItem {
    fn from(row: BookingListRow) -> Self {
        Self {
            id: row.id,
            customer_id: row.customer_id,
            vehicle_id: row.vehicle_id,
            rent_start_date: row.rent_start_date,
            rent_end_date: row.rent_end_date,
            total_price: row.total_price,
            status: row.status,
            created_at: row.created_at,
            customer: CustomerSummary {
                name: row.customer_name,
                email: row.customer_email,
            },
            vehicle: VehicleSummary {
                vehicle_name: row.vehicle_name,
                registration_number: row.registration_number,
                vehicle_type: row.vehicle_type,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parsing_rejects_unknown_values() {
        assert_eq!("cancelled".parse::<BookingStatus>(), Ok(BookingStatus::Cancelled));
        assert_eq!("returned".parse::<BookingStatus>(), Ok(BookingStatus::Returned));
        assert!("completed".parse::<BookingStatus>().is_err());
        assert!("".parse::<BookingStatus>().is_err());
    }

    #[test]
    fn test_only_active_is_not_terminal() {
        assert!(!BookingStatus::Active.is_terminal());
        assert!(BookingStatus::Cancelled.is_terminal());
        assert!(BookingStatus::Returned.is_terminal());
    }

    #[test]
    fn test_list_row_is_nested_for_api() {
        let now = Utc::now();
        let row = BookingListRow {
            id: 1,
            customer_id: 2,
            vehicle_id: 3,
            rent_start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            rent_end_date: NaiveDate::from_ymd_opt(2025, 1, 4).unwrap(),
            total_price: Decimal::new(150, 0),
            status: BookingStatus::Active,
            created_at: now,
            customer_name: "Ana".to_string(),
            customer_email: "ana@example.com".to_string(),
            vehicle_name: "Corolla".to_string(),
            registration_number: "ABC-123".to_string(),
            vehicle_type: VehicleType::Car,
        };

        let item = BookingListItem::from(row);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["customer"]["email"], "ana@example.com");
        assert_eq!(json["vehicle"]["type"], "car");
        assert_eq!(json["status"], "active");
    }
}
