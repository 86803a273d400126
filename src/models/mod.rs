//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL.

pub mod auth;
pub mod booking;
pub mod vehicle;

pub use auth::{Principal, UserRole};
pub use booking::{Booking, BookingListItem, BookingStatus, BookingWithVehicle};
pub use vehicle::{AvailabilityStatus, Vehicle, VehicleAvailability, VehiclePatch, VehicleType};
