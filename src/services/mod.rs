//! Servicios de negocio
//!
//! Motor de reservas, consultas, reglas de transición y precios.

pub mod authorization_service;
pub mod booking_query_service;
pub mod booking_service;
pub mod pricing_service;
