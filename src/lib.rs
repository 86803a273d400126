//! Servicio de alquiler de vehículos
//!
//! Reservas con disponibilidad de vehículos consistente bajo concurrencia.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
