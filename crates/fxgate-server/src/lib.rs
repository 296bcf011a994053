//! REST API server: routes, bearer authentication, DTOs, incident log, and OpenAPI documentation.

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod incident;
pub mod openapi;
pub mod routes;
pub mod state;
