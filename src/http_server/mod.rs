//! # Student HTTP Server Module
//!
//! REST surface of the student service.
//!
//! # Endpoints
//!
//! - `GET /` - Liveness text
//! - `GET /health` - Health check
//! - `POST /students` - Create (201, 400, 409, 500)
//! - `GET /students` - List (200, 500)
//! - `PUT /students/{id}` - Update (200, 400, 404, 409, 500)
//! - `DELETE /students/{id}` - Delete (200, 404, 500)

pub mod config;
pub mod errors;
pub mod health_routes;
pub mod server;
pub mod service;
pub mod student_routes;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse, Operation};
pub use server::HttpServer;
pub use service::{MessageResponse, StudentService};
