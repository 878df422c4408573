//! student-records - student CRUD service, client layer and screen controllers
//!
//! - `store`: record persistence with uniqueness and required-field checks
//! - `http_server`: REST endpoints over a store
//! - `client`: typed HTTP access to the endpoints and postal-code lookup
//! - `ui`: form and list controllers driven through the client layer

pub mod cli;
pub mod client;
pub mod config;
pub mod http_server;
pub mod model;
pub mod store;
pub mod ui;
