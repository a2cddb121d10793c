//! Core rdash library (domain model, mock data, review service, config).

pub mod auth;
pub mod config;
pub mod logging;
pub mod project;
pub mod request;
pub mod review;
pub mod seed;
pub mod stats;
pub mod status;
pub mod store;
pub mod token;
