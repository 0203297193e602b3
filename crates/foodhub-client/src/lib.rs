//! Client-side session and data-fetch layer for the FoodHub marketplace.
//!
//! The REST backend owns accounts, meals and providers. This crate talks to
//! it, keeps the signed-in session in local storage, and derives the listing
//! views the storefront shows.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

pub use auth::session::{SessionEvent, SessionRepository, SessionStore};
pub use error::{ClientError, ClientResult};
pub use services::api::ApiClient;
