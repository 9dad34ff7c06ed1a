//! REST client module for the hosted dictionary service.
//!
//! This module provides the `EntityService` trait (the contract the cache
//! consumes) and `ApiClient`, its HTTP implementation speaking PostgREST
//! data endpoints and GoTrue auth endpoints with bearer-token auth.

pub mod client;
pub mod error;
pub mod service;

pub use client::{ApiClient, UserIdentity};
pub use error::ApiError;
pub use service::EntityService;
