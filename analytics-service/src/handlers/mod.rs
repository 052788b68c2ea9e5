//! HTTP handlers for the analytics service.

pub mod analyze;
pub mod health;
