pub mod config;
pub mod dtos;
pub mod handlers;
pub mod services;
pub mod session;
pub mod startup;
