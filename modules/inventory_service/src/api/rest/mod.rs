//! REST API layer

pub mod auth;
pub mod dto;
pub mod error;
pub mod export;
pub mod handlers;
pub mod mapper;
pub mod routes;
