pub mod dto;
pub mod error;
pub mod handlers;
mod number;
pub mod openapi;
pub mod problem;
pub mod routes;
