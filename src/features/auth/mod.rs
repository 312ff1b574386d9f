pub mod dto;
pub mod guards;
pub mod handler;
pub mod model;
pub mod routes;
pub mod validator;

pub use validator::JwtValidator;
