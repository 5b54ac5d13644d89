//! Request handlers: shape checks, persistence calls, status-code mapping.

pub mod categorias;
pub mod login;
pub mod produtos;
