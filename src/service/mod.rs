//! Transport-agnostic persistence operations.

mod catalog;

pub use catalog::CatalogService;
