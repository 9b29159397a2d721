//! Database access layer (enabled with the `database` feature)

pub mod norm_repository;

pub use norm_repository::NormRepository;
