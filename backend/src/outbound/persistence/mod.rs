//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports, backed by
//! PostgreSQL through `diesel-async` and a `bb8` connection pool.
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types. Ownership checks and view assembly live in the domain.
//! - **Internal models**: row structs (`models.rs`) and the table
//!   definitions (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: pool and Diesel failures are mapped onto the
//!   port error types through `RepositoryError`.
//!
//! # Example
//!
//! ```ignore
//! use foodgram::outbound::persistence::{DbPool, DieselRecipeRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/foodgram")).await?;
//! let recipes = DieselRecipeRepository::new(pool);
//! ```

mod diesel_catalogue_repository;
mod diesel_error_mapping;
pub(crate) mod diesel_helpers;
mod diesel_recipe_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_catalogue_repository::DieselCatalogueRepository;
pub use diesel_recipe_repository::DieselRecipeRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
