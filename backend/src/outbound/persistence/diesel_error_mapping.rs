//! Shared Diesel error mapping for the repository adapters.
//!
//! Every repository error type implements [`RepositoryError`] and gets the
//! `from_pool`, `from_diesel` and `from_corrupt_row` mappers for free, so
//! call sites read `.map_err(UserPersistenceError::from_diesel)`.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::{debug, warn};

use super::pool::PoolError;

/// Constructors the shared mappers need from a port error type.
pub(crate) trait RepositoryError: Sized {
    fn from_connection(message: String) -> Self;

    fn from_query(message: String) -> Self;

    /// A unique constraint rejected the write. Repositories that expect no
    /// such violation report it as a query failure.
    fn from_unique_violation(constraint: Option<&str>, message: String) -> Self {
        warn!(
            constraint = ?constraint,
            "unexpected unique violation, may need specific error mapping"
        );
        Self::from_query(message)
    }

    fn from_pool(error: PoolError) -> Self {
        map_pool_error(error)
    }

    fn from_diesel(error: DieselError) -> Self {
        map_diesel_error(error)
    }

    fn from_corrupt_row(message: String) -> Self {
        map_corrupt_row(message)
    }
}

/// Map pool checkout or build failures into a connection error.
pub(crate) fn map_pool_error<E: RepositoryError>(error: PoolError) -> E {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    E::from_connection(message)
}

/// Map a Diesel failure into the repository's error type.
pub(crate) fn map_diesel_error<E: RepositoryError>(error: DieselError) -> E {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => E::from_query("record not found".to_owned()),
        DieselError::QueryBuilderError(_) => E::from_query("database query error".to_owned()),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            E::from_unique_violation(info.constraint_name(), info.message().to_owned())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            E::from_connection("database connection error".to_owned())
        }
        _ => E::from_query("database error".to_owned()),
    }
}

/// Map a stored row that fails domain validation.
pub(crate) fn map_corrupt_row<E: RepositoryError>(message: String) -> E {
    warn!(%message, "stored row failed domain validation");
    E::from_query(message)
}
