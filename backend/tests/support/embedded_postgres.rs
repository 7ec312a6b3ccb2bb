//! Database lifecycle and row-count helpers over a plain `postgres` client.
//!
//! `DROP DATABASE` cannot run inside a transaction, so resets go through
//! `postgres` rather than Diesel.

use pg_embedded_setup_unpriv::TestCluster;
use postgres::types::ToSql;
use postgres::{Client, NoTls};

use super::format_postgres_error;

/// Drop and recreate `name`, leaving an empty database.
pub fn reset_database(cluster: &TestCluster, name: &str) -> Result<(), String> {
    let admin_url = cluster.connection().database_url("postgres");
    let mut client =
        Client::connect(&admin_url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(&format!(
            "DROP DATABASE IF EXISTS \"{name}\" WITH (FORCE); CREATE DATABASE \"{name}\";"
        ))
        .map_err(|err| format_postgres_error(&err))
}

/// Run a `SELECT COUNT(*) ...` statement and return the count.
pub fn count_rows(url: &str, sql: &str, params: &[&(dyn ToSql + Sync)]) -> Result<i64, String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    let row = client
        .query_one(sql, params)
        .map_err(|err| format_postgres_error(&err))?;
    row.try_get(0).map_err(|err| format_postgres_error(&err))
}
