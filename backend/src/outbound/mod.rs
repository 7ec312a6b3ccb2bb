//! Outbound adapters implementing the domain repository ports.
//!
//! PostgreSQL through Diesel is the only backing store; see [`persistence`].

pub mod persistence;
