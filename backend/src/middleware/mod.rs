//! Actix middleware shared by every Foodgram route.

pub mod trace;

pub use trace::Trace;
