//! User-management core of the gigboard backend: accounts, freelancer
//! profiles, and their Postgres persistence.

pub mod config;
pub mod error;
pub mod profiles;
pub mod state;
pub mod telemetry;
pub mod users;

#[cfg(test)]
pub(crate) mod testing;
