pub mod db;

pub mod auth;
pub mod instruments;
pub mod ledger;
pub mod users;

pub mod constants;
pub mod errors;
pub mod schema;

pub use errors::{Error, Result};
