//! Client side of the finance tracker.
//!
//! [`RemoteDataClient`] talks to the server; [`EntityStore`] keeps the
//! signed-in user's records in memory and applies confirmed mutations to
//! them. Reports are computed from [`EntityStore::snapshot`] with the
//! functions in [`engine`].

pub use error::{ClientError, Result};
pub use identity::Identity;
pub use remote::{EntityKind, FALLBACK_ERROR, RemoteDataClient};
pub use reqwest::StatusCode;
pub use store::EntityStore;

mod convert;
mod error;
mod identity;
mod remote;
mod store;
