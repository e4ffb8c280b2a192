//! Client-side state synchronization for campus and student records.
//!
//! [`CommandDispatcher`] performs calls against a [`RemoteDataService`] and
//! emits one [`Action`] per successful call into a shared [`Store`], whose
//! reducers keep every [`Snapshot`] slice consistent with the backend.

pub mod action;
pub mod dispatcher;
pub mod error;
pub mod reducers;
pub mod remote;
pub mod store;

pub use action::Action;
pub use dispatcher::{CommandDispatcher, SyncPolicy};
pub use error::RemoteError;
pub use remote::{HttpDataService, RemoteDataService, RemoteResult};
pub use store::{Snapshot, Store, Subscription};

#[cfg(test)]
#[path = "tests/fixtures.rs"]
pub(crate) mod fixtures;
