//! Discovered save-game records and the store that holds them.
//!
//! The store is a plain owned value: construct one at startup and hand it
//! (or a `Mutex` around it) to whatever needs it. All mutation goes through
//! [`GameStore::push`] and [`GameStore::reset`], so an observer watching
//! [`GameStore::generation`] sees every change.

pub mod error;
pub mod store;
pub mod types;

pub use error::GamesError;
pub use store::{GameStore, Snapshot};
pub use types::Game;
