//! Employee directory access.
//!
//! The resolver never talks to storage directly; it is handed a
//! [`DirectoryStore`]. This module defines that trait, a thread-safe
//! in-memory implementation, and the JSON roster format used to seed it.

mod memory;
mod roster;
mod store;

pub use memory::InMemoryDirectory;
pub use roster::{load_roster, save_roster, Roster};
pub use store::DirectoryStore;
