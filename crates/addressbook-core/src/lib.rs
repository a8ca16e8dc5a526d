//! Core types and operations for the address book.
//!
//! Nothing here knows about HTTP or SQL. A storage backend plugs in through
//! [`store::ContactStore`]; the transport layer drives a
//! [`directory::Directory`].

pub mod contact;
pub mod directory;
pub mod entity;
pub mod error;
pub mod identity;
pub mod search;
pub mod seed;
pub mod store;

pub use error::{Error, Result};
