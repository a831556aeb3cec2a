//! Client
//!
//! Action-based session state machine for the Parley chat protocol. Owns the
//! per-connection [`Session`] (identity, room, lifecycle state) and turns
//! transport lifecycle events and user intents into protocol actions.
//!
//! # Architecture
//!
//! The client is Sans-IO. It receives events ([`ClientEvent`]), processes them
//! through pure state machine logic, and returns actions ([`ClientAction`]) for
//! the caller to execute. Time and randomness come from an [`Environment`].
//!
//! # Components
//!
//! - [`Client`]: Session controller state machine
//! - [`Session`]: Identity, room and [`SessionState`] for one connection
//! - [`ClientEvent`]: Events fed into the client
//! - [`ClientAction`]: Actions produced by the client
//!
//! # Transport (optional)
//!
//! With the `transport` feature enabled, this crate also provides:
//! - [`transport::Transport`]: WebSocket link with a lifecycle event stream
//! - [`transport::connect`]: Open a link to a server endpoint

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod client;
mod env;
mod error;
mod event;
mod identity;
mod session;

#[cfg(feature = "transport")]
pub mod transport;

pub use client::Client;
pub use env::{Environment, SystemEnv};
pub use error::ClientError;
pub use event::{ClientAction, ClientEvent, TransportEvent};
pub use identity::{IDENTITY_LEN, Identity};
pub use session::{Session, SessionState};
