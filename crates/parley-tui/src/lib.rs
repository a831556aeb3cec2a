//! Terminal UI for Parley
//!
//! A thin shell over [`parley_app::Driver`] that provides terminal-specific
//! I/O. All orchestration logic lives in the generic [`parley_app::Runtime`]
//!
//! This crate only handles terminal input and rendering.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod input;
pub mod terminal;
pub mod ui;

pub use input::{InputState, KeyInput};
pub use parley_app::{App, AppAction, AppEvent, Bridge, Driver, Runtime};
pub use terminal::{TerminalDriver, TerminalError};
