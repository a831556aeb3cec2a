//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the application runtime from specific I/O
//! implementations. Each frontend implements the trait to provide
//! platform-specific I/O, while the generic [`crate::Runtime`] handles all
//! orchestration.

use std::future::Future;

use parley_client::TransportEvent;

use crate::{App, AppAction};

/// Abstracts I/O operations for the application runtime.
///
/// Implementations provide platform-specific I/O while the generic
/// [`Runtime`](crate::Runtime) handles orchestration logic. This ensures
/// the same orchestration code runs in production TUI and simulation.
///
/// # Implementations
///
/// - **TUI**: Uses crossterm for terminal events and a WebSocket transport
/// - **Simulation**: Replays a scripted sequence of inputs and transport events
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Poll for user input.
    ///
    /// Front-ends translate raw input into App calls and return the resulting
    /// actions. Returns an empty vector if nothing happened.
    fn poll_event(
        &mut self,
        app: &mut App,
    ) -> impl Future<Output = Result<Vec<AppAction>, Self::Error>> + Send;

    /// Send a text payload over the open connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection is not open or the send fails.
    fn send_text(&mut self, text: String) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Next pending transport event.
    ///
    /// Returns `None` if no event is ready. Never waits for one to arrive.
    fn recv_transport_event(&mut self) -> impl Future<Output = Option<TransportEvent>> + Send;

    /// Start a connection to the endpoint.
    ///
    /// Connection failures are reported later as transport events; this only
    /// fails when the driver itself cannot start the attempt.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection attempt cannot be started.
    fn connect(&mut self, endpoint: &str) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// True while a connection may still produce transport events.
    fn is_connected(&self) -> bool;

    /// Render the application state.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, app: &App) -> Result<(), Self::Error>;

    /// Stop the connection and clean up resources.
    fn stop(&mut self);
}
