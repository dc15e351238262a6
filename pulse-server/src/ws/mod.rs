//! WebSocket module for real-time communication

mod echo;
mod presence;

pub use echo::echo_ws;
pub use presence::presence_ws;
