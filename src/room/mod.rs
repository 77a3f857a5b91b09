//! Room view: transcript, formatting, input handling.

pub mod formatter;
mod transcript;
mod view;

pub use transcript::Transcript;
pub use view::{DEFAULT_VIEWPORT_ROWS, EMPTY_INPUT_ALERT, RoomView, SendOutcome};
