//! Application Layer
//!
//! The application layer orchestrates domain logic through use cases.
//! It defines:
//!
//! - **Ports**: Interfaces to the assistant model and the speech-to-text backend
//! - **Use Cases**: Chat replies, note drafting and transcription

pub mod ports;
pub mod use_cases;

pub use ports::*;
pub use use_cases::*;
