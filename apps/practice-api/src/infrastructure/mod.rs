//! Infrastructure Layer
//!
//! Adapters for the ports defined in the application layer:
//!
//! - **Driven Adapters (Outbound)**
//!   - `persistence/`: In-memory record store
//!   - `assistant/`: Ollama chat backend
//!   - `transcription/`: Whisper-compatible speech-to-text backend
//!
//! - **Driver Adapters (Inbound)**
//!   - `http/`: REST API controllers
//!
//! - `config/`: Adapter selection and wiring

pub mod assistant;
pub mod config;
pub mod http;
pub mod persistence;
pub mod transcription;
