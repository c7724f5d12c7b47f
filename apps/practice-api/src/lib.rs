// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! Practice API - Rust Core Library
//!
//! REST backend for a counselling practice: client records, sessions and
//! notes, treatment frameworks, assistant chat and installer downloads.
//!
//! # Architecture (Clean Architecture + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Records, create/update commands, repository traits
//!   - `client`: Client records; deleting one removes everything beneath it
//!   - `session`, `note`: Sessions and their notes
//!   - `framework`: Frameworks and attached file records
//!   - `chat`: Chat history, global or client-scoped
//!
//! - **Application**: Use cases and orchestration
//!   - `ports`: `AssistantPort`, `TranscriptionPort` with stub implementations
//!   - `use_cases`: `GenerateChatReply`, `DraftSessionNote`, `TranscribeAudio`
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `persistence`: In-memory store
//!   - `assistant`, `transcription`: Ollama and Whisper HTTP clients
//!   - `http`: Axum router and handlers
//!   - `config`: Dependency injection container

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core records with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Cross-cutting
// =============================================================================

/// YAML configuration with environment interpolation.
pub mod config;

/// Prometheus metrics.
pub mod observability;

/// Logging and OpenTelemetry setup.
pub mod telemetry;

// =============================================================================
// Re-exports
// =============================================================================

pub use domain::PracticeRepository;
pub use domain::chat::{ChatMessage, ChatRole, ChatScope};
pub use domain::client::{Client, ClientStatus};
pub use domain::framework::{Framework, FrameworkFile};
pub use domain::note::Note;
pub use domain::session::Session;
pub use domain::shared::{RepositoryError, Timestamp};

pub use application::ports::{AssistantPort, StubAssistant, StubTranscriber, TranscriptionPort};

pub use infrastructure::config::Container;
pub use infrastructure::http::{AppState, create_router};
pub use infrastructure::persistence::InMemoryPracticeStore;
