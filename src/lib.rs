#![deny(warnings, rust_2024_compatibility)]
// Specific pedantic lints enforced (not blanket allow):
#![deny(
    clippy::explicit_iter_loop,
    clippy::manual_let_else,
    clippy::semicolon_if_nothing_returned,
    clippy::inconsistent_struct_constructor
)]
// Noisy pedantic lints suppressed with justification:
#![allow(
    clippy::missing_errors_doc,      // Internal API
    clippy::missing_panics_doc,      // Internal API
    clippy::module_name_repetitions, // e.g. NoticeBuilder in notice module
    clippy::must_use_candidate,      // Annotated selectively on critical APIs
    clippy::doc_markdown             // Internal API
)]

pub mod config;
pub mod enrich;
pub mod event;
pub mod forwarder;
pub mod integration;
pub mod notice;
pub mod policy;
pub mod sender;

// Re-export main types for easy access
pub use config::Config;
pub use event::LogEvent;
pub use forwarder::{DispatchOutcome, NoticeForwarder};
pub use policy::DispatchMode;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
