// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod config;
pub mod error;
pub mod frame;
pub mod logging;
pub mod metrics;
pub mod runtime;
pub mod session;
pub mod summary;
pub mod text;
pub mod ui;
pub mod word_generator;

pub use error::{Result, TyperError};
pub use session::{Control, Phase, Session, TypingEvent, Viewport};

/// How long the runner waits for input before yielding a tick.
pub const TICK_RATE_MS: u64 = 100;
