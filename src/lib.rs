// Library surface for headless/integration tests and reuse.
// The terminal host (CLI, rendering) lives in main.rs and ui.rs.
pub mod app_dirs;
pub mod config;
pub mod error;
pub mod key;
pub mod lang;
pub mod logging;
pub mod runtime;
pub mod session;

pub use error::{LanguageError, SessionError};
pub use key::Key;
pub use session::{SessionState, Transition, WordProgress};
