//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **memory**: in-process repositories, the reference persistence layer
//! - **recommendation**: reqwest client for the institution matching service
//! - **report_generator**: reqwest client for the document service
//! - **dispatcher**: tokio-backed best-effort task runner
//! - **password_hasher**: Argon2id hashing
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod dispatcher;
mod http_support;
pub mod memory;
pub mod password_hasher;
pub mod recommendation;
pub mod report_generator;

pub use dispatcher::{FailureReceiver, TokioBackgroundDispatcher, drain_failures};
pub use http_support::HttpClientError;
pub use password_hasher::Argon2PasswordHasher;
