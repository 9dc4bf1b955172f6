//! Child-welfare case management backend.
//!
//! Guardians register children and open counsel requests; administrators
//! route them to institutions and counselors; counselors write reports that
//! institution administrators review and approve. Guardians also review the
//! institutions their children attend.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

pub use domain::TraceId;
pub use middleware::Trace;
