//! Report-generation adapters.

mod disabled;
mod http_client;

pub use disabled::DisabledReportGenerator;
pub use http_client::ReportGeneratorHttpClient;
