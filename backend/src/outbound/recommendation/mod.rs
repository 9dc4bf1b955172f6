//! Institution recommendation adapters.
//!
//! [`RecommendationHttpSource`] calls the external matching service;
//! [`DisabledRecommendationSource`] stands in when no endpoint is configured.

mod disabled;
mod dto;
mod http_source;

pub use disabled::DisabledRecommendationSource;
pub use http_source::RecommendationHttpSource;
