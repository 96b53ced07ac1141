//! HTTP implementation of the byline remote gateways.
//!
//! One `reqwest` client behind every gateway trait from `byline-core`;
//! the remote answering service stays a black box behind its wire
//! contract.

mod http;

pub use http::HttpGateway;
