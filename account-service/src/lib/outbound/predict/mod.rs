pub mod http;

pub use http::HttpModelGateway;
