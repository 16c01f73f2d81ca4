pub mod http;

pub use http::HttpObjectStore;
