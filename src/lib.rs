//! Dynamic HTTP Request Router Library
//!
//! Requests name their destination with `?forward=<name>`; the router looks
//! the name up in a table polled from a JSON route list and reverse-proxies
//! the request to that backend.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod proxy;
pub mod reload;
pub mod routing;

pub use config::schema::RouterConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::RouteTable;
