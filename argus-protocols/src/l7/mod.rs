//! Application-layer heuristics over the payload snapshot.

pub mod dns;
pub mod http;
pub mod tls;
