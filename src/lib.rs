//! plantdb - HTTP front-end for plant species and occurrence records
//!
//! Two read-mostly collections live in a key-value store. Requests are
//! routed by path segment, query parameters are compiled into a backend
//! filter plus an in-process residual filter, and results come back as
//! JSON arrays.

pub mod cli;
pub mod http_server;
pub mod model;
pub mod observability;
pub mod rest_api;
pub mod seed;
pub mod store;
