//! Linkgate - a self-hosted short-link service
//!
//! Short paths map to destination URLs stored as JSON in a pluggable
//! key-value store. Visitors get a 302, an iframe cloaking page, or a
//! crawler preview depending on the link's settings; a JSON API under
//! `/api` manages the links behind an optional password/session gate.
//!
//! # Architecture
//! - `storage`: key-value backends (file, memory, redis)
//! - `services`: link CRUD, redirect dispatch, crawler detection, HTML pages
//! - `api`: HTTP endpoints and session cookies
//! - `config`: explicit configuration threaded into handlers
//! - `system`: logging setup

pub mod api;
pub mod config;
pub mod errors;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
