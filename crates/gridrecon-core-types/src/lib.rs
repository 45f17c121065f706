//! Core types shared across gridrecon facilities
//!
//! This crate holds the canonical vocabulary used by the logging facility and by
//! anything that wants to read its output:
//!
//! - **Schema constants**: canonical field keys and event names

pub mod schema;
