#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod client;
pub mod config;
pub mod model;
pub mod report;
pub mod server;
pub mod storage;
pub mod tui;
