//! Weather Dashboard Library
//!
//! Exposes the response cache, the OpenWeatherMap client, favorites storage,
//! and the CLI/interactive front ends for use by the binary and integration tests.

pub mod cache;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod display;
pub mod storage;
pub mod text;
