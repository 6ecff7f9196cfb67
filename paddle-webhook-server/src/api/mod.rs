//! HTTP API handlers.

pub mod webhook;
