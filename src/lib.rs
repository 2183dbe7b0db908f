//! mock-upsd - Mock NUT Server
//!
//! Core library for the line reader, dispatcher and accept loop.

pub mod config;
pub mod nut;
pub mod server;
