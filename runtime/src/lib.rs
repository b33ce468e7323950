//! URLGuard runtime: configuration, logging, HTTP boundary and CLI around the
//! `urlguard` core.

pub mod cli;
pub mod config;
pub mod logging;
pub mod server;
