//! cinescout - best-effort movie metadata extraction from cinesubz-style sites

pub mod caption;
pub mod config;
pub mod extract;
pub mod server;
