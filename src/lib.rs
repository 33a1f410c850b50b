//! netchange: network change notifications
//!
//! A library that turns operating system callbacks for IP address and
//! routing table changes into a pull-based stream of change events.

pub mod config;
pub mod monitor;
