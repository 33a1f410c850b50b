//! Platform-specific notification facility implementations.
//!
//! This module provides conditional compilation for platform-specific
//! implementations of the [`NotificationFacility`](super::NotificationFacility) trait.
//!
//! # Platform Support
//!
//! - **Windows**: Uses `NotifyUnicastIpAddressChange` and `NotifyRouteChange2`
//!   via the `windows` crate.
//! - **Other targets**: no facility. The library still builds and can be
//!   driven through a custom [`NotificationFacility`](super::NotificationFacility);
//!   the `netchange` binary exits with an unsupported-platform error.

#[cfg(windows)]
mod windows;


#[cfg(windows)]
pub use windows::{WindowsFacility, WindowsSubscription};

// Re-export platform-specific facility as PlatformFacility for convenience
#[cfg(windows)]
pub use windows::WindowsFacility as PlatformFacility;
