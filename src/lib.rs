//! Client-side behavior for the Refycon marketing site: scroll-spy
//! navigation, contact-form handling, lazy images, toasts, and the small
//! animations around them.
//!
//! The default build compiles only the pure modules below, so `cargo test`
//! works on any host. The browser glue in `web` needs `--features web` on a
//! wasm32 target and is what Trunk actually ships.

pub mod config;
pub mod mailto;
pub mod motion;
pub mod notify;
pub mod rate_limit;
pub mod scrollspy;
pub mod state;
pub mod validate;

/// Sole export of a build without the browser glue; does nothing.
#[cfg(not(all(feature = "web", target_arch = "wasm32")))]
pub fn placeholder() {}

#[cfg(all(feature = "web", target_arch = "wasm32"))]
mod web;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use web::start;
