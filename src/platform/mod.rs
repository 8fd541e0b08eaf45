//! Platform abstraction layer
//!
//! Hosts apply [`crate::Effect`]s to a concrete surface:
//! - `headless`: virtual clock, used by the native runner and tests
//! - `dom`: the browser page (wasm32 only)

pub mod headless;

#[cfg(target_arch = "wasm32")]
pub mod dom;

pub use headless::HeadlessHost;

/// Browser timer delay for `ms`, capped at the largest delay a browser accepts
pub fn timer_delay(ms: u32) -> i32 {
    i32::try_from(ms).unwrap_or(i32::MAX)
}
