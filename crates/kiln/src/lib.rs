//! Headless WebGL tutorial scenes built on [`kiln_linalg`].
//!
//! Every scene in [`demo`] owns create-once vertex data ([`geometry::Geometry`]) and produces
//! one [`demo::Frame`] per tick: a set of named uniforms in upload order plus the draw call that
//! consumes them. Actually submitting that data to a GPU is left to whatever rendering backend
//! embeds the scenes.
//!
//! # Environment Variables
//!
//! The `kiln` binary is configured through environment variables (see [`config::Config`]):
//!
//! * `KILN_DEMO`: the scene to run. One of `triangle`, `sliding-f`, `spinning-f`, `ortho-f` or
//!   `lit-f` (the default).
//! * `KILN_CANVAS`: the canvas size as `WIDTHxHEIGHT` in pixels. Defaults to `400x300`.
//! * `KILN_TICKS`: the number of ticks to run, or `0` to run forever. Defaults to `100`.
//! * `KILN_TICK_MS`: the fixed tick interval in milliseconds. Defaults to `30`.
//! * `KILN_SEED`: seed for the random colors of the flat scenes. Random if unset.

use log::LevelFilter;

pub mod config;
pub mod demo;
pub mod geometry;
pub mod lighting;
pub mod timer;
pub mod uniform;

/// macro-use only, not part of public API.
#[doc(hidden)]
pub fn init_logger(calling_crate: &'static str) {
    let log_level = LevelFilter::Debug;
    env_logger::Builder::new()
        .filter(Some(calling_crate), log_level)
        .filter(Some(env!("CARGO_PKG_NAME")), log_level)
        .parse_default_env()
        .try_init()
        .ok();
}

/// Initializes logging to *stderr*.
///
/// The calling crate and kiln will log at *debug* level. `RUST_LOG` can be used to override
/// this, for example `RUST_LOG=kiln=trace` logs every uniform of every frame.
///
/// If a global logger is already registered, this macro will do nothing.
#[macro_export]
macro_rules! init_logger {
    () => {
        $crate::init_logger(env!("CARGO_CRATE_NAME"))
    };
}
