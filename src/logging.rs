//! Logging abstraction layer.
//!
//! Crate-internal macros that dispatch to either the [`log`](https://docs.rs/log)
//! or [`tracing`](https://docs.rs/tracing) crate depending on which feature
//! is enabled. Each event goes to exactly one backend: with both features on,
//! `tracing` takes over and `log` stays silent.
//!
//! | Feature    | Backend         | Default |
//! |------------|-----------------|---------|
//! | `log`      | `log` crate     | yes     |
//! | `tracing`  | `tracing` crate | no      |
//!
//! All macros accept `format!`-style arguments and log under the
//! `pyramid_mvu` target.

macro_rules! trace_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::trace!(target: "pyramid_mvu", $($arg)*);
        #[cfg(all(feature = "log", not(feature = "tracing")))]
        ::log::trace!(target: "pyramid_mvu", $($arg)*);
    };
}

macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!(target: "pyramid_mvu", $($arg)*);
        #[cfg(all(feature = "log", not(feature = "tracing")))]
        ::log::debug!(target: "pyramid_mvu", $($arg)*);
    };
}

macro_rules! info_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::info!(target: "pyramid_mvu", $($arg)*);
        #[cfg(all(feature = "log", not(feature = "tracing")))]
        ::log::info!(target: "pyramid_mvu", $($arg)*);
    };
}

macro_rules! warn_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::warn!(target: "pyramid_mvu", $($arg)*);
        #[cfg(all(feature = "log", not(feature = "tracing")))]
        ::log::warn!(target: "pyramid_mvu", $($arg)*);
    };
}

macro_rules! error_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::error!(target: "pyramid_mvu", $($arg)*);
        #[cfg(all(feature = "log", not(feature = "tracing")))]
        ::log::error!(target: "pyramid_mvu", $($arg)*);
    };
}
