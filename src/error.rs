//! Errors produced while configuring the router or applying updates.
//!
//! Most variants describe an update that was rejected and skipped by the
//! runtime; only [`Error::NoRouteForLocation`] is fatal. See
//! [`Error::is_fatal`].

use crate::route::RouteStatus;

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A route pattern could not be compiled.
    #[error("invalid route pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// The location the router started on matches no route.
    #[error("no route defined for startup location '{path}'")]
    NoRouteForLocation { path: String },

    /// A navigation target matches no route.
    #[error("no route defined for '{path}'")]
    NoRouteForPath { path: String },

    /// A navigation was requested while another one is still in flight.
    #[error("transition is taking place, navigation to '{path}' aborted")]
    TransitionInProgress { path: String },

    /// A router action arrived before the router was initialized.
    #[error("router is not initialized, '{action}' ignored")]
    NotInitialized { action: &'static str },

    /// FinishNavigation was requested without a settled transition.
    #[error("no settled transition to finish")]
    NoTransition,

    /// A route record was asked to move to a status it cannot reach.
    #[error("route status cannot change from {from:?} to {to:?}")]
    InvalidStatusTransition { from: RouteStatus, to: RouteStatus },

    /// An action reached an update function that does not handle it.
    #[error("unhandled action '{action}'")]
    UnhandledAction { action: String },
}

impl Error {
    /// Whether the runtime must stop instead of skipping the update.
    ///
    /// Without a startup route the router can never initialize, so that is
    /// the only fatal condition.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::NoRouteForLocation { .. })
    }

    pub(crate) fn unhandled(action: impl Into<String>) -> Self {
        Error::UnhandledAction {
            action: action.into(),
        }
    }
}
