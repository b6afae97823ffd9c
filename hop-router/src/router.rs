//! The router contract shared by every backend

use crate::config::{Config, SHUTDOWN_CONFIG};
use crate::error::Result;

/// Applies and reverts routing configuration on behalf of the VPN engine
///
/// The engine drives one instance through
/// `up()` (optional) -> `set()`* -> `close()`. Calls are synchronous and
/// block until the backend finishes; there is no timeout at this layer.
/// Methods take `&mut self`, so one owner drives an instance at a time.
///
/// `close` consumes the router: nothing can be called on it afterwards,
/// whether or not teardown succeeded.
pub trait Router: Send {
    /// One-time activation before the first configuration is applied
    ///
    /// Succeeds when the backend has nothing to activate.
    fn up(&mut self) -> Result<()>;

    /// Replace the applied configuration with `cfg`
    ///
    /// `None` is treated exactly like [`SHUTDOWN_CONFIG`]. Use
    /// [`config_or_shutdown`] so the backend only ever sees a `&Config`.
    fn set(&mut self, cfg: Option<&Config>) -> Result<()>;

    /// Apply [`SHUTDOWN_CONFIG`], then deactivate
    ///
    /// If applying the shutdown configuration fails, deactivation is skipped
    /// and that error is returned: routes may still be partially applied.
    fn close(self: Box<Self>) -> Result<()>;
}

/// Normalize a missing configuration to the shutdown sentinel
pub fn config_or_shutdown(cfg: Option<&Config>) -> &Config {
    cfg.unwrap_or(&SHUTDOWN_CONFIG)
}
