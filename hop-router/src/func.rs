//! Router backend that delegates to host-supplied callbacks
//!
//! Some environments own the network stack themselves: on macOS/iOS the
//! Packet Tunnel Provider applies `NEPacketTunnelNetworkSettings`, and an
//! embedding application may want to apply routes its own way. In those
//! cases the engine still talks to a [`Router`], and [`FuncRouter`] relays
//! each operation to whichever callbacks the host wired up.
//!
//! # Example
//!
//! ```ignore
//! use hop_router::{new_func_router, Logf, RoutingFuncs};
//!
//! let funcs = RoutingFuncs::new().with_set(|cfg| {
//!     bridge::apply_settings(cfg)?; // host-side FFI
//!     Ok(())
//! });
//!
//! let mut router = new_func_router(Logf::default(), funcs)?;
//! router.up()?;
//! router.set(Some(&config))?;
//! router.close()?;
//! ```

use std::fmt;
use std::sync::Arc;

use crate::config::{Config, SHUTDOWN_CONFIG};
use crate::error::Result;
use crate::logger::Logf;
use crate::router::{config_or_shutdown, Router};

/// Callback run by `up`
pub type UpFn = Arc<dyn Fn() -> Result<()> + Send + Sync>;

/// Callback run last by `close`
pub type DownFn = Arc<dyn Fn() -> Result<()> + Send + Sync>;

/// Callback that applies a configuration
pub type SetFn = Arc<dyn Fn(&Config) -> Result<()> + Send + Sync>;

/// Independently optional routing callbacks
///
/// An empty slot is a successful no-op for that operation, never an error.
///
/// Cloning shares the callbacks. Routers built from clones of the same
/// `RoutingFuncs` may invoke a callback concurrently; whether that is safe is
/// up to the callback; nothing here serializes the calls.
#[derive(Clone, Default)]
pub struct RoutingFuncs {
    /// Activation callback
    pub up: Option<UpFn>,
    /// Deactivation callback
    pub down: Option<DownFn>,
    /// Configuration callback
    pub set: Option<SetFn>,
}

impl RoutingFuncs {
    /// Create an empty set of callbacks
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the activation callback
    pub fn with_up<F>(mut self, f: F) -> Self
    where
        F: Fn() -> Result<()> + Send + Sync + 'static,
    {
        self.up = Some(Arc::new(f));
        self
    }

    /// Set the deactivation callback
    pub fn with_down<F>(mut self, f: F) -> Self
    where
        F: Fn() -> Result<()> + Send + Sync + 'static,
    {
        self.down = Some(Arc::new(f));
        self
    }

    /// Set the configuration callback
    pub fn with_set<F>(mut self, f: F) -> Self
    where
        F: Fn(&Config) -> Result<()> + Send + Sync + 'static,
    {
        self.set = Some(Arc::new(f));
        self
    }

    /// Whether an activation callback is wired
    pub fn has_up(&self) -> bool {
        self.up.is_some()
    }

    /// Whether a deactivation callback is wired
    pub fn has_down(&self) -> bool {
        self.down.is_some()
    }

    /// Whether a configuration callback is wired
    pub fn has_set(&self) -> bool {
        self.set.is_some()
    }

    /// Run the activation callback, or succeed if there is none
    pub fn call_up(&self) -> Result<()> {
        match &self.up {
            Some(f) => f(),
            None => Ok(()),
        }
    }

    /// Run the deactivation callback, or succeed if there is none
    pub fn call_down(&self) -> Result<()> {
        match &self.down {
            Some(f) => f(),
            None => Ok(()),
        }
    }

    /// Run the configuration callback, or succeed if there is none
    pub fn call_set(&self, cfg: &Config) -> Result<()> {
        match &self.set {
            Some(f) => f(cfg),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for RoutingFuncs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoutingFuncs")
            .field("up", &self.has_up())
            .field("down", &self.has_down())
            .field("set", &self.has_set())
            .finish()
    }
}

/// Router that forwards every operation to a [`RoutingFuncs`]
///
/// Holds no state besides the callbacks and performs no I/O of its own.
/// Callback errors are returned unchanged.
#[derive(Debug, Clone)]
pub struct FuncRouter {
    funcs: RoutingFuncs,
}

impl FuncRouter {
    /// Create a router delegating to `funcs`
    pub fn new(funcs: RoutingFuncs) -> Self {
        Self { funcs }
    }
}

impl Router for FuncRouter {
    fn up(&mut self) -> Result<()> {
        // Bringing the interface up is the host's job when no callback is set
        log::debug!("func router: up (callback: {})", self.funcs.has_up());
        self.funcs.call_up()
    }

    fn set(&mut self, cfg: Option<&Config>) -> Result<()> {
        let cfg = config_or_shutdown(cfg);
        log::debug!("func router: set {}", cfg);
        self.funcs.call_set(cfg)
    }

    fn close(self: Box<Self>) -> Result<()> {
        log::debug!("func router: close");
        self.funcs.call_set(&SHUTDOWN_CONFIG)?;
        log::debug!("func router: down (callback: {})", self.funcs.has_down());
        self.funcs.call_down()
    }
}

/// Return a [`Router`] delegating to `funcs`
///
/// Never fails; the `Result` matches the factory shape of backends that
/// probe the OS at construction.
pub fn new_func_router(_logf: Logf, funcs: RoutingFuncs) -> Result<Box<dyn Router>> {
    log::debug!("creating func router: {:?}", funcs);
    Ok(Box::new(FuncRouter::new(funcs)))
}
