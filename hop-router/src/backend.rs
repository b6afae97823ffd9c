//! Backend selection
//!
//! The engine picks a backend once, at startup, and only ever sees the
//! resulting `Box<dyn Router>`. Backends that drive the OS directly live
//! outside this crate and may fail here with
//! [`Error::PermissionDenied`](crate::Error::PermissionDenied) or
//! [`Error::NotSupported`](crate::Error::NotSupported).

use crate::error::Result;
use crate::fake::new_fake_router;
use crate::func::{new_func_router, RoutingFuncs};
use crate::logger::Logf;
use crate::router::Router;

/// Which router implementation to construct
#[derive(Debug, Clone)]
pub enum Backend {
    /// Relay every operation to host callbacks
    Func(RoutingFuncs),
    /// Log only, never touch the network stack
    Fake,
}

impl Backend {
    /// Short name used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Func(_) => "func",
            Backend::Fake => "fake",
        }
    }
}

impl From<RoutingFuncs> for Backend {
    fn from(funcs: RoutingFuncs) -> Self {
        Backend::Func(funcs)
    }
}

/// Construct the router for `backend`
pub fn new_router(logf: Logf, backend: Backend) -> Result<Box<dyn Router>> {
    log::debug!("using {} router backend", backend.name());
    match backend {
        Backend::Func(funcs) => new_func_router(logf, funcs),
        Backend::Fake => new_fake_router(logf),
    }
}
