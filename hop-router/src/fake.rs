//! Stub router that touches nothing
//!
//! Every operation succeeds and leaves a line in the logging sink. Useful on
//! platforms without routing support and for exercising the engine without
//! privileges.

use crate::config::{Config, SHUTDOWN_CONFIG};
use crate::error::Result;
use crate::logger::Logf;
use crate::router::{config_or_shutdown, Router};

/// No-op [`Router`] that only logs
#[derive(Debug, Clone)]
pub struct FakeRouter {
    logf: Logf,
}

impl FakeRouter {
    /// Create a fake router writing to `logf`
    pub fn new(logf: Logf) -> Self {
        Self {
            logf: logf.with_prefix("router: "),
        }
    }

    fn apply(&self, cfg: &Config) {
        self.logf.log(&format!("[fake] set {}", cfg));
    }
}

impl Router for FakeRouter {
    fn up(&mut self) -> Result<()> {
        self.logf.log("[fake] up");
        Ok(())
    }

    fn set(&mut self, cfg: Option<&Config>) -> Result<()> {
        self.apply(config_or_shutdown(cfg));
        Ok(())
    }

    fn close(self: Box<Self>) -> Result<()> {
        self.apply(&SHUTDOWN_CONFIG);
        self.logf.log("[fake] down");
        Ok(())
    }
}

/// Return a [`Router`] that does nothing but log
pub fn new_fake_router(logf: Logf) -> Result<Box<dyn Router>> {
    log::debug!("creating fake router");
    Ok(Box::new(FakeRouter::new(logf)))
}
