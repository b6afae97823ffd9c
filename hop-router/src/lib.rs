//! Routing abstraction for VPN clients
//!
//! This crate defines the [`Router`] contract the VPN engine uses to apply a
//! desired network configuration to the host and to revert it on shutdown,
//! along with backends that do not touch the OS themselves.
//!
//! # Backends
//!
//! - **[`FuncRouter`]**: relays each operation to host-supplied
//!   [`RoutingFuncs`]. Used when something outside this process owns the
//!   network stack, e.g. a macOS/iOS NetworkExtension packet tunnel provider.
//! - **[`FakeRouter`]**: logs and succeeds, nothing else.
//!
//! Backends that program routing tables directly implement the same trait
//! outside this crate.
//!
//! # Lifecycle
//!
//! ```text
//! new_router() -> up() -> set(cfg)* -> close()
//! ```
//!
//! `set(None)` is the same as `set(Some(&SHUTDOWN_CONFIG))`. `close()` applies
//! [`SHUTDOWN_CONFIG`] first and only deactivates if that succeeded.
//!
//! # Example
//!
//! ```ignore
//! use hop_router::{new_router, Backend, Config, Logf, RoutingFuncs};
//!
//! let funcs = RoutingFuncs::new().with_set(|cfg| {
//!     println!("apply {}", cfg);
//!     Ok(())
//! });
//!
//! let mut router = new_router(Logf::default(), Backend::Func(funcs))?;
//! router.up()?;
//!
//! let config = Config::builder()
//!     .local_addr_str("100.64.0.1/32")?
//!     .route_str("100.64.0.0/10")?
//!     .build()?;
//! router.set(Some(&config))?;
//!
//! router.close()?;
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod fake;
pub mod func;
pub mod logger;
pub mod router;

pub use backend::{new_router, Backend};
pub use config::{Config, ConfigBuilder, NetfilterMode, SHUTDOWN_CONFIG};
pub use error::{Error, Result};
pub use fake::{new_fake_router, FakeRouter};
pub use func::{new_func_router, DownFn, FuncRouter, RoutingFuncs, SetFn, UpFn};
pub use logger::Logf;
pub use router::{config_or_shutdown, Router};
