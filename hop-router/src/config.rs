//! Desired routing state handed to a [`Router`](crate::Router)
//!
//! A [`Config`] describes what the tunnel interface should look like after a
//! call to `set`. Routers treat it as opaque, with one exception: the
//! [`SHUTDOWN_CONFIG`] sentinel, which always means "no addresses, no routes,
//! fully torn down".

use std::fmt;

use ipnet::IpNet;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Smallest MTU an interface may be configured with (IPv4 minimum)
pub const MIN_MTU: u16 = 68;

/// The canonical teardown configuration
///
/// Applied by every backend on `close`, and substituted for a missing
/// configuration in `set`.
pub static SHUTDOWN_CONFIG: Config = Config::shutdown();

/// How much host firewall state the router is allowed to manage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetfilterMode {
    /// Leave the firewall alone
    #[default]
    Off,
    /// Install our own chains but do not divert traffic into them
    NoDivert,
    /// Install chains and divert traffic into them
    On,
}

impl fmt::Display for NetfilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetfilterMode::Off => write!(f, "off"),
            NetfilterMode::NoDivert => write!(f, "nodivert"),
            NetfilterMode::On => write!(f, "on"),
        }
    }
}

/// Desired interface and routing state
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Addresses assigned to the tunnel interface
    pub local_addrs: Vec<IpNet>,
    /// Routes sent through the tunnel
    pub routes: Vec<IpNet>,
    /// Routes that must bypass the tunnel
    pub local_routes: Vec<IpNet>,
    /// Subnets this node advertises to the mesh
    pub subnet_routes: Vec<IpNet>,
    /// Masquerade traffic forwarded into advertised subnets
    pub snat_subnet_routes: bool,
    /// Drop unsolicited inbound traffic on the tunnel
    pub stateful_filtering: bool,
    /// Firewall management mode
    pub netfilter_mode: NetfilterMode,
    /// New interface MTU (`None` leaves it unchanged)
    pub mtu: Option<u16>,
}

impl Config {
    /// The empty, fully torn down configuration
    ///
    /// Prefer [`SHUTDOWN_CONFIG`] when a reference is all that is needed.
    pub const fn shutdown() -> Self {
        Self {
            local_addrs: Vec::new(),
            routes: Vec::new(),
            local_routes: Vec::new(),
            subnet_routes: Vec::new(),
            snat_subnet_routes: false,
            stateful_filtering: false,
            netfilter_mode: NetfilterMode::Off,
            mtu: None,
        }
    }

    /// Create a new configuration builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Whether this configuration is the teardown sentinel
    pub fn is_shutdown(&self) -> bool {
        *self == SHUTDOWN_CONFIG
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(mtu) = self.mtu {
            if mtu < MIN_MTU {
                return Err(Error::Config(format!(
                    "MTU {} is too small (minimum {})",
                    mtu, MIN_MTU
                )));
            }
        }

        // A prefix cannot both use and bypass the tunnel
        for route in &self.routes {
            if self.local_routes.contains(route) {
                return Err(Error::InvalidPrefix(format!(
                    "{} is listed in both routes and local_routes",
                    route
                )));
            }
        }

        Ok(())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_shutdown() {
            return write!(f, "shutdown");
        }
        write!(
            f,
            "addrs={} routes={} local_routes={} subnet_routes={} snat={} stateful={} netfilter={}",
            self.local_addrs.len(),
            self.routes.len(),
            self.local_routes.len(),
            self.subnet_routes.len(),
            self.snat_subnet_routes,
            self.stateful_filtering,
            self.netfilter_mode,
        )?;
        if let Some(mtu) = self.mtu {
            write!(f, " mtu={}", mtu)?;
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder starting from the shutdown configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an interface address
    pub fn local_addr(mut self, addr: IpNet) -> Self {
        self.config.local_addrs.push(addr);
        self
    }

    /// Add an interface address from a string (e.g., "100.64.0.1/32")
    pub fn local_addr_str(self, addr: &str) -> Result<Self> {
        let net = parse_prefix(addr)?;
        Ok(self.local_addr(net))
    }

    /// Route a prefix through the tunnel
    pub fn route(mut self, route: IpNet) -> Self {
        self.config.routes.push(route);
        self
    }

    /// Route a prefix given as a string through the tunnel
    pub fn route_str(self, route: &str) -> Result<Self> {
        let net = parse_prefix(route)?;
        Ok(self.route(net))
    }

    /// Keep a prefix off the tunnel
    pub fn local_route(mut self, route: IpNet) -> Self {
        self.config.local_routes.push(route);
        self
    }

    /// Advertise a subnet behind this node
    pub fn subnet_route(mut self, route: IpNet) -> Self {
        self.config.subnet_routes.push(route);
        self
    }

    /// Enable or disable SNAT for advertised subnets
    pub fn snat_subnet_routes(mut self, enabled: bool) -> Self {
        self.config.snat_subnet_routes = enabled;
        self
    }

    /// Enable or disable stateful filtering
    pub fn stateful_filtering(mut self, enabled: bool) -> Self {
        self.config.stateful_filtering = enabled;
        self
    }

    /// Set the firewall management mode
    pub fn netfilter_mode(mut self, mode: NetfilterMode) -> Self {
        self.config.netfilter_mode = mode;
        self
    }

    /// Set the interface MTU
    pub fn mtu(mut self, mtu: u16) -> Self {
        self.config.mtu = Some(mtu);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}

fn parse_prefix(s: &str) -> Result<IpNet> {
    s.parse().map_err(|_| Error::InvalidPrefix(s.to_string()))
}
