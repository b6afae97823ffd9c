//! Lifecycle tests for the delegating router
//!
//! These drive a router the way the engine does (`up`, `set`*, `close`) with
//! spy callbacks that record every invocation, and check:
//! - empty callback slots are silent no-ops
//! - a missing configuration is applied as the shutdown sentinel
//! - teardown ordering in `close`
//! - callback errors reach the caller untouched

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use hop_router::{new_func_router, Config, Error, Logf, RoutingFuncs, SHUTDOWN_CONFIG};

/// Records what the host callbacks saw
#[derive(Default)]
struct Spy {
    ups: AtomicUsize,
    downs: AtomicUsize,
    configs: Mutex<Vec<Config>>,
}

impl Spy {
    fn ups(&self) -> usize {
        self.ups.load(Ordering::SeqCst)
    }

    fn downs(&self) -> usize {
        self.downs.load(Ordering::SeqCst)
    }

    fn configs(&self) -> Vec<Config> {
        self.configs.lock().unwrap().clone()
    }

    fn last_config(&self) -> Option<Config> {
        self.configs.lock().unwrap().last().cloned()
    }
}

/// Wire all three slots to the spy; `set_err`/`down_err` inject failures
fn spy_funcs<S, D>(spy: &Arc<Spy>, set_err: S, down_err: D) -> RoutingFuncs
where
    S: Fn(&Config) -> Option<Error> + Send + Sync + 'static,
    D: Fn() -> Option<Error> + Send + Sync + 'static,
{
    let up_spy = spy.clone();
    let down_spy = spy.clone();
    let set_spy = spy.clone();

    RoutingFuncs::new()
        .with_up(move || {
            up_spy.ups.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .with_down(move || {
            down_spy.downs.fetch_add(1, Ordering::SeqCst);
            down_err().map_or(Ok(()), Err)
        })
        .with_set(move |cfg| {
            set_spy.configs.lock().unwrap().push(cfg.clone());
            set_err(cfg).map_or(Ok(()), Err)
        })
}

fn ok_set(_: &Config) -> Option<Error> {
    None
}

fn ok_down() -> Option<Error> {
    None
}

fn sample_config() -> Config {
    Config::builder()
        .local_addr_str("100.64.0.7/32")
        .unwrap()
        .local_addr_str("fd7a:115c:a1e0::7/128")
        .unwrap()
        .route_str("100.64.0.0/10")
        .unwrap()
        .route_str("fd7a:115c:a1e0::/48")
        .unwrap()
        .subnet_route("192.168.10.0/24".parse().unwrap())
        .snat_subnet_routes(true)
        .mtu(1280)
        .build()
        .unwrap()
}

/// With no callbacks wired, every operation succeeds
#[test]
fn test_empty_funcs_all_succeed() {
    let mut router = new_func_router(Logf::discard(), RoutingFuncs::default()).unwrap();

    assert!(router.up().is_ok());
    assert!(router.set(Some(&sample_config())).is_ok());
    assert!(router.set(None).is_ok());
    assert!(router.close().is_ok());
}

/// `set(None)` hands the callback the same value as explicit shutdown
#[test]
fn test_set_none_matches_explicit_shutdown() {
    let spy = Arc::new(Spy::default());
    let mut router = new_func_router(Logf::discard(), spy_funcs(&spy, ok_set, ok_down)).unwrap();

    router.set(None).unwrap();
    router.set(Some(&SHUTDOWN_CONFIG)).unwrap();

    let configs = spy.configs();
    assert_eq!(configs.len(), 2);
    assert_eq!(configs[0], SHUTDOWN_CONFIG);
    assert_eq!(configs[0], configs[1]);
}

/// A failing teardown `set` is returned by `close` and `down` never runs
#[test]
fn test_close_set_failure_skips_down() {
    let spy = Arc::new(Spy::default());
    let funcs = spy_funcs(
        &spy,
        |cfg: &Config| {
            cfg.is_shutdown()
                .then(|| Error::Route("cannot remove 100.64.0.0/10".into()))
        },
        ok_down,
    );
    let mut router = new_func_router(Logf::discard(), funcs).unwrap();

    router.up().unwrap();
    router.set(Some(&sample_config())).unwrap();

    match router.close() {
        Err(Error::Route(msg)) => assert_eq!(msg, "cannot remove 100.64.0.0/10"),
        other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(spy.downs(), 0);
    assert_eq!(spy.last_config(), Some(SHUTDOWN_CONFIG.clone()));
}

/// Teardown `set` succeeds, `down` fails: `close` returns the `down` error
#[test]
fn test_close_down_failure_is_returned() {
    let spy = Arc::new(Spy::default());
    let funcs = spy_funcs(
        &spy,
        ok_set,
        || Some(Error::Host("interface still referenced".into())),
    );
    let mut router = new_func_router(Logf::discard(), funcs).unwrap();

    router.up().unwrap();
    match router.close() {
        Err(Error::Host(msg)) => assert_eq!(msg, "interface still referenced"),
        other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(spy.downs(), 1);
    assert_eq!(spy.configs(), vec![SHUTDOWN_CONFIG.clone()]);
}

/// No `set` wired: `close` goes straight to `down` and returns its error
#[test]
fn test_close_without_set_runs_down() {
    let downs = Arc::new(AtomicUsize::new(0));
    let counter = downs.clone();
    let funcs = RoutingFuncs::new().with_down(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Err(Error::Host("tunnel provider stopped".into()))
    });
    assert!(!funcs.has_set());
    let router = new_func_router(Logf::discard(), funcs).unwrap();

    match router.close() {
        Err(Error::Host(msg)) => assert_eq!(msg, "tunnel provider stopped"),
        other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(downs.load(Ordering::SeqCst), 1);
}

/// Only `up` wired: `close` succeeds without calling it
#[test]
fn test_close_with_only_up_skips_up() {
    let ups = Arc::new(AtomicUsize::new(0));
    let counter = ups.clone();
    let funcs = RoutingFuncs::new().with_up(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });
    let router = new_func_router(Logf::discard(), funcs).unwrap();

    assert!(router.close().is_ok());
    assert_eq!(ups.load(Ordering::SeqCst), 0);
}

/// The error from `up` comes back exactly as the callback produced it
#[test]
fn test_up_error_unwrapped() {
    let funcs = RoutingFuncs::new()
        .with_up(|| Err(Error::PermissionDenied("operation not permitted".into())));
    let mut router = new_func_router(Logf::discard(), funcs).unwrap();

    let err = router.up().unwrap_err();
    assert!(err.is_permission_denied());
    assert_eq!(err.to_string(), "permission denied: operation not permitted");
}

/// Only `set` wired: the sequence records the config, then the sentinel
#[test]
fn test_set_only_scenario() {
    let recorded: Arc<Mutex<Option<Config>>> = Arc::new(Mutex::new(None));
    let sink = recorded.clone();
    let funcs = RoutingFuncs::new().with_set(move |cfg| {
        *sink.lock().unwrap() = Some(cfg.clone());
        Ok(())
    });
    assert!(!funcs.has_down());

    let mut router = new_func_router(Logf::discard(), funcs).unwrap();
    let cfg_a = sample_config();

    assert!(router.up().is_ok());
    assert!(recorded.lock().unwrap().is_none());

    assert!(router.set(Some(&cfg_a)).is_ok());
    assert_eq!(recorded.lock().unwrap().as_ref(), Some(&cfg_a));

    assert!(router.close().is_ok());
    assert_eq!(recorded.lock().unwrap().as_ref(), Some(&SHUTDOWN_CONFIG));
}

/// Full engine-style sequence with every slot wired
#[test]
fn test_full_lifecycle_ordering() {
    let spy = Arc::new(Spy::default());
    let mut router = new_func_router(Logf::discard(), spy_funcs(&spy, ok_set, ok_down)).unwrap();

    let first = sample_config();
    let second = Config::builder()
        .local_addr_str("100.64.0.7/32")
        .unwrap()
        .route_str("100.64.0.0/10")
        .unwrap()
        .build()
        .unwrap();

    router.up().unwrap();
    router.set(Some(&first)).unwrap();
    router.set(Some(&second)).unwrap();
    router.close().unwrap();

    assert_eq!(spy.ups(), 1);
    assert_eq!(spy.downs(), 1);
    assert_eq!(spy.configs(), vec![first, second, SHUTDOWN_CONFIG.clone()]);
}

/// Routers built from clones of one `RoutingFuncs` share the callbacks
#[test]
fn test_cloned_funcs_share_callbacks() {
    let spy = Arc::new(Spy::default());
    let funcs = spy_funcs(&spy, ok_set, ok_down);

    let a = new_func_router(Logf::discard(), funcs.clone()).unwrap();
    let b = new_func_router(Logf::discard(), funcs).unwrap();
    a.close().unwrap();
    b.close().unwrap();

    assert_eq!(spy.downs(), 2);
    assert!(spy.configs().iter().all(Config::is_shutdown));
}
