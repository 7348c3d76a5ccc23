use std::time::Duration;

use pharos::config::{Config, ReactorKind};

// Env-var tests share process state, so everything lives in one #[test].
#[test]
fn test_load_defaults_and_env_overrides() {
    let vars = [
        "PHAROS_HOST",
        "PHAROS_PORT",
        "PHAROS_WORKERS",
        "PHAROS_MAX_HEADER_SIZE",
        "PHAROS_MAX_BODY_SIZE",
        "PHAROS_MAX_URI_LENGTH",
        "PHAROS_IDLE_TIMEOUT_MS",
        "PHAROS_REACTOR",
    ];
    for var in vars {
        unsafe {
            std::env::remove_var(var);
        }
    }

    // Defaults.
    let cfg = Config::load();
    assert_eq!(cfg.host, "0.0.0.0");
    assert_eq!(cfg.port, 8080);
    assert!(cfg.workers >= 1);
    assert_eq!(cfg.max_header_size, 8192);
    assert_eq!(cfg.max_body_size, 2 * 1024 * 1024);
    assert_eq!(cfg.max_uri_length, 2048);
    assert_eq!(cfg.idle_timeout, Duration::from_secs(10));
    assert_eq!(cfg.reactor, ReactorKind::Event);
    assert_eq!(cfg.listen_addr(), "0.0.0.0:8080");

    // Overrides.
    unsafe {
        std::env::set_var("PHAROS_HOST", "127.0.0.1");
        std::env::set_var("PHAROS_PORT", "9000");
        std::env::set_var("PHAROS_WORKERS", "3");
        std::env::set_var("PHAROS_MAX_HEADER_SIZE", "4096");
        std::env::set_var("PHAROS_IDLE_TIMEOUT_MS", "250");
    }
    let cfg = Config::load();
    assert_eq!(cfg.listen_addr(), "127.0.0.1:9000");
    assert_eq!(cfg.workers, 3);
    assert_eq!(cfg.max_header_size, 4096);
    assert_eq!(cfg.idle_timeout, Duration::from_millis(250));

    // Unparseable values fall back to defaults; zero workers are clamped.
    unsafe {
        std::env::set_var("PHAROS_PORT", "not-a-port");
        std::env::set_var("PHAROS_WORKERS", "0");
    }
    let cfg = Config::load();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.workers, 1);

    // Reactor selection.
    unsafe {
        std::env::set_var("PHAROS_REACTOR", "poll");
    }
    let cfg = Config::load();
    if cfg!(unix) {
        assert_eq!(cfg.reactor, ReactorKind::Poll);
    } else {
        assert_eq!(cfg.reactor, ReactorKind::Event);
    }

    for var in vars {
        unsafe {
            std::env::remove_var(var);
        }
    }
}
