use std::str::FromStr;
use std::time::Duration;

/// Which reactor strategy a worker runs.
///
/// `Event` is the default everywhere; `Poll` is unix-only and requested
/// explicitly. On platforms without `poll(2)` the request falls back to
/// `Event`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactorKind {
    /// Native event-driven loop (per-connection tasks and idle timers)
    Event,
    /// Explicit readiness-polling loop over the whole socket set
    Poll,
}

/// Process-wide configuration, resolved once at startup and immutable
/// afterwards. Every component receives it by reference; nothing re-reads
/// the environment later.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Worker loops to run; defaults to the detected CPU core count
    pub workers: usize,
    /// Ceiling for the request line plus headers, in bytes
    pub max_header_size: usize,
    /// Ceiling for a declared `Content-Length`, in bytes
    pub max_body_size: usize,
    /// Ceiling for the raw target URI, in bytes
    pub max_uri_length: usize,
    /// Silence duration after which a connection is force-closed
    pub idle_timeout: Duration,
    pub reactor: ReactorKind,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            workers: num_cpus::get().max(1),
            max_header_size: 8192,
            max_body_size: 2 * 1024 * 1024,
            max_uri_length: 2048,
            idle_timeout: Duration::from_secs(10),
            reactor: ReactorKind::Event,
        }
    }
}

impl Config {
    /// Loads configuration from the environment, falling back to defaults
    /// for unset or unparseable values.
    pub fn load() -> Self {
        let defaults = Self::default();

        let reactor = match std::env::var("PHAROS_REACTOR").ok().as_deref() {
            Some("poll") => {
                if cfg!(unix) {
                    ReactorKind::Poll
                } else {
                    tracing::warn!("poll reactor unavailable on this platform, using event");
                    ReactorKind::Event
                }
            }
            _ => ReactorKind::Event,
        };

        Self {
            host: std::env::var("PHAROS_HOST").unwrap_or(defaults.host),
            port: env_parse("PHAROS_PORT", defaults.port),
            workers: env_parse("PHAROS_WORKERS", defaults.workers).max(1),
            max_header_size: env_parse("PHAROS_MAX_HEADER_SIZE", defaults.max_header_size),
            max_body_size: env_parse("PHAROS_MAX_BODY_SIZE", defaults.max_body_size),
            max_uri_length: env_parse("PHAROS_MAX_URI_LENGTH", defaults.max_uri_length),
            idle_timeout: Duration::from_millis(env_parse(
                "PHAROS_IDLE_TIMEOUT_MS",
                defaults.idle_timeout.as_millis() as u64,
            )),
            reactor,
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
