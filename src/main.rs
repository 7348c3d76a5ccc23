use pharos::config::{Config, ReactorKind};
use pharos::server;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load();

    let display_host = if matches!(cfg.host.as_str(), "0.0.0.0" | "127.0.0.1") {
        "localhost"
    } else {
        cfg.host.as_str()
    };
    tracing::info!(
        os = std::env::consts::OS,
        workers = cfg.workers,
        reactor = match cfg.reactor {
            ReactorKind::Event => "event",
            ReactorKind::Poll => "poll",
        },
        "starting web server on http://{}:{}",
        display_host,
        cfg.port,
    );

    server::run(&cfg)
}
