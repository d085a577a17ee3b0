use anyhow::Result;
use tracing_subscriber::EnvFilter;
use url_shortener::config::{self, Config};
use url_shortener::server;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load_from_env()?;
    init_tracing(&config);
    config.print_summary();

    server::run(config).await
}

/// Installs the global subscriber: text for `local`, JSON otherwise.
fn init_tracing(config: &Config) {
    let filter = EnvFilter::new(config.log_filter());
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if config.env.json_logs() {
        builder.json().init();
    } else {
        builder.init();
    }
}
