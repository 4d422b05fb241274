use clap::Parser;
use tracing_subscriber::EnvFilter;
use volley::cli::StressCli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    volley::cli::run(StressCli::parse()).await
}
