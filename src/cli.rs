//! Command-line interface of the load generator.
//!
//! ```shell
//! $ volley --help
//! Usage: volley [OPTIONS]
//!
//! Options:
//!   -u, --url <URL>                  URL to request
//!   -n, --requests <REQUESTS>        Total number of requests to send [default: 10]
//!   -c, --concurrency <CONCURRENCY>  Number of requests in flight at once [default: 1]
//!   -k, --insecure                   Skip TLS certificate verification
//!   -t, --timeout <TIMEOUT>          Deadline for each request
//!   -q, --quiet                      Do not print the banner before the run
//!   -o, --output <OUTPUT>            Output format for the report [default: text]
//!   -O, --output-file <OUTPUT_FILE>  Output file path for the report
//!   -h, --help                       Print help
//! ```
use std::{fs::File, io::stdout, num::NonZeroU32, path::PathBuf};

use clap::{
    CommandFactory, Parser, ValueEnum,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use reqwest::Url;

use crate::{
    reporter::{JsonReporter, Reporter, TextReporter},
    runner::{RunConfig, Stresser},
    transport::{ReqwestTransport, TransportConfig},
};

#[derive(Parser, Clone, Debug)]
#[clap(
    name = "volley",
    about = "Send a fixed number of HTTP GET requests with bounded concurrency",
    styles(Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Cyan.on_default())
    )
)]
#[allow(missing_docs)]
pub struct StressCli {
    /// URL to request
    ///
    /// When missing, the usage is printed and nothing is sent.
    #[clap(long, short = 'u')]
    pub url: Option<Url>,

    /// Total number of requests to send
    #[clap(long, short = 'n', default_value_t = 10)]
    pub requests: u64,

    /// Number of requests in flight at once
    #[clap(long, short = 'c', default_value = "1")]
    pub concurrency: NonZeroU32,

    /// Skip TLS certificate verification
    #[clap(long, short = 'k')]
    pub insecure: bool,

    /// Deadline for each request
    ///
    /// A request exceeding it is counted as an error.
    ///
    /// Examples: -t 500ms, -t 5s
    #[clap(long, short = 't')]
    pub timeout: Option<humantime::Duration>,

    /// Do not print the banner before the run
    #[clap(long, short = 'q')]
    pub quiet: bool,

    /// Output format for the report
    #[clap(short, long, value_enum, default_value_t = ReportFormat::Text, ignore_case = true)]
    pub output: ReportFormat,

    /// Output file path for the report
    ///
    /// When set, the report will be written to the specified file instead of stdout.
    #[clap(long, short = 'O')]
    pub output_file: Option<PathBuf>,
}

impl StressCli {
    /// Run configuration for the given target.
    pub fn run_config(&self, target: Url) -> RunConfig {
        RunConfig { target, total: self.requests, concurrency: self.concurrency }
    }

    /// Transport settings requested on the command line.
    pub fn transport_config(&self) -> TransportConfig {
        TransportConfig { insecure: self.insecure, timeout: self.timeout.map(Into::into) }
    }
}

/// Run report format.
#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum ReportFormat {
    /// Report in plain text format. See [`TextReporter`].
    Text,

    /// Report in JSON format. See [`JsonReporter`].
    Json,
}

/// Run the load test described by the CLI options and print its report.
///
/// Without `--url` this only prints the usage. Request failures never make
/// this function fail; they are part of the report.
pub async fn run(cli: StressCli) -> anyhow::Result<()> {
    let Some(url) = cli.url.clone() else {
        StressCli::command().print_help()?;
        return Ok(());
    };

    if !cli.quiet {
        eprintln!("Benchmarking {url}");
        eprintln!("  running...");
    }

    let transport = ReqwestTransport::new(&cli.transport_config())?;
    let stresser = Stresser::new(cli.run_config(url), transport);
    let report = stresser.execute().await?;

    let reporter: &dyn Reporter = match cli.output {
        ReportFormat::Text => &TextReporter,
        ReportFormat::Json => &JsonReporter,
    };

    match cli.output_file {
        Some(path) => reporter.print(&mut File::create(path)?, &report)?,
        None => reporter.print(&mut stdout(), &report)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn verify_cli() {
        StressCli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let cli = StressCli::try_parse_from(["volley", "--url", "http://localhost:8080/"]).unwrap();
        assert_eq!(cli.requests, 10);
        assert_eq!(cli.concurrency.get(), 1);
        assert!(!cli.insecure);
        assert!(cli.timeout.is_none());
        assert!(matches!(cli.output, ReportFormat::Text));

        let config = cli.run_config(cli.url.clone().unwrap());
        assert_eq!(config.total, 10);
        assert_eq!(config.target.as_str(), "http://localhost:8080/");
    }

    #[test]
    fn parses_every_flag() {
        let cli = StressCli::try_parse_from([
            "volley",
            "--url",
            "https://example.com/health",
            "--requests",
            "0",
            "--concurrency",
            "16",
            "--insecure",
            "--timeout",
            "750ms",
            "--output",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.requests, 0);
        assert_eq!(cli.concurrency.get(), 16);

        let transport = cli.transport_config();
        assert!(transport.insecure);
        assert_eq!(transport.timeout, Some(Duration::from_millis(750)));
        assert!(matches!(cli.output, ReportFormat::Json));
    }

    #[test]
    fn rejects_zero_concurrency() {
        assert!(StressCli::try_parse_from(["volley", "--url", "http://a/", "--concurrency", "0"]).is_err());
    }

    #[test]
    fn url_is_optional() {
        let cli = StressCli::try_parse_from(["volley"]).unwrap();
        assert!(cli.url.is_none());
    }

    #[tokio::test]
    async fn missing_url_prints_usage_and_succeeds() {
        let cli = StressCli::try_parse_from(["volley", "--requests", "3"]).unwrap();
        run(cli).await.unwrap();
    }
}
