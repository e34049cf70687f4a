//! Scrapes the profile of a single channel and prints it.
//!
//! Requires chromedriver to be running, on port 9515 unless `WEBDRIVER_URL`
//! points elsewhere. Set `NO_COLOR` for plain output and `RUST_LOG` for
//! diagnostics on stderr.
//!
//! # Usage
//!
//! ```bash
//! chromedriver &
//! cargo run --bin scrape
//! ```

use std::{env, error::Error, io};

use channel_snapshot::{
    BrowserConfig, ReportPrinter, ScrapeConfig, ScrapeError, WebDriverSession,
    config::DEFAULT_CHANNEL_URL, run,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let browser = BrowserConfig::from_env();
    let config = ScrapeConfig::new(DEFAULT_CHANNEL_URL);
    let printer = ReportPrinter::with_color(env::var_os("NO_COLOR").is_none());

    let session = WebDriverSession::launch(&browser).await?;

    let mut stdout = io::stdout().lock();
    match run(Box::new(session), &config, &printer, &mut stdout).await {
        // Extraction failures have already been reported on stdout
        Ok(_) | Err(ScrapeError::Extract(_)) => Ok(()),
        Err(err) => Err(err.into()),
    }
}
