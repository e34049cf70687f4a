//! # Channel Snapshot
//!
//! Scrapes the public profile of a video channel (handle, subscriber, view
//! and video counts, description, links, join date and location) from its
//! JavaScript-rendered pages using a Selenium WebDriver session.
//!
//! A run visits the channel page and its about page in one browser session,
//! prints a console report and always closes the session afterwards.
//!
//! ## Example
//!
//! ```no_run
//! use channel_snapshot::{BrowserConfig, ReportPrinter, ScrapeConfig, WebDriverSession, run};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = WebDriverSession::launch(&BrowserConfig::default()).await?;
//!     let config = ScrapeConfig::new("https://www.youtube.com/linustechtips");
//!
//!     let mut stdout = std::io::stdout();
//!     run(Box::new(session), &config, &ReportPrinter::default(), &mut stdout).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod report;
pub mod session;
pub mod snapshot;

use std::io::Write;

use tracing::{error, info, warn};

pub use config::{BrowserConfig, ScrapeConfig, Selectors};
pub use error::{ExtractError, ScrapeError, SessionError};
pub use extract::PageExtractor;
pub use report::ReportPrinter;
pub use session::{BrowserSession, PageElement, WebDriverSession};
pub use snapshot::{ChannelSnapshot, ExternalLink, Field};

/// Collects the snapshot of the configured channel.
///
/// # Errors
///
/// Returns an error if a page cannot be loaded or a critical field is
/// missing. Best-effort fields never fail this call.
pub async fn scrape_channel(
    session: &dyn BrowserSession,
    config: &ScrapeConfig,
) -> Result<ChannelSnapshot, ExtractError> {
    let extractor = PageExtractor::new(session, config);

    let main = extractor.main_page(&config.channel_url).await?;
    let about = extractor.about_page(&config.about_url()).await?;

    Ok(ChannelSnapshot::new(main, about))
}

/// Scrapes the channel, prints the report and closes the session.
///
/// The session is closed exactly once whatever happens. When extraction
/// fails, the generic error line is printed instead of the report and the
/// error is returned as [`ScrapeError::Extract`].
///
/// # Arguments
///
/// * `session` - The browser session, owned by this run
/// * `config` - Channel URL, timeouts and selectors
/// * `printer` - Report style
/// * `out` - Where the report goes, usually stdout
pub async fn run<W: Write>(
    session: Box<dyn BrowserSession>,
    config: &ScrapeConfig,
    printer: &ReportPrinter,
    out: &mut W,
) -> Result<ChannelSnapshot, ScrapeError> {
    let outcome = print_outcome(scrape_channel(&*session, config).await, printer, out);

    if let Err(err) = session.quit().await {
        warn!(error = %err, "failed to close browser session");
    }

    outcome
}

fn print_outcome<W: Write>(
    scraped: Result<ChannelSnapshot, ExtractError>,
    printer: &ReportPrinter,
    out: &mut W,
) -> Result<ChannelSnapshot, ScrapeError> {
    match scraped {
        Ok(snapshot) => {
            let failed = snapshot.failed_fields();
            if !failed.is_empty() {
                info!(?failed, "some fields could not be extracted");
            }
            printer.write_report(&snapshot, out)?;
            Ok(snapshot)
        }
        Err(err) => {
            error!(error = %err, "channel scrape failed");
            printer.write_failure(&err, out)?;
            Err(err.into())
        }
    }
}
