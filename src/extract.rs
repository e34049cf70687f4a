//! Field extraction from the channel's main and about pages.
//!
//! Every field is located with an XPath query that is polled until it
//! matches or the configured timeout runs out. Critical fields propagate
//! their failure; best-effort fields keep it alongside the other results.

use tokio::time::{Instant, sleep};
use tracing::{debug, info, warn};

use crate::{
    config::ScrapeConfig,
    error::ExtractError,
    session::{BrowserSession, PageElement},
    snapshot::{AboutPage, ChannelDetails, ExternalLink, Field, MainPage},
};

/// Reads channel fields through a live browser session.
pub struct PageExtractor<'a> {
    session: &'a dyn BrowserSession,
    config: &'a ScrapeConfig,
}

impl<'a> PageExtractor<'a> {
    /// An extractor reading through `session` with the queries and timeouts
    /// of `config`.
    pub fn new(session: &'a dyn BrowserSession, config: &'a ScrapeConfig) -> Self {
        Self { session, config }
    }

    /// Loads `url` in the session.
    pub async fn navigate(&self, url: &str) -> Result<(), ExtractError> {
        info!(%url, "navigating");
        self.session
            .navigate(url)
            .await
            .map_err(|source| ExtractError::Navigation {
                url: url.to_string(),
                source,
            })
    }

    /// Scrapes the subscriber count and the `@` handle from the channel page.
    ///
    /// # Errors
    ///
    /// Fails if navigation fails or either field never shows up.
    pub async fn main_page(&self, url: &str) -> Result<MainPage, ExtractError> {
        self.navigate(url).await?;

        let subscriber_count = self.first_text(Field::SubscriberCount).await?;
        let username = self.first_text(Field::Username).await?;

        Ok(MainPage {
            subscriber_count,
            username,
        })
    }

    /// Scrapes the about page.
    ///
    /// View and video counts are required. Description, links, join date and
    /// location are each allowed to fail without affecting the others.
    pub async fn about_page(&self, url: &str) -> Result<AboutPage, ExtractError> {
        self.navigate(url).await?;

        let view_count = self.first_text(Field::ViewCount).await?;
        let video_count = self.first_text(Field::VideoCount).await?;
        let details = self.details().await;

        Ok(AboutPage {
            view_count,
            video_count,
            details,
        })
    }

    /// Best-effort fields of the page currently loaded.
    pub async fn details(&self) -> ChannelDetails {
        ChannelDetails {
            description: best_effort(
                Field::Description,
                self.first_text(Field::Description).await,
            ),
            external_links: best_effort(Field::ExternalLinks, self.external_links().await),
            join_date: best_effort(Field::JoinDate, self.first_text(Field::JoinDate).await),
            location: best_effort(Field::Location, self.first_text(Field::Location).await),
        }
    }

    /// Text of the first element matching the query for `field`.
    pub async fn first_text(&self, field: Field) -> Result<String, ExtractError> {
        let elements = self.wait_for(field).await?;
        // wait_for never returns an empty list
        let Some(first) = elements.first() else {
            return Err(self.timeout(field));
        };

        let text = first
            .text()
            .await
            .map_err(|source| ExtractError::Session { field, source })?;
        debug!(%field, %text, "field extracted");
        Ok(text)
    }

    /// All anchors of the link list, in document order.
    ///
    /// Waits for the list container, then reads its anchors once. A
    /// container without anchors gives an empty list; a container that never
    /// shows up is a timeout.
    pub async fn external_links(&self) -> Result<Vec<ExternalLink>, ExtractError> {
        let field = Field::ExternalLinks;
        self.wait_for(field).await?;

        let anchors = self
            .session
            .find_all(&self.config.selectors.external_links)
            .await
            .map_err(|source| ExtractError::Session { field, source })?;

        let mut links = Vec::with_capacity(anchors.len());
        for anchor in &anchors {
            let text = anchor
                .text()
                .await
                .map_err(|source| ExtractError::Session { field, source })?;
            let url = anchor
                .attribute("href")
                .await
                .map_err(|source| ExtractError::Session { field, source })?
                .unwrap_or_default();
            links.push(ExternalLink { text, url });
        }
        debug!(count = links.len(), "external links extracted");
        Ok(links)
    }

    /// Polls the query for `field` until it matches at least one element.
    async fn wait_for(&self, field: Field) -> Result<Vec<Box<dyn PageElement>>, ExtractError> {
        let xpath = self.config.selectors.xpath(field);
        let start = Instant::now();

        loop {
            let elements = self
                .session
                .find_all(xpath)
                .await
                .map_err(|source| ExtractError::Session { field, source })?;
            if !elements.is_empty() {
                return Ok(elements);
            }

            if start.elapsed() >= self.config.wait_timeout {
                return Err(self.timeout(field));
            }
            sleep(self.config.poll_interval).await;
        }
    }

    fn timeout(&self, field: Field) -> ExtractError {
        ExtractError::Timeout {
            field,
            xpath: self.config.selectors.xpath(field).to_string(),
            waited: self.config.wait_timeout,
        }
    }
}

fn best_effort<T>(field: Field, result: Result<T, ExtractError>) -> Result<T, ExtractError> {
    if let Err(err) = &result {
        warn!(%field, error = %err, "field unavailable");
    }
    result
}
