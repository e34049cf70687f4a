//! Run configuration: where the WebDriver lives, what to scrape and how long
//! to wait for each element.

use std::{env, time::Duration};

use crate::snapshot::Field;

/// Channel scraped by the `scrape` binary.
pub const DEFAULT_CHANNEL_URL: &str = "https://www.youtube.com/linustechtips";

/// Default chromedriver endpoint.
pub const DEFAULT_WEBDRIVER_URL: &str = "http://127.0.0.1:9515";

/// Options used when requesting a browser session.
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// WebDriver server to connect to.
    pub webdriver_url: String,

    /// Run the browser without a window.
    pub headless: bool,

    /// Pass `--disable-gpu` to Chrome.
    pub disable_gpu: bool,

    /// Additional Chrome flags.
    pub extra_args: Vec<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            webdriver_url: DEFAULT_WEBDRIVER_URL.to_string(),
            headless: true,
            disable_gpu: true,
            extra_args: vec![],
        }
    }
}

impl BrowserConfig {
    /// Defaults, with the endpoint taken from `WEBDRIVER_URL` when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = env::var("WEBDRIVER_URL")
            && !url.trim().is_empty()
        {
            config.webdriver_url = url.trim().to_string();
        }
        config
    }
}

/// XPath predicates locating each field in the rendered DOM.
#[derive(Debug, Clone)]
pub struct Selectors {
    pub username: String,
    pub subscriber_count: String,
    pub view_count: String,
    pub video_count: String,
    pub description: String,
    /// Container of the link list. Its presence is what the wait is for.
    pub link_container: String,
    /// Anchors inside the link list.
    pub external_links: String,
    pub join_date: String,
    pub location: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            username: "//span[contains(@class, 'yt-core-attributed-string--link-inherit-color') and contains(text(), '@')]".to_string(),
            subscriber_count: "//span[contains(text(), 'subscribers')]".to_string(),
            view_count: "//td[contains(text(), 'views')]".to_string(),
            video_count: "//td[contains(text(), 'videos')]".to_string(),
            description: "//yt-attributed-string[@id='description-container']//span".to_string(),
            link_container: "//div[@id='link-list-container']".to_string(),
            external_links: "//div[@id='link-list-container']//a".to_string(),
            join_date: "//span[contains(text(),'Joined')]".to_string(),
            location: "//tr[td//yt-icon[@icon='privacy_public']]/td[2]".to_string(),
        }
    }
}

impl Selectors {
    /// The XPath waited on for `field`.
    ///
    /// For external links this is the container; the anchors are read from
    /// [`Selectors::external_links`] once it is present.
    pub fn xpath(&self, field: Field) -> &str {
        match field {
            Field::Username => &self.username,
            Field::SubscriberCount => &self.subscriber_count,
            Field::ViewCount => &self.view_count,
            Field::VideoCount => &self.video_count,
            Field::Description => &self.description,
            Field::ExternalLinks => &self.link_container,
            Field::JoinDate => &self.join_date,
            Field::Location => &self.location,
        }
    }
}

/// What to scrape and how patiently.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Channel home page, e.g. `https://www.youtube.com/linustechtips`.
    pub channel_url: String,

    /// Upper bound on the wait for each field's element.
    pub wait_timeout: Duration,

    /// Delay between two lookups while waiting.
    pub poll_interval: Duration,

    pub selectors: Selectors,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNEL_URL)
    }
}

impl ScrapeConfig {
    /// Default timeouts and selectors for the channel at `channel_url`.
    pub fn new(channel_url: &str) -> Self {
        Self {
            channel_url: channel_url.to_string(),
            wait_timeout: Duration::from_secs(15),
            poll_interval: Duration::from_millis(500),
            selectors: Selectors::default(),
        }
    }

    /// The channel's about page.
    pub fn about_url(&self) -> String {
        format!("{}/about", self.channel_url.trim_end_matches('/'))
    }
}
