//! The browser capabilities the extractor relies on, and their WebDriver
//! implementation.
//!
//! Requires a WebDriver server (chromedriver) to be running, on
//! `http://127.0.0.1:9515` unless configured otherwise.

#[cfg(test)]
pub(crate) mod fake;

use async_trait::async_trait;
use thirtyfour::prelude::*;
use tracing::{debug, info};

use crate::{config::BrowserConfig, error::SessionError};

/// An element located in the rendered page.
#[async_trait]
pub trait PageElement: Send + Sync {
    /// Visible text of the element.
    async fn text(&self) -> Result<String, SessionError>;

    /// Value of `name` on the element.
    ///
    /// The live DOM property is preferred over the markup attribute, so
    /// `href` comes back as an absolute URL.
    async fn attribute(&self, name: &str) -> Result<Option<String>, SessionError>;
}

/// A live browser session owned by one run.
#[async_trait]
pub trait BrowserSession: Send + Sync {
    /// Loads `url` in the current tab.
    async fn navigate(&self, url: &str) -> Result<(), SessionError>;

    /// Every element currently matching `xpath`, in document order.
    async fn find_all(&self, xpath: &str) -> Result<Vec<Box<dyn PageElement>>, SessionError>;

    /// Ends the session and releases the browser.
    async fn quit(self: Box<Self>) -> Result<(), SessionError>;
}

/// A Chrome session driven over WebDriver.
pub struct WebDriverSession {
    driver: WebDriver,
}

impl WebDriverSession {
    /// Requests a new Chrome session from the WebDriver server.
    ///
    /// # Errors
    ///
    /// Returns an error if the capabilities are rejected or the WebDriver
    /// connection fails.
    pub async fn launch(config: &BrowserConfig) -> Result<Self, SessionError> {
        let mut caps = DesiredCapabilities::chrome();
        if config.headless {
            caps.set_headless()?;
        }
        if config.disable_gpu {
            caps.set_disable_gpu()?;
        }
        for arg in &config.extra_args {
            caps.add_arg(arg)?;
        }

        info!(url = %config.webdriver_url, headless = config.headless, "starting browser session");
        let driver = WebDriver::new(config.webdriver_url.as_str(), caps)
            .await
            .map_err(|source| SessionError::Launch {
                url: config.webdriver_url.clone(),
                source,
            })?;

        Ok(Self { driver })
    }
}

#[async_trait]
impl BrowserSession for WebDriverSession {
    async fn navigate(&self, url: &str) -> Result<(), SessionError> {
        self.driver.goto(url.to_string()).await?;
        Ok(())
    }

    async fn find_all(&self, xpath: &str) -> Result<Vec<Box<dyn PageElement>>, SessionError> {
        let elements = self.driver.find_all(By::XPath(xpath.to_string())).await?;
        Ok(elements
            .into_iter()
            .map(|elem| Box::new(elem) as Box<dyn PageElement>)
            .collect())
    }

    async fn quit(self: Box<Self>) -> Result<(), SessionError> {
        debug!("closing browser session");
        self.driver.quit().await?;
        Ok(())
    }
}

#[async_trait]
impl PageElement for WebElement {
    async fn text(&self) -> Result<String, SessionError> {
        Ok(WebElement::text(self).await?)
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>, SessionError> {
        if let Some(value) = self.prop(name.to_string()).await? {
            return Ok(Some(value));
        }
        Ok(self.attr(name.to_string()).await?)
    }
}
