//! In-memory browser used by the tests.

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;

use super::{BrowserSession, PageElement};
use crate::error::SessionError;

#[derive(Debug, Clone, Default)]
pub(crate) struct FakeElement {
    text: String,
    href: Option<String>,
}

impl FakeElement {
    pub(crate) fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            href: None,
        }
    }

    pub(crate) fn link(text: &str, href: &str) -> Self {
        Self {
            text: text.to_string(),
            href: Some(href.to_string()),
        }
    }
}

#[async_trait]
impl PageElement for FakeElement {
    async fn text(&self) -> Result<String, SessionError> {
        Ok(self.text.clone())
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>, SessionError> {
        Ok(match name {
            "href" => self.href.clone(),
            _ => None,
        })
    }
}

#[derive(Debug, Default)]
struct FakeQuery {
    elements: Vec<FakeElement>,
    /// Number of lookups that come back empty before the elements show up.
    hidden_for: usize,
    lookups: usize,
    broken: bool,
}

#[derive(Debug, Default)]
struct FakeState {
    pages: HashMap<String, HashMap<String, FakeQuery>>,
    current: Option<String>,
    visited: Vec<String>,
    unreachable: Vec<String>,
    quit_fails: bool,
}

/// Observes a [`FakeSession`] after it has been handed to a run.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeProbe {
    quits: Arc<AtomicUsize>,
    state: Arc<Mutex<FakeState>>,
}

impl FakeProbe {
    pub(crate) fn quit_count(&self) -> usize {
        self.quits.load(Ordering::SeqCst)
    }

    pub(crate) fn visited(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .visited
            .clone()
    }

    /// How many times `xpath` was looked up on `url`.
    pub(crate) fn lookups(&self, url: &str, xpath: &str) -> usize {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state
            .pages
            .get(url)
            .and_then(|page| page.get(xpath))
            .map_or(0, |query| query.lookups)
    }
}

/// Serves canned elements keyed by page URL and XPath.
#[derive(Debug, Default)]
pub(crate) struct FakeSession {
    probe: FakeProbe,
}

impl FakeSession {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn probe(&self) -> FakeProbe {
        self.probe.clone()
    }

    fn with_query(self, url: &str, xpath: &str, edit: impl FnOnce(&mut FakeQuery)) -> Self {
        {
            let mut state = self.probe.state.lock().unwrap_or_else(|e| e.into_inner());
            let query = state
                .pages
                .entry(url.to_string())
                .or_default()
                .entry(xpath.to_string())
                .or_default();
            edit(query);
        }
        self
    }

    /// Makes `xpath` match `elements` on `url`.
    pub(crate) fn with(self, url: &str, xpath: &str, elements: Vec<FakeElement>) -> Self {
        self.with_query(url, xpath, |query| query.elements = elements)
    }

    /// Makes `xpath` match nothing for the first `lookups` lookups.
    pub(crate) fn hidden_for(self, url: &str, xpath: &str, lookups: usize) -> Self {
        self.with_query(url, xpath, |query| query.hidden_for = lookups)
    }

    /// Makes every lookup of `xpath` on `url` fail with a command error.
    pub(crate) fn broken(self, url: &str, xpath: &str) -> Self {
        self.with_query(url, xpath, |query| query.broken = true)
    }

    /// Makes closing the session fail. The close is still counted.
    pub(crate) fn quit_fails(self) -> Self {
        self.probe
            .state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .quit_fails = true;
        self
    }

    /// Makes navigation to `url` fail.
    pub(crate) fn unreachable(self, url: &str) -> Self {
        self.probe
            .state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .unreachable
            .push(url.to_string());
        self
    }
}

#[async_trait]
impl BrowserSession for FakeSession {
    async fn navigate(&self, url: &str) -> Result<(), SessionError> {
        let mut state = self.probe.state.lock().unwrap_or_else(|e| e.into_inner());
        state.visited.push(url.to_string());
        if state.unreachable.iter().any(|u| u == url) {
            state.current = None;
            return Err(SessionError::Command(format!("net::ERR_NAME_NOT_RESOLVED at {url}")));
        }
        state.current = Some(url.to_string());
        Ok(())
    }

    async fn find_all(&self, xpath: &str) -> Result<Vec<Box<dyn PageElement>>, SessionError> {
        let mut state = self.probe.state.lock().unwrap_or_else(|e| e.into_inner());
        let Some(url) = state.current.clone() else {
            return Ok(vec![]);
        };
        let Some(query) = state.pages.get_mut(&url).and_then(|page| page.get_mut(xpath)) else {
            return Ok(vec![]);
        };

        query.lookups += 1;
        if query.broken {
            return Err(SessionError::Command("no such window".to_string()));
        }
        if query.lookups <= query.hidden_for {
            return Ok(vec![]);
        }
        Ok(query
            .elements
            .iter()
            .cloned()
            .map(|elem| Box::new(elem) as Box<dyn PageElement>)
            .collect())
    }

    async fn quit(self: Box<Self>) -> Result<(), SessionError> {
        self.probe.quits.fetch_add(1, Ordering::SeqCst);
        let state = self.probe.state.lock().unwrap_or_else(|e| e.into_inner());
        if state.quit_fails {
            return Err(SessionError::Command("chrome not reachable".to_string()));
        }
        Ok(())
    }
}
