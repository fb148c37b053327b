//! Testing utilities including mock implementations.
//!
//! These drive the pipeline without a real browser, model, or terminal.
//! Pages are scripted as CSS selector to element maps; clicking an element
//! can install new elements into the page (e.g. a description panel).

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};

use crate::error::{AIError, BrowserError, BrowserResult, OperatorError, SinkError};
use crate::traits::{Browser, CompletionRequest, Element, Operator, RecordSink, AI};
use crate::types::JobRecord;

fn driver_error(message: &str) -> BrowserError {
    BrowserError::driver(std::io::Error::other(message.to_string()))
}

/// A scripted page: elements and lookup failures keyed by selector.
#[derive(Debug, Clone, Default)]
pub struct MockPage {
    elements: HashMap<String, Vec<MockElement>>,
    failures: HashMap<String, String>,
}

impl MockPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element matched by `selector`.
    pub fn with_element(mut self, selector: &str, element: MockElement) -> Self {
        self.elements
            .entry(selector.to_string())
            .or_default()
            .push(element);
        self
    }

    /// Make lookups of `selector` fail with a driver error.
    pub fn with_failure(mut self, selector: &str, message: &str) -> Self {
        self.failures
            .insert(selector.to_string(), message.to_string());
        self
    }
}

#[derive(Debug, Default)]
struct MockSession {
    pages: HashMap<String, MockPage>,
    navigation_failures: HashMap<String, String>,
    current: MockPage,
    current_url: Option<String>,
    navigations: Vec<String>,
    clicks: Vec<String>,
}

/// A scripted element.
#[derive(Debug, Clone, Default)]
pub struct MockElement {
    text: String,
    attributes: HashMap<String, String>,
    children: HashMap<String, Vec<MockElement>>,
    failures: HashMap<String, String>,
    on_click: Vec<(String, MockElement)>,
    click_failure: Option<String>,
    session: Option<Arc<RwLock<MockSession>>>,
}

impl MockElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_attribute(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attributes.insert(name.to_string(), value.into());
        self
    }

    /// Append a descendant matched by `selector`.
    pub fn with_child(mut self, selector: &str, child: MockElement) -> Self {
        self.children
            .entry(selector.to_string())
            .or_default()
            .push(child);
        self
    }

    /// Make descendant lookups of `selector` fail with a driver error.
    pub fn with_child_failure(mut self, selector: &str, message: &str) -> Self {
        self.failures
            .insert(selector.to_string(), message.to_string());
        self
    }

    /// Clicking this element replaces the page's `selector` matches.
    ///
    /// Repeated calls with the same selector install several elements.
    pub fn on_click(mut self, selector: &str, element: MockElement) -> Self {
        self.on_click.push((selector.to_string(), element));
        self
    }

    /// Clicking this element fails with a driver error.
    pub fn failing_click(mut self, message: &str) -> Self {
        self.click_failure = Some(message.to_string());
        self
    }

    fn attached(mut self, session: &Arc<RwLock<MockSession>>) -> Self {
        self.session = Some(session.clone());
        self
    }
}

#[async_trait]
impl Element for MockElement {
    async fn find_elements(&self, selector: &str) -> BrowserResult<Vec<Self>> {
        if let Some(message) = self.failures.get(selector) {
            return Err(driver_error(message));
        }
        let children = self.children.get(selector).cloned().unwrap_or_default();
        Ok(match &self.session {
            Some(session) => children.into_iter().map(|c| c.attached(session)).collect(),
            None => children,
        })
    }

    async fn text(&self) -> BrowserResult<String> {
        Ok(self.text.clone())
    }

    async fn attribute(&self, name: &str) -> BrowserResult<Option<String>> {
        Ok(self.attributes.get(name).cloned())
    }

    async fn click(&self) -> BrowserResult<()> {
        let Some(session) = &self.session else {
            return Err(driver_error("element is not attached to a page"));
        };
        let mut session = session.write().unwrap();
        session.clicks.push(self.text.clone());

        if let Some(message) = &self.click_failure {
            return Err(driver_error(message));
        }

        for (selector, _) in &self.on_click {
            session.current.elements.remove(selector);
        }
        for (selector, element) in &self.on_click {
            session
                .current
                .elements
                .entry(selector.clone())
                .or_default()
                .push(element.clone());
        }
        Ok(())
    }
}

/// A mock browser serving scripted pages.
///
/// Navigating loads a fresh copy of the page registered for the URL (or an
/// empty page), so clicks never leak between visits.
#[derive(Debug, Clone, Default)]
pub struct MockBrowser {
    session: Arc<RwLock<MockSession>>,
}

impl MockBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the page served for `url`.
    pub fn with_page(self, url: &str, page: MockPage) -> Self {
        self.session
            .write()
            .unwrap()
            .pages
            .insert(url.to_string(), page);
        self
    }

    /// Make navigation to `url` fail.
    pub fn with_navigation_failure(self, url: &str, reason: &str) -> Self {
        self.session
            .write()
            .unwrap()
            .navigation_failures
            .insert(url.to_string(), reason.to_string());
        self
    }

    /// Every URL navigated to, in order.
    pub fn navigations(&self) -> Vec<String> {
        self.session.read().unwrap().navigations.clone()
    }

    /// Text of every clicked element, in order.
    pub fn clicks(&self) -> Vec<String> {
        self.session.read().unwrap().clicks.clone()
    }
}

#[async_trait]
impl Browser for MockBrowser {
    type Element = MockElement;

    async fn navigate(&self, url: &str) -> BrowserResult<()> {
        let mut session = self.session.write().unwrap();
        session.navigations.push(url.to_string());

        if let Some(reason) = session.navigation_failures.get(url) {
            return Err(BrowserError::Navigation {
                url: url.to_string(),
                reason: reason.clone(),
            });
        }
        session.current = session.pages.get(url).cloned().unwrap_or_default();
        session.current_url = Some(url.to_string());
        Ok(())
    }

    async fn current_url(&self) -> BrowserResult<String> {
        Ok(self
            .session
            .read()
            .unwrap()
            .current_url
            .clone()
            .unwrap_or_else(|| "about:blank".to_string()))
    }

    async fn find_elements(&self, selector: &str) -> BrowserResult<Vec<MockElement>> {
        let session = self.session.read().unwrap();
        if let Some(message) = session.current.failures.get(selector) {
            return Err(driver_error(message));
        }
        Ok(session
            .current
            .elements
            .get(selector)
            .map(|elements| {
                elements
                    .iter()
                    .map(|e| e.clone().attached(&self.session))
                    .collect()
            })
            .unwrap_or_default())
    }
}

/// A mock AI returning scripted completions.
///
/// Lookup order: a keyed response whose needle appears in the user prompt,
/// then the FIFO queue, then the default. A configured failure overrides
/// everything. Unscripted calls fail.
#[derive(Default)]
pub struct MockAI {
    /// Responses keyed by a substring of the user prompt
    keyed: Arc<RwLock<Vec<(String, String)>>>,

    /// One-shot responses, consumed in order
    queue: Arc<RwLock<VecDeque<String>>>,

    /// Response when nothing else matches
    default_response: Option<String>,

    /// Fail every call with this message
    failure: Option<String>,

    /// Call tracking for assertions
    calls: Arc<RwLock<Vec<CompletionRequest>>>,
}

impl MockAI {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a one-shot response.
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.queue.write().unwrap().push_back(text.into());
        self
    }

    /// Respond with `text` whenever the user prompt contains `needle`.
    pub fn with_response_for(self, needle: impl Into<String>, text: impl Into<String>) -> Self {
        self.keyed.write().unwrap().push((needle.into(), text.into()));
        self
    }

    pub fn with_default_response(mut self, text: impl Into<String>) -> Self {
        self.default_response = Some(text.into());
        self
    }

    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<CompletionRequest> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl AI for MockAI {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AIError> {
        self.calls.write().unwrap().push(request.clone());

        if let Some(message) = &self.failure {
            return Err(AIError::Request(Box::new(std::io::Error::other(
                message.clone(),
            ))));
        }

        let keyed = self
            .keyed
            .read()
            .unwrap()
            .iter()
            .find(|(needle, _)| request.user.contains(needle.as_str()))
            .map(|(_, text)| text.clone());
        if let Some(text) = keyed {
            return Ok(text);
        }

        if let Some(text) = self.queue.write().unwrap().pop_front() {
            return Ok(text);
        }

        self.default_response.clone().ok_or_else(|| {
            AIError::Request(Box::new(std::io::Error::other("no scripted response")))
        })
    }
}

/// An operator that confirms immediately and records every instruction.
#[derive(Debug, Clone, Default)]
pub struct ScriptedOperator {
    instructions: Arc<RwLock<Vec<String>>>,
    failure: Option<String>,
}

impl ScriptedOperator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every confirmation (after recording the instruction).
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    pub fn instructions(&self) -> Vec<String> {
        self.instructions.read().unwrap().clone()
    }
}

#[async_trait]
impl Operator for ScriptedOperator {
    async fn await_confirmation(&self, instruction: &str) -> Result<(), OperatorError> {
        self.instructions
            .write()
            .unwrap()
            .push(instruction.to_string());
        match &self.failure {
            Some(message) => Err(OperatorError::Prompt(message.clone())),
            None => Ok(()),
        }
    }
}

/// A sink collecting records in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub records: Vec<JobRecord>,
    pub writes: usize,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordSink for MemorySink {
    fn write_records(&mut self, records: &[JobRecord]) -> Result<(), SinkError> {
        self.writes += 1;
        self.records.extend_from_slice(records);
        Ok(())
    }
}
