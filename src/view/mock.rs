//! Scripted in-memory view used by unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::app::{CartographError, Result};
use crate::domain::Locator;
use crate::view::View;

/// Everything the mock saw, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    Navigate(String),
    Fill(String),
    Key(String),
    Scroll(f64, f64),
    Hover(String),
    Click(usize),
    Wait(Duration),
}

#[derive(Debug, Clone, PartialEq)]
pub enum MockHandle {
    Item(usize),
    Text(String),
}

/// Fixture for one listing entry and the detail view it opens.
#[derive(Debug, Clone, Default)]
pub struct MockItem {
    pub url: String,
    pub texts: HashMap<String, String>,
    pub lists: HashMap<String, Vec<String>>,
    pub fail_click: bool,
}

impl MockItem {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_text(mut self, locator: &Locator, text: impl Into<String>) -> Self {
        self.texts.insert(locator.expr().to_string(), text.into());
        self
    }

    pub fn with_list(mut self, locator: &Locator, entries: Vec<String>) -> Self {
        self.lists.insert(locator.expr().to_string(), entries);
        self
    }

    pub fn failing_click(mut self) -> Self {
        self.fail_click = true;
        self
    }
}

#[derive(Debug, Default)]
struct MockState {
    counts: VecDeque<usize>,
    last_count: Option<usize>,
    count_calls: usize,
    open: Option<usize>,
    gestures: Vec<Gesture>,
}

pub struct MockView {
    listing: Locator,
    items: Vec<MockItem>,
    fail_all: bool,
    fail_dismiss: bool,
    state: Mutex<MockState>,
}

impl MockView {
    pub fn new(listing: Locator, items: Vec<MockItem>) -> Self {
        Self {
            listing,
            items,
            fail_all: false,
            fail_dismiss: false,
            state: Mutex::new(MockState::default()),
        }
    }

    /// A view on which every lookup fails.
    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::new(Locator::xpath("//nothing"), Vec::new())
        }
    }

    /// Escape is recorded but fails and leaves the detail view open.
    pub fn failing_dismiss(mut self) -> Self {
        self.fail_dismiss = true;
        self
    }

    /// Scripted results for successive `count` calls on the listing;
    /// the last value repeats once the script runs out.
    pub fn with_counts(self, counts: impl IntoIterator<Item = usize>) -> Self {
        self.state.lock().unwrap().counts = counts.into_iter().collect();
        self
    }

    /// Open a detail view directly, as if its listing entry was clicked.
    pub fn open(self, index: usize) -> Self {
        self.state.lock().unwrap().open = Some(index);
        self
    }

    pub fn gestures(&self) -> Vec<Gesture> {
        self.state.lock().unwrap().gestures.clone()
    }

    pub fn count_calls(&self) -> usize {
        self.state.lock().unwrap().count_calls
    }

    pub fn scroll_count(&self) -> usize {
        self.gestures()
            .iter()
            .filter(|g| matches!(g, Gesture::Scroll(..)))
            .count()
    }

    fn record(&self, gesture: Gesture) {
        self.state.lock().unwrap().gestures.push(gesture);
    }

    fn open_item(&self) -> Option<&MockItem> {
        let open = self.state.lock().unwrap().open?;
        self.items.get(open)
    }

    fn injected() -> CartographError {
        CartographError::Browser("injected failure".into())
    }
}

#[async_trait]
impl View for MockView {
    type Handle = MockHandle;

    async fn navigate_to(&self, url: &str) -> Result<()> {
        self.record(Gesture::Navigate(url.to_string()));
        Ok(())
    }

    async fn fill_field(&self, _locator: &Locator, text: &str) -> Result<()> {
        self.record(Gesture::Fill(text.to_string()));
        Ok(())
    }

    async fn press_key(&self, key: &str) -> Result<()> {
        self.record(Gesture::Key(key.to_string()));
        if key == "Escape" {
            if self.fail_dismiss {
                return Err(CartographError::Browser("escape ignored".into()));
            }
            self.state.lock().unwrap().open = None;
        }
        Ok(())
    }

    async fn count(&self, locator: &Locator) -> Result<usize> {
        if self.fail_all {
            return Err(Self::injected());
        }
        if *locator != self.listing {
            return Ok(0);
        }

        let mut state = self.state.lock().unwrap();
        state.count_calls += 1;
        let next = state.counts.pop_front().or(state.last_count);
        state.last_count = next;
        Ok(next.unwrap_or(self.items.len()))
    }

    async fn list_handles(&self, locator: &Locator, limit: usize) -> Result<Vec<MockHandle>> {
        if self.fail_all {
            return Err(Self::injected());
        }
        if *locator == self.listing {
            return Ok((0..self.items.len().min(limit)).map(MockHandle::Item).collect());
        }

        let entries = self
            .open_item()
            .and_then(|item| item.lists.get(locator.expr()))
            .cloned()
            .unwrap_or_default();
        Ok(entries
            .into_iter()
            .take(limit)
            .map(MockHandle::Text)
            .collect())
    }

    async fn inner_text(&self, locator: &Locator) -> Result<String> {
        if self.fail_all {
            return Err(Self::injected());
        }
        self.open_item()
            .and_then(|item| item.texts.get(locator.expr()))
            .cloned()
            .ok_or_else(|| CartographError::NotFound(locator.to_string()))
    }

    async fn text_within(&self, handle: &MockHandle, _locator: Option<&Locator>) -> Result<String> {
        match handle {
            MockHandle::Text(text) => Ok(text.clone()),
            MockHandle::Item(i) => Err(CartographError::NotFound(format!("item {}", i))),
        }
    }

    async fn scroll_by(&self, dx: f64, dy: f64) -> Result<()> {
        self.record(Gesture::Scroll(dx, dy));
        if self.fail_all {
            return Err(Self::injected());
        }
        Ok(())
    }

    async fn wait_for_selector(&self, locator: &Locator, timeout: Duration) -> Result<()> {
        if self.fail_all {
            return Err(Self::injected());
        }
        if *locator == self.listing {
            return Ok(());
        }
        match self.open_item() {
            Some(item) if item.texts.contains_key(locator.expr()) => Ok(()),
            _ => Err(CartographError::Timeout(
                timeout.as_millis() as u64,
                locator.to_string(),
            )),
        }
    }

    async fn wait_fixed(&self, duration: Duration) {
        self.record(Gesture::Wait(duration));
    }

    async fn click(&self, handle: &MockHandle) -> Result<()> {
        let MockHandle::Item(index) = handle else {
            return Err(CartographError::Other("not clickable".into()));
        };
        self.record(Gesture::Click(*index));
        if self.items.get(*index).is_none_or(|item| item.fail_click) {
            return Err(CartographError::Browser(format!("click on item {} failed", index)));
        }
        self.state.lock().unwrap().open = Some(*index);
        Ok(())
    }

    async fn hover(&self, locator: &Locator) -> Result<()> {
        self.record(Gesture::Hover(locator.expr().to_string()));
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self
            .open_item()
            .map(|item| item.url.clone())
            .unwrap_or_else(|| "mock://results".to_string()))
    }
}
