use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::input::{
    DispatchKeyEventParams, DispatchKeyEventType, DispatchMouseEventParams,
    DispatchMouseEventType,
};
use chromiumoxide::element::Element;
use chromiumoxide::keys;
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::app::{CartographError, Result};
use crate::config::BrowserSettings;
use crate::domain::Locator;
use crate::view::View;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// A single Chrome tab driven over CDP via chromiumoxide.
pub struct ChromeView {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
    settings: BrowserSettings,
    /// Where the mouse was last moved; wheel events are dispatched here.
    pointer: Mutex<(f64, f64)>,
}

impl ChromeView {
    /// Launch a browser and open one blank tab.
    pub async fn launch(settings: &BrowserSettings) -> Result<Self> {
        let mut builder = BrowserConfig::builder()
            .arg("--no-sandbox")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-software-rasterizer")
            .window_size(settings.window_width, settings.window_height)
            .request_timeout(settings.timeout());

        if !settings.headless {
            builder = builder.with_head();
        }
        if let Some(ref path) = settings.executable {
            builder = builder.chrome_executable(path);
        }
        if let Some(ref ua) = settings.user_agent {
            builder = builder.arg(format!("--user-agent={}", ua));
        }

        let browser_config = builder.build().map_err(|e| {
            CartographError::Browser(format!("Failed to build browser config: {}", e))
        })?;

        let (browser, mut handler) = Browser::launch(browser_config).await.map_err(|e| {
            CartographError::Browser(format!(
                "Failed to launch browser: {}. Is Chrome or Chromium installed and in PATH?",
                e
            ))
        })?;

        let handler = tokio::spawn(async move {
            while let Some(_event) = handler.next().await {
                // Drive the CDP connection
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| CartographError::Browser(format!("Failed to create page: {}", e)))?;

        Ok(Self {
            browser,
            page,
            handler,
            pointer: Mutex::new((settings.wheel_x, settings.wheel_y)),
            settings: settings.clone(),
        })
    }

    /// Close the browser and stop the CDP handler.
    pub async fn close(mut self) -> Result<()> {
        let closed = self
            .browser
            .close()
            .await
            .map_err(|e| CartographError::Browser(format!("Failed to close browser: {}", e)));
        if let Err(e) = self.browser.wait().await {
            warn!(error = %e, "browser process did not exit cleanly");
        }
        self.handler.abort();
        closed.map(|_| ())
    }

    async fn find_first(&self, locator: &Locator) -> Result<Element> {
        let found = match locator {
            Locator::XPath(expr) => self.page.find_xpath(expr.as_str()).await,
            Locator::Css(expr) => self.page.find_element(expr.as_str()).await,
        };
        found.map_err(|e| CartographError::NotFound(format!("{}: {}", locator, e)))
    }

    async fn find_all(&self, locator: &Locator) -> Result<Vec<Element>> {
        let found = match locator {
            Locator::XPath(expr) => self.page.find_xpaths(expr.as_str()).await,
            Locator::Css(expr) => self.page.find_elements(expr.as_str()).await,
        };
        found.map_err(|e| CartographError::Browser(format!("Lookup {} failed: {}", locator, e)))
    }

    async fn dispatch_key(&self, params: DispatchKeyEventParams) -> Result<()> {
        self.page
            .execute(params)
            .await
            .map_err(|e| CartographError::Browser(format!("Key event failed: {}", e)))?;
        Ok(())
    }
}

/// keyDown/keyUp pair for `key`, built from chromiumoxide's key table.
///
/// Keys that produce text (Enter sends `"\r"`) get a `keyDown` carrying it so
/// the page sees a keypress; the rest are sent as `rawKeyDown`.
fn key_events(key: &str) -> Result<(DispatchKeyEventParams, DispatchKeyEventParams)> {
    let definition = keys::get_key_definition(key)
        .ok_or_else(|| CartographError::Other(format!("Unknown key: {}", key)))?;

    let text = definition
        .text
        .or_else(|| (definition.key.len() == 1).then_some(definition.key));

    let mut down = DispatchKeyEventParams::builder()
        .key(definition.key)
        .code(definition.code)
        .windows_virtual_key_code(definition.key_code)
        .native_virtual_key_code(definition.key_code);
    down = match text {
        Some(text) => down.r#type(DispatchKeyEventType::KeyDown).text(text),
        None => down.r#type(DispatchKeyEventType::RawKeyDown),
    };

    let up = DispatchKeyEventParams::builder()
        .r#type(DispatchKeyEventType::KeyUp)
        .key(definition.key)
        .code(definition.code)
        .windows_virtual_key_code(definition.key_code)
        .native_virtual_key_code(definition.key_code);

    Ok((
        down.build().map_err(CartographError::Browser)?,
        up.build().map_err(CartographError::Browser)?,
    ))
}

/// JS function run with the handle as `this`, returning the inner text of
/// the first descendant matching `locator`.
fn nested_text_fn(locator: &Locator) -> Result<String> {
    let expr = serde_json::to_string(locator.expr())
        .map_err(|e| CartographError::Other(format!("Invalid locator {}: {}", locator, e)))?;
    let lookup = match locator {
        Locator::XPath(_) => format!(
            "document.evaluate({expr}, this, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue"
        ),
        Locator::Css(_) => format!("this.querySelector({expr})"),
    };
    Ok(format!(
        "function() {{ const node = {lookup}; return node ? node.innerText : null; }}"
    ))
}

#[async_trait]
impl View for ChromeView {
    type Handle = Element;

    async fn navigate_to(&self, url: &str) -> Result<()> {
        let timeout = self.settings.timeout();
        tokio::time::timeout(timeout, self.page.goto(url))
            .await
            .map_err(|_| CartographError::Timeout(timeout.as_millis() as u64, url.to_string()))?
            .map_err(|e| CartographError::Browser(format!("Navigation failed: {}", e)))?;
        Ok(())
    }

    async fn fill_field(&self, locator: &Locator, text: &str) -> Result<()> {
        let element = self.find_first(locator).await?;
        element
            .click()
            .await
            .map_err(|e| CartographError::Browser(format!("Focus {} failed: {}", locator, e)))?;
        element
            .call_js_fn("function() { this.value = ''; }", false)
            .await
            .map_err(|e| CartographError::Browser(format!("Clear {} failed: {}", locator, e)))?;
        element
            .type_str(text)
            .await
            .map_err(|e| CartographError::Browser(format!("Typing into {} failed: {}", locator, e)))?;
        Ok(())
    }

    async fn press_key(&self, key: &str) -> Result<()> {
        let (down, up) = key_events(key)?;
        self.dispatch_key(down).await?;
        self.dispatch_key(up).await
    }

    async fn count(&self, locator: &Locator) -> Result<usize> {
        Ok(self.find_all(locator).await?.len())
    }

    async fn list_handles(&self, locator: &Locator, limit: usize) -> Result<Vec<Element>> {
        let mut elements = self.find_all(locator).await?;
        elements.truncate(limit);
        Ok(elements)
    }

    async fn inner_text(&self, locator: &Locator) -> Result<String> {
        let element = self.find_first(locator).await?;
        let text = element
            .inner_text()
            .await
            .map_err(|e| CartographError::Browser(format!("Reading {} failed: {}", locator, e)))?;
        Ok(text.unwrap_or_default())
    }

    async fn text_within(&self, handle: &Element, locator: Option<&Locator>) -> Result<String> {
        let Some(locator) = locator else {
            let text = handle
                .inner_text()
                .await
                .map_err(|e| CartographError::Browser(format!("Reading element failed: {}", e)))?;
            return Ok(text.unwrap_or_default());
        };

        let returns = handle
            .call_js_fn(nested_text_fn(locator)?, false)
            .await
            .map_err(|e| CartographError::Browser(format!("Reading {} failed: {}", locator, e)))?;
        returns
            .result
            .value
            .and_then(|v| v.as_str().map(str::to_string))
            .ok_or_else(|| CartographError::NotFound(locator.to_string()))
    }

    async fn scroll_by(&self, dx: f64, dy: f64) -> Result<()> {
        let (x, y) = *self
            .pointer
            .lock()
            .map_err(|e| CartographError::Other(e.to_string()))?;
        let params = DispatchMouseEventParams::builder()
            .r#type(DispatchMouseEventType::MouseWheel)
            .x(x)
            .y(y)
            .delta_x(dx)
            .delta_y(dy)
            .build()
            .map_err(CartographError::Browser)?;

        self.page
            .execute(params)
            .await
            .map_err(|e| CartographError::Browser(format!("Scroll failed: {}", e)))?;
        Ok(())
    }

    async fn wait_for_selector(&self, locator: &Locator, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if let Ok(Ok(_)) = tokio::time::timeout(remaining, self.find_first(locator)).await {
                return Ok(());
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(CartographError::Timeout(
                    timeout.as_millis() as u64,
                    locator.to_string(),
                ));
            }
            tokio::time::sleep(POLL_INTERVAL.min(remaining)).await;
        }
    }

    async fn click(&self, handle: &Element) -> Result<()> {
        handle
            .click()
            .await
            .map_err(|e| CartographError::Browser(format!("Click failed: {}", e)))?;
        Ok(())
    }

    async fn hover(&self, locator: &Locator) -> Result<()> {
        let element = self.find_first(locator).await?;
        element
            .scroll_into_view()
            .await
            .map_err(|e| CartographError::Browser(format!("Scroll to {} failed: {}", locator, e)))?;
        let point = element
            .clickable_point()
            .await
            .map_err(|e| CartographError::Browser(format!("No point for {}: {}", locator, e)))?;
        let position = (point.x, point.y);
        self.page
            .move_mouse(point)
            .await
            .map_err(|e| CartographError::Browser(format!("Hover {} failed: {}", locator, e)))?;

        match self.pointer.lock() {
            Ok(mut pointer) => *pointer = position,
            Err(e) => debug!(error = %e, "pointer position not recorded"),
        }
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        let url = self
            .page
            .url()
            .await
            .map_err(|e| CartographError::Browser(format!("Reading url failed: {}", e)))?;
        Ok(url.unwrap_or_default())
    }
}
