//! Browser session bootstrap and interaction, on the Chrome DevTools
//! Protocol via chromiumoxide.
//!
//! [`Session::launch`] starts a headful browser against the user's
//! persistent Chrome profile so an existing Google login is reused. When
//! Chrome itself will not start, a system Chromium with a throwaway profile
//! is tried exactly once before the failure propagates.

mod element;
mod error;

pub use element::{Strategy, Target};
pub use error::DriverError;

use std::path::{Path, PathBuf};
use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::browser::{
    Bounds, GetWindowForTargetParams, SetDownloadBehaviorBehavior, SetDownloadBehaviorParams,
    SetWindowBoundsParams, WindowState,
};
use chromiumoxide::cdp::browser_protocol::input::{
    DispatchKeyEventParams, DispatchKeyEventType, DispatchMouseEventParams,
    DispatchMouseEventType,
};
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::{Element, Page};
use futures::StreamExt;
use tokio::task::JoinHandle;

use crate::resolve;

/// Interval between element-lookup attempts while waiting.
const POLL: Duration = Duration::from_millis(500);

/// Browser engines the bootstrap can start, in fallback order.
#[derive(Debug, Clone, Copy)]
pub enum Engine {
    Chrome,
    Chromium,
}

/// One controllable browser with a single driven page.
pub struct Session {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
    temp_profile: Option<PathBuf>,
}

/// Try `primary`; on error hand the failure to `fallback` for exactly one
/// more attempt. A success on the first try never invokes the fallback.
pub async fn launch_with_fallback<T, E, F1, F2, Fut1, Fut2>(
    primary: F1,
    fallback: F2,
) -> Result<T, E>
where
    F1: FnOnce() -> Fut1,
    F2: FnOnce(&E) -> Fut2,
    Fut1: Future<Output = Result<T, E>>,
    Fut2: Future<Output = Result<T, E>>,
{
    match primary().await {
        Ok(v) => Ok(v),
        Err(e) => fallback(&e).await,
    }
}

fn find_in_path(names: &[&str]) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    for dir in std::env::split_paths(&path) {
        for name in names {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }
    None
}

/// Read the DevToolsActivePort file an already-running debuggable Chrome
/// leaves in its user-data directory.
fn devtools_ws_url() -> Option<String> {
    let port_file = resolve::chrome_profile_dir().join("DevToolsActivePort");
    let content = std::fs::read_to_string(port_file).ok()?;
    let mut lines = content.lines();
    let port = lines.next()?.trim();
    let path = lines.next()?.trim();
    Some(format!("ws://127.0.0.1:{port}{path}"))
}

impl Session {
    /// Launch Chrome against the persistent profile; fall back to Chromium
    /// once if that fails.
    pub async fn launch() -> Result<Self, DriverError> {
        launch_with_fallback(
            || Self::launch_engine(Engine::Chrome),
            |e| {
                println!("Chrome failed: {e}");
                println!("Trying Chromium...");
                Self::launch_engine(Engine::Chromium)
            },
        )
        .await
    }

    async fn launch_engine(engine: Engine) -> Result<Self, DriverError> {
        let mut temp_profile = None;
        let mut builder = BrowserConfig::builder()
            .with_head()
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage");

        match engine {
            Engine::Chrome => {
                builder = builder
                    .user_data_dir(resolve::chrome_profile_dir())
                    .arg("--profile-directory=Default");
            }
            Engine::Chromium => {
                let exe = find_in_path(&["chromium", "chromium-browser"])
                    .ok_or(DriverError::NoExecutable("chromium"))?;
                // Chromium gets a throwaway profile: pointing it at the
                // Chrome profile would corrupt it.
                let dir = std::env::temp_dir()
                    .join(format!("gmail-oauth-setup-{}", std::process::id()));
                std::fs::create_dir_all(&dir)?;
                builder = builder.chrome_executable(exe).user_data_dir(&dir);
                temp_profile = Some(dir);
            }
        }

        let config = builder.build().map_err(DriverError::Launch)?;
        let (browser, mut handler) = Browser::launch(config).await?;
        let handler_task = tokio::spawn(async move {
            while handler.next().await.is_some() {}
        });
        let page = browser.new_page("about:blank").await?;

        Ok(Self {
            browser,
            page,
            handler_task,
            temp_profile,
        })
    }

    /// Attach to an already-running debuggable Chrome, picking the most
    /// recently opened real tab. Returns `None` when none is reachable.
    pub async fn connect_existing() -> Option<Self> {
        let url = devtools_ws_url().unwrap_or_else(|| "http://127.0.0.1:9222".to_string());
        let (mut browser, mut handler) = match Browser::connect(url.as_str()).await {
            Ok(pair) => pair,
            Err(e) => {
                println!("No debuggable browser at {url}: {e}");
                return None;
            }
        };
        let handler_task = tokio::spawn(async move {
            while handler.next().await.is_some() {}
        });

        // Targets opened before we attached are not known yet.
        let _ = browser.fetch_targets().await;
        tokio::time::sleep(Duration::from_millis(100)).await;

        let pages = browser.pages().await.unwrap_or_default();
        let mut picked = None;
        for page in pages.iter().rev() {
            if let Ok(Some(url)) = page.url().await {
                if !url.starts_with("chrome://") {
                    picked = Some(page.clone());
                    break;
                }
            }
        }
        let page = match picked.or_else(|| pages.last().cloned()) {
            Some(p) => p,
            None => browser.new_page("about:blank").await.ok()?,
        };

        Some(Self {
            browser,
            page,
            handler_task,
            temp_profile: None,
        })
    }

    pub async fn goto(&self, url: &str) -> Result<(), DriverError> {
        self.page.goto(url).await?;
        Ok(())
    }

    /// Current page URL, or `None` when it cannot be read.
    pub async fn current_url(&self) -> Option<String> {
        self.page.url().await.ok().flatten()
    }

    /// Point the browser's default download directory at `dir`.
    pub async fn allow_downloads_to(&self, dir: &Path) -> Result<(), DriverError> {
        let params = SetDownloadBehaviorParams::builder()
            .behavior(SetDownloadBehaviorBehavior::Allow)
            .download_path(dir.to_string_lossy().to_string())
            .build()
            .map_err(DriverError::Protocol)?;
        self.page.execute(params).await?;
        Ok(())
    }

    /// Maximize the browser window (best-effort on platforms that report a
    /// window for the target).
    pub async fn maximize(&self) -> Result<(), DriverError> {
        let target_id = self.page.target_id();
        let window = self
            .page
            .execute(GetWindowForTargetParams {
                target_id: Some(target_id.clone()),
            })
            .await?;
        let bounds = Bounds {
            left: None,
            top: None,
            width: None,
            height: None,
            window_state: Some(WindowState::Maximized),
        };
        self.page
            .execute(SetWindowBoundsParams {
                window_id: window.window_id.clone(),
                bounds,
            })
            .await?;
        Ok(())
    }

    /// Wait for `target`'s primary strategy up to `timeout`, polling; on
    /// expiry the fallback strategy gets one immediate attempt.
    pub async fn wait_for(&self, target: &Target, timeout: Duration) -> Result<Element, DriverError> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            match element::locate(&self.page, &target.primary).await {
                Ok(el) => return Ok(el),
                Err(_) if tokio::time::Instant::now() < deadline => {
                    tokio::time::sleep(POLL).await;
                }
                Err(_) => break,
            }
        }
        if let Some(fallback) = &target.fallback {
            println!("    Primary selector failed for {} -- trying {fallback}", target.what);
            if let Ok(el) = element::locate(&self.page, fallback).await {
                return Ok(el);
            }
        }
        Err(DriverError::WaitTimeout {
            what: target.what.to_string(),
            seconds: timeout.as_secs(),
        })
    }

    /// Wait for `target` and click it.
    pub async fn click(&self, target: &Target, timeout: Duration) -> Result<(), DriverError> {
        let el = self.wait_for(target, timeout).await?;
        el.click().await?;
        Ok(())
    }

    /// Wait for `target`, clear it, and type `text` into it.
    pub async fn fill(
        &self,
        target: &Target,
        text: &str,
        timeout: Duration,
    ) -> Result<(), DriverError> {
        let el = self.wait_for(target, timeout).await?;
        el.click().await?;
        self.select_all().await?;
        el.type_str(text).await?;
        Ok(())
    }

    // Select-all so the subsequent typing replaces existing content.
    async fn select_all(&self) -> Result<(), DriverError> {
        let down = DispatchKeyEventParams::builder()
            .r#type(DispatchKeyEventType::KeyDown)
            .key("a")
            .modifiers(2) // ctrl
            .build()
            .map_err(DriverError::Protocol)?;
        self.page.execute(down).await?;
        let up = DispatchKeyEventParams::builder()
            .r#type(DispatchKeyEventType::KeyUp)
            .key("a")
            .build()
            .map_err(DriverError::Protocol)?;
        self.page.execute(up).await?;
        Ok(())
    }

    /// Move the pointer to page coordinates without clicking.
    pub async fn move_mouse(&self, x: f64, y: f64) -> Result<(), DriverError> {
        let params = DispatchMouseEventParams::builder()
            .r#type(DispatchMouseEventType::MouseMoved)
            .x(x)
            .y(y)
            .build()
            .map_err(DriverError::Protocol)?;
        self.page.execute(params).await?;
        Ok(())
    }

    /// Viewport size in CSS pixels.
    pub async fn viewport(&self) -> Result<(i64, i64), DriverError> {
        let metrics = self.page.layout_metrics().await?;
        let v = metrics.css_layout_viewport;
        Ok((v.client_width, v.client_height))
    }

    /// Capture the page as a PNG at `path`.
    pub async fn screenshot_to(&self, path: &Path) -> Result<(), DriverError> {
        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .build();
        self.page.save_screenshot(params, path).await?;
        Ok(())
    }

    /// Drop the CDP connection without closing an attached browser. Used
    /// when the session was connected to, not launched.
    pub fn detach(self) {
        self.handler_task.abort();
    }

    /// Shut the browser down and drop the CDP event task. Runs on every
    /// exit path of the flow.
    pub async fn close(mut self) {
        let _ = self.browser.close().await;
        let _ = self.browser.wait().await;
        self.handler_task.abort();
        if let Some(dir) = &self.temp_profile {
            let _ = std::fs::remove_dir_all(dir);
        }
    }
}
