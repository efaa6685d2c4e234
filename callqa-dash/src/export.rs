//! Print export
//!
//! Waits the configured print delay so in-flight drawing settles, then
//! serialises the page as a standalone printable HTML document.

use crate::error::Result;
use crate::render::html;
use crate::render::HeadlessDocument;
use callqa_common::models::CallReference;
use std::path::Path;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::info;

const TITLE: &str = "Call QA Dashboard";

pub fn page_title(call: Option<&CallReference>) -> String {
    match call {
        Some(c) => format!("{} - Record {}, Call {}", TITLE, c.record_id, c.call_id),
        None => TITLE.to_string(),
    }
}

/// Snapshot the page after `delay`
pub async fn print_snapshot(surface: &Mutex<HeadlessDocument>, delay: Duration, title: &str) -> String {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    let generated_at = chrono::Local::now()
        .format("%Y-%m-%d %H:%M:%S %Z")
        .to_string();
    let doc = surface.lock().await;
    html::to_html(&doc, title, &generated_at)
}

/// Write a snapshot to `path`
pub async fn write_snapshot(path: &Path, html: &str) -> Result<()> {
    tokio::fs::write(path, html).await?;
    info!(path = %path.display(), bytes = html.len(), "Wrote dashboard snapshot");
    Ok(())
}
