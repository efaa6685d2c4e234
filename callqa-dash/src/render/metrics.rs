//! Call metrics, speaker statistics and the critical-error badge

use super::{count, metric, number, percent, text_or_na, Element, Node, Placement, Surface, Target};
use callqa_common::models::{MetadataDoc, SpeakerStats};
use callqa_common::time_format::format_mmss;

/// Injection key of the badge placed after the Part-1 tab
pub const CRITICAL_BADGE_KEY: &str = "critical-badge";

/// Top-line metrics, plus the MER link when the document has one
pub fn render_metrics(doc: &MetadataDoc) -> Vec<Node> {
    let top = &doc.top;
    let asked = match (top.questions_asked, top.total_questions) {
        (None, None) => count(None),
        (asked, total) => format!("{} / {}", count(asked), count(total)),
    };

    let mut nodes = vec![
        metric("Accuracy", percent(top.accuracy)),
        metric("Questions Asked", asked),
        metric("Questions Missed", count(top.questions_missed)),
        metric("Documentation Errors", count(top.documentation_errors)),
        metric("Critical Errors", count(top.critical_errors)),
        metric("Paraphrased Responses", count(top.paraphrased_responses)),
        metric("Clubbed Questions", count(top.clubbed_questions)),
        metric("Call Duration", text_or_na(top.duration.as_deref())),
    ];

    if let Some(url) = doc.mer_pdf_url.as_deref().filter(|u| is_safe_link(u)) {
        nodes.push(
            Element::new("a")
                .id("mer-link")
                .class("mer-link")
                .attr("href", url)
                .attr("target", "_blank")
                .text("View MER")
                .into(),
        );
    }
    nodes
}

/// Whether `url` may be used as a link target: `http`, `https` or relative
fn is_safe_link(url: &str) -> bool {
    if url.is_empty() || url.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return false;
    }
    // A scheme is whatever precedes the first ':' when no '/', '?' or '#' comes first
    let scheme_end = url.find(|c: char| matches!(c, ':' | '/' | '?' | '#'));
    match scheme_end {
        Some(i) if url[i..].starts_with(':') => {
            let scheme = url[..i].to_ascii_lowercase();
            scheme == "http" || scheme == "https"
        }
        _ => true,
    }
}

fn talk_time(seconds: Option<f64>, pct: Option<f64>) -> String {
    match seconds {
        Some(s) => format!("{} ({})", format_mmss(s), percent(pct)),
        None => percent(pct),
    }
}

fn rate(wpm: Option<f64>) -> String {
    match wpm {
        Some(w) if w.is_finite() && w > 0.0 => format!("{} wpm", number(w.round())),
        _ => super::NOT_AVAILABLE.to_string(),
    }
}

pub fn render_speaker_stats(stats: &SpeakerStats) -> Vec<Node> {
    vec![
        metric("Agent", talk_time(stats.agent_seconds, stats.agent_pct)),
        metric("Customer", talk_time(stats.customer_seconds, stats.customer_pct)),
        metric("Dead Air", talk_time(stats.dead_air_seconds, stats.dead_air_pct)),
        metric("Doctor Rate of Speech", rate(stats.doctor_wpm)),
        metric("Customer Rate of Speech", rate(stats.customer_wpm)),
    ]
}

/// Badge with the critical-error count
pub fn critical_badge(doc: &MetadataDoc) -> Node {
    let errors = doc.top.critical_errors.filter(|v| v.is_finite()).unwrap_or(0.0);
    let mut badge = Element::new("span")
        .id("critical-badge")
        .class("badge")
        .attr("title", "Critical errors")
        .text(count(Some(errors)));
    if errors > 0.0 {
        badge = badge.class("badge-critical");
    }
    badge.into()
}

/// Replace the metrics and speaker panels and (re)place the badge
pub fn draw(doc: &MetadataDoc, surface: &mut dyn Surface) {
    surface.replace(Target::Metrics, render_metrics(doc));
    surface.replace(Target::SpeakerStats, render_speaker_stats(&doc.speaker));
    surface.inject(
        CRITICAL_BADGE_KEY,
        Target::Part1Tab,
        Placement::After,
        critical_badge(doc),
    );
}
