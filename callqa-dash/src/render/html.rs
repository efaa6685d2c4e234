//! HTML serialisation of a headless page
//!
//! Produces a complete standalone document with print styling. Hidden views
//! are kept in the markup with the `hidden` attribute; print styling shows
//! both parts so the printed report carries everything.

use super::node::{Element, Node};
use super::surface::{HeadlessDocument, Placement, Target};
use std::fmt::Write;

const PART1_REGIONS: &[Target] = &[
    Target::Metrics,
    Target::SpeakerStats,
    Target::Summary,
    Target::Particulars,
    Target::Compliance,
    Target::QuestionMatrix,
    Target::PrimaryTime,
    Target::Transcript,
];

const PART2_REGIONS: &[Target] = &[Target::QcParameters, Target::SecondaryTime];

const STYLE: &str = r#"
        * { box-sizing: border-box; }
        body {
            font-family: system-ui, -apple-system, sans-serif;
            margin: 0;
            padding: 20px;
            color: #1f2937;
            line-height: 1.5;
        }
        .alert { background: #fee2e2; color: #991b1b; padding: 12px; margin-bottom: 12px; }
        nav.tabs { display: flex; gap: 8px; align-items: center; margin-bottom: 16px; }
        .tab { padding: 6px 14px; border: 1px solid #d1d5db; background: #f9fafb; }
        .tab.active { background: #2563eb; color: #fff; }
        .badge { border-radius: 10px; padding: 2px 8px; background: #e5e7eb; font-size: 12px; }
        .badge-critical { background: #dc2626; color: #fff; }
        .metric { display: flex; justify-content: space-between; padding: 2px 0; }
        .metric-label { color: #6b7280; margin-right: 12px; }
        table { border-collapse: collapse; width: 100%; }
        td, th { border: 1px solid #e5e7eb; padding: 4px 8px; text-align: left; vertical-align: top; }
        .status-incorrect, .status-missing { background: #fef2f2; }
        .segment { padding: 4px 0; }
        .segment.highlight { background: #fef08a; }
        .segment-time { color: #6b7280; margin-right: 8px; }
        .segment-speaker { font-weight: 600; margin-right: 8px; }
        .score-card { border: 1px solid #d1d5db; padding: 12px; margin-bottom: 16px; }
        .no-data { color: #6b7280; font-style: italic; }
        .mismatch, .fail { color: #b91c1c; }
        footer { margin-top: 24px; color: #9ca3af; font-size: 12px; font-family: monospace; }
        @media print {
            nav.tabs, button.timestamp, .player, footer { display: none; }
            .view[hidden] { display: block; }
            .view { page-break-after: always; }
            tr, .segment, .score-card { page-break-inside: avoid; }
        }
"#;

/// Escape text for element content and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Serialise one node
pub fn node_to_html(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => out.push_str(&escape(text)),
        Node::Element(el) => element_to_html(el, out),
    }
}

fn element_to_html(el: &Element, out: &mut String) {
    out.push('<');
    out.push_str(el.tag);
    if let Some(id) = &el.id {
        let _ = write!(out, " id=\"{}\"", escape(id));
    }
    if !el.classes.is_empty() {
        let _ = write!(out, " class=\"{}\"", escape(&el.classes.join(" ")));
    }
    for (name, value) in &el.attrs {
        let _ = write!(out, " {}=\"{}\"", name, escape(value));
    }
    out.push('>');
    for child in &el.children {
        node_to_html(child, out);
    }
    let _ = write!(out, "</{}>", el.tag);
}

fn has_content(doc: &HeadlessDocument, target: Target) -> bool {
    !doc.content(target).is_empty()
        || doc.injections_at(target, Placement::Before).next().is_some()
        || doc.injections_at(target, Placement::After).next().is_some()
}

fn injections(doc: &HeadlessDocument, target: Target, placement: Placement, out: &mut String) {
    for injection in doc.injections_at(target, placement) {
        node_to_html(&injection.node, out);
    }
}

fn region(doc: &HeadlessDocument, target: Target, out: &mut String) {
    injections(doc, target, Placement::Before, out);
    let _ = write!(out, "<div id=\"{}\" class=\"region\"", target.id());
    if !doc.is_visible(target) {
        out.push_str(" hidden");
    }
    out.push('>');
    for node in doc.content(target) {
        node_to_html(node, out);
    }
    out.push_str("</div>");
    injections(doc, target, Placement::After, out);
    out.push('\n');
}

fn view(doc: &HeadlessDocument, target: Target, regions: &[Target], out: &mut String) {
    if !regions.iter().any(|r| has_content(doc, *r)) {
        return;
    }
    let _ = write!(out, "<section id=\"{}\" class=\"view\"", target.id());
    if !doc.is_visible(target) {
        out.push_str(" hidden");
    }
    out.push_str(">\n");
    for r in regions {
        region(doc, *r, out);
    }
    out.push_str("</section>\n");
}

/// Serialise the whole page
///
/// `generated_at` is shown in the footer next to the build identification.
pub fn to_html(doc: &HeadlessDocument, title: &str, generated_at: &str) -> String {
    let mut body = String::new();

    for alert in doc.alerts() {
        let _ = writeln!(body, "<div class=\"alert\" role=\"alert\">{}</div>", escape(alert));
    }

    if has_content(doc, Target::Part1Tab) || has_content(doc, Target::Part2Tab) {
        body.push_str("<nav class=\"tabs\">\n");
        region(doc, Target::Part1Tab, &mut body);
        region(doc, Target::Part2Tab, &mut body);
        body.push_str("</nav>\n");
    }

    view(doc, Target::Part1View, PART1_REGIONS, &mut body);
    view(doc, Target::Part2View, PART2_REGIONS, &mut body);

    if has_content(doc, Target::RecordOverview) {
        region(doc, Target::RecordOverview, &mut body);
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{style}</style>
</head>
<body>
{body}<footer>
    <div>callqa-dash v{version} [{git_hash}] {profile}</div>
    <div>Built {build_timestamp}, generated {generated_at}</div>
</footer>
</body>
</html>
"#,
        title = escape(title),
        style = STYLE,
        body = body,
        version = env!("CARGO_PKG_VERSION"),
        git_hash = env!("GIT_HASH"),
        profile = env!("BUILD_PROFILE"),
        build_timestamp = env!("BUILD_TIMESTAMP"),
        generated_at = escape(generated_at),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Surface;

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn test_injections_surround_anchor() {
        let mut doc = HeadlessDocument::new();
        doc.replace(Target::QcParameters, vec![Node::text("params")]);
        doc.inject(
            "card",
            Target::QcParameters,
            Placement::Before,
            Element::new("div").id("card").into(),
        );
        let html = to_html(&doc, "Call QA", "now");

        let card = html.find("id=\"card\"").unwrap();
        let params = html.find("id=\"qc-parameters\"").unwrap();
        assert!(card < params);
        assert!(html.contains("<section id=\"part2\" class=\"view\">"));
        // Part 1 has no content and is left out
        assert!(!html.contains("id=\"part1\""));
    }

    #[test]
    fn test_hidden_view_and_alert() {
        let mut doc = HeadlessDocument::new();
        doc.replace(Target::Metrics, vec![Node::text("<m>")]);
        doc.set_visible(Target::Part1View, false);
        doc.alert("Failed to load dashboard data");
        let html = to_html(&doc, "t", "now");

        assert!(html.contains("<section id=\"part1\" class=\"view\" hidden>"));
        assert!(html.contains("&lt;m&gt;"));
        assert!(html.contains("role=\"alert\">Failed to load dashboard data</div>"));
    }
}
