//! View renderers
//!
//! Each renderer maps one fetched document to a list of [`Node`]s without
//! touching the page. The `draw` function of each module places those nodes
//! on a [`Surface`]: region content is replaced wholesale, while the badge
//! and score card use keyed injections so repeated draws never duplicate.
//!
//! Every field may be absent; absent values render as a placeholder.

pub mod html;
pub mod matrix;
pub mod metrics;
pub mod node;
pub mod qc;
pub mod record;
pub mod report;
pub mod score;
pub mod surface;
pub mod transcript;

pub use node::{Element, Node};
pub use surface::{HeadlessDocument, Placement, Surface, Target};

/// Placeholder for a missing text or percentage
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder for a missing cell or list entry
pub const DASH: &str = "-";

/// Placeholder for a missing count
pub const ZERO: &str = "0";

/// Shown when no QC report could be resolved
pub const NO_DATA: &str = "No data";

/// Attribute carrying the `m:ss` time a timestamp control seeks to
pub const SEEK_ATTR: &str = "data-seek";

/// Text or "N/A" when absent or blank
pub(crate) fn text_or_na(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Text or "-" when absent or blank
pub(crate) fn text_or_dash(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => DASH.to_string(),
    }
}

/// Count or "0"; whole numbers print without a fraction
pub(crate) fn count(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => number(v),
        _ => ZERO.to_string(),
    }
}

/// Percentage or "N/A"
pub(crate) fn percent(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{}%", number(v)),
        _ => NOT_AVAILABLE.to_string(),
    }
}

pub(crate) fn yes_no(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "Yes",
        Some(false) => "No",
        None => NOT_AVAILABLE,
    }
}

pub(crate) fn number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{:.2}", v)
    }
}

/// `snake_case` key to a display label ("call_opening" → "Call Opening")
pub(crate) fn humanize(key: &str) -> String {
    key.split(['_', ' '])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Labelled value row
pub(crate) fn metric(label: &str, value: impl Into<String>) -> Node {
    Element::new("div")
        .class("metric")
        .child(Element::new("span").class("metric-label").text(label))
        .child(Element::new("span").class("metric-value").text(value))
        .into()
}

/// Control that seeks the active audio unit, or "-" when no time is known
pub(crate) fn timestamp_control(time: Option<&str>) -> Node {
    match time.map(str::trim) {
        Some(t) if !t.is_empty() => Element::new("button")
            .class("timestamp")
            .attr(SEEK_ATTR, t)
            .text(t)
            .into(),
        _ => Node::text(DASH),
    }
}

/// Bulleted list, or a single "-" entry when empty
pub(crate) fn bullet_list(items: &[String]) -> Node {
    let list = Element::new("ul");
    if items.is_empty() {
        return list.child(Element::new("li").class("empty").text(DASH)).into();
    }
    list.children(items.iter().map(|i| Element::new("li").text(i.as_str())))
        .into()
}

pub(crate) fn heading(text: &str) -> Node {
    Element::new("h3").text(text).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders() {
        assert_eq!(text_or_na(None), "N/A");
        assert_eq!(text_or_na(Some("  ")), "N/A");
        assert_eq!(text_or_dash(Some("x")), "x");
        assert_eq!(count(None), "0");
        assert_eq!(count(Some(3.0)), "3");
        assert_eq!(percent(Some(87.5)), "87.50%");
        assert_eq!(percent(Some(f64::NAN)), "N/A");
    }

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("call_opening"), "Call Opening");
        assert_eq!(humanize("greetings"), "Greetings");
    }

    #[test]
    fn test_timestamp_control() {
        let node = timestamp_control(Some("1:05"));
        let el = node.as_element().unwrap();
        assert_eq!(el.get_attr(SEEK_ATTR), Some("1:05"));
        assert_eq!(timestamp_control(Some("")), Node::text("-"));
    }
}
