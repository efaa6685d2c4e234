//! Record overview: aggregate score, per-call links and final decision

use super::{humanize, number, text_or_dash, Element, Node, Surface, Target, DASH};
use callqa_common::models::{CallReference, RecordDoc, DECISION_CATEGORIES};
use callqa_common::scoring::MAX_SCORE;

pub const NOT_PROCESSED: &str = "Not processed yet";
pub const LOAD_FAILED: &str = "Failed to load record";

/// Dashboard page for one call of a record
pub fn call_page_url(call: &CallReference) -> String {
    format!(
        "/index.html?rid={}&call={}",
        urlencoding::encode(&call.record_id),
        urlencoding::encode(&call.call_id)
    )
}

fn header(record: &RecordDoc) -> Node {
    let agg = &record.aggregate;
    let total = agg.total_score.unwrap_or(0.0);
    let max = agg.max_score.unwrap_or(MAX_SCORE);
    Element::new("div")
        .class("aggregate")
        .child(Element::new("div").text(format!("{} / {} Total", number(total), number(max))))
        .child(Element::new("div").text(format!(
            "{}% Score",
            number(agg.percentage.unwrap_or(0.0))
        )))
        .child(Element::new("div").text(text_or_dash(agg.category.as_deref())))
        .into()
}

fn calls(record: &RecordDoc, record_id: &str) -> Node {
    Element::new("ul")
        .class("record-calls")
        .children(record.calls.iter().filter_map(|call| {
            let index = number(call.index?);
            let duration = call
                .duration_sec
                .map(callqa_common::time_format::format_mmss)
                .unwrap_or_else(|| DASH.to_string());
            let url = call_page_url(&CallReference::new(record_id, index.as_str()));
            Some(
                Element::new("li").child(
                    Element::new("a")
                        .attr("href", url)
                        .text(format!("Call {} ({})", index, duration)),
                ),
            )
        }))
        .into()
}

fn decision(record: &RecordDoc) -> Vec<Node> {
    let mut nodes = vec![Element::new("h3").text("Final Decision").into()];
    for category in DECISION_CATEGORIES {
        let issues = record.decision_issues(category);
        if issues.is_empty() {
            continue;
        }
        let items = issues.into_iter().map(|issue| {
            let text = match issue.details {
                Some(details) => format!("{}: {}", issue.issue, details),
                None => issue.issue,
            };
            Element::new("li").text(text)
        });
        let count = items.len();
        nodes.push(
            Element::new("div")
                .class("decision")
                .attr("data-category", *category)
                .child(Element::new("b").text(*category))
                .child(Element::new("span").class("badge").text(count.to_string()))
                .child(Element::new("ul").children(items))
                .into(),
        );
    }
    nodes
}

/// Overview of a record, or the "not processed" state
pub fn render(record: &RecordDoc, record_id: &str) -> Vec<Node> {
    if !record.is_processed() {
        return vec![Element::new("p").class("no-data").text(NOT_PROCESSED).into()];
    }

    let id = record.id.as_deref().unwrap_or(record_id);
    let mut nodes = vec![
        Element::new("h2").text(format!("Record: {}", id)).into(),
        header(record),
        Element::new("div")
            .class("breakdown")
            .children(record.aggregate.breakdown.iter().map(|(item, points)| {
                Element::new("div").text(format!("{}: {}", humanize(item), number(*points)))
            }))
            .into(),
        calls(record, id),
    ];
    nodes.extend(decision(record));
    nodes
}

pub fn draw(record: &RecordDoc, record_id: &str, surface: &mut dyn Surface) {
    surface.replace(Target::RecordOverview, render(record, record_id));
}
