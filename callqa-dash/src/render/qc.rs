//! QC parameter panel

use super::{humanize, text_or_dash, text_or_na, Element, Node, Surface, Target, NO_DATA};
use crate::reconciler::{ReportSource, ResolvedReport};
use callqa_common::models::{QcParameter, QcReport};

fn source_label(source: ReportSource) -> &'static str {
    match source {
        ReportSource::PerCall => "call report",
        ReportSource::Static => "configured report",
        ReportSource::MergedRecord => "merged record",
    }
}

fn timestamps(param: &QcParameter) -> Node {
    let cell = Element::new("td").class("qc-timestamps");
    if param.timestamps.is_empty() {
        return cell.text(super::DASH).into();
    }
    cell.children(param.timestamps.iter().map(|ts| {
        let text = match &ts.label {
            Some(label) => format!("{}: {}", humanize(label), ts.time),
            None => ts.time.clone(),
        };
        Element::new("button")
            .class("timestamp")
            .attr(super::SEEK_ATTR, ts.time.as_str())
            .text(text)
    }))
    .into()
}

fn row(name: &str, param: &QcParameter) -> Node {
    let value = text_or_na(param.value.as_deref());
    Element::new("tr")
        .class("qc-row")
        .child(Element::new("td").class("qc-name").text(humanize(name)))
        .child(
            Element::new("td")
                .class("qc-value")
                .class(format!("qc-{}", value.to_lowercase().replace([' ', '/'], "-")))
                .text(value),
        )
        .child(Element::new("td").text(text_or_dash(param.explanation.as_deref())))
        .child(timestamps(param))
        .into()
}

/// Table of parameters, or the "No data" state
pub fn render_report(report: Option<&QcReport>, source: Option<ReportSource>) -> Vec<Node> {
    let Some(report) = report.filter(|r| !r.qc_parameters.is_empty()) else {
        return vec![Element::new("p").class("no-data").text(NO_DATA).into()];
    };

    let mut nodes = vec![Element::new("table")
        .class("qc-parameters")
        .children(report.ordered().into_iter().map(|(name, p)| row(name, p)))
        .into()];
    if let Some(source) = source {
        nodes.push(
            Element::new("p")
                .class("qc-source")
                .text(format!("Source: {}", source_label(source)))
                .into(),
        );
    }
    nodes
}

pub fn render(resolved: &ResolvedReport) -> Vec<Node> {
    render_report(resolved.report.as_ref(), resolved.source)
}

pub fn draw(resolved: &ResolvedReport, surface: &mut dyn Surface) {
    surface.replace(Target::QcParameters, render(resolved));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::HeadlessDocument;
    use serde_json::json;

    #[test]
    fn test_absent_report_shows_no_data() {
        let mut surface = HeadlessDocument::new();
        draw(&ResolvedReport::default(), &mut surface);
        assert_eq!(surface.text(Target::QcParameters), NO_DATA);
    }

    #[test]
    fn test_empty_parameters_show_no_data() {
        let report = QcReport::from_document(&json!({"qc_parameters": {}})).unwrap();
        let nodes = render_report(Some(&report), Some(ReportSource::Static));
        assert_eq!(nodes[0].text_content(), NO_DATA);
    }

    #[test]
    fn test_rows_in_rubric_order_with_timestamps() {
        let report = QcReport::from_document(&json!({"qc_parameters": {
            "empathy": {"value": "NA"},
            "greetings": {"value": "Yes", "explanation": "Greeted", "timestamps": ["0:05"]},
            "disclaimer": {"value": "No", "timestamp": {"start": "1:10"}}
        }}))
        .unwrap();
        let mut surface = HeadlessDocument::new();
        draw(
            &ResolvedReport {
                report: Some(report),
                source: Some(ReportSource::MergedRecord),
            },
            &mut surface,
        );

        let names: Vec<String> = surface
            .elements_with_class(Target::QcParameters, "qc-name")
            .iter()
            .map(|el| el.text_content())
            .collect();
        assert_eq!(names, vec!["Greetings", "Disclaimer", "Empathy"]);

        let buttons = surface.elements_with_class(Target::QcParameters, "timestamp");
        assert_eq!(buttons.len(), 2);
        assert_eq!(buttons[1].get_attr(crate::render::SEEK_ATTR), Some("1:10"));
        assert!(surface.text(Target::QcParameters).contains("Start: 1:10"));
        assert!(surface.text(Target::QcParameters).ends_with("Source: merged record"));
    }
}
