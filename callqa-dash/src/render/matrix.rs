//! Question matrix

use super::{text_or_dash, timestamp_control, Element, Node, Surface, Target, NO_DATA};
use callqa_common::models::{QaItem, ReportDoc};
use callqa_common::scoring::normalize_status;

const COLUMNS: [&str; 8] = [
    "ID",
    "Question",
    "Captured",
    "Expected",
    "Status",
    "Error Type",
    "Suggested Correction",
    "Time",
];

fn cell(text: impl Into<String>) -> Element {
    Element::new("td").text(text)
}

fn row(item: &QaItem) -> Node {
    let status = normalize_status(item.status.as_deref());
    Element::new("tr")
        .class(format!("status-{}", status))
        .child(cell(text_or_dash(item.question_id.as_deref())))
        .child(cell(text_or_dash(item.question_text.as_deref())))
        .child(cell(text_or_dash(item.captured_response.as_deref())))
        .child(cell(text_or_dash(item.expected_response.as_deref())))
        .child(cell(text_or_dash(item.status.as_deref())).class("status"))
        .child(cell(text_or_dash(item.error_type.as_deref())))
        .child(cell(text_or_dash(item.suggested_correction.as_deref())))
        .child(Element::new("td").child(timestamp_control(item.timestamp.as_deref())))
        .into()
}

pub fn render(doc: &ReportDoc) -> Vec<Node> {
    let header = Element::new("tr").children(COLUMNS.iter().map(|c| Element::new("th").text(*c)));

    let body: Vec<Node> = if doc.qa_matrix.is_empty() {
        vec![Element::new("tr")
            .class("empty")
            .child(cell(NO_DATA).attr("colspan", COLUMNS.len().to_string()))
            .into()]
    } else {
        doc.qa_matrix.iter().map(row).collect()
    };

    vec![Element::new("table")
        .class("qa-matrix")
        .child(Element::new("thead").child(header))
        .child(Element::new("tbody").children(body))
        .into()]
}

pub fn draw(doc: &ReportDoc, surface: &mut dyn Surface) {
    surface.replace(Target::QuestionMatrix, render(doc));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{HeadlessDocument, SEEK_ATTR};

    #[test]
    fn test_empty_matrix() {
        let nodes = render(&ReportDoc::default());
        assert!(nodes[0].text_content().ends_with(NO_DATA));
    }

    #[test]
    fn test_rows_and_timestamp_controls() {
        let mut doc = ReportDoc::default();
        doc.qa_matrix = vec![
            QaItem {
                question_id: Some("Q1".to_string()),
                question_text: Some("Any surgeries?".to_string()),
                status: Some("Incorrect".to_string()),
                timestamp: Some("3:07".to_string()),
                ..Default::default()
            },
            QaItem::default(),
        ];

        let mut surface = HeadlessDocument::new();
        draw(&doc, &mut surface);

        let incorrect = surface.elements_with_class(Target::QuestionMatrix, "status-incorrect");
        assert_eq!(incorrect.len(), 1);
        let unknown = surface.elements_with_class(Target::QuestionMatrix, "status-unknown");
        assert_eq!(unknown.len(), 1);

        let buttons = surface.elements_with_class(Target::QuestionMatrix, "timestamp");
        assert_eq!(buttons.len(), 1);
        assert_eq!(buttons[0].get_attr(SEEK_ATTR), Some("3:07"));
    }
}
