//! QC score summary card
//!
//! Injected before the QC parameter panel under a fixed key, so redrawing
//! after every Part-2 refresh leaves exactly one card.

use super::{humanize, metric, number, percent, text_or_na, Element, Node, Placement, Surface, Target};
use callqa_common::models::QcScoreDoc;
use callqa_common::scoring::MAX_SCORE;

pub const SCORE_CARD_KEY: &str = "score-summary";

pub fn render(score: &QcScoreDoc) -> Node {
    let total = score.total_score.filter(|v| v.is_finite()).unwrap_or(0.0);
    let max = score.max_score.filter(|v| v.is_finite() && *v > 0.0).unwrap_or(MAX_SCORE);
    let category = text_or_na(score.category.as_deref());

    let breakdown = Element::new("ul")
        .class("score-breakdown")
        .children(score.breakdown.iter().map(|(item, points)| {
            Element::new("li").text(format!("{}: {}", humanize(item), number(*points)))
        }));

    let derived = &score.derived;
    Element::new("div")
        .id("score-summary")
        .class("score-card")
        .class(format!("category-{}", category.to_lowercase().replace(' ', "-")))
        .child(Element::new("h3").text("QC Score"))
        .child(metric("Total", format!("{} / {}", number(total), number(max))))
        .child(metric("Percentage", percent(score.percentage)))
        .child(metric("Category", category))
        .child(metric("Complete MER Questions", percent(derived.complete_mer_pct)))
        .child(metric("Correct Documentation", percent(derived.correct_documentation_pct)))
        .child(metric(
            "Call Duration",
            derived
                .call_duration_min
                .map(|m| format!("{} min", number(m)))
                .unwrap_or_else(|| super::NOT_AVAILABLE.to_string()),
        ))
        .child(breakdown)
        .into()
}

pub fn draw(score: &QcScoreDoc, surface: &mut dyn Surface) {
    surface.inject(
        SCORE_CARD_KEY,
        Target::QcParameters,
        Placement::Before,
        render(score),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::HeadlessDocument;

    #[test]
    fn test_empty_score_renders_placeholders() {
        let text = render(&QcScoreDoc::default()).text_content();
        assert!(text.contains("Total0 / 1600"));
        assert!(text.contains("PercentageN/A"));
        assert!(text.contains("CategoryN/A"));
    }

    #[test]
    fn test_redraw_leaves_one_card() {
        let mut surface = HeadlessDocument::new();
        let first = QcScoreDoc {
            total_score: Some(1200.0),
            category: Some("Poor".to_string()),
            ..Default::default()
        };
        let second = QcScoreDoc {
            total_score: Some(1550.0),
            category: Some("Good".to_string()),
            ..Default::default()
        };
        draw(&first, &mut surface);
        draw(&second, &mut surface);

        let cards: Vec<_> = surface
            .injections_at(Target::QcParameters, Placement::Before)
            .collect();
        assert_eq!(cards.len(), 1);
        let card = cards[0].node.as_element().unwrap();
        assert!(card.has_class("category-good"));
        assert!(card.text_content().contains("1550 / 1600"));
    }
}
