//! Transcript view
//!
//! Each segment gets a stable element id (`seg-{index}`) and carries its start
//! time so a seek can find and highlight it.

use super::{text_or_dash, Element, Node, Surface, Target, NO_DATA};
use callqa_common::models::TranscriptDoc;

/// Class applied to the segment matching the last seek
pub const HIGHLIGHT_CLASS: &str = "highlight";

/// Attribute carrying a segment's start time
pub const START_ATTR: &str = "data-ts";

pub fn segment_id(index: usize) -> String {
    format!("seg-{}", index)
}

pub fn render(doc: &TranscriptDoc) -> Vec<Node> {
    if doc.segments.is_empty() {
        return vec![Element::new("p").class("no-data").text(NO_DATA).into()];
    }

    doc.segments
        .iter()
        .enumerate()
        .map(|(i, seg)| {
            let start = seg.start_timestamp.as_deref().map(str::trim).unwrap_or("");
            let speaker = text_or_dash(seg.speaker.as_deref());
            let mut entry = Element::new("div")
                .id(segment_id(i))
                .class("segment")
                .child(Element::new("span").class("segment-time").text(start))
                .child(Element::new("span").class("segment-speaker").text(speaker))
                .child(
                    Element::new("span")
                        .class("segment-text")
                        .text(seg.text.as_deref().unwrap_or("")),
                );
            if !start.is_empty() {
                entry = entry.attr(START_ATTR, start);
            }
            entry.into()
        })
        .collect()
}

/// `(start time, element id)` for each segment with a start time, in order
pub fn index(doc: &TranscriptDoc) -> Vec<(String, String)> {
    doc.segments
        .iter()
        .enumerate()
        .filter_map(|(i, seg)| {
            let start = seg.start_timestamp.as_deref()?.trim();
            (!start.is_empty()).then(|| (start.to_string(), segment_id(i)))
        })
        .collect()
}

pub fn draw(doc: &TranscriptDoc, surface: &mut dyn Surface) {
    surface.replace(Target::Transcript, render(doc));
}
