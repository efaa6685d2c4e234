//! Display surface abstraction
//!
//! The page is a fixed set of named regions. A [`Surface`] replaces region
//! content wholesale, places keyed injections before/after a region, and
//! toggles classes for visibility and highlighting. [`HeadlessDocument`] is
//! the in-memory implementation used for snapshots and tests.

use super::node::{Element, Node};
use std::collections::BTreeMap;

/// Named page regions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Target {
    Part1Tab,
    Part2Tab,
    Part1View,
    Part2View,
    Metrics,
    SpeakerStats,
    Summary,
    Particulars,
    Compliance,
    QuestionMatrix,
    PrimaryTime,
    Transcript,
    QcParameters,
    SecondaryTime,
    RecordOverview,
}

impl Target {
    pub fn id(self) -> &'static str {
        match self {
            Target::Part1Tab => "tab-part1",
            Target::Part2Tab => "tab-part2",
            Target::Part1View => "part1",
            Target::Part2View => "part2",
            Target::Metrics => "metrics",
            Target::SpeakerStats => "speaker-stats",
            Target::Summary => "summary",
            Target::Particulars => "personal-particulars",
            Target::Compliance => "process-compliance",
            Target::QuestionMatrix => "question-matrix",
            Target::PrimaryTime => "primary-time",
            Target::Transcript => "transcript",
            Target::QcParameters => "qc-parameters",
            Target::SecondaryTime => "secondary-time",
            Target::RecordOverview => "record-overview",
        }
    }
}

/// Where an injected node sits relative to its anchor region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Before,
    After,
}

/// A page the renderers can draw on
pub trait Surface: Send {
    /// Replace all content of a region
    fn replace(&mut self, target: Target, nodes: Vec<Node>);

    /// Place `node` next to `anchor`, replacing any earlier node with the
    /// same key
    fn inject(&mut self, key: &str, anchor: Target, placement: Placement, node: Node);

    /// Remove a keyed injection if present
    fn remove_injected(&mut self, key: &str);

    fn set_visible(&mut self, target: Target, visible: bool);

    /// Toggle a class on the element with `element_id` inside `target`;
    /// returns false when no such element exists
    fn set_element_class(&mut self, target: Target, element_id: &str, class: &str, on: bool)
        -> bool;

    fn scroll_into_view(&mut self, element_id: &str);

    /// Show a user-visible alert
    fn alert(&mut self, message: &str);

    fn set_text(&mut self, target: Target, text: &str) {
        self.replace(target, vec![Node::text(text)]);
    }
}

#[derive(Debug, Clone)]
pub struct Injection {
    pub key: String,
    pub anchor: Target,
    pub placement: Placement,
    pub node: Node,
}

/// In-memory page
#[derive(Debug, Clone, Default)]
pub struct HeadlessDocument {
    regions: BTreeMap<Target, Vec<Node>>,
    hidden: BTreeMap<Target, bool>,
    injections: Vec<Injection>,
    alerts: Vec<String>,
    scrolled_to: Option<String>,
}

impl HeadlessDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self, target: Target) -> &[Node] {
        self.regions.get(&target).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Text of a region, nodes concatenated
    pub fn text(&self, target: Target) -> String {
        self.content(target).iter().map(Node::text_content).collect()
    }

    pub fn is_visible(&self, target: Target) -> bool {
        !self.hidden.get(&target).copied().unwrap_or(false)
    }

    pub fn injected(&self, key: &str) -> Option<&Node> {
        self.injections.iter().find(|i| i.key == key).map(|i| &i.node)
    }

    /// Injections anchored at `anchor` with the given placement, in order
    pub fn injections_at(&self, anchor: Target, placement: Placement) -> impl Iterator<Item = &Injection> {
        self.injections
            .iter()
            .filter(move |i| i.anchor == anchor && i.placement == placement)
    }

    pub fn injection_count(&self) -> usize {
        self.injections.len()
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn scrolled_to(&self) -> Option<&str> {
        self.scrolled_to.as_deref()
    }

    /// Find an element by id in any region or injection
    pub fn find_element(&self, id: &str) -> Option<&Element> {
        self.regions
            .values()
            .flatten()
            .chain(self.injections.iter().map(|i| &i.node))
            .find_map(|n| n.find_by_id(id))
    }

    /// All elements carrying `class` within a region
    pub fn elements_with_class(&self, target: Target, class: &str) -> Vec<&Element> {
        let mut out = Vec::new();
        for node in self.content(target) {
            node.find_by_class(class, &mut out);
        }
        out
    }
}

impl Surface for HeadlessDocument {
    fn replace(&mut self, target: Target, nodes: Vec<Node>) {
        self.regions.insert(target, nodes);
    }

    fn inject(&mut self, key: &str, anchor: Target, placement: Placement, node: Node) {
        self.remove_injected(key);
        self.injections.push(Injection {
            key: key.to_string(),
            anchor,
            placement,
            node,
        });
    }

    fn remove_injected(&mut self, key: &str) {
        self.injections.retain(|i| i.key != key);
    }

    fn set_visible(&mut self, target: Target, visible: bool) {
        self.hidden.insert(target, !visible);
    }

    fn set_element_class(&mut self, target: Target, element_id: &str, class: &str, on: bool) -> bool {
        let Some(nodes) = self.regions.get_mut(&target) else {
            return false;
        };
        match nodes.iter_mut().find_map(|n| n.find_by_id_mut(element_id)) {
            Some(el) => {
                el.set_class(class, on);
                true
            }
            None => false,
        }
    }

    fn scroll_into_view(&mut self, element_id: &str) {
        self.scrolled_to = Some(element_id.to_string());
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}
