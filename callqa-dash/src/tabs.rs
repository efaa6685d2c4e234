//! Part 1 / Part 2 tab switching

use crate::playback::AudioUnitId;
use crate::render::{Element, Surface, Target};
use std::fmt;
use std::str::FromStr;

pub const ACTIVE_CLASS: &str = "active";

/// The two mutually exclusive views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Part1,
    Part2,
}

impl Tab {
    pub fn name(self) -> &'static str {
        match self {
            Tab::Part1 => "part1",
            Tab::Part2 => "part2",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tab::Part1 => "Part 1",
            Tab::Part2 => "Part 2",
        }
    }

    pub fn tab_target(self) -> Target {
        match self {
            Tab::Part1 => Target::Part1Tab,
            Tab::Part2 => Target::Part2Tab,
        }
    }

    pub fn view_target(self) -> Target {
        match self {
            Tab::Part1 => Target::Part1View,
            Tab::Part2 => Target::Part2View,
        }
    }

    /// Audio unit that timestamp controls in this view drive
    pub fn audio_unit(self) -> AudioUnitId {
        match self {
            Tab::Part1 => AudioUnitId::Primary,
            Tab::Part2 => AudioUnitId::Secondary,
        }
    }

    fn button_id(self) -> String {
        format!("{}-button", self.tab_target().id())
    }

    fn other(self) -> Tab {
        match self {
            Tab::Part1 => Tab::Part2,
            Tab::Part2 => Tab::Part1,
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "part1" | "1" => Ok(Tab::Part1),
            "part2" | "2" => Ok(Tab::Part2),
            other => Err(format!("unknown tab '{}' (expected part1 or part2)", other)),
        }
    }
}

/// Tracks the active tab and applies visibility to the surface
#[derive(Debug, Default)]
pub struct TabController {
    active: Tab,
}

impl TabController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Tab {
        self.active
    }

    /// Draw both tab headers with Part 1 active
    pub fn draw(&mut self, surface: &mut dyn Surface) {
        for tab in [Tab::Part1, Tab::Part2] {
            let button = Element::new("button")
                .id(tab.button_id())
                .class("tab")
                .attr("data-tab", tab.name())
                .text(tab.label());
            surface.replace(tab.tab_target(), vec![button.into()]);
        }
        self.activate(Tab::Part1, surface);
    }

    /// Show `tab`, hide the other
    ///
    /// Returns true when the caller should refresh Part-2 data. Activating
    /// Part 2 always asks for a refresh, even if it was already active.
    pub fn activate(&mut self, tab: Tab, surface: &mut dyn Surface) -> bool {
        let other = tab.other();
        surface.set_visible(tab.view_target(), true);
        surface.set_visible(other.view_target(), false);
        surface.set_element_class(tab.tab_target(), &tab.button_id(), ACTIVE_CLASS, true);
        surface.set_element_class(other.tab_target(), &other.button_id(), ACTIVE_CLASS, false);
        self.active = tab;
        tab == Tab::Part2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::HeadlessDocument;

    #[test]
    fn test_from_str() {
        assert_eq!("part2".parse::<Tab>(), Ok(Tab::Part2));
        assert_eq!(" Part1 ".parse::<Tab>(), Ok(Tab::Part1));
        assert!("part3".parse::<Tab>().is_err());
    }

    #[test]
    fn test_views_are_mutually_exclusive() {
        let mut surface = HeadlessDocument::new();
        let mut tabs = TabController::new();
        tabs.draw(&mut surface);
        assert!(surface.is_visible(Target::Part1View));
        assert!(!surface.is_visible(Target::Part2View));

        assert!(tabs.activate(Tab::Part2, &mut surface));
        assert_eq!(tabs.active(), Tab::Part2);
        assert!(!surface.is_visible(Target::Part1View));
        assert!(surface.is_visible(Target::Part2View));
        assert!(surface.find_element("tab-part2-button").unwrap().has_class(ACTIVE_CLASS));
        assert!(!surface.find_element("tab-part1-button").unwrap().has_class(ACTIVE_CLASS));

        assert!(!tabs.activate(Tab::Part1, &mut surface));
        assert!(surface.is_visible(Target::Part1View));
    }
}
