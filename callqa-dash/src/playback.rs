//! Audio playback and transcript synchronisation
//!
//! Two independent transport units (primary for Part 1, secondary for
//! Part 2) each wrap an [`AudioElement`]. Timestamp controls seek the active
//! unit and highlight the transcript segment whose start time matches the
//! formatted target time exactly. Highlights expire by deadline; the owner
//! calls [`PlaybackController::expire_highlight`] with the current instant.

use crate::render::transcript::HIGHLIGHT_CLASS;
use crate::render::{transcript, Surface, Target};
use callqa_common::models::TranscriptDoc;
use callqa_common::time_format::{format_mmss, format_progress, parse_mmss};
use callqa_common::DashboardConfig;
use std::time::{Duration, Instant};
use tracing::debug;

/// Upper seek bound while the duration is unknown
pub const UNKNOWN_DURATION_BOUND: f64 = 1e9;

/// The two transport units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioUnitId {
    Primary,
    Secondary,
}

impl AudioUnitId {
    /// Region holding this unit's elapsed/duration label
    pub fn time_target(self) -> Target {
        match self {
            AudioUnitId::Primary => Target::PrimaryTime,
            AudioUnitId::Secondary => Target::SecondaryTime,
        }
    }
}

/// A playable audio element
pub trait AudioElement: Send {
    fn current_time(&self) -> f64;
    fn set_current_time(&mut self, seconds: f64);

    /// Known, finite, positive duration
    fn duration(&self) -> Option<f64>;

    fn play(&mut self);
    fn pause(&mut self);
    fn is_paused(&self) -> bool;

    fn volume(&self) -> f64;
    fn set_volume(&mut self, volume: f64);

    /// Point the element at a new source; resets position
    fn load(&mut self, src: &str, duration_hint: Option<f64>);
    fn source(&self) -> Option<&str>;
}

/// Audio element without a sound device
///
/// Tracks position, play state and volume. [`SimulatedAudio::advance`]
/// moves the position as if playback had run.
#[derive(Debug, Clone)]
pub struct SimulatedAudio {
    src: Option<String>,
    position: f64,
    duration: Option<f64>,
    paused: bool,
    volume: f64,
}

impl Default for SimulatedAudio {
    fn default() -> Self {
        Self {
            src: None,
            position: 0.0,
            duration: None,
            paused: true,
            volume: 1.0,
        }
    }
}

impl SimulatedAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration = valid_duration(Some(seconds));
        self
    }

    /// Advance playback by `seconds` if playing; pauses at the end
    pub fn advance(&mut self, seconds: f64) {
        if self.paused {
            return;
        }
        self.position += seconds;
        if let Some(d) = self.duration {
            if self.position >= d {
                self.position = d;
                self.paused = true;
            }
        }
    }
}

fn valid_duration(d: Option<f64>) -> Option<f64> {
    d.filter(|d| d.is_finite() && *d > 0.0)
}

impl AudioElement for SimulatedAudio {
    fn current_time(&self) -> f64 {
        self.position
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.position = seconds;
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn play(&mut self) {
        self.paused = false;
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn volume(&self) -> f64 {
        self.volume
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
    }

    fn load(&mut self, src: &str, duration_hint: Option<f64>) {
        self.src = Some(src.to_string());
        self.position = 0.0;
        self.paused = true;
        self.duration = valid_duration(duration_hint);
    }

    fn source(&self) -> Option<&str> {
        self.src.as_deref()
    }
}

/// Transport controls over one audio element
pub struct TransportUnit {
    id: AudioUnitId,
    element: Box<dyn AudioElement>,
    skip_interval: f64,
}

impl TransportUnit {
    pub fn new(id: AudioUnitId, element: Box<dyn AudioElement>, skip_interval: f64) -> Self {
        Self {
            id,
            element,
            skip_interval,
        }
    }

    pub fn id(&self) -> AudioUnitId {
        self.id
    }

    pub fn element(&self) -> &dyn AudioElement {
        self.element.as_ref()
    }

    pub fn element_mut(&mut self) -> &mut dyn AudioElement {
        self.element.as_mut()
    }

    fn upper_bound(&self) -> f64 {
        valid_duration(self.element.duration()).unwrap_or(UNKNOWN_DURATION_BOUND)
    }

    /// Set the position, clamped to `[0, duration]`; returns the new position
    pub fn seek(&mut self, seconds: f64) -> f64 {
        let target = if seconds.is_finite() { seconds } else { 0.0 };
        let clamped = target.clamp(0.0, self.upper_bound());
        self.element.set_current_time(clamped);
        clamped
    }

    /// Move by `delta` seconds, clamped; returns the new position
    pub fn skip_by(&mut self, delta: f64) -> f64 {
        let current = self.element.current_time();
        self.seek(current + delta)
    }

    pub fn skip_forward(&mut self) -> f64 {
        self.skip_by(self.skip_interval)
    }

    pub fn skip_back(&mut self) -> f64 {
        self.skip_by(-self.skip_interval)
    }

    /// Play if paused, pause if playing; returns whether now playing
    pub fn toggle(&mut self) -> bool {
        if self.element.is_paused() {
            self.element.play();
            true
        } else {
            self.element.pause();
            false
        }
    }

    /// Set the volume clamped to `[0, 1]`; non-finite input is ignored
    pub fn set_volume(&mut self, volume: f64) -> f64 {
        if volume.is_finite() {
            self.element.set_volume(volume.clamp(0.0, 1.0));
        }
        self.element.volume()
    }

    /// `elapsed / duration`
    pub fn progress_label(&self) -> String {
        format_progress(self.element.current_time(), self.element.duration())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Highlight {
    element_id: String,
    expires_at: Instant,
}

/// Both transport units plus transcript synchronisation
pub struct PlaybackController {
    primary: TransportUnit,
    secondary: TransportUnit,
    active: AudioUnitId,
    transcript_index: Vec<(String, String)>,
    highlight: Option<Highlight>,
    highlight_duration: Duration,
}

impl PlaybackController {
    pub fn new(
        primary: Box<dyn AudioElement>,
        secondary: Box<dyn AudioElement>,
        config: &DashboardConfig,
    ) -> Self {
        let skip = config.skip_interval();
        Self {
            primary: TransportUnit::new(AudioUnitId::Primary, primary, skip),
            secondary: TransportUnit::new(AudioUnitId::Secondary, secondary, skip),
            active: AudioUnitId::Primary,
            transcript_index: Vec::new(),
            highlight: None,
            highlight_duration: config.highlight_duration(),
        }
    }

    /// Controller over two simulated elements
    pub fn simulated(config: &DashboardConfig) -> Self {
        Self::new(
            Box::new(SimulatedAudio::new()),
            Box::new(SimulatedAudio::new()),
            config,
        )
    }

    pub fn unit(&self, id: AudioUnitId) -> &TransportUnit {
        match id {
            AudioUnitId::Primary => &self.primary,
            AudioUnitId::Secondary => &self.secondary,
        }
    }

    pub fn unit_mut(&mut self, id: AudioUnitId) -> &mut TransportUnit {
        match id {
            AudioUnitId::Primary => &mut self.primary,
            AudioUnitId::Secondary => &mut self.secondary,
        }
    }

    pub fn active(&self) -> AudioUnitId {
        self.active
    }

    pub fn set_active(&mut self, id: AudioUnitId) {
        self.active = id;
    }

    /// Load the same source into both units
    pub fn load_source(&mut self, src: &str, duration_hint: Option<f64>) {
        for id in [AudioUnitId::Primary, AudioUnitId::Secondary] {
            self.unit_mut(id).element_mut().load(src, duration_hint);
        }
    }

    /// Remember segment start times for highlight lookup
    pub fn load_transcript(&mut self, doc: &TranscriptDoc) {
        self.transcript_index = transcript::index(doc);
        self.highlight = None;
    }

    /// Element id of the segment starting exactly at `label`
    pub fn segment_for(&self, label: &str) -> Option<&str> {
        self.transcript_index
            .iter()
            .find(|(start, _)| start == label)
            .map(|(_, id)| id.as_str())
    }

    pub fn highlighted(&self) -> Option<&str> {
        self.highlight.as_ref().map(|h| h.element_id.as_str())
    }

    /// Handle a timestamp control click
    ///
    /// Seeks the active unit to the parsed time (unparseable text seeks to
    /// 0), starts playback, and highlights and scrolls to the matching
    /// transcript segment. Returns the position seeked to.
    pub fn seek_to_timestamp(&mut self, text: &str, surface: &mut dyn Surface, now: Instant) -> f64 {
        let seconds = parse_mmss(text) as f64;
        let active = self.active;
        let unit = self.unit_mut(active);
        let position = unit.seek(seconds);
        unit.element_mut().play();
        self.on_time_update(active, surface);

        let label = format_mmss(seconds);
        self.clear_highlight(surface);
        if let Some(element_id) = self.segment_for(&label).map(str::to_string) {
            surface.set_element_class(Target::Transcript, &element_id, HIGHLIGHT_CLASS, true);
            surface.scroll_into_view(&element_id);
            debug!(time = %label, segment = %element_id, "Highlighted transcript segment");
            self.highlight = Some(Highlight {
                element_id,
                expires_at: now + self.highlight_duration,
            });
        }
        position
    }

    /// Remove the highlight once its deadline has passed; returns whether
    /// one was removed
    pub fn expire_highlight(&mut self, now: Instant, surface: &mut dyn Surface) -> bool {
        match &self.highlight {
            Some(h) if now >= h.expires_at => {
                self.clear_highlight(surface);
                true
            }
            _ => false,
        }
    }

    fn clear_highlight(&mut self, surface: &mut dyn Surface) {
        if let Some(h) = self.highlight.take() {
            surface.set_element_class(Target::Transcript, &h.element_id, HIGHLIGHT_CLASS, false);
        }
    }

    /// Refresh a unit's elapsed/duration label
    pub fn on_time_update(&self, id: AudioUnitId, surface: &mut dyn Surface) {
        surface.set_text(id.time_target(), &self.unit(id).progress_label());
    }

    pub fn skip(&mut self, id: AudioUnitId, forward: bool, surface: &mut dyn Surface) -> f64 {
        let unit = self.unit_mut(id);
        let position = if forward {
            unit.skip_forward()
        } else {
            unit.skip_back()
        };
        self.on_time_update(id, surface);
        position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::HeadlessDocument;
    use callqa_common::models::Segment;

    fn unit(duration: Option<f64>) -> TransportUnit {
        let mut audio = SimulatedAudio::new();
        if let Some(d) = duration {
            audio = audio.with_duration(d);
        }
        TransportUnit::new(AudioUnitId::Primary, Box::new(audio), 10.0)
    }

    #[test]
    fn test_skip_back_clamps_to_zero() {
        let mut unit = unit(Some(300.0));
        unit.seek(4.0);
        assert_eq!(unit.skip_back(), 0.0);
    }

    #[test]
    fn test_skip_forward_clamps_to_duration() {
        let mut unit = unit(Some(300.0));
        unit.seek(295.0);
        assert_eq!(unit.skip_forward(), 300.0);
    }

    #[test]
    fn test_unknown_duration_uses_large_bound() {
        let mut unit = unit(None);
        unit.seek(5000.0);
        assert_eq!(unit.skip_forward(), 5010.0);
        assert_eq!(unit.seek(f64::MAX), UNKNOWN_DURATION_BOUND);
    }

    #[test]
    fn test_toggle_and_volume() {
        let mut unit = unit(Some(60.0));
        assert!(unit.toggle());
        assert!(!unit.toggle());
        assert_eq!(unit.set_volume(1.5), 1.0);
        assert_eq!(unit.set_volume(-0.2), 0.0);
        assert_eq!(unit.set_volume(f64::NAN), 0.0);
        assert_eq!(unit.set_volume(0.4), 0.4);
    }

    #[test]
    fn test_progress_label() {
        let mut unit = unit(Some(185.0));
        unit.seek(65.0);
        assert_eq!(unit.progress_label(), "1:05 / 3:05");
    }

    #[test]
    fn test_simulated_audio_stops_at_end() {
        let mut audio = SimulatedAudio::new().with_duration(10.0);
        audio.play();
        audio.advance(12.0);
        assert_eq!(audio.current_time(), 10.0);
        assert!(audio.is_paused());
    }

    fn transcript() -> TranscriptDoc {
        let seg = |start: &str| Segment {
            start_timestamp: Some(start.to_string()),
            text: Some("...".to_string()),
            ..Default::default()
        };
        TranscriptDoc {
            segments: vec![seg("0:00"), seg("2:05"), seg("02:10")],
        }
    }

    #[test]
    fn test_seek_highlights_and_expires() {
        let config = DashboardConfig::default();
        let mut controller = PlaybackController::simulated(&config);
        let doc = transcript();
        let mut surface = HeadlessDocument::new();
        transcript::draw(&doc, &mut surface);
        controller.load_transcript(&doc);

        let now = Instant::now();
        assert_eq!(controller.seek_to_timestamp("2:05", &mut surface, now), 125.0);
        assert!(!controller.unit(AudioUnitId::Primary).element().is_paused());
        assert_eq!(controller.highlighted(), Some("seg-1"));
        assert_eq!(surface.scrolled_to(), Some("seg-1"));
        assert!(surface.find_element("seg-1").unwrap().has_class(HIGHLIGHT_CLASS));
        assert_eq!(surface.text(Target::PrimaryTime), "2:05 / 0:00");

        assert!(!controller.expire_highlight(now + Duration::from_millis(1999), &mut surface));
        assert!(controller.expire_highlight(now + Duration::from_millis(2000), &mut surface));
        assert!(!surface.find_element("seg-1").unwrap().has_class(HIGHLIGHT_CLASS));
        assert_eq!(controller.highlighted(), None);
    }

    #[test]
    fn test_seek_matches_exact_label_only() {
        let config = DashboardConfig::default();
        let mut controller = PlaybackController::simulated(&config);
        let mut surface = HeadlessDocument::new();
        controller.load_transcript(&transcript());

        // "02:10" is not the formatted form of 130 seconds
        controller.seek_to_timestamp("2:10", &mut surface, Instant::now());
        assert_eq!(controller.highlighted(), None);

        // Unparseable text seeks to zero
        assert_eq!(controller.seek_to_timestamp("bad", &mut surface, Instant::now()), 0.0);
        assert_eq!(controller.highlighted(), Some("seg-0"));
    }

    #[test]
    fn test_new_seek_moves_highlight() {
        let config = DashboardConfig::default();
        let mut controller = PlaybackController::simulated(&config);
        let doc = transcript();
        let mut surface = HeadlessDocument::new();
        transcript::draw(&doc, &mut surface);
        controller.load_transcript(&doc);

        let now = Instant::now();
        controller.seek_to_timestamp("0:00", &mut surface, now);
        controller.seek_to_timestamp("2:05", &mut surface, now);
        assert_eq!(
            surface.elements_with_class(Target::Transcript, HIGHLIGHT_CLASS).len(),
            1
        );
    }

    #[test]
    fn test_secondary_unit_when_active() {
        let config = DashboardConfig::default();
        let mut controller = PlaybackController::simulated(&config);
        let mut surface = HeadlessDocument::new();
        controller.set_active(AudioUnitId::Secondary);
        controller.seek_to_timestamp("0:30", &mut surface, Instant::now());

        assert_eq!(controller.unit(AudioUnitId::Secondary).element().current_time(), 30.0);
        assert_eq!(controller.unit(AudioUnitId::Primary).element().current_time(), 0.0);
        assert_eq!(surface.text(Target::SecondaryTime), "0:30 / 0:00");
    }
}
