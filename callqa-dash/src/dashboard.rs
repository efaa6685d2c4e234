//! Dashboard orchestration
//!
//! Page load resolves the endpoints once, fetches the three primary
//! documents concurrently, draws Part 1, resolves and draws Part 2, and then
//! hands control to the tab and playback controllers.
//!
//! Part-2 refreshes run the reconciler from scratch each time. Every refresh
//! takes a token from the [`RefreshSequencer`]; a refresh whose token is no
//! longer current when its results arrive is discarded, so a slow earlier
//! response can never overwrite a later one.

use crate::endpoints::{record_url, EndpointSet, Resource};
use crate::error::{DashError, Result, LOAD_FAILED_MESSAGE};
use crate::export;
use crate::fetch::JsonSource;
use crate::playback::{AudioUnitId, PlaybackController};
use crate::reconciler::{RefreshSequencer, RefreshToken, ReportReconciler, ResolvedReport};
use crate::render::{self, Element, HeadlessDocument, Surface, Target};
use crate::tabs::{Tab, TabController};
use callqa_common::models::{
    decode_lenient, CallReference, MetadataDoc, QcReport, QcScoreDoc, RecordDoc, ReportDoc,
    TranscriptDoc,
};
use callqa_common::scoring::compute_qc_score;
use callqa_common::time_format::try_parse_mmss;
use callqa_common::DashboardConfig;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// The three documents the page cannot render without
#[derive(Debug, Clone, Default)]
pub struct PrimaryDocs {
    pub metadata: MetadataDoc,
    pub report: ReportDoc,
    pub transcript: TranscriptDoc,
}

impl PrimaryDocs {
    /// Call length from the metadata, else from the last transcript segment
    pub fn call_duration_secs(&self) -> Option<f64> {
        let from_metadata = self.metadata.top.duration.as_deref().and_then(try_parse_mmss);
        let from_transcript = || {
            self.transcript.segments.iter().rev().find_map(|seg| {
                seg.end_timestamp
                    .as_deref()
                    .or(seg.start_timestamp.as_deref())
                    .and_then(try_parse_mmss)
            })
        };
        from_metadata.or_else(from_transcript).map(f64::from)
    }

    pub fn doctor_wpm(&self) -> Option<f64> {
        self.metadata
            .speaker
            .doctor_wpm
            .or(self.report.meta.doctor_wpm)
    }
}

/// Result of one Part-2 refresh
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// Results were drawn
    Applied {
        resolved: ResolvedReport,
        score: QcScoreDoc,
    },
    /// A newer refresh was issued meanwhile; results were dropped
    Stale,
}

/// Everything a Part-2 refresh needs, detached from the dashboard so it can
/// run on a spawned task
struct Part2Refresh<S: ?Sized, D> {
    source: Arc<S>,
    surface: Arc<Mutex<D>>,
    reconciler: ReportReconciler,
    sequencer: Arc<RefreshSequencer>,
    call: Option<CallReference>,
    score_url: String,
    docs: Arc<PrimaryDocs>,
}

impl<S, D> Part2Refresh<S, D>
where
    S: JsonSource + ?Sized,
    D: Surface,
{
    async fn run(self, token: RefreshToken) -> RefreshOutcome {
        let resolved = self
            .reconciler
            .resolve(self.source.as_ref(), self.call.as_ref())
            .await;
        let score = self.score(resolved.report.as_ref()).await;

        let mut surface = self.surface.lock().await;
        if !self.sequencer.is_current(token) {
            debug!(token = ?token, "Discarding stale Part-2 refresh");
            return RefreshOutcome::Stale;
        }
        render::qc::draw(&resolved, &mut *surface);
        render::score::draw(&score, &mut *surface);
        RefreshOutcome::Applied { resolved, score }
    }

    /// Score from the score endpoint, or computed locally
    ///
    /// There is no per-call score route, so a per-call page always computes
    /// locally from the call's own reports.
    async fn score(&self, qc: Option<&QcReport>) -> QcScoreDoc {
        let local = || {
            compute_qc_score(
                &self.docs.report,
                qc,
                self.docs.call_duration_secs(),
                self.docs.doctor_wpm(),
            )
        };

        if self.call.is_some() {
            return local();
        }
        match self.source.get_json(&self.score_url).await {
            Ok(doc) => decode_lenient(&doc, "qcscore"),
            Err(e) => {
                warn!(error = %e, "QC score unavailable, computing locally");
                local()
            }
        }
    }
}

/// One dashboard page session
pub struct Dashboard<S: ?Sized, D> {
    source: Arc<S>,
    surface: Arc<Mutex<D>>,
    config: DashboardConfig,
    call: Option<CallReference>,
    endpoints: EndpointSet,
    reconciler: ReportReconciler,
    sequencer: Arc<RefreshSequencer>,
    tabs: TabController,
    playback: PlaybackController,
    docs: Option<Arc<PrimaryDocs>>,
}

impl<S, D> Dashboard<S, D>
where
    S: JsonSource + ?Sized + 'static,
    D: Surface + 'static,
{
    /// Set up a session for `page` (path plus query, or absolute URL)
    ///
    /// The call reference and endpoints are fixed here for the session.
    pub fn new(source: Arc<S>, surface: D, config: DashboardConfig, page: &str) -> Self {
        let (call, endpoints) = EndpointSet::for_page(page, &config);
        match &call {
            Some(c) => info!(record_id = %c.record_id, call_id = %c.call_id, "Per-call dashboard"),
            None => info!("Dashboard using configured endpoints"),
        }
        let reconciler = ReportReconciler::new(EndpointSet::configured_url(&config, Resource::Report2));
        let playback = PlaybackController::simulated(&config);

        Self {
            source,
            surface: Arc::new(Mutex::new(surface)),
            config,
            call,
            endpoints,
            reconciler,
            sequencer: Arc::new(RefreshSequencer::new()),
            tabs: TabController::new(),
            playback,
            docs: None,
        }
    }

    /// Replace the simulated audio with real elements
    pub fn with_playback(mut self, playback: PlaybackController) -> Self {
        self.playback = playback;
        self
    }

    pub fn call(&self) -> Option<&CallReference> {
        self.call.as_ref()
    }

    pub fn endpoints(&self) -> &EndpointSet {
        &self.endpoints
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn surface(&self) -> Arc<Mutex<D>> {
        Arc::clone(&self.surface)
    }

    pub fn playback(&self) -> &PlaybackController {
        &self.playback
    }

    pub fn active_tab(&self) -> Tab {
        self.tabs.active()
    }

    /// Primary documents, once loaded
    pub fn docs(&self) -> Option<&PrimaryDocs> {
        self.docs.as_deref()
    }

    /// Load and draw everything
    ///
    /// Metadata, report and transcript are fetched concurrently and must all
    /// succeed; otherwise a single alert is shown, nothing is drawn, and
    /// [`DashError::Load`] is returned. Part-2 resolution never fails.
    pub async fn initialize(&mut self) -> Result<()> {
        let metadata_url = self.endpoints.url(Resource::Metadata);
        let report_url = self.endpoints.url(Resource::Report);
        let transcript_url = self.endpoints.url(Resource::Transcript);

        let fetched = tokio::try_join!(
            self.source.get_json(metadata_url),
            self.source.get_json(report_url),
            self.source.get_json(transcript_url),
        );
        let (metadata, report, transcript) = match fetched {
            Ok(docs) => docs,
            Err(e) => {
                error!(error = %e, "Failed to load primary documents");
                self.surface.lock().await.alert(LOAD_FAILED_MESSAGE);
                return Err(DashError::Load(e));
            }
        };

        let docs = PrimaryDocs {
            metadata: decode_lenient(&metadata, "metadata"),
            report: decode_lenient(&report, "report"),
            transcript: decode_lenient(&transcript, "transcript"),
        };
        info!(
            questions = docs.report.qa_matrix.len(),
            segments = docs.transcript.segments.len(),
            "Primary documents loaded"
        );

        {
            let mut surface = self.surface.lock().await;
            let surface: &mut D = &mut surface;
            self.tabs.draw(surface);
            render::metrics::draw(&docs.metadata, surface);
            render::report::draw(&docs.report, surface);
            render::matrix::draw(&docs.report, surface);
            render::transcript::draw(&docs.transcript, surface);

            self.playback.load_transcript(&docs.transcript);
            self.playback.load_source(
                self.endpoints.url(Resource::Audio),
                docs.call_duration_secs(),
            );
            self.playback.set_active(Tab::Part1.audio_unit());
            for id in [AudioUnitId::Primary, AudioUnitId::Secondary] {
                self.playback.on_time_update(id, surface);
            }
        }
        self.docs = Some(Arc::new(docs));

        self.refresh_part2().await;
        Ok(())
    }

    fn part2_refresh(&self, docs: Arc<PrimaryDocs>) -> Part2Refresh<S, D> {
        Part2Refresh {
            source: Arc::clone(&self.source),
            surface: Arc::clone(&self.surface),
            reconciler: self.reconciler.clone(),
            sequencer: Arc::clone(&self.sequencer),
            call: self.call.clone(),
            score_url: self.endpoints.url(Resource::QcScore).to_string(),
            docs,
        }
    }

    /// Resolve and draw Part 2 in place; `None` before initialisation
    pub async fn refresh_part2(&self) -> Option<RefreshOutcome> {
        let docs = self.docs.clone()?;
        let token = self.sequencer.issue();
        Some(self.part2_refresh(docs).run(token).await)
    }

    /// Start a Part-2 refresh on its own task
    pub fn spawn_refresh(&self) -> Option<JoinHandle<RefreshOutcome>> {
        let docs = self.docs.clone()?;
        let token = self.sequencer.issue();
        let job = self.part2_refresh(docs);
        debug!(token = ?token, "Spawning Part-2 refresh");
        Some(tokio::spawn(job.run(token)))
    }

    /// Switch views; activating Part 2 starts a fire-and-forget refresh
    ///
    /// The returned handle may be dropped; awaiting it only matters to
    /// callers that want to observe the refresh.
    pub async fn activate_tab(&mut self, tab: Tab) -> Option<JoinHandle<RefreshOutcome>> {
        let refresh = {
            let mut surface = self.surface.lock().await;
            self.tabs.activate(tab, &mut *surface)
        };
        self.playback.set_active(tab.audio_unit());
        info!(tab = %tab, "Activated tab");

        if refresh {
            self.spawn_refresh()
        } else {
            None
        }
    }

    /// Handle a click on a timestamp control
    pub async fn seek_to_timestamp(&mut self, text: &str, now: Instant) -> f64 {
        let mut surface = self.surface.lock().await;
        self.playback.seek_to_timestamp(text, &mut *surface, now)
    }

    /// Clear a transcript highlight whose deadline has passed
    pub async fn expire_highlights(&mut self, now: Instant) -> bool {
        let mut surface = self.surface.lock().await;
        self.playback.expire_highlight(now, &mut *surface)
    }

    pub async fn skip(&mut self, unit: AudioUnitId, forward: bool) -> f64 {
        let mut surface = self.surface.lock().await;
        self.playback.skip(unit, forward, &mut *surface)
    }

    pub fn toggle_playback(&mut self, unit: AudioUnitId) -> bool {
        self.playback.unit_mut(unit).toggle()
    }

    pub fn set_volume(&mut self, unit: AudioUnitId, volume: f64) -> f64 {
        self.playback.unit_mut(unit).set_volume(volume)
    }

    /// Playback position changed; refresh the unit's label
    pub async fn time_update(&self, unit: AudioUnitId) {
        let mut surface = self.surface.lock().await;
        self.playback.on_time_update(unit, &mut *surface);
    }

    /// Draw the record overview for `record_id`; returns whether it loaded
    pub async fn show_record_overview(&self, record_id: &str) -> bool {
        let url = record_url(record_id);
        let fetched = self.source.get_json(&url).await;
        let mut surface = self.surface.lock().await;
        match fetched {
            Ok(doc) => {
                let record: RecordDoc = decode_lenient(&doc, "record");
                if !record.is_processed() {
                    info!(record_id, "Record not processed yet");
                }
                render::record::draw(&record, record_id, &mut *surface);
                true
            }
            Err(e) => {
                warn!(error = %e, record_id, "Record unavailable");
                surface.replace(
                    Target::RecordOverview,
                    vec![Element::new("p")
                        .class("no-data")
                        .text(render::record::LOAD_FAILED)
                        .into()],
                );
                false
            }
        }
    }
}

impl<S> Dashboard<S, HeadlessDocument>
where
    S: JsonSource + ?Sized + 'static,
{
    /// Printable snapshot of the page, taken after the configured print delay
    pub async fn export(&self) -> String {
        let title = export::page_title(self.call.as_ref());
        export::print_snapshot(&self.surface, self.config.print_delay(), &title).await
    }
}
