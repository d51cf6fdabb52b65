//! Pipeline execution implementation.

use crate::core::metadata::{ExifReader, MetadataReader};
use crate::core::scanner::{ExtensionFilter, Progress, ScanStage, ScanStatus};
use crate::core::stats::PhotoStatistics;
use crate::events::{
    null_sender, Event, EventSender, PipelineEvent, PipelineSummary, ScanEvent, ScanProgress,
};
use std::cell::RefCell;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;
use tracing::{debug, info};

/// Progress events are sent for every this many aggregator callbacks
pub const DEFAULT_EVENT_INTERVAL: usize = 25;

/// Cooperative stop flag shared between a host and its worker
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the worker to stop at its next checkpoint
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Result of pipeline execution
#[derive(Debug)]
pub struct PipelineResult {
    /// Statistics as far as the scan got
    pub stats: PhotoStatistics,
    /// How the scan ended
    pub status: ScanStatus,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl PipelineResult {
    pub fn summary(&self) -> PipelineSummary {
        summarize(&self.stats, self.duration_ms)
    }
}

/// Configuration for the pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory to scan
    pub root: PathBuf,
    /// Extensions worth reading metadata from
    pub extensions: ExtensionFilter,
    /// Send a progress event every N callbacks (at least 1)
    pub event_interval: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::new(),
            extensions: ExtensionFilter::default(),
            event_interval: DEFAULT_EVENT_INTERVAL,
        }
    }
}

/// Builder for pipeline configuration
pub struct PipelineBuilder {
    config: PipelineConfig,
    reader: Option<Box<dyn MetadataReader>>,
}

impl PipelineBuilder {
    /// Create a new pipeline builder
    pub fn new() -> Self {
        Self {
            config: PipelineConfig::default(),
            reader: None,
        }
    }

    /// Set the directory to scan
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.config.root = root.into();
        self
    }

    /// Set the extensions to read metadata from
    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.config.extensions = ExtensionFilter::new(extensions);
        self
    }

    /// Replace the EXIF reader
    pub fn reader(mut self, reader: impl MetadataReader + 'static) -> Self {
        self.reader = Some(Box::new(reader));
        self
    }

    /// Set how often progress events are sent
    pub fn event_interval(mut self, interval: usize) -> Self {
        self.config.event_interval = interval.max(1);
        self
    }

    /// Build the pipeline
    pub fn build(self) -> Pipeline {
        Pipeline {
            config: self.config,
            reader: self.reader.unwrap_or_else(|| Box::new(ExifReader::new())),
        }
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The statistics scan, ready to run
pub struct Pipeline {
    config: PipelineConfig,
    reader: Box<dyn MetadataReader>,
}

impl Pipeline {
    /// Create a new pipeline builder
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the pipeline without events
    pub fn run(&self) -> PipelineResult {
        self.run_with_events(&null_sender(), &CancellationToken::new())
    }

    /// Run the pipeline on the current thread with event reporting
    pub fn run_with_events(&self, events: &EventSender, cancel: &CancellationToken) -> PipelineResult {
        let start_time = Instant::now();
        let root = self.config.root.as_path();

        events.send(Event::Pipeline(PipelineEvent::Started {
            root: root.to_path_buf(),
        }));

        let throttle = RefCell::new(Throttle::new(self.config.event_interval));
        let mut stats = PhotoStatistics::new();

        let status = stats.gather_statistics(
            root,
            &self.config.extensions,
            &*self.reader,
            |stage| {
                flush(&throttle, events);
                throttle.borrow_mut().stage = stage;
                events.send(Event::Scan(ScanEvent::StageChanged { stage }));
            },
            |stats, progress, message| {
                let update = ScanProgress {
                    stage: throttle.borrow().stage,
                    progress,
                    files_examined: stats.total_files(),
                    photos_found: stats.total_photos(),
                    message: message.to_string(),
                };
                if let Some(update) = throttle.borrow_mut().offer(update) {
                    events.send(Event::Scan(ScanEvent::Progress(update)));
                }
                !cancel.is_cancelled()
            },
        );
        flush(&throttle, events);

        let duration_ms = start_time.elapsed().as_millis() as u64;
        let event = match &status {
            ScanStatus::Finished => PipelineEvent::Completed {
                summary: summarize(&stats, duration_ms),
            },
            ScanStatus::Cancelled => PipelineEvent::Cancelled,
            ScanStatus::Failed(e) => PipelineEvent::Error {
                message: e.to_string(),
            },
        };
        events.send(Event::Pipeline(event));

        info!(root = %root.display(), duration_ms, "pipeline done");

        PipelineResult {
            stats,
            status,
            duration_ms,
        }
    }

    /// Run the pipeline on a dedicated worker thread
    pub fn spawn(self, events: EventSender, cancel: CancellationToken) -> JoinHandle<PipelineResult> {
        debug!(root = %self.config.root.display(), "spawning scan worker");
        thread::spawn(move || self.run_with_events(&events, &cancel))
    }
}

/// Let a pending progress update out, if one was held back
fn flush(throttle: &RefCell<Throttle>, events: &EventSender) {
    if let Some(update) = throttle.borrow_mut().pending.take() {
        events.send(Event::Scan(ScanEvent::Progress(update)));
    }
}

fn summarize(stats: &PhotoStatistics, duration_ms: u64) -> PipelineSummary {
    PipelineSummary {
        total_files: stats.total_files(),
        total_photos: stats.total_photos(),
        dated_photos: stats.dated_photos(),
        iso_photos: stats.iso_photos(),
        duration_ms,
    }
}

/// Thins out progress updates: every `interval`-th goes through, the rest
/// are held so the last one of a stage can still be delivered.
struct Throttle {
    interval: usize,
    calls: usize,
    stage: ScanStage,
    pending: Option<ScanProgress>,
}

impl Throttle {
    fn new(interval: usize) -> Self {
        Self {
            interval: interval.max(1),
            calls: 0,
            stage: ScanStage::SearchingFiles,
            pending: None,
        }
    }

    fn offer(&mut self, update: ScanProgress) -> Option<ScanProgress> {
        self.calls += 1;
        let done = matches!(update.progress, Progress::Fraction(f) if f >= 1.0);
        if done || self.calls % self.interval == 0 {
            self.pending = None;
            Some(update)
        } else {
            self.pending = Some(update);
            None
        }
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline").field("config", &self.config).finish()
    }
}
