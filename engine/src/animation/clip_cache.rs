//! Asynchronous clip cache
//!
//! One cache keyed by clip name. Loads run on a background worker thread; the
//! frame loop only ever polls finished results and never waits on a load.
//! A failed load stays failed until [`ClipCache::retry`] is called.

use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use static_assertions::assert_impl_all;
use thiserror::Error;

use super::clip::{ClipHandle, ClipSource};

/// Why a clip could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipLoadError {
    #[error("clip `{0}` not found")]
    NotFound(String),
    #[error("failed to load clip `{name}`: {reason}")]
    Loader { name: String, reason: String },
    #[error("clip loader worker is not running")]
    WorkerGone,
}

/// Raw clip data produced by a [`ClipLoader`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipData {
    /// Length of one cycle in seconds
    pub duration: f32,
}

/// Blocking clip loader, run on the cache's worker thread.
pub trait ClipLoader: Send + 'static {
    fn load(&mut self, name: &str) -> Result<ClipData, ClipLoadError>;
}

/// Load state of one clip.
#[derive(Debug, Clone, PartialEq)]
pub enum ClipStatus {
    /// Never requested
    Unrequested,
    /// Queued or loading on the worker
    Pending,
    Ready(ClipHandle),
    Failed(ClipLoadError),
}

assert_impl_all!(ClipHandle: Send, Sync);
assert_impl_all!(ClipLoadError: Send, Sync);
assert_impl_all!(ClipStatus: Send, Sync);

enum LoaderCommand {
    Load { name: String },
    Shutdown,
}

struct LoaderEvent {
    name: String,
    result: Result<ClipData, ClipLoadError>,
}

/// Name-keyed clip cache backed by a loader worker thread.
pub struct ClipCache {
    entries: HashMap<String, ClipStatus>,
    tx_cmd: Sender<LoaderCommand>,
    rx_evt: Receiver<LoaderEvent>,
    thread: Option<JoinHandle<()>>,
    next_id: u32,
}

impl ClipCache {
    /// Start the worker thread with the given loader.
    pub fn spawn<L: ClipLoader>(loader: L) -> Self {
        let (tx_cmd, rx_cmd) = mpsc::channel::<LoaderCommand>();
        let (tx_evt, rx_evt) = mpsc::channel::<LoaderEvent>();

        let thread = thread::Builder::new()
            .name("clip-loader".to_string())
            .spawn(move || worker_loop(loader, rx_cmd, tx_evt))
            .expect("failed to spawn clip loader worker");

        Self {
            entries: HashMap::new(),
            tx_cmd,
            rx_evt,
            thread: Some(thread),
            next_id: 1,
        }
    }

    /// Queue a load if the clip has never been requested. Returns the status after the call.
    pub fn request(&mut self, name: &str) -> ClipStatus {
        match self.entries.get(name) {
            Some(status) => status.clone(),
            None => self.enqueue(name),
        }
    }

    pub fn request_all<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        for name in names {
            self.request(name);
        }
    }

    /// Re-queue a clip whose load failed. Ready and pending clips are left alone.
    pub fn retry(&mut self, name: &str) -> ClipStatus {
        match self.entries.get(name) {
            Some(ClipStatus::Failed(_)) | None => self.enqueue(name),
            Some(status) => status.clone(),
        }
    }

    fn enqueue(&mut self, name: &str) -> ClipStatus {
        let status = if self
            .tx_cmd
            .send(LoaderCommand::Load {
                name: name.to_string(),
            })
            .is_ok()
        {
            ClipStatus::Pending
        } else {
            ClipStatus::Failed(ClipLoadError::WorkerGone)
        };
        self.entries.insert(name.to_string(), status.clone());
        status
    }

    /// Drain finished loads without blocking. Returns how many were applied.
    pub fn poll(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.rx_evt.try_recv() {
            self.apply(event);
            applied += 1;
        }
        applied
    }

    /// Block until nothing is pending or the timeout elapses.
    ///
    /// Meant for loading screens and tests, never for the frame loop.
    /// Returns `true` if every requested clip settled.
    pub fn wait_settled(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        self.poll();
        while self.pending_count() > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.rx_evt.recv_timeout(remaining) {
                Ok(event) => self.apply(event),
                Err(RecvTimeoutError::Timeout) => return false,
                Err(RecvTimeoutError::Disconnected) => {
                    self.fail_pending();
                    return false;
                }
            }
        }
        true
    }

    fn apply(&mut self, event: LoaderEvent) {
        let status = match event.result {
            Ok(data) => {
                let handle = ClipHandle::new(self.next_id, event.name.clone(), data.duration);
                self.next_id += 1;
                log::debug!("clip `{}` ready ({:.2}s)", handle.name, handle.duration);
                ClipStatus::Ready(handle)
            }
            Err(err) => {
                log::warn!("{err}");
                ClipStatus::Failed(err)
            }
        };
        self.entries.insert(event.name, status);
    }

    fn fail_pending(&mut self) {
        for status in self.entries.values_mut() {
            if *status == ClipStatus::Pending {
                *status = ClipStatus::Failed(ClipLoadError::WorkerGone);
            }
        }
    }

    pub fn status(&self, name: &str) -> ClipStatus {
        self.entries
            .get(name)
            .cloned()
            .unwrap_or(ClipStatus::Unrequested)
    }

    pub fn pending_count(&self) -> usize {
        self.entries
            .values()
            .filter(|s| **s == ClipStatus::Pending)
            .count()
    }

    pub fn ready_count(&self) -> usize {
        self.entries
            .values()
            .filter(|s| matches!(s, ClipStatus::Ready(_)))
            .count()
    }
}

impl ClipSource for ClipCache {
    /// Polls finished loads, requests unseen clips, and returns the handle if ready.
    fn get_clip(&mut self, name: &str) -> Option<ClipHandle> {
        self.poll();
        match self.request(name) {
            ClipStatus::Ready(handle) => Some(handle),
            _ => None,
        }
    }
}

impl Drop for ClipCache {
    fn drop(&mut self) {
        let _ = self.tx_cmd.send(LoaderCommand::Shutdown);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

fn worker_loop<L: ClipLoader>(
    mut loader: L,
    rx_cmd: Receiver<LoaderCommand>,
    tx_evt: Sender<LoaderEvent>,
) {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Some(cores) = core_affinity::get_core_ids()
            && cores.len() > 1
        {
            let _ = core_affinity::set_for_current(cores[cores.len() - 1]);
        }
    }

    while let Ok(cmd) = rx_cmd.recv() {
        match cmd {
            LoaderCommand::Load { name } => {
                let result = loader.load(&name);
                if tx_evt.send(LoaderEvent { name, result }).is_err() {
                    break;
                }
            }
            LoaderCommand::Shutdown => break,
        }
    }
}

/// In-memory loader over a fixed table of clip names and durations.
#[derive(Debug, Clone, Default)]
pub struct StaticClipLoader {
    clips: HashMap<String, f32>,
    latency: Duration,
}

impl StaticClipLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every clip the stock character rig ships with.
    pub fn character_rig() -> Self {
        Self::new()
            .with_clip("idle", 2.0)
            .with_clip("walking", 1.1)
            .with_clip("running", 0.7)
            .with_clip("jump", 1.2)
            .with_clip("leftStrafe", 0.9)
            .with_clip("rightStrafe", 0.9)
            .with_clip("leftStrafeWalking", 1.1)
            .with_clip("rightStrafeWalking", 1.1)
            .with_clip("leftTurn", 0.8)
            .with_clip("rightTurn", 0.8)
            .with_clip("leftTurn90", 0.6)
            .with_clip("rightTurn90", 0.6)
    }

    pub fn with_clip(mut self, name: impl Into<String>, duration: f32) -> Self {
        self.clips.insert(name.into(), duration);
        self
    }

    pub fn without_clip(mut self, name: &str) -> Self {
        self.clips.remove(name);
        self
    }

    /// Simulated per-load delay.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

impl ClipLoader for StaticClipLoader {
    fn load(&mut self, name: &str) -> Result<ClipData, ClipLoadError> {
        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }
        self.clips
            .get(name)
            .map(|&duration| ClipData { duration })
            .ok_or_else(|| ClipLoadError::NotFound(name.to_string()))
    }
}
