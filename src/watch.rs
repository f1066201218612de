//! File watching for `shapecheck watch`.
//!
//! [`FileWatcher`] watches the parent directories of a fixed set of files
//! (editors often replace a file rather than write it in place) and
//! forwards changes to those files on a channel. [`drive`] consumes the
//! channel and re-runs analysis one run at a time, coalescing bursts of
//! changes through a [`TriggerQueue`].

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, trace};

use crate::analysis::TriggerQueue;
use crate::error::{Result, ShapecheckError};

/// A watched file changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    /// The file was created, written or replaced.
    Changed(PathBuf),
    /// The file was removed.
    Removed(PathBuf),
}

impl WatchEvent {
    /// Path of the affected file.
    pub fn path(&self) -> &Path {
        match self {
            Self::Changed(path) | Self::Removed(path) => path,
        }
    }
}

/// Watches a set of files for changes.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    receiver: Receiver<WatchEvent>,
}

impl FileWatcher {
    /// Start watching `files`.
    pub fn new(files: &[PathBuf]) -> Result<Self> {
        let targets: HashSet<PathBuf> = files.iter().map(|f| absolute(f)).collect();
        let dirs: HashSet<PathBuf> = targets
            .iter()
            .filter_map(|f| f.parent().map(Path::to_path_buf))
            .collect();

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            if let Ok(event) = res {
                for watch_event in classify_event(&event, &targets) {
                    let _ = tx.send(watch_event);
                }
            }
        })
        .map_err(watch_failed)?;

        for dir in &dirs {
            debug!("Watching {}", dir.display());
            watcher
                .watch(dir, RecursiveMode::NonRecursive)
                .map_err(watch_failed)?;
        }

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
        })
    }

    /// Channel of file changes.
    pub fn events(&self) -> &Receiver<WatchEvent> {
        &self.receiver
    }
}

fn watch_failed(e: notify::Error) -> ShapecheckError {
    ShapecheckError::WatchFailed {
        message: e.to_string(),
    }
}

fn absolute(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    })
}

/// Map a notify event to changes of the watched files.
pub fn classify_event(event: &Event, targets: &HashSet<PathBuf>) -> Vec<WatchEvent> {
    event
        .paths
        .iter()
        .filter(|path| targets.contains(*path))
        .filter_map(|path| match &event.kind {
            EventKind::Create(_) | EventKind::Modify(_) => Some(WatchEvent::Changed(path.clone())),
            EventKind::Remove(_) => Some(WatchEvent::Removed(path.clone())),
            _ => None,
        })
        .collect()
}

/// Re-run `run` on every change until the channel closes.
///
/// Changes that arrive while a run is in progress are folded into a single
/// follow-up run. Returns the number of runs performed.
pub fn drive<F>(events: &Receiver<WatchEvent>, mut run: F) -> usize
where
    F: FnMut(),
{
    let mut queue = TriggerQueue::new();
    let mut runs = 0;

    while let Ok(event) = events.recv() {
        trace!(path = %event.path().display(), "Change detected");
        if !queue.trigger() {
            continue;
        }

        loop {
            run();
            runs += 1;

            loop {
                match events.try_recv() {
                    Ok(_) => {
                        queue.trigger();
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => break,
                }
            }

            if !queue.finish() {
                break;
            }
            debug!("Coalesced changes, running again");
        }
    }

    runs
}
