//! File watcher for continuous rebuilds.
//!
//! Watches the three source trees and reruns exactly the composite task
//! matching the changed file's category. Change events are debounced
//! (100ms) and coalesced per task; runs are serialized on the watch
//! thread, so events arriving mid-run queue in the channel and trigger the
//! next run afterwards. A failed run is reported and the monitor keeps
//! watching.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::time::{Duration, Instant};

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::config::Config;
use crate::error::BuildError;
use crate::pipeline::{run_task, Task};

/// Debounce duration in milliseconds
const DEBOUNCE_MS: u64 = 100;

/// Map a changed path to the task that rebuilds it. Paths outside the
/// three source categories are observed but trigger nothing.
pub fn classify(path: &Path, config: &Config) -> Option<Task> {
    let ext = path.extension()?.to_str()?;

    if path.starts_with(&config.views_dir) && ext == "pug" {
        Some(Task::Views)
    } else if path.starts_with(&config.scripts_dir) && ext == "js" {
        Some(Task::Scripts)
    } else if path.starts_with(&config.styles_dir) && ext == "scss" {
        Some(Task::Styles)
    } else {
        None
    }
}

/// Watcher state for debouncing
struct WatcherState {
    pending: HashSet<Task>,
    last_change: Option<Instant>,
}

impl WatcherState {
    fn new() -> Self {
        Self {
            pending: HashSet::new(),
            last_change: None,
        }
    }

    fn add(&mut self, task: Task) {
        self.pending.insert(task);
        self.last_change = Some(Instant::now());
    }

    fn should_run(&self) -> bool {
        match self.last_change {
            Some(last) => {
                !self.pending.is_empty() && last.elapsed() >= Duration::from_millis(DEBOUNCE_MS)
            }
            None => false,
        }
    }

    fn take(&mut self) -> Vec<Task> {
        let mut tasks: Vec<_> = self.pending.drain().collect();
        tasks.sort();
        self.last_change = None;
        tasks
    }
}

/// Watch the source trees until `running` is cleared.
pub fn watch(config: &Config, running: Arc<AtomicBool>) -> Result<(), BuildError> {
    let (tx, rx) = channel::<PathBuf>();

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<Event, notify::Error>| {
            if let Ok(event) = res {
                for path in event.paths {
                    let _ = tx.send(path);
                }
            }
        },
        notify::Config::default(),
    )?;

    for dir in [&config.views_dir, &config.scripts_dir, &config.styles_dir] {
        if dir.exists() {
            watcher.watch(dir, RecursiveMode::Recursive)?;
        }
    }

    println!("Watching {} for changes", config.root.display());

    let mut state = WatcherState::new();

    while running.load(Ordering::SeqCst) {
        if let Ok(path) = rx.recv_timeout(Duration::from_millis(50)) {
            if let Some(task) = classify(&path, config) {
                if config.verbose {
                    eprintln!("changed: {}", path.display());
                }
                state.add(task);
            }
        }

        if state.should_run() {
            for task in state.take() {
                match run_task(task, config, None) {
                    Ok(report) => println!(
                        "{}: rebuilt {} in {:.2}s",
                        task.as_str(),
                        task.artifact(config).display(),
                        report.duration.as_secs_f64()
                    ),
                    // The run failed; the monitor itself stays alive
                    Err(e) => eprintln!("{}: {e}", task.as_str()),
                }
            }
        }
    }

    Ok(())
}
