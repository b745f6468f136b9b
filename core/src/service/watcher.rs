//! Definition directory watcher
//!
//! Watches the definitions directory for TOML changes so edits are
//! picked up without an explicit reload command.

use std::path::{Path, PathBuf};

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc::{self, Receiver};

use super::WatcherError;
use crate::definitions::{ARENAS_FILE, BOSSES_FILE, LOOT_TABLES_FILE};

pub enum DefinitionsEvent {
    /// A definition file was created or modified.
    FileChanged(PathBuf),
    Error(String),
}

pub struct DefinitionsWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
}

impl DefinitionsWatcher {
    pub fn new(path: &Path) -> Result<Self, WatcherError> {
        let (tx, rx) = mpsc::channel(100);

        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = tx.blocking_send(res);
            },
            Config::default(),
        )
        .map_err(WatcherError::InitWatcher)?;

        watcher
            .watch(path, RecursiveMode::NonRecursive)
            .map_err(|source| WatcherError::WatchPath {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self {
            _watcher: watcher,
            rx,
        })
    }

    pub async fn next_event(&mut self) -> Option<DefinitionsEvent> {
        while let Some(event_result) = self.rx.recv().await {
            match event_result {
                Ok(event) => {
                    if let Some(watcher_event) = process_event(event) {
                        return Some(watcher_event);
                    }
                }
                Err(e) => {
                    return Some(DefinitionsEvent::Error(format!(
                        "Definition watcher error: {}",
                        e
                    )));
                }
            }
        }
        None
    }
}

fn process_event(event: Event) -> Option<DefinitionsEvent> {
    match event.kind {
        EventKind::Create(_) | EventKind::Modify(_) => event
            .paths
            .into_iter()
            .find(|path| is_definition_file(path))
            .map(DefinitionsEvent::FileChanged),
        _ => None,
    }
}

fn is_definition_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n == BOSSES_FILE || n == LOOT_TABLES_FILE || n == ARENAS_FILE)
        .unwrap_or(false)
}
