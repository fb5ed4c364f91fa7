use rocketmap_scorer::ScorerClient;
use std::path::PathBuf;
use tokio::sync::broadcast;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub root: PathBuf,
    pub scorer: ScorerClient,
    pub event_tx: broadcast::Sender<()>,
}

impl AppState {
    pub fn new(root: PathBuf, scorer: ScorerClient) -> Self {
        let (tx, _) = broadcast::channel(64);
        let state = Self {
            root,
            scorer,
            event_tx: tx.clone(),
        };

        // Watch the canvas collection mtime and broadcast when it changes.
        // This catches both API mutations and external CLI updates.
        // Guard: only spawn if inside a Tokio runtime (skipped in sync unit tests).
        if tokio::runtime::Handle::try_current().is_ok() {
            let canvases_dir = state.root.join(".rocketmap").join("canvases");
            tokio::spawn(async move {
                let mut last_seen = None::<std::time::SystemTime>;
                loop {
                    tokio::time::sleep(std::time::Duration::from_millis(800)).await;
                    let Ok(mut entries) = tokio::fs::read_dir(&canvases_dir).await else {
                        continue;
                    };
                    let mut newest = None::<std::time::SystemTime>;
                    while let Ok(Some(entry)) = entries.next_entry().await {
                        let manifest = entry.path().join("manifest.yaml");
                        if let Ok(meta) = tokio::fs::metadata(&manifest).await {
                            if let Ok(mtime) = meta.modified() {
                                newest = Some(newest.map_or(mtime, |n| n.max(mtime)));
                            }
                        }
                    }
                    if newest.is_some() && last_seen != newest {
                        last_seen = newest;
                        let _ = tx.send(());
                    }
                }
            });
        }

        state
    }
}
