//! Runs a bulk simulation on a background thread.
//!
//! The worker forwards progress over a channel so a front end can poll it
//! without blocking its own loop.

use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread::{self, JoinHandle};

use bs_bag::{BulkSettings, ItemDatabase};
use bs_progress::{BulkEvent, StatusView};
use bs_results::{RankedResultSet, RunStore};

use crate::backend::BulkSimBackend;
use crate::error::AppResult;
use crate::run_service::{BulkRunRequest, RunOptions, run_bulk_with_events};

pub struct RunWorker {
    pub progress_rx: Receiver<WorkerMessage>,
    handle: JoinHandle<()>,
}

#[derive(Debug, Clone)]
pub enum WorkerMessage {
    Started {
        run_id: String,
    },
    Progress(StatusView),
    Complete {
        run_id: String,
        results: RankedResultSet,
        loaded_from_cache: bool,
    },
    Error {
        message: String,
    },
}

impl RunWorker {
    pub fn start(
        backend: Box<dyn BulkSimBackend + Send>,
        settings: BulkSettings,
        database: ItemDatabase,
        store: Option<RunStore>,
        options: RunOptions,
    ) -> Self {
        let (tx, rx) = channel();

        let handle = thread::spawn(move || {
            if let Err(e) = Self::run_simulation(backend, &settings, &database, store, options, &tx)
            {
                let _ = tx.send(WorkerMessage::Error {
                    message: format!("Worker error: {}", e),
                });
            }
        });

        Self {
            progress_rx: rx,
            handle,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    fn run_simulation(
        mut backend: Box<dyn BulkSimBackend + Send>,
        settings: &BulkSettings,
        database: &ItemDatabase,
        store: Option<RunStore>,
        options: RunOptions,
        tx: &Sender<WorkerMessage>,
    ) -> AppResult<()> {
        let request = BulkRunRequest {
            settings,
            database,
            store: store.as_ref(),
            options,
        };

        // Completion is sent below with the cache flag; the receiver may be gone.
        let forward: &mut dyn FnMut(BulkEvent) = &mut |event: BulkEvent| {
            let message = match event {
                BulkEvent::Started { run_id, .. } => WorkerMessage::Started { run_id },
                BulkEvent::Progress(view) => WorkerMessage::Progress(view),
                BulkEvent::Completed(_) => return,
            };
            let _ = tx.send(message);
        };

        let response = run_bulk_with_events(&request, backend.as_mut(), Some(forward))?;

        let _ = tx.send(WorkerMessage::Complete {
            run_id: response.run_id,
            results: response.results,
            loaded_from_cache: response.loaded_from_cache,
        });

        Ok(())
    }
}
