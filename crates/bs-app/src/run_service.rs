//! Bulk run execution and caching service.

use std::time::Instant;

use bs_bag::{BulkSettings, ItemDatabase};
use bs_progress::{BulkEvent, BulkProgressController, ProgressSnapshot};
use bs_results::{RankedResultSet, RunManifest, RunStore};

use crate::backend::BulkSimBackend;
use crate::error::{AppError, AppResult};

/// Options for running bulk simulations.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub use_cache: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self { use_cache: true }
    }
}

/// Request to execute a bulk run.
pub struct BulkRunRequest<'a> {
    pub settings: &'a BulkSettings,
    /// Full item database; the run only sees the subset the bag references.
    pub database: &'a ItemDatabase,
    pub store: Option<&'a RunStore>,
    pub options: RunOptions,
}

/// Response from a bulk run.
#[derive(Debug, Clone)]
pub struct BulkRunResponse {
    pub run_id: String,
    pub results: RankedResultSet,
    pub loaded_from_cache: bool,
    pub snapshot_count: usize,
    pub elapsed_s: f64,
}

fn emit_event(on_event: &mut Option<&mut dyn FnMut(BulkEvent)>, event: BulkEvent) {
    if let Some(cb) = on_event.as_deref_mut() {
        cb(event);
    }
}

/// Execute or load a bulk run.
pub fn run_bulk(
    request: &BulkRunRequest,
    backend: &mut dyn BulkSimBackend,
) -> AppResult<BulkRunResponse> {
    run_bulk_with_events(request, backend, None)
}

/// Execute or load a bulk run and stream its events.
///
/// Events arrive in production order. `Completed` is always the last event;
/// snapshots the backend sends after its final result are dropped.
pub fn run_bulk_with_events(
    request: &BulkRunRequest,
    backend: &mut dyn BulkSimBackend,
    mut on_event: Option<&mut dyn FnMut(BulkEvent)>,
) -> AppResult<BulkRunResponse> {
    let started = Instant::now();
    let settings = request.settings;

    bs_bag::validate_settings(settings, request.database)?;
    let subset = bs_bag::build_bulk_items_database(&settings.items, request.database)?;
    let run_id = bs_results::compute_run_id(settings, &subset);

    emit_event(
        &mut on_event,
        BulkEvent::Started {
            run_id: run_id.clone(),
            fast_mode: settings.fast_mode,
        },
    );

    if request.options.use_cache
        && let Some(store) = request.store
        && store.has_run(&run_id)
    {
        tracing::info!(%run_id, "loading cached bulk run");
        let results = store.load_results(&run_id)?;
        emit_event(&mut on_event, BulkEvent::Completed(results.clone()));
        return Ok(BulkRunResponse {
            run_id,
            results,
            loaded_from_cache: true,
            snapshot_count: 0,
            elapsed_s: started.elapsed().as_secs_f64(),
        });
    }

    tracing::info!(
        %run_id,
        items = settings.items.len(),
        combinations = settings.combinations,
        fast_mode = settings.fast_mode,
        iterations = settings.iterations_per_combo,
        "starting bulk run"
    );

    let mut controller = BulkProgressController::new(settings.fast_mode);
    controller.begin_run(Instant::now());

    let mut final_result: Option<RankedResultSet> = None;
    let mut snapshot_count = 0usize;
    let mut late_snapshots = 0usize;

    {
        let mut on_snapshot = |snapshot: ProgressSnapshot| {
            if final_result.is_some() {
                late_snapshots += 1;
                return;
            }
            snapshot_count += 1;
            let update = controller.on_snapshot(snapshot, Instant::now());
            if let Some(result) = &update.completed {
                final_result = Some(result.clone());
            }
            for event in update.into_events() {
                emit_event(&mut on_event, event);
            }
        };
        backend
            .run_bulk_sim(settings, &subset, &mut on_snapshot)
            .inspect_err(|e| tracing::warn!(%run_id, error = %e, "bulk simulation failed"))?;
    }

    if late_snapshots > 0 {
        tracing::warn!(
            %run_id,
            late_snapshots,
            "ignored snapshots received after the final result"
        );
    }

    let results = final_result.ok_or(AppError::MissingFinalResult)?;

    if let Some(store) = request.store {
        let manifest = RunManifest::new(run_id.clone(), settings, &results);
        store.save_run(&manifest, &results)?;
        tracing::debug!(%run_id, "bulk run saved");
    }

    let elapsed_s = started.elapsed().as_secs_f64();
    tracing::info!(
        %run_id,
        snapshots = snapshot_count,
        results = results.results.len(),
        elapsed_s,
        "bulk run complete"
    );

    Ok(BulkRunResponse {
        run_id,
        results,
        loaded_from_cache: false,
        snapshot_count,
        elapsed_s,
    })
}
