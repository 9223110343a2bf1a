use bs_app::{
    AppError, AppResult, BulkBag, BulkConfig, BulkRunRequest, ReplayBackend, RunOptions, query,
    run_service,
};
use bs_bag::ItemDatabase;
use bs_progress::{BulkEvent, StatusView};
use bs_results::{RankedResultSet, RunStore, rank_results, results_visible};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bs-cli")]
#[command(about = "BulkSim CLI - rank gear combinations from a bag of items", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an item database file
    Validate {
        /// Path to the item database (JSON or YAML)
        db_path: PathBuf,
    },
    /// Import a bag export and list its items
    Import {
        /// Path to the exported bag JSON
        bag_path: PathBuf,
        /// Path to the item database
        db_path: PathBuf,
        /// Write bulk settings for the imported bag to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Iterations per combination written to the settings file
        #[arg(long)]
        iterations: Option<u32>,
    },
    /// Run a bulk simulation from a recorded snapshot log
    Run {
        /// Path to the exported bag JSON
        bag_path: PathBuf,
        /// Path to the item database
        db_path: PathBuf,
        /// Snapshot log, one JSON progress snapshot per line
        replay_path: PathBuf,
        /// Narrow the candidates over several refining rounds
        #[arg(long)]
        fast: bool,
        /// Simulate one item at a time instead of every combination
        #[arg(long)]
        no_combos: bool,
        /// Iterations per combination
        #[arg(long)]
        iterations: Option<u32>,
        /// Skip cache and force re-run
        #[arg(long)]
        no_cache: bool,
        /// Configuration YAML
        #[arg(long)]
        config: Option<PathBuf>,
        /// Run store directory
        #[arg(long)]
        store: Option<PathBuf>,
        /// Only print the best N results
        #[arg(long)]
        top: Option<usize>,
    },
    /// List cached runs for a bag
    Runs {
        /// Path to the exported bag JSON
        bag_path: PathBuf,
        /// Run store directory
        #[arg(long)]
        store: Option<PathBuf>,
    },
    /// Show the ranked results of a cached run
    ShowRun {
        /// Path to the exported bag JSON
        bag_path: PathBuf,
        /// Run ID to display
        run_id: String,
        /// Run store directory
        #[arg(long)]
        store: Option<PathBuf>,
        /// Item database, used to print item names
        #[arg(long)]
        db: Option<PathBuf>,
        /// Print the raw results as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { db_path } => cmd_validate(&db_path),
        Commands::Import {
            bag_path,
            db_path,
            output,
            iterations,
        } => cmd_import(&bag_path, &db_path, output.as_deref(), iterations),
        Commands::Run {
            bag_path,
            db_path,
            replay_path,
            fast,
            no_combos,
            iterations,
            no_cache,
            config,
            store,
            top,
        } => {
            let mut config = bs_app::load_config(config.as_deref())?;
            config.fast_mode |= fast;
            config.combinations &= !no_combos;
            config.use_cache &= !no_cache;
            if let Some(iterations) = iterations {
                config.iterations_per_combo = iterations;
            }
            if store.is_some() {
                config.store_dir = store;
            }
            cmd_run(&bag_path, &db_path, &replay_path, &config, top)
        }
        Commands::Runs { bag_path, store } => cmd_runs(&bag_path, store.as_deref()),
        Commands::ShowRun {
            bag_path,
            run_id,
            store,
            db,
            json,
        } => cmd_show_run(&bag_path, &run_id, store.as_deref(), db.as_deref(), json),
    }
}

fn open_store(bag_path: &Path, store_dir: Option<&Path>) -> AppResult<RunStore> {
    let store = match store_dir {
        Some(dir) => RunStore::new(dir.to_path_buf())?,
        None => RunStore::for_bag(bag_path)?,
    };
    Ok(store)
}

fn load_bag(bag_path: &Path, db: &ItemDatabase) -> AppResult<BulkBag> {
    let mut bag = BulkBag::new();
    bag.import_from_file(bag_path, db)?;
    Ok(bag)
}

fn cmd_validate(db_path: &Path) -> AppResult<()> {
    println!("Validating item database: {}", db_path.display());
    let db = bs_bag::load_database(db_path)?;
    bs_bag::validate_database(&db)?;
    println!(
        "✓ Database is valid ({} items, {} enchants, {} gems)",
        db.items.len(),
        db.enchants.len(),
        db.gems.len()
    );
    Ok(())
}

fn cmd_import(
    bag_path: &Path,
    db_path: &Path,
    output: Option<&Path>,
    iterations: Option<u32>,
) -> AppResult<()> {
    let db = bs_bag::load_database(db_path)?;
    let bag = load_bag(bag_path, &db)?;

    match bag.intro_text() {
        Some(intro) => println!("{}", intro),
        None => println!("No items in bag"),
    }
    for spec in bag.items() {
        let name = item_name(&db, spec.id);
        let mut line = format!("  {} ({})", name, spec.id);
        if let Some(enchant) = db.enchant(spec.enchant) {
            line.push_str(&format!("  enchant={}", enchant.name));
        }
        let gems: Vec<&str> = spec
            .gems
            .iter()
            .filter_map(|id| db.gem(*id))
            .map(|g| g.name.as_str())
            .collect();
        if !gems.is_empty() {
            line.push_str(&format!("  gems={}", gems.join(", ")));
        }
        println!("{}", line);
    }

    if let Some(path) = output {
        let defaults = BulkConfig::default();
        let settings =
            bag.create_bulk_settings(iterations.unwrap_or(defaults.iterations_per_combo));
        bs_bag::save_settings(path, &settings)?;
        println!("✓ Wrote bulk settings to {}", path.display());
    }
    Ok(())
}

fn cmd_run(
    bag_path: &Path,
    db_path: &Path,
    replay_path: &Path,
    config: &BulkConfig,
    top: Option<usize>,
) -> AppResult<()> {
    let db = bs_bag::load_database(db_path)?;
    let mut bag = load_bag(bag_path, &db)?;
    bag.set_combinations(config.combinations);
    bag.set_fast_mode(config.fast_mode);
    if bag.is_empty() {
        return Err(AppError::InvalidInput("bag has no items to simulate".to_string()));
    }

    let settings = bag.create_bulk_settings(config.iterations_per_combo);
    let store = open_store(bag_path, config.store_dir.as_deref())?;
    let mut backend = ReplayBackend::from_file(replay_path)?
        .with_delay(Duration::from_millis(config.replay_delay_ms));

    println!(
        "Running bulk simulation: {} items, combinations={}, fast_mode={}",
        bag.len(),
        settings.combinations,
        settings.fast_mode
    );

    let request = BulkRunRequest {
        settings: &settings,
        database: &db,
        store: Some(&store),
        options: RunOptions {
            use_cache: config.use_cache,
        },
    };

    let mut last_emit = Instant::now();
    let response = run_service::run_bulk_with_events(
        &request,
        &mut backend,
        Some(&mut |event| match event {
            BulkEvent::Progress(view) => {
                if last_emit.elapsed().as_millis() >= 100 || view.completed_sims == view.total_sims
                {
                    render_cli_progress(&view);
                    last_emit = Instant::now();
                }
            }
            BulkEvent::Started { run_id, .. } => tracing::debug!(%run_id, "run started"),
            BulkEvent::Completed(_) => clear_progress_line(),
        }),
    )?;

    if response.loaded_from_cache {
        println!("✓ Loaded from cache: {}", response.run_id);
    } else {
        println!(
            "✓ Simulation completed: {} ({} snapshots, {:.2}s)",
            response.run_id, response.snapshot_count, response.elapsed_s
        );
    }

    print_results(&response.results, Some(&db), top);
    Ok(())
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(160));
    let _ = io::stdout().flush();
}

fn render_cli_progress(view: &StatusView) {
    let width = 28usize;
    let fraction = view.fraction_complete();
    let filled = ((fraction * width as f64).round() as usize).min(width);
    let bar = format!(
        "{}{}",
        "#".repeat(filled),
        "-".repeat(width.saturating_sub(filled))
    );
    let mut line = format!("\r[{}] {:>6.2}%  {}", bar, fraction * 100.0, view.sims_label);
    if !view.rounds_label.is_empty() {
        line.push_str(&format!("  {}", view.rounds_label));
    }
    line.push_str(&format!("  {}", view.seconds_remaining_label));
    print!("{}", line);
    let _ = io::stdout().flush();
}

fn item_name(db: &ItemDatabase, id: i32) -> String {
    db.item(id)
        .map(|i| i.name.clone())
        .unwrap_or_else(|| format!("Item {}", id))
}

fn print_results(results: &RankedResultSet, db: Option<&ItemDatabase>, top: Option<usize>) {
    if !results_visible(results) {
        println!("No results");
        return;
    }

    if let Ok(summary) = query::get_run_summary(results) {
        println!(
            "\n{} combinations, {} better than equipped (best {:+.2} dps)",
            summary.result_count, summary.improving_count, summary.best_delta
        );
    }

    let entries = rank_results(results);
    let shown = top.unwrap_or(entries.len());
    for entry in entries.iter().take(shown) {
        println!(
            "\n{}  {} dps  {}",
            entry.rank_label, entry.dps_label, entry.delta_label
        );
        if let Some(notice) = entry.notice() {
            println!("  {}", notice);
            continue;
        }
        for line in &entry.items {
            let name = match db {
                Some(db) => item_name(db, line.item.id),
                None => format!("Item {}", line.item.id),
            };
            println!("  {:<10} {}", line.slot_label, name);
        }
    }
}

fn cmd_runs(bag_path: &Path, store_dir: Option<&Path>) -> AppResult<()> {
    let store = open_store(bag_path, store_dir)?;
    let runs = query::list_runs(&store)?;

    if runs.is_empty() {
        println!("No cached runs found for bag: {}", bag_path.display());
    } else {
        println!("Cached runs for bag '{}':", bag_path.display());
        for manifest in runs {
            println!(
                "  {} ({}, {} items, {} results{})",
                manifest.run_id,
                manifest.timestamp,
                manifest.item_count,
                manifest.result_count,
                if manifest.fast_mode { ", fast" } else { "" }
            );
        }
    }
    Ok(())
}

fn cmd_show_run(
    bag_path: &Path,
    run_id: &str,
    store_dir: Option<&Path>,
    db_path: Option<&Path>,
    json: bool,
) -> AppResult<()> {
    let store = open_store(bag_path, store_dir)?;
    let (manifest, results) = query::load_run(&store, run_id)?;

    if json {
        let text = serde_json::to_string_pretty(&results)
            .map_err(|e| AppError::Results(e.to_string()))?;
        println!("{}", text);
        return Ok(());
    }

    let db = db_path.map(bs_bag::load_database).transpose()?;

    println!("Run: {}", manifest.run_id);
    println!("  Created: {}", manifest.timestamp);
    println!("  Items: {}", manifest.item_count);
    println!("  Combinations: {}", manifest.combinations);
    println!("  Fast mode: {}", manifest.fast_mode);
    println!("  Iterations per combination: {}", manifest.iterations_per_combo);

    print_results(&results, db.as_ref(), None);
    Ok(())
}
