use crate::reports;
use clap::Args;
use santa_ais::config::Config;
use santa_ais::error::AisResult;
use santa_ais::families::Families;
use santa_ais::optimizer::{GenerationStats, Optimizer, ProgressCallback, TracingProgress};
use santa_ais::scorer::{self, loader};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct OptimizeArgs {
    #[command(flatten)]
    pub config: Config,

    /// Where to write the best assignment (`family_id,assigned_day`).
    #[arg(short, long, default_value = "submission.csv")]
    pub output: PathBuf,

    /// Optional JSON dump of per-generation statistics.
    #[arg(long)]
    pub history: Option<PathBuf>,
}

struct CliLogger {
    every: usize,
}

impl ProgressCallback for CliLogger {
    fn on_generation(&self, stats: &GenerationStats) {
        if stats.generation % self.every == 0 {
            TracingProgress.on_generation(stats);
        }
    }
}

pub fn run(args: OptimizeArgs, config: Config, families: Arc<Families>) -> AisResult<()> {
    info!(
        "🧬 Clonal selection: {} antibodies, {} generations ({} / {} / {} {})",
        config.search.population_size,
        config.search.n_generations,
        config.strategies.clone_strategy,
        config.strategies.mutation_strategy,
        config.strategies.selection_strategy,
        config.strategies.select_type,
    );

    let optimizer = Optimizer::from_config(families.clone(), &config)?;
    let every = (config.search.n_generations / 20).max(1);

    let start = Instant::now();
    let result = optimizer.optimize(CliLogger { every })?;
    info!("Finished in {:.2?}", start.elapsed());

    reports::print_generation_report(&result.history);

    let details = scorer::score_details(&result.best, &families)?;
    reports::print_score_report("Best", &details);
    reports::print_occupancy_grid("Best", &result.best);

    println!("\n=== 🏆 FINAL RESULT ===");
    println!("Score: {:.2}", result.best.fitness);

    loader::save_assignment(&args.output, &result.best)?;
    println!("Assignment written to {}", args.output.display());

    if let Some(path) = &args.history {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, &result.history)?;
        println!("History written to {}", path.display());
    }

    Ok(())
}
