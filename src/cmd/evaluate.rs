use crate::reports;
use clap::Args;
use santa_ais::error::AisResult;
use santa_ais::families::Families;
use santa_ais::scorer::{self, loader};
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct EvaluateArgs {
    /// Assignment CSV with `family_id,assigned_day` rows.
    #[arg(short, long)]
    pub assignment: PathBuf,
}

pub fn run(args: EvaluateArgs, families: &Families) -> AisResult<()> {
    println!("\n🔎 === ASSIGNMENT AUDIT === 🔎");
    let antibody = loader::load_assignment(&args.assignment, families)?;
    let name = args
        .assignment
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "assignment".to_string());

    let details = scorer::score_details(&antibody, families)?;
    reports::print_occupancy_grid(&name, &antibody);
    reports::print_score_report(&name, &details);

    println!("Score: {:.2}", details.total);
    Ok(())
}
