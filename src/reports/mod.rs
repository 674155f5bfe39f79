use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use santa_ais::antibody::Antibody;
use santa_ais::consts::{MAX_OCCUPANCY, MIN_OCCUPANCY, N_CHOICES};
use santa_ais::optimizer::GenerationStats;
use santa_ais::scorer::ScoreDetails;

/// Rows shown in the generation table before thinning kicks in.
const MAX_HISTORY_ROWS: usize = 25;

pub fn print_occupancy_grid(name: &str, antibody: &Antibody) {
    println!("\nOccupancy: {}", name);
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    let cols = 10;

    for chunk in antibody.occupancy().chunks(cols) {
        let cells: Vec<Cell> = chunk
            .iter()
            .map(|&o| {
                let cell = Cell::new(o).set_alignment(CellAlignment::Right);
                // Unused days are not flagged.
                if o > 0 && !(MIN_OCCUPANCY..=MAX_OCCUPANCY).contains(&o) {
                    cell.fg(Color::Red)
                } else {
                    cell
                }
            })
            .collect();
        table.add_row(cells);
    }
    println!("{}", table);
}

pub fn print_generation_report(history: &[GenerationStats]) {
    if history.is_empty() {
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Gen").add_attribute(Attribute::Bold),
        Cell::new("Best").fg(Color::Cyan),
        Cell::new("Avg"),
        Cell::new("Merged").fg(Color::Green),
        Cell::new("Affinity"),
        Cell::new("Moves"),
        Cell::new("Kept"),
        Cell::new("New"),
    ]);

    for i in 1..=7 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    let stride = history.len().div_ceil(MAX_HISTORY_ROWS).max(1);
    let last = history.len() - 1;

    for (i, s) in history.iter().enumerate() {
        if i % stride != 0 && i != last {
            continue;
        }
        table.add_row(vec![
            Cell::new(s.generation + 1).add_attribute(Attribute::Bold),
            Cell::new(format!("{:.2}", s.best_fitness)).fg(Color::Cyan),
            Cell::new(format!("{:.2}", s.avg_fitness)),
            Cell::new(format!("{:.2}", s.merged_best_fitness)).fg(Color::Green),
            Cell::new(format!("{:.1}", s.avg_affinity)),
            Cell::new(s.accepted_moves),
            Cell::new(s.survivors),
            Cell::new(s.replenished),
        ]);
    }
    println!("\n{}", table);
}

pub fn print_score_report(name: &str, d: &ScoreDetails) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new(name).add_attribute(Attribute::Bold),
        Cell::new("Total").fg(Color::Cyan),
        Cell::new("Preference"),
        Cell::new("Accounting"),
        Cell::new("Min Occ"),
        Cell::new("Max Occ"),
        Cell::new("Empty"),
        Cell::new("Outside").fg(Color::Red),
    ]);
    for i in 1..=7 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
    table.add_row(vec![
        Cell::new(""),
        Cell::new(format!("{:.2}", d.total)).fg(Color::Cyan),
        Cell::new(format!("{:.0}", d.preference_cost)),
        Cell::new(format!("{:.2}", d.accounting_penalty)),
        Cell::new(d.min_occupancy),
        Cell::new(d.max_occupancy),
        Cell::new(d.empty_days),
        Cell::new(d.days_out_of_window).fg(Color::Red),
    ]);
    println!("\n{}", table);

    let mut choices = Table::new();
    choices.load_preset(ASCII_FULL);
    let mut header = vec![Cell::new("Choice").add_attribute(Attribute::Bold)];
    header.extend((0..N_CHOICES).map(|r| Cell::new(r).set_alignment(CellAlignment::Right)));
    header.push(Cell::new("None").fg(Color::Red));
    choices.add_row(header);

    let mut row = vec![Cell::new("Families")];
    row.extend(
        d.choice_counts
            .iter()
            .map(|&c| Cell::new(c).set_alignment(CellAlignment::Right)),
    );
    choices.add_row(row);
    println!("{}", choices);
}
