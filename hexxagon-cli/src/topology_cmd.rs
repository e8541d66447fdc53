//! Topology command - dump the cell table and adjacency rings

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use hexxagon_core::{standard_adjacency, AdjacencyIndex, CellIndex, CellInfo};

#[derive(Args)]
pub struct TopologyArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// One cell with its ring sets
#[derive(Debug, Serialize)]
struct CellEntry<'a> {
    #[serde(flatten)]
    info: CellInfo,
    neighbors: &'a [CellIndex],
    jump_targets: &'a [CellIndex],
}

pub fn run(args: TopologyArgs) -> Result<()> {
    let adjacency = standard_adjacency();
    let entries = collect_entries(&adjacency);

    if args.json {
        let json = serde_json::to_string_pretty(&entries).context("Failed to serialize topology")?;
        println!("{}", json);
    } else {
        print!("{}", format_text(&entries));
    }
    Ok(())
}

fn collect_entries(adjacency: &AdjacencyIndex) -> Vec<CellEntry<'_>> {
    adjacency
        .cells()
        .iter()
        .map(|&info| CellEntry {
            info,
            neighbors: adjacency.neighbors(info.index),
            jump_targets: adjacency.jump_targets(info.index),
        })
        .collect()
}

fn format_text(entries: &[CellEntry<'_>]) -> String {
    let mut text = String::from("index  col,row  state    ring-1 / ring-2\n");
    for entry in entries {
        let state = if entry.info.blocked { "blocked" } else { "open" };
        text.push_str(&format!(
            "{:>5}  {:>3},{:<3}  {:<7}  {:?} / {:?}\n",
            entry.info.index,
            entry.info.coord.col,
            entry.info.coord.row,
            state,
            entry.neighbors,
            entry.jump_targets
        ));
    }
    text
}
