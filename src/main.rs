//! Cladewick CLI
//!
//! Reads a file with one Newick tree per line and reports tree sizes,
//! clade branch lengths, or tip branch lengths.

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use cladewick::config::{CladeConfig, CladeSpec};
use cladewick::newick::{NewickParser, read_lines};
use cladewick::{QueryError, Tree};
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Parser)]
#[command(name = "cladewick")]
#[command(about = "Parse Newick trees and query clades")]
#[command(version = cladewick::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Print each tree with its number of leaves and inner vertices
    Summary {
        /// File with one Newick tree per line
        file: PathBuf,
    },

    /// Print mean tip-to-clade-root path length and stem length of clades
    Clade {
        /// File with one Newick tree per line
        file: PathBuf,

        /// TOML file with [[clade]] definitions
        #[arg(short, long, env = "CLADEWICK_CONFIG")]
        config: Option<PathBuf>,

        /// Inline clade definition NAME=TAXON,TAXON,... (repeatable)
        #[arg(long = "clade", value_name = "NAME=TAXA")]
        clades: Vec<CladeSpec>,
    },

    /// Print the branch length of the vertex with the given label
    Tip {
        /// File with one Newick tree per line
        file: PathBuf,

        /// Label of the vertex
        label: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Summary { file } => summary(&file),
        Commands::Clade {
            file,
            config,
            clades,
        } => clade(&file, config.as_deref(), clades),
        Commands::Tip { file, label } => tip(&file, &label),
    }
}

fn init_tracing(verbose: u8) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let default_level = match verbose {
        0 => "cladewick=warn",
        1 => "cladewick=info",
        2 => "cladewick=debug",
        _ => "cladewick=trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

/// Parses the trees of `file` lazily, calling `f` with index and tree.
fn for_each_tree<F>(file: &Path, mut f: F) -> Result<()>
where
    F: FnMut(usize, &Tree) -> Result<()>,
{
    let lines = read_lines(file).with_context(|| format!("failed to read {}", file.display()))?;
    for (index, tree) in NewickParser::new().into_iter(lines).enumerate() {
        let tree = tree.with_context(|| format!("tree {index} of {}", file.display()))?;
        f(index, &tree)?;
    }
    Ok(())
}

fn summary(file: &Path) -> Result<()> {
    for_each_tree(file, |index, tree| {
        println!("======= Tree {index} =======");
        println!("{}", tree.to_newick());
        println!("Leaves: {}", tree.num_leaves());
        println!("Inner: {}", tree.num_inner());
        Ok(())
    })
}

fn clade(file: &Path, config: Option<&Path>, inline: Vec<CladeSpec>) -> Result<()> {
    let mut clades = match config {
        Some(path) => CladeConfig::from_file(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => CladeConfig::default(),
    };
    for spec in inline {
        clades.push(spec)?;
    }
    if clades.is_empty() {
        bail!("no clades given, use --config or --clade");
    }

    for_each_tree(file, |index, tree| {
        for spec in clades.clades() {
            match tree.clade_summary(&spec.taxa) {
                Ok(summary) => println!(
                    "{index}\t{}\t{}\t{}",
                    spec.name, summary.mean_path_length, summary.stem_length
                ),
                Err(QueryError::EmptyClade) => {
                    warn!(clade = %spec.name, tree = index, "no taxon of clade found");
                    println!("{index}\t{}\tNA\tNA", spec.name);
                }
                Err(err) => return Err(err.into()),
            }
        }
        Ok(())
    })
}

fn tip(file: &Path, label: &str) -> Result<()> {
    for_each_tree(file, |index, tree| {
        match tree.tip_branch_length(label) {
            Some(length) => println!("{index}\t{length}"),
            None => println!("{index}\tNA"),
        }
        Ok(())
    })
}
