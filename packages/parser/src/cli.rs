//! Command-line interface for the parser.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::ParserConfig;
use crate::error::{ParserError, Result};
use crate::parser::LawParser;
use crate::tree::{LawCollection, LeafOptions};
use crate::writer::{load_collection_dir, load_tree, save_collection};

/// Thai law parser - Rebuild law trees from flat section dumps.
#[derive(Parser)]
#[command(name = "lawtree-parser")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse raw document dumps into law trees and save them as JSON.
    Parse {
        /// Raw JSON dumps (default: documents listed in the config file)
        inputs: Vec<PathBuf>,

        /// YAML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory (default: data/lawtree/)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Split sections into subsections (อนุมาตรา)
        #[arg(short, long)]
        subsections: bool,
    },

    /// Print a summary of saved law trees.
    Inspect {
        /// Tree file or directory of tree files
        path: PathBuf,
    },

    /// Print the references of each section in a saved law tree.
    References {
        /// Tree file
        file: PathBuf,

        /// Only show this section number (e.g. "5" or "10/1")
        #[arg(short, long)]
        section: Option<String>,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse {
            inputs,
            config,
            output,
            subsections,
        } => parse_command(&inputs, config.as_deref(), output.as_deref(), subsections),
        Commands::Inspect { path } => inspect_command(&path),
        Commands::References { file, section } => references_command(&file, section.as_deref()),
    }
}

/// Execute the parse command.
fn parse_command(
    inputs: &[PathBuf],
    config: Option<&Path>,
    output: Option<&Path>,
    subsections: bool,
) -> Result<()> {
    let config = match config {
        Some(path) => ParserConfig::load(path)?,
        None => ParserConfig::default(),
    };

    if inputs.is_empty() && config.documents.is_empty() {
        return Err(ParserError::InvalidConfig(
            "no input documents given on the command line or in the config file".to_string(),
        ));
    }

    let parser =
        LawParser::from_config(&config)?.with_subsections(subsections || config.deepest_subsection);
    let output_dir = output.map_or_else(|| config.output_dir(), Path::to_path_buf);

    let document_count = if inputs.is_empty() {
        config.documents.len()
    } else {
        inputs.len()
    };
    println!(
        "{} {} documents",
        style("Parsing").bold(),
        style(document_count).cyan()
    );
    println!();

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message("Building law trees...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let parsed = if inputs.is_empty() {
        parser.parse_config_documents()
    } else {
        parser.parse_files(inputs)
    };
    let collection = match parsed {
        Ok(collection) => collection,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.set_message("Saving JSON...");
    let paths = match save_collection(&collection, &output_dir) {
        Ok(paths) => paths,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };
    pb.finish_and_clear();

    for tree in &collection {
        let sections = tree
            .get_leaf_nodes(&LeafOptions::default().with_stop_at_section(true))
            .len();
        println!("  {} ({})", style(&tree.name_th).green(), tree.law_code);
        println!("    Sections: {sections}  Depth: {}", tree.structure_depth());
    }

    println!();
    println!(
        "{} {} files in {}",
        style("Saved").green().bold(),
        paths.len(),
        output_dir.display()
    );

    Ok(())
}

/// Execute the inspect command.
fn inspect_command(path: &Path) -> Result<()> {
    let collection = if path.is_dir() {
        load_collection_dir(path)?
    } else {
        LawCollection::from(load_tree(path)?)
    };

    print!("{collection}");
    println!();
    println!("  Max depth: {}", style(collection.get_max_depth()).cyan());
    println!(
        "  Leaves: {}",
        style(collection.get_leaf_nodes(&LeafOptions::default()).len()).cyan()
    );

    Ok(())
}

/// Execute the references command.
fn references_command(file: &Path, section: Option<&str>) -> Result<()> {
    let tree = load_tree(file)?;
    let options = LeafOptions::default().with_stop_at_section(true);

    let mut shown = 0;
    for leaf in tree.get_leaf_nodes(&options) {
        let number = leaf.section_no.as_deref().unwrap_or_default();
        if section.is_some_and(|wanted| wanted.trim() != number) {
            continue;
        }

        let label = leaf.section_label.as_deref().unwrap_or(number);
        if leaf.section_reference.is_empty() {
            println!("{}: {}", style(label).bold(), style("-").dim());
        } else {
            println!(
                "{}: {}",
                style(label).bold(),
                style(leaf.section_reference.join(", ")).cyan()
            );
        }
        shown += 1;
    }

    if shown == 0 {
        if let Some(wanted) = section {
            println!("{} section {wanted} not found", style("Warning:").yellow().bold());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_command() {
        let cli = Cli::parse_from(["lawtree-parser", "parse", "a.json", "b.json", "-s"]);

        let Commands::Parse {
            inputs,
            config,
            output,
            subsections,
        } = cli.command
        else {
            panic!("expected parse command");
        };
        assert_eq!(inputs, vec![PathBuf::from("a.json"), PathBuf::from("b.json")]);
        assert!(config.is_none());
        assert!(output.is_none());
        assert!(subsections);
    }

    #[test]
    fn test_cli_parse_with_config_and_output() {
        let cli = Cli::parse_from([
            "lawtree-parser",
            "parse",
            "--config",
            "parser.yaml",
            "--output",
            "out",
        ]);

        let Commands::Parse {
            inputs,
            config,
            output,
            ..
        } = cli.command
        else {
            panic!("expected parse command");
        };
        assert!(inputs.is_empty());
        assert_eq!(config, Some(PathBuf::from("parser.yaml")));
        assert_eq!(output, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_cli_references_section() {
        let cli = Cli::parse_from(["lawtree-parser", "references", "tree.json", "--section", "10/1"]);

        let Commands::References { file, section } = cli.command else {
            panic!("expected references command");
        };
        assert_eq!(file, PathBuf::from("tree.json"));
        assert_eq!(section.as_deref(), Some("10/1"));
    }

    #[test]
    fn test_parse_command_without_inputs_fails() {
        let err = parse_command(&[], None, None, false).unwrap_err();
        assert!(matches!(err, ParserError::InvalidConfig(_)));
    }
}
