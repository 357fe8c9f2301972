// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use fluxion_card_i18n::Language;

#[derive(Parser, Debug)]
#[command(name = "fluxion-card")]
#[command(author, version, about = "FluxION power-flow card configuration tool")]
#[command(
    long_about = "Resolve, inspect and edit power-flow card configurations.\n\
    \nReads card configurations from JSON or TOML files, fills in preset defaults\n\
    and replays editor sessions against them.\n\
    \nExamples:\n  \
    fluxion-card resolve card.toml              # Print the resolved configuration\n  \
    fluxion-card fields card.json --item 2      # Editor fields of the third entity\n  \
    fluxion-card edit card.json --script s.toml # Replay an editor session"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the configuration with all defaults applied
    Resolve(ResolveArgs),

    /// Validate a configuration and print a short summary
    Check(CheckArgs),

    /// List the editor fields of the card, an entity or the bars
    #[command(
        long_about = "List the field descriptors the editor shows.\n\
        \nWithout options the main form is listed. Use --item to list the fields\n\
        of one entity (including its preset group) or --bars for the bar form.\n\
        \nExamples:\n  \
        fluxion-card fields card.json\n  \
        fluxion-card fields card.json --item 0 --language de"
    )]
    Fields(FieldsArgs),

    /// Replay an editor session and print the configuration the host ends up with
    #[command(
        long_about = "Replay a scripted editor session.\n\
        \nThe script is a JSON or TOML file with a list of steps, for example:\n  \
        [[steps]]\n  \
        op = \"edit_item\"\n  \
        index = 1\n\
        \nEvery change the editor emits is applied by the host before the next step."
    )]
    Edit(EditArgs),
}

#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// Card configuration file (.json or .toml)
    pub config: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Card configuration file (.json or .toml)
    pub config: PathBuf,
}

#[derive(Parser, Debug)]
pub struct FieldsArgs {
    /// Card configuration file (.json or .toml)
    pub config: PathBuf,

    /// Zero-based position of the entity to describe
    #[arg(long, conflicts_with = "bars")]
    pub item: Option<usize>,

    /// Describe the bar form instead of the main form
    #[arg(long, default_value_t = false)]
    pub bars: bool,

    /// Label language (en, de)
    #[arg(long, default_value_t = Language::English)]
    pub language: Language,
}

#[derive(Parser, Debug)]
pub struct EditArgs {
    /// Card configuration file (.json or .toml)
    pub config: PathBuf,

    /// Editor session script (.json or .toml)
    #[arg(long)]
    pub script: PathBuf,

    #[arg(long, default_value_t = Language::English)]
    pub language: Language,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Toml,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_fields_arguments() {
        let cli = Cli::parse_from([
            "fluxion-card",
            "fields",
            "card.json",
            "--item",
            "2",
            "--language",
            "de",
        ]);
        let Commands::Fields(args) = cli.command else {
            panic!("expected the fields command");
        };
        assert_eq!(args.item, Some(2));
        assert!(!args.bars);
        assert_eq!(args.language, Language::German);
    }

    #[test]
    fn test_item_conflicts_with_bars() {
        let result = Cli::try_parse_from([
            "fluxion-card",
            "fields",
            "card.json",
            "--item",
            "0",
            "--bars",
        ]);
        assert!(result.is_err());
    }
}
