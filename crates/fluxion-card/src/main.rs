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

//! CLI entry point for the FluxION power-flow card tools

mod cli;
mod config;
mod script;

use anyhow::{Context, Result, bail};
use clap::Parser;
use fluxion_card_core::field_editor::{bar_descriptors, card_descriptors, entity_descriptors};
use fluxion_card_core::resolve;
use fluxion_card_i18n::I18n;
use fluxion_card_types::{BarSettings, CenterType};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use crate::cli::{CheckArgs, Cli, Commands, EditArgs, FieldsArgs, ResolveArgs};
use crate::config::{load_document, render};
use crate::script::{EditScript, EditSession};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respects RUST_LOG; logs go to stderr so stdout stays machine readable
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install tracing subscriber")?;

    match cli.command {
        Commands::Resolve(args) => resolve_command(&args),
        Commands::Check(args) => check_command(&args),
        Commands::Fields(args) => fields_command(&args),
        Commands::Edit(args) => edit_command(&args),
    }
}

fn resolve_command(args: &ResolveArgs) -> Result<()> {
    let raw: Value = load_document(&args.config)?;
    let config = resolve(&raw).context("Invalid card configuration")?;
    println!("{}", render(&config, args.format)?);
    Ok(())
}

fn check_command(args: &CheckArgs) -> Result<()> {
    let raw: Value = load_document(&args.config)?;
    let config = resolve(&raw).context("Invalid card configuration")?;

    info!("📋 Card summary:");
    info!("   Entities: {}", config.entities.len());
    info!("   Visible: {}", config.visible_entities().count());
    info!("   Animation: {}", config.animation.to_config_value());
    info!("   Center: {}", config.center.kind.to_config_value());
    if config.center.kind == CenterType::Bars {
        info!("   Bars: {}", config.bars().len());
    }
    println!("✅ {} is a valid card configuration", args.config.display());
    Ok(())
}

fn fields_command(args: &FieldsArgs) -> Result<()> {
    let raw: Value = load_document(&args.config)?;
    let config = resolve(&raw).context("Invalid card configuration")?;
    let i18n = I18n::new(args.language).context("Failed to load translations")?;

    let descriptors = if let Some(index) = args.item {
        let Some(record) = config.entities.get(index) else {
            bail!(
                "Entity {index} out of range, the card has {} entities",
                config.entities.len()
            );
        };
        entity_descriptors(record, &i18n)
    } else if args.bars {
        bar_descriptors(&BarSettings::default(), &i18n)
    } else {
        card_descriptors(&config, &i18n)
    };

    println!(
        "{}",
        serde_json::to_string_pretty(&descriptors).context("Failed to serialize fields")?
    );
    Ok(())
}

fn edit_command(args: &EditArgs) -> Result<()> {
    let raw: Value = load_document(&args.config)?;
    let script: EditScript = load_document(&args.script)?;

    let report = EditSession::open(&raw, args.language)?.run(&script)?;
    if !report.skipped.is_empty() {
        info!("⚠️ Skipped steps: {:?}", report.skipped);
    }
    info!("Host revision {} in view {}", report.revision, report.view);
    println!("{}", render(&report.config, args.format)?);
    Ok(())
}
