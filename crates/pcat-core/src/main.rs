//! Catalogue explorer
//!
//! Pages parent records and resolves sub types from a JSON catalogue
//! fixture shaped `{ "<domain>": [records...] }`.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use pcat_core::prelude::*;
use pcat_core::telemetry;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "pcat-explore", version, about = "Browse a parts catalogue fixture")]
struct Cli {
    /// Catalogue fixture (JSON object of domain to records)
    #[arg(long, short = 'f')]
    catalogue: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter, overrides RUST_LOG
    #[arg(long)]
    log: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Page through a domain's parent records
    Page {
        /// Domain tag
        domain: String,
        /// Items per page
        #[arg(long)]
        size: Option<usize>,
        /// Pages to load
        #[arg(long, default_value_t = 1)]
        pages: u32,
        /// Search term
        #[arg(long)]
        search: Option<String>,
    },
    /// Resolve one parent's sub types
    Subtypes {
        /// Domain tag
        domain: String,
        /// Parent record id
        parent_id: String,
        /// Search term
        #[arg(long)]
        search: Option<String>,
        /// Page number (1-based)
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Items per page
        #[arg(long)]
        size: Option<usize>,
    },
    /// List the domain table
    Domains,
}

fn load_catalogue(path: &Path) -> Result<BTreeMap<String, Vec<Value>>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalogue {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("catalogue {} is not a domain-to-records object", path.display()))
}

fn open(cli: &Cli, config: CatalogConfig) -> Result<CatalogOptions> {
    let Some(path) = &cli.catalogue else {
        bail!("--catalogue is required for this command");
    };
    Ok(CatalogOptions::from_records(load_catalogue(path)?, config))
}

fn print_page(options: &[SelectOption]) {
    for option in options {
        println!("  {:>8}  {}", option.value(), option.label());
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init_tracing(cli.log.as_deref());

    let mut config = match &cli.config {
        Some(path) => CatalogConfig::load(path)?,
        None => CatalogConfig::default(),
    };

    match &cli.command {
        Command::Domains => {
            for row in config.domain_table().rows() {
                println!(
                    "{:<14} id={} leaves={} leaf_id={} names={}/{}",
                    row.tag,
                    row.id_field,
                    row.leaves_field,
                    row.leaf_id_field,
                    row.name_field,
                    row.alt_name_field
                );
            }
        }
        Command::Page {
            domain,
            size,
            pages,
            search,
        } => {
            if let Some(size) = size {
                config.paging.page_size = *size;
            }
            config.validate()?;

            let options = open(&cli, config)?;
            if options.domains().get(domain).is_none() {
                bail!("unknown domain {domain:?}");
            }
            options
                .ensure_loaded(domain)
                .await
                .with_context(|| format!("failed to load {domain} records"))?;

            let loader = options.parent_loader(domain).await;
            match search {
                Some(term) => {
                    loader.set_search(term.as_str()).await;
                }
                None => {
                    loader.load_initial().await;
                }
            }
            for _ in 1..*pages {
                if !loader.load_more_for_current_query().await.is_loaded() {
                    break;
                }
            }

            let view = loader.view();
            print_page(&view.items);
            println!(
                "{} of {} shown, more: {}",
                view.items.len(),
                view.total_items,
                view.has_more
            );
        }
        Command::Subtypes {
            domain,
            parent_id,
            search,
            page,
            size,
        } => {
            let page_size = size.unwrap_or(config.paging.page_size);
            if page_size == 0 {
                bail!("--size must be greater than zero");
            }

            let options = open(&cli, config)?;
            let parent = OptionValue::from(parent_id.as_str());
            let result = options
                .subtypes(domain, &parent, search.as_deref().unwrap_or_default(), *page, page_size)
                .await;

            print_page(&result.items);
            println!(
                "page {page}: {} of {} matching, next page: {}",
                result.items.len(),
                result.total_items,
                result.has_next_page
            );
        }
    }

    Ok(())
}
