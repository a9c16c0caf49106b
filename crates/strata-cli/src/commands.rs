use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use strata_diff::{diff_local_with_options, DiffOptions};
use strata_remote::{spawn_listing, JsonFileLister, ListingConfig};
use strata_types::{Change, PathEntry};
use strata_walk::{walk_ordered_with, WalkOptions};
use tracing::info;

use crate::cli::*;
use crate::config::StrataConfig;
use crate::output;

pub async fn run_command(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = StrataConfig::load(cli.config.as_deref())?;
    match cli.command {
        Command::Walk(args) => cmd_walk(args, cli.format, &config),
        Command::Diff(args) => cmd_diff(args, cli.format, &config).await,
    }
}

fn cmd_walk(args: WalkArgs, format: OutputFormat, config: &StrataConfig) -> anyhow::Result<ExitCode> {
    let mut options = config.walk.clone();
    if args.all {
        options.ignore_names.clear();
    }

    match format {
        OutputFormat::Text => {
            walk_ordered_with(&args.root, &options, |entry| {
                println!("{}", output::render_entry(entry));
                Ok::<(), anyhow::Error>(())
            })
            .with_context(|| format!("walking {}", args.root.display()))?;
        }
        OutputFormat::Json => {
            let entries = collect_entries(&args.root, &options)?;
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn collect_entries(root: &Path, options: &WalkOptions) -> anyhow::Result<Vec<PathEntry>> {
    let mut entries = Vec::new();
    walk_ordered_with(root, options, |entry| {
        entries.push(entry.clone());
        Ok::<(), anyhow::Error>(())
    })
    .with_context(|| format!("walking {}", root.display()))?;
    Ok(entries)
}

async fn cmd_diff(args: DiffArgs, format: OutputFormat, config: &StrataConfig) -> anyhow::Result<ExitCode> {
    let listing_config = listing_config(&args, &config.listing);
    let changes = diff_against_file(&args.root, &args.remote, listing_config, config.diff_options()).await?;

    let changes: Vec<Change> = if args.only.is_empty() {
        changes
    } else {
        changes.into_iter().filter(|c| args.only.contains(&c.kind)).collect()
    };

    println!("{}", output::render_changes(&changes, format)?);
    if args.exit_code && !changes.is_empty() {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn listing_config(args: &DiffArgs, base: &ListingConfig) -> ListingConfig {
    let mut config = base.clone();
    if let Some(prefix) = &args.prefix {
        config.prefix = prefix.clone();
    }
    if let Some(page_size) = args.page_size {
        config.page_size = page_size;
    }
    config
}

/// Stream the listing in `remote` through the page producer and merge it
/// against `root` on a blocking thread.
async fn diff_against_file(
    root: &Path,
    remote: &Path,
    listing_config: ListingConfig,
    options: DiffOptions,
) -> anyhow::Result<Vec<Change>> {
    let lister = JsonFileLister::open(remote)
        .with_context(|| format!("loading remote listing {}", remote.display()))?;
    info!(remote = %remote.display(), objects = lister.len(), prefix = %listing_config.prefix, "diffing against remote listing");

    let listing = spawn_listing(Arc::new(lister), listing_config);
    let local_root = root.to_path_buf();
    let changes = tokio::task::spawn_blocking(move || diff_local_with_options(listing, &local_root, &options))
        .await
        .context("diff task failed")?
        .with_context(|| format!("diffing {}", root.display()))?;
    Ok(changes)
}
