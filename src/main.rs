// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::time::Instant;

use postfind::build::{demo_page, load_store, run_build, BuildOptions, STABLE_STORE_FILE};
use postfind::{
    Field, IndexConfig, IndexProvider, MemoryDocument, QueryRenderer, RecordStore, RenderOutcome,
    SiteConfig, SiteIndex, StoreShape,
};

mod cli;
use cli::display::{fit_tail, format_size, Panel, Style, Tone};
use cli::{Cli, Commands};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = cli
        .config
        .as_deref()
        .map(SiteConfig::from_file)
        .transpose()
        .map_err(anyhow::Error::msg)?;

    match cli.command {
        Commands::Build {
            input,
            output,
            demo,
        } => cmd_build(&input, &output, demo, config),
        Commands::Search {
            store,
            query,
            limit,
        } => cmd_search(&store, &query, limit, &config.unwrap_or_default()),
        Commands::Render { store, url, page } => {
            cmd_render(&store, &url, page.as_deref(), &config.unwrap_or_default())
        }
        Commands::Inspect { store } => cmd_inspect(&store),
    }
}

fn cmd_build(input: &Path, output: &Path, demo: bool, config: Option<SiteConfig>) -> Result<()> {
    let options = BuildOptions {
        emit_demo: demo,
        config,
    };
    let summary = run_build(input, output, &options).map_err(anyhow::Error::msg)?;

    eprintln!();
    eprintln!("✅ Build complete");
    eprintln!(
        "   {} posts │ {} terms │ {}",
        summary.post_count,
        summary.term_count,
        format_size(summary.bytes)
    );
    eprintln!("  ✓ {}", output.join(&summary.store_file).display());
    eprintln!("  ✓ {}", output.join(STABLE_STORE_FILE).display());
    if let Some(demo_file) = &summary.demo_file {
        eprintln!("  ✓ {}", output.join(demo_file).display());
    }
    Ok(())
}

fn build_index(store_path: &Path, config: &IndexConfig) -> Result<SiteIndex> {
    let store = load_store(store_path).map_err(anyhow::Error::msg)?;
    Ok(SiteIndex::build(store, config))
}

fn cmd_search(store_path: &Path, query: &str, limit: usize, config: &SiteConfig) -> Result<()> {
    let index = build_index(store_path, &config.index)?;

    let start = Instant::now();
    let matches = index.search(query);
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    let style = Style::detect();
    let mut panel = Panel::new(style, "SEARCH");
    panel.field("query", &style.paint(Tone::Accent, query));
    panel.field(
        "matches",
        &format!(
            "{} of {} records in {:.3} ms",
            matches.len(),
            index.doc_count(),
            elapsed_ms
        ),
    );
    panel.section("RESULTS");

    let best = matches.first().map(|m| m.score).unwrap_or(0.0);
    for (rank, m) in matches.iter().take(limit).enumerate() {
        let title = index
            .lookup(&m.reference)
            .map(|r| r.title.as_str())
            .unwrap_or("?");
        panel.ranked(rank + 1, m.score, best, title, &m.reference);
    }
    if matches.is_empty() {
        panel.line(&format!(" {}", style.paint(Tone::Muted, &config.no_results_label)));
    } else if matches.len() > limit {
        panel.more(matches.len() - limit);
    }

    print!("{}", panel.finish());
    Ok(())
}

fn cmd_render(store_path: &Path, url: &str, page: Option<&Path>, config: &SiteConfig) -> Result<()> {
    let index = build_index(store_path, &config.index)?;

    let html = match page {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read page {}", path.display()))?,
        None => demo_page(STABLE_STORE_FILE, config).map_err(anyhow::Error::msg)?,
    };
    let mut doc = MemoryDocument::parse(&html);

    let renderer = QueryRenderer::new(config, &index);
    let outcome = renderer
        .on_page_load(&mut doc, url)
        .with_context(|| format!("Failed to render {}", url))?;

    println!("{}", doc.to_html());

    match outcome {
        RenderOutcome::Skipped => {
            eprintln!("ℹ️  no '{}' parameter in {}; page unchanged", config.query_param, url)
        }
        RenderOutcome::NoResults => eprintln!("  ✓ rendered: {}", config.no_results_label),
        RenderOutcome::Results { count } => eprintln!("  ✓ rendered {} results", count),
    }
    Ok(())
}

fn cmd_inspect(store_path: &Path) -> Result<()> {
    let content = fs::read_to_string(store_path)
        .with_context(|| format!("Failed to read {}", store_path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in {}", store_path.display()))?;

    let shape = StoreShape::of(&value);
    let stored_checksum = match shape {
        Some(StoreShape::Envelope { .. }) => value
            .get("checksum")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    };

    // Text decoding, so repeated refs are reported.
    let store = RecordStore::from_json_str(&content)
        .with_context(|| format!("{} failed validation", store_path.display()))?;
    let index = SiteIndex::build(store.clone(), &IndexConfig::default());

    let style = Style::detect();
    let mut panel = Panel::new(style, "STORE");
    panel.field("file", &fit_tail(&store_path.display().to_string(), 68));
    panel.field("size", &format_size(content.len()));
    if let Some(shape) = shape {
        panel.field("format", &shape.to_string());
    }
    match stored_checksum {
        Some(checksum) => panel.field("checksum", &format!("{} {}", checksum, style.mark(true))),
        None => panel.field("checksum", &format!("{} (computed)", store.checksum())),
    }
    panel.field("records", &store.len().to_string());
    panel.field("terms", &index.term_count().to_string());

    panel.section("FIELDS");
    for field in Field::ALL {
        let (filled, chars) = store.iter().fold((0usize, 0usize), |(filled, chars), (_, r)| {
            let text = field.text(r);
            (filled + usize::from(!text.is_empty()), chars + text.chars().count())
        });
        panel.field_stats(field.name(), filled, chars);
    }

    const SHOWN: usize = 20;
    panel.section("RECORDS");
    for (reference, record) in store.iter().take(SHOWN) {
        panel.record(reference, &record.title);
    }
    if store.len() > SHOWN {
        panel.more(store.len() - SHOWN);
    }

    print!("{}", panel.finish());
    Ok(())
}
