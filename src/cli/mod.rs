// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the postfind command-line interface.
//!
//! Four subcommands: `build` turns a directory of post files into a record
//! store, `search` queries a store, `render` runs the page-load flow against
//! an HTML file and prints the result, and `inspect` summarizes a store.

pub mod display;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "postfind",
    about = "Search for static sites: build the record store, query it, render results",
    version
)]
pub struct Cli {
    /// Site config JSON (heading id, labels, boosts). Overrides the manifest's config.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the record store from a directory of post files
    Build {
        /// Input directory containing manifest.json and post files
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory for store files
        #[arg(short, long)]
        output: PathBuf,

        /// Generate demo HTML page showing integration example
        #[arg(long)]
        demo: bool,
    },

    /// Search a store file and display ranked results
    Search {
        /// Path to store JSON
        store: PathBuf,

        /// Search query (supports +required, -excluded, field:term, term*, term~1, term^2)
        query: String,

        /// Maximum number of results to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Render the results page for a URL and print the resulting HTML
    Render {
        /// Path to store JSON
        store: PathBuf,

        /// Page URL or query string, e.g. "/search/?query=rust"
        #[arg(long)]
        url: String,

        /// HTML page to render into (defaults to the demo page)
        #[arg(long)]
        page: Option<PathBuf>,
    },

    /// Inspect a store file
    Inspect {
        /// Path to store JSON
        store: PathBuf,
    },
}
