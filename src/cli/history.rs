//! Taiwan history subcommands.
//!
//! Provides commands to:
//! - `eras`: List era tags from the CMS next to the built-in era table
//! - `era`: Resources tagged with one era
//! - `timeline`: Timeline entries, oldest first
//! - `gazetteers` / `gallery`: Gazetteer and gallery collections
//! - `search`: Era/category narrowed text search

use anyhow::Result;
use clap::Subcommand;

use super::print_resources;
use crate::adapters::ContentApi;
use crate::core::{ContentService, SearchParams};
use crate::domain::ERA_PREFIX;
use crate::presentation::{format_date, EraTable, StyleBook};

/// History-related subcommands
#[derive(Subcommand, Debug)]
pub enum HistoryCommands {
    /// List eras
    Eras,

    /// Resources for one era
    Era {
        /// Era slug (e.g. qing, japanese)
        slug: String,
    },

    /// Timeline events in chronological order
    Timeline,

    /// Local gazetteers
    Gazetteers {
        /// Region tag slug
        #[arg(short, long)]
        region: Option<String>,
    },

    /// Gallery resources
    Gallery {
        /// Collection tag slug
        #[arg(short, long)]
        collection: Option<String>,
    },

    /// Search with optional era and category narrowing
    Search {
        /// Text matched against title, excerpt and body
        #[arg(short, long)]
        query: Option<String>,

        /// Era slug
        #[arg(short, long)]
        era: Option<String>,

        /// Category tag slug
        #[arg(short, long)]
        category: Option<String>,
    },
}

/// Execute history subcommands
pub async fn execute<A: ContentApi>(
    command: HistoryCommands,
    service: &ContentService<A>,
    styles: &StyleBook,
) -> Result<()> {
    let eras = EraTable::standard();

    match command {
        HistoryCommands::Eras => {
            let remote = service.all_eras().await;

            println!("{:<16} {:<14} {:<12} {}", "SLUG", "ERA", "YEARS", "CMS TAG");
            println!("{}", "-".repeat(60));
            for era in eras.eras() {
                let tag = remote
                    .iter()
                    .find(|c| c.slug == format!("{}{}", ERA_PREFIX, era.slug))
                    .map(|c| c.name.as_str())
                    .unwrap_or("-");
                println!(
                    "{:<16} {:<14} {:<12} {}",
                    era.slug,
                    format!("{} {}", era.icon, era.name),
                    era.date_range,
                    tag
                );
            }
        }
        HistoryCommands::Era { slug } => {
            let name = eras.era_name(&slug).unwrap_or("未知時代");
            let style = eras.era_style(name);
            println!("{} {} {}\n{}\n", style.icon, name, style.date_range, style.description);
            print_resources(&service.resources_by_era(&slug).await, styles);
        }
        HistoryCommands::Timeline => {
            let events = service.timeline_events().await;
            if events.is_empty() {
                println!("(no timeline events)");
            }
            for event in &events {
                let date = event
                    .published_at
                    .map(|d| format_date(&d.to_rfc3339()))
                    .unwrap_or_default();
                println!("{:<16} {}", date, event.title);
            }
        }
        HistoryCommands::Gazetteers { region } => {
            print_resources(&service.gazetteers(region.as_deref()).await, styles);
        }
        HistoryCommands::Gallery { collection } => {
            print_resources(&service.gallery_resources(collection.as_deref()).await, styles);
        }
        HistoryCommands::Search {
            query,
            era,
            category,
        } => {
            let params = SearchParams {
                query,
                era,
                category,
            };
            let results = service.advanced_search(&params).await;
            println!("Found {} result(s)\n", results.len());
            print_resources(&results, styles);
        }
    }

    Ok(())
}
