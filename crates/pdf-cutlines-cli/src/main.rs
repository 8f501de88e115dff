mod logger;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use logger::StderrLogger;
use pdf_cutlines::{Anchor, CutLineError, CutLineOptions, RightBottomIndent};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "cutlines",
    about = "Extend corner cut marks on 4-up card sheets into full guillotine guides",
    version
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add cut line annotations to every page of a PDF
    Annotate {
        /// Input PDF file
        input: PathBuf,

        /// Output PDF file (default: <folder>_extended_cut_lines.pdf next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        layout: LayoutArgs,

        /// Show statistics only, don't write a PDF
        #[arg(long)]
        stats_only: bool,
    },

    /// Print the computed guide lines for each card
    Lines {
        /// PDF whose first page sets the page size
        input: PathBuf,

        #[command(flatten)]
        layout: LayoutArgs,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Write the default configuration as JSON
    InitConfig {
        /// Destination file
        path: PathBuf,
    },
}

#[derive(Args)]
struct LayoutArgs {
    /// JSON configuration file (card size, indents, anchors, line style)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Card bottom-left corner as X,Y in points; repeat once per card
    #[arg(long = "anchor", value_parser = parse_anchor)]
    anchors: Vec<Anchor>,

    /// End the Right Bottom line at the bottom indent instead of the left indent
    #[arg(long)]
    symmetric_right_bottom: bool,

    /// Line width in points
    #[arg(long)]
    line_width: Option<f32>,
}

fn parse_anchor(s: &str) -> std::result::Result<Anchor, String> {
    s.parse().map_err(|e: CutLineError| e.to_string())
}

impl LayoutArgs {
    /// Config file values (or defaults), overridden by command-line flags
    async fn options(&self) -> Result<CutLineOptions> {
        let mut options = match &self.config {
            Some(path) => CutLineOptions::load(path)
                .await
                .with_context(|| format!("loading config {}", path.display()))?,
            None => CutLineOptions::default(),
        };

        if !self.anchors.is_empty() {
            options.anchors = self.anchors.clone();
        }
        if self.symmetric_right_bottom {
            options.right_bottom_indent = RightBottomIndent::Symmetric;
        }
        if let Some(width) = self.line_width {
            options.line_style.width = width;
        }

        options.validate()?;
        Ok(options)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    StderrLogger::new(StderrLogger::level_for_verbosity(cli.verbose)).init()?;

    match cli.command {
        Commands::Annotate {
            input,
            output,
            layout,
            stats_only,
        } => {
            let options = layout.options().await?;
            let output = output.unwrap_or_else(|| pdf_cutlines::default_output_path(&input));

            let stats = if stats_only {
                let doc = pdf_cutlines::load_pdf(&input).await?;
                pdf_cutlines::calculate_statistics(&doc, &options)?
            } else {
                pdf_cutlines::add_extended_cut_lines(&input, &output, &options).await?
            };

            println!("Cut Line Statistics:");
            println!("  Pages: {}", stats.pages);
            println!("  Cards per page: {}", stats.cards);
            println!("  Lines per page: {}", stats.annotations_per_page);
            println!("  Total lines: {}", stats.total_annotations);

            if !stats_only {
                println!("Cut lines → {}", output.display());
            }
        }

        Commands::Lines {
            input,
            layout,
            json,
        } => {
            let options = layout.options().await?;
            let metrics = pdf_cutlines::read_page_metrics(&input).await?;
            let cards = pdf_cutlines::layout_cards(&options, &metrics)?;

            if json {
                let cards: Vec<_> = cards
                    .iter()
                    .map(|card| {
                        let lines: Vec<_> = card
                            .labeled_lines()
                            .map(|(which, seg)| {
                                serde_json::json!({
                                    "line": which.name(),
                                    "start": [seg.start.x, seg.start.y],
                                    "end": [seg.end.x, seg.end.y],
                                })
                            })
                            .collect();
                        serde_json::json!({
                            "anchor": [card.anchor.x, card.anchor.y],
                            "lines": lines,
                        })
                    })
                    .collect();
                let report = serde_json::json!({
                    "page": { "width": metrics.width, "height": metrics.height },
                    "midpoints": {
                        "horizontal": metrics.mid_horizontal(),
                        "vertical": metrics.mid_vertical(),
                    },
                    "cards": cards,
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                let (mid_h, mid_v) = metrics.midpoints();
                println!(
                    "Page {} x {} pt, midlines y={} x={}",
                    metrics.width, metrics.height, mid_h, mid_v
                );
                for (i, card) in cards.iter().enumerate() {
                    println!("Card {} at ({}, {})", i + 1, card.anchor.x, card.anchor.y);
                    for (which, seg) in card.labeled_lines() {
                        println!(
                            "  {:<13} ({}, {}) -> ({}, {})",
                            which.name(),
                            seg.start.x,
                            seg.start.y,
                            seg.end.x,
                            seg.end.y
                        );
                    }
                }
            }
        }

        Commands::InitConfig { path } => {
            CutLineOptions::default().save(&path).await?;
            println!("Default configuration → {}", path.display());
        }
    }

    Ok(())
}
