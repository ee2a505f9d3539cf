use anyhow::Result;
use clap::{Parser, Subcommand};
use pdf_booklet::{BookletOptions, BookletPlan, Orientation};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "booklet",
    about = "Reorder PDF pages for saddle-stitch booklet printing",
    version
)]
struct Cli {
    /// Show debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reorder a PDF into booklet print order
    Reorder {
        /// Input PDF path
        input: Option<PathBuf>,

        /// Output PDF path
        output: Option<PathBuf>,

        /// Right-open (Japanese-style). Default is left-open (US/EU)
        #[arg(long)]
        right_open: bool,

        /// Load options from a JSON file; paths given on the command line win
        #[arg(long)]
        config: Option<PathBuf>,

        /// Show statistics only, don't write a PDF
        #[arg(long)]
        stats_only: bool,
    },

    /// Print the sheet layout for a page count
    Plan {
        /// Number of pages in the document
        pages: usize,

        /// Right-open (Japanese-style). Default is left-open (US/EU)
        #[arg(long)]
        right_open: bool,
    },
}

fn orientation(right_open: bool) -> Orientation {
    if right_open {
        Orientation::RightOpen
    } else {
        Orientation::LeftOpen
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_module("pdf_booklet", level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .format_timestamp(None)
        .format_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Reorder {
            input,
            output,
            right_open,
            config,
            stats_only,
        } => {
            let mut options = match config {
                Some(path) => BookletOptions::load(&path).await?,
                None => BookletOptions::default(),
            };
            if let Some(input) = input {
                options.input_file = input;
            }
            if let Some(output) = output {
                options.output_file = output;
            }
            if right_open {
                options.orientation = Orientation::RightOpen;
            }

            if stats_only {
                let document = pdf_booklet::load_pdf(&options.input_file).await?;
                let stats = pdf_booklet::calculate_statistics(document.get_pages().len())?;
                println!("Booklet Statistics:");
                println!("  Mode: {}", options.orientation);
                println!("  Source pages: {}", stats.source_pages);
                println!("  Output pages: {}", stats.output_pages);
                println!("  Output sheets: {}", stats.output_sheets);
                println!("  Printed sides: {}", stats.printed_sides);
                println!("  Blank pages added: {}", stats.blank_pages_added);
                return Ok(());
            }

            let report = pdf_booklet::make_booklet(&options).await?;
            println!("Done.");
            println!("{report}");
        }

        Commands::Plan { pages, right_open } => {
            let plan = BookletPlan::try_new(pages, orientation(right_open))?;
            if plan.sheet_count() == 0 {
                anyhow::bail!("Nothing to plan for 0 pages");
            }

            println!("Mode: {}", plan.orientation());
            for (number, sheet) in plan.sheets().enumerate() {
                println!(
                    "Sheet {}: front [{}, {}]  back [{}, {}]",
                    number + 1,
                    sheet[0],
                    sheet[1],
                    sheet[2],
                    sheet[3]
                );
            }
            println!(
                "{} pages -> {} pages on {} sheets ({} blank)",
                plan.page_count(),
                plan.padded_count(),
                plan.sheet_count(),
                plan.blank_count()
            );
        }
    }

    Ok(())
}
