//! logweave demo
//!
//! Replays the same concurrent workload with one logging technique added per
//! slide, so the output of consecutive slides can be compared side by side.
//!
//! ```text
//!   slide 1   plain lines
//!   slide 2   + task prefixes          [numbers] 1
//!   slide 3   + argument colors        paths cyan, times yellow, argv dim
//!   slide 4   + exec audit             Running «grep foobar '...'»
//!   slide 5   + streamed child output    :stderr: grep: ...
//!   slide 6   + newline replacement    one record, one line
//! ```
//!
//! Pipe into `less -SR` to keep one record per screen row.

mod workload;

use std::path::PathBuf;

use clap::Parser;

use logweave::config::{load_config, LogConfig};
use logweave::observability;

#[derive(Parser)]
#[command(name = "logweave")]
#[command(about = "Demonstrate logging techniques on a noisy concurrent workload", long_about = None)]
struct Cli {
    /// Slide number (1-6)
    #[arg(value_parser = clap::value_parser!(u8).range(1..=6))]
    slide: u8,

    /// Base logging configuration (TOML); the slide switches features on top
    #[arg(short, long)]
    config: Option<PathBuf>,
}

struct Slide {
    title: &'static str,
    prefixes: bool,
    colors: bool,
    subprocesses: bool,
    streamed_output: bool,
    replace_newlines: bool,
}

const SLIDES: [Slide; 6] = [
    Slide {
        title: "Run the workload with standard logging",
        prefixes: false,
        colors: false,
        subprocesses: false,
        streamed_output: false,
        replace_newlines: false,
    },
    Slide {
        title: "Add prefixes",
        prefixes: true,
        colors: false,
        subprocesses: false,
        streamed_output: false,
        replace_newlines: false,
    },
    Slide {
        title: "Add some color",
        prefixes: true,
        colors: true,
        subprocesses: false,
        streamed_output: false,
        replace_newlines: false,
    },
    Slide {
        title: "Log all subprocess execs",
        prefixes: true,
        colors: true,
        subprocesses: true,
        streamed_output: false,
        replace_newlines: false,
    },
    Slide {
        title: "Log all subprocess output as it happens",
        prefixes: true,
        colors: true,
        subprocesses: true,
        streamed_output: true,
        replace_newlines: false,
    },
    Slide {
        title: "Replace newlines",
        prefixes: true,
        colors: true,
        subprocesses: true,
        streamed_output: true,
        replace_newlines: true,
    },
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let index = usize::from(cli.slide) - 1;
    let slide = &SLIDES[index];

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => LogConfig::default(),
    };
    config.prefixes = slide.prefixes;
    config.colors = slide.colors;
    config.subprocesses = slide.subprocesses;
    config.replace_newlines = slide.replace_newlines;

    observability::init(&config)?;
    tracing::info!(slide = cli.slide, "{}", slide.title);

    workload::do_stuff(slide.streamed_output).await;

    match SLIDES.get(index + 1) {
        Some(next) => tracing::info!(target: "logweave::slides", "Next slide: {}", next.title),
        None => tracing::info!(target: "logweave::slides", "No more slides!"),
    }
    Ok(())
}
