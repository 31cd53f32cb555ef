use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tv_grab_fr_tvclub::{
    config::{
        ChannelSelection, GrabberSettings,
        defaults::{DEFAULT_DAYS, DEFAULT_OFFSET},
        default_config_file,
    },
    pipeline::{ListingRequest, TracingReporter},
    services::{Grabber, GrabberOptions, prompt_channel_selection},
    sources::TvClubSource,
};

const PROGRAM: &str = "tv_grab_fr_tvclub";
const DESCRIPTION: &str = "France (TVClub)";
const CAPABILITIES: [&str; 2] = ["baseline", "manualconfig"];

#[derive(Parser)]
#[command(name = PROGRAM)]
#[command(about = "Grab French television listings from TVClub in XMLTV format")]
#[command(disable_version_flag = true)]
struct Cli {
    /// Print a one-line description of the grabber and exit
    #[arg(long)]
    description: bool,

    /// Print the grabber version and exit
    #[arg(long)]
    version: bool,

    /// List the XMLTV capabilities of the grabber and exit
    #[arg(long)]
    capabilities: bool,

    /// Prompt for the channels to grab and write the configuration file
    #[arg(long)]
    configure: bool,

    /// Number of days to grab
    #[arg(long, default_value_t = DEFAULT_DAYS, value_name = "N")]
    days: u32,

    /// Number of days after today to start grabbing at
    #[arg(long, default_value_t = DEFAULT_OFFSET, value_name = "N")]
    offset: u32,

    /// Write the XMLTV document to this file instead of standard output
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Channel configuration file (defaults to ~/.xmltv/tv_grab_fr_tvclub.conf)
    #[arg(long, value_name = "FILE")]
    config_file: Option<PathBuf>,

    /// Output the configured channels only, without programmes
    #[arg(long)]
    list_channels: bool,

    /// Only print errors
    #[arg(long, conflicts_with = "debug")]
    quiet: bool,

    /// Print debugging information
    #[arg(long)]
    debug: bool,

    /// TOML file overriding the grabber settings
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,
}

impl Cli {
    fn log_level(&self) -> &'static str {
        if self.debug {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.version {
        println!("This is {PROGRAM} version {}", env!("CARGO_PKG_VERSION"));
        return Ok(ExitCode::SUCCESS);
    }
    if cli.description {
        println!("{DESCRIPTION}");
        return Ok(ExitCode::SUCCESS);
    }
    if cli.capabilities {
        for capability in CAPABILITIES {
            println!("{capability}");
        }
        return Ok(ExitCode::SUCCESS);
    }

    // Standard output is reserved for the XMLTV document
    let log_filter = format!("tv_grab_fr_tvclub={}", cli.log_level());
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    let settings = GrabberSettings::load(cli.settings.as_deref())?;
    let source = TvClubSource::from_settings(&settings)?;
    let grabber = Grabber::connect(&source, GrabberOptions::from(&settings)).await?;

    let config_file = cli.config_file.clone().unwrap_or_else(default_config_file);
    info!("Using configuration file {}", config_file.display());

    if cli.configure {
        let selection = prompt_channel_selection(
            grabber.list_available_channels(),
            io::stdin().lock(),
            io::stderr(),
        )?;
        selection.write(&config_file)?;
        return Ok(ExitCode::SUCCESS);
    }

    if !is_configured(&config_file) {
        return Ok(ExitCode::FAILURE);
    }

    let selection = ChannelSelection::read(&config_file)?;
    if selection.is_empty() {
        error!(
            "Configuration file {} is empty, delete and run with --configure",
            config_file.display()
        );
    }

    let request = ListingRequest::new(selection.into_channel_ids())
        .days(cli.days)
        .offset(cli.offset)
        .channels_only(cli.list_channels);

    let sink = open_output(cli.output.as_deref())?;
    grabber.write_listing(&request, sink, &TracingReporter)?;

    Ok(ExitCode::SUCCESS)
}

fn is_configured(config_file: &Path) -> bool {
    if config_file.is_file() {
        return true;
    }
    error!("You need to configure the grabber by running it with --configure");
    false
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}
