use clap::Parser;
use gallery_migrate::config::{self, ConfigOverrides};
use gallery_migrate::diagnostics::TracingDiagnostics;
use gallery_migrate::pairing::PairingMode;
use gallery_migrate::{migrate, output};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "gallery-migrate")]
#[command(about = "Convert a legacy PHP Gallery album into Galleria HTML fragments")]
#[command(long_about = "\
Convert a legacy PHP Gallery album into Galleria HTML fragments

Reads captions from the album's photos.dat files, pairs every image with its
thumbnail, and writes the <img> tags Galleria expects into gallery_01,
gallery_02, ... files.

Album structure:

  album/
  ├── gallery-migrate.toml        # Optional settings (see --gen-config)
  ├── photos.dat                  # Serialized album items with captions
  ├── photos.dat.0                # Continuation files, merged in order
  ├── IMG_0001.jpg                # Main image
  ├── IMG_0001.sized.jpg          # Resized copy, ignored
  ├── IMG_0001.thumb.jpg          # Thumbnail
  └── IMG_0002.highlight.jpg      # Album highlight, ignored

Set RUST_LOG=debug for more detail.")]
#[command(version)]
struct Cli {
    /// Gallery directory to migrate
    #[arg(required_unless_present = "gen_config")]
    source: Option<PathBuf>,

    /// Write pages here instead of the gallery directory
    #[arg(long)]
    output: Option<PathBuf>,

    /// Photos per page (default 25)
    #[arg(long)]
    per_page: Option<usize>,

    /// Pairing strategy: legacy or resync
    #[arg(long)]
    pairing: Option<PairingMode>,

    /// Print a stock gallery-migrate.toml with all options documented
    #[arg(long)]
    gen_config: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.gen_config {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let source = cli.source.ok_or("no gallery directory given")?;
    migrate::validate_source(&source)?;

    let overrides = ConfigOverrides {
        photos_per_page: cli.per_page,
        pairing: cli.pairing,
    };
    let config = config::load_config(&source, &overrides)?;
    tracing::debug!(
        photos_per_page = config.photos_per_page,
        pairing = %config.pairing,
        "configuration loaded"
    );

    let mut diagnostics = TracingDiagnostics::new();
    let report = migrate::run(&source, cli.output.as_deref(), &config, &mut diagnostics)?;
    output::print_run_output(&report, &source, diagnostics.warnings());
    Ok(())
}
