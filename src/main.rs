use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use squad_shuffle::config::{ShuffleConfig, DEFAULT_SETTINGS_PATH};
use squad_shuffle::printer::{self, OutputStyle};
use squad_shuffle::Shuffle;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;

/// Shuffle squad members into mixed groups and print them, colored by squad
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Settings file
    #[arg(short, long, default_value = DEFAULT_SETTINGS_PATH)]
    config: PathBuf,

    /// Seed for a reproducible shuffle
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print names without terminal colors (also enabled by NO_COLOR)
    #[arg(long)]
    no_color: bool,

    /// Print the result as JSON instead of colored lines
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "squad_shuffle=warn".into()),
        )
        .init();

    let args = Args::parse();

    let config = ShuffleConfig::load(&args.config)?;
    let mut shuffle = Shuffle::new(&config)
        .with_context(|| format!("invalid settings in {}", args.config.display()))?;

    info!(
        squads = shuffle.squads().len(),
        groups = shuffle.groups().len(),
        seed = ?args.seed,
        "shuffling"
    );

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    shuffle.run(&mut rng)?;

    let mut stdout = io::stdout().lock();
    if args.json {
        serde_json::to_writer_pretty(&mut stdout, &shuffle.report())?;
        writeln!(stdout)?;
        return Ok(());
    }

    let style = if args.no_color || std::env::var_os("NO_COLOR").is_some() {
        OutputStyle::Plain
    } else {
        OutputStyle::Colored
    };
    printer::write_groups(&mut stdout, shuffle.groups(), shuffle.squads(), style)
        .context("failed to write groups")?;

    Ok(())
}
