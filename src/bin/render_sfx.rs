//! Render the synthesized sound effects to WAV files.
//!
//! ```bash
//! render-sfx [--out-dir assets/sounds] [--sample-rate 44100] [--all] [KIND...]
//! ```
//!
//! With no kinds, renders the ones the page plays from samples by default
//! (`hover` and `click`).

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use arcade_portfolio::config::SoundConfig;
use arcade_portfolio::sound::SoundKind;
use arcade_portfolio::sound::render::{MAX_SAMPLE_RATE, render_wav};
use clap::Parser;
use tracing::{error, info};

/// Sound effect renderer
#[derive(Parser, Debug)]
#[clap(name = "render-sfx")]
#[clap(about = "Render the portfolio's synthesized sound effects to WAV files")]
struct Args {
    /// Directory the WAV files are written to
    #[clap(long, value_name = "DIR", default_value = "assets/sounds")]
    out_dir: PathBuf,

    /// Output sample rate (Hz)
    #[clap(
        long,
        default_value = "44100",
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_SAMPLE_RATE))
    )]
    sample_rate: u32,

    /// Render every sound kind
    #[clap(long)]
    all: bool,

    /// Sound kinds to render (hover, click, power, jump, level-up)
    kinds: Vec<SoundKind>,
}

impl Args {
    fn selected(&self) -> Vec<SoundKind> {
        if self.all {
            return SoundKind::ALL.to_vec();
        }
        if !self.kinds.is_empty() {
            return self.kinds.clone();
        }
        SoundConfig::default().samples.iter().map(|s| s.kind).collect()
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    if let Err(e) = fs::create_dir_all(&args.out_dir) {
        error!(dir = %args.out_dir.display(), error = %e, "could not create output directory");
        return ExitCode::FAILURE;
    }

    for kind in args.selected() {
        let path = args.out_dir.join(format!("{kind}.wav"));
        let wav = match render_wav(kind, args.sample_rate) {
            Ok(wav) => wav,
            Err(e) => {
                error!(%kind, error = %e, "could not render");
                return ExitCode::FAILURE;
            }
        };
        match fs::write(&path, &wav) {
            Ok(()) => info!(%kind, path = %path.display(), bytes = wav.len(), "rendered"),
            Err(e) => {
                error!(path = %path.display(), error = %e, "could not write WAV");
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
