use anyhow::{Context, Result};
use clap::Parser;
use frameplay_lib::{Config, Encoder, QuantizedFrame, Report, Source, Stats};
use indicatif::ParallelProgressIterator;
use rayon::iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator};
use std::path::PathBuf;
use tracing::{error, info, Level};

/// Compiles a directory of sampled video frames into a playback map.
#[derive(Parser, Debug)]
#[command(name = "frameplay", version)]
struct Cli {
    /// Directory of frame PNGs; file names sort into playback order.
    frames: PathBuf,

    /// JSON run configuration; built-in defaults otherwise.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Map output path [default: generated_map_{W}x{H}_{FPS}FPS.xml].
    #[arg(long)]
    out: Option<PathBuf>,

    /// Summary output path.
    #[arg(long, default_value = "video_info.txt")]
    info: PathBuf,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(match cli.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        })
        .init();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let source = Source::from_dir(&cli.frames).context("Couldn't load video")?;
    let grid = config.grid(source.dimensions())?;
    let params = config.params(grid)?;
    let palette = config.palette_space()?;

    let mut encoder = Encoder::new(&params, &palette)?;
    let frames = perform_quantization(&encoder, &source);

    for frame in frames {
        if let Err(err) = frame.and_then(|frame| encoder.push(frame)) {
            error!(
                accepted = encoder.frames(),
                total = source.len(),
                "{}", err
            );

            return Err(err).with_context(|| {
                format!(
                    "Stopped after {} of {} frames; no map written",
                    encoder.frames(),
                    source.len()
                )
            });
        }
    }

    let (stats, map) = encoder.finish()?;

    let out = cli.out.unwrap_or_else(|| {
        PathBuf::from(format!(
            "generated_map_{}x{}_{}FPS.xml",
            grid.width(),
            grid.height(),
            params.frame_rate()
        ))
    });

    std::fs::write(&out, &map)
        .with_context(|| format!("Couldn't write map: {}", out.display()))?;

    print_stats(&stats);
    println!("Map {} created successfully.", out.display());

    let report = Report::new(&params, palette.len(), stats.frames);

    std::fs::write(&cli.info, report.to_string())
        .with_context(|| format!("Couldn't write video info: {}", cli.info.display()))?;

    println!("Video information saved to {}", cli.info.display());

    Ok(())
}

fn perform_quantization(
    encoder: &Encoder<'_>,
    source: &Source,
) -> Vec<frameplay_lib::Result<QuantizedFrame>> {
    let images = source.as_slice();

    images
        .par_iter()
        .enumerate()
        .progress_count(images.len() as u64)
        .map(|(t, image)| encoder.quantize(t, image))
        .collect()
}

fn print_stats(stats: &Stats) {
    info!(?stats, "encoding finished");

    eprintln!(
        "{} frames, {} events, {} bytes",
        stats.frames, stats.events, stats.bytes
    );

    for (index, events) in &stats.colors {
        eprintln!("  color {:>3}: {} events", index, events);
    }
}
