use clap::{Parser, Subcommand};
use itf_barcode::tools::{complete_code, grayscale_stats, load_gray, render_code};
use itf_barcode::utils::raster::crop_region;
use itf_barcode::{ItfError, Recognizer, RecognizerConfig, recognize_batch, verify_code};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "itftool", version, about = "Interleaved 2 of 5 barcode tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a digit code into a barcode image
    Encode {
        /// Digits to encode
        #[arg(short = 'i', long)]
        code: String,
        /// Output image path
        #[arg(short, long, default_value = "out.png")]
        output: PathBuf,
        /// Append the mod-10 check digit
        #[arg(short, long)]
        checksum: bool,
        /// Width of a thin bar, in pixels (1 aliases when scanned back)
        #[arg(short, long, default_value_t = 2)]
        width: u32,
        /// Height of the bar area, in pixels
        #[arg(long, default_value_t = 50)]
        height: u32,
    },
    /// Recognize the barcode in an image
    Recognize {
        /// Input image path
        #[arg(short, long)]
        input: PathBuf,
        /// Barcode position in the input image, as x:y:w:h (0 extends to the edge)
        #[arg(short, long, value_parser = parse_region, default_value = "0:0:0:0")]
        position: Region,
        /// Verify the mod-10 check digit
        #[arg(short, long)]
        checksum: bool,
        /// Minimal number of iterations
        #[arg(long)]
        min_iterations: Option<u32>,
        /// Maximal number of iterations
        #[arg(long)]
        max_iterations: Option<u32>,
        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Recognize many barcode images in parallel
    Batch {
        /// Input images, each holding one barcode filling the frame
        images: Vec<PathBuf>,
        /// Seed of the first image; image i uses seed + i
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

#[derive(Debug, Clone, Copy)]
struct Region {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

fn parse_region(s: &str) -> Result<Region, String> {
    let parts: Vec<u32> = s
        .split(':')
        .map(|p| p.trim().parse::<u32>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("invalid region {s:?}: {e}"))?;
    match parts.as_slice() {
        &[x, y, width, height] => Ok(Region {
            x,
            y,
            width,
            height,
        }),
        _ => Err(format!("invalid region {s:?}: expected x:y:w:h")),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Encode {
            code,
            output,
            checksum,
            width,
            height,
        } => encode_cmd(&code, &output, checksum, width, height),
        Command::Recognize {
            input,
            position,
            checksum,
            min_iterations,
            max_iterations,
            seed,
        } => {
            let defaults = RecognizerConfig::from_env();
            let config = RecognizerConfig::new(
                min_iterations.unwrap_or(defaults.min_iterations),
                max_iterations.unwrap_or(defaults.max_iterations),
            );
            recognize_cmd(&input, position, checksum, config, seed)
        }
        Command::Batch { images, seed } => batch_cmd(&images, seed),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn encode_cmd(digits: &str, output: &Path, checksum: bool, width: u32, height: u32) -> Result<(), ItfError> {
    let code = complete_code(digits, checksum)?;
    let image = render_code(&code, width, height);
    image.save(output)?;
    info!(code = %code, output = %output.display(), "barcode written");
    Ok(())
}

fn recognize_cmd(
    input: &Path,
    position: Region,
    checksum: bool,
    config: RecognizerConfig,
    seed: Option<u64>,
) -> Result<(), ItfError> {
    let image = load_gray(input)?;
    let region = crop_region(&image, position.x, position.y, position.width, position.height)?;
    let stats = grayscale_stats(region.as_raw());
    debug!(
        width = region.width(),
        height = region.height(),
        min = stats.min,
        max = stats.max,
        avg = stats.avg,
        "barcode region"
    );

    let recognizer = Recognizer::new(&region)?;
    let start = Instant::now();
    let code = match seed {
        Some(seed) => {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            recognizer.recognize_with_rng(config.min_iterations, config.max_iterations, &mut rng)
        }
        None => recognizer.recognize(config.min_iterations, config.max_iterations),
    };
    info!(elapsed_ms = start.elapsed().as_millis() as u64, "recognition done");

    let code = verify_code(code, checksum)?;
    println!("{code}");
    Ok(())
}

fn batch_cmd(paths: &[PathBuf], seed: u64) -> Result<(), ItfError> {
    let images = paths.iter().map(load_gray).collect::<Result<Vec<_>, _>>()?;
    let start = Instant::now();
    let results = recognize_batch(&images, &RecognizerConfig::from_env(), seed);
    info!(
        images = images.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "batch done"
    );

    for (path, result) in paths.iter().zip(results) {
        match result {
            Ok(code) if !code.is_empty() => println!("{}\t{}", path.display(), code),
            Ok(_) => println!("{}\t-", path.display()),
            Err(err) => println!("{}\terror: {}", path.display(), err),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use itf_barcode::Code;

    #[test]
    fn test_encode_default_width_scans_back() {
        let cli = Cli::try_parse_from(["itftool", "encode", "-i", "8031"]).unwrap();
        let Command::Encode { code, width, .. } = cli.command else {
            panic!("expected encode");
        };
        assert_eq!(width, 2);

        let code = complete_code(&code, false).unwrap();
        let image = render_code(&code, width, 50);
        let recognizer = Recognizer::new(&image).unwrap();
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            assert_eq!(recognizer.recognize_with_rng(1, 1, &mut rng), code);
        }
        assert_eq!(code, "8031".parse::<Code>().unwrap());
    }

    #[test]
    fn test_parse_region() {
        let region = parse_region("1:2:30:0").unwrap();
        assert_eq!((region.x, region.y, region.width, region.height), (1, 2, 30, 0));
        assert!(parse_region("1:2:3").is_err());
        assert!(parse_region("1:0:4294967296:0").is_err());
    }
}
