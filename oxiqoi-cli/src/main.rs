//! OxiQOI CLI - QOI image converter
//!
//! A Pure Rust converter between QOI and the common raster formats
//! supported by the `image` crate.

use clap::{Parser, Subcommand};
use oxiqoi::{Channels, Colorspace, Header, PixelFormat, RawPixels};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "oxiqoi")]
#[command(author, version, about = "Pure Rust QOI image converter")]
#[command(long_about = "
OxiQOI is a Pure Rust implementation of the QOI (Quite OK Image) format.

Examples:
  oxiqoi encode photo.png
  oxiqoi encode photo.png -o out/photo.qoi
  oxiqoi decode photo.qoi
  oxiqoi info photo.qoi
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode an image file to QOI
    #[command(alias = "e")]
    Encode {
        /// Input image (PNG, JPEG, BMP, ...)
        input: PathBuf,

        /// Output path (defaults to <stem>.qoi in the working directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Decode a QOI file to PNG
    #[command(alias = "d")]
    Decode {
        /// Input QOI file
        input: PathBuf,

        /// Output path (defaults to <stem>.png in the working directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show information about a QOI file
    #[command(alias = "i")]
    Info {
        /// QOI file to inspect
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Encode {
            input,
            output,
            verbose,
        } => cmd_encode(&input, output, verbose),
        Commands::Decode {
            input,
            output,
            verbose,
        } => cmd_decode(&input, output, verbose),
        Commands::Info { file } => cmd_info(&file),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Output path in the working directory, `<stem>.<ext>`.
fn default_output(input: &Path, ext: &str) -> PathBuf {
    PathBuf::from(input.file_stem().unwrap_or_default()).with_extension(ext)
}

fn cmd_encode(
    input: &Path,
    output: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let img = image::open(input)?;
    let has_alpha = img.color().has_alpha();
    let rgba = img.into_rgba8();
    let (width, height) = rgba.dimensions();

    let channels = if has_alpha {
        Channels::Rgba
    } else {
        Channels::Rgb
    };
    let header = Header::new(width, height, channels, Colorspace::Srgb);
    let out_path = output.unwrap_or_else(|| default_output(input, "qoi"));

    oxiqoi::encode_file(
        &header,
        RawPixels::new(rgba.as_raw(), PixelFormat::Rgba),
        &out_path,
    )?;

    if verbose {
        let raw_size = u64::from(width) * u64::from(height) * u64::from(channels as u8);
        let qoi_size = std::fs::metadata(&out_path)?.len();
        println!("  {}x{} pixels, {} channels", width, height, channels as u8);
        println!("  {} -> {} bytes", raw_size, qoi_size);
    }
    println!("Encoded {} -> {}", input.display(), out_path.display());
    Ok(())
}

fn cmd_decode(
    input: &Path,
    output: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::open(input)?;
    let (header, pixels) = oxiqoi::decode_to_vec(BufReader::new(file))?;

    let mut raw = Vec::with_capacity(pixels.len() * 4);
    for px in &pixels {
        raw.extend_from_slice(&[px.r, px.g, px.b, px.a]);
    }

    let image = image::RgbaImage::from_raw(header.width, header.height, raw)
        .ok_or("decoded pixel count does not match the header dimensions")?;

    let out_path = output.unwrap_or_else(|| default_output(input, "png"));
    image.save(&out_path)?;

    if verbose {
        println!(
            "  {}x{} pixels, {} channels",
            header.width,
            header.height,
            header.channels as u8
        );
    }
    println!("Decoded {} -> {}", input.display(), out_path.display());
    Ok(())
}

fn cmd_info(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let metadata = std::fs::metadata(file)?;
    let mut decoder = oxiqoi::decode(BufReader::new(File::open(file)?))?;
    let header = *decoder.header();

    println!("QOI Image Information");
    println!("=====================");
    println!("File: {}", file.display());
    println!("Size: {} bytes", metadata.len());
    println!("Dimensions: {}x{}", header.width, header.height);
    println!(
        "Channels: {} ({})",
        header.channels as u8,
        match header.channels {
            Channels::Rgb => "RGB",
            Channels::Rgba => "RGBA",
        }
    );
    println!(
        "Colorspace: {}",
        match header.colorspace {
            Colorspace::Srgb => "sRGB with linear alpha",
            Colorspace::Linear => "all channels linear",
        }
    );

    // Walk the stream to report the real pixel count.
    while decoder.next_pixel()?.is_some() {}
    println!(
        "Pixels: {} (header implies {})",
        decoder.pixels_produced(),
        header.pixel_count()
    );

    let raw_size = decoder.pixels_produced() * u64::from(header.channels as u8);
    if raw_size > 0 {
        println!(
            "Compression ratio: {:.1}%",
            (1.0 - metadata.len() as f64 / raw_size as f64) * 100.0
        );
    }

    Ok(())
}
