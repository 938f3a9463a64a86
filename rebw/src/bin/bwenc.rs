use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bwenc")]
#[command(author = "NellowTCS")]
#[command(version)]
#[command(about = "Encode a 16-bit PCM WAV file to bw", long_about = None)]
struct Cli {
    /// Input WAV file (16-bit PCM, mono)
    input: PathBuf,
    /// Output bw file
    output: PathBuf,
}

fn main() -> Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    println!("Reading {}...", cli.input.display());

    let pcm = rebw::audio::read_wav_file(&cli.input)?;

    println!("  Sample rate: {} Hz", pcm.sample_rate);
    println!("  Channels: {}", pcm.channels);
    println!("  Duration: {:.2}s", pcm.duration_secs());

    println!("Encoding to bw...");

    let bw_data = rebw::encode_pcm(&pcm)?;

    fs::write(&cli.output, &bw_data)
        .with_context(|| format!("Can't open {} for writing", cli.output.display()))?;

    let original_size = pcm.sample_count * 2;
    let compressed_size = bw_data.len();
    let ratio = original_size as f32 / compressed_size as f32;

    println!("Done!");
    println!("  Output: {}", cli.output.display());
    println!(
        "  Size: {} bytes ({:.1}x compression)",
        compressed_size, ratio
    );

    Ok(())
}
