use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bwdec")]
#[command(author = "NellowTCS")]
#[command(version)]
#[command(about = "Decode a bw file to a mono 16-bit PCM WAV", long_about = None)]
struct Cli {
    /// Input bw file
    input: PathBuf,
    /// Output WAV file
    output: PathBuf,
}

fn main() -> Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    println!("Reading {}...", cli.input.display());

    let bw_data =
        fs::read(&cli.input).with_context(|| format!("Can't open {}", cli.input.display()))?;

    let file_info = rebw::get_bw_info(&bw_data)?;

    println!("  Sample rate: {} Hz", file_info.sample_rate);
    println!("  Samples: {}", file_info.sample_count);
    println!("  Duration: {:.2}s", file_info.duration_secs);
    if file_info.truncated {
        println!("  Payload truncated, decoding what is there");
    }

    println!("Decoding...");

    let (samples, sample_rate) = rebw::decode_to_samples(&bw_data)?;

    println!("Writing WAV...");

    let written = rebw::audio::write_wav(&cli.output, &samples, 1, sample_rate)?;

    println!("Done!");
    println!("  Output: {}", cli.output.display());
    println!("  Size: {} bytes", written);

    Ok(())
}
