//! rebw - WAV converter for the bw format
//!
//! Reads 16-bit PCM WAV through symphonia, codes it with libbw, and writes mono
//! PCM16 WAV back out.

pub mod audio;

use anyhow::{Context, Result};
use log::warn;

pub use audio::PcmStream;
pub use libbw_audio::StreamInfo;

/// Get information about a bw file
pub fn get_bw_info(data: &[u8]) -> Result<StreamInfo> {
    let reader = libbw_audio::Reader::new();
    let file = reader.read(data).context("Failed to read bw file")?;
    Ok(StreamInfo::from_file(&file, data.len()))
}

/// Encode already-decoded PCM to bw
///
/// Only the first `sample_count` values of the interleaved samples are coded, so
/// multi-channel input keeps the leading part of the interleaved stream.
pub fn encode_pcm(pcm: &PcmStream) -> Result<Vec<u8>> {
    if pcm.channels > 1 {
        warn!(
            "bw is mono-only: coding the first {} of {} interleaved samples ({} channels)",
            pcm.sample_count,
            pcm.samples.len(),
            pcm.channels
        );
    }

    let encoder = libbw_audio::Encoder::new(pcm.sample_rate);
    let samples = &pcm.samples[..pcm.sample_count];
    encoder.encode(samples).context("Failed to encode samples")
}

/// Encode WAV bytes to bw
pub fn encode_wav(wav_bytes: &[u8]) -> Result<Vec<u8>> {
    let pcm = audio::read_wav(wav_bytes)?;
    encode_pcm(&pcm)
}

/// Decode bw to PCM16 samples, returns (samples, sample_rate)
pub fn decode_to_samples(data: &[u8]) -> Result<(Vec<i16>, u32)> {
    let decoder = libbw_audio::Decoder::new();
    let stream = decoder.decode(data).context("Failed to decode bw file")?;
    Ok((stream.samples, stream.sample_rate))
}

/// Decode bw to mono WAV bytes
pub fn decode_to_wav(data: &[u8]) -> Result<Vec<u8>> {
    let (samples, sample_rate) = decode_to_samples(data)?;
    audio::write_wav_to_bytes(&samples, 1, sample_rate)
}
