use anyhow::{bail, ensure, Context, Result};
use std::io::{Cursor, Write};
use std::path::Path;
use symphonia::core::audio::{AudioBufferRef, Signal};
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL, CODEC_TYPE_PCM_S16LE};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Interleaved PCM16 read from a WAV container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcmStream {
    pub channels: usize,
    pub sample_rate: u32,
    /// frames, i.e. `samples.len() / channels`
    pub sample_count: usize,
    pub samples: Vec<i16>,
}

impl PcmStream {
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.sample_count as f64 / self.sample_rate as f64
    }
}

/// Read a 16-bit PCM WAV file
pub fn read_wav_file(path: &Path) -> Result<PcmStream> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Can't open {}", path.display()))?;
    read_wav(&bytes)
}

/// Read a 16-bit PCM WAV from bytes
pub fn read_wav(bytes: &[u8]) -> Result<PcmStream> {
    ensure!(
        bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WAVE",
        "not a RIFF/WAVE container"
    );
    match data_chunk_len(bytes) {
        Some(len) if len > 0 => {}
        _ => bail!("no data found"),
    }

    let cursor = Cursor::new(bytes.to_vec());
    let mss = MediaSourceStream::new(Box::new(cursor), Default::default());

    let mut hint = Hint::new();
    hint.with_extension("wav");

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .context("Unsupported WAV layout")?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .context("No audio track found")?;

    if track.codec_params.codec != CODEC_TYPE_PCM_S16LE {
        bail!("only 16-bit integer PCM is supported");
    }

    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .context("Unknown sample rate")?;
    let channels = track
        .codec_params
        .channels
        .context("Unknown channel count")?
        .count();

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .context("Failed to create decoder")?;

    let mut samples = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break
            }
            Err(e) => return Err(e).context("Error reading packet"),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = decoder.decode(&packet).context("Error decoding packet")?;
        append_samples(&decoded, &mut samples, channels)?;
    }

    if samples.is_empty() {
        bail!("no data found");
    }

    Ok(PcmStream {
        channels,
        sample_rate,
        sample_count: samples.len() / channels,
        samples,
    })
}

/// Length of the first `data` chunk, walking the RIFF chunk list
fn data_chunk_len(bytes: &[u8]) -> Option<u32> {
    let mut pos = 12;
    while pos + 8 <= bytes.len() {
        let id = &bytes[pos..pos + 4];
        let size = u32::from_le_bytes([
            bytes[pos + 4],
            bytes[pos + 5],
            bytes[pos + 6],
            bytes[pos + 7],
        ]);
        if id == b"data" {
            return Some(size);
        }
        // chunks are word aligned
        pos = pos.saturating_add(8 + size as usize + (size as usize & 1));
    }
    None
}

fn append_samples(buffer: &AudioBufferRef, samples: &mut Vec<i16>, channels: usize) -> Result<()> {
    match buffer {
        AudioBufferRef::S16(buf) => {
            for frame in 0..buf.frames() {
                for ch in 0..channels {
                    samples.push(buf.chan(ch)[frame]);
                }
            }
            Ok(())
        }
        _ => bail!("only 16-bit integer PCM is supported"),
    }
}

/// Write mono or interleaved PCM16 samples to a WAV file, returning the bytes written
pub fn write_wav(path: &Path, samples: &[i16], channels: u16, sample_rate: u32) -> Result<usize> {
    let bytes = write_wav_to_bytes(samples, channels, sample_rate)?;
    std::fs::write(path, &bytes)
        .with_context(|| format!("Can't open {} for writing", path.display()))?;
    Ok(bytes.len())
}

/// Write PCM16 samples to a canonical 44-byte-header WAV in memory
pub fn write_wav_to_bytes(samples: &[i16], channels: u16, sample_rate: u32) -> Result<Vec<u8>> {
    let bytes_per_sample = 2u32;
    let data_size = u32::try_from(samples.len() as u64 * bytes_per_sample as u64)
        .context("Too many samples for a WAV file")?;
    let file_size = data_size
        .checked_add(36)
        .context("Too many samples for a WAV file")?;

    let mut buffer = Vec::with_capacity(44 + data_size as usize);

    // RIFF header
    buffer.write_all(b"RIFF")?;
    buffer.write_all(&file_size.to_le_bytes())?;
    buffer.write_all(b"WAVE")?;

    // fmt chunk
    buffer.write_all(b"fmt ")?;
    buffer.write_all(&16u32.to_le_bytes())?; // chunk size
    buffer.write_all(&1u16.to_le_bytes())?; // format = PCM
    buffer.write_all(&channels.to_le_bytes())?;
    buffer.write_all(&sample_rate.to_le_bytes())?;
    let byte_rate = sample_rate
        .wrapping_mul(channels as u32)
        .wrapping_mul(bytes_per_sample);
    buffer.write_all(&byte_rate.to_le_bytes())?;
    let block_align = channels.wrapping_mul(bytes_per_sample as u16);
    buffer.write_all(&block_align.to_le_bytes())?;
    buffer.write_all(&16u16.to_le_bytes())?; // bits per sample

    // data chunk
    buffer.write_all(b"data")?;
    buffer.write_all(&data_size.to_le_bytes())?;

    for &sample in samples {
        buffer.write_all(&sample.to_le_bytes())?;
    }

    Ok(buffer)
}
