use log::{debug, warn};

use crate::core::error::{limit_error, Error};
use crate::core::range_coder::RangeDecoder;
use crate::core::types::CompressedFile;
use crate::{BwResult, Reader};

use super::state::CodecState;

/// Upper bound on samples per declared payload byte.
///
/// The cheapest symbol never drops below about 0.29 bits, so real streams stay under
/// 28 samples per byte.
const MAX_SAMPLES_PER_BYTE: u64 = 64;

/// Sample count always accepted regardless of payload size
const SAMPLE_ALLOWANCE: u64 = 1 << 20;

/// decoded mono stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedStream {
    pub sample_rate: u32,
    pub samples: Vec<i16>,
}

impl DecodedStream {
    /// always 1, the format carries no channel count
    pub fn channels(&self) -> u16 {
        1
    }

    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// audio decoder for bw format
pub struct Decoder;

impl Decoder {
    pub fn new() -> Self {
        Decoder
    }

    /// decode bw file to samples
    pub fn decode(&self, data: &[u8]) -> BwResult<DecodedStream> {
        let reader = Reader::new();
        let file = reader.read(data)?;
        self.decode_file(&file)
    }

    /// decode from parsed file
    ///
    /// A sample count far beyond what the declared payload could hold is refused
    /// before anything is allocated.
    pub fn decode_file(&self, file: &CompressedFile) -> BwResult<DecodedStream> {
        let header = &file.header;
        let payload_len = (header.payload_len as u64).max(file.payload.len() as u64);
        let max_samples = payload_len * MAX_SAMPLES_PER_BYTE + SAMPLE_ALLOWANCE;
        if header.sample_count as u64 > max_samples {
            warn!(
                "{} samples declared for a {} byte payload, at most {} possible",
                header.sample_count, payload_len, max_samples
            );
            return limit_error("sample count too large for payload");
        }

        if file.is_truncated() {
            warn!(
                "payload truncated: {} of {} bytes present, decoding anyway",
                file.payload.len(),
                header.payload_len
            );
        }

        Ok(DecodedStream {
            sample_rate: header.sample_rate,
            samples: self.decode_payload(&file.payload, header.sample_count as usize)?,
        })
    }

    /// decode `sample_count` samples from a bare payload
    ///
    /// Missing payload bytes read as zero. The only failure is running out of memory
    /// for the output.
    pub fn decode_payload(&self, payload: &[u8], sample_count: usize) -> BwResult<Vec<i16>> {
        let mut state = CodecState::new();
        let mut coder = RangeDecoder::new(payload);
        let mut samples = Vec::new();
        samples
            .try_reserve_exact(sample_count)
            .map_err(|_| Error::LimitError("cannot allocate the decoded samples"))?;

        for _ in 0..sample_count {
            samples.push(state.decode_sample(&mut coder));
        }

        debug!(
            "decoded {} samples from {} bytes ({} bytes read past the end)",
            sample_count,
            payload.len(),
            coder.overrun()
        );
        Ok(samples)
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}
