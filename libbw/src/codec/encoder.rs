use log::debug;

use crate::core::range_coder::RangeEncoder;
use crate::{BwResult, Writer};

use super::state::CodecState;

pub struct Encoder {
    sample_rate: u32,
}

impl Encoder {
    pub fn new(sample_rate: u32) -> Self {
        Encoder { sample_rate }
    }

    /// encode samples to a complete bw file
    pub fn encode(&self, samples: &[i16]) -> BwResult<Vec<u8>> {
        let payload = self.encode_payload(samples);

        let writer = Writer::new();
        writer.write(self.sample_rate, samples.len(), &payload)
    }

    /// encode samples to the bare range-coded payload
    pub fn encode_payload(&self, samples: &[i16]) -> Vec<u8> {
        let mut state = CodecState::new();
        let mut coder = RangeEncoder::new();

        for &sample in samples {
            state.encode_sample(&mut coder, sample);
        }

        let payload = coder.finish();
        debug!(
            "encoded {} samples at {} Hz into {} bytes",
            samples.len(),
            self.sample_rate,
            payload.len()
        );
        payload
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Encoder::new(44100)
    }
}
