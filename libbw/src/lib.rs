#![allow(clippy::needless_range_loop)]

pub mod codec;
pub mod core;

mod reader;
mod writer;

use wasm_bindgen::prelude::*;

pub use crate::core::{
    BwResult, CompressedFile, Error, StreamHeader, StreamInfo, HEADER_SIZE, VERSION_MAJOR,
    VERSION_MINOR,
};
pub use codec::{CodecState, DecodedStream, Decoder, Encoder, SymbolCoder};
pub use reader::Reader;
pub use writer::Writer;

// result helpers

/// turn an error into js
fn to_js_err(e: Error) -> JsValue {
    JsValue::from_str(&e.to_string())
}

// api functions

/// encode mono PCM16 samples to bw
///
/// # Arguments
/// * `samples` - Mono audio samples (i16)
/// * `sample_rate` - Sample rate in Hz, stored verbatim
///
/// # Returns
/// bw file as byte array
#[wasm_bindgen]
pub fn encode(samples: &[i16], sample_rate: u32) -> Result<Vec<u8>, JsValue> {
    let encoder = Encoder::new(sample_rate);
    encoder.encode(samples).map_err(to_js_err)
}

/// encode float samples (-1.0 to 1.0) to bw
#[wasm_bindgen]
pub fn encode_f32(samples: &[f32], sample_rate: u32) -> Result<Vec<u8>, JsValue> {
    let pcm: Vec<i16> = samples.iter().map(|&s| core::f32_to_i16(s)).collect();
    encode(&pcm, sample_rate)
}

/// decode bw to PCM16 samples
///
/// # Arguments
/// * `data` - bw file bytes
///
/// # Returns
/// Mono audio samples (i16). A truncated payload still decodes.
#[wasm_bindgen]
pub fn decode(data: &[u8]) -> Result<Vec<i16>, JsValue> {
    let decoder = Decoder::new();
    let stream = decoder.decode(data).map_err(to_js_err)?;
    Ok(stream.samples)
}

/// decode bw to float samples (-1.0 to 1.0)
#[wasm_bindgen]
pub fn decode_f32(data: &[u8]) -> Result<Vec<f32>, JsValue> {
    let samples = decode(data)?;
    Ok(samples.into_iter().map(core::i16_to_f32).collect())
}

/// Get information about a bw file
#[wasm_bindgen]
pub fn info(data: &[u8]) -> Result<StreamInfo, JsValue> {
    let reader = Reader::new();
    let file = reader.read(data).map_err(to_js_err)?;
    Ok(StreamInfo::from_file(&file, data.len()))
}

/// Same as [`info`], as a plain js object
#[wasm_bindgen]
pub fn info_object(data: &[u8]) -> Result<JsValue, JsValue> {
    let stream_info = info(data)?;
    serde_wasm_bindgen::to_value(&stream_info)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize info: {}", e)))
}

/// get lib version
#[wasm_bindgen]
pub fn version() -> String {
    format!("{}.{}", VERSION_MAJOR, VERSION_MINOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(version(), "1.0");
    }

    #[test]
    fn test_encode_decode() {
        let samples: Vec<i16> = (0..4410)
            .map(|i| ((i as f32 * 0.05).sin() * 8000.0) as i16)
            .collect();
        let data = encode(&samples, 44100).unwrap();
        let decoded = decode(&data).unwrap();
        assert_eq!(decoded.len(), samples.len());
        for (&a, &b) in samples.iter().zip(&decoded) {
            // reconstruction stays inside the quantization bucket
            assert!((a as i32 - b as i32).abs() <= 64, "{} vs {}", a, b);
        }
    }

    #[test]
    fn test_encode_f32_matches_pcm() {
        let floats: Vec<f32> = (0..1000).map(|i| (i as f32 * 0.01).sin() * 0.5).collect();
        let pcm: Vec<i16> = floats.iter().map(|&s| crate::core::f32_to_i16(s)).collect();
        assert_eq!(encode_f32(&floats, 48000).unwrap(), encode(&pcm, 48000).unwrap());

        let decoded = decode_f32(&encode_f32(&floats, 48000).unwrap()).unwrap();
        assert_eq!(decoded.len(), floats.len());
        assert!(decoded.iter().all(|s| (-1.0..=1.0).contains(s)));
    }

    #[test]
    fn test_info() {
        let samples = vec![0i16; 8000];
        let data = encode(&samples, 8000).unwrap();
        let stream_info = info(&data).unwrap();
        assert_eq!(stream_info.sample_count, 8000);
        assert_eq!(stream_info.sample_rate, 8000);
        assert_eq!(stream_info.payload_len as usize, data.len() - HEADER_SIZE);
        assert_eq!(stream_info.file_size, data.len());
        assert!((stream_info.duration_secs - 1.0).abs() < 1e-9);
        assert!(stream_info.compression_ratio > 10.0);
        assert!(!stream_info.truncated);
    }
}
