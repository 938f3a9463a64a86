//! End-to-end WAV <-> bw conversion tests
use rebw::audio::{read_wav, write_wav_to_bytes};
use rebw::{decode_to_samples, decode_to_wav, encode_wav, get_bw_info};

fn sine_wav(len: usize, sample_rate: u32, channels: u16) -> (Vec<i16>, Vec<u8>) {
    let mut samples = Vec::with_capacity(len * channels as usize);
    for i in 0..len {
        let t = i as f32 / sample_rate as f32;
        let sample = ((t * 440.0 * 2.0 * std::f32::consts::PI).sin() * 16000.0) as i16;
        for ch in 0..channels {
            samples.push(sample / (ch as i16 + 1));
        }
    }
    let wav = write_wav_to_bytes(&samples, channels, sample_rate).unwrap();
    (samples, wav)
}

// ============================================================================
// Round trips
// ============================================================================

#[test]
fn test_wav_reads_back() {
    let (samples, wav) = sine_wav(1000, 22050, 1);
    let pcm = read_wav(&wav).unwrap();
    assert_eq!(pcm.channels, 1);
    assert_eq!(pcm.sample_rate, 22050);
    assert_eq!(pcm.sample_count, 1000);
    assert_eq!(pcm.samples, samples);
}

#[test]
fn test_mono_round_trip() {
    let (samples, wav) = sine_wav(44100, 44100, 1);
    let bw = encode_wav(&wav).unwrap();
    assert!(bw.len() < wav.len() / 2, "{} vs {} bytes", bw.len(), wav.len());

    let out = read_wav(&decode_to_wav(&bw).unwrap()).unwrap();
    assert_eq!(out.channels, 1);
    assert_eq!(out.sample_rate, 44100);
    assert_eq!(out.samples.len(), samples.len());
    for (&a, &b) in samples.iter().zip(&out.samples) {
        assert!((a as i32 - b as i32).abs() <= 64);
    }
}

#[test]
fn test_stereo_codes_leading_interleaved_samples() {
    let (samples, wav) = sine_wav(500, 8000, 2);
    let bw = encode_wav(&wav).unwrap();
    let info = get_bw_info(&bw).unwrap();
    assert_eq!(info.sample_count, 500);

    let (decoded, rate) = decode_to_samples(&bw).unwrap();
    assert_eq!(rate, 8000);
    let direct = libbw_audio::Decoder::new()
        .decode(&libbw_audio::Encoder::new(8000).encode(&samples[..500]).unwrap())
        .unwrap();
    assert_eq!(decoded, direct.samples);
}

#[test]
fn test_reference_file_from_wav() {
    let signal: [i16; 48] = [
        0, 2659, 5081, 7049, 8388, 8977, 8764, 7768, 6079, 3846, 1270, -1419, -3982, -6189,
        -7844, -8797, -8965, -8332, -6954, -4956, 32767, -32768, 2803, 5205, 7143, 8441, 8986,
        8729, 7691, 5966, 3709, 1120, -1568, -4117, -6298, -7917, -8828, -8950, -8273, -6857,
        -4829, -2369, 302, 2947, 5328, 7234, 8493, 8993,
    ];
    let wav = write_wav_to_bytes(&signal, 1, 44100).unwrap();
    let bw = encode_wav(&wav).unwrap();
    assert_eq!(bw.len(), 78);
    assert_eq!(&bw[..12], &[48, 0, 0, 0, 68, 172, 0, 0, 66, 0, 0, 0]);
    assert_eq!(&bw[bw.len() - 4..], &[48, 100, 0, 0]);
}

// ============================================================================
// Rejected input
// ============================================================================

#[test]
fn test_not_riff() {
    let err = encode_wav(b"this is not a wav file at all").unwrap_err();
    assert_eq!(err.to_string(), "not a RIFF/WAVE container");
}

#[test]
fn test_empty_data_chunk() {
    let wav = write_wav_to_bytes(&[], 1, 44100).unwrap();
    let err = encode_wav(&wav).unwrap_err();
    assert_eq!(err.to_string(), "no data found");
}

#[test]
fn test_eight_bit_wav_rejected() {
    let mut wav = Vec::new();
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&40u32.to_le_bytes());
    wav.extend_from_slice(b"WAVEfmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes());
    wav.extend_from_slice(&8000u32.to_le_bytes());
    wav.extend_from_slice(&8000u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes());
    wav.extend_from_slice(&8u16.to_le_bytes());
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&4u32.to_le_bytes());
    wav.extend_from_slice(&[128, 130, 126, 128]);
    assert!(encode_wav(&wav).is_err());
}

#[test]
fn test_short_bw_file_rejected() {
    assert!(decode_to_wav(&[1, 2, 3]).is_err());
    assert!(get_bw_info(&[0; 11]).is_err());
}
