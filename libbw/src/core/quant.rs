//! Scalar quantizer between PCM16 amplitudes and the coarse coded domain.
//!
//! Buckets are 64 wide. Reconstruction lands close to the bucket midpoint using a
//! slightly stretched slope so the extreme buckets still map onto the full i16 range.

/// width of one quantization bucket
pub const BUCKET_WIDTH: i32 = 64;

const RECON_SLOPE: f64 = 64.061577;
const RECON_OFFSET: f64 = 31.034184;

/// `floor(v / 64)`
#[inline]
pub fn quantize(sample: i16) -> i32 {
    (sample as i32).div_euclid(BUCKET_WIDTH)
}

/// Map a quantized value back to a PCM16 amplitude.
///
/// Negative buckets mirror the positive ones around -1, so `dequantize(-1 - q)` is
/// `-1 - dequantize(q)`. Buckets past either end of the PCM16 range (a corrupt stream
/// can reach them) wrap around in two's complement.
#[inline]
pub fn dequantize(q: i32) -> i16 {
    let value = if q >= 0 {
        (q as f64 * RECON_SLOPE + RECON_OFFSET).round() as i64
    } else {
        let mirrored = (-(q as i64) - 1) as f64;
        -((mirrored * RECON_SLOPE + RECON_OFFSET).round() as i64) - 1
    };
    value as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_floors_toward_negative_infinity() {
        assert_eq!(quantize(0), 0);
        assert_eq!(quantize(63), 0);
        assert_eq!(quantize(64), 1);
        assert_eq!(quantize(-1), -1);
        assert_eq!(quantize(-64), -1);
        assert_eq!(quantize(-65), -2);
        assert_eq!(quantize(i16::MAX), 511);
        assert_eq!(quantize(i16::MIN), -512);
    }

    #[test]
    fn test_dequantize_reference_values() {
        assert_eq!(dequantize(0), 31);
        assert_eq!(dequantize(15), 992);
        assert_eq!(dequantize(-1), -32);
        assert_eq!(dequantize(511), i16::MAX);
        assert_eq!(dequantize(-512), i16::MIN);
    }

    #[test]
    fn test_dequantize_wraps_out_of_range_buckets() {
        assert_eq!(dequantize(512), -32705);
        assert_eq!(dequantize(600), -27068);
        assert_eq!(dequantize(-513), 32704);
        assert_eq!(dequantize(-600), 27131);
    }

    #[test]
    fn test_dequantize_is_symmetric_around_minus_one() {
        for q in 0..512 {
            assert_eq!(dequantize(-1 - q) as i32, -1 - dequantize(q) as i32);
        }
    }

    #[test]
    fn test_reconstruction_stays_near_bucket() {
        for sample in (i16::MIN..=i16::MAX).step_by(7) {
            let recon = dequantize(quantize(sample)) as i32;
            assert!((recon - sample as i32).abs() <= 64, "{} -> {}", sample, recon);
        }
    }
}
