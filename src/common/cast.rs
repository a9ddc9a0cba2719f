use std::ops::Range;

use num_traits::ToPrimitive;

use super::{QRError, QRResult};

pub fn f64_to_u32(num: f64) -> QRResult<u32> {
    num.to_u32().ok_or(QRError::CastingFailed)
}

/// Pixels whose centers fall inside `[start, end)`, clamped to `0..limit`.
pub fn pixel_span(start: f64, end: f64, limit: u32) -> Range<u32> {
    let clamp = |edge: f64| (edge - 0.5).ceil().clamp(0.0, limit as f64).to_u32().unwrap_or(0);
    clamp(start)..clamp(end)
}

#[cfg(test)]
mod cast_tests {
    use test_case::test_case;

    use super::{f64_to_u32, pixel_span};
    use crate::common::QRError;

    #[test_case(0.0, 10.0, 100, 0..10)]
    #[test_case(19.95, 50.05, 100, 20..50)]
    #[test_case(0.0, 9.8, 100, 0..10)]
    #[test_case(60.2, 70.0, 100, 60..70)]
    #[test_case(-5.0, 3.2, 100, 0..3)]
    #[test_case(95.0, 120.0, 100, 95..100)]
    #[test_case(4.4, 4.6, 100, 4..5)]
    #[test_case(4.6, 5.4, 100, 5..5)]
    fn test_pixel_span(start: f64, end: f64, limit: u32, exp: std::ops::Range<u32>) {
        assert_eq!(pixel_span(start, end, limit), exp);
    }

    #[test]
    fn test_f64_to_u32() {
        assert_eq!(f64_to_u32(42.7), Ok(42));
        assert_eq!(f64_to_u32(-1.0), Err(QRError::CastingFailed));
        assert_eq!(f64_to_u32(f64::NAN), Err(QRError::CastingFailed));
    }
}
