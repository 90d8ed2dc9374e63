//! Statistical sanity tests for generated output.
//!
//! These are quick checks on bulk output, not a test battery. Passing
//! them is necessary but not sufficient for good randomness.

/// Monobit frequency test result.
#[derive(Debug, Clone, Copy)]
pub struct MonobitResult {
    /// Fraction of bits that are one.
    pub proportion_ones: f64,
    /// Two-sided p-value under the normal approximation.
    pub p_value: f64,
}

/// Chi-square byte uniformity test result.
#[derive(Debug, Clone, Copy)]
pub struct ChiSquareResult {
    /// Chi-square statistic over 256 byte-value bins.
    pub statistic: f64,
    /// Upper-tail p-value with 255 degrees of freedom.
    pub p_value: f64,
}

/// Degrees of freedom for the byte histogram.
const BYTE_DF: f64 = 255.0;

/// Runs the monobit frequency test.
pub fn monobit_frequency(data: &[u8]) -> MonobitResult {
    let n = data.len() * 8;
    if n == 0 {
        return MonobitResult {
            proportion_ones: 0.0,
            p_value: 1.0,
        };
    }

    let ones: u64 = data.iter().map(|b| b.count_ones() as u64).sum();
    let zeros = n as u64 - ones;
    let s_obs = (ones as f64 - zeros as f64).abs() / (n as f64).sqrt();

    MonobitResult {
        proportion_ones: ones as f64 / n as f64,
        p_value: erfc(s_obs / std::f64::consts::SQRT_2),
    }
}

/// Runs the chi-square uniformity test over byte values.
///
/// The upper tail uses the Wilson-Hilferty normal approximation.
pub fn chi_square_uniformity(data: &[u8]) -> ChiSquareResult {
    if data.is_empty() {
        return ChiSquareResult {
            statistic: 0.0,
            p_value: 1.0,
        };
    }

    let mut counts = [0u64; 256];
    for &b in data {
        counts[b as usize] += 1;
    }

    let expected = data.len() as f64 / 256.0;
    let statistic: f64 = counts
        .iter()
        .map(|&c| (c as f64 - expected).powi(2) / expected)
        .sum();

    let k = BYTE_DF;
    let spread = 2.0 / (9.0 * k);
    let z = ((statistic / k).cbrt() - (1.0 - spread)) / spread.sqrt();

    ChiSquareResult {
        statistic,
        p_value: 0.5 * erfc(z / std::f64::consts::SQRT_2),
    }
}

/// Complementary error function.
///
/// Chebyshev fit with fractional error below 1.2e-7 everywhere.
fn erfc(x: f64) -> f64 {
    let z = x.abs();
    let t = 1.0 / (1.0 + 0.5 * z);
    let poly = -z * z - 1.265_512_23
        + t * (1.000_023_68
            + t * (0.374_091_96
                + t * (0.096_784_18
                    + t * (-0.186_288_06
                        + t * (0.278_868_07
                            + t * (-1.135_203_98
                                + t * (1.488_515_87
                                    + t * (-0.822_152_23 + t * 0.170_872_77))))))));
    let ans = t * poly.exp();
    if x >= 0.0 {
        ans
    } else {
        2.0 - ans
    }
}
