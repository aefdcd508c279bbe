use std::fmt;
use std::ops::{Div, Mul};

/// Largest denominator tried when recovering a ratio from a float.
const MAX_DENOMINATOR: i64 = 96;

/// Absolute tolerance used when matching a float against `p / q`.
const EPSILON: f64 = 1e-3;

/// An exact rational number kept in lowest terms with a positive denominator.
///
/// Quantize values only ever pick up factors of 2 and 3 from the dotted and
/// triplet modifiers, so classifying them on ratios avoids the float
/// `% 1 == 0` checks misfiring on values such as `4 / 1.5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ratio {
    num: i64,
    den: i64,
}

/// Largest magnitude taken from a float. Every integer up to 2^53 is exact in
/// an `f64`, and scaled by `MAX_DENOMINATOR` it stays far inside `i64`.
const MAX_EXACT: f64 = 9_007_199_254_740_992.0;

fn gcd(mut a: i128, mut b: i128) -> i128 {
    a = a.abs();
    b = b.abs();
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

fn saturate(n: i128) -> i64 {
    i64::try_from(n).unwrap_or(if n < 0 { i64::MIN } else { i64::MAX })
}

/// Reduces in `i128` so products of two `i64` ratios cannot overflow.
fn reduced(num: i128, den: i128) -> Ratio {
    let sign = if den < 0 { -1 } else { 1 };
    let divisor = gcd(num, den).max(1);
    Ratio {
        num: saturate(sign * num / divisor),
        den: saturate(sign * den / divisor).max(1),
    }
}

impl Ratio {
    /// Creates a reduced ratio. `den` must be non-zero.
    pub fn new(num: i64, den: i64) -> Self {
        debug_assert!(den != 0, "ratio denominator must be non-zero");
        reduced(i128::from(num), i128::from(den))
    }

    /// Const constructor for ratios already in lowest terms.
    pub(crate) const fn new_const(num: i64, den: i64) -> Self {
        Self { num, den }
    }

    pub const fn from_integer(n: i64) -> Self {
        Self { num: n, den: 1 }
    }

    /// Finds the ratio with the smallest denominator that lies within
    /// tolerance of `value`. Values with no close small-denominator match
    /// fall back to the nearest multiple of `1 / MAX_DENOMINATOR`.
    /// Magnitudes beyond 2^53 are clamped to it.
    pub fn approximate(value: f64) -> Self {
        if !value.is_finite() {
            return Self::from_integer(0);
        }
        let value = value.clamp(-MAX_EXACT, MAX_EXACT);
        for den in 1..=MAX_DENOMINATOR {
            let num = (value * den as f64).round();
            if (value - num / den as f64).abs() <= EPSILON {
                return Self::new(num as i64, den);
            }
        }
        Self::new(
            (value * MAX_DENOMINATOR as f64).round() as i64,
            MAX_DENOMINATOR,
        )
    }

    pub fn numer(&self) -> i64 {
        self.num
    }

    pub fn denom(&self) -> i64 {
        self.den
    }

    pub fn is_integer(&self) -> bool {
        self.den == 1
    }

    pub fn to_f64(&self) -> f64 {
        self.num as f64 / self.den as f64
    }
}

impl From<u32> for Ratio {
    fn from(n: u32) -> Self {
        Self::from_integer(i64::from(n))
    }
}

impl Mul for Ratio {
    type Output = Ratio;

    fn mul(self, rhs: Ratio) -> Ratio {
        reduced(
            i128::from(self.num) * i128::from(rhs.num),
            i128::from(self.den) * i128::from(rhs.den),
        )
    }
}

impl Div for Ratio {
    type Output = Ratio;

    fn div(self, rhs: Ratio) -> Ratio {
        reduced(
            i128::from(self.num) * i128::from(rhs.den),
            i128::from(self.den) * i128::from(rhs.num),
        )
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}
