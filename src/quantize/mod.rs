//! Note-length quantization
//!
//! This module covers the arithmetic behind the quantize grid selector:
//! - [`calc_quantize`] encodes a base denominator plus dotted/triplet flags
//! - [`decompose`] recovers the denominator and flags from an encoded value
//! - [`Quantizer`] snaps ticks to the grid a value selects
//! - [`QuantizeSelector`] is the stateful control wrapping the arithmetic
//!
//! A quantize value is expressed in "denominator" units: 4 is a quarter note,
//! 8 an eighth. Dotting divides by 1.5 and a triplet multiplies by 1.5, so a
//! dotted quarter is `4 / 1.5` and a quarter triplet is `6`.

mod popup;
mod quantizer;
mod ratio;
mod selector;

pub use popup::{PopupAction, QuantizePopup};
pub use quantizer::Quantizer;
pub use ratio::Ratio;
pub use selector::{OnSelect, QuantizeSelector, SelectorView};

/// Base denominators offered by the selector, in wheel order.
pub const DENOMINATORS: [u32; 8] = [1, 2, 4, 8, 16, 32, 64, 128];

const THREE_HALVES: Ratio = Ratio::new_const(3, 2);

/// A quantize value split into its base denominator and modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantize {
    pub denominator: Ratio,
    pub dotted: bool,
    pub triplet: bool,
}

impl Quantize {
    pub fn new(denominator: u32, dotted: bool, triplet: bool) -> Self {
        Self {
            denominator: Ratio::from(denominator),
            dotted,
            triplet,
        }
    }

    /// The encoded value, i.e. `calc_quantize` applied to this decomposition.
    pub fn value(&self) -> f64 {
        scale(self.denominator, self.dotted, self.triplet).to_f64()
    }

    /// Position of the denominator in [`DENOMINATORS`], if it is one of them.
    pub fn denominator_index(&self) -> Option<usize> {
        DENOMINATORS
            .iter()
            .position(|&d| Ratio::from(d) == self.denominator)
    }
}

/// Encodes a base denominator with the dotted and triplet modifiers.
///
/// Dotted is applied before triplet and both may apply at once.
pub fn calc_quantize(base: f64, dotted: bool, triplet: bool) -> f64 {
    let mut value = base;
    if dotted {
        value /= 1.5;
    }
    if triplet {
        value *= 1.5;
    }
    value
}

fn scale(base: Ratio, dotted: bool, triplet: bool) -> Ratio {
    let mut value = base;
    if dotted {
        value = value / THREE_HALVES;
    }
    if triplet {
        value = value * THREE_HALVES;
    }
    value
}

/// Splits an encoded quantize value into denominator and modifiers.
///
/// `triplet` holds when `value / 1.5` is an integer; `dotted` when `value`
/// is fractional but `value * 1.5` is an integer. The triplet test takes
/// precedence, so both flags are never reported together. The denominator
/// is recovered by running the forward formula with the roles swapped.
pub fn decompose(value: f64) -> Quantize {
    let ratio = Ratio::approximate(value);
    let triplet = (ratio / THREE_HALVES).is_integer();
    let dotted = !triplet && !ratio.is_integer() && (ratio * THREE_HALVES).is_integer();
    Quantize {
        denominator: scale(ratio, triplet, dotted),
        dotted,
        triplet,
    }
}
