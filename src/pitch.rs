//! Just-intonation pitch values.
//!
//! A [`JustIntonationPitch`] is an exact frequency ratio: a positive rational
//! kept in lowest terms. It is the value half of every grammar symbol; the
//! role half (Terminal / NonTerminal) lives in `crate::PitchSymbol`.
//!
//! Two distance measures coexist here on purpose:
//!
//! - [`JustIntonationPitch::cents`] is the familiar logarithmic measure
//!   (1200 · log2(ratio)), an `f64`. It is fine for bound checks and display.
//! - [`JustIntonationPitch::span`] is the same distance expressed as a
//!   rational (`max(r, 1/r)`). Comparing spans is exact, so every ordering
//!   decision in the grammar generator goes through `span`, never through
//!   floating point. `|cents(a)| < |cents(b)|` iff `span(a) < span(b)`.

use num_rational::Ratio;
use num_traits::One;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error produced when constructing or parsing a pitch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PitchError {
    #[error("pitch ratio requires positive numerator and denominator")]
    Zero,
    #[error("malformed pitch ratio {0:?} (expected \"n/d\" or \"n\")")]
    Malformed(String),
}

/// An immutable just-intonation interval: a positive rational in lowest terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JustIntonationPitch(Ratio<u64>);

impl JustIntonationPitch {
    /// Create a pitch from a numerator and denominator; the ratio is reduced.
    pub fn new(numerator: u64, denominator: u64) -> Result<Self, PitchError> {
        if numerator == 0 || denominator == 0 {
            return Err(PitchError::Zero);
        }
        Ok(Self(Ratio::new(numerator, denominator)))
    }

    /// The unison ratio `1/1`.
    pub fn unison() -> Self {
        Self(Ratio::one())
    }

    pub fn numerator(&self) -> u64 {
        *self.0.numer()
    }

    pub fn denominator(&self) -> u64 {
        *self.0.denom()
    }

    /// The underlying reduced ratio.
    pub fn ratio(&self) -> Ratio<u64> {
        self.0
    }

    pub fn is_unison(&self) -> bool {
        self.0.is_one()
    }

    /// Signed distance from unison in cents (`1200 · log2(ratio)`).
    pub fn cents(&self) -> f64 {
        1200.0 * ((self.numerator() as f64).log2() - (self.denominator() as f64).log2())
    }

    /// Distance from unison as an exact rational: `max(r, 1/r)`.
    ///
    /// `span(a) < span(b)` iff `|cents(a)| < |cents(b)|`, without any float
    /// involved. All deterministic ordering in the generator uses this.
    pub fn span(&self) -> Ratio<u64> {
        if self.0 >= Ratio::one() { self.0 } else { self.0.recip() }
    }

    /// The inverted interval (`n/d` becomes `d/n`).
    pub fn recip(&self) -> Self {
        Self(self.0.recip())
    }

    /// Multiply two intervals, reducing through a 128-bit intermediate.
    ///
    /// Returns `None` when the reduced result does not fit in `u64`.
    pub fn checked_mul(&self, other: &Self) -> Option<Self> {
        let n = u128::from(self.numerator()) * u128::from(other.numerator());
        let d = u128::from(self.denominator()) * u128::from(other.denominator());
        let reduced = Ratio::<u128>::new(n, d);
        let numerator = u64::try_from(*reduced.numer()).ok()?;
        let denominator = u64::try_from(*reduced.denom()).ok()?;
        Some(Self(Ratio::new_raw(numerator, denominator)))
    }

    /// Shift by a whole number of octaves (multiply by `2^octaves`).
    ///
    /// Returns `None` on overflow.
    pub fn shift_octaves(&self, octaves: i32) -> Option<Self> {
        if octaves == 0 {
            return Some(*self);
        }
        let magnitude = octaves.unsigned_abs();
        let factor = 1u64.checked_shl(magnitude)?;
        let shifted = if octaves > 0 {
            Ratio::new(self.numerator().checked_mul(factor)?, self.denominator())
        } else {
            Ratio::new(self.numerator(), self.denominator().checked_mul(factor)?)
        };
        Some(Self(shifted))
    }
}

impl fmt::Display for JustIntonationPitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator(), self.denominator())
    }
}

impl FromStr for JustIntonationPitch {
    type Err = PitchError;

    /// Parse `"n/d"` (or a bare integer `"n"`, read as `n/1`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || PitchError::Malformed(s.to_string());
        let (numerator, denominator) = match s.split_once('/') {
            Some((n, d)) => (n.trim().parse().map_err(|_| malformed())?, d.trim().parse().map_err(|_| malformed())?),
            None => (s.trim().parse().map_err(|_| malformed())?, 1),
        };
        Self::new(numerator, denominator).map_err(|_| PitchError::Zero)
    }
}
