//! Generation parameters and their validation.
//!
//! A [`ConstraintSet`] bounds the pitch universe on three axes:
//!
//! - per-prime exponent bounds (primes other than 2; the octave is handled
//!   separately),
//! - a maximum absolute cent deviation from unison,
//! - the octave shifts permitted when two factors are paired back into a
//!   parent ratio.
//!
//! Malformed parameters are rejected synchronously when the grammar is
//! generated, never deferred into the enumeration.

use std::collections::BTreeMap;
use thiserror::Error;

/// Rejection reasons for a malformed [`ConstraintSet`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstraintError {
    #[error("prime 2 cannot carry an exponent bound; octave shifts are configured via allowed octaves")]
    OctavePrime,
    #[error("{0} is not a prime number")]
    NotPrime(u64),
    #[error("maximum cent deviation must be finite and non-negative, got {0}")]
    InvalidCentDeviation(f64),
    #[error("pitch ratio magnitude overflowed while enumerating the universe")]
    MagnitudeOverflow,
}

/// Parameters for [`crate::ContextFreeGrammar::from_constraints`].
///
/// The number of candidate exponent combinations is
/// `∏ (2 · bound_p + 1)` over all constrained primes, so it is exponential in
/// the number of primes. Callers choosing many primes or large bounds pay for
/// it in generation time; nothing is silently truncated.
///
/// # Example
///
/// ```
/// use monochord::ConstraintSet;
///
/// let constraints = ConstraintSet::new(550.0).with_prime(3, 1).with_prime(5, 1);
/// assert_eq!(constraints.maximum_cent_deviation(), 550.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintSet {
    prime_exponent_bounds: BTreeMap<u64, u32>,
    maximum_cent_deviation: f64,
    add_unison: bool,
    allowed_octaves: Vec<i32>,
}

impl ConstraintSet {
    /// A constraint set with no constrained primes, no unison, and `{0}` as
    /// the allowed octave shifts.
    pub fn new(maximum_cent_deviation: f64) -> Self {
        Self {
            prime_exponent_bounds: BTreeMap::new(),
            maximum_cent_deviation,
            add_unison: false,
            allowed_octaves: vec![0],
        }
    }

    /// Bound `prime`'s exponent to `[-maximum_exponent, +maximum_exponent]`.
    ///
    /// Re-adding a prime replaces its bound. Validation happens at
    /// generation time.
    pub fn with_prime(mut self, prime: u64, maximum_exponent: u32) -> Self {
        self.prime_exponent_bounds.insert(prime, maximum_exponent);
        self
    }

    /// Admit the unison ratio `1/1` into the splittable symbol universe.
    pub fn with_unison(mut self) -> Self {
        self.add_unison = true;
        self
    }

    /// Replace the allowed octave shifts (exponents of 2 usable when pairing
    /// two factors into a parent ratio). The default is `{0}`.
    pub fn with_octaves(mut self, octaves: impl IntoIterator<Item = i32>) -> Self {
        self.allowed_octaves = octaves.into_iter().collect();
        self
    }

    /// Constrained primes with their bounds, ascending by prime.
    pub fn prime_exponent_bounds(&self) -> &BTreeMap<u64, u32> {
        &self.prime_exponent_bounds
    }

    pub fn maximum_cent_deviation(&self) -> f64 {
        self.maximum_cent_deviation
    }

    pub fn add_unison(&self) -> bool {
        self.add_unison
    }

    pub fn allowed_octaves(&self) -> &[i32] {
        &self.allowed_octaves
    }

    /// Reject malformed parameters before any enumeration starts.
    pub(crate) fn validate(&self) -> Result<(), ConstraintError> {
        if !self.maximum_cent_deviation.is_finite() || self.maximum_cent_deviation < 0.0 {
            return Err(ConstraintError::InvalidCentDeviation(self.maximum_cent_deviation));
        }
        for &prime in self.prime_exponent_bounds.keys() {
            if prime == 2 {
                return Err(ConstraintError::OctavePrime);
            }
            if !is_prime(prime) {
                return Err(ConstraintError::NotPrime(prime));
            }
        }
        Ok(())
    }
}

/// Trial division; constrained primes are small (3, 5, 7, 11, ...).
fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut divisor = 3;
    while divisor * divisor <= n {
        if n % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_shape() {
        let constraints = ConstraintSet::new(550.0);
        assert!(constraints.prime_exponent_bounds().is_empty());
        assert!(!constraints.add_unison());
        assert_eq!(constraints.allowed_octaves(), &[0]);
        assert!(constraints.validate().is_ok());
    }

    #[test]
    fn primes_are_kept_sorted() {
        let constraints = ConstraintSet::new(550.0).with_prime(7, 1).with_prime(3, 2).with_prime(5, 1);
        let primes: Vec<u64> = constraints.prime_exponent_bounds().keys().copied().collect();
        assert_eq!(primes, vec![3, 5, 7]);
        assert_eq!(constraints.prime_exponent_bounds()[&3], 2);
    }

    #[test]
    fn rejects_prime_two() {
        let constraints = ConstraintSet::new(550.0).with_prime(2, 1);
        assert_eq!(constraints.validate(), Err(ConstraintError::OctavePrime));
    }

    #[test]
    fn rejects_composites() {
        let constraints = ConstraintSet::new(550.0).with_prime(9, 1);
        assert_eq!(constraints.validate(), Err(ConstraintError::NotPrime(9)));
    }

    #[test]
    fn rejects_bad_cent_deviation() {
        assert_eq!(
            ConstraintSet::new(-1.0).validate(),
            Err(ConstraintError::InvalidCentDeviation(-1.0))
        );
        assert!(ConstraintSet::new(f64::NAN).validate().is_err());
        assert!(ConstraintSet::new(0.0).validate().is_ok());
    }

    #[test]
    fn is_prime_small_values() {
        let primes = [2u64, 3, 5, 7, 11, 13];
        for p in primes {
            assert!(is_prime(p), "{p} should be prime");
        }
        for n in [0u64, 1, 4, 9, 15, 21] {
            assert!(!is_prime(n), "{n} should not be prime");
        }
    }
}
