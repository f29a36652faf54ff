//! Grammar generation from a constraint set.
//!
//! Generation runs in three phases, all of them explicit deterministic
//! enumerations:
//!
//! 1. **Universe.** Constrained primes ascending; per prime, exponents
//!    ascending over `[-max, +max]`; cartesian product with the first prime
//!    outermost. Each exponent combination contributes every octave
//!    registration whose absolute cent deviation stays within the bound, in
//!    ascending octave order. The all-zero combination enters only when
//!    `add_unison` is set.
//! 2. **Decomposition.** `p = a · b · 2^k` is a valid split of `p` when `k`
//!    lies in the allowed octave set, the exponent vectors (octave axis
//!    included) sum exactly, neither factor equals `p` in value, and the two
//!    factors carry opposite-sign exponents on at least one axis (the split
//!    must contain contrary motion; `16/15 = 4/3 · 4/5` does not qualify,
//!    `4/5 = 3/4 · 16/15` does).
//! 3. **Emission.** Heads ordered by ascending span (exact rational compare,
//!    see [`crate::JustIntonationPitch::span`]), ties in universe order.
//!    Within a pair the larger-span factor leads (ties: smaller ratio), and
//!    each ordered pair is immediately followed by its reverse; `a = b`
//!    yields a single rule. When one head admits several pairs, the pairs
//!    are emitted in universe order of their leading factor (ties by the
//!    trailing factor).
//!
//! Roles are assigned per octave class: every registration of a combination
//! with at least one valid split is NonTerminal, everything else Terminal.
//! Right-hand occurrences carry the value's own role, so a symbol can head
//! rules and still appear rewritable inside another head's right side.
//!
//! The pair scan is O(n³) in the universe size, which is itself exponential
//! in the number of constrained primes; see `ConstraintSet` for the exact
//! count. Universes for musically plausible constraints stay tiny.
//!
//! Set `MONOCHORD_DEBUG_GRAMMAR=1` to trace enumeration and split decisions.

use super::constraints::{ConstraintError, ConstraintSet};
use super::ContextFreeGrammar;
use crate::pitch::JustIntonationPitch;
use crate::{PitchSymbol, ProductionRule};
use num_rational::Ratio;
use std::cmp::Ordering;
use std::collections::HashSet;

/// One universe member: a registered pitch plus its exact exponent data.
///
/// `octave` is the full exponent of 2 of the reduced ratio (the odd part
/// contributed by the constrained primes carries no 2s), so exponent
/// arithmetic over `(octave, exponents)` is exact ratio arithmetic.
struct Candidate {
    pitch: JustIntonationPitch,
    exponents: Vec<i32>,
    octave: i32,
    combo: usize,
}

pub(super) fn generate(constraints: &ConstraintSet) -> Result<ContextFreeGrammar, ConstraintError> {
    constraints.validate()?;
    let debug = std::env::var_os("MONOCHORD_DEBUG_GRAMMAR").is_some();

    let primes: Vec<u64> = constraints.prime_exponent_bounds().keys().copied().collect();
    let bounds: Vec<u32> = constraints.prime_exponent_bounds().values().copied().collect();

    let universe = enumerate_universe(&primes, &bounds, constraints, debug)?;

    // Valid splits per head, as unordered index pairs into the universe.
    let mut pairs: Vec<Vec<(usize, usize)>> = vec![Vec::new(); universe.len()];
    let mut splittable_combos: HashSet<usize> = HashSet::new();
    for head in 0..universe.len() {
        for i in 0..universe.len() {
            for j in i..universe.len() {
                if !decomposes(&universe[head], &universe[i], &universe[j], constraints.allowed_octaves()) {
                    continue;
                }
                if debug {
                    eprintln!(
                        "[grammar] split {} = {} * {}",
                        universe[head].pitch, universe[i].pitch, universe[j].pitch
                    );
                }
                pairs[head].push((i, j));
            }
        }
        if !pairs[head].is_empty() {
            splittable_combos.insert(universe[head].combo);
        }
    }

    let symbol_for = |index: usize| -> PitchSymbol {
        if splittable_combos.contains(&universe[index].combo) {
            PitchSymbol::NonTerminal(universe[index].pitch)
        } else {
            PitchSymbol::Terminal(universe[index].pitch)
        }
    };

    // Heads by ascending span; the sort is stable, so ties keep universe order.
    let mut head_order: Vec<usize> = (0..universe.len()).filter(|head| !pairs[*head].is_empty()).collect();
    head_order.sort_by(|a, b| universe[*a].pitch.span().cmp(&universe[*b].pitch.span()));

    let mut rules: Vec<ProductionRule> = Vec::new();
    let mut seen: HashSet<(PitchSymbol, [PitchSymbol; 2])> = HashSet::new();
    for &head in &head_order {
        let left_side = PitchSymbol::NonTerminal(universe[head].pitch);
        let mut ordered: Vec<(usize, usize)> =
            pairs[head].iter().map(|&(i, j)| order_pair(&universe, i, j)).collect();
        ordered.sort_by_key(|&(lead, trail)| (lead, trail));

        for (lead, trail) in ordered {
            for right_side in [[lead, trail], [trail, lead]] {
                let rule = ProductionRule {
                    left_side,
                    right_side: [symbol_for(right_side[0]), symbol_for(right_side[1])],
                };
                if seen.insert((rule.left_side, rule.right_side)) {
                    rules.push(rule);
                }
            }
        }
    }

    // Non-terminals in universe order; terminals by first right-hand appearance.
    let non_terminals: Vec<PitchSymbol> = (0..universe.len())
        .filter(|index| splittable_combos.contains(&universe[*index].combo))
        .map(symbol_for)
        .collect();
    let mut terminals: Vec<PitchSymbol> = Vec::new();
    for rule in &rules {
        for symbol in rule.right_side {
            if symbol.is_terminal() && !terminals.contains(&symbol) {
                terminals.push(symbol);
            }
        }
    }

    Ok(ContextFreeGrammar::from_parts(rules, non_terminals, terminals))
}

fn enumerate_universe(
    primes: &[u64],
    bounds: &[u32],
    constraints: &ConstraintSet,
    debug: bool,
) -> Result<Vec<Candidate>, ConstraintError> {
    let maximum = constraints.maximum_cent_deviation();
    let mut universe = Vec::new();

    for (combo, exponents) in exponent_combinations(bounds).into_iter().enumerate() {
        let is_unison_combo = exponents.iter().all(|exponent| *exponent == 0);
        if is_unison_combo && !constraints.add_unison() {
            continue;
        }

        // Cents of the odd part; every octave registration shifts by 1200.
        let base_cents: f64 = exponents
            .iter()
            .zip(primes)
            .map(|(exponent, prime)| f64::from(*exponent) * 1200.0 * (*prime as f64).log2())
            .sum();
        let low = ((-maximum - base_cents) / 1200.0).ceil() as i64;
        let high = ((maximum - base_cents) / 1200.0).floor() as i64;

        for octave in low..=high {
            let cents = base_cents + 1200.0 * octave as f64;
            if cents.abs() > maximum {
                continue;
            }
            let pitch = pitch_from_exponents(primes, &exponents, octave as i32)?;
            if debug {
                eprintln!("[grammar] universe[{}] = {} ({:+.1}c)", universe.len(), pitch, cents);
            }
            universe.push(Candidate { pitch, exponents: exponents.clone(), octave: octave as i32, combo });
        }
    }
    Ok(universe)
}

/// Cartesian product of exponent ranges, first prime outermost, each range
/// ascending. Zero primes yield the single empty combination.
fn exponent_combinations(bounds: &[u32]) -> Vec<Vec<i32>> {
    let mut combinations = vec![Vec::new()];
    for &bound in bounds {
        let mut extended = Vec::with_capacity(combinations.len() * (2 * bound as usize + 1));
        for combination in &combinations {
            for exponent in -(bound as i32)..=(bound as i32) {
                let mut next = combination.clone();
                next.push(exponent);
                extended.push(next);
            }
        }
        combinations = extended;
    }
    combinations
}

fn pitch_from_exponents(primes: &[u64], exponents: &[i32], octave: i32) -> Result<JustIntonationPitch, ConstraintError> {
    let mut numerator: u128 = 1;
    let mut denominator: u128 = 1;
    let mut apply = |base: u128, exponent: i32| -> Option<()> {
        let power = base.checked_pow(exponent.unsigned_abs())?;
        if exponent >= 0 {
            numerator = numerator.checked_mul(power)?;
        } else {
            denominator = denominator.checked_mul(power)?;
        }
        Some(())
    };

    for (prime, exponent) in primes.iter().zip(exponents) {
        apply(u128::from(*prime), *exponent).ok_or(ConstraintError::MagnitudeOverflow)?;
    }
    apply(2, octave).ok_or(ConstraintError::MagnitudeOverflow)?;

    let reduced = Ratio::<u128>::new(numerator, denominator);
    let numerator = u64::try_from(*reduced.numer()).map_err(|_| ConstraintError::MagnitudeOverflow)?;
    let denominator = u64::try_from(*reduced.denom()).map_err(|_| ConstraintError::MagnitudeOverflow)?;
    JustIntonationPitch::new(numerator, denominator).map_err(|_| ConstraintError::MagnitudeOverflow)
}

/// Is `head = a · b · 2^k` a valid split for some allowed `k`?
fn decomposes(head: &Candidate, a: &Candidate, b: &Candidate, allowed_octaves: &[i32]) -> bool {
    // The head never reappears inside its own split.
    if a.pitch == head.pitch || b.pitch == head.pitch {
        return false;
    }
    for ((ea, eb), eh) in a.exponents.iter().zip(&b.exponents).zip(&head.exponents) {
        if ea + eb != *eh {
            return false;
        }
    }
    let shift = head.octave - a.octave - b.octave;
    if !allowed_octaves.contains(&shift) {
        return false;
    }
    // Contrary motion on at least one axis, the octave axis included.
    let contrary = a.octave * b.octave < 0
        || a.exponents.iter().zip(&b.exponents).any(|(ea, eb)| ea * eb < 0);
    contrary
}

/// Order a split's two factors: larger span leads; equal spans, smaller ratio.
fn order_pair(universe: &[Candidate], i: usize, j: usize) -> (usize, usize) {
    let (a, b) = (&universe[i], &universe[j]);
    match b.pitch.span().cmp(&a.pitch.span()) {
        Ordering::Less => (i, j),
        Ordering::Greater => (j, i),
        Ordering::Equal => {
            if a.pitch.ratio() <= b.pitch.ratio() { (i, j) } else { (j, i) }
        }
    }
}
