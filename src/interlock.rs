//! Euclidean interlocking of ordered sequences.
//!
//! Merges any number of ordered sequences into one, keeping each input's
//! internal order while spreading its elements as evenly as possible across
//! the combined length. This is the classic Euclidean/Bresenham onset
//! distribution, generalized from binary rhythms to arbitrary-typed
//! multi-sequence merging.
//!
//! The merge order is defined by completion fractions: the `j`-th element
//! (0-based) of a sequence of length `len` sits at fraction `(j + 1) / len`.
//! All elements are emitted in ascending fraction order; ties fall back to
//! the argument order of the sequences. Fractions are compared by exact
//! cross-multiplication, so the result is fully deterministic.
//!
//! ```text
//! interlock([0,0,0], [1,1]):
//!   0 at 1/3   1 at 1/2   0 at 2/3   0 at 3/3   1 at 2/2
//!   => (0, 1, 0, 0, 1)
//! ```

/// Merge `sequences` into one evenly interlocked sequence.
///
/// Empty inputs are dropped; no inputs (or only empty ones) yield an empty
/// result; a single non-empty input is returned unchanged.
///
/// # Example
///
/// ```
/// use monochord::euclidean_interlocking;
///
/// let merged = euclidean_interlocking(vec![vec![0, 0, 0], vec![1, 1]]);
/// assert_eq!(merged, vec![0, 1, 0, 0, 1]);
/// ```
pub fn euclidean_interlocking<T>(sequences: impl IntoIterator<Item = Vec<T>>) -> Vec<T> {
    let sequences: Vec<Vec<T>> = sequences.into_iter().filter(|sequence| !sequence.is_empty()).collect();
    match sequences.len() {
        0 => return Vec::new(),
        1 => return sequences.into_iter().next().unwrap_or_default(),
        _ => {}
    }

    // One pick per element, generated in (sequence, position) order so that a
    // stable sort on the fraction alone keeps argument order on ties.
    let mut picks: Vec<Pick> = Vec::with_capacity(sequences.iter().map(Vec::len).sum());
    for (sequence_index, sequence) in sequences.iter().enumerate() {
        let len = sequence.len() as u64;
        for position in 0..sequence.len() as u64 {
            picks.push(Pick { sequence_index, numerator: position + 1, denominator: len });
        }
    }
    picks.sort_by(|a, b| (a.numerator * b.denominator).cmp(&(b.numerator * a.denominator)));

    let mut cursors: Vec<std::vec::IntoIter<T>> = sequences.into_iter().map(Vec::into_iter).collect();
    picks.iter().filter_map(|pick| cursors[pick.sequence_index].next()).collect()
}

/// One element slot: which sequence it comes from and its completion fraction.
struct Pick {
    sequence_index: usize,
    numerator: u64,
    denominator: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_sequences_interlock_evenly() {
        let merged = euclidean_interlocking(vec![vec![0, 0, 0], vec![1, 1]]);
        assert_eq!(merged, vec![0, 1, 0, 0, 1]);
    }

    #[test]
    fn no_sequences_yield_empty() {
        let merged: Vec<i32> = euclidean_interlocking(Vec::<Vec<i32>>::new());
        assert_eq!(merged, Vec::<i32>::new());
    }

    #[test]
    fn single_sequence_is_unchanged() {
        assert_eq!(euclidean_interlocking(vec![vec![1, 2, 3]]), vec![1, 2, 3]);
    }

    #[test]
    fn empty_sequences_are_dropped() {
        assert_eq!(euclidean_interlocking(vec![vec![1, 2, 3], vec![], vec![]]), vec![1, 2, 3]);
        let merged: Vec<i32> = euclidean_interlocking(vec![vec![], vec![]]);
        assert_eq!(merged, Vec::<i32>::new());
    }

    #[test]
    fn three_sequences_tie_break_by_argument_order() {
        let merged = euclidean_interlocking(vec![vec!["a", "a"], vec!["b", "b"], vec!["c"]]);
        assert_eq!(merged, vec!["a", "b", "a", "b", "c"]);
    }

    #[test]
    fn per_sequence_order_is_preserved() {
        let merged = euclidean_interlocking(vec![vec![1, 2, 3, 4, 5], vec![10, 20, 30]]);

        let firsts: Vec<i32> = merged.iter().copied().filter(|value| *value < 10).collect();
        let seconds: Vec<i32> = merged.iter().copied().filter(|value| *value >= 10).collect();
        assert_eq!(firsts, vec![1, 2, 3, 4, 5]);
        assert_eq!(seconds, vec![10, 20, 30]);
        assert_eq!(merged.len(), 8);
    }

    #[test]
    fn works_with_non_copy_elements() {
        let merged = euclidean_interlocking(vec![vec!["x".to_string()], vec!["y".to_string()]]);
        assert_eq!(merged, vec!["x".to_string(), "y".to_string()]);
    }
}
