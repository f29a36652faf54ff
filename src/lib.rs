//! Deterministic generators for just-intonation material.
//!
//! The crate turns a set of number-theoretic constraints into structured
//! musical material, in three independent, pure, deterministic stages:
//!
//! ```text
//! ConstraintSet ── ContextFreeGrammar::from_constraints ── (grammar/generator.rs)
//!                               │
//!                               v
//!                     ContextFreeGrammar
//!                       - ordered production rules
//!                       - non-terminal / terminal symbol lists
//!                               │
//!                               v
//!                     grammar.resolve(start, limit)        (grammar/resolver.rs)
//!                       - bounded breadth-first rewriting
//!                               │
//!                               v
//!                        Tree<SententialForm>
//! ```
//!
//! [`euclidean_interlocking`] is a stand-alone fourth piece: it merges any
//! number of ordered sequences into one, distributing each input as evenly as
//! possible while preserving per-input order. It is typically fed the leaf
//! sequences of several derivation trees.
//!
//! Everything here is synchronous and free of shared mutable state: a built
//! grammar is read-only and may be resolved from many threads at once, each
//! resolution owning its private tree.
//!
//! # Example
//!
//! ```
//! use monochord::{ConstraintSet, ContextFreeGrammar};
//!
//! let constraints = ConstraintSet::new(550.0).with_prime(3, 1).with_prime(5, 1);
//! let grammar = ContextFreeGrammar::from_constraints(&constraints).unwrap();
//! assert_eq!(grammar.rules().len(), 8);
//!
//! let start = grammar.non_terminals()[1]; // 4/5
//! let tree = grammar.resolve(start, 1);
//! assert_eq!(tree.leaves().count(), 2);
//! ```

#[macro_use]
mod macros;

mod grammar;
mod interlock;
mod pitch;
mod title;
mod tree;

pub use grammar::{ConstraintError, ConstraintSet, ContextFreeGrammar, SententialForm};
pub use interlock::euclidean_interlocking;
pub use pitch::{JustIntonationPitch, PitchError};
pub use title::{CompositionLedger, golden_number, golden_number_for};
pub use tree::{NodeId, Tree, TreeNode};

use std::fmt;

// --- Grammar symbols ---------------------------------------------------------

/// A pitch value plus its grammar role.
///
/// The role is decided once by the generator: values whose octave class admits
/// at least one valid two-factor decomposition are `NonTerminal`, everything
/// else is `Terminal`. Two symbols are equal only when both the value and the
/// role match, so a `Terminal(3/2)` in a sentential form is never rewritten
/// even if a `NonTerminal(3/2)` heads rules elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PitchSymbol {
    Terminal(JustIntonationPitch),
    NonTerminal(JustIntonationPitch),
}

impl PitchSymbol {
    /// The rational value, regardless of role.
    pub fn pitch(&self) -> JustIntonationPitch {
        match self {
            PitchSymbol::Terminal(pitch) | PitchSymbol::NonTerminal(pitch) => *pitch,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PitchSymbol::Terminal(_))
    }

    pub fn is_non_terminal(&self) -> bool {
        matches!(self, PitchSymbol::NonTerminal(_))
    }
}

impl fmt::Display for PitchSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pitch())
    }
}

/// A directional rewriting rule: one non-terminal into exactly two symbols.
///
/// Invariant (upheld by the generator): the product of the two right-side
/// values, shifted by some allowed octave, equals the left-side value, and
/// `left_side` always carries the `NonTerminal` role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProductionRule {
    pub left_side: PitchSymbol,
    pub right_side: [PitchSymbol; 2],
}

impl fmt::Display for ProductionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} {}", self.left_side, self.right_side[0], self.right_side[1])
    }
}
