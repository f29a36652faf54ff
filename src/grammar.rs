//! Pitch rewriting grammar: generation and resolution.
//!
//! This module is the public entry point for the grammar machinery. The work
//! is split into focused submodules under `src/grammar/` while keeping public
//! paths stable (`crate::ContextFreeGrammar`, `crate::ConstraintSet`).
//!
//! ## How the parts work together
//!
//! ```text
//! ConstraintSet ──┐
//!                 │  validate                       (constraints.rs)
//!                 └──────────────┬─────────────
//!                                │
//!                                v
//!                  generate (generator.rs)
//!                    - enumerate the pitch universe
//!                    - find two-factor decompositions
//!                    - classify Terminal / NonTerminal
//!                    - emit ordered, deduplicated rules
//!                                │
//!                                v
//!                       ContextFreeGrammar
//!                                │
//!                                v
//!                  resolve (resolver.rs)
//!                    - bounded breadth-first rewriting
//!                    - leftmost rewritable symbol
//!                                │
//!                                v
//!                       Tree<SententialForm>
//! ```
//!
//! ## Determinism
//!
//! Rule ordering is part of the contract: two calls to
//! [`ContextFreeGrammar::from_constraints`] with equal constraints yield
//! element-for-element identical grammars, and every ordering decision is an
//! explicit exact-rational sort (see `generator.rs`), never container
//! iteration order or floating-point comparison.
//!
//! ## Debugging
//!
//! Set `MONOCHORD_DEBUG_GRAMMAR=1` to print universe enumeration and
//! decomposition decisions during generation.

#[path = "grammar/constraints.rs"]
mod constraints;
#[path = "grammar/generator.rs"]
mod generator;
#[path = "grammar/resolver.rs"]
mod resolver;

pub use constraints::{ConstraintError, ConstraintSet};

use crate::tree::Tree;
use crate::{PitchSymbol, ProductionRule};

/// One sequence of symbols, as stored at every derivation-tree node.
pub type SententialForm = Vec<PitchSymbol>;

/// An immutable pitch rewriting grammar.
///
/// Built once by [`ContextFreeGrammar::from_constraints`]; read-only
/// afterwards, so a single grammar may serve any number of concurrent
/// [`ContextFreeGrammar::resolve`] calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextFreeGrammar {
    rules: Vec<ProductionRule>,
    non_terminals: Vec<PitchSymbol>,
    terminals: Vec<PitchSymbol>,
}

impl ContextFreeGrammar {
    /// Generate a grammar from a constraint set. See `generator.rs` for the
    /// enumeration and ordering contract.
    pub fn from_constraints(constraints: &ConstraintSet) -> Result<Self, ConstraintError> {
        generator::generate(constraints)
    }

    /// The ordered production rules.
    pub fn rules(&self) -> &[ProductionRule] {
        &self.rules
    }

    /// Distinct non-terminal symbols, in universe enumeration order.
    pub fn non_terminals(&self) -> &[PitchSymbol] {
        &self.non_terminals
    }

    /// Distinct terminal symbols, in order of first right-hand appearance.
    pub fn terminals(&self) -> &[PitchSymbol] {
        &self.terminals
    }

    /// All rules whose left side equals `symbol`, in rule order.
    pub fn rules_for(&self, symbol: &PitchSymbol) -> impl Iterator<Item = &ProductionRule> {
        let symbol = *symbol;
        self.rules.iter().filter(move |rule| rule.left_side == symbol)
    }

    /// Expand `start` for at most `limit` rewriting rounds.
    ///
    /// A start symbol without matching rules (including any externally
    /// constructed symbol the grammar has never seen) yields a root-only
    /// tree; that is a valid terminal derivation, not an error.
    pub fn resolve(&self, start: PitchSymbol, limit: usize) -> Tree<SententialForm> {
        resolver::resolve(self, start, limit)
    }

    pub(crate) fn from_parts(
        rules: Vec<ProductionRule>,
        non_terminals: Vec<PitchSymbol>,
        terminals: Vec<PitchSymbol>,
    ) -> Self {
        Self { rules, non_terminals, terminals }
    }
}
