//! Bounded-depth derivation of a start symbol.
//!
//! The resolver rewrites breadth-first: every node at the current depth is
//! expanded before any node one level deeper, and a node's children are
//! created in rule order, so the leaf sequence of the finished tree is
//! reproducible. At each node the *leftmost* symbol that is a non-terminal
//! with at least one matching rule is replaced; one child is created per
//! matching rule, with the two-symbol right side spliced in place of the
//! rewritten symbol.
//!
//! A node becomes a leaf either because nothing in its data is rewritable, or
//! because the round limit ran out first (a partial derivation). Resolving a
//! symbol the grammar has never seen is the degenerate case of the former: a
//! root-only tree, not an error.
//!
//! Every node's tag is a canonical comma-joined rendering of its symbol
//! sequence, for display and comparison only; identity lives in the data.

use super::{ContextFreeGrammar, SententialForm};
use crate::PitchSymbol;
use crate::tree::{NodeId, Tree};

pub(super) fn resolve(grammar: &ContextFreeGrammar, start: PitchSymbol, limit: usize) -> Tree<SententialForm> {
    let root_data: SententialForm = vec![start];
    let mut tree = Tree::with_root(data_to_tag(&root_data), root_data);

    let mut frontier: Vec<NodeId> = vec![tree.root()];
    for _ in 0..limit {
        if frontier.is_empty() {
            break;
        }
        let mut next_frontier = Vec::new();
        for node in frontier {
            let data = tree.get(node).data.clone();
            let Some(index) = leftmost_rewritable(grammar, &data) else {
                continue; // nothing rewritable: the node stays a leaf
            };
            let matching: Vec<_> = grammar.rules_for(&data[index]).copied().collect();
            for rule in matching {
                let mut child: SententialForm = Vec::with_capacity(data.len() + 1);
                child.extend_from_slice(&data[..index]);
                child.extend_from_slice(&rule.right_side);
                child.extend_from_slice(&data[index + 1..]);
                next_frontier.push(tree.add_child(node, data_to_tag(&child), child));
            }
        }
        frontier = next_frontier;
    }
    tree
}

fn leftmost_rewritable(grammar: &ContextFreeGrammar, data: &[PitchSymbol]) -> Option<usize> {
    data.iter().position(|symbol| symbol.is_non_terminal() && grammar.rules_for(symbol).next().is_some())
}

fn data_to_tag(data: &[PitchSymbol]) -> String {
    data.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use crate::{ConstraintSet, ContextFreeGrammar, PitchSymbol, SententialForm};

    fn five_limit_grammar() -> ContextFreeGrammar {
        let constraints = ConstraintSet::new(550.0).with_prime(3, 1).with_prime(5, 1);
        ContextFreeGrammar::from_constraints(&constraints).unwrap()
    }

    fn leaf_data(tree: &crate::Tree<SententialForm>) -> Vec<SententialForm> {
        tree.leaves().map(|leaf| tree.get(leaf).data.clone()).collect()
    }

    #[test]
    fn one_round_from_a_fourth_down() {
        let grammar = five_limit_grammar();
        let tree = grammar.resolve(nt!("3/4"), 1);

        assert_eq!(
            leaf_data(&tree),
            vec![vec![nt!("4/5"), term!("15/16")], vec![term!("15/16"), nt!("4/5")]]
        );
        let leaves: Vec<_> = tree.leaves().collect();
        assert_eq!(tree.get(leaves[0]).tag, "4/5, 15/16");
        assert_eq!(tree.get(leaves[1]).tag, "15/16, 4/5");
        assert_eq!(tree.get(tree.root()).tag, "3/4");
    }

    #[test]
    fn second_round_expands_the_leftmost_rewritable_symbol() {
        let grammar = five_limit_grammar();
        let tree = grammar.resolve(nt!("3/4"), 2);

        // Depth 1: (4/5, 15/16) and (15/16, 4/5). Depth 2 rewrites the 4/5 in
        // each, wherever it sits.
        assert_eq!(
            leaf_data(&tree),
            vec![
                vec![nt!("3/4"), term!("16/15"), term!("15/16")],
                vec![term!("16/15"), nt!("3/4"), term!("15/16")],
                vec![term!("15/16"), nt!("3/4"), term!("16/15")],
                vec![term!("15/16"), term!("16/15"), nt!("3/4")],
            ]
        );
        for leaf in tree.leaves() {
            assert_eq!(tree.depth(leaf), 2);
        }
    }

    #[test]
    fn unison_resolution_reaches_terminals_in_one_round() {
        let constraints = ConstraintSet::new(500.0).with_prime(3, 1).with_unison();
        let grammar = ContextFreeGrammar::from_constraints(&constraints).unwrap();
        let tree = grammar.resolve(nt!("1/1"), 1);

        assert_eq!(
            leaf_data(&tree),
            vec![vec![term!("3/4"), term!("4/3")], vec![term!("4/3"), term!("3/4")]]
        );
    }

    #[test]
    fn non_terminals_without_rules_are_inert() {
        // 1/2 and 2/1 are non-terminal by octave class but head no rules, so
        // the derivation stops after one round no matter the limit.
        let constraints = ConstraintSet::new(1200.0).with_unison().with_octaves([-1, 0, 1]);
        let grammar = ContextFreeGrammar::from_constraints(&constraints).unwrap();
        let tree = grammar.resolve(nt!("1/1"), 5);

        assert_eq!(
            leaf_data(&tree),
            vec![vec![nt!("1/2"), nt!("2/1")], vec![nt!("2/1"), nt!("1/2")]]
        );
    }

    #[test]
    fn zero_limit_keeps_the_root_as_leaf() {
        let grammar = five_limit_grammar();
        let tree = grammar.resolve(nt!("3/4"), 0);

        assert_eq!(tree.len(), 1);
        assert_eq!(leaf_data(&tree), vec![vec![nt!("3/4")]]);
    }

    #[test]
    fn unknown_start_symbol_yields_a_root_only_tree() {
        let grammar = five_limit_grammar();

        // 7/4 is outside the universe; 16/15 exists but only as a terminal.
        for start in [nt!("7/4"), term!("16/15"), term!("3/4")] {
            let tree = grammar.resolve(start, 3);
            assert_eq!(tree.len(), 1, "{start} must not expand");
            assert_eq!(leaf_data(&tree), vec![vec![start]]);
        }
    }

    #[test]
    fn resolution_never_mutates_the_grammar() {
        let grammar = five_limit_grammar();
        let before = grammar.clone();
        let _ = grammar.resolve(nt!("3/4"), 3);
        let _ = grammar.resolve(nt!("4/5"), 1);
        assert_eq!(grammar, before);
    }

    #[test]
    fn leaves_of_sibling_trees_interlock() {
        // Typical composition use: resolve two starts, interlock the leaves.
        let grammar = five_limit_grammar();
        let first = grammar.resolve(nt!("3/4"), 1);
        let second = grammar.resolve(nt!("4/3"), 1);

        let firsts: Vec<PitchSymbol> = first.leaves().flat_map(|leaf| first.get(leaf).data.clone()).collect();
        let seconds: Vec<PitchSymbol> = second.leaves().flat_map(|leaf| second.get(leaf).data.clone()).collect();
        let merged = crate::euclidean_interlocking(vec![firsts.clone(), seconds.clone()]);
        assert_eq!(merged.len(), firsts.len() + seconds.len());
    }
}
