//! Deterministic finite automata: the product of subset construction
//! ([`subset_construct`]) and, optionally, [`minimize`](Dfa::minimize).
//!
//! As with [`crate::nfa`], states live in a flat arena addressed by
//! `usize` index. A missing transition simply denotes rejection on that
//! character — there is no materialized dead/trap state, so minimization
//! never has to special-case one.

mod minimize;
mod subset;

use std::collections::{BTreeSet, HashMap, VecDeque};

pub use subset::subset_construct;

#[derive(Debug, Clone)]
pub struct DfaState {
    pub id: usize,
    pub is_final: bool,
    transitions: HashMap<char, usize>,
    /// The NFA state-ids this DFA state was built from during subset
    /// construction. Authoritative only up to the point a `Dfa` is handed
    /// to [`Dfa::minimize`]; after minimization a state's name set is
    /// inherited from its class representative and no longer corresponds
    /// to any single subset-construction step.
    name_set: BTreeSet<usize>,
}

impl DfaState {
    pub fn transitions(&self) -> &HashMap<char, usize> {
        &self.transitions
    }

    pub fn name_set(&self) -> &BTreeSet<usize> {
        &self.name_set
    }
}

#[derive(Debug, Clone)]
pub struct Dfa {
    states: Vec<DfaState>,
    start: usize,
}

impl Dfa {
    pub fn states(&self) -> &[DfaState] {
        &self.states
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn transition(&self, state: usize, c: char) -> Option<usize> {
        self.states[state].transitions.get(&c).copied()
    }

    /// Every state reachable from the start state.
    pub fn reachable_states(&self) -> BTreeSet<usize> {
        let mut seen = BTreeSet::from([self.start]);
        let mut worklist = VecDeque::from([self.start]);
        while let Some(s) = worklist.pop_front() {
            for &target in self.states[s].transitions.values() {
                if seen.insert(target) {
                    worklist.push_back(target);
                }
            }
        }
        seen
    }

    /// States no walk from the start state can ever reach.
    pub fn unreachable_states(&self) -> BTreeSet<usize> {
        let reachable = self.reachable_states();
        self.states
            .iter()
            .map(|s| s.id)
            .filter(|id| !reachable.contains(id))
            .collect()
    }

    /// Simulates the DFA over `input` from the start state; `true` iff the
    /// state reached after consuming every character is final. Rejects as
    /// soon as a character has no transition, consistent with the
    /// tokenizer's own longest-match walk.
    pub fn accepts(&self, input: &str) -> bool {
        let mut state = self.start;
        for c in input.chars() {
            match self.transition(state, c) {
                Some(next) => state = next,
                None => return false,
            }
        }
        self.states[state].is_final
    }

    /// Table-filling minimization: builds a
    /// distinguishability table over all pairs of reachable states, iterates
    /// it to a fixed point, then recovers the resulting equivalence classes
    /// with a union-find and rebuilds a fresh, minimal `Dfa` from them.
    /// Unreachable states are dropped first — table-filling only produces a
    /// meaningful answer among states a walk from the start can actually
    /// reach.
    pub fn minimize(&self, alphabet: &[char]) -> Dfa {
        minimize::minimize(self, alphabet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nfa::Nfa;
    use crate::regex::to_postfix;

    fn compile(source: &str, alphabet: &[char]) -> Dfa {
        let nfa = Nfa::from_postfix(&to_postfix(source).unwrap()).unwrap();
        subset_construct(&nfa, alphabet)
    }

    #[test]
    fn accepts_matches_literal() {
        let dfa = compile("ab", &['a', 'b']);
        assert!(dfa.accepts("ab"));
        assert!(!dfa.accepts("a"));
        assert!(!dfa.accepts("abc"));
    }

    #[test]
    fn accepts_star_matches_empty() {
        let dfa = compile("a*", &['a']);
        assert!(dfa.accepts(""));
        assert!(dfa.accepts("aaaa"));
        assert!(!dfa.accepts("b"));
    }

    #[test]
    fn reachable_states_excludes_none_when_fully_connected() {
        let dfa = compile("a|b", &['a', 'b']);
        assert!(dfa.unreachable_states().is_empty());
    }
}
