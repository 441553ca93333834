use std::collections::{BTreeSet, HashMap, VecDeque};

use crate::nfa::Nfa;

use super::{Dfa, DfaState};

/// Subset construction: powerset-constructs a DFA from an NFA by tracking,
/// for each reachable DFA state, the ε-closed set of NFA states it stands
/// for. Two DFA states are the same state iff their
/// name sets are equal, so the name set doubles as the dedup key while the
/// worklist is being drained.
pub fn subset_construct(nfa: &Nfa, alphabet: &[char]) -> Dfa {
    let mut states: Vec<DfaState> = Vec::new();
    let mut index_of: HashMap<BTreeSet<usize>, usize> = HashMap::new();
    let mut worklist: VecDeque<usize> = VecDeque::new();

    let start_set = nfa.epsilon_closure(&BTreeSet::from([nfa.start()]));
    let start = new_state(&mut states, start_set.clone(), nfa);
    index_of.insert(start_set, start);
    worklist.push_back(start);

    while let Some(d) = worklist.pop_front() {
        let name_set = states[d].name_set.clone();
        for &c in alphabet {
            let moved = nfa.mv(&name_set, c);
            if moved.is_empty() {
                continue;
            }
            let target_set = nfa.epsilon_closure(&moved);
            let target = match index_of.get(&target_set) {
                Some(&idx) => idx,
                None => {
                    let idx = new_state(&mut states, target_set.clone(), nfa);
                    index_of.insert(target_set, idx);
                    worklist.push_back(idx);
                    idx
                }
            };
            states[d].transitions.insert(c, target);
        }
    }

    Dfa { states, start }
}

fn new_state(states: &mut Vec<DfaState>, name_set: BTreeSet<usize>, nfa: &Nfa) -> usize {
    let id = states.len();
    let is_final = name_set.iter().any(|&s| nfa.states()[s].is_final);
    states.push(DfaState {
        id,
        is_final,
        transitions: HashMap::new(),
        name_set,
    });
    id
}
