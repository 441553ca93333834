use std::collections::{HashMap, HashSet};

use crate::union_find::UnionFind;

use super::{Dfa, DfaState};

/// Table-filling distinguishability + union-find partition recovery (spec
/// component D). Works entirely in terms of positions `0..n` over the
/// sorted, reachable subset of `dfa`'s states; pairs are always canonicalized
/// to `(min, max)` so the table is symmetric by construction.
pub fn minimize(dfa: &Dfa, alphabet: &[char]) -> Dfa {
    let mut ids: Vec<usize> = dfa.reachable_states().into_iter().collect();
    ids.sort_unstable();
    let n = ids.len();
    let pos = |id: usize| ids.binary_search(&id).expect("id is reachable");
    let pair_key = |a: usize, b: usize| if a < b { (a, b) } else { (b, a) };

    let mut distinguishable: HashSet<(usize, usize)> = HashSet::new();
    for i in 0..n {
        for j in (i + 1)..n {
            if dfa.states()[ids[i]].is_final != dfa.states()[ids[j]].is_final {
                distinguishable.insert((i, j));
            }
        }
    }

    let mut changed = true;
    while changed {
        changed = false;
        for i in 0..n {
            for j in (i + 1)..n {
                if distinguishable.contains(&(i, j)) {
                    continue;
                }
                let mut mark = false;
                for &c in alphabet {
                    let pi = dfa.transition(ids[i], c);
                    let pj = dfa.transition(ids[j], c);
                    mark = match (pi, pj) {
                        (Some(p), Some(q)) => {
                            p != q && distinguishable.contains(&pair_key(pos(p), pos(q)))
                        }
                        (None, None) => false,
                        _ => true,
                    };
                    if mark {
                        break;
                    }
                }
                if mark {
                    distinguishable.insert((i, j));
                    changed = true;
                }
            }
        }
    }

    let mut uf = UnionFind::new(n);
    for i in 0..n {
        for j in (i + 1)..n {
            if !distinguishable.contains(&(i, j)) {
                uf.union(i, j);
            }
        }
    }

    // Representative of each class: the member with the lowest original id.
    let mut class_rep: HashMap<usize, usize> = HashMap::new();
    for i in 0..n {
        let root = uf.find(i);
        class_rep
            .entry(root)
            .and_modify(|rep: &mut usize| {
                if ids[i] < ids[*rep] {
                    *rep = i;
                }
            })
            .or_insert(i);
    }

    // Assign new, contiguous ids ordered by each class's representative's
    // original id, so minimization is deterministic and numbering stays
    // stable under re-minimizing an already-minimal DFA.
    let mut roots: Vec<usize> = class_rep.keys().copied().collect();
    roots.sort_by_key(|&r| ids[class_rep[&r]]);
    let new_id_of_root: HashMap<usize, usize> = roots
        .iter()
        .enumerate()
        .map(|(new_id, &root)| (root, new_id))
        .collect();

    let mut new_states = Vec::with_capacity(roots.len());
    for &root in &roots {
        let rep_pos = class_rep[&root];
        let rep_id = ids[rep_pos];
        let rep_state: &DfaState = &dfa.states()[rep_id];

        let mut transitions = HashMap::new();
        for (&c, &target) in rep_state.transitions() {
            let target_root = uf.find(pos(target));
            transitions.insert(c, new_id_of_root[&target_root]);
        }

        // Every other member of this class must agree with the
        // representative on where each symbol leads (modulo which class
        // that target itself falls in) — that's exactly what "unmarked
        // pair" is supposed to guarantee. Cheap enough to check eagerly.
        #[cfg(debug_assertions)]
        for i in 0..n {
            if uf.find(i) != root || i == rep_pos {
                continue;
            }
            let member_state = &dfa.states()[ids[i]];
            for &c in alphabet {
                let member_target = member_state.transitions().get(&c).copied();
                let rep_target = rep_state.transitions().get(&c).copied();
                let member_class = member_target.map(|t| uf.find(pos(t)));
                let rep_class = rep_target.map(|t| uf.find(pos(t)));
                debug_assert_eq!(
                    member_class, rep_class,
                    "table-filling marked states {} and {} equivalent but they disagree on '{}'",
                    ids[rep_pos], ids[i], c
                );
            }
        }

        new_states.push(DfaState {
            id: new_id_of_root[&root],
            is_final: rep_state.is_final,
            transitions,
            name_set: rep_state.name_set().clone(),
        });
    }

    let start_root = uf.find(pos(dfa.start()));
    let new_start = new_id_of_root[&start_root];

    Dfa {
        states: new_states,
        start: new_start,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dfa::subset_construct;
    use crate::nfa::Nfa;
    use crate::regex::to_postfix;

    fn compile_and_minimize(source: &str, alphabet: &[char]) -> Dfa {
        let nfa = Nfa::from_postfix(&to_postfix(source).unwrap()).unwrap();
        let dfa = subset_construct(&nfa, alphabet);
        dfa.minimize(alphabet)
    }

    #[test]
    fn star_over_alternation_minimizes_to_one_state() {
        let dfa = compile_and_minimize("(a|b)*", &['a', 'b']);
        assert_eq!(dfa.states().len(), 1);
        assert!(dfa.accepts(""));
        assert!(dfa.accepts("abba"));
    }

    #[test]
    fn single_literal_minimizes_to_two_states() {
        let dfa = compile_and_minimize("a", &['a']);
        assert_eq!(dfa.states().len(), 2);
    }

    #[test]
    fn minimization_preserves_language() {
        for (source, alphabet) in [
            ("ab|ac", vec!['a', 'b', 'c']),
            ("a(b|c)*d", vec!['a', 'b', 'c', 'd']),
            ("a?b+", vec!['a', 'b']),
        ] {
            let nfa = Nfa::from_postfix(&to_postfix(source).unwrap()).unwrap();
            let before = subset_construct(&nfa, &alphabet);
            let after = before.minimize(&alphabet);
            for word in ["", "a", "b", "ab", "abc", "aabbcc", "abcd", "ad"] {
                assert_eq!(
                    before.accepts(word),
                    after.accepts(word),
                    "minimize changed acceptance of {word:?} for {source}"
                );
            }
        }
    }

    #[test]
    fn minimize_is_idempotent() {
        let dfa = compile_and_minimize("(a|b)*abb", &['a', 'b']);
        let twice = dfa.minimize(&['a', 'b']);
        assert_eq!(dfa.states().len(), twice.states().len());
    }
}
