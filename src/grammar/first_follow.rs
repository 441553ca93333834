use std::collections::{HashMap, HashSet};

use super::{Grammar, Symbol};

#[derive(Debug, Clone)]
pub struct FirstFollow {
    pub first: HashMap<Symbol, HashSet<Symbol>>,
    pub follow: HashMap<Symbol, HashSet<Symbol>>,
}

/// Computes FIRST and FOLLOW for `grammar` by iterating both rules to a
/// monotone set-union fixed point — the same "worklist until nothing
/// changes" shape `dfa::subset_construct` and `dfa::minimize` use for their
/// own fixed points, just over grammar symbols instead of automaton states.
pub fn compute(grammar: &Grammar) -> FirstFollow {
    let first = compute_first(grammar);
    let follow = compute_follow(grammar, &first);
    FirstFollow { first, follow }
}

fn compute_first(grammar: &Grammar) -> HashMap<Symbol, HashSet<Symbol>> {
    let mut first: HashMap<Symbol, HashSet<Symbol>> = HashMap::new();
    for t in &grammar.terminals {
        first.insert(t.clone(), HashSet::from([t.clone()]));
    }
    for nt in &grammar.non_terminals {
        first.entry(nt.clone()).or_default();
    }

    let mut changed = true;
    while changed {
        changed = false;
        for p in &grammar.productions {
            if p.rhs.len() == 1 && p.rhs[0].is_epsilon() {
                changed |= first.get_mut(&p.lhs).unwrap().insert(Symbol::epsilon());
                continue;
            }

            let mut all_nullable = true;
            for sym in &p.rhs {
                let sym_first = first.get(sym).cloned().unwrap_or_default();
                for s in sym_first.iter().filter(|s| !s.is_epsilon()) {
                    changed |= first.get_mut(&p.lhs).unwrap().insert(s.clone());
                }
                if !sym_first.iter().any(Symbol::is_epsilon) {
                    all_nullable = false;
                    break;
                }
            }
            if all_nullable {
                changed |= first.get_mut(&p.lhs).unwrap().insert(Symbol::epsilon());
            }
        }
    }
    first
}

/// FIRST of a symbol sequence: the union of FIRST(X_i) (minus ε) up to and
/// including the first X_i whose FIRST set doesn't contain ε, plus ε itself
/// if every symbol in the sequence is nullable (vacuously true for the
/// empty sequence).
fn first_of_sequence(
    first: &HashMap<Symbol, HashSet<Symbol>>,
    seq: &[Symbol],
) -> (HashSet<Symbol>, bool) {
    let mut result = HashSet::new();
    for sym in seq {
        let sym_first = first.get(sym).cloned().unwrap_or_default();
        result.extend(sym_first.iter().filter(|s| !s.is_epsilon()).cloned());
        if !sym_first.iter().any(Symbol::is_epsilon) {
            return (result, false);
        }
    }
    (result, true)
}

fn compute_follow(
    grammar: &Grammar,
    first: &HashMap<Symbol, HashSet<Symbol>>,
) -> HashMap<Symbol, HashSet<Symbol>> {
    let mut follow: HashMap<Symbol, HashSet<Symbol>> = HashMap::new();
    for nt in &grammar.non_terminals {
        follow.entry(nt.clone()).or_default();
    }
    follow
        .entry(grammar.start.clone())
        .or_default()
        .insert(Symbol::end_marker());

    let mut changed = true;
    while changed {
        changed = false;
        for p in &grammar.productions {
            for (i, xi) in p.rhs.iter().enumerate() {
                if !grammar.non_terminals.contains(xi) {
                    continue;
                }
                let (beta_first, beta_nullable) = first_of_sequence(first, &p.rhs[i + 1..]);
                for s in beta_first {
                    changed |= follow.get_mut(xi).unwrap().insert(s);
                }
                if beta_nullable {
                    let lhs_follow = follow.get(&p.lhs).cloned().unwrap_or_default();
                    for s in lhs_follow {
                        changed |= follow.get_mut(xi).unwrap().insert(s);
                    }
                }
            }
        }
    }
    follow
}
