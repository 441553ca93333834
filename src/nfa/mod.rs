//! Thompson's construction: turns a postfix regex (see [`crate::regex`])
//! into an ε-NFA.
//!
//! States live in a flat arena (`Vec<NfaState>`) and are addressed by
//! `usize` index rather than by shared pointer — fragments under
//! construction are just pairs of indices into that arena, so splicing two
//! fragments together is adding a transition, never rewriting ownership.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::regex::PostfixToken;

#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum BuildError {
    /// The postfix token stream didn't reduce to exactly one NFA fragment —
    /// an operator ran out of operands, or literals were left over
    /// unconsumed on the fragment stack.
    #[error("postfix expression does not reduce to a single NFA fragment")]
    MalformedPostfix,
    /// A postfix operator the builder doesn't recognize. [`PostfixToken`] is
    /// an exhaustive enum, so every variant the rewriter can emit is handled
    /// above; this variant can never actually be constructed by
    /// [`Nfa::from_postfix`]. It documents, the same way the rewriter's own
    /// parenthesis check does, that the builder does not blindly trust its
    /// input — a bug-detection aid, not a reachable user-facing error.
    #[error("unknown postfix operator '{0}'")]
    UnknownOperator(char),
}

/// A single outgoing edge: `None` denotes an ε-transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub label: Option<char>,
    pub target: usize,
}

#[derive(Debug, Clone)]
pub struct NfaState {
    pub id: usize,
    pub is_final: bool,
    pub transitions: Vec<Transition>,
}

#[derive(Debug, Clone)]
pub struct Nfa {
    states: Vec<NfaState>,
    start: usize,
}

type Fragment = (usize, usize);

impl Nfa {
    pub fn states(&self) -> &[NfaState] {
        &self.states
    }

    pub fn start(&self) -> usize {
        self.start
    }

    /// Runs Thompson's construction over a postfix token stream.
    pub fn from_postfix(postfix: &[PostfixToken]) -> Result<Nfa, BuildError> {
        let mut states: Vec<NfaState> = Vec::new();
        let mut stack: Vec<Fragment> = Vec::new();

        let mut new_state = |states: &mut Vec<NfaState>| -> usize {
            let id = states.len();
            states.push(NfaState {
                id,
                is_final: false,
                transitions: Vec::new(),
            });
            id
        };

        for &token in postfix {
            match token {
                PostfixToken::Literal(c) => {
                    let s = new_state(&mut states);
                    let e = new_state(&mut states);
                    states[s].transitions.push(Transition {
                        label: Some(c),
                        target: e,
                    });
                    stack.push((s, e));
                }
                PostfixToken::Concat => {
                    let (b_s, b_e) = stack.pop().ok_or(BuildError::MalformedPostfix)?;
                    let (a_s, a_e) = stack.pop().ok_or(BuildError::MalformedPostfix)?;
                    states[a_e].transitions.push(Transition {
                        label: None,
                        target: b_s,
                    });
                    stack.push((a_s, b_e));
                }
                PostfixToken::Alt => {
                    let (b_s, b_e) = stack.pop().ok_or(BuildError::MalformedPostfix)?;
                    let (a_s, a_e) = stack.pop().ok_or(BuildError::MalformedPostfix)?;
                    let s = new_state(&mut states);
                    let e = new_state(&mut states);
                    states[s].transitions.push(Transition {
                        label: None,
                        target: a_s,
                    });
                    states[s].transitions.push(Transition {
                        label: None,
                        target: b_s,
                    });
                    states[a_e].transitions.push(Transition {
                        label: None,
                        target: e,
                    });
                    states[b_e].transitions.push(Transition {
                        label: None,
                        target: e,
                    });
                    stack.push((s, e));
                }
                PostfixToken::Star => {
                    let (a_s, a_e) = stack.pop().ok_or(BuildError::MalformedPostfix)?;
                    let s = new_state(&mut states);
                    let e = new_state(&mut states);
                    states[s].transitions.push(Transition {
                        label: None,
                        target: a_s,
                    });
                    states[s].transitions.push(Transition {
                        label: None,
                        target: e,
                    });
                    states[a_e].transitions.push(Transition {
                        label: None,
                        target: a_s,
                    });
                    states[a_e].transitions.push(Transition {
                        label: None,
                        target: e,
                    });
                    stack.push((s, e));
                }
                PostfixToken::Plus => {
                    let (a_s, a_e) = stack.pop().ok_or(BuildError::MalformedPostfix)?;
                    let s = new_state(&mut states);
                    let e = new_state(&mut states);
                    states[s].transitions.push(Transition {
                        label: None,
                        target: a_s,
                    });
                    states[a_e].transitions.push(Transition {
                        label: None,
                        target: a_s,
                    });
                    states[a_e].transitions.push(Transition {
                        label: None,
                        target: e,
                    });
                    stack.push((s, e));
                }
                PostfixToken::Question => {
                    let (a_s, a_e) = stack.pop().ok_or(BuildError::MalformedPostfix)?;
                    let s = new_state(&mut states);
                    let e = new_state(&mut states);
                    states[s].transitions.push(Transition {
                        label: None,
                        target: a_s,
                    });
                    states[s].transitions.push(Transition {
                        label: None,
                        target: e,
                    });
                    states[a_e].transitions.push(Transition {
                        label: None,
                        target: e,
                    });
                    stack.push((s, e));
                }
            }
        }

        if stack.len() != 1 {
            return Err(BuildError::MalformedPostfix);
        }
        let (start, end) = stack[0];
        states[end].is_final = true;

        Ok(Nfa { states, start })
    }

    /// The set of states reachable from `seeds` by following only
    /// ε-transitions, including `seeds` itself.
    pub fn epsilon_closure(&self, seeds: &BTreeSet<usize>) -> BTreeSet<usize> {
        let mut closure = seeds.clone();
        let mut worklist: Vec<usize> = seeds.iter().copied().collect();
        while let Some(s) = worklist.pop() {
            for t in &self.states[s].transitions {
                if t.label.is_none() && closure.insert(t.target) {
                    worklist.push(t.target);
                }
            }
        }
        closure
    }

    /// `move(states, c)`: every state reachable from `states` by a single
    /// transition labeled `c`.
    pub fn mv(&self, states: &BTreeSet<usize>, c: char) -> BTreeSet<usize> {
        let mut result = BTreeSet::new();
        for &s in states {
            for t in &self.states[s].transitions {
                if t.label == Some(c) {
                    result.insert(t.target);
                }
            }
        }
        result
    }
}
