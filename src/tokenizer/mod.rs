//! Longest-match / highest-priority tokenizer: holds one minimized DFA per
//! rule and, at each cursor position, runs every rule against the
//! remaining input, keeping whichever produces the longest match (ties
//! broken by priority, then by registration order).

use thiserror::Error;

use crate::dfa::Dfa;
use crate::{compile, CompileError};

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum LexError {
    #[error("unrecognized character '{character}' at position {position}")]
    Unrecognized { position: usize, character: char },
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("failed to compile rule for token type '{token_type}': {source}")]
pub struct RuleCompileError {
    pub token_type: String,
    #[source]
    pub source: CompileError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub token_type: String,
    pub value: String,
    pub position: usize,
}

pub struct Rule {
    dfa: Dfa,
    token_type: String,
    priority: i64,
    registration_order: usize,
}

impl Rule {
    pub fn dfa(&self) -> &Dfa {
        &self.dfa
    }

    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    pub fn priority(&self) -> i64 {
        self.priority
    }

    /// Walks `self.dfa` from `start`, returning the length of the longest
    /// prefix of `chars[start..]` that lands on a final state. Stops the
    /// instant the current character has no transition, rather than
    /// continuing to scan past a point the DFA can no longer follow.
    fn longest_match(&self, chars: &[char], start: usize) -> Option<usize> {
        let mut state = self.dfa.start();
        // A nullable rule body (`a*`, `a?`, ...) makes the start state
        // final, but a zero-length match is never a candidate — only a
        // final state reached after consuming at least one character
        // counts.
        let mut best = None;

        let mut consumed = 0;
        while start + consumed < chars.len() {
            match self.dfa.transition(state, chars[start + consumed]) {
                Some(next) => {
                    state = next;
                    consumed += 1;
                    if self.dfa.states()[state].is_final {
                        best = Some(consumed);
                    }
                }
                None => break,
            }
        }
        best
    }
}

#[derive(Default)]
pub struct Tokenizer {
    rules: Vec<Rule>,
    next_registration_order: usize,
}

impl Tokenizer {
    pub fn new() -> Self {
        Tokenizer {
            rules: Vec::new(),
            next_registration_order: 0,
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Registers a rule from an already-compiled DFA.
    pub fn add_compiled_rule(&mut self, dfa: Dfa, token_type: impl Into<String>, priority: i64) {
        let registration_order = self.next_registration_order;
        self.next_registration_order += 1;
        self.rules.push(Rule {
            dfa,
            token_type: token_type.into(),
            priority,
            registration_order,
        });
        self.sort_rules();
    }

    /// Compiles `source` (regex → postfix → NFA → DFA → minimized DFA) and
    /// registers it as a rule. The token type is threaded into any
    /// compilation failure so callers can tell which rule definition is at
    /// fault.
    pub fn add_rule(
        &mut self,
        source: &str,
        token_type: impl Into<String>,
        alphabet: &[char],
        priority: i64,
    ) -> Result<(), RuleCompileError> {
        let token_type = token_type.into();
        let dfa = compile(source, alphabet).map_err(|source| RuleCompileError {
            token_type: token_type.clone(),
            source,
        })?;
        self.add_compiled_rule(dfa, token_type, priority);
        Ok(())
    }

    fn sort_rules(&mut self) {
        // Descending priority, then ascending registration order. scan_one
        // then only needs to keep the first rule it sees at the longest
        // match length for the priority/registration tie-break to fall out
        // for free.
        self.rules.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then(a.registration_order.cmp(&b.registration_order))
        });
    }

    /// Scans `input` left to right into a flat token stream.
    ///
    /// # Errors
    /// [`LexError::Unrecognized`] as soon as no rule produces any match —
    /// not even a zero-length one — at the current cursor position.
    pub fn tokenize(&self, input: &str) -> Result<Vec<Token>, LexError> {
        let chars: Vec<char> = input.chars().collect();
        let mut tokens = Vec::new();
        let mut i = 0;

        while i < chars.len() {
            match self.scan_one(&chars, i) {
                Some((token_type, length)) => {
                    let value: String = chars[i..i + length].iter().collect();
                    tokens.push(Token {
                        token_type: token_type.to_string(),
                        value,
                        position: i,
                    });
                    i += length;
                }
                None => {
                    return Err(LexError::Unrecognized {
                        position: i,
                        character: chars[i],
                    })
                }
            }
        }

        Ok(tokens)
    }

    fn scan_one(&self, chars: &[char], start: usize) -> Option<(&str, usize)> {
        let mut best: Option<(&str, usize)> = None;
        for rule in &self.rules {
            if let Some(length) = rule.longest_match(chars, start) {
                let better = match best {
                    None => true,
                    Some((_, best_len)) => length > best_len,
                };
                if better {
                    best = Some((rule.token_type.as_str(), length));
                }
            }
        }
        best
    }
}
