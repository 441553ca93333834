//! # lexforge
//!
//! `lexforge` is the core of a lexical-analysis toolkit: it compiles a set of
//! regular-expression rules into composite deterministic finite automata and
//! uses them to tokenize input text under a longest-match / highest-priority
//! discipline.
//!
//! ## Pipeline
//!
//! Compiling one rule walks four tightly coupled stages:
//!
//! 1. [`regex`] rewrites the rule's infix regex into postfix form with
//!    explicit concatenation, using the Shunting Yard algorithm.
//! 2. [`nfa`] runs Thompson's construction over the postfix form to build an
//!    ε-NFA.
//! 3. [`dfa::subset_construct`] powerset-constructs a DFA from that NFA.
//! 4. [`dfa::Dfa::minimize`] collapses behaviorally-equivalent states with a
//!    table-filling algorithm and union-find partition recovery.
//!
//! [`compile`] runs all four stages and is what [`tokenizer::Tokenizer::add_rule`]
//! uses internally; it is also exposed directly for callers that want a
//! minimized [`dfa::Dfa`] without going through the tokenizer.
//!
//! [`tokenizer::Tokenizer`] holds one minimized DFA per rule and scans input
//! left to right, at each position running every rule's DFA and keeping the
//! longest match (ties broken by priority, then registration order).
//!
//! A separate, self-contained component, [`grammar`], computes FIRST and
//! FOLLOW sets for a context-free grammar by iterating a monotone set-union
//! fixed point — unrelated to lexing, but built from the same "iterate to
//! convergence over a symbolic domain" shape as subset construction and
//! minimization.
//!
//! ## Example
//! ```
//! use lexforge::tokenizer::Tokenizer;
//!
//! let mut alphabet = ('a'..='z').collect::<Vec<_>>();
//! alphabet.push('=');
//!
//! let mut tokenizer = Tokenizer::new();
//! tokenizer
//!     .add_rule("if", "IF", &alphabet, 10)
//!     .unwrap();
//! tokenizer
//!     .add_rule("x", "ID_X", &alphabet, 0)
//!     .unwrap();
//!
//! let tokens = tokenizer.tokenize("ifx").unwrap();
//! assert_eq!(tokens.len(), 2);
//! assert_eq!(tokens[0].token_type, "IF");
//! assert_eq!(tokens[1].token_type, "ID_X");
//! ```
//!
//! ## Out of scope
//!
//! The token-rule registration facade, priority-assignment policy, exception
//! reporting surfaces, and CLI/test-harness glue are external collaborators
//! that consume the interfaces exposed here; they are not part of this
//! crate.
//!
//! Unicode-class escapes, anchors, backreferences, capturing groups, lazy
//! quantifiers, and character classes (`[…]`) are not supported by the regex
//! surface syntax. Regex syntax is limited to literal operands, grouping
//! `( )`, alternation `|`, and the postfix operators `*`, `+`, `?`. The
//! tokenizer never skips whitespace implicitly.

pub mod dfa;
pub mod grammar;
pub mod nfa;
pub mod regex;
pub mod tokenizer;
#[cfg(test)]
mod tests;
mod union_find;

use thiserror::Error;

/// Everything that can go wrong while turning one rule's regex source into a
/// minimized DFA: either the rewriter rejected the source, or the builder
/// couldn't assemble the resulting postfix form into a single NFA fragment.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum CompileError {
    #[error(transparent)]
    Regex(#[from] regex::RegexError),
    #[error(transparent)]
    Build(#[from] nfa::BuildError),
}

/// Runs the full regex → postfix → NFA → DFA → minimized-DFA pipeline for
/// one rule body.
///
/// `alphabet` must list every character the resulting DFA should have an
/// opinion about; subset construction and minimization both iterate it
/// directly, so characters outside it are simply never matched.
pub fn compile(source: &str, alphabet: &[char]) -> Result<dfa::Dfa, CompileError> {
    let postfix = regex::to_postfix(source)?;
    let nfa = nfa::Nfa::from_postfix(&postfix)?;
    let dfa = dfa::subset_construct(&nfa, alphabet);
    Ok(dfa.minimize(alphabet))
}
