//! Property-based tests that exercise the whole pipeline together:
//! differential-checked against the `regex` crate and fuzzed with
//! `proptest`. Per-module unit tests live next to the code they cover;
//! this module is for properties that only make sense end-to-end.

use std::collections::HashSet;

use proptest::prelude::*;
use rand::seq::SliceRandom;
use rand::thread_rng;
use regex::Regex as LibRegex;

use crate::dfa::subset_construct;
use crate::nfa::Nfa;
use crate::regex::to_postfix;
use crate::tokenizer::Tokenizer;

const ALPHABET: &[char] = &['a', 'b', 'c'];

/// A small recursive regex generator favoring the constructs the rewriter
/// and builder actually have to handle: literals, grouped alternation, and
/// both postfix repetition operators.
fn arb_regex() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![Just("a".to_string()), Just("b".to_string()), Just("c".to_string())];
    leaf.prop_recursive(4, 16, 4, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("{a}{b}")),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("({a}|{b})")),
            inner.clone().prop_map(|a| format!("({a})*")),
            inner.prop_map(|a| format!("({a})+")),
        ]
    })
}

fn arb_word() -> impl Strategy<Value = String> {
    proptest::collection::vec(prop_oneof![Just('a'), Just('b'), Just('c')], 0..8)
        .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    /// Stripping every inserted `·` out of the rewritten form always
    /// reproduces the original source, for arbitrary generated regexes too
    /// (not just the handful of examples in `regex::tests`).
    #[test]
    fn round_trip_holds_for_generated_regexes(source in arb_regex()) {
        let rewritten = crate::regex::insert_concatenation_str(&source);
        let stripped: String = rewritten.chars().filter(|&c| c != '·').collect();
        prop_assert_eq!(stripped, source);
    }

    /// Minimizing never changes which strings a DFA accepts.
    #[test]
    fn minimize_preserves_language(source in arb_regex(), word in arb_word()) {
        let postfix = to_postfix(&source).unwrap();
        let nfa = Nfa::from_postfix(&postfix).unwrap();
        let before = subset_construct(&nfa, ALPHABET);
        let after = before.minimize(ALPHABET);
        prop_assert_eq!(before.accepts(&word), after.accepts(&word));
    }

    /// Minimizing a DFA twice is the same as minimizing it once: the
    /// partition recovered from an already-minimal DFA is the identity.
    #[test]
    fn minimize_is_idempotent(source in arb_regex()) {
        let postfix = to_postfix(&source).unwrap();
        let nfa = Nfa::from_postfix(&postfix).unwrap();
        let once = subset_construct(&nfa, ALPHABET).minimize(ALPHABET);
        let twice = once.minimize(ALPHABET);
        prop_assert_eq!(once.states().len(), twice.states().len());
    }

    /// Differential test against the `regex` crate: every word this
    /// crate's pipeline accepts, `regex::Regex` anchored the same way also
    /// accepts, and vice versa.
    #[test]
    fn agrees_with_library_regex(source in arb_regex(), word in arb_word()) {
        let postfix = to_postfix(&source).unwrap();
        let nfa = Nfa::from_postfix(&postfix).unwrap();
        let dfa = subset_construct(&nfa, ALPHABET).minimize(ALPHABET);

        let anchored = format!("^({source})$");
        let Ok(library) = LibRegex::new(&anchored) else {
            // A handful of generated strings (e.g. unbounded nesting depth)
            // can still trip the library's own complexity limits; skip
            // those rather than asserting anything about them.
            return Ok(());
        };

        prop_assert_eq!(dfa.accepts(&word), library.is_match(&word));
    }

    /// A tokenizer never returns a token shorter than the shortest rule
    /// that could have matched at that position, and it never splits a
    /// maximal run that a single rule's DFA would have consumed whole.
    #[test]
    fn tokenizer_always_prefers_the_longest_available_match(word in arb_word()) {
        prop_assume!(!word.is_empty());
        let alphabet: Vec<char> = ALPHABET.to_vec();
        let mut tokenizer = Tokenizer::new();
        tokenizer.add_rule("a", "A", &alphabet, 0).unwrap();
        tokenizer.add_rule("(a)+", "AS", &alphabet, 0).unwrap();

        if let Ok(tokens) = tokenizer.tokenize(&word) {
            let run_of_as = word.chars().take_while(|&c| c == 'a').count();
            if run_of_as > 0 {
                prop_assert_eq!(tokens[0].value.len(), run_of_as);
            }
        }
    }
}

#[test]
fn tokenizer_handles_every_character_of_a_shuffled_alphabet() {
    // Uses `rand` directly rather than a `proptest` strategy, since all
    // that's needed here is one shuffled order, not a shrinkable input.
    let mut alphabet: Vec<char> = ('a'..='j').collect();
    alphabet.shuffle(&mut thread_rng());

    let mut tokenizer = Tokenizer::new();
    for &c in &alphabet {
        tokenizer
            .add_rule(&c.to_string(), c.to_string(), &alphabet, 0)
            .unwrap();
    }

    let word: String = alphabet.iter().collect();
    let tokens = tokenizer.tokenize(&word).unwrap();
    let seen: HashSet<char> = tokens.iter().map(|t| t.value.chars().next().unwrap()).collect();
    assert_eq!(seen, alphabet.iter().copied().collect());
}
