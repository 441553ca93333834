//! FIRST/FOLLOW computation for context-free grammars. Self-contained:
//! shares no types with the lexer pipeline beyond the
//! general "iterate a monotone fixed point over sets" shape subset
//! construction and minimization both also use.

mod first_follow;

use std::collections::HashSet;

use thiserror::Error;

pub use first_follow::{compute, FirstFollow};

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum GrammarError {
    #[error("start symbol is not a declared non-terminal")]
    MissingStartSymbol,
}

/// A terminal or non-terminal. `ε` and the end-of-input marker `$` are both
/// modeled as terminals so they can sit inside FIRST/FOLLOW sets alongside
/// ordinary terminals without a third enum arm every consumer has to match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    Terminal(String),
    NonTerminal(String),
}

impl Symbol {
    pub fn terminal(name: impl Into<String>) -> Self {
        Symbol::Terminal(name.into())
    }

    pub fn non_terminal(name: impl Into<String>) -> Self {
        Symbol::NonTerminal(name.into())
    }

    pub fn epsilon() -> Self {
        Symbol::Terminal("ε".to_string())
    }

    pub fn end_marker() -> Self {
        Symbol::Terminal("$".to_string())
    }

    pub fn is_epsilon(&self) -> bool {
        matches!(self, Symbol::Terminal(s) if s == "ε")
    }
}

/// `lhs -> rhs`. An ε-production is represented as `rhs == [Symbol::epsilon()]`
/// rather than an empty vector, so every production always has at least one
/// right-hand-side symbol to inspect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Production {
    pub lhs: Symbol,
    pub rhs: Vec<Symbol>,
}

impl Production {
    pub fn new(lhs: Symbol, rhs: Vec<Symbol>) -> Self {
        Production { lhs, rhs }
    }
}

#[derive(Debug, Clone)]
pub struct Grammar {
    pub terminals: HashSet<Symbol>,
    pub non_terminals: HashSet<Symbol>,
    pub productions: Vec<Production>,
    pub start: Symbol,
}

impl Grammar {
    /// # Errors
    /// [`GrammarError::MissingStartSymbol`] if `start` is not present in
    /// `non_terminals` — FIRST/FOLLOW needs a well-defined start symbol to
    /// seed FOLLOW with the end marker.
    pub fn new(
        terminals: HashSet<Symbol>,
        non_terminals: HashSet<Symbol>,
        productions: Vec<Production>,
        start: Symbol,
    ) -> Result<Self, GrammarError> {
        if !non_terminals.contains(&start) {
            return Err(GrammarError::MissingStartSymbol);
        }
        Ok(Grammar {
            terminals,
            non_terminals,
            productions,
            start,
        })
    }
}
