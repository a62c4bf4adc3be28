//! Variable-identifier grammar used by the dependency extractor.
//!
//! The extractor never matches identifiers itself. It asks a
//! [`VariableGrammar`] two questions per line: "which variable does this
//! line assign?" and "which variables does this expression read?". The
//! default grammar, [`IndexedVariables`], recognises `x` followed by one or
//! more decimal digits (`x1`, `x12`). [`PatternGrammar`] accepts any
//! identifier regex, e.g. for multi-letter names.

use std::sync::OnceLock;

use regex::Regex;

/// Identifier grammar for equation lines of the form `<target> = <expr>`.
pub trait VariableGrammar {
    /// Return the variable assigned by `line`, or `None` if the line is not
    /// an equation. Only the left-hand side is inspected.
    fn assignment_target<'a>(&self, line: &'a str) -> Option<&'a str>;

    /// Return every variable referenced in `expr`, in order of appearance.
    /// Repeated references are reported each time they occur.
    fn references<'a>(&self, expr: &'a str) -> Vec<&'a str>;
}

// ---------------------------------------------------------------------------
// IndexedVariables
// ---------------------------------------------------------------------------

/// The `x<digits>` grammar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexedVariables;

fn assignment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*(x[0-9]+)\s*=").expect("assignment pattern is valid"))
}

fn reference_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(x[0-9]+)\b").expect("reference pattern is valid"))
}

impl VariableGrammar for IndexedVariables {
    fn assignment_target<'a>(&self, line: &'a str) -> Option<&'a str> {
        assignment_re()
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    fn references<'a>(&self, expr: &'a str) -> Vec<&'a str> {
        reference_re()
            .find_iter(expr)
            .map(|m| m.as_str())
            .collect()
    }
}

/// Return the digit suffix of an indexed variable name (`"x12"` → `"12"`).
///
/// Returns `None` unless `name` is exactly `x` followed by one or more
/// ASCII digits.
#[must_use]
pub fn indexed_digits(name: &str) -> Option<&str> {
    name.strip_prefix('x')
        .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

// ---------------------------------------------------------------------------
// PatternGrammar
// ---------------------------------------------------------------------------

/// A grammar built from an arbitrary identifier pattern.
///
/// The pattern must describe a single identifier without anchors, e.g.
/// `[A-Za-z][A-Za-z0-9_]*`. It is wrapped in word boundaries for
/// references and anchored at line start for assignments.
#[derive(Debug, Clone)]
pub struct PatternGrammar {
    assignment: Regex,
    reference: Regex,
}

impl PatternGrammar {
    /// Compile a grammar from an identifier pattern.
    ///
    /// # Errors
    ///
    /// Returns the regex compile error if `identifier` is not a valid pattern.
    pub fn new(identifier: &str) -> Result<Self, regex::Error> {
        let assignment = Regex::new(&format!(r"^\s*({identifier})\s*="))?;
        let reference = Regex::new(&format!(r"\b({identifier})\b"))?;
        Ok(Self {
            assignment,
            reference,
        })
    }
}

impl VariableGrammar for PatternGrammar {
    fn assignment_target<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.assignment
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    fn references<'a>(&self, expr: &'a str) -> Vec<&'a str> {
        self.reference
            .captures_iter(expr)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .collect()
    }
}
