//! Ordered analysis diagnostics
//!
//! The analysis pipeline performs no rendering; it accumulates scoped text
//! messages in the order they were produced and hands them to the caller.
//! The scope carries the caller-supplied label plus the non-terminal or
//! stage the message belongs to, for presentation grouping only.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub scope: String,
    pub severity: Severity,
    pub message: String,
}

/// An append-only, ordered collection of diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics {
            entries: Vec::new(),
        }
    }

    pub fn info(&mut self, scope: impl Into<String>, message: impl Into<String>) {
        self.entries.push(Diagnostic {
            scope: scope.into(),
            severity: Severity::Info,
            message: message.into(),
        });
    }

    pub fn warning(&mut self, scope: impl Into<String>, message: impl Into<String>) {
        self.entries.push(Diagnostic {
            scope: scope.into(),
            severity: Severity::Warning,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_is_preserved() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.warning("a", "first");
        diagnostics.info("b", "second");
        diagnostics.warning("a", "third");

        let messages: Vec<&str> = diagnostics.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_warning_filter() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.info("x", "info");
        diagnostics.warning("x", "warn");

        assert_eq!(diagnostics.warnings().count(), 1);
        assert_eq!(diagnostics.len(), 2);
    }
}
