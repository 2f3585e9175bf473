use serde::{Deserialize, Serialize};

/// Default nesting allowed for pseudo-class arguments that are themselves selectors.
pub const DEFAULT_RECURSION_LIMIT: usize = 32;

/// How literal values are embedded into generated XPath.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LiteralQuoting {
    /// Always `"value"`, with no escaping. A value containing `"` yields broken XPath.
    #[default]
    Verbatim,
    /// `"value"`, `'value'`, or `concat(...)` when the value holds both quote kinds.
    Escaped,
}

/// How the general-sibling combinator `~` is compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GeneralSibling {
    /// Same as `+`: `following-sibling::tag[1]`.
    #[default]
    FirstOnly,
    /// Any later sibling: `following-sibling::tag`.
    AnyFollowing,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CompileOptions {
    pub literal_quoting: LiteralQuoting,
    pub general_sibling: GeneralSibling,
    pub recursion_limit: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            literal_quoting: LiteralQuoting::default(),
            general_sibling: GeneralSibling::default(),
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }
}

impl CompileOptions {
    pub fn with_literal_quoting(mut self, quoting: LiteralQuoting) -> Self {
        self.literal_quoting = quoting;
        self
    }

    pub fn with_general_sibling(mut self, general_sibling: GeneralSibling) -> Self {
        self.general_sibling = general_sibling;
        self
    }

    pub fn with_recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = limit;
        self
    }

    /// Stable text that distinguishes option sets in cache keys.
    pub fn fingerprint(&self) -> String {
        let quoting = match self.literal_quoting {
            LiteralQuoting::Verbatim => 'v',
            LiteralQuoting::Escaped => 'e',
        };
        let sibling = match self.general_sibling {
            GeneralSibling::FirstOnly => 'f',
            GeneralSibling::AnyFollowing => 'a',
        };
        format!("{quoting}{sibling}{}", self.recursion_limit)
    }
}
