use std::fmt;
use std::sync::Arc;

use csspath_core::{ExpressionType, Segment};
use rowan::{TextRange, TextSize};

use super::cache::{CacheEntry, CacheKey, SelectorCache, global_cache};
use super::{CompileOptions, regex, xpath};
use crate::compile::Translator;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::selector::parse_selector_list;
use crate::{Error, Result};

/// Output of one uncached compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compilation {
    pub xpath: String,
    /// Non-fatal diagnostics, spans relative to the trimmed expression.
    pub warnings: Diagnostics,
}

/// Compiles expressions of any [`ExpressionType`] to XPath (or a checked regex).
#[derive(Clone)]
pub struct Compiler {
    options: CompileOptions,
    cache: Arc<dyn SelectorCache>,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Compiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Compiler")
            .field("options", &self.options)
            .field("cached", &self.cache.len())
            .finish()
    }
}

impl Compiler {
    /// Default options, backed by the process-wide cache.
    pub fn new() -> Self {
        Self {
            options: CompileOptions::default(),
            cache: global_cache(),
        }
    }

    pub fn with_options(mut self, options: CompileOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_cache(mut self, cache: Arc<dyn SelectorCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    pub fn cache(&self) -> &Arc<dyn SelectorCache> {
        &self.cache
    }

    /// Compiles `expression`, consulting the cache for CSS.
    ///
    /// The expression is trimmed first. Regexes are returned unchanged once
    /// their syntax checks out, XPath once its brackets balance.
    pub fn compile(&self, expression: &str, expression_type: ExpressionType) -> Result<String> {
        if expression_type != ExpressionType::Css {
            return self
                .compile_uncached(expression, expression_type)
                .map(|c| c.xpath);
        }

        let selector = expression.trim();
        let key = CacheKey::new(selector, &self.options);
        if let Some(entry) = self.cache.get(key)
            && entry.selector == selector
        {
            log::debug!("cache hit for `{selector}` ({key})");
            return Ok(entry.xpath);
        }
        log::debug!("cache miss for `{selector}` ({key})");

        let compiled = self.compile_uncached(selector, ExpressionType::Css)?;
        for warning in compiled.warnings.warnings() {
            log::warn!("`{selector}`: {warning}");
        }

        self.cache.set(
            key,
            CacheEntry {
                selector: selector.to_string(),
                xpath: compiled.xpath.clone(),
            },
        );
        Ok(compiled.xpath)
    }

    /// [`compile`](Self::compile) with the type given by name.
    pub fn compile_as(&self, expression: &str, expression_type: &str) -> Result<String> {
        let expression_type: ExpressionType = expression_type.parse()?;
        self.compile(expression, expression_type)
    }

    /// Compiles without touching the cache and keeps the warnings.
    pub fn compile_uncached(
        &self,
        expression: &str,
        expression_type: ExpressionType,
    ) -> Result<Compilation> {
        let selector = expression.trim();
        if selector.is_empty() {
            return Err(Error::invalid(
                expression,
                Diagnostics::single(
                    DiagnosticKind::EmptySelector,
                    TextRange::empty(TextSize::from(0)),
                    None,
                ),
            ));
        }

        let invalid = |diagnostics: Diagnostics| Error::invalid(selector, diagnostics);
        match expression_type {
            ExpressionType::Regex => {
                regex::validate(selector).map_err(invalid)?;
                Ok(Compilation {
                    xpath: selector.to_string(),
                    warnings: Diagnostics::new(),
                })
            }
            ExpressionType::Xpath => {
                xpath::check_balance(selector).map_err(invalid)?;
                Ok(Compilation {
                    xpath: selector.to_string(),
                    warnings: Diagnostics::new(),
                })
            }
            ExpressionType::Css => {
                let mut translator = Translator::new(&self.options);
                let xpath = translator
                    .translate(selector, TextSize::from(0))
                    .map_err(invalid)?;

                // Literal values are embedded unescaped by default, so the
                // output itself can still come out unbalanced.
                if let Err(unbalanced) = xpath::check_balance(&xpath) {
                    log::debug!("unterminated output `{xpath}`: {unbalanced}");
                    let range = TextRange::up_to(TextSize::of(selector));
                    return Err(invalid(Diagnostics::single(
                        DiagnosticKind::UnterminatedOutput,
                        range,
                        Some(&xpath),
                    )));
                }

                log::trace!("`{selector}` => `{xpath}`");
                Ok(Compilation {
                    xpath,
                    warnings: translator.into_warnings(),
                })
            }
        }
    }

    /// Assembled segments of every member of a CSS selector list.
    pub fn segments(&self, expression: &str) -> Result<Vec<Vec<Segment>>> {
        let selector = expression.trim();
        if selector.is_empty() {
            return Err(Error::invalid(
                expression,
                Diagnostics::single(
                    DiagnosticKind::EmptySelector,
                    TextRange::empty(TextSize::from(0)),
                    None,
                ),
            ));
        }
        parse_selector_list(selector).map_err(|d| Error::invalid(selector, d))
    }

    pub fn cache_entries(&self) -> Vec<(CacheKey, CacheEntry)> {
        self.cache.entries()
    }

    pub fn replace_cache(&self, entries: Vec<(CacheKey, CacheEntry)>) {
        self.cache.replace(entries);
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}
