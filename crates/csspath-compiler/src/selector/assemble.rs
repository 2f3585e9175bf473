use csspath_core::{
    ANY_TAG, AttrOperator, AttributeSelector, Combinator, Compound, Pseudo, Segment,
    is_xpath_literal,
};
use rowan::{TextRange, TextSize};

use super::split::split_selector_list;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::parser::{self, SelectorPart, SubclassSelector};

/// Segments of one selector plus what the compilers need to report against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledSelector {
    segments: Vec<Segment>,
    /// Per segment, the span of each pseudo-class argument (or of the bare
    /// pseudo-class), parallel to `Compound::pseudo_classes`.
    pseudo_spans: Vec<Vec<TextRange>>,
    warnings: Diagnostics,
}

impl AssembledSelector {
    fn passthrough(xpath: &str) -> Self {
        Self {
            segments: vec![Segment::xpath(xpath)],
            pseudo_spans: vec![Vec::new()],
            warnings: Diagnostics::new(),
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }

    pub fn is_passthrough(&self) -> bool {
        matches!(self.segments.as_slice(), [Segment::Xpath { .. }])
    }

    pub fn pseudo_span(&self, segment: usize, pseudo: usize) -> TextRange {
        self.pseudo_spans
            .get(segment)
            .and_then(|spans| spans.get(pseudo))
            .copied()
            .unwrap_or_default()
    }

    /// Non-fatal diagnostics from parsing (dropped combinators and the like).
    pub fn warnings(&self) -> &Diagnostics {
        &self.warnings
    }
}

/// Assembles one selector (no top-level commas) found at `offset` in the input.
///
/// XPath literals become a single passthrough segment. Anything else is parsed;
/// syntax errors are returned with spans shifted by `offset`.
pub fn assemble(source: &str, offset: TextSize) -> Result<AssembledSelector, Diagnostics> {
    if is_xpath_literal(source) {
        log::debug!("xpath passthrough: {source}");
        return Ok(AssembledSelector::passthrough(source));
    }

    let (parse, diagnostics) = parser::parse(source);
    let diagnostics = diagnostics.shifted(offset);
    if diagnostics.has_errors() {
        return Err(diagnostics.filtered());
    }

    let root = parse.root();
    let mut selectors = root.selectors();
    let Some(selector) = selectors.next() else {
        return Err(Diagnostics::single(
            DiagnosticKind::EmptySelector,
            TextRange::empty(offset),
            None,
        ));
    };
    if let Some(extra) = selectors.next() {
        let range = extra.text_range();
        return Err(Diagnostics::single(
            DiagnosticKind::UnexpectedToken,
            TextRange::new(range.start() + offset, range.end() + offset),
            Some("selector list where a single selector was expected"),
        ));
    }

    let mut assembled = AssembledSelector {
        segments: Vec::new(),
        pseudo_spans: Vec::new(),
        warnings: diagnostics,
    };

    let mut pending: Option<Combinator> = None;
    for part in selector.parts() {
        match part {
            // Only the first of several combinators counts; the parser already
            // turned the rest into error nodes, this guards the invariant.
            SelectorPart::Combinator(c) => {
                pending.get_or_insert(c.kind());
            }
            SelectorPart::Compound(c) => {
                let combinator = if assembled.segments.is_empty() {
                    Combinator::None
                } else {
                    pending.unwrap_or(Combinator::Descendant)
                };
                pending = None;

                let (compound, spans) = build_compound(&c, combinator, offset);
                assembled.segments.push(Segment::Compound(compound));
                assembled.pseudo_spans.push(spans);
            }
        }
    }

    Ok(assembled)
}

fn build_compound(
    node: &parser::Compound,
    combinator: Combinator,
    offset: TextSize,
) -> (Compound, Vec<TextRange>) {
    let tag = node
        .type_selector()
        .map(|t| t.name())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| ANY_TAG.to_string());
    let mut compound = Compound::new(tag).with_combinator(combinator);
    let mut spans = Vec::new();

    for part in node.subclasses() {
        match part {
            SubclassSelector::Id(id) => {
                let Some(name) = id.name() else { continue };
                // A second id can only be met as an attribute test.
                if compound.id.is_none() {
                    compound.id = Some(name);
                } else {
                    compound
                        .attributes
                        .push(AttributeSelector::matching("id", AttrOperator::Equals, name));
                }
            }
            SubclassSelector::Class(class) => {
                if let Some(name) = class.name() {
                    compound.classes.push(name);
                }
            }
            SubclassSelector::Attribute(attr) => {
                let Some(name) = attr.name() else { continue };
                let selector = match (attr.operator(), attr.value()) {
                    (Some(op), Some(value)) => AttributeSelector::matching(name, op, value),
                    _ => AttributeSelector::exists(name),
                };
                compound.attributes.push(selector.with_case(attr.case()));
            }
            SubclassSelector::PseudoClass(pseudo) => {
                let Some(name) = pseudo.name() else { continue };
                let (argument, span) = match pseudo.args() {
                    Some(args) => {
                        let (inner, start) = args.inner();
                        let span = TextRange::at(start + offset, TextSize::of(inner.as_str()));
                        (Some(inner), span)
                    }
                    None => {
                        let range = pseudo.text_range();
                        (None, TextRange::new(range.start() + offset, range.end() + offset))
                    }
                };
                compound.pseudo_classes.push(Pseudo::class(name, argument));
                spans.push(span);
            }
            SubclassSelector::PseudoElement(pseudo) => {
                let Some(name) = pseudo.name() else { continue };
                if compound.pseudo_element.is_none() {
                    let argument = pseudo.args().map(|args| args.inner().0);
                    compound.pseudo_element = Some(Pseudo::element(name, argument));
                }
            }
        }
    }

    (compound, spans)
}

/// Segments of a single selector, e.g. for inspection.
pub fn parse_selector(source: &str) -> Result<Vec<Segment>, Diagnostics> {
    let trimmed = source.trim();
    let offset = TextSize::of(&source[..source.len() - source.trim_start().len()]);
    assemble(trimmed, offset).map(AssembledSelector::into_segments)
}

/// Segments of every member of a selector list, in order.
pub fn parse_selector_list(source: &str) -> Result<Vec<Vec<Segment>>, Diagnostics> {
    if is_xpath_literal(source.trim_start()) {
        return parse_selector(source).map(|segments| vec![segments]);
    }

    let fragments = split_selector_list(source);
    if fragments.is_empty() {
        return Err(Diagnostics::single(
            DiagnosticKind::EmptySelector,
            TextRange::empty(TextSize::from(0)),
            None,
        ));
    }

    let mut errors = Diagnostics::new();
    let mut lists = Vec::with_capacity(fragments.len());
    for fragment in fragments {
        match assemble(fragment.text, fragment.offset) {
            Ok(assembled) => lists.push(assembled.into_segments()),
            Err(diagnostics) => errors.extend(diagnostics),
        }
    }

    if errors.has_errors() {
        return Err(errors);
    }
    Ok(lists)
}
