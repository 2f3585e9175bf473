use rowan::{TextRange, TextSize};

/// One trimmed, non-empty member of a selector list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment<'s> {
    pub text: &'s str,
    /// Byte offset of `text` in the list it was cut from.
    pub offset: TextSize,
}

impl Fragment<'_> {
    pub fn range(&self) -> TextRange {
        TextRange::at(self.offset, TextSize::of(self.text))
    }
}

/// Splits on commas outside `[...]`, `(...)` and quoted strings. Escaped
/// characters (`\,`) never separate.
///
/// Bracket and paren depth are tracked independently and never go below zero,
/// so a stray closer cannot turn a later nested comma into a separator.
/// Fragments that are empty after trimming are dropped.
pub fn split_selector_list(source: &str) -> Vec<Fragment<'_>> {
    let mut fragments = Vec::new();
    let mut brackets = 0usize;
    let mut parens = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut start = 0;

    for (i, c) in source.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        if let Some(q) = quote {
            if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }

        match c {
            '\\' => escaped = true,
            '"' | '\'' => quote = Some(c),
            '[' => brackets += 1,
            ']' => brackets = brackets.saturating_sub(1),
            '(' => parens += 1,
            ')' => parens = parens.saturating_sub(1),
            ',' if brackets == 0 && parens == 0 => {
                push_fragment(source, start, i, &mut fragments);
                start = i + 1;
            }
            _ => {}
        }
    }
    push_fragment(source, start, source.len(), &mut fragments);

    fragments
}

fn push_fragment<'s>(source: &'s str, start: usize, end: usize, out: &mut Vec<Fragment<'s>>) {
    let raw = &source[start..end];
    let text = raw.trim();
    if text.is_empty() {
        return;
    }
    let leading = raw.len() - raw.trim_start().len();
    out.push(Fragment {
        text,
        offset: TextSize::from((start + leading) as u32),
    });
}
