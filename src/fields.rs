//! Allocation-free field splitting.
//!
//! A line with `N` delimiters always has `N + 1` fields. Empty fields keep
//! their slot, so column indices are stable no matter how sparse the line is.
//!
//! Trimming uses [`is_separator_space`], not Unicode `White_Space`: the
//! no-break spaces are content, while the ASCII control separators
//! U+001C..U+001F are whitespace.

/// Whitespace as far as line and field trimming is concerned.
///
/// ASCII controls `\t \n \u{b} \u{c} \r` and U+001C..U+001F, plus the space,
/// line and paragraph separators except the no-break ones (U+00A0, U+2007,
/// U+202F). U+0085 is not whitespace.
pub fn is_separator_space(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\u{b}' | '\u{c}' | '\r'
            | '\u{1c}'..='\u{1f}'
            | ' '
            | '\u{1680}'
            | '\u{2000}'..='\u{2006}'
            | '\u{2008}'..='\u{200a}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{205f}'
            | '\u{3000}'
    )
}

/// Trim [`is_separator_space`] characters from both ends.
#[inline]
pub fn trim_spaces(s: &str) -> &str {
    s.trim_matches(is_separator_space)
}

/// One delimiter-separated slot of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field<'a> {
    /// Zero-based slot position, counting empty slots.
    pub column: usize,
    /// Slot content with surrounding whitespace trimmed.
    pub value: &'a str,
}

impl Field<'_> {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// Iterator over the fields of a single line.
///
/// Created by [`split_fields`].
#[derive(Debug, Clone)]
pub struct Fields<'a> {
    line: &'a str,
    delimiter: char,
    // Byte offset of the next slot; `None` once the last slot was yielded.
    start: Option<usize>,
    column: usize,
}

impl<'a> Iterator for Fields<'a> {
    type Item = Field<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.start?;
        let rest = &self.line[start..];
        let (raw, next) = match rest.find(self.delimiter) {
            Some(off) => (&rest[..off], Some(start + off + self.delimiter.len_utf8())),
            None => (rest, None),
        };
        self.start = next;
        let field = Field {
            column: self.column,
            value: trim_spaces(raw),
        };
        self.column += 1;
        Some(field)
    }
}

/// Split `line` on `delimiter`, yielding every slot with its column index.
///
/// ```
/// use line_grouper::fields::split_fields;
///
/// let cols: Vec<_> = split_fields(";a; b ;", ';').map(|f| (f.column, f.value)).collect();
/// assert_eq!(cols, vec![(0, ""), (1, "a"), (2, "b"), (3, "")]);
/// ```
pub fn split_fields(line: &str, delimiter: char) -> Fields<'_> {
    Fields {
        line,
        delimiter,
        start: Some(0),
        column: 0,
    }
}

/// Only the fields carrying a value; empty slots never take part in grouping.
pub fn non_empty_fields(line: &str, delimiter: char) -> impl Iterator<Item = Field<'_>> {
    split_fields(line, delimiter).filter(|f| !f.is_empty())
}
