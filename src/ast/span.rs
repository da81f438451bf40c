/// Byte-offset range into AFX source text.
///
/// Parse errors carry one so that diagnostics can point back at the
/// offending tag, attribute or expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Width of the span in bytes, never less than one so a caret can
    /// always be drawn.
    pub fn width(&self) -> usize {
        self.end.saturating_sub(self.start).max(1)
    }
}
