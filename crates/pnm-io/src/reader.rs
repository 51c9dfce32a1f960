//! Line-oriented token pre-processor for the plain-text header grammar.
//!
//! Netpbm comments run from `#` to the end of the physical line and may sit
//! between any two header fields. The reader strips them off each line,
//! accumulates their text in encounter order, and hands the remaining text
//! back as logical lines.

/// Splits input into logical lines, capturing comments on the side.
pub(crate) struct LineReader<'a> {
    lines: std::str::Lines<'a>,
    comments: Vec<&'a str>,
}

impl<'a> LineReader<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            comments: Vec::new(),
        }
    }

    /// Next logical line: the physical line with any trailing comment
    /// removed and whitespace trimmed. May be empty. `None` at end of input.
    fn next_line(&mut self) -> Option<&'a str> {
        let line = self.lines.next()?;
        Some(match line.find('#') {
            Some(pos) => {
                let comment = line[pos + 1..].trim();
                if !comment.is_empty() {
                    self.comments.push(comment);
                }
                line[..pos].trim()
            }
            None => line.trim(),
        })
    }

    /// Next non-empty logical line, skipping blanks and comment-only lines
    /// (whose comments are still captured). `None` at end of input.
    pub fn next_field(&mut self) -> Option<&'a str> {
        loop {
            match self.next_line() {
                Some(line) if line.is_empty() => continue,
                other => return other,
            }
        }
    }

    /// All remaining logical lines joined with single spaces.
    pub fn rest(&mut self) -> String {
        let mut body = String::new();
        while let Some(line) = self.next_line() {
            if line.is_empty() {
                continue;
            }
            if !body.is_empty() {
                body.push(' ');
            }
            body.push_str(line);
        }
        body
    }

    /// Comment lines captured so far, in encounter order.
    pub fn comments(&self) -> &[&'a str] {
        &self.comments
    }
}
