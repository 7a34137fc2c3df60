use crate::error::{Error, Malformed, Result};

/// Byte cursor over xdot text.
///
/// Offsets reported in errors are relative to the outermost input: nested strings (e.g. the
/// body of a color directive) are scanned with `base` set to where they start.
pub(crate) struct Scanner<'input> {
    input: &'input str,
    pos: usize,
    base: usize,
}

impl<'input> Scanner<'input> {
    pub(crate) fn new(input: &'input str) -> Self {
        Self::nested(input, 0)
    }

    pub(crate) fn nested(input: &'input str, base: usize) -> Self {
        Self {
            input,
            pos: 0,
            base,
        }
    }

    pub(crate) fn offset(&self) -> usize {
        self.base + self.pos
    }

    pub(crate) fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    pub(crate) fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    pub(crate) fn skip_ws(&mut self) {
        while let Some(b) = self.peek() {
            if !b.is_ascii_whitespace() {
                break;
            }
            self.pos += 1;
        }
    }

    pub(crate) fn at_end(&mut self) -> bool {
        self.skip_ws();
        self.pos >= self.input.len()
    }

    /// The character starting at the cursor, for error messages.
    pub(crate) fn peek_char(&self) -> Option<char> {
        self.input.get(self.pos..)?.chars().next()
    }

    /// Remaining input up to the next whitespace, for error messages.
    fn next_word(&self) -> String {
        let rest = self.input.get(self.pos..).unwrap_or("");
        let word = rest.split(|c: char| c.is_ascii_whitespace()).next().unwrap_or("");
        word.chars().take(24).collect()
    }

    pub(crate) fn rest(&self) -> &'input str {
        self.input.get(self.pos..).unwrap_or("")
    }

    pub(crate) fn error(&self, reason: Malformed) -> Error {
        Error::malformed(self.offset(), reason)
    }

    fn missing(&self, expected: &'static str) -> Error {
        if self.pos >= self.input.len() {
            self.error(Malformed::UnexpectedEnd { expected })
        } else {
            self.error(Malformed::Expected {
                expected,
                found: self.next_word(),
            })
        }
    }

    fn eat_digits(&mut self) -> usize {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        self.pos - start
    }

    fn eat_sign(&mut self) {
        if matches!(self.peek(), Some(b'+' | b'-')) {
            self.pos += 1;
        }
    }

    /// Reads a decimal real: optional sign, digits, optional fraction and exponent.
    pub(crate) fn real(&mut self, expected: &'static str) -> Result<f64> {
        self.skip_ws();
        let start = self.pos;
        self.eat_sign();
        let mut digits = self.eat_digits();
        if self.peek() == Some(b'.') {
            self.pos += 1;
            digits += self.eat_digits();
        }
        if digits == 0 {
            self.pos = start;
            return Err(self.missing(expected));
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            let mark = self.pos;
            self.pos += 1;
            self.eat_sign();
            if self.eat_digits() == 0 {
                self.pos = mark;
            }
        }
        let text = &self.input[start..self.pos];
        text.parse::<f64>().map_err(|_| {
            Error::malformed(self.base + start, Malformed::InvalidNumber(text.to_string()))
        })
    }

    pub(crate) fn int(&mut self, expected: &'static str) -> Result<i64> {
        self.skip_ws();
        let start = self.pos;
        self.eat_sign();
        if self.eat_digits() == 0 {
            self.pos = start;
            return Err(self.missing(expected));
        }
        let text = &self.input[start..self.pos];
        text.parse::<i64>().map_err(|_| {
            Error::malformed(self.base + start, Malformed::InvalidNumber(text.to_string()))
        })
    }

    /// Reads a non-negative element count.
    pub(crate) fn count(&mut self, expected: &'static str) -> Result<usize> {
        self.skip_ws();
        let at = self.offset();
        let n = self.int(expected)?;
        usize::try_from(n).map_err(|_| Error::malformed(at, Malformed::InvalidCount(n)))
    }

    /// Reads a byte-counted string `n -bytes`; returns the bytes and the offset they start at.
    pub(crate) fn string(&mut self, expected: &'static str) -> Result<(&'input str, usize)> {
        self.skip_ws();
        let at = self.offset();
        let n = self.int(expected)?;
        if n <= 0 {
            return Err(Error::malformed(at, Malformed::InvalidCount(n)));
        }
        self.skip_ws();
        if self.peek() != Some(b'-') {
            return Err(self.missing("`-` before string bytes"));
        }
        self.pos += 1;

        let start = self.pos;
        let end = usize::try_from(n)
            .ok()
            .and_then(|n| start.checked_add(n))
            .filter(|end| *end <= self.input.len())
            .ok_or_else(|| {
                Error::malformed(
                    self.input.len() + self.base,
                    Malformed::UnexpectedEnd { expected },
                )
            })?;
        let Some(text) = self.input.get(start..end) else {
            return Err(self.error(Malformed::InvalidUtf8Boundary));
        };
        self.pos = end;
        Ok((text, self.base + start))
    }

    /// Like [`Scanner::string`], but also accepts the count-less shorthand `-word`, where the
    /// string runs up to the next whitespace.
    pub(crate) fn string_or_word(
        &mut self,
        expected: &'static str,
    ) -> Result<(&'input str, usize)> {
        self.skip_ws();
        let bytes = self.input.as_bytes();
        let shorthand = self.peek() == Some(b'-')
            && bytes
                .get(self.pos + 1)
                .is_some_and(|b| !b.is_ascii_digit() && !b.is_ascii_whitespace() && *b != b'.');
        if !shorthand {
            return self.string(expected);
        }
        self.pos += 1;
        let start = self.pos;
        while self.peek().is_some_and(|b| !b.is_ascii_whitespace()) {
            self.pos += 1;
        }
        Ok((&self.input[start..self.pos], self.base + start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reals_accept_sign_fraction_and_exponent() {
        let mut s = Scanner::new(" -1.5 +2 .25 3e2 7.");
        assert_eq!(s.real("a").unwrap(), -1.5);
        assert_eq!(s.real("b").unwrap(), 2.0);
        assert_eq!(s.real("c").unwrap(), 0.25);
        assert_eq!(s.real("d").unwrap(), 300.0);
        assert_eq!(s.real("e").unwrap(), 7.0);
        assert!(s.at_end());
    }

    #[test]
    fn missing_number_reports_what_was_found() {
        let mut s = Scanner::new("12 abc");
        s.real("x").unwrap();
        let err = s.real("y").unwrap_err();
        assert_eq!(
            err,
            Error::malformed(
                3,
                Malformed::Expected {
                    expected: "y",
                    found: "abc".to_string()
                }
            )
        );
    }

    #[test]
    fn strings_are_byte_counted_and_may_contain_spaces_and_dashes() {
        let mut s = Scanner::new("9 -a - b - c rest");
        assert_eq!(s.string("s").unwrap(), ("a - b - c", 3));
        assert_eq!(s.rest(), " rest");
    }

    #[test]
    fn string_must_not_split_a_character() {
        let mut s = Scanner::new("1 -\u{e9}");
        assert_eq!(
            s.string("s").unwrap_err().reason(),
            &Malformed::InvalidUtf8Boundary
        );
    }

    #[test]
    fn nested_scanner_offsets_are_absolute() {
        let mut s = Scanner::nested("1 x", 40);
        s.int("n").unwrap();
        assert_eq!(s.int("m").unwrap_err().offset(), 42);
    }

    #[test]
    fn word_shorthand_only_applies_without_a_count() {
        let mut s = Scanner::new("-Times-Roman 5 -Arial");
        assert_eq!(s.string_or_word("a").unwrap(), ("Times-Roman", 1));
        assert_eq!(s.string_or_word("b").unwrap(), ("Arial", 16));
    }
}
