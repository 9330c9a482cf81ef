use crate::error::FixtureError;
use crate::matrix::Matrix;

/// Parse a brace initializer such as `{{1.0, 2.0}, {3.0, 4.0}}` back into
/// a [`Matrix`].
///
/// Whitespace (including line breaks) between tokens is ignored, so
/// wrapped literals parse the same as single-line ones.
///
/// # Errors
///
/// Returns [`FixtureError::Literal`] for unbalanced braces, stray tokens
/// or unparseable numbers, and the [`Matrix::from_rows`] errors for empty
/// or ragged initializers.
pub fn parse_matrix_literal(text: &str) -> Result<Matrix, FixtureError> {
    let mut cursor = Cursor { text, pos: 0 };
    cursor.expect('{')?;
    let mut rows = Vec::new();
    loop {
        rows.push(cursor.row()?);
        if cursor.eat(',') {
            continue;
        }
        cursor.expect('}')?;
        break;
    }
    cursor.skip_ws();
    if cursor.pos != text.len() {
        return Err(cursor.error("trailing characters after initializer"));
    }
    Matrix::from_rows(&rows)
}

struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl Cursor<'_> {
    fn rest(&self) -> &str {
        &self.text[self.pos..]
    }

    fn skip_ws(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.text.len() - trimmed.len();
    }

    fn eat(&mut self, c: char) -> bool {
        self.skip_ws();
        if self.rest().starts_with(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, c: char) -> Result<(), FixtureError> {
        if self.eat(c) {
            Ok(())
        } else {
            Err(self.error(&format!("expected '{c}'")))
        }
    }

    fn row(&mut self) -> Result<Vec<f64>, FixtureError> {
        self.expect('{')?;
        let mut values = Vec::new();
        if self.eat('}') {
            return Ok(values);
        }
        loop {
            values.push(self.number()?);
            if self.eat(',') {
                continue;
            }
            self.expect('}')?;
            return Ok(values);
        }
    }

    fn number(&mut self) -> Result<f64, FixtureError> {
        self.skip_ws();
        let len = self
            .rest()
            .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '+')))
            .unwrap_or(self.rest().len());
        let token = &self.rest()[..len];
        let value: f64 = token
            .parse()
            .map_err(|_| self.error(&format!("invalid number {token:?}")))?;
        self.pos += len;
        Ok(value)
    }

    fn error(&self, msg: &str) -> FixtureError {
        FixtureError::Literal(format!("{msg} at byte {}", self.pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_line() {
        let m = parse_matrix_literal("{{1.0, 2.0}, {3.0, 4.0}}").unwrap();
        assert_eq!(m.shape(), (2, 2));
        assert_eq!(m.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn parses_wrapped_lines_and_exponents() {
        let m = parse_matrix_literal("{{1e-05,\n  -2.5e+20},\n {0.0, -0.0}}").unwrap();
        assert_eq!(m.get(0, 0), 1e-5);
        assert_eq!(m.get(0, 1), -2.5e20);
        assert_eq!(m.get(1, 1).to_bits(), (-0.0f64).to_bits());
    }

    #[test]
    fn rejects_unbalanced() {
        assert!(matches!(
            parse_matrix_literal("{{1.0, 2.0}"),
            Err(FixtureError::Literal(_))
        ));
    }

    #[test]
    fn rejects_garbage_number() {
        let err = parse_matrix_literal("{{1.0, abc}}").unwrap_err();
        assert!(err.to_string().contains("invalid number"));
    }

    #[test]
    fn rejects_trailing_text() {
        assert!(parse_matrix_literal("{{1.0}} x").is_err());
    }

    #[test]
    fn rejects_ragged_and_empty() {
        assert!(matches!(
            parse_matrix_literal("{{1.0, 2.0}, {3.0}}"),
            Err(FixtureError::RaggedRows { .. })
        ));
        assert!(matches!(
            parse_matrix_literal("{{}}"),
            Err(FixtureError::EmptyMatrix)
        ));
    }
}
