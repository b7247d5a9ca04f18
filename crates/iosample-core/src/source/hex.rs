use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Lines};
use std::path::Path;

use super::{HexError, SampleEvent, SampleSource, SourceError};

const COMMENT_PREFIX: char = '#';

/// Line-oriented hex source: one sample per line.
///
/// Blank lines and lines starting with `#` are skipped. See
/// [`decode_hex_line`] for the accepted byte notation.
///
/// # Examples
/// ```
/// use iosample_core::{HexSource, SampleSource};
///
/// let mut source = HexSource::from_lines(["# digital only", "01 02 11 00 02 01"]);
/// let event = source.next_sample()?.expect("one sample");
/// assert_eq!(event.origin, 2);
/// assert_eq!(event.data, [0x01, 0x02, 0x11, 0x00, 0x02, 0x01]);
/// assert!(source.next_sample()?.is_none());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct HexSource<R> {
    lines: Lines<R>,
    line_no: usize,
}

impl HexSource<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl HexSource<Cursor<String>> {
    /// Build a source from in-memory lines; each item is one line.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let text = lines
            .into_iter()
            .map(|line| line.as_ref().to_string())
            .collect::<Vec<_>>()
            .join("\n");
        Self::new(Cursor::new(text))
    }
}

impl<R: BufRead> HexSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }
}

impl<R: BufRead> SampleSource for HexSource<R> {
    fn next_sample(&mut self) -> Result<Option<SampleEvent>, SourceError> {
        for line in self.lines.by_ref() {
            let line = line?;
            self.line_no += 1;
            let text = line.trim();
            if text.is_empty() || text.starts_with(COMMENT_PREFIX) {
                continue;
            }
            let data = decode_hex_line(text).map_err(|source| SourceError::InvalidHex {
                origin: self.line_no,
                source,
            })?;
            return Ok(Some(SampleEvent {
                origin: self.line_no,
                data,
            }));
        }
        Ok(None)
    }
}

/// Decode one line of hex text into bytes.
///
/// Tokens are separated by whitespace, `,` or `:` and may carry a `0x`
/// prefix. A token may hold several bytes (`0102`), but must have an even
/// number of digits.
///
/// # Examples
/// ```
/// use iosample_core::decode_hex_line;
///
/// assert_eq!(decode_hex_line("0x01, 0x8A").unwrap(), [0x01, 0x8A]);
/// assert_eq!(decode_hex_line("04:E2").unwrap(), [0x04, 0xE2]);
/// assert_eq!(decode_hex_line("01021100").unwrap(), [0x01, 0x02, 0x11, 0x00]);
/// assert!(decode_hex_line("0x1").is_err());
/// ```
///
/// # Errors
/// Returns [`HexError`] for odd-length tokens, non-hex digits or a line
/// without any bytes.
pub fn decode_hex_line(text: &str) -> Result<Vec<u8>, HexError> {
    let mut bytes = Vec::new();
    let tokens = text
        .split(|c: char| c.is_whitespace() || c == ',' || c == ':')
        .filter(|token| !token.is_empty());
    for token in tokens {
        let digits = token
            .strip_prefix("0x")
            .or_else(|| token.strip_prefix("0X"))
            .unwrap_or(token);
        let nibbles = digits
            .chars()
            .map(|c| {
                c.to_digit(16).ok_or_else(|| HexError::InvalidDigit {
                    found: c,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if nibbles.is_empty() || nibbles.len() % 2 != 0 {
            return Err(HexError::OddDigits {
                token: token.to_string(),
            });
        }
        bytes.extend(
            nibbles
                .chunks_exact(2)
                .map(|pair| (pair[0] << 4 | pair[1]) as u8),
        );
    }
    if bytes.is_empty() {
        return Err(HexError::Empty);
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::{HexSource, decode_hex_line};
    use crate::source::{HexError, SampleSource, SourceError};

    #[test]
    fn decode_mixed_separators() {
        let bytes = decode_hex_line("0x01 02,11:8a").unwrap();
        assert_eq!(bytes, [0x01, 0x02, 0x11, 0x8A]);
    }

    #[test]
    fn decode_rejects_odd_digits() {
        let err = decode_hex_line("01 2").unwrap_err();
        assert_eq!(
            err,
            HexError::OddDigits {
                token: "2".to_string()
            }
        );
    }

    #[test]
    fn decode_rejects_non_hex() {
        let err = decode_hex_line("01 zz").unwrap_err();
        assert_eq!(
            err,
            HexError::InvalidDigit {
                found: 'z',
                token: "zz".to_string()
            }
        );
        assert_eq!(err.to_string(), "unexpected character 'z' in token 'zz'");
    }

    #[test]
    fn decode_rejects_bare_prefix() {
        assert!(matches!(
            decode_hex_line("0x"),
            Err(HexError::OddDigits { .. })
        ));
    }

    #[test]
    fn decode_rejects_separators_only() {
        assert_eq!(decode_hex_line(" , : "), Err(HexError::Empty));
    }

    #[test]
    fn decode_sign_is_not_a_digit() {
        assert!(matches!(
            decode_hex_line("+F"),
            Err(HexError::InvalidDigit { found: '+', .. })
        ));
    }

    #[test]
    fn source_skips_comments_and_blank_lines() {
        let mut source = HexSource::from_lines(["", "# header", "  01 00 00 00 00  ", "01 00 00 80 04 E2"]);
        let first = source.next_sample().unwrap().unwrap();
        assert_eq!(first.origin, 3);
        let second = source.next_sample().unwrap().unwrap();
        assert_eq!(second.origin, 4);
        assert_eq!(second.data, [0x01, 0x00, 0x00, 0x80, 0x04, 0xE2]);
        assert!(source.next_sample().unwrap().is_none());
    }

    #[test]
    fn source_reports_line_of_invalid_hex() {
        let mut source = HexSource::from_lines(["01 00 00 00 00", "01 0g"]);
        assert!(source.next_sample().unwrap().is_some());
        let err = source.next_sample().unwrap_err();
        assert!(matches!(
            err,
            SourceError::InvalidHex {
                origin: 2,
                source: HexError::InvalidDigit { found: 'g', .. }
            }
        ));
    }
}
