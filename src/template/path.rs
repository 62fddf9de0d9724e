//! Placeholder path parsing.
//!
//! A path such as `obj.list[0]["name"]` is read into a flat list of typed
//! segments. Resolution against argument values lives in [`super::types`].

use thiserror::Error;

/// One step of a placeholder path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Mapping key (also used as an index when it parses as one)
    Key(String),
    /// Sequence index (also used as a mapping key in decimal form)
    Index(usize),
}

impl Segment {
    fn classify(raw: &str) -> Self {
        match canonical_index(raw) {
            Some(index) => Segment::Index(index),
            None => Segment::Key(raw.to_string()),
        }
    }
}

/// Index for a canonical decimal (`0`, `7`, `12`); `01` and `+1` stay keys
pub(crate) fn canonical_index(raw: &str) -> Option<usize> {
    let digits_only = !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit());
    if !digits_only || (raw.len() > 1 && raw.starts_with('0')) {
        return None;
    }
    raw.parse().ok()
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("empty path")]
    Empty,

    #[error("unexpected character '{found}' at offset {offset}")]
    Unexpected { found: char, offset: usize },

    #[error("unexpected end of path at offset {0}")]
    UnexpectedEnd(usize),

    #[error("unterminated bracket starting at offset {0}")]
    UnterminatedBracket(usize),

    #[error("unterminated quoted key starting at offset {0}")]
    UnterminatedQuote(usize),
}

fn is_delimiter(c: char) -> bool {
    matches!(c, '.' | '[' | ']' | '"' | '\'')
}

struct Reader<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        &self.src[start..self.pos]
    }

    fn unexpected(&self) -> PathError {
        match self.peek() {
            Some(found) => PathError::Unexpected {
                found,
                offset: self.pos,
            },
            None => PathError::UnexpectedEnd(self.pos),
        }
    }

    /// `head := identifier | bracket`
    fn head(&mut self) -> Result<Segment, PathError> {
        match self.peek() {
            Some('[') => self.bracket(),
            _ => self.identifier(),
        }
    }

    /// `identifier := (any char except . [ ] " ')+`
    fn identifier(&mut self) -> Result<Segment, PathError> {
        let ident = self.eat_while(|c| !is_delimiter(c));
        if ident.is_empty() {
            return Err(self.unexpected());
        }
        Ok(Segment::classify(ident))
    }

    /// `bracket := '[' (quoted | bare) ']'`
    fn bracket(&mut self) -> Result<Segment, PathError> {
        let start = self.pos;
        self.bump();

        let segment = match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                let quote_start = self.pos;
                self.bump();
                let key = self.eat_while(|c| c != quote);
                if self.bump().is_none() {
                    return Err(PathError::UnterminatedQuote(quote_start));
                }
                Segment::Key(key.to_string())
            }
            None => return Err(PathError::UnterminatedBracket(start)),
            Some(_) => {
                let bare = self.eat_while(|c| c != ']' && c != '[').trim();
                if bare.is_empty() {
                    return Err(self.unexpected());
                }
                Segment::classify(bare)
            }
        };

        match self.bump() {
            Some(']') => Ok(segment),
            None => Err(PathError::UnterminatedBracket(start)),
            Some(found) => Err(PathError::Unexpected {
                found,
                offset: self.pos - found.len_utf8(),
            }),
        }
    }
}

/// Parse a placeholder path into segments.
///
/// `path := head ('.' identifier | bracket)*`
pub fn parse_path(path: &str) -> Result<Vec<Segment>, PathError> {
    if path.is_empty() {
        return Err(PathError::Empty);
    }

    let mut reader = Reader::new(path);
    let mut segments = vec![reader.head()?];

    while let Some(c) = reader.peek() {
        match c {
            '.' => {
                reader.bump();
                segments.push(reader.identifier()?);
            }
            '[' => segments.push(reader.bracket()?),
            _ => return Err(reader.unexpected()),
        }
    }

    Ok(segments)
}
