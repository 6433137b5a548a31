//! Field path parser implementation using nom.
//!
//! A field path addresses a value inside a record's field map, descending
//! into nested maps with `.` and into lists with `[n]`:
//!
//! ```text
//! path    := key ( "." key | "[" index "]" )*
//! key     := one or more characters other than '.', '[' and ']'
//! index   := decimal digits
//! ```

use std::fmt;
use std::str::FromStr;

use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, digit1},
    combinator::{all_consuming, map, map_res},
    multi::many0,
    sequence::{delimited, pair, preceded},
    IResult,
};

use crate::error::{RecordError, RecordResult};

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Map key.
    Key(String),
    /// List index.
    Index(usize),
}

/// A parsed path into a record's fields, e.g. `attributes.color` or
/// `images[0].url`.
///
/// The first segment is always a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// Parse a field path.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use catalog_record::{FieldPath, PathSegment};
    ///
    /// let path = FieldPath::parse("images[0].url").unwrap();
    /// assert_eq!(path.segments().len(), 3);
    /// assert_eq!(path.segments()[1], PathSegment::Index(0));
    ///
    /// assert!(FieldPath::parse("images[x]").is_err());
    /// ```
    pub fn parse(input: &str) -> RecordResult<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(RecordError::EmptyFieldPath);
        }

        match all_consuming(field_path)(input) {
            Ok((_, segments)) => Ok(Self { segments }),
            Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
                let position = input.len() - e.input.len();
                Err(RecordError::InvalidFieldPath {
                    position,
                    message: format!("unexpected input at: '{}'", truncate(e.input, 20)),
                })
            }
            Err(nom::Err::Incomplete(_)) => Err(RecordError::InvalidFieldPath {
                position: input.len(),
                message: "incomplete path".to_string(),
            }),
        }
    }

    /// Parse a field path, falling back to a single verbatim key when the
    /// text is not a valid path (e.g. a field literally named `"a[b"`).
    pub fn lenient(input: &str) -> Self {
        Self::parse(input).unwrap_or_else(|_| Self::key(input))
    }

    /// A path made of one top-level key, taken verbatim.
    pub fn key(name: impl Into<String>) -> Self {
        Self {
            segments: vec![PathSegment::Key(name.into())],
        }
    }

    /// Returns all segments in order.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Returns the leading top-level key.
    pub fn head(&self) -> &str {
        match self.segments.first() {
            Some(PathSegment::Key(key)) => key,
            _ => "",
        }
    }

    /// Returns the segments after the leading key.
    pub fn tail(&self) -> &[PathSegment] {
        self.segments.get(1..).unwrap_or(&[])
    }

    /// Returns true if the path is a single top-level key.
    pub fn is_simple(&self) -> bool {
        self.segments.len() == 1
    }
}

impl FromStr for FieldPath {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if i == 0 => f.write_str(key)?,
                PathSegment::Key(key) => write!(f, ".{}", key)?,
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for FieldPath {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for FieldPath {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        FieldPath::parse(&text).map_err(serde::de::Error::custom)
    }
}

fn truncate(s: &str, max_len: usize) -> &str {
    match s.char_indices().nth(max_len) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

// ============================================================================
// Grammar
// ============================================================================

fn field_path(input: &str) -> IResult<&str, Vec<PathSegment>> {
    map(pair(key, many0(tail_segment)), |(head, mut rest)| {
        rest.insert(0, head);
        rest
    })(input)
}

fn tail_segment(input: &str) -> IResult<&str, PathSegment> {
    alt((preceded(char('.'), key), index))(input)
}

fn key(input: &str) -> IResult<&str, PathSegment> {
    map(take_while1(is_key_char), |k: &str| PathSegment::Key(k.to_string()))(input)
}

fn index(input: &str) -> IResult<&str, PathSegment> {
    map(
        delimited(char('['), map_res(digit1, str::parse::<usize>), char(']')),
        PathSegment::Index,
    )(input)
}

fn is_key_char(c: char) -> bool {
    !matches!(c, '.' | '[' | ']')
}
