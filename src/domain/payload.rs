//! Payload value objects
//!
//! A payload is the fully formatted text that gets injected into a terminal.
//! The dispatcher never looks inside it; only the boundary formatter in this
//! module knows the two shapes it can take.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::domain::error::LineSpanParseError;

/// Immutable, pre-formatted text to deliver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload(Arc<str>);

impl Payload {
    /// Wrap already formatted text
    pub fn new(text: impl Into<String>) -> Self {
        Self(Arc::from(text.into()))
    }

    /// The exact text, byte for byte
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First non-empty line, used in confirmation messages and logs.
    pub fn headline(&self) -> &str {
        self.0
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or("")
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 1-based inclusive line range (`10` or `10-12`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
    start: u32,
    end: u32,
}

impl LineSpan {
    /// Create a span, rejecting zero lines and reversed ranges.
    pub fn new(start: u32, end: u32) -> Result<Self, LineSpanParseError> {
        if start == 0 || end < start {
            return Err(LineSpanParseError {
                input: format!("{}-{}", start, end),
            });
        }
        Ok(Self { start, end })
    }

    pub fn single(line: u32) -> Result<Self, LineSpanParseError> {
        Self::new(line, line)
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    pub fn is_single_line(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for LineSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single_line() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

impl FromStr for LineSpan {
    type Err = LineSpanParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || LineSpanParseError {
            input: s.to_string(),
        };
        let trimmed = s.trim();

        match trimmed.split_once('-') {
            Some((start, end)) => {
                let start = start.trim().parse::<u32>().map_err(|_| err())?;
                let end = end.trim().parse::<u32>().map_err(|_| err())?;
                Self::new(start, end).map_err(|_| err())
            }
            None => {
                let line = trimmed.parse::<u32>().map_err(|_| err())?;
                Self::single(line).map_err(|_| err())
            }
        }
    }
}

/// An editor selection, the input of the boundary formatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub path: String,
    pub span: LineSpan,
    /// Selected text; `None` sends a bare reference.
    pub text: Option<String>,
}

impl Selection {
    /// Reference to a location without any code
    pub fn reference(path: impl Into<String>, span: LineSpan) -> Self {
        Self {
            path: path.into(),
            span,
            text: None,
        }
    }

    /// Reference plus the selected code
    pub fn excerpt(path: impl Into<String>, span: LineSpan, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            span,
            text: Some(text.into()),
        }
    }

    /// Format as `"\n<path>:<span>"` or `"\n# From: <path>:<span>\n<text>"`.
    pub fn to_payload(&self) -> Payload {
        match &self.text {
            None => Payload::new(format!("\n{}:{}", self.path, self.span)),
            Some(text) => Payload::new(format!("\n# From: {}:{}\n{}", self.path, self.span, text)),
        }
    }
}

/// Extract the lines covered by `span` from `content`, each terminated by `\n`.
///
/// Lines past the end of the content are silently dropped.
pub fn extract_lines(content: &str, span: LineSpan) -> String {
    let skip = (span.start() - 1) as usize;
    let take = (span.end() - span.start() + 1) as usize;

    content
        .lines()
        .skip(skip)
        .take(take)
        .fold(String::new(), |mut acc, line| {
            acc.push_str(line);
            acc.push('\n');
            acc
        })
}
