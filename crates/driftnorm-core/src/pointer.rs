//! Structural field pointers
//!
//! A field pointer addresses one location in a structured document, using
//! `/`-separated reference tokens with `~0` escaping `~` and `~1` escaping
//! `/`. Pointers are parsed once, at rule compile time; a syntactically
//! invalid pointer aborts normalizer construction.

use crate::errors::{NormalizeError, Result};

/// A parsed field pointer
///
/// Holds both the raw string form (kept for error reporting and the patch
/// wire format) and the unescaped reference tokens used during application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPointer {
    raw: String,
    tokens: Vec<String>,
}

impl FieldPointer {
    /// Parse a pointer from its string form
    ///
    /// The empty string is the valid root pointer (zero tokens); any other
    /// pointer must start with `/`. Escape sequences other than `~0` and
    /// `~1`, including a trailing `~`, are rejected.
    ///
    /// # Errors
    ///
    /// Returns `PatchBuild` when the pointer is not valid pointer syntax.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Ok(Self {
                raw: String::new(),
                tokens: Vec::new(),
            });
        }
        let Some(rest) = raw.strip_prefix('/') else {
            return Err(NormalizeError::PatchBuild {
                pointer: raw.to_string(),
                message: "pointer must be empty or start with '/'".to_string(),
            });
        };
        let tokens = rest
            .split('/')
            .map(|token| unescape_token(raw, token))
            .collect::<Result<Vec<String>>>()?;
        Ok(Self {
            raw: raw.to_string(),
            tokens,
        })
    }

    /// Get the raw string form
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Get the unescaped reference tokens, root first
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

impl std::fmt::Display for FieldPointer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Unescape one reference token (`~1` → `/`, `~0` → `~`)
fn unescape_token(pointer: &str, token: &str) -> Result<String> {
    let mut out = String::with_capacity(token.len());
    let mut chars = token.chars();
    while let Some(ch) = chars.next() {
        if ch != '~' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('0') => out.push('~'),
            Some('1') => out.push('/'),
            other => {
                return Err(NormalizeError::PatchBuild {
                    pointer: pointer.to_string(),
                    message: match other {
                        Some(c) => format!("invalid escape '~{}' in token '{}'", c, token),
                        None => format!("dangling '~' in token '{}'", token),
                    },
                });
            }
        }
    }
    Ok(out)
}
