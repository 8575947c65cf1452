//! Class scoping with a content-derived prefix.
//!
//! Scoping rewrites every class identifier in selector position to
//! `templ_css_<digest>_<name>`, where the digest is computed once from the
//! whole source text. Two files with identical content produce identical
//! prefixes; changing any byte of a file changes the generated name of
//! every class in it, which is exactly what makes stale generated
//! constants fail loudly instead of silently matching.

use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

use crate::error::ParseError;
use crate::parse::{Token, tokenize};
use crate::tokenizer::TokenKind;

/// Namespace prepended to every scoped class name.
pub const SCOPED_CLASS_PREFIX: &str = "templ_css_";

/// Number of digest bytes kept for the prefix (32 hex characters).
const DIGEST_BYTES: usize = 16;

/// Result of scoping one stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopedStylesheet {
    /// The stylesheet with class selectors rewritten.
    pub css: String,
    /// Original class name to generated name, ordered by original name.
    /// Duplicate class names within one file map to the same generated
    /// value, so last-write-wins is harmless.
    pub classes: BTreeMap<String, String>,
}

/// Rewrite class selectors in `source` with a content-derived prefix.
///
/// A flat two-state machine tracks selector position: a `.` delimiter
/// enters it, a `{` leaves it. Selectors never nest before their own
/// opening brace, so no stack is needed. Identifiers seen while inside are
/// rewritten; every other token passes through unchanged.
///
/// # Errors
///
/// Any [`ParseError`] from tokenization propagates unchanged; no partially
/// rewritten text is produced.
pub fn scope(source: &str) -> Result<ScopedStylesheet, ParseError> {
    let tokens = tokenize(source, false)?;
    let prefix = content_digest(source);
    let mut css = String::with_capacity(source.len());
    let mut classes = BTreeMap::new();
    let mut inside_selector = false;

    for token in &tokens {
        match token {
            Token::Css { kind, content, .. } => match kind {
                TokenKind::LeftBrace => {
                    inside_selector = false;
                    css.push_str(content);
                }
                TokenKind::Ident if inside_selector => {
                    let generated = format!("{SCOPED_CLASS_PREFIX}{prefix}_{content}");
                    css.push_str(&generated);
                    let _ = classes.insert(content.clone(), generated);
                }
                TokenKind::Delim if content == "." => {
                    css.push_str(content);
                    inside_selector = true;
                }
                _ => css.push_str(content),
            },
            Token::Expression {
                prefix: marker_prefix,
                expr,
                suffix,
                ..
            } => {
                css.push_str(marker_prefix);
                css.push_str(expr);
                css.push_str(suffix);
            }
        }
    }

    Ok(ScopedStylesheet { css, classes })
}

/// Fixed-length hex digest of the source text, computed once per file.
///
/// SHA-256 truncated to [`DIGEST_BYTES`] bytes: collision avoidance across
/// files, not security.
fn content_digest(source: &str) -> String {
    let digest = Sha256::digest(source.as_bytes());
    digest[..DIGEST_BYTES]
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}
