//! Reading term lists produced by the weight source.
//!
//! Accepted JSON shapes:
//! - `[{"text": "...", "weight": 3}, ...]`
//! - `{"words": [{"text": "...", "value": 3}, ...]}` (the dashboard's cloud props)

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::errors::AppError;
use crate::layout::Term;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TermsDocument {
    List(Vec<Term>),
    Words { words: Vec<Term> },
}

/// Parses a term list from JSON text.
pub fn parse_terms(json: &str) -> Result<Vec<Term>, AppError> {
    if json.trim().is_empty() {
        return Err(AppError::Input("term input is empty".to_string()));
    }
    let doc: TermsDocument = serde_json::from_str(json)?;
    Ok(match doc {
        TermsDocument::List(terms) => terms,
        TermsDocument::Words { words } => words,
    })
}

/// Reads terms from `path`, or from stdin when `path` is `None` or `-`.
pub fn read_terms(path: Option<&Path>) -> Result<Vec<Term>, AppError> {
    let raw = match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)?,
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    parse_terms(&raw)
}
