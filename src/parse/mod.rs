//! Line-oriented multiplex grammar: classification and record parsing.
//!
//! The grammar interleaves two record kinds under section headers:
//!
//! ```text
//! *Intra
//! <level> <n1> <n2> [<weight>]
//! *Inter
//! <node> <level1> <level2> [<weight>]
//! ```
//!
//! Everything here is a pure function of the input line; the current
//! section mode is owned by the caller.

pub mod record;

pub use record::{IntraRecord, InterRecord, parse_intra, parse_inter};

/// What a raw input line is, before any record parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Empty line, skipped.
    Blank,
    /// Starts with `#`, skipped.
    Comment,
    /// `*Intra` / `*intra`: switch to intra-link records.
    SectionIntra,
    /// `*Inter` / `*inter`: switch to inter-link records.
    SectionInter,
    /// A data record to parse in the current section mode.
    Record(&'a str),
}

/// Classify a raw line. Section headers match exactly; no trimming
/// beyond a trailing carriage return.
pub fn classify(line: &str) -> LineKind<'_> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    if line.is_empty() {
        return LineKind::Blank;
    }
    if line.starts_with('#') {
        return LineKind::Comment;
    }
    match line {
        "*Intra" | "*intra" => LineKind::SectionIntra,
        "*Inter" | "*inter" => LineKind::SectionInter,
        _ => LineKind::Record(line),
    }
}
