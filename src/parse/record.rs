//! Record parsers for intra- and inter-layer link lines.
//!
//! Stateless, one call per line. The first three whitespace-separated
//! fields must parse as integers; a fourth field is taken as the weight
//! when it parses as a real, otherwise the weight defaults to 1.0.
//! The configured index offset is subtracted from every integer field.

use smallvec::SmallVec;

use crate::{Error, Result};

/// An intra-layer link declaration: `level n1 n2 [weight]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntraRecord {
    pub layer: u32,
    pub n1: u32,
    pub n2: u32,
    pub weight: f64,
}

/// An inter-layer link declaration: `node level1 level2 [weight]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterRecord {
    pub phys: u32,
    pub layer1: u32,
    pub layer2: u32,
    pub weight: f64,
}

/// Parse an intra-link record line.
pub fn parse_intra(line: &str, index_offset: u32) -> Result<IntraRecord> {
    let [a, b, c] = required_fields(line, "multiplex intra link data")?;
    Ok(IntraRecord {
        layer: to_index(a, index_offset, line, "multiplex intra link data")?,
        n1: to_index(b, index_offset, line, "multiplex intra link data")?,
        n2: to_index(c, index_offset, line, "multiplex intra link data")?,
        weight: trailing_weight(line),
    })
}

/// Parse an inter-link record line.
pub fn parse_inter(line: &str, index_offset: u32) -> Result<InterRecord> {
    let [a, b, c] = required_fields(line, "multiplex inter link data")?;
    Ok(InterRecord {
        phys: to_index(a, index_offset, line, "multiplex inter link data")?,
        layer1: to_index(b, index_offset, line, "multiplex inter link data")?,
        layer2: to_index(c, index_offset, line, "multiplex inter link data")?,
        weight: trailing_weight(line),
    })
}

/// The three mandatory integer fields of a record line.
fn required_fields<'a>(line: &'a str, what: &str) -> Result<[&'a str; 3]> {
    let fields: SmallVec<[&str; 4]> = line.split_whitespace().collect();
    if fields.len() < 3 {
        return Err(Error::format(format!("can't parse {what}"), line));
    }
    Ok([fields[0], fields[1], fields[2]])
}

/// Parse one integer field and convert it to a 0-based internal index.
fn to_index(token: &str, index_offset: u32, line: &str, what: &str) -> Result<u32> {
    let raw: u32 = token
        .parse()
        .map_err(|_| Error::format(format!("can't parse {what}"), line))?;
    raw.checked_sub(index_offset).ok_or_else(|| {
        Error::format(
            format!("index {raw} is below the configured offset {index_offset}"),
            line,
        )
    })
}

/// The optional fourth field; defaults to 1.0 when absent or not a real.
fn trailing_weight(line: &str) -> f64 {
    line.split_whitespace()
        .nth(3)
        .and_then(|t| t.parse().ok())
        .unwrap_or(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intra_with_weight() {
        let r = parse_intra("2 3 4 1.5", 1).unwrap();
        assert_eq!(r, IntraRecord { layer: 1, n1: 2, n2: 3, weight: 1.5 });
    }

    #[test]
    fn test_intra_default_weight() {
        let r = parse_intra("1 1 2", 1).unwrap();
        assert_eq!(r.weight, 1.0);
    }

    #[test]
    fn test_intra_non_numeric_weight_defaults() {
        let r = parse_intra("1 1 2 heavy", 1).unwrap();
        assert_eq!(r.weight, 1.0);
    }

    #[test]
    fn test_intra_zero_offset() {
        let r = parse_intra("0 1 2", 0).unwrap();
        assert_eq!((r.layer, r.n1, r.n2), (0, 1, 2));
    }

    #[test]
    fn test_intra_too_few_fields() {
        let err = parse_intra("1 2", 1).unwrap_err();
        assert!(err.to_string().contains("'1 2'"));
    }

    #[test]
    fn test_intra_non_integer_field() {
        assert!(parse_intra("a 2 3", 1).is_err());
        assert!(parse_intra("1 2.5 3", 1).is_err());
    }

    #[test]
    fn test_intra_index_below_offset() {
        let err = parse_intra("0 1 2", 1).unwrap_err();
        assert!(err.to_string().contains("below the configured offset"));
    }

    #[test]
    fn test_inter_with_weight() {
        let r = parse_inter("3 1 2 0.5", 1).unwrap();
        assert_eq!(r, InterRecord { phys: 2, layer1: 0, layer2: 1, weight: 0.5 });
    }

    #[test]
    fn test_inter_default_weight() {
        let r = parse_inter("3 1 2", 1).unwrap();
        assert_eq!(r.weight, 1.0);
    }

    #[test]
    fn test_inter_error_names_line() {
        let err = parse_inter("x y z", 1).unwrap_err();
        assert!(err.to_string().contains("'x y z'"));
    }
}
