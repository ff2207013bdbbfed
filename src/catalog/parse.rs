//! Splitting raw parameter values into a catalog name and a variant.
//!
//! Names and variants are both free-form multi-word strings joined by `_`, so the split point is
//! guessed from capitalization first and then corrected against the catalog's known variants.

use crate::catalog::model::SheetDefinition;

#[derive(Clone, Debug, PartialEq, Eq)]
/// A raw value split into its catalog name and variant.
pub struct ParsedValue {
    /// Catalog name, segments joined with spaces (`"Longsleeves 2 Overlay"`).
    pub name: String,
    /// Variant, segments joined with `_` unless a canonical spelling was matched.
    pub variant: String,
}

/// Capitalization-based split of `raw`.
///
/// Scans from the end for the last segment that starts with an uppercase character and is not
/// numeric; everything up to and including it is the name. Always returns a result.
pub fn heuristic_parse(raw: &str) -> ParsedValue {
    let parts: Vec<&str> = raw.split('_').collect();
    let split = heuristic_split_index(&parts);
    ParsedValue {
        name: parts[..split].join(" "),
        variant: parts[split..].join("_"),
    }
}

/// Split `raw`, preferring a split whose variant is listed in `def.variants`.
///
/// Falls back to [`heuristic_parse`] when no definition is given, the definition lists no
/// variants, or no split matches.
pub fn parse_value(raw: &str, def: Option<&SheetDefinition>) -> ParsedValue {
    let Some(def) = def.filter(|d| !d.variants.is_empty()) else {
        return heuristic_parse(raw);
    };

    let parts: Vec<&str> = raw.split('_').collect();
    for split in 1..parts.len() {
        let underscored = parts[split..].join("_");
        let spaced = parts[split..].join(" ");
        let variant = if def.has_variant(&spaced) {
            spaced
        } else if def.has_variant(&underscored) {
            underscored
        } else {
            continue;
        };
        return ParsedValue {
            name: parts[..split].join(" "),
            variant,
        };
    }

    heuristic_parse(raw)
}

fn heuristic_split_index(parts: &[&str]) -> usize {
    parts
        .iter()
        .rposition(|p| starts_uppercase(p) && !is_numeric(p))
        .map(|i| i + 1)
        .unwrap_or(parts.len().saturating_sub(1))
}

// Digits and symbols count as "uppercase": uppercasing leaves them unchanged.
fn starts_uppercase(segment: &str) -> bool {
    let Some(first) = segment.chars().next() else {
        return false;
    };
    first.to_uppercase().eq(std::iter::once(first))
}

fn is_numeric(segment: &str) -> bool {
    matches!(segment.trim().parse::<f64>(), Ok(v) if !v.is_nan())
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/parse.rs"]
mod tests;
