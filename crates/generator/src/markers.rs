//! Doc comments and marker comments in generated output
//!
//! Markers flag output that is knowingly incomplete: an unresolved target
//! replaced by an accept-anything validator, or a trait with no mapping.

use smithy_zod_gen_parser::smithy::Traits;

/// Fenced JSDoc block for a documentation trait
///
/// Returns `None` for absent or blank documentation.
pub fn doc_comment(documentation: Option<&str>) -> Option<String> {
    let lines = doc_lines(documentation?)?;
    let mut block = vec!["/**".to_string()];
    block.extend(lines);
    block.push(" */".to_string());
    Some(block.join("\n"))
}

/// Body lines (` * ...`) of a fenced documentation block
pub fn doc_lines(documentation: &str) -> Option<Vec<String>> {
    let trimmed = documentation.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut lines = vec![" * ```xml".to_string()];
    for line in trimmed.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.is_empty() {
            lines.push(" *".to_string());
        } else {
            lines.push(format!(" * {}", escape_comment(line)));
        }
    }
    lines.push(" * ```".to_string());
    Some(lines)
}

/// Keep comment text from closing the surrounding block
pub fn escape_comment(text: &str) -> String {
    text.replace("*/", "*\\/")
}

/// One line comment per present trait outside `mapped`, sorted by key
pub fn unmapped_traits(traits: &Traits, mapped: &[&str], location: &str) -> Vec<String> {
    unmapped_trait_notes(traits, mapped, location)
        .into_iter()
        .map(|note| format!("// {}", note))
        .collect()
}

/// Marker texts of the traits outside `mapped`, without comment delimiters
pub fn unmapped_trait_notes(traits: &Traits, mapped: &[&str], location: &str) -> Vec<String> {
    traits
        .unmapped(mapped)
        .into_iter()
        .map(|(key, value)| {
            tracing::debug!(trait_key = %key, location, "Trait is not mapped");
            format!("UNMAPPED TRAIT: {} ({}) on {} is not mapped to zod.", key, value, location)
        })
        .collect()
}

/// Text of an unresolved-reference marker
pub fn unresolved(role: &str, target: &str, owner: &str, recursive: bool) -> String {
    let reason = if recursive {
        "is a recursive reference"
    } else {
        "is not generated"
    };
    format!("UNRESOLVED: {} target {} for {} {}.", role, target, owner, reason)
}
