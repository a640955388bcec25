//! Best-effort scanner over the two-marker grammar of analysis replies:
//! `Math Explanation:` ... `Pseudocode:` ... end-of-text. The backend model
//! is not guaranteed to honor the requested format, so a miss is reported as
//! data, never as an error.

/// Sentinel substituted for a field whose marker was absent from the reply
pub const NOT_FOUND: &str = "Not found";

const MATH_MARKER: &str = "math explanation:";
const PSEUDO_MARKER: &str = "pseudocode:";

#[derive(Debug, PartialEq, Eq)]
pub enum Extraction {
    /// At least one marker matched; a `None` field means its marker was absent
    Parsed {
        math_explanation: Option<String>,
        pseudo_code: Option<String>,
    },
    /// No marker matched at all; the raw reply is kept for diagnostics
    Unparsed { raw: String },
}

impl Extraction {
    pub fn math_explanation(&self) -> &str {
        match self {
            Extraction::Parsed {
                math_explanation: Some(text),
                ..
            } => text,
            _ => NOT_FOUND,
        }
    }

    pub fn pseudo_code(&self) -> &str {
        match self {
            Extraction::Parsed {
                pseudo_code: Some(text),
                ..
            } => text,
            _ => NOT_FOUND,
        }
    }
}

/// ASCII case-insensitive substring search. Both markers are pure ASCII, so
/// every match starts and ends on a char boundary.
fn find_marker(haystack: &str, marker: &str) -> Option<usize> {
    let hay = haystack.as_bytes();
    let needle = marker.as_bytes();
    if hay.len() < needle.len() {
        return None;
    }
    (0..=hay.len() - needle.len()).find(|&i| hay[i..i + needle.len()].eq_ignore_ascii_case(needle))
}

/// Scan a raw model reply for the two analysis sections.
///
/// The explanation spans from after `Math Explanation:` up to `Pseudocode:`,
/// so it requires both markers in order; the pseudocode spans from after its
/// own marker to end of text. Matching is case-insensitive and spans
/// newlines; extracted values are trimmed.
pub fn parse_analysis(raw: &str) -> Extraction {
    let math_at = find_marker(raw, MATH_MARKER);
    let pseudo_at = find_marker(raw, PSEUDO_MARKER);

    if math_at.is_none() && pseudo_at.is_none() {
        return Extraction::Unparsed {
            raw: raw.to_string(),
        };
    }

    let math_explanation = match (math_at, pseudo_at) {
        (Some(m), Some(p)) if m + MATH_MARKER.len() <= p => {
            Some(raw[m + MATH_MARKER.len()..p].trim().to_string())
        }
        _ => None,
    };
    let pseudo_code = pseudo_at.map(|p| raw[p + PSEUDO_MARKER.len()..].trim().to_string());

    Extraction::Parsed {
        math_explanation,
        pseudo_code,
    }
}
