//! Generated answer cleanup
//!
//! Strips the boilerplate lead-ins local models like to open with and fixes
//! capitalisation so answers read as standalone statements.

/// Lead-in phrases stripped from the start of generated answers
const LEAD_IN_PHRASES: [&str; 5] = [
    "Based on the provided context,",
    "According to the document,",
    "The document states that",
    "From the information provided,",
    "Based on the provided document context,",
];

/// Clean a raw generated answer
///
/// Trims whitespace, removes the first matching lead-in phrase (checked
/// case-insensitively, removed at most once), and capitalises a leading
/// lowercase letter.
pub fn clean_answer(raw: &str) -> String {
    let mut answer = raw.trim();

    for phrase in LEAD_IN_PHRASES {
        if let Some(rest) = strip_prefix_ci(answer, phrase) {
            answer = rest.trim();
            break;
        }
    }

    capitalize_first(answer)
}

/// Case-insensitive prefix strip (phrases are ASCII)
fn strip_prefix_ci<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    if text.len() >= prefix.len()
        && text.is_char_boundary(prefix.len())
        && text[..prefix.len()].eq_ignore_ascii_case(prefix)
    {
        Some(&text[prefix.len()..])
    } else {
        None
    }
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_lowercase() => {
            first.to_uppercase().chain(chars).collect()
        }
        _ => text.to_string(),
    }
}
