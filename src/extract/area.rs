/// Spatial-relation phrases, checked in this order.
const RELATION_PHRASES: [&str; 6] = [
    " near ",
    " opposite ",
    " beside ",
    " next to ",
    " behind ",
    " in front of ",
];

/// Derive a neighbourhood label from a free-text address.
///
/// An explicit relation phrase ("near X", "opposite X", ...) wins: the area is
/// the text after the phrase up to the next comma, title-cased. Otherwise the
/// second-to-last comma-separated segment is used. Otherwise empty.
pub fn location_area(address: &str) -> String {
    if address.is_empty() {
        return String::new();
    }

    let lowered = address.to_lowercase();
    for phrase in RELATION_PHRASES {
        if let Some(pos) = lowered.find(phrase) {
            let rest = &lowered[pos + phrase.len()..];
            let area = rest.split(',').next().unwrap_or_default().trim();
            return title_case(area);
        }
    }

    let parts: Vec<&str> = address.split(',').collect();
    if parts.len() >= 2 {
        return parts[parts.len() - 2].trim().to_string();
    }

    String::new()
}

/// Uppercase the first letter of every word, lowercase the rest. Any
/// non-alphabetic character starts a new word.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}
