//! URL-to-slug normalization.
//!
//! The slug is the uniqueness key for the whole catalog, so `normalize` must
//! be deterministic: same input, same output, no environment involved.

/// Derive a lowercase, URL-safe slug from a submitted URL string.
///
/// Surrounding whitespace is trimmed, common Latin diacritics are folded to
/// their ASCII base letters, and every run of non-alphanumeric characters
/// collapses into a single `-`. Leading and trailing separators are dropped,
/// which also makes the function idempotent.
pub fn normalize(url: &str) -> String {
    let mut folded = String::with_capacity(url.len());
    for ch in url.trim().chars() {
        match fold_diacritic(ch) {
            Some(ascii) => folded.push_str(ascii),
            None => folded.push(ch),
        }
    }

    let mut slug = String::with_capacity(folded.len());
    let mut gap = false;
    for ch in folded.chars() {
        let ch = ch.to_ascii_lowercase();
        if ch.is_ascii_alphanumeric() {
            if gap && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(ch);
            gap = false;
        } else {
            gap = true;
        }
    }

    slug
}

/// Map a small set of common Latin diacritics to their ASCII base letters.
/// Returns `None` for anything unmapped so the caller keeps the char as-is.
fn fold_diacritic(ch: char) -> Option<&'static str> {
    let ascii = match ch {
        'à'..='å' | 'À'..='Å' => "a",
        'ç' | 'Ç' => "c",
        'è'..='ë' | 'È'..='Ë' => "e",
        'ì'..='ï' | 'Ì'..='Ï' => "i",
        'ñ' | 'Ñ' => "n",
        'ò'..='ö' | 'Ò'..='Ö' => "o",
        'ù'..='ü' | 'Ù'..='Ü' => "u",
        'ý' | 'ÿ' | 'Ý' => "y",
        'ß' => "ss",
        'æ' | 'Æ' => "ae",
        'œ' | 'Œ' => "oe",
        'ø' | 'Ø' => "o",
        _ => return None,
    };
    Some(ascii)
}
