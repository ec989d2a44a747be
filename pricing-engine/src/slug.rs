//! Rule label slugification
//!
//! Labels are operator-entered free text; the slug becomes part of a line
//! item code, so it must fit the `[a-z0-9-]` code alphabet. Latin diacritics
//! transliterate to their base letters rather than getting stripped.

/// Longest slug kept; codes also carry the `line-item/` prefix
pub const MAX_SLUG_LENGTH: usize = 50;

/// Slug used when nothing of the label survives
pub const FALLBACK_SLUG: &str = "surcharge";

/// Turns a rule label into a line item code slug
pub fn slugify_label(label: &str) -> String {
    let mut kept = String::with_capacity(label.len());
    for c in label.to_lowercase().chars() {
        if let Some(replacement) = transliterate(c) {
            kept.push_str(replacement);
        } else if c.is_ascii_lowercase() || c.is_ascii_digit() {
            kept.push(c);
        } else if c.is_whitespace() || c == '-' {
            kept.push(' ');
        }
    }

    let slug = kept.split_whitespace().collect::<Vec<_>>().join("-");
    let truncated: String = slug.chars().take(MAX_SLUG_LENGTH).collect();
    let trimmed = truncated.trim_matches('-');
    if trimmed.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        trimmed.to_string()
    }
}

fn transliterate(c: char) -> Option<&'static str> {
    let replacement = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => "a",
        'ß' => "ss",
        'æ' => "ae",
        'ç' | 'ć' | 'č' => "c",
        'ð' | 'đ' => "d",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' => "e",
        'ì' | 'í' | 'î' | 'ï' | 'ī' | 'į' => "i",
        'ł' => "l",
        'ñ' | 'ń' | 'ň' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ő' => "o",
        'œ' => "oe",
        'š' | 'ś' | 'ş' => "s",
        'þ' => "th",
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' => "u",
        'ý' | 'ÿ' => "y",
        'ž' | 'ź' | 'ż' => "z",
        _ => return None,
    };
    Some(replacement)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_label() {
        assert_eq!(slugify_label("Abendaufschlag"), "abendaufschlag");
    }

    #[test]
    fn test_spaces_become_hyphens() {
        assert_eq!(slugify_label("Evening Surcharge"), "evening-surcharge");
        assert_eq!(slugify_label("  late   night  "), "late-night");
    }

    #[test]
    fn test_transliteration() {
        assert_eq!(slugify_label("Straße"), "strasse");
        assert_eq!(slugify_label("Crème Brûlée"), "creme-brulee");
        assert_eq!(slugify_label("Büro-Zuschlag"), "buro-zuschlag");
    }

    #[test]
    fn test_symbols_stripped() {
        assert_eq!(slugify_label("50% off (evenings)!"), "50-off-evenings");
    }

    #[test]
    fn test_fallback_for_empty_result() {
        assert_eq!(slugify_label(""), "surcharge");
        assert_eq!(slugify_label("@#$%^&*"), "surcharge");
    }

    #[test]
    fn test_truncation() {
        let long = "A".repeat(60);
        let slug = slugify_label(&long);
        assert_eq!(slug.len(), 50);
        assert_eq!(slug, "a".repeat(50));
    }

    #[test]
    fn test_existing_hyphens_collapse() {
        assert_eq!(slugify_label("evening---surcharge"), "evening-surcharge");
    }
}
