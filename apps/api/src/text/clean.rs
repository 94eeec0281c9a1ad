use std::sync::OnceLock;

use regex::Regex;

struct Patterns {
    html_tag: Regex,
    url: Regex,
    email: Regex,
    phone: Regex,
    non_letter: Regex,
    extracted_noise: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        html_tag: Regex::new(r"<.*?>").expect("valid html tag pattern"),
        url: Regex::new(r"http\S+").expect("valid url pattern"),
        email: Regex::new(r"\S+@\S+").expect("valid email pattern"),
        phone: Regex::new(r"[+(]?[1-9][0-9 .\-()]{8,}[0-9]").expect("valid phone pattern"),
        non_letter: Regex::new(r"[^a-zA-Z\s]").expect("valid letter pattern"),
        extracted_noise: Regex::new(r"[^\w\s.,!?;:()\-]").expect("valid noise pattern"),
    })
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cleaning used by the role matcher: lowercase, no markup, no links, letters only.
pub fn clean_for_matching(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }
    let p = patterns();
    let lowered = text.to_lowercase();
    let no_tags = p.html_tag.replace_all(&lowered, "");
    let no_urls = p.url.replace_all(&no_tags, "");
    let letters = p.non_letter.replace_all(&no_urls, " ");
    collapse_whitespace(&letters)
}

/// Cleaning used before TF-IDF: additionally drops e-mail addresses and phone numbers
/// so contact details never become features.
pub fn clean_for_classifier(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }
    let p = patterns();
    let lowered = text.to_lowercase();
    let no_urls = p.url.replace_all(&lowered, "");
    let no_emails = p.email.replace_all(&no_urls, "");
    let no_phones = p.phone.replace_all(&no_emails, "");
    let letters = p.non_letter.replace_all(&no_phones, " ");
    collapse_whitespace(&letters)
}

/// Normalization applied to text pulled out of uploaded files. Keeps basic punctuation
/// so the text stays readable when echoed back to the client.
pub fn normalize_extracted(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }
    let stripped = patterns().extracted_noise.replace_all(text, " ");
    collapse_whitespace(&stripped).to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_strips_markup_links_and_symbols() {
        let cleaned = clean_for_matching(
            "<b>Senior</b> Python-Developer, see https://example.com/me  C++ & SQL!",
        );
        assert_eq!(cleaned, "senior python developer see c sql");
    }

    #[test]
    fn test_matching_empty_input() {
        assert_eq!(clean_for_matching(""), "");
        assert_eq!(clean_for_matching("   \n\t"), "");
    }

    #[test]
    fn test_matching_is_idempotent() {
        let once = clean_for_matching("CI/CD pipelines with Docker & Kubernetes (K8s)");
        assert_eq!(clean_for_matching(&once), once);
    }

    #[test]
    fn test_classifier_drops_contact_details() {
        let cleaned = clean_for_classifier(
            "Jane Doe jane.doe@mail.com +1 (555) 123-4567 registered nurse",
        );
        assert_eq!(cleaned, "jane doe registered nurse");
    }

    #[test]
    fn test_normalize_extracted_keeps_punctuation() {
        let normalized = normalize_extracted("  Led   team of 5.\n\nBudget: $2M • Excel ");
        assert_eq!(normalized, "led team of 5. budget: 2m excel");
    }
}
