/// Longest accepted chirp, counted in characters.
pub const MAX_CHIRP_LEN: usize = 140;

const PROFANE_WORDS: [&str; 3] = ["kerfuffle", "sharbert", "fornax"];

const MASK: &str = "****";

/// Masks profane words. Words are split on single spaces, so a word with
/// punctuation attached is left alone.
pub fn clean_body(body: &str) -> String {
    body.split(' ')
        .map(|word| {
            let lower = word.to_lowercase();
            if PROFANE_WORDS.contains(&lower.as_str()) {
                MASK
            } else {
                word
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn is_too_long(body: &str) -> bool {
    body.chars().count() > MAX_CHIRP_LEN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_profane_words_any_case() {
        assert_eq!(
            clean_body("This is a kerfuffle opinion I need to share with the world"),
            "This is a **** opinion I need to share with the world"
        );
        assert_eq!(clean_body("Sharbert and FORNAX"), "**** and ****");
    }

    #[test]
    fn leaves_punctuated_words() {
        assert_eq!(clean_body("what a kerfuffle!"), "what a kerfuffle!");
    }

    #[test]
    fn keeps_spacing() {
        assert_eq!(clean_body("a  fornax "), "a  **** ");
    }

    #[test]
    fn length_counts_chars() {
        assert!(!is_too_long(&"a".repeat(MAX_CHIRP_LEN)));
        assert!(is_too_long(&"a".repeat(MAX_CHIRP_LEN + 1)));
        assert!(!is_too_long(&"é".repeat(MAX_CHIRP_LEN)));
    }
}
