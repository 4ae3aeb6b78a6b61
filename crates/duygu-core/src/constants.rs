//! Fixed values shared across the service.

/// Top-two score gap below which the verdict is forced to neutral.
pub const NEUTRAL_MARGIN: f64 = 0.15;

/// Language used when a request omits `lang`.
pub const DEFAULT_LANG: &str = "tr";

/// Error message placed in `probs` for blank input.
pub const EMPTY_INPUT_MESSAGE: &str = "Boş giriş";

/// `label_tr` value for blank input.
pub const EMPTY_LABEL_TR: &str = "boş";

/// `label_en` value for blank input.
pub const EMPTY_LABEL_EN: &str = "EMPTY";

/// Default Turkish model repository.
pub const DEFAULT_TURKISH_MODEL: &str = "savasy/bert-base-turkish-sentiment-cased";

/// Default English model repository.
pub const DEFAULT_ENGLISH_MODEL: &str = "cardiffnlp/twitter-roberta-base-sentiment-latest";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn margin_is_fifteen_hundredths() {
        assert!((NEUTRAL_MARGIN - 0.15).abs() < f64::EPSILON);
    }

    #[test]
    fn default_lang_is_turkish() {
        assert_eq!(DEFAULT_LANG, "tr");
    }
}
