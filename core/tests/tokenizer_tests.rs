use feedsearch_core::tokenizer::{tokenize, Tokenizer};

#[test]
fn it_lowercases_and_splits() {
    let words = tokenize("Kim Jong-il's funeral: N. KOREA mourns");
    assert_eq!(words, vec!["kim", "jong", "il", "s", "funeral", "n", "korea", "mourns"]);
}

#[test]
fn it_applies_nfkc_before_lowercasing() {
    // U+FB01 LATIN SMALL LIGATURE FI, fullwidth digits
    let words = tokenize("\u{FB01}nal \u{FF12}\u{FF10}\u{FF11}\u{FF11}");
    assert_eq!(words, vec!["final", "2011"]);
}

#[test]
fn it_keeps_non_latin_letters() {
    let words = tokenize("Café Müller, 北京!");
    assert_eq!(words, vec!["café", "müller", "北京"]);
}

#[test]
fn it_is_deterministic() {
    let text = "US drone: Iran shows off captured craft";
    assert_eq!(tokenize(text), tokenize(text));
    let t = Tokenizer::with_english_stopwords();
    assert_eq!(t.tokenize(text), t.tokenize(text));
}

#[test]
fn it_filters_stopwords_on_request() {
    let words = Tokenizer::with_english_stopwords().tokenize("The quick brown fox and the lazy dog");
    assert!(!words.contains(&"the".to_string()));
    assert!(!words.contains(&"and".to_string()));
    assert!(words.contains(&"fox".to_string()));
}
