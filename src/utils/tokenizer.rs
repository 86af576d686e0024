/// Minimum token length (in characters) kept in the index.
pub const MIN_TOKEN_LENGTH: usize = 2;

/// Maximum token length to store in the index.
/// Tokens longer than this are data blobs rather than searchable words.
const MAX_TOKEN_LENGTH: usize = 128;

/// Split text into lowercase alphanumeric words, keeping every word
/// regardless of length.
pub fn split_words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|ch: char| !ch.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
}

/// Extract index tokens from text: lowercase, split on non-alphanumeric
/// boundaries, drop short and overly long words, sort and deduplicate.
pub fn extract_tokens(text: &str) -> Vec<String> {
    let mut tokens: Vec<String> = split_words(text).filter(|w| is_indexable(w)).collect();
    tokens.sort_unstable();
    tokens.dedup();
    tokens
}

/// Tokens for an entry, drawn from its name and optional description.
pub fn entry_tokens(name: &str, description: Option<&str>) -> Vec<String> {
    let mut tokens: Vec<String> = split_words(name)
        .chain(description.into_iter().flat_map(split_words))
        .filter(|w| is_indexable(w))
        .collect();
    tokens.sort_unstable();
    tokens.dedup();
    tokens
}

/// Canonical comparison form of a name or query: lowercase words joined by
/// a single space. `"Mr. Mime"` and `"mr   mime"` both become `"mr mime"`.
pub fn normalize_key(text: &str) -> String {
    let mut key = String::with_capacity(text.len());
    for word in split_words(text) {
        if !key.is_empty() {
            key.push(' ');
        }
        key.push_str(&word);
    }
    key
}

/// Normalize whitespace only: lowercase and collapse runs of whitespace.
/// Used to derive entry ids.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extract tokens suitable for query matching.
///
/// Same rules as [`extract_tokens`], except that a query made only of
/// fragments shorter than [`MIN_TOKEN_LENGTH`] (the first keystroke of a
/// typeahead) keeps those fragments so they can drive a prefix lookup.
pub fn tokenize_query(query: &str) -> Vec<String> {
    let tokens = extract_tokens(query);
    if !tokens.is_empty() {
        return tokens;
    }

    let mut fragments: Vec<String> = split_words(query)
        .filter(|w| w.chars().count() <= MAX_TOKEN_LENGTH)
        .collect();
    fragments.sort_unstable();
    fragments.dedup();
    fragments
}

fn is_indexable(word: &str) -> bool {
    let len = word.chars().count();
    (MIN_TOKEN_LENGTH..=MAX_TOKEN_LENGTH).contains(&len)
}
