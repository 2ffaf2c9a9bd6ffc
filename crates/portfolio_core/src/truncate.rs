pub const ELLIPSIS: char = '…';

/// Caps `text` at `budget` characters, appending [`ELLIPSIS`] when anything
/// was cut.
///
/// Trailing whitespace before the marker is dropped. Truncating the output
/// again with the same budget returns it unchanged.
pub fn truncate(text: &str, budget: usize) -> String {
    if text.chars().count() <= budget {
        return text.to_string();
    }

    let cut = text
        .char_indices()
        .nth(budget)
        .map_or(text.len(), |(index, _)| index);

    let mut truncated = text[..cut].trim_end().to_string();
    truncated.push(ELLIPSIS);
    truncated
}
