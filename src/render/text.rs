/// Maximum number of lines a wrapped label may occupy on a card.
pub const MAX_LINES: usize = 2;

/// Wraps `text` into at most [`MAX_LINES`] lines of at most `max_chars`
/// characters each.
///
/// Words are placed greedily: a word joins the current line while the line's
/// word lengths, the new word and one separating space per word already on the
/// line fit into `max_chars`. Otherwise the line is closed and the word starts
/// the next one. Lines past the second are dropped without an ellipsis.
///
/// A word longer than `max_chars` is never split and ends up alone on its own
/// line. Empty or whitespace-only input produces no lines.
///
/// # Example
///
/// ```
/// let lines = wrap_text("Red Hot Chili Peppers", 16);
/// assert_eq!(lines, vec!["Red Hot Chili", "Peppers"]);
/// ```
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_chars = 0;

    for word in text.split_whitespace() {
        let word_chars = word.chars().count();

        if !current.is_empty() && current_chars + word_chars + current.len() > max_chars {
            lines.push(current.join(" "));
            if lines.len() == MAX_LINES {
                return lines;
            }
            current.clear();
            current_chars = 0;
        }

        current.push(word);
        current_chars += word_chars;
    }

    if !current.is_empty() {
        lines.push(current.join(" "));
    }

    lines
}
