/// Telegram rejects messages over 4096 characters.
pub const MAX_MESSAGE_CHARS: usize = 4000;

/// Splits `text` into consecutive pieces of at most `max_chars` characters.
pub fn split_message(text: &str, max_chars: usize) -> Vec<String> {
    if max_chars == 0 {
        return vec![];
    }

    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(max_chars)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_has_no_chunks() {
        assert!(split_message("", MAX_MESSAGE_CHARS).is_empty());
    }

    #[test]
    fn test_short_text_is_single_chunk() {
        assert_eq!(split_message("hello", MAX_MESSAGE_CHARS), vec!["hello"]);
    }

    #[test]
    fn test_exact_boundaries() {
        let text = "a".repeat(8001);
        let chunks = split_message(&text, MAX_MESSAGE_CHARS);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), 4000);
        assert_eq!(chunks[1].len(), 4000);
        assert_eq!(chunks[2], "a");
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let text = "🐵".repeat(5);
        let chunks = split_message(&text, 2);
        assert_eq!(chunks, vec!["🐵🐵", "🐵🐵", "🐵"]);
    }
}
