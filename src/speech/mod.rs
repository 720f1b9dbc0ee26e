// src/speech/mod.rs — Speech synthesis layer

pub mod gtts;
pub mod player;

use async_trait::async_trait;

use crate::infra::errors::FoveaError;

/// Trait for speech backends. `speak` renders the text audibly and
/// returns only after playback has finished, so callers never overlap
/// two replies on the same session.
#[async_trait]
pub trait SpeechSynth: Send + Sync {
    fn id(&self) -> &str;

    async fn speak(&self, text: &str) -> Result<(), FoveaError>;
}

/// Split `text` into chunks of at most `limit` characters, preferring
/// whitespace boundaries. A single word longer than the limit is
/// hard-split on char boundaries. Whitespace-only input yields no chunks.
pub fn chunk_text(text: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > limit {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let mut piece = String::new();
            let mut piece_len = 0usize;
            for ch in word.chars() {
                if piece_len == limit {
                    chunks.push(std::mem::take(&mut piece));
                    piece_len = 0;
                }
                piece.push(ch);
                piece_len += 1;
            }
            // The tail piece stays open so following words can join it.
            current = piece;
            current_len = piece_len;
            continue;
        }

        let sep = usize::from(!current.is_empty());
        if current_len + sep + word_len > limit {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_single_chunk() {
        let chunks = chunk_text("hello there", 200);
        assert_eq!(chunks, vec!["hello there"]);
    }

    #[test]
    fn test_empty_and_whitespace_yield_nothing() {
        assert!(chunk_text("", 200).is_empty());
        assert!(chunk_text("   \n\t  ", 200).is_empty());
    }

    #[test]
    fn test_chunks_respect_limit() {
        let text = "the quick brown fox jumps over the lazy dog ".repeat(40);
        for chunk in chunk_text(&text, 200) {
            assert!(chunk.chars().count() <= 200, "oversized chunk: {chunk:?}");
        }
    }

    #[test]
    fn test_splits_on_whitespace() {
        let chunks = chunk_text("aaaa bbbb cccc", 9);
        assert_eq!(chunks, vec!["aaaa bbbb", "cccc"]);
    }

    #[test]
    fn test_words_survive_rechunking() {
        let text = "one two three four five six seven eight nine ten";
        let chunks = chunk_text(text, 12);
        let rejoined = chunks.join(" ");
        let original: Vec<&str> = text.split_whitespace().collect();
        let recovered: Vec<&str> = rejoined.split_whitespace().collect();
        assert_eq!(original, recovered);
    }

    #[test]
    fn test_oversized_word_hard_split() {
        let word = "a".repeat(25);
        let chunks = chunk_text(&word, 10);
        assert_eq!(chunks, vec!["a".repeat(10), "a".repeat(10), "a".repeat(5)]);
    }

    #[test]
    fn test_words_join_after_hard_split_tail() {
        let text = format!("{} tail", "b".repeat(12));
        let chunks = chunk_text(&text, 10);
        assert_eq!(chunks, vec!["b".repeat(10), "bb tail".into()]);
    }

    #[test]
    fn test_multibyte_boundaries() {
        let text = "héllo wörld çafé ".repeat(30);
        for chunk in chunk_text(&text, 16) {
            assert!(chunk.chars().count() <= 16);
        }
        let word = "é".repeat(9);
        assert_eq!(chunk_text(&word, 4), vec!["é".repeat(4), "é".repeat(4), "é".repeat(1)]);
    }
}
