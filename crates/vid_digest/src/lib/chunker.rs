/// Splits `text` into sentence-aligned chunks whose accumulated length stays
/// under `chunk_size` characters.
///
/// Sentences are delimited by the two-character sequence `". "`. A chunk is
/// closed once appending the next sentence would reach or exceed the budget;
/// a single sentence longer than the budget still becomes its own chunk.
/// Rejoining the returned chunks with `". "` reconstructs the input.
pub fn split_into_chunks(text: &str, chunk_size: usize) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    // The budget is counted in characters, not bytes.
    let mut current_chars = 0usize;

    for sentence in text.split(". ") {
        let sentence_chars = sentence.chars().count();
        if !current.is_empty() && current_chars + sentence_chars >= chunk_size {
            chunks.push(std::mem::take(&mut current));
            current_chars = 0;
        }
        if !current.is_empty() {
            current.push_str(". ");
            current_chars += 2;
        }
        current.push_str(sentence);
        current_chars += sentence_chars;
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
    fn empty_input_yields_no_chunks() {
        assert!(split_into_chunks("", 800).is_empty());
        assert!(split_into_chunks("   \n\t ", 800).is_empty());
    }

    #[test]
    fn no_delimiter_yields_single_chunk() {
        let text = "a single run-on block of text without sentence breaks";
        let chunks = split_into_chunks(text, 10);
        assert_eq!(chunks, vec![text.to_string()]);
    }

    #[test]
    fn oversized_sentence_becomes_own_chunk() {
        let long = "x".repeat(500);
        let text = format!("short one. {long}. short two");
        let chunks = split_into_chunks(&text, 100);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[1], long);
    }

    #[test]
    fn chunk_closes_before_budget_is_reached() {
        // Two 60-char sentences fit a 130 budget; a third would exceed it.
        let sentence = "s".repeat(60);
        let text = vec![sentence.as_str(); 3].join(". ");
        let chunks = split_into_chunks(&text, 130);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].len(), 122);
        assert_eq!(chunks[1].len(), 60);
    }

    #[test]
    fn budget_counts_characters_not_bytes() {
        // Two-byte characters: 60-char sentences still fit a 130-character
        // budget two at a time, exactly as in the ASCII case.
        let sentence = "ä".repeat(60);
        let text = vec![sentence.as_str(); 3].join(". ");
        let chunks = split_into_chunks(&text, 130);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].chars().count(), 122);
        assert_eq!(chunks[1].chars().count(), 60);
    }

    #[test]
    fn rejoining_chunks_reconstructs_input() {
        let sentences: Vec<String> = (0..20)
            .map(|i| format!("sentence number {i} with a bit of padding text"))
            .collect();
        let text = sentences.join(". ");
        let chunks = split_into_chunks(&text, 120);
        assert!(chunks.len() > 1);
        assert_eq!(chunks.join(". "), text);
    }

    #[test]
    fn twenty_five_hundred_chars_split_into_four_chunks() {
        // Ten 249-char sentences: three fit under an 800 budget, so the
        // split lands on 3 + 3 + 3 + 1.
        let sentence = "a".repeat(249);
        let text = vec![sentence; 10].join(". ");
        assert_eq!(text.len(), 2508);

        let chunks = split_into_chunks(&text, 800);
        assert_eq!(chunks.len(), 4);
        for chunk in &chunks[..3] {
            assert_eq!(chunk.len(), 751);
        }
        assert_eq!(chunks[3].len(), 249);
    }
}
