//! Chunk boundary safety over arbitrary input

use proptest::prelude::*;
use std::io::Cursor;
use wordtally_core::{classify, count_words, Chunk, ChunkSource, PartialCounts, SourceId};

fn chunk_all(bytes: &[u8], nominal: usize) -> Vec<Chunk> {
    ChunkSource::new(Cursor::new(bytes.to_vec()), SourceId(0), nominal)
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

/// Safe-cut characters that need more than one byte
const MULTIBYTE_CUTS: [&str; 4] = ["\u{201C}", "\u{201D}", "\u{2013}", "\u{2026}"];

fn ends_on_safe_cut(bytes: &[u8]) -> bool {
    match bytes.last() {
        Some(&last) if last.is_ascii() => classify(last as char).is_safe_cut(),
        Some(_) => MULTIBYTE_CUTS
            .iter()
            .any(|cut| bytes.ends_with(cut.as_bytes())),
        None => false,
    }
}

proptest! {
    #[test]
    fn text_chunks_end_on_safe_characters(
        text in "[a-zA-Z0-9_ ,.;!?'\u{2019}\u{201C}\u{201D}\u{2026}\u{2013}éÓçñ日😀\n-]{0,300}",
        nominal in 1usize..40,
    ) {
        let chunks = chunk_all(text.as_bytes(), nominal);
        let (last, rest) = match chunks.split_last() {
            Some(split) => split,
            None => {
                prop_assert!(text.is_empty());
                return Ok(());
            }
        };

        for chunk in rest {
            let piece = std::str::from_utf8(&chunk.bytes);
            prop_assert!(piece.is_ok(), "cut inside a character");
            let tail = piece.unwrap().chars().last().unwrap();
            prop_assert!(classify(tail).is_safe_cut(), "cut after {:?}", tail);
            prop_assert!(chunk.len() > nominal);
        }
        prop_assert!(std::str::from_utf8(&last.bytes).is_ok());

        let joined: Vec<u8> = chunks.iter().flat_map(|c| c.bytes.iter().copied()).collect();
        prop_assert_eq!(joined, text.as_bytes().to_vec());
    }

    #[test]
    fn chunked_counts_match_whole_stream(
        text in "[a-zA-Z0-9_ ,.'\u{2019}\u{201C}éÓ\n-]{0,300}",
        nominal in 1usize..40,
    ) {
        let whole = count_words(text.as_bytes());
        let chunked: PartialCounts = chunk_all(text.as_bytes(), nominal)
            .iter()
            .map(Chunk::count_words)
            .sum();
        prop_assert_eq!(whole, chunked);
    }

    #[test]
    fn arbitrary_bytes_are_chunked_losslessly(
        bytes in proptest::collection::vec(any::<u8>(), 0..300),
        nominal in 1usize..40,
    ) {
        let chunks = chunk_all(&bytes, nominal);

        if let Some((_, rest)) = chunks.split_last() {
            for chunk in rest {
                prop_assert!(ends_on_safe_cut(&chunk.bytes));
            }
        }

        let joined: Vec<u8> = chunks.into_iter().flat_map(|c| c.bytes).collect();
        prop_assert_eq!(joined, bytes);
    }

    #[test]
    fn arbitrary_bytes_count_the_same_chunked(
        bytes in proptest::collection::vec(
            prop_oneof![any::<u8>(), Just(b' '), Just(b'a'), Just(b'x'), Just(0xFF)],
            0..300,
        ),
        nominal in 1usize..40,
    ) {
        let whole = count_words(&bytes);
        let chunked: PartialCounts = chunk_all(&bytes, nominal)
            .iter()
            .map(Chunk::count_words)
            .sum();
        prop_assert_eq!(whole, chunked);
    }
}

#[test]
fn test_malformed_lead_before_nominal_size() {
    let bytes = [b'a', b'b', 0xFF, b' ', b'c', b'd', b' '];
    let whole = count_words(&bytes);
    for nominal in 1..=bytes.len() {
        let chunked: PartialCounts = chunk_all(&bytes, nominal)
            .iter()
            .map(Chunk::count_words)
            .sum();
        assert_eq!(chunked, whole, "nominal {nominal}");
    }
}

#[test]
fn test_folded_scenario_survives_any_chunk_size() {
    let text = "café. Óscar_1";
    for nominal in 1..=text.len() + 1 {
        let total: PartialCounts = chunk_all(text.as_bytes(), nominal)
            .iter()
            .map(Chunk::count_words)
            .sum();
        assert_eq!(total, PartialCounts::new(2, 1, 0), "nominal {nominal}");
    }
}

#[test]
fn test_elision_is_never_split() {
    let text = "d'água l'homme n'est isn't";
    for nominal in 1..text.len() {
        for chunk in chunk_all(text.as_bytes(), nominal) {
            let piece = String::from_utf8(chunk.bytes).unwrap();
            assert!(!piece.ends_with('\''), "split at apostrophe: {piece:?}");
        }
    }
}
