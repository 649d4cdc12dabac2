//! Integration tests for the full huffcode pipeline.
//!
//! These tests verify end-to-end behavior: text -> frequency list -> tree ->
//! code table -> packed bytes -> unpacked bits -> decoded text, with
//! verification that output matches input.

use huffcode_core::{
    bitio::{padding_for, unpack},
    codec::{decode, encode, HuffmanCodec},
    error::{Error, MalformedStreamError},
    frequency::analyze_bytes,
    source::SliceSource,
    table::CodeTable,
    tree::HuffmanTree,
    Alphabet,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn round_trip(text: &[u8], alphabet: Alphabet) -> Vec<u8> {
    let encoded = encode(&mut SliceSource::new(text), alphabet).expect("encode failed");
    decode(&encoded.bytes, &encoded.tree).expect("decode failed")
}

/// Three symbols with distinct frequencies.
#[test]
fn test_scenario_three_symbols() {
    let text = b"aaabbbbcc";
    let list = analyze_bytes(text, Alphabet::ascii()).unwrap();

    let order: Vec<u8> = list.iter().map(|r| r.symbol).collect();
    assert_eq!(order, vec![b'c', b'a', b'b']);
    assert!((list.get(0).unwrap().probability - 2.0 / 9.0).abs() < 1e-12);
    assert!((list.get(1).unwrap().probability - 3.0 / 9.0).abs() < 1e-12);
    assert!((list.get(2).unwrap().probability - 4.0 / 9.0).abs() < 1e-12);

    let tree = HuffmanTree::build(&list).unwrap();
    assert_eq!(tree.leaf_count(), 3);

    assert_eq!(round_trip(text, Alphabet::ascii()), text);
}

/// One repeated symbol gets a synthetic zero-probability partner.
#[test]
fn test_scenario_single_symbol() {
    let text = b"aaaa";
    let codec = HuffmanCodec::from_bytes(text, Alphabet::ascii()).unwrap();

    assert_eq!(codec.tree().leaf_count(), 2);
    assert_eq!(codec.table().get(b'a').unwrap().len(), 1);

    let encoded = codec.encode(text).unwrap();
    // 4 payload bits + 4 padding bits
    assert_eq!(encoded.len(), 1);
    assert_eq!(codec.decode(&encoded).unwrap(), text);
}

/// A lone symbol at the top of the alphabet pairs with symbol 0 and still
/// round-trips.
#[test]
fn test_single_symbol_wraps_around_alphabet() {
    for (symbol, size) in [(127u8, 128usize), (255, 256), (1, 2)] {
        let alphabet = Alphabet::new(size).unwrap();
        let text = vec![symbol; 5];

        let codec = HuffmanCodec::from_bytes(&text, alphabet).unwrap();
        let mut leaves: Vec<u8> = codec.tree().leaves().iter().map(|(s, _)| *s).collect();
        leaves.sort_unstable();
        assert_eq!(leaves, vec![0, symbol]);

        let encoded = codec.encode(&text).unwrap();
        assert_eq!(encoded.len(), 1);
        assert_eq!(codec.decode(&encoded).unwrap(), text);
        assert_eq!(round_trip(&text, alphabet), text);
    }
}

/// Two equally likely symbols give a depth-1 tree.
#[test]
fn test_scenario_two_symbols() {
    let text = b"ab";
    let codec = HuffmanCodec::from_bytes(text, Alphabet::ascii()).unwrap();

    assert_eq!(codec.tree().depth(), 1);
    let mut codes: Vec<String> = codec
        .table()
        .assigned()
        .map(|(_, code)| code.to_string())
        .collect();
    codes.sort();
    assert_eq!(codes, vec!["0", "1"]);

    assert_eq!(round_trip(text, Alphabet::ascii()), text);
}

/// A first byte with no sentinel bit is reported, not silently skipped.
#[test]
fn test_scenario_missing_sentinel() {
    let result = unpack(&[0x00]);
    assert!(matches!(
        result,
        Err(Error::MalformedStream(MalformedStreamError::MissingSentinel { .. }))
    ));

    let list = analyze_bytes(b"ab", Alphabet::ascii()).unwrap();
    let tree = HuffmanTree::build(&list).unwrap();
    assert!(decode(&[0x00, 0xAB], &tree).is_err());
}

/// Random ASCII texts of many sizes survive the round trip.
#[test]
fn test_random_round_trips() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    for _ in 0..200 {
        let len = rng.gen_range(1..=512);
        let distinct = rng.gen_range(1..=128u32);
        let text: Vec<u8> = (0..len).map(|_| rng.gen_range(0..distinct) as u8).collect();

        assert_eq!(round_trip(&text, Alphabet::ascii()), text);
    }
}

/// Packed size obeys ceil((payload + padding) / 8) with padding in 1..=8.
#[test]
fn test_packed_length_law() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    for _ in 0..100 {
        let len = rng.gen_range(1..=300);
        let text: Vec<u8> = (0..len).map(|_| rng.gen_range(b'a'..=b'h')).collect();

        let codec = HuffmanCodec::from_bytes(&text, Alphabet::ascii()).unwrap();
        let payload_bits = codec.table().encode_symbols(&text).unwrap().len();
        let padding = padding_for(payload_bits);
        assert!((1..=8).contains(&padding));

        let bytes = codec.encode(&text).unwrap();
        assert_eq!(bytes.len(), (payload_bits + padding).div_ceil(8));
        assert_eq!(bytes.len() * 8, payload_bits + padding);
    }
}

/// No code is a prefix of another, for any random text.
#[test]
fn test_prefix_free_codes() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);

    for _ in 0..20 {
        let text: Vec<u8> = (0..1000).map(|_| rng.gen_range(0..128u8)).collect();
        let codec = HuffmanCodec::from_bytes(&text, Alphabet::ascii()).unwrap();

        let codes: Vec<_> = codec.table().assigned().collect();
        for (i, (_, a)) in codes.iter().enumerate() {
            for (j, (_, b)) in codes.iter().enumerate() {
                if i != j {
                    assert!(!a.is_prefix_of(b));
                }
            }
        }
    }
}

/// Independent tree builds from the same statistics are identical, so a
/// decoder can rebuild the encoder's tree.
#[test]
fn test_independent_rebuild() {
    let text = b"The quick brown fox jumps over the lazy dog. ".repeat(20);

    let encoder = HuffmanCodec::from_bytes(&text, Alphabet::ascii()).unwrap();
    let encoded = encoder.encode(&text).unwrap();

    let decoder = HuffmanCodec::from_bytes(&text, Alphabet::ascii()).unwrap();
    assert_eq!(decoder.tree(), encoder.tree());
    assert_eq!(decoder.table(), encoder.table());
    assert_eq!(decoder.decode(&encoded).unwrap(), text);
}

/// A decoder fed bytes cut short mid-code reports truncation.
#[test]
fn test_truncated_payload() {
    let text = b"aaabbbbcc";
    let codec = HuffmanCodec::from_bytes(text, Alphabet::ascii()).unwrap();

    // codes: b=0, c=10, a=11. Payload "1" is half of a: seven padding bits, then "1".
    let byte = 0b0000_0011;
    assert!(matches!(
        codec.decode(&[byte]),
        Err(Error::MalformedStream(MalformedStreamError::Truncated { trailing_bits: 1 }))
    ));
}

/// Every symbol of a full 256-entry alphabet.
#[test]
fn test_full_byte_alphabet() {
    let alphabet = Alphabet::new(256).unwrap();
    let text: Vec<u8> = (0..=255).chain(0..=127).collect();

    let codec = HuffmanCodec::from_bytes(&text, alphabet).unwrap();
    assert_eq!(codec.table().len(), 256);
    assert_eq!(codec.table().assigned().count(), 256);
    assert_eq!(codec.decode(&codec.encode(&text).unwrap()).unwrap(), text);
}

/// Bytes outside the ASCII alphabet are rejected during analysis.
#[test]
fn test_non_ascii_rejected() {
    let result = HuffmanCodec::from_bytes("naïve".as_bytes(), Alphabet::ascii());
    assert!(matches!(result, Err(Error::Huffman(_))));
}

/// A maximally skewed distribution produces a deep tree that still round-trips.
#[test]
fn test_deep_tree() {
    let mut text = Vec::new();
    let (mut a, mut b) = (1usize, 1usize);
    for symbol in 0..24u8 {
        text.extend(std::iter::repeat(b'A' + symbol).take(a));
        (a, b) = (b, a + b);
    }

    let codec = HuffmanCodec::from_bytes(&text, Alphabet::ascii()).unwrap();
    assert_eq!(codec.tree().depth(), 23);

    let table = CodeTable::build(codec.tree(), Alphabet::ascii()).unwrap();
    assert_eq!(table.get(b'A').unwrap().len(), 23);
    assert_eq!(codec.decode(&codec.encode(&text).unwrap()).unwrap(), text);
}

/// Empty input cannot be analyzed.
#[test]
fn test_empty_input() {
    let result = encode(&mut SliceSource::new(b""), Alphabet::ascii());
    assert!(matches!(result, Err(Error::EmptyInput)));
}
