#![no_main]

use std::collections::BTreeMap;

use assockit::ds::{KeyIterator, PathIterator, StringTree, TernarySearchTree};
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary set/delete/lookup sequences on both tree flavors
//
// Keys are drawn from a tiny alphabet so prefixes collide constantly. A
// BTreeMap keyed by the normalized unit sequence is the reference model.
const ALPHABET: &[u8] = b"ab/\\";

fn key_from(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| ALPHABET[(*b as usize) % ALPHABET.len()] as char)
        .collect()
}

fn path_units(key: &str) -> Vec<String> {
    let mut iter = PathIterator::new();
    let mut units = vec![iter.reset(key).value().to_string()];
    while iter.has_next() {
        units.push(iter.advance().value().to_string());
    }
    units
}

fuzz_target!(|data: &[u8]| {
    let mut strings: StringTree<u32> = TernarySearchTree::for_strings();
    let mut paths: TernarySearchTree<u32> = TernarySearchTree::for_paths();
    let mut string_model: BTreeMap<String, u32> = BTreeMap::new();
    let mut path_model: BTreeMap<Vec<String>, u32> = BTreeMap::new();

    for (step, chunk) in data.chunks(4).enumerate() {
        if chunk.len() < 2 {
            break;
        }
        let op = chunk[0] % 4;
        let key = key_from(&chunk[1..]);
        let value = step as u32;

        match op {
            0 => {
                assert_eq!(strings.set(&key, value), string_model.insert(key.clone(), value));
                assert_eq!(paths.set(&key, value), path_model.insert(path_units(&key), value));
            }
            1 => {
                assert_eq!(strings.delete(&key), string_model.remove(&key));
                assert_eq!(paths.delete(&key), path_model.remove(&path_units(&key)));
            }
            2 => {
                assert_eq!(strings.get(&key), string_model.get(&key));
                assert_eq!(paths.get(&key), path_model.get(&path_units(&key)));
            }
            _ => {
                let expected = string_model
                    .iter()
                    .filter(|(k, _)| key.starts_with(k.as_str()))
                    .max_by_key(|(k, _)| k.len())
                    .map(|(_, v)| v);
                assert_eq!(strings.find_substr(&key), expected);
            }
        }

        assert_eq!(strings.len(), string_model.len());
        assert_eq!(paths.len(), path_model.len());
    }

    assert!(strings.check_invariants().is_ok());
    assert!(paths.check_invariants().is_ok());
    assert_eq!(
        strings.keys().collect::<Vec<_>>(),
        string_model.keys().map(String::as_str).collect::<Vec<_>>()
    );
});
