#![no_main]

use assockit::ds::{LinkedMap, Touch};
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary operation sequences on LinkedMap
//
// Tests random sequences of set/get with every Touch mode, remove, shift,
// trim_old and clear against a Vec model ordered head to tail.
fn touch_of(byte: u8) -> Touch {
    match byte % 3 {
        0 => Touch::None,
        1 => Touch::AsOld,
        _ => Touch::AsNew,
    }
}

fuzz_target!(|data: &[u8]| {
    let mut map: LinkedMap<u8, u32> = LinkedMap::new();
    let mut model: Vec<(u8, u32)> = Vec::new();

    for (step, chunk) in data.chunks(3).enumerate() {
        if chunk.len() < 3 {
            break;
        }
        let key = chunk[1] % 32;
        let touch = touch_of(chunk[2]);
        let pos = model.iter().position(|(k, _)| *k == key);

        match chunk[0] % 6 {
            0 => {
                let value = step as u32;
                let previous = map.set_with_touch(key, value, touch);
                match pos {
                    Some(idx) => {
                        assert_eq!(previous, Some(model[idx].1));
                        model.remove(idx);
                        match touch {
                            Touch::None => model.insert(idx, (key, value)),
                            Touch::AsOld => model.insert(0, (key, value)),
                            Touch::AsNew => model.push((key, value)),
                        }
                    }
                    None => {
                        assert_eq!(previous, None);
                        if touch == Touch::AsOld {
                            model.insert(0, (key, value));
                        } else {
                            model.push((key, value));
                        }
                    }
                }
            }
            1 => {
                let got = map.get_with_touch(&key, touch).copied();
                assert_eq!(got, pos.map(|idx| model[idx].1));
                if let Some(idx) = pos {
                    let entry = model.remove(idx);
                    match touch {
                        Touch::None => model.insert(idx, entry),
                        Touch::AsOld => model.insert(0, entry),
                        Touch::AsNew => model.push(entry),
                    }
                }
            }
            2 => {
                assert_eq!(map.remove(&key), pos.map(|idx| model.remove(idx).1));
            }
            3 => {
                let expected = if model.is_empty() { None } else { Some(model.remove(0).1) };
                assert_eq!(map.shift(), expected);
            }
            4 => {
                let keep = (chunk[1] % 40) as usize;
                map.trim_old(keep);
                if model.len() > keep {
                    model.drain(..model.len() - keep);
                }
            }
            _ => {
                if chunk[2] == 0 {
                    map.clear();
                    model.clear();
                }
            }
        }

        assert_eq!(map.len(), model.len());
    }

    assert!(map.check_invariants().is_ok());
    assert_eq!(map.to_pairs(), model);
});
