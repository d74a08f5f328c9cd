#![no_main]

use arckit::ds::KeyList;
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary operation sequences on KeyList
//
// Mirrors every operation against a Vec model so both membership and order
// are checked, not just structural invariants.
fuzz_target!(|data: &[u8]| {
    let mut list: KeyList<u8> = KeyList::new();
    let mut model: Vec<u8> = Vec::new();

    for pair in data.chunks_exact(2) {
        let op = pair[0] % 6;
        let key = pair[1] % 32;

        match op {
            0 => {
                if !model.contains(&key) {
                    list.push_front(key);
                    model.insert(0, key);
                }
            }
            1 => {
                if !model.contains(&key) {
                    list.push_back(key);
                    model.push(key);
                }
            }
            2 => {
                let removed = list.remove(&key);
                let pos = model.iter().position(|k| *k == key);
                assert_eq!(removed, pos.is_some());
                if let Some(pos) = pos {
                    model.remove(pos);
                }
            }
            3 => {
                assert_eq!(list.pop_back(), model.pop());
            }
            4 => {
                if let Some(id) = list.find(&key) {
                    assert!(list.move_to_front(id));
                    let pos = model.iter().position(|k| *k == key).unwrap();
                    let k = model.remove(pos);
                    model.insert(0, k);
                } else {
                    assert!(!model.contains(&key));
                }
            }
            5 => {
                list.clear();
                model.clear();
            }
            _ => unreachable!(),
        }

        list.debug_validate_invariants();
        assert_eq!(list.len(), model.len());
        assert_eq!(list.peek_back(), model.last());
        assert!(list.iter().eq(model.iter()));
    }
});
