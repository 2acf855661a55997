/*!
 * Location Interner Tests
 */

use gpu_mem_tracer::LocationInterner;
use pretty_assertions::assert_eq;

#[test]
fn test_repeated_label_returns_same_handle() {
    let mut interner = LocationInterner::new();
    let handles: Vec<usize> = ["a", "b", "a"]
        .iter()
        .map(|label| interner.intern(label).index())
        .collect();

    assert_eq!(handles, vec![0, 1, 0]);
}

#[test]
fn test_distinct_labels_get_sequential_handles() {
    let mut interner = LocationInterner::new();
    let labels: Vec<String> = (0..50).map(|i| format!("train.py:{} (step)", i)).collect();

    for (expected, label) in labels.iter().enumerate() {
        assert_eq!(interner.intern(label).index(), expected);
    }
    assert_eq!(interner.len(), 50);

    for (index, label) in labels.iter().enumerate() {
        let handle = interner.lookup(label).unwrap();
        assert_eq!(handle.index(), index);
        assert_eq!(interner.resolve(handle), Some(label.as_str()));
    }
}

#[test]
fn test_handles_survive_more_interning() {
    let mut interner = LocationInterner::new();
    let first = interner.intern("first");
    for i in 0..100 {
        interner.intern(&i.to_string());
    }
    assert_eq!(interner.resolve(first), Some("first"));
    assert_eq!(interner.intern("first"), first);
}
