//! End-to-end scenarios over the public operation surface.

use anyhow::Result;
use pretty_assertions::assert_eq;
use varmap::{ErrorKind, Key, SortMode, Value, VarMap};

#[test]
fn grouping_rows_end_to_end() {
    let rows = VarMap::from_values([
        Value::Map(VarMap::from_pairs([
            ("name", Value::from("alpha")),
            ("score", Value::Int(3)),
        ])),
        Value::Map(VarMap::from_pairs([
            ("name", Value::from("beta")),
            ("score", Value::Int(5)),
        ])),
        Value::Map(VarMap::from_pairs([
            ("name", Value::from("gamma")),
            ("score", Value::Int(4)),
        ])),
    ]);

    let scores = rows.pluck_with_keys("score", "name");
    assert_eq!(scores.get("beta"), Some(&Value::Int(5)));
    assert_eq!(scores.sum(), Some(Value::Int(12)));
    assert_eq!(scores.avg(), Some(4.0));
    assert_eq!(scores.median(), Some(4.0));

    let top = scores
        .filter(|v, _| v.as_number().unwrap_or(0.0) >= 4.0)
        .sort(SortMode::Numeric)
        .reverse(false);
    assert_eq!(top, VarMap::from_values([5, 4]));
}

#[test]
fn diff_intersect_scenarios() -> Result<()> {
    let map = VarMap::from_pairs([(0, 1), (1, 2), (2, 3)]);
    let diffed = map.diff([[2, 3]])?;
    assert_eq!(diffed, VarMap::from_pairs([(0, 1)]));

    let intersected = map.intersect([[2, 3]])?;
    assert_eq!(intersected, VarMap::from_pairs([(1, 2), (2, 3)]));
    Ok(())
}

#[test]
fn combine_scenario() -> Result<()> {
    let combined = VarMap::from_values(["a", "b"]).combine([1, 2])?;
    assert_eq!(combined, VarMap::from_pairs([("a", 1), ("b", 2)]));
    Ok(())
}

#[test]
fn chunk_scenario() -> Result<()> {
    let chunks = VarMap::from_values([1, 2, 3, 4, 5]).chunk(2, false)?;
    let rendered: Vec<String> = chunks.iter().map(|(_, c)| c.to_string()).collect();
    assert_eq!(rendered, ["{0: 1, 1: 2}", "{0: 3, 1: 4}", "{0: 5}"]);
    Ok(())
}

#[test]
fn merge_and_replace_diverge_on_integer_keys() {
    let base = VarMap::from_values(["a", "b"]);
    let incoming = VarMap::from_values(["c"]);

    let merged = base.merge([&incoming]).unwrap();
    assert_eq!(merged, VarMap::from_values(["a", "b", "c"]));

    let replaced = base.replace(&incoming).unwrap();
    assert_eq!(replaced, VarMap::from_values(["c", "b"]));
}

#[test]
fn flatten_collapse_and_unique_pipeline() {
    let nested = VarMap::from_values([
        Value::List(vec![Value::Int(1), Value::Int(2)]),
        Value::List(vec![Value::Int(2), Value::List(vec![Value::Int(3)])]),
    ]);

    let collapsed = nested.collapse().unwrap();
    assert_eq!(collapsed.len(), 4);

    let flat = nested.flatten().unique(SortMode::Numeric);
    assert_eq!(flat.values(), VarMap::from_values([1, 2, 3]));
}

#[test]
fn errors_are_typed_and_atomic() {
    let map = VarMap::from_values([1, 2, 3]);

    let err = map.combine([1]).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidArgument(_)));
    // Failed operations never leave a partially built receiver behind.
    assert_eq!(map, VarMap::from_values([1, 2, 3]));

    let err = map.rand(17).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::OutOfRange(_)));
    assert!(err.to_string().contains("17"));
}

#[test]
fn slicing_against_plain_vectors() {
    let values = [2, 4, 6, 8, 10];
    let map = VarMap::from_values(values);

    for (offset, len) in [(0, None), (1, Some(2)), (-3, None), (0, Some(-1)), (4, Some(9))] {
        let sliced = map.slice(offset, len, false);
        let start = if offset < 0 {
            (values.len() as i64 + offset).max(0) as usize
        } else {
            (offset as usize).min(values.len())
        };
        let end = match len {
            None => values.len(),
            Some(l) if l < 0 => (values.len() as i64 + l).max(start as i64) as usize,
            Some(l) => (start + l as usize).min(values.len()),
        };
        let expected = VarMap::from_values(values[start..end].iter().copied());
        assert_eq!(sliced, expected, "slice({offset}, {len:?})");
    }
}

#[test]
fn keys_survive_round_trips() {
    let map = VarMap::from_pairs([
        (Key::Str("a".into()), Value::Int(1)),
        (Key::Int(3), Value::Int(2)),
    ]);

    assert_eq!(map.reverse(true).reverse(true), map);
    assert_eq!(map.ksort(SortMode::Regular).len(), map.len());

    let keys: Vec<Key> = map.keys().iter().map(|(_, v)| match v {
        Value::Int(i) => Key::Int(*i),
        Value::Str(s) => Key::Str(s.clone()),
        other => panic!("unexpected key value {other:?}"),
    }).collect();
    assert_eq!(keys, [Key::Str("a".into()), Key::Int(3)]);
}
