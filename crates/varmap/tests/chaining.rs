//! Builder-style chaining and the collaborator contracts (counting,
//! array-like conversion, indexed access, iteration, display).

use varmap::{Countable, Entries, Key, SortMode, Value, VarMap};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn mutations_chain_on_the_receiver() {
    init_logging();
    let mut map = VarMap::new();
    map.push(3)
        .add([1, 4])
        .set("label", "digits")
        .unshift([0])
        .remove("label");
    assert_eq!(map, VarMap::from_values([0, 3, 1, 4]));

    map.transform(|v, _| Value::Int(v.as_number().unwrap_or(0.0) as i64 + 1))
        .shuffle();
    assert_eq!(map.sort(SortMode::Numeric), VarMap::from_values([1, 2, 4, 5]));
}

#[test]
fn non_mutating_operations_leave_the_receiver_alone() {
    let map = VarMap::from_values([3, 1, 2]);
    let _sorted = map.sort(SortMode::Numeric);
    let _packed = map.values();
    let _reversed = map.reverse(false);
    assert_eq!(map, VarMap::from_values([3, 1, 2]));
}

#[test]
fn counting_contract() {
    let map = VarMap::from_values([1, 2, 3]);
    assert_eq!(map.count(), 3);
    assert_eq!(map.count(), map.len());
    assert!(!map.is_empty());
    assert!(VarMap::new().is_empty());
}

#[test]
fn array_like_conversion_contract() {
    // Lists convert with packed integer keys.
    let list = Value::List(vec![Value::Int(9), Value::Int(8)]);
    let entries = list.entries().unwrap();
    assert_eq!(entries[0], (Key::Int(0), Value::Int(9)));
    assert_eq!(entries[1], (Key::Int(1), Value::Int(8)));

    // Nested maps convert with their own keys.
    let map = Value::Map(VarMap::from_pairs([("a", 1)]));
    let entries = map.entries().unwrap();
    assert_eq!(entries[0].0, Key::Str("a".into()));

    // Scalars are refused.
    assert!(Value::Int(3).entries().is_err());
    assert!(Value::Null.entries().is_err());
}

#[test]
fn indexed_access_contract() {
    let mut map = VarMap::from_pairs([("a", 1)]);
    assert_eq!(map["a"], Value::Int(1));

    map["a"] = Value::Int(2);
    assert_eq!(map.get("a"), Some(&Value::Int(2)));

    // Writing through an absent key appends, like `set`.
    map[7] = Value::from("x");
    assert_eq!(map.last_key(), Some(&Key::Int(7)));

    // Coercion applies to indexing too.
    assert_eq!(map["7"], Value::from("x"));
}

#[test]
#[should_panic(expected = "no entry found for key")]
fn indexing_an_absent_key_panics() {
    let map = VarMap::new();
    let _ = &map["missing"];
}

#[test]
fn iteration_contract() {
    let map = VarMap::from_pairs([("a", 1), ("b", 2)]);

    // Borrowing iteration is restartable and does not mutate.
    let first: Vec<String> = map.iter().map(|(k, _)| k.to_string()).collect();
    let second: Vec<String> = (&map).into_iter().map(|(k, _)| k.to_string()).collect();
    assert_eq!(first, second);
    assert_eq!(map.len(), 2);

    // Consuming iteration yields owned pairs in order.
    let pairs: Vec<(Key, Value)> = map.clone().into_iter().collect();
    assert_eq!(pairs[0], (Key::Str("a".into()), Value::Int(1)));

    // Collection from pairs and extension round-trip.
    let mut rebuilt: VarMap = pairs.into_iter().collect();
    rebuilt.extend([("c", 3)]);
    assert_eq!(rebuilt.len(), 3);
}

#[test]
fn display_renders_entries_in_order() {
    let mut map = VarMap::from_pairs([("a", Value::Int(1))]);
    map.push(Value::List(vec![Value::from("x")]));
    assert_eq!(map.to_string(), r#"{"a": 1, 0: ["x"]}"#);
    assert_eq!(VarMap::new().to_string(), "{}");
}

#[test]
fn derived_operations_compose() {
    let map = VarMap::from_values([5, 3, 8, 1, 9, 2]);
    let result = map
        .filter(|v, _| v.as_number().unwrap_or(0.0) > 2.0)
        .sort(SortMode::Numeric)
        .take(3)
        .pipe(|m| m.implode("+"));
    assert_eq!(result, "3+5+8");

    let total = map
        .merge([VarMap::from_values([10])])
        .unwrap()
        .reduce(0i64, |acc, v, _| acc + v.as_number().unwrap_or(0.0) as i64);
    assert_eq!(total, 38);
}
