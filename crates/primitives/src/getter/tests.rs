use std::collections::HashMap;

use super::*;

#[test]
fn typed_reads_from_context() {
	let mut cxt = Context::new();
	cxt.add("s", "string");
	cxt.add("b", true);
	cxt.add("i", 42_i64);
	cxt.add("f", 1.5_f64);

	assert_eq!(cxt.get_as("s", String::new()), "string");
	assert!(cxt.get_as("b", false));
	assert_eq!(cxt.get_as("i", 0_i64), 42);
	assert_eq!(cxt.get_as("f", 0.0_f64), 1.5);

	// Wrong type or missing key yields the default.
	assert_eq!(cxt.get_as("i", String::from("dflt")), "dflt");
	assert_eq!(cxt.get_as("missing", 7_i64), 7);
	assert_eq!(cxt.has_as::<bool>("s"), None);
	assert_eq!(cxt.has_as::<String>("s").as_deref(), Some("string"));
}

#[test]
fn typed_reads_from_params() {
	let params: Params = [("n", Value::from(3_i32))].into_iter().collect();
	assert_eq!(params.get_as::<i32>("n"), Some(&3));
	assert_eq!(Getter::get_as(&params, "n", 0_i32), 3);
	assert!(params.get_value("x", "d").is::<String>());
}

#[test]
fn key_value_getter_treats_nil_as_absent() {
	let mut map = HashMap::new();
	map.insert("k".to_string(), Value::from("v"));
	map.insert("nil".to_string(), Value::nil());

	let getter = KeyValueGetter(&map);
	assert!(getter.lookup("k").is_some());
	assert!(getter.lookup("nil").is_none());
	assert_eq!(getter.get_as("nil", String::from("d")), "d");
}

#[test]
fn first_source_with_key_wins() {
	let mut a = Context::new();
	a.add("only_a", 1_i64);
	let mut b = Context::new();
	b.add("shared", 2_i64);
	a.add("shared", 3_i64);
	b.add("only_b", 4_i64);

	let sources: [&dyn Getter; 2] = [&a, &b];
	let (v, idx) = get_from_first("shared", Value::nil(), &sources);
	assert_eq!((v.downcast_ref::<i64>(), idx), (Some(&3), Some(0)));

	let (v, idx) = get_from_first("only_b", Value::nil(), &sources);
	assert_eq!((v.downcast_ref::<i64>(), idx), (Some(&4), Some(1)));

	let (v, idx) = get_from_first("nowhere", "dflt", &sources);
	assert_eq!((v.downcast_ref::<String>().map(String::as_str), idx), (Some("dflt"), None));
}

#[test]
fn fallback_answers_every_key() {
	let fallback = Fallback(Value::from(9_i64));
	let empty = Context::new();
	let sources: [&dyn Getter; 2] = [&empty, &fallback];
	let (v, idx) = get_from_first("anything", Value::nil(), &sources);
	assert_eq!((v.downcast_ref::<i64>(), idx), (Some(&9), Some(1)));
}
