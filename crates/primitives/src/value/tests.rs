use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;

#[test]
fn nil_is_default() {
	let v = Value::default();
	assert!(v.is_nil());
	assert_eq!(v.type_name(), "nil");
	assert!(v.downcast_ref::<String>().is_none());
	assert!(v.into_option().is_none());
}

#[test]
fn downcast_matches_stored_type_only() {
	let v = Value::from("hello");
	assert_eq!(v.downcast_ref::<String>().map(String::as_str), Some("hello"));
	assert!(v.downcast_ref::<i64>().is_none());
	assert!(v.is::<String>());

	let n = Value::from(1234_i32);
	assert_eq!(n.downcast_ref::<i32>(), Some(&1234));
	assert!(n.downcast_ref::<i64>().is_none());
}

#[test]
fn clones_share_payload() {
	let v = Value::new(AtomicUsize::new(0));
	let w = v.clone();
	assert!(v.ptr_eq(&w));

	w.downcast_ref::<AtomicUsize>().unwrap().fetch_add(3, Ordering::SeqCst);
	assert_eq!(v.downcast_ref::<AtomicUsize>().unwrap().load(Ordering::SeqCst), 3);

	let shared: Arc<AtomicUsize> = v.downcast().unwrap();
	assert_eq!(shared.load(Ordering::SeqCst), 3);
}

#[test]
fn distinct_values_are_not_ptr_eq() {
	assert!(!Value::from("a").ptr_eq(&Value::from("a")));
	assert!(Value::nil().ptr_eq(&Value::nil()));
	assert!(!Value::nil().ptr_eq(&Value::from(true)));
}

#[test]
fn debug_shows_common_scalars() {
	assert_eq!(format!("{:?}", Value::from("x")), r#"Value("x")"#);
	assert_eq!(format!("{:?}", Value::from(true)), "Value(true)");
	assert_eq!(format!("{:?}", Value::nil()), "Value(<nil>)");
}
