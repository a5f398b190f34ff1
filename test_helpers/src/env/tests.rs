//! Unit tests for environment guards.

use super::{remove_var, scope, set_var};

fn current(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

#[test]
fn set_var_restores_absent_variables() {
    let key = "CASCADE_HELPERS_ABSENT";
    {
        let _g = set_var(key, "on");
        assert_eq!(current(key).as_deref(), Some("on"));
    }
    assert_eq!(current(key), None);
}

#[test]
fn stacked_guards_restore_in_reverse() {
    let key = "CASCADE_HELPERS_STACKED";
    let outer = set_var(key, "outer");
    {
        let _inner = set_var(key, "inner");
        assert_eq!(current(key).as_deref(), Some("inner"));
    }
    assert_eq!(current(key).as_deref(), Some("outer"));
    drop(outer);
    assert_eq!(current(key), None);
}

#[test]
fn remove_var_puts_the_value_back() {
    let key = "CASCADE_HELPERS_REMOVED";
    let _outer = set_var(key, "kept");
    {
        let _g = remove_var(key);
        assert_eq!(current(key), None);
    }
    assert_eq!(current(key).as_deref(), Some("kept"));
}

#[test]
fn scope_applies_and_restores_a_batch() {
    let set = "CASCADE_HELPERS_SCOPE_SET";
    let unset = "CASCADE_HELPERS_SCOPE_UNSET";
    let _prior = set_var(unset, "before");
    {
        let _scope = scope([(set, Some("1")), (unset, None)]);
        assert_eq!(current(set).as_deref(), Some("1"));
        assert_eq!(current(unset), None);
    }
    assert_eq!(current(set), None);
    assert_eq!(current(unset).as_deref(), Some("before"));
}
