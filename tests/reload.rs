//! Unload/reload cycles: identity recovery, open-scope growth, detachment.

use std::sync::Arc;

use declscope::prelude::*;

fn payload(type_name: &str) -> MemberPayload {
    MemberPayload {
        type_name: type_name.to_string(),
        offset: None,
        flags: MemberFlags::PUBLIC,
    }
}

#[test]
fn reload_preserves_handle_identity() {
    let source = Arc::new(TableSource::new());
    let id_a = source.add_global("x", payload("i32"));

    let mut globals = MemberRegistry::new(source.clone(), None);
    let handle = globals.get(id_a).unwrap();

    globals.unload();
    source.retire(id_a);
    let id_b = source.add_global("x", payload("i64"));

    let recovered = globals.get(id_b).unwrap();
    assert!(Arc::ptr_eq(&recovered, &handle));
    assert_eq!(handle.declaration_id(), id_b);
    assert_eq!(handle.type_name(), "i64");

    // the stale id is dead even though the handle lives on
    assert!(globals.get(id_a).is_none());
}

#[test]
fn external_reference_sees_refreshed_payload() {
    let source = Arc::new(TableSource::new());
    let old = source.add_global("g_mode", payload("u8"));

    let mut globals = MemberRegistry::new(source.clone(), None);
    // an external consumer holds the handle across the whole cycle
    let external = globals.get(old).unwrap();
    assert_eq!(external.type_name(), "u8");

    globals.unload();
    source.retire(old);
    let new = source.add_global(
        "g_mode",
        MemberPayload {
            type_name: "u32".to_string(),
            offset: Some(16),
            flags: MemberFlags::PUBLIC | MemberFlags::STATIC,
        },
    );
    globals.load();

    assert_eq!(external.declaration_id(), new);
    assert_eq!(external.type_name(), "u32");
    assert_eq!(external.offset(), Some(16));
    assert!(external.is_static());
}

#[test]
fn open_scope_reload_picks_up_new_members() {
    let source = Arc::new(TableSource::new());
    source.add_global("a", payload("i32"));

    let mut globals = MemberRegistry::new(source.clone(), None);
    globals.load();
    let a_first = globals.find_by_name("a").unwrap();

    source.add_global("b", payload("i32"));
    globals.load();

    let names: Vec<_> = globals.iter().map(|m| m.name().to_string()).collect();
    assert_eq!(names, ["a", "b"]);

    // "a" was neither duplicated nor replaced
    let a_second = globals.find_by_name("a").unwrap();
    assert!(Arc::ptr_eq(&a_first, &a_second));
}

#[test]
fn full_cycle_scenario() {
    let source = Arc::new(TableSource::new());
    let id_counter = source.add_global("g_counter", payload("u64"));
    let id_flag = source.add_global("g_flag", payload("bool"));

    let mut globals = MemberRegistry::new(source.clone(), None);
    globals.load();

    let names: Vec<_> = globals.iter().map(|m| m.name().to_string()).collect();
    assert_eq!(names, ["g_counter", "g_flag"]);
    let counter = globals.find_by_name("g_counter").unwrap();

    globals.unload();
    assert!(globals.is_empty());
    assert_eq!(globals.unloaded_count(), 2);

    // the source now only knows a reissued g_counter
    source.retire(id_counter);
    source.retire(id_flag);
    let id_reissued = source.add_global("g_counter", payload("u64"));

    let recovered = globals.get(id_reissued).unwrap();
    assert!(Arc::ptr_eq(&recovered, &counter));
    assert_eq!(recovered.declaration_id(), id_reissued);
    // g_flag stays parked; nothing resurrected it
    assert_eq!(globals.unloaded_count(), 1);
    assert!(globals.unloaded_by_name("g_flag").is_some());
}

#[test]
fn colliding_names_recover_first_parked() {
    let source = Arc::new(TableSource::new());
    // two same-named globals; resolution is ambiguous by design
    let first = source.add_global("value", payload("i16"));
    let second = source.add_global("value", payload("i64"));

    let mut globals = MemberRegistry::new(source.clone(), None);
    let h_first = globals.get(first).unwrap();
    let h_second = globals.get(second).unwrap();
    assert!(!Arc::ptr_eq(&h_first, &h_second));

    globals.unload();

    // recovery hands out parked handles in parking order; the reissued
    // declaration may get either one, and that imprecision is accepted
    source.retire(first);
    source.retire(second);
    let reissued = source.add_global("value", payload("i64"));
    let recovered = globals.get(reissued).unwrap();
    assert!(Arc::ptr_eq(&recovered, &h_first));
    assert_eq!(globals.unloaded_count(), 1);
}

#[test]
fn clear_forgets_parked_handles() {
    let source = Arc::new(TableSource::new());
    let id = source.add_global("x", payload("i32"));

    let mut globals = MemberRegistry::new(source.clone(), None);
    let original = globals.get(id).unwrap();
    globals.unload();
    globals.clear();

    // after clear there is nothing to recover: same name now means new handle
    source.retire(id);
    let reissued = source.add_global("x", payload("i32"));
    let fresh = globals.get(reissued).unwrap();
    assert!(!Arc::ptr_eq(&fresh, &original));
}

#[test]
fn delete_detaches_all_handles() {
    let source = Arc::new(TableSource::new());
    let id_a = source.add_global("a", payload("i32"));
    source.add_global("b", payload("i32"));

    let mut globals = MemberRegistry::new(source.clone(), None);
    globals.load();
    let active_handle = globals.get(id_a).unwrap();
    let parked_handle = globals.find_by_name("b").unwrap();
    globals.unload_member(&parked_handle);

    globals.delete();

    assert!(active_handle.is_detached());
    assert!(parked_handle.is_detached());
    assert!(globals.is_empty());
    assert_eq!(globals.unloaded_count(), 0);
    assert!(!globals.is_loaded());
}
