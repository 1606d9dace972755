use std::sync::Arc;

use crate::metadata::{
    declid::DeclId,
    member::{Member, MemberFlags, MemberPayload, MemberRc},
    source::{DeclInfo, TableSource},
};

// Helper function to create a payload with just a type name
pub fn payload(type_name: &str) -> MemberPayload {
    MemberPayload {
        type_name: type_name.to_string(),
        offset: None,
        flags: MemberFlags::PUBLIC,
    }
}

// Helper function to create a free-standing member handle
pub fn member(id: u64, name: &str) -> MemberRc {
    let info = DeclInfo::new(
        DeclId::new(id),
        Some(name.to_string()),
        MemberPayload::default(),
    );
    Arc::new(Member::new_from_info(&info, None).unwrap())
}

// Helper function to create a table source pre-populated with globals
pub fn global_source(names: &[&str]) -> (Arc<TableSource>, Vec<DeclId>) {
    let source = Arc::new(TableSource::new());
    let ids = names
        .iter()
        .map(|name| source.add_global(name, payload("i32")))
        .collect();
    (source, ids)
}
