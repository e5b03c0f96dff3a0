use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

pub fn new_post_id() -> String {
    Uuid::new_v4().to_string()
}

/// Flips `member` in `set` and moves `counter` with it.
///
/// Returns whether `member` is in the set afterwards. The counter saturates
/// at both ends.
pub fn toggle_member(set: &mut BTreeSet<String>, counter: &mut u64, member: &str) -> bool {
    if set.remove(member) {
        *counter = counter.saturating_sub(1);
        false
    } else {
        set.insert(member.to_string());
        *counter = counter.saturating_add(1);
        true
    }
}

/// Moves a denormalised counter up or down by one, saturating.
pub fn bump(counter: &mut u64, up: bool) {
    if up {
        *counter = counter.saturating_add(1);
    } else {
        *counter = counter.saturating_sub(1);
    }
}
