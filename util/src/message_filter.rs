use std::{collections::HashSet, hash::Hash};

/// Keeps only the latest message per key, preserving the original order of the remaining
/// messages.
///
/// Messages for which `get_key` returns `None` are always kept.
pub fn keep_last_per_key<Msg, Key: Eq + Hash>(
    messages: Vec<Msg>,
    mut get_key: impl FnMut(&Msg) -> Option<Key>,
) -> Vec<Msg> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(messages.len());
    for msg in messages.into_iter().rev() {
        match get_key(&msg) {
            Some(key) => {
                if seen.insert(key) {
                    out.push(msg);
                }
            }
            None => out.push(msg),
        }
    }
    out.reverse();
    out
}
