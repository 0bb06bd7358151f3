//! Entity identifiers.
//!
//! Equipment, connections, groups and labels use opaque random ids so
//! pasted or imported entities never collide with existing ones. Layers use
//! short sequential ids (`layer-1`, `layer-2`, ...) next to the reserved
//! `default` layer.

/// Fresh random entity id.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Next sequential id for `prefix`, one past the highest numeric suffix in use.
pub fn next_id<'a, I>(prefix: &str, ids: I) -> String
where
    I: Iterator<Item = &'a String>,
{
    let mut max = 0u32;
    for id in ids {
        if let Some(num) = id.strip_prefix(prefix) {
            if let Ok(value) = num.parse::<u32>() {
                if value > max {
                    max = value;
                }
            }
        }
    }
    format!("{}{}", prefix, max + 1)
}
