//! Label uniqueness.

use rustc_hash::FxHashMap;

/// Hands out assembly labels that never collide.
///
/// The first request for a name returns it unchanged; each later request
/// appends the number of earlier requests, so `f.else` is followed by
/// `f.else.1`, `f.else.2`, and so on.
#[derive(Debug, Default)]
pub struct LabelRegistry {
    issued: FxHashMap<String, u32>,
}

impl LabelRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a unique label derived from `name`.
    pub fn request(&mut self, name: &str) -> String {
        let count = self.issued.entry(name.to_string()).or_insert(0);
        let label = match *count {
            0 => name.to_string(),
            n => format!("{}.{}", name, n),
        };
        *count += 1;
        label
    }
}
