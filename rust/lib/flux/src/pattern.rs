use std::sync::RwLock;

/// A parsed MQTT-style topic pattern.
///
/// - `+` matches exactly one level
/// - `#` matches any number of remaining levels (only valid as the last segment)
///
/// Levels are separated by `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    raw: String,
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Exact(String),
    Single,
    Rest,
}

impl Pattern {
    /// Parse a pattern. A `#` that is not the last segment is treated as a
    /// literal level.
    pub fn parse(raw: &str) -> Self {
        let parts: Vec<&str> = raw.split('/').collect();
        let last = parts.len() - 1;
        let segments = parts
            .iter()
            .enumerate()
            .map(|(i, part)| match *part {
                "+" => Segment::Single,
                "#" if i == last => Segment::Rest,
                other => Segment::Exact(other.to_string()),
            })
            .collect();
        Self {
            raw: raw.to_string(),
            segments,
        }
    }

    /// The pattern as it was registered.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Check whether a concrete topic path matches this pattern.
    pub fn matches(&self, topic: &str) -> bool {
        let levels: Vec<&str> = topic.split('/').collect();
        let mut i = 0;
        for segment in &self.segments {
            match segment {
                Segment::Rest => return true,
                Segment::Single => {
                    if i >= levels.len() {
                        return false;
                    }
                }
                Segment::Exact(s) => {
                    if levels.get(i) != Some(&s.as_str()) {
                        return false;
                    }
                }
            }
            i += 1;
        }
        i == levels.len()
    }
}

/// Thread-safe table of `(pattern, value)` entries.
///
/// Matching preserves registration order, so handlers and subscribers are
/// invoked in the order they were added.
pub struct PatternTable<T> {
    entries: RwLock<Vec<(Pattern, T)>>,
}

impl<T: Clone> PatternTable<T> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Register a value under a pattern.
    pub fn insert(&self, pattern: &str, value: T) {
        let mut entries = self.entries.write().unwrap();
        entries.push((Pattern::parse(pattern), value));
    }

    /// Remove entries registered under exactly `pattern` for which `pred` holds.
    pub fn remove<F>(&self, pattern: &str, pred: F)
    where
        F: Fn(&T) -> bool,
    {
        let mut entries = self.entries.write().unwrap();
        entries.retain(|(p, v)| !(p.as_str() == pattern && pred(v)));
    }

    /// All values whose pattern matches `topic`, in registration order.
    pub fn match_topic(&self, topic: &str) -> Vec<T> {
        let entries = self.entries.read().unwrap();
        entries
            .iter()
            .filter(|(p, _)| p.matches(topic))
            .map(|(_, v)| v.clone())
            .collect()
    }

    /// Whether something is registered under exactly `pattern`.
    pub fn has_pattern(&self, pattern: &str) -> bool {
        let entries = self.entries.read().unwrap();
        entries.iter().any(|(p, _)| p.as_str() == pattern)
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone> Default for PatternTable<T> {
    fn default() -> Self {
        Self::new()
    }
}
