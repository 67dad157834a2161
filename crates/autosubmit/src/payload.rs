/// Snapshot of a form's fields at the moment of a change event.
///
/// Pairs keep document order and duplicate names, like `FormData`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    fields: Vec<(String, String)>,
}

impl Payload {
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    /// First value submitted under `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_returns_first_value() {
        let payload = Payload::from_pairs([("volume", "42"), ("tag", "a"), ("tag", "b")]);
        assert_eq!(payload.get("volume"), Some("42"));
        assert_eq!(payload.get("tag"), Some("a"));
        assert_eq!(payload.get("missing"), None);
        assert_eq!(payload.len(), 3);
    }

    #[test]
    fn test_push_keeps_order() {
        let mut payload = Payload::new();
        assert!(payload.is_empty());
        payload.push("b", "2");
        payload.push("a", "1");
        let names: Vec<_> = payload.iter().map(|(k, _)| k).collect();
        assert_eq!(names, ["b", "a"]);
    }
}
