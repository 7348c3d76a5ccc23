//! Decoder for `&`/`=`-delimited key-value strings.
//!
//! Query strings, urlencoded form bodies, and (after a `"; "` → `"&"`
//! substitution) cookie headers all share this format. Values are kept
//! exactly as received: no percent-decoding is performed.

/// An insertion-ordered string map with last-writer-wins updates.
///
/// Duplicate keys keep their original position but take the newest value,
/// which matches how browsers and most servers treat repeated query
/// parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    pairs: Vec<(String, String)>,
}

impl Params {
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Inserts a pair, replacing the value in place if the key exists.
    pub fn insert(&mut self, key: String, value: String) {
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.pairs.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterates pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Decodes `key=value` pairs joined by `&` into an ordered map.
///
/// A pair with no `=` yields an empty value; a second `=` belongs to the
/// value. Empty segments (`a=1&&b=2`) are dropped.
///
/// # Example
///
/// ```
/// # use pharos::http::kv::decode;
/// let params = decode("a=1&b=2&c");
/// assert_eq!(params.get("a"), Some("1"));
/// assert_eq!(params.get("c"), Some(""));
/// ```
pub fn decode(input: &str) -> Params {
    let mut out = Params::new();

    for segment in input.split('&') {
        if segment.is_empty() {
            continue;
        }

        match segment.split_once('=') {
            Some((key, value)) => out.insert(key.to_string(), value.to_string()),
            None => out.insert(segment.to_string(), String::new()),
        }
    }

    out
}

/// Decodes a `Cookie` header value (`k=v; k2=v2`).
pub fn decode_cookies(value: &str) -> Params {
    decode(&value.replace("; ", "&"))
}
