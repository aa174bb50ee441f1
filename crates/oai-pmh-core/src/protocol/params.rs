//! Raw request arguments.

/// Argument names defined by the protocol.
pub const RECOGNIZED: [&str; 7] = [
    "verb",
    "resumptionToken",
    "metadataPrefix",
    "identifier",
    "from",
    "until",
    "set",
];

/// The query arguments of one request, in the order they were supplied.
///
/// Values are kept unparsed; each verb handler validates the arguments it
/// cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
    pairs: Vec<(String, String)>,
}

impl RequestParams {
    /// Create from already-decoded `(name, value)` pairs.
    pub fn new<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Returns the first value supplied for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if `name` was supplied.
    pub fn contains(&self, name: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == name)
    }

    /// Iterate over the supplied names, repeats included.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(k, _)| k.as_str())
    }

    /// Returns true if no arguments were supplied.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Names outside the protocol's argument set, first occurrence order,
    /// without duplicates.
    pub fn unrecognized(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for name in self.names() {
            if !RECOGNIZED.contains(&name) && !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// Protocol argument names supplied more than once.
    pub fn repeated(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for name in self.names() {
            if RECOGNIZED.contains(&name)
                && !names.contains(&name)
                && self.names().filter(|n| *n == name).count() > 1
            {
                names.push(name);
            }
        }
        names
    }

    /// The protocol arguments, in supplied order, for echoing back.
    pub fn recognized(&self) -> Vec<(String, String)> {
        self.pairs
            .iter()
            .filter(|(k, _)| RECOGNIZED.contains(&k.as_str()))
            .cloned()
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for RequestParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(iter)
    }
}
