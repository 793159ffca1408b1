//! Parsed form of a navigated path.

use url::Url;

const BASE: &str = "http://localhost/";

/// A path split into its URL components.
///
/// `"/todo/1?tab=notes#top"` yields pathname `/todo/1`, query `tab=notes` and
/// fragment `top`. The pathname is everything before the first `?` or `#`,
/// kept exactly as written: no percent-encoding, no dot-segment or `//`
/// resolution. Only the query and fragment go through the URL parser.
///
/// ```
/// use pyramid_mvu::Location;
///
/// let location = Location::parse("/search?q=rust&tag=a&tag=b#results");
///
/// assert_eq!(location.pathname(), "/search");
/// assert_eq!(location.query("q"), Some("rust"));
/// assert_eq!(location.query_all("tag").collect::<Vec<_>>(), vec!["a", "b"]);
/// assert_eq!(location.hash(), Some("results"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pathname: String,
    search: Option<String>,
    query: Vec<(String, String)>,
    hash: Option<String>,
}

impl Location {
    /// Parse a path, with optional query and fragment.
    ///
    /// A query or fragment the URL parser rejects is dropped.
    pub fn parse(path: &str) -> Self {
        let split = path.find(|c: char| c == '?' || c == '#').unwrap_or(path.len());
        let (pathname, rest) = path.split_at(split);
        let pathname = if pathname.is_empty() { "/" } else { pathname };

        let mut location = Self {
            pathname: pathname.to_string(),
            search: None,
            query: Vec::new(),
            hash: None,
        };
        if rest.is_empty() {
            return location;
        }

        match Url::parse(BASE).and_then(|base| base.join(rest)) {
            Ok(url) => {
                location.search = url.query().map(str::to_string);
                location.query = url
                    .query_pairs()
                    .map(|(key, value)| (key.into_owned(), value.into_owned()))
                    .collect();
                location.hash = url.fragment().map(str::to_string);
            }
            Err(err) => {
                trace_log!("ignoring query and fragment of '{}': {}", path, err);
            }
        }
        location
    }

    /// The path component as written.
    pub fn pathname(&self) -> &str {
        &self.pathname
    }

    /// The raw query string, without the leading `?`.
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// The first decoded value of a query parameter.
    pub fn query(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value.as_str())
    }

    /// Every decoded value of a query parameter, in order of appearance.
    pub fn query_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.query
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, value)| value.as_str())
    }

    /// All decoded query pairs, in order of appearance.
    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    /// The fragment, without the leading `#`.
    pub fn hash(&self) -> Option<&str> {
        self.hash.as_deref()
    }
}
