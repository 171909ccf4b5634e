//! Endpoint descriptors for TuneIn requests
//!
//! A [`Request`] is the path and the sparse query parameters of one call.
//! Parameters whose value is missing or empty are never added, so the
//! outgoing query only carries what the caller actually set.

use std::fmt;

/// TuneIn OPML endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Free text search
    Search,
    /// Stream resolution for a guide id
    Tune,
    /// Directory navigation
    Browse,
}

impl Endpoint {
    /// Path relative to the service base URL
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Search => "Search.ashx",
            Endpoint::Tune => "Tune.ashx",
            Endpoint::Browse => "Browse.ashx",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// One request to a TuneIn endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    endpoint: Endpoint,
    params: Vec<(&'static str, String)>,
}

impl Request {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            params: Vec::new(),
        }
    }

    /// Add a parameter if `value` is present and non-empty
    pub fn param<V: AsRef<str>>(mut self, name: &'static str, value: Option<V>) -> Self {
        if let Some(value) = value {
            let value = value.as_ref();
            if !value.is_empty() {
                self.params.push((name, value.to_string()));
            }
        }
        self
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    /// Parameters in insertion order
    pub fn params(&self) -> &[(&'static str, String)] {
        &self.params
    }

    /// Get a parameter value by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// `Search.ashx?query=`
    pub fn search(query: &str) -> Self {
        Self::new(Endpoint::Search).param("query", Some(query))
    }

    /// `Tune.ashx?id=`
    pub fn tune(id: &str) -> Self {
        Self::new(Endpoint::Tune).param("id", Some(id))
    }

    /// `Browse.ashx` with the options that are set
    pub fn browse(options: &BrowseOptions) -> Self {
        Self::new(Endpoint::Browse)
            .param("c", options.channel.as_deref())
            .param("id", options.id.as_deref())
            .param("filter", options.filter.as_deref())
            .param(
                "offset",
                options.offset.filter(|o| *o > 0).map(|o| o.to_string()),
            )
            .param("pivot", options.pivot.as_deref())
            .param("username", options.username.as_deref())
    }
}

/// Optional parameters of a browse call
///
/// `offset` of `0` is treated as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowseOptions {
    /// Category tag, sent as `c`
    pub channel: Option<String>,
    /// Guide id to browse into
    pub id: Option<String>,
    /// Result filter (e.g. "s" for stations only)
    pub filter: Option<String>,
    /// Pagination offset
    pub offset: Option<u32>,
    /// Pivot (e.g. "name", "genre")
    pub pivot: Option<String>,
    /// TuneIn account name
    pub username: Option<String>,
}

impl BrowseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    pub fn category(self, category: Category) -> Self {
        self.channel(category.as_str())
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn pivot(mut self, pivot: impl Into<String>) -> Self {
        self.pivot = Some(pivot.into());
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }
}

/// Root browse categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Local,
    Music,
    Talk,
    Sports,
    Lang,
    Podcast,
    Popular,
    Best,
}

impl Category {
    /// All root categories
    pub const ALL: [Category; 8] = [
        Category::Local,
        Category::Music,
        Category::Talk,
        Category::Sports,
        Category::Lang,
        Category::Podcast,
        Category::Popular,
        Category::Best,
    ];

    /// Value of the `c` parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Local => "local",
            Category::Music => "music",
            Category::Talk => "talk",
            Category::Sports => "sports",
            Category::Lang => "lang",
            Category::Podcast => "podcast",
            Category::Popular => "popular",
            Category::Best => "best",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Guide id of the "By Location" root
pub const LOCATIONS_ROOT_ID: &str = "r0";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(Endpoint::Search.path(), "Search.ashx");
        assert_eq!(Endpoint::Tune.path(), "Tune.ashx");
        assert_eq!(Endpoint::Browse.to_string(), "Browse.ashx");
    }

    #[test]
    fn test_empty_values_are_omitted() {
        let req = Request::new(Endpoint::Browse)
            .param("c", Some(""))
            .param("id", None::<&str>)
            .param("filter", Some("s"));

        assert_eq!(req.params(), &[("filter", "s".to_string())]);
        assert_eq!(req.get("c"), None);
    }

    #[test]
    fn test_browse_without_options() {
        let req = Request::browse(&BrowseOptions::default());
        assert_eq!(req.endpoint(), Endpoint::Browse);
        assert!(req.params().is_empty());
    }

    #[test]
    fn test_browse_full_options_keep_order() {
        let options = BrowseOptions::new()
            .category(Category::Music)
            .id("g22")
            .filter("s")
            .offset(25)
            .pivot("name")
            .username("alice");

        let req = Request::browse(&options);
        let names: Vec<&str> = req.params().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, ["c", "id", "filter", "offset", "pivot", "username"]);
        assert_eq!(req.get("c"), Some("music"));
        assert_eq!(req.get("offset"), Some("25"));
        assert_eq!(req.get("username"), Some("alice"));
    }

    #[test]
    fn test_zero_offset_is_omitted() {
        let req = Request::browse(&BrowseOptions::new().id("r0").offset(0));
        assert_eq!(req.get("offset"), None);
        assert_eq!(req.get("id"), Some("r0"));
    }

    #[test]
    fn test_search_and_tune() {
        assert_eq!(Request::search("jazz").get("query"), Some("jazz"));
        assert_eq!(Request::tune("s67868").get("id"), Some("s67868"));
        assert!(Request::search("").params().is_empty());
    }

    #[test]
    fn test_category_tags() {
        let tags: Vec<&str> = Category::ALL.iter().map(Category::as_str).collect();
        assert_eq!(
            tags,
            ["local", "music", "talk", "sports", "lang", "podcast", "popular", "best"]
        );
    }
}
