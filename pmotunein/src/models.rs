//! Data models for TuneIn OPML responses
//!
//! Every TuneIn endpoint answers with the same envelope:
//!
//! ```json
//! { "head": { "status": "200", "title": "Browse" }, "body": [ ... ] }
//! ```
//!
//! The body items are loosely typed: their fields depend on the kind of
//! outline (link, station, topic, audio stream...). [`Item`] therefore maps
//! the fields shared by most outlines and keeps everything else in
//! [`Item::extra`].

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use url::Url;

// ============================================================================
// Envelope
// ============================================================================

/// Top-level TuneIn response
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Envelope {
    /// Response header (status, title, fault)
    #[serde(default)]
    pub head: Head,
    /// Outline items
    #[serde(default)]
    pub body: Vec<Item>,
}

impl Envelope {
    /// Check whether TuneIn reported success
    pub fn is_success(&self) -> bool {
        self.head.status.is_some_and(|s| s.is_ok())
    }

    /// Iterate over top-level items of a given `element` kind
    pub fn items_by_element<'a>(&'a self, element: &'a str) -> impl Iterator<Item = &'a Item> {
        self.body
            .iter()
            .filter(move |item| item.element.as_deref() == Some(element))
    }
}

/// Response header
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Head {
    /// Status code (numeric or string on the wire)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    /// Page title (e.g. "Browse", "Music")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Error message when the request failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fault: Option<String>,
    /// Error code when the request failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fault_code: Option<String>,
    /// Unmapped header fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ============================================================================
// Status
// ============================================================================

/// Normalized TuneIn status code
///
/// TuneIn sends the status either as `200` or as `"200"`. Both decode to
/// the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Status(u16);

impl Status {
    /// The success status
    pub const OK: Status = Status(200);

    pub fn new(code: u16) -> Self {
        Self(code)
    }

    pub fn code(&self) -> u16 {
        self.0
    }

    pub fn is_ok(&self) -> bool {
        *self == Self::OK
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawStatus {
            Number(u64),
            Text(String),
        }

        let code = match RawStatus::deserialize(deserializer)? {
            RawStatus::Number(n) => u16::try_from(n).map_err(serde::de::Error::custom)?,
            RawStatus::Text(s) => s.trim().parse::<u16>().map_err(|_| {
                serde::de::Error::custom(format!("invalid TuneIn status: {:?}", s))
            })?,
        };

        Ok(Status(code))
    }
}

impl Serialize for Status {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u16(self.0)
    }
}

// ============================================================================
// Items
// ============================================================================

/// Accept a string, number or boolean where text is expected
///
/// Any other JSON value reads as absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// One outline of a TuneIn response body
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Item {
    /// Outline element ("outline", "audio", ...)
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub element: Option<String>,
    /// Outline type ("link", "audio", "text", ...)
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,
    /// Display text
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub text: Option<String>,
    /// Target URL (browse link or stream)
    #[serde(
        rename = "URL",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub url: Option<String>,
    /// Guide identifier (e.g. "s67868", "g22", "r0")
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub guide_id: Option<String>,
    /// Section key (e.g. "local", "stations")
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub key: Option<String>,
    /// Item kind for audio outlines ("station", "topic", "show")
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub item: Option<String>,
    /// Logo URL
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<String>,
    /// Secondary text (current show, location...)
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub subtext: Option<String>,
    /// Preset identifier
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub preset_id: Option<String>,
    /// Nested outlines
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Item>>,
    /// Parsed form of [`Item::url`], filled by the client
    #[serde(rename = "URLObj", skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub url_obj: Option<UrlObj>,
    /// Unmapped fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Item {
    /// Check whether this outline is a browse link
    pub fn is_link(&self) -> bool {
        self.kind.as_deref() == Some("link")
    }

    /// Check whether this outline is playable
    pub fn is_audio(&self) -> bool {
        self.kind.as_deref() == Some("audio") || self.element.as_deref() == Some("audio")
    }

    /// Nested outlines, empty when the item has none
    pub fn children(&self) -> &[Item] {
        self.children.as_deref().unwrap_or_default()
    }

    /// Get an unmapped field
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.extra.get(field)
    }

    /// Get an unmapped string field
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    /// Stream location of a tune result
    ///
    /// `Tune.ashx` reports it in a lowercase `url` field, browse outlines
    /// in `URL`.
    pub fn stream_url(&self) -> Option<&str> {
        self.get_str("url")
            .or(self.url.as_deref())
            .filter(|u| !u.is_empty())
    }

    /// Declared media type of a tune result ("mp3", "aac", "hls"...)
    pub fn media_type(&self) -> Option<&str> {
        self.get_str("media_type")
    }

    /// Attach the parsed form of `URL`
    ///
    /// Relative URLs are resolved against `base`. Returns `false` when the
    /// item has a non-empty `URL` that cannot be parsed.
    pub(crate) fn enrich_url(&mut self, base: &Url) -> bool {
        self.extra.remove("URLObj");
        self.url_obj = None;

        let Some(raw) = self.url.as_deref().filter(|u| !u.is_empty()) else {
            return true;
        };

        let parsed = match Url::parse(raw) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => base.join(raw),
            Err(e) => Err(e),
        };

        match parsed {
            Ok(url) => {
                self.url_obj = Some(UrlObj::from_url(raw, &url));
                true
            }
            Err(_) => false,
        }
    }
}

// ============================================================================
// Parsed URLs
// ============================================================================

/// Structured components of an item URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlObj {
    /// The URL as TuneIn sent it
    pub href: String,
    /// Scheme without the trailing colon
    pub scheme: String,
    /// Host name
    pub host: Option<String>,
    /// Explicit port
    pub port: Option<u16>,
    /// Path component
    pub path: String,
    /// Raw query string without the leading '?'
    pub search: Option<String>,
    /// Decoded query parameters (last occurrence wins)
    pub query: BTreeMap<String, String>,
    /// Fragment without the leading '#'
    pub fragment: Option<String>,
}

impl UrlObj {
    /// Parse an absolute URL string
    pub fn parse(href: &str) -> Result<Self, url::ParseError> {
        let url = Url::parse(href)?;
        Ok(Self::from_url(href, &url))
    }

    fn from_url(href: &str, url: &Url) -> Self {
        let mut query = BTreeMap::new();
        for (name, value) in url.query_pairs() {
            query.insert(name.into_owned(), value.into_owned());
        }

        Self {
            href: href.to_string(),
            scheme: url.scheme().to_string(),
            host: url.host_str().map(str::to_string),
            port: url.port(),
            path: url.path().to_string(),
            search: url.query().map(str::to_string),
            query,
            fragment: url.fragment().map(str::to_string),
        }
    }

    /// Get a decoded query parameter
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    /// Convert back to a `url::Url`
    pub fn to_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.href)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base() -> Url {
        Url::parse("https://opml.radiotime.com").unwrap()
    }

    #[test]
    fn test_status_number_and_string_are_equal() {
        let numeric: Status = serde_json::from_value(json!(200)).unwrap();
        let textual: Status = serde_json::from_value(json!("200")).unwrap();

        assert_eq!(numeric, textual);
        assert!(numeric.is_ok());
        assert_eq!(textual.code(), 200);
    }

    #[test]
    fn test_status_rejects_garbage() {
        assert!(serde_json::from_value::<Status>(json!("OK")).is_err());
        assert!(serde_json::from_value::<Status>(json!(70000)).is_err());
    }

    #[test]
    fn test_envelope_success() {
        let ok: Envelope = serde_json::from_value(json!({
            "head": { "title": "Browse", "status": "200" },
            "body": []
        }))
        .unwrap();
        assert!(ok.is_success());
        assert_eq!(ok.head.title.as_deref(), Some("Browse"));

        let fault: Envelope = serde_json::from_value(json!({
            "head": { "status": "400", "fault": "Invalid root category" }
        }))
        .unwrap();
        assert!(!fault.is_success());
        assert!(fault.body.is_empty());

        let empty: Envelope = serde_json::from_value(json!({})).unwrap();
        assert!(!empty.is_success());
    }

    #[test]
    fn test_item_keeps_unknown_fields() {
        let item: Item = serde_json::from_value(json!({
            "element": "outline",
            "type": "audio",
            "text": "FIP",
            "URL": "http://opml.radiotime.com/Tune.ashx?id=s15200",
            "bitrate": "128",
            "reliability": "99",
            "now_playing_id": "s15200"
        }))
        .unwrap();

        assert!(item.is_audio());
        assert!(!item.is_link());
        assert_eq!(item.get("bitrate"), Some(&json!("128")));
        assert_eq!(item.extra.len(), 3);
        assert!(item.url_obj.is_none());
    }

    #[test]
    fn test_item_text_fields_are_lenient() {
        let item: Item = serde_json::from_value(json!({
            "element": "outline",
            "type": "audio",
            "preset_id": 15200,
            "key": false,
            "text": null,
            "image": ["a", "b"],
            "URL": 7
        }))
        .unwrap();

        assert_eq!(item.preset_id.as_deref(), Some("15200"));
        assert_eq!(item.key.as_deref(), Some("false"));
        assert!(item.text.is_none());
        assert!(item.image.is_none());
        assert_eq!(item.url.as_deref(), Some("7"));
    }

    #[test]
    fn test_tune_item_stream_url() {
        let item: Item = serde_json::from_value(json!({
            "element": "audio",
            "url": "http://provisioning.streamtheworld.com/pls/MAXIMAFM.pls?DIST=TuneIn",
            "media_type": "mp3",
            "guide_id": "e2060591"
        }))
        .unwrap();

        assert!(item.is_audio());
        assert!(item.url.is_none());
        assert_eq!(
            item.stream_url(),
            Some("http://provisioning.streamtheworld.com/pls/MAXIMAFM.pls?DIST=TuneIn")
        );
        assert_eq!(item.media_type(), Some("mp3"));
    }

    #[test]
    fn test_url_obj_is_never_read_from_the_wire() {
        let mut item: Item = serde_json::from_value(json!({
            "text": "No link",
            "URLObj": { "href": "bogus" }
        }))
        .unwrap();
        assert!(item.url_obj.is_none());

        assert!(item.enrich_url(&base()));
        assert!(item.url_obj.is_none());
        assert!(item.get("URLObj").is_none());
    }

    #[test]
    fn test_enrich_url() {
        let mut item = Item {
            url: Some("http://opml.radiotime.com/Browse.ashx?c=local".into()),
            ..Default::default()
        };

        assert!(item.enrich_url(&base()));
        let obj = item.url_obj.as_ref().unwrap();
        assert_eq!(obj.href, "http://opml.radiotime.com/Browse.ashx?c=local");
        assert_eq!(obj.scheme, "http");
        assert_eq!(obj.host.as_deref(), Some("opml.radiotime.com"));
        assert_eq!(obj.path, "/Browse.ashx");
        assert_eq!(obj.search.as_deref(), Some("c=local"));
        assert_eq!(obj.query_param("c"), Some("local"));
    }

    #[test]
    fn test_enrich_relative_url() {
        let mut item = Item {
            url: Some("/Browse.ashx?id=g22".into()),
            ..Default::default()
        };

        assert!(item.enrich_url(&base()));
        let obj = item.url_obj.unwrap();
        assert_eq!(obj.href, "/Browse.ashx?id=g22");
        assert_eq!(obj.host.as_deref(), Some("opml.radiotime.com"));
        assert_eq!(obj.query_param("id"), Some("g22"));
    }

    #[test]
    fn test_enrich_empty_url() {
        let mut item = Item {
            url: Some(String::new()),
            ..Default::default()
        };

        assert!(item.enrich_url(&base()));
        assert!(item.url_obj.is_none());
    }

    #[test]
    fn test_enrich_invalid_url() {
        let mut item = Item {
            url: Some("http://[::1".into()),
            ..Default::default()
        };

        assert!(!item.enrich_url(&base()));
        assert!(item.url_obj.is_none());
    }

    #[test]
    fn test_url_obj_query_last_wins_and_fragment() {
        let obj = UrlObj::parse("http://x/y?z=1&z=2&q=a%20b#top").unwrap();
        assert_eq!(obj.query_param("z"), Some("2"));
        assert_eq!(obj.query_param("q"), Some("a b"));
        assert_eq!(obj.fragment.as_deref(), Some("top"));
        assert_eq!(obj.to_url().unwrap().as_str(), "http://x/y?z=1&z=2&q=a%20b#top");
    }

    #[test]
    fn test_serialize_includes_url_obj() {
        let mut item = Item {
            url: Some("http://x/y?z=1".into()),
            ..Default::default()
        };
        item.enrich_url(&base());

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["URL"], "http://x/y?z=1");
        assert_eq!(value["URLObj"]["query"]["z"], "1");
        assert_eq!(value["URLObj"]["href"], "http://x/y?z=1");
    }
}
