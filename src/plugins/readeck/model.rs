use serde::{Deserialize, Deserializer, Serialize};

/// A bookmark as returned by `GET /api/bookmarks`.
///
/// Only the fields the plugin uses are kept; anything else in the payload is
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    pub url: String,
    /// API location of the bookmark, e.g. `https://host/api/bookmarks/<id>`.
    #[serde(default)]
    pub href: String,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default)]
    pub is_marked: bool,
}

fn null_as_empty<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

impl Bookmark {
    /// Link to the bookmark's page in the Readeck web UI.
    pub fn reader_url(&self) -> String {
        if self.href.is_empty() {
            return self.url.clone();
        }
        self.href.replacen("/api", "", 1)
    }

    pub fn display_title(&self) -> String {
        let title = if self.title.trim().is_empty() {
            self.url.as_str()
        } else {
            self.title.as_str()
        };
        if self.is_marked {
            format!("⭐ {title}")
        } else {
            title.to_string()
        }
    }

    pub fn subtitle(&self) -> String {
        let mut desc = format!("{}: {}", self.labels.join(","), self.url);
        if self.is_archived {
            desc.push_str(" [archived]");
        }
        desc
    }

    /// Case-insensitive substring match on title, URL or any label.
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        use crate::common::contains_ci;
        contains_ci(&self.title, needle)
            || contains_ci(&self.url, needle)
            || self.labels.iter().any(|l| contains_ci(l, needle))
    }
}
