use super::error::ReadeckError;
use super::model::Bookmark;
use chrono::{DateTime, Local};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    /// Routed to this plugin through its keyword.
    Trigger,
    /// Sent to every plugin without a keyword.
    Global,
}

/// In-memory bookmark cache with refresh bookkeeping.
///
/// The list is replaced wholesale on a successful refresh and left untouched
/// on failure. Scheduling is measured from the last attempt, so a failed
/// refresh waits a full interval before the next one.
#[derive(Debug)]
pub struct BookmarkIndex {
    bookmarks: Vec<Bookmark>,
    last_refreshed: Option<DateTime<Local>>,
    last_attempt: Option<Instant>,
    interval: Duration,
    force: bool,
}

impl BookmarkIndex {
    pub fn new(interval: Duration) -> Self {
        Self {
            bookmarks: Vec::new(),
            last_refreshed: None,
            last_attempt: None,
            interval,
            force: false,
        }
    }

    pub fn bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    pub fn len(&self) -> usize {
        self.bookmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Bookmark> {
        self.bookmarks.iter().find(|b| b.id == id)
    }

    /// Wall-clock time of the last successful refresh.
    pub fn last_refreshed(&self) -> Option<DateTime<Local>> {
        self.last_refreshed
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Change the refresh interval. The next refresh stays anchored to the
    /// previous attempt.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Make the next [`is_due`](Self::is_due) check succeed.
    pub fn invalidate(&mut self) {
        self.force = true;
    }

    pub fn next_refresh_at(&self) -> Option<Instant> {
        self.last_attempt.map(|t| t + self.interval)
    }

    pub fn is_due(&self, now: Instant) -> bool {
        if self.force {
            return true;
        }
        match self.next_refresh_at() {
            Some(next) => now >= next,
            None => true,
        }
    }

    /// Run `fetch` and replace the cache with its result.
    ///
    /// Returns the number of indexed bookmarks. On error the cache keeps its
    /// previous contents.
    pub fn refresh_with<F>(&mut self, now: Instant, fetch: F) -> Result<usize, ReadeckError>
    where
        F: FnOnce() -> Result<Vec<Bookmark>, ReadeckError>,
    {
        self.last_attempt = Some(now);
        self.force = false;
        let bookmarks = fetch()?;
        self.bookmarks = bookmarks;
        self.last_refreshed = Some(Local::now());
        Ok(self.bookmarks.len())
    }

    /// Flag a cached bookmark as archived. Returns `false` if it is not cached.
    pub fn mark_archived(&mut self, id: &str) -> bool {
        match self.bookmarks.iter_mut().find(|b| b.id == id) {
            Some(b) => {
                b.is_archived = true;
                true
            }
            None => false,
        }
    }

    /// Drop a bookmark from the cache. Returns `false` if it was not cached.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.bookmarks.len();
        self.bookmarks.retain(|b| b.id != id);
        self.bookmarks.len() != before
    }

    /// Bookmarks matching `query` in cache order.
    ///
    /// An empty query yields everything in trigger mode and nothing in global
    /// mode.
    pub fn matches<'a>(
        &'a self,
        query: &str,
        mode: QueryMode,
    ) -> impl Iterator<Item = &'a Bookmark> + 'a {
        let needle = query.trim().to_lowercase();
        let take_all = needle.is_empty() && mode == QueryMode::Trigger;
        let take_none = needle.is_empty() && mode == QueryMode::Global;
        self.bookmarks
            .iter()
            .filter(move |b| !take_none && (take_all || b.matches(&needle)))
    }
}
