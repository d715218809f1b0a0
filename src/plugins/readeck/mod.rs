use crate::actions::Action;
use crate::plugin::Plugin;
use anyhow::Context;
use eframe::egui;
use std::time::Instant;

pub mod client;
pub mod config;
pub mod error;
pub mod index;
pub mod model;

use client::ReadeckClient;
use config::ReadeckSettings;
use error::ReadeckError;
use index::{BookmarkIndex, QueryMode};
use model::Bookmark;

pub const PLUGIN_NAME: &str = "readeck";
pub const TRIGGER: &str = "rd";
const DESC: &str = "Readeck";

/// Searches bookmarks saved in a Readeck instance.
///
/// Queries starting with `rd` are trigger queries: an empty filter lists the
/// whole cache and a "refresh" row is always appended. Other queries are
/// global and only return matches.
///
/// Actions produced here are handled by [`Plugin::dispatch`]:
///   readeck:refresh
///   readeck:archive:<id>
///   readeck:delete:<id>
pub struct ReadeckPlugin {
    settings: ReadeckSettings,
    client: Option<ReadeckClient>,
    index: BookmarkIndex,
}

impl ReadeckPlugin {
    pub fn new(settings: ReadeckSettings) -> Self {
        let index = BookmarkIndex::new(settings.refresh_interval());
        Self {
            settings,
            client: None,
            index,
        }
    }

    pub fn settings(&self) -> &ReadeckSettings {
        &self.settings
    }

    pub fn index(&self) -> &BookmarkIndex {
        &self.index
    }

    fn client(&mut self) -> Result<&ReadeckClient, ReadeckError> {
        let client = match self.client.take() {
            Some(c) => c,
            None => ReadeckClient::new(&self.settings)?,
        };
        Ok(self.client.insert(client))
    }

    /// Refresh the index now, regardless of schedule.
    pub fn refresh(&mut self, now: Instant) -> Result<usize, ReadeckError> {
        let start = Instant::now();
        let fetched = self.client().and_then(|c| c.list_bookmarks());
        let count = self.index.refresh_with(now, || fetched)?;
        tracing::info!(
            "indexed {count} bookmarks [{} ms]",
            start.elapsed().as_millis()
        );
        Ok(count)
    }

    pub fn archive(&mut self, id: &str) -> Result<(), ReadeckError> {
        self.client()?.archive(id)?;
        if !self.index.mark_archived(id) {
            tracing::debug!("archived bookmark {id} was not cached");
        }
        Ok(())
    }

    pub fn delete(&mut self, id: &str) -> Result<(), ReadeckError> {
        self.client()?.delete(id)?;
        if !self.index.remove(id) {
            tracing::debug!("deleted bookmark {id} was not cached");
        }
        Ok(())
    }

    fn update_settings(&mut self, new: ReadeckSettings) {
        if new.instance_url != self.settings.instance_url || new.api_key != self.settings.api_key {
            self.client = None;
            self.index.invalidate();
        }
        self.index.set_interval(new.refresh_interval());
        self.settings = new;
    }

    fn bookmark_action(bookmark: &Bookmark) -> Action {
        let reader = bookmark.reader_url();
        let alternatives = vec![
            Action::new("Open in Readeck", DESC, reader.clone()),
            Action::new("Open bookmark URL", DESC, bookmark.url.clone()),
            Action::new(
                "Copy URL to clipboard",
                DESC,
                format!("clipboard:{}", bookmark.url),
            ),
            Action::new(
                "Archive bookmark",
                DESC,
                format!("readeck:archive:{}", bookmark.id),
            ),
            Action::new(
                "Delete bookmark",
                DESC,
                format!("readeck:delete:{}", bookmark.id),
            ),
        ];
        Action {
            alternatives,
            ..Action::new(bookmark.display_title(), bookmark.subtitle(), reader)
        }
    }

    fn refresh_action() -> Action {
        Action::new(
            "Refresh cache index",
            "Refresh indexed bookmarks",
            "readeck:refresh",
        )
    }
}

impl Default for ReadeckPlugin {
    fn default() -> Self {
        Self::new(ReadeckSettings::default())
    }
}

/// Split a query into its filter and mode. `rd` must be followed by
/// whitespace or the end of input to count as the trigger.
fn route(query: &str) -> (&str, QueryMode) {
    let trimmed = query.trim_start();
    if let Some(rest) = crate::common::strip_prefix_ci(trimmed, TRIGGER) {
        if rest.is_empty() || rest.starts_with(char::is_whitespace) {
            return (rest.trim(), QueryMode::Trigger);
        }
    }
    (query.trim(), QueryMode::Global)
}

impl Plugin for ReadeckPlugin {
    fn search(&self, query: &str) -> Vec<Action> {
        self.search_limited(query, usize::MAX)
    }

    /// Trigger queries reserve the last slot for the refresh row so it
    /// survives the host's result bound.
    fn search_limited(&self, query: &str, limit: usize) -> Vec<Action> {
        if limit == 0 {
            return Vec::new();
        }
        let (filter, mode) = route(query);
        let rows = match mode {
            QueryMode::Trigger => limit - 1,
            QueryMode::Global => limit,
        };
        let mut out: Vec<Action> = self
            .index
            .matches(filter, mode)
            .take(rows)
            .map(Self::bookmark_action)
            .collect();
        if mode == QueryMode::Trigger {
            if filter.is_empty() && out.is_empty() && rows > 0 {
                out.push(Action::new(
                    "Readeck",
                    "Search for a page saved in Readeck",
                    format!("query:{TRIGGER} "),
                ));
            }
            out.push(Self::refresh_action());
        }
        out
    }

    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    fn description(&self) -> &str {
        "Search bookmarks saved in Readeck (prefix: `rd`)"
    }

    fn capabilities(&self) -> &[&str] {
        &["search"]
    }

    fn commands(&self) -> Vec<Action> {
        vec![
            Action::new(TRIGGER, "Readeck", format!("query:{TRIGGER} ")),
            Action::new("rd refresh", "Readeck", "readeck:refresh"),
        ]
    }

    fn default_settings(&self) -> Option<serde_json::Value> {
        serde_json::to_value(&self.settings).ok()
    }

    fn apply_settings(&mut self, value: &serde_json::Value) {
        if let Some(s) = ReadeckSettings::from_value(value) {
            self.update_settings(s);
        }
    }

    fn settings_ui(&mut self, ui: &mut egui::Ui, value: &mut serde_json::Value) {
        let mut cfg: ReadeckSettings = serde_json::from_value(value.clone()).unwrap_or_default();
        let url = ui
            .horizontal(|ui| {
                ui.label("URL");
                ui.text_edit_singleline(&mut cfg.instance_url)
            })
            .inner;
        let key = ui
            .horizontal(|ui| {
                ui.label("API key");
                ui.add(egui::TextEdit::singleline(&mut cfg.api_key).password(true))
            })
            .inner;
        let length = ui
            .horizontal(|ui| {
                ui.label("Cache length (minutes)");
                ui.add(egui::DragValue::new(&mut cfg.cache_length).clamp_range(1..=1440))
            })
            .inner;
        cfg.cache_length = cfg.cache_length.max(1);
        match serde_json::to_value(&cfg) {
            Ok(v) => *value = v,
            Err(e) => tracing::error!("failed to serialize readeck settings: {e}"),
        }
        // Half-typed URLs and keys stay in `value` until the field is left.
        if url.lost_focus() || key.lost_focus() {
            self.update_settings(cfg);
        } else if length.changed() {
            self.settings.cache_length = cfg.cache_length;
            self.index.set_interval(self.settings.refresh_interval());
        }
    }

    fn tick(&mut self, now: Instant) {
        if !self.index.is_due(now) {
            return;
        }
        if let Err(e) = self.refresh(now) {
            tracing::warn!("readeck refresh failed: {e}");
            crate::toast_log::append_toast_log(&format!("Readeck refresh failed: {e}"));
        }
    }

    fn dispatch(&mut self, action: &Action) -> Option<anyhow::Result<()>> {
        let s = action.action.as_str();
        let result = if s == "readeck:refresh" {
            self.refresh(Instant::now())
                .map(|_| ())
                .context("refresh readeck index")
        } else if let Some(id) = s.strip_prefix("readeck:archive:") {
            self.archive(id)
                .with_context(|| format!("archive bookmark {id}"))
        } else if let Some(id) = s.strip_prefix("readeck:delete:") {
            self.delete(id)
                .with_context(|| format!("delete bookmark {id}"))
        } else {
            return None;
        };
        Some(result)
    }
}
