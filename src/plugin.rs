use crate::actions::Action;
use eframe::egui;
use std::collections::HashMap;
use std::time::Instant;

pub trait Plugin: Send + Sync {
    /// Return actions based on the query string
    fn search(&self, query: &str) -> Vec<Action>;
    /// Like [`search`](Self::search) but returning at most `limit` rows.
    /// Plugins with rows that must survive the cut override this.
    fn search_limited(&self, query: &str, limit: usize) -> Vec<Action> {
        let mut out = self.search(query);
        out.truncate(limit);
        out
    }
    /// Name of the plugin
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn capabilities(&self) -> &[&str];

    /// Query shortcuts shown by the host when listing plugin commands.
    fn commands(&self) -> Vec<Action> {
        Vec::new()
    }

    fn default_settings(&self) -> Option<serde_json::Value> {
        None
    }

    fn apply_settings(&mut self, _value: &serde_json::Value) {}

    fn settings_ui(&mut self, _ui: &mut egui::Ui, _value: &mut serde_json::Value) {}

    /// Called periodically from the host loop. Plugins with background
    /// work (cache refreshes) do it here.
    fn tick(&mut self, _now: Instant) {}

    /// Handle an action produced by this plugin. Returns `None` when the
    /// action belongs to someone else.
    fn dispatch(&mut self, _action: &Action) -> Option<anyhow::Result<()>> {
        None
    }
}

/// A manager that holds plugins
pub struct PluginManager {
    plugins: Vec<Box<dyn Plugin>>,
    max_results: usize,
}

impl Default for PluginManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PluginManager {
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
            max_results: crate::settings::DEFAULT_MAX_RESULTS,
        }
    }

    pub fn set_max_results(&mut self, max_results: usize) {
        self.max_results = max_results;
    }

    pub fn register(&mut self, plugin: Box<dyn Plugin>) {
        self.plugins.push(plugin);
    }

    /// Register a plugin and apply its stored settings, falling back to the
    /// plugin's defaults when nothing is stored yet.
    pub fn register_with_settings(
        &mut self,
        mut plugin: Box<dyn Plugin>,
        stored: &HashMap<String, serde_json::Value>,
    ) {
        if let Some(value) = stored
            .get(plugin.name())
            .cloned()
            .or_else(|| plugin.default_settings())
        {
            plugin.apply_settings(&value);
        }
        self.register(plugin);
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Box<dyn Plugin>> {
        self.plugins.iter_mut().find(|p| p.name() == name)
    }

    pub fn search(&self, query: &str) -> Vec<Action> {
        let mut actions = Vec::new();
        for p in &self.plugins {
            let remaining = self.max_results.saturating_sub(actions.len());
            if remaining == 0 {
                break;
            }
            actions.extend(p.search_limited(query, remaining));
        }
        actions
    }

    pub fn commands(&self) -> Vec<Action> {
        self.plugins.iter().flat_map(|p| p.commands()).collect()
    }

    pub fn tick(&mut self, now: Instant) {
        for p in &mut self.plugins {
            p.tick(now);
        }
    }

    /// Offer `action` to each plugin in registration order.
    pub fn dispatch(&mut self, action: &Action) -> Option<anyhow::Result<()>> {
        self.plugins.iter_mut().find_map(|p| p.dispatch(action))
    }
}
