use crate::actions::Action;
use crate::plugin::PluginManager;

#[derive(Debug, PartialEq, Eq)]
enum ActionKind<'a> {
    /// Fill the host's query box; nothing to run.
    Query(&'a str),
    ClipboardText(&'a str),
    Open(&'a str),
}

fn parse_action_kind(action: &Action) -> ActionKind<'_> {
    let s = action.action.as_str();
    if let Some(rest) = s.strip_prefix("query:") {
        return ActionKind::Query(rest);
    }
    if let Some(rest) = s.strip_prefix("clipboard:") {
        return ActionKind::ClipboardText(rest);
    }
    ActionKind::Open(s)
}

/// Launch an [`Action`].
///
/// Plugins get the first chance to handle it (remote calls such as
/// archiving a bookmark). Anything left is interpreted by prefix: clipboard
/// text, query fills, or a URL opened with the OS handler.
///
/// Returns an error if the plugin call, opening the URL or writing the
/// clipboard fails.
pub fn launch_action(action: &Action, plugins: &mut PluginManager) -> anyhow::Result<()> {
    if let Some(res) = plugins.dispatch(action) {
        return res;
    }
    match parse_action_kind(action) {
        ActionKind::Query(_) => Ok(()),
        ActionKind::ClipboardText(text) => crate::actions::clipboard::set_text(text),
        ActionKind::Open(target) => {
            open::that(target)?;
            Ok(())
        }
    }
}

/// Launch an action and report any failure to the log and the toast log
/// instead of propagating it.
pub fn run_action(action: &Action, plugins: &mut PluginManager) -> bool {
    match launch_action(action, plugins) {
        Ok(()) => true,
        Err(e) => {
            tracing::error!("failed to launch '{}': {e:#}", action.label);
            crate::toast_log::append_toast_log(&format!("{}: {e:#}", action.label));
            false
        }
    }
}
