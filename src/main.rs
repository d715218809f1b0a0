use readeck_launcher::launcher::run_action;
use readeck_launcher::logging;
use readeck_launcher::plugin::{Plugin, PluginManager};
use readeck_launcher::plugins::readeck::{ReadeckPlugin, PLUGIN_NAME};
use readeck_launcher::settings::{Settings, SETTINGS_FILE};
use std::time::Instant;

/// Minimal host: refresh the index once, print the rows for the query given
/// on the command line and optionally launch one of them with `--run N`.
fn main() -> anyhow::Result<()> {
    let mut settings = Settings::load(SETTINGS_FILE)?;
    logging::init(settings.debug_logging);

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let run = match args.iter().position(|a| a == "--run") {
        Some(pos) => {
            let value = args.get(pos + 1).and_then(|v| v.parse::<usize>().ok());
            args.drain(pos..(pos + 2).min(args.len()));
            if value.is_none() {
                anyhow::bail!("--run expects a row number");
            }
            value
        }
        None => None,
    };
    let query = args.join(" ");

    let mut plugins = PluginManager::new();
    plugins.set_max_results(settings.max_results);
    let first_run = !settings.plugin_settings.contains_key(PLUGIN_NAME);
    plugins.register_with_settings(
        Box::new(ReadeckPlugin::default()),
        &settings.plugin_settings,
    );
    if first_run {
        // Persist the defaults so the user has something to edit.
        if let Some(p) = plugins.get_mut(PLUGIN_NAME) {
            if let Some(v) = p.default_settings() {
                settings.plugin_settings.insert(p.name().to_string(), v);
                settings.save(SETTINGS_FILE)?;
            }
        }
    }
    plugins.tick(Instant::now());

    let results = plugins.search(&query);
    for (i, action) in results.iter().enumerate() {
        println!("{i:>3}  {}  ({})", action.label, action.desc);
    }

    if let Some(idx) = run {
        let Some(action) = results.get(idx) else {
            anyhow::bail!("no result row {idx}");
        };
        if !run_action(action, &mut plugins) {
            std::process::exit(1);
        }
    }
    Ok(())
}
