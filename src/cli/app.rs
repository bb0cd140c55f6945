//! Runners for the `send` and `status` commands

use std::env;
use std::process::ExitCode;

use tracing::{debug, warn};

use crate::application::ports::{ConfigStore, Keystroke};
use crate::application::{Dispatcher, ResultReporter};
use crate::domain::config::{AppConfig, PasteConfig, WeztermConfig};
use crate::domain::error::ConfigError;
use crate::domain::payload::{extract_lines, Payload, Selection};
use crate::infrastructure::{
    create_clipboard, create_keystroke, create_notifier, KeystrokeToolPreference, NoOpKeystroke,
    WeztermHost, XdgConfigStore,
};

use super::args::SendArgs;
use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Environment variable overriding `paste.platform`
pub const ENV_PASTE_PLATFORM: &str = "TERM_COURIER_PASTE_PLATFORM";

/// Deliver one code reference
pub async fn run_send(args: SendArgs) -> ExitCode {
    let mut presenter = Presenter::new();
    let store = XdgConfigStore::new();

    let config = match load_merged_config(&store, send_overrides(&args)).await {
        Ok(config) => config,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    let payload = match build_payload(&args).await {
        Ok(payload) => payload,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    let keystroke = match keystroke_for(&config).await {
        Ok(keystroke) => keystroke,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    let dispatcher = Dispatcher::from_config(&config, create_clipboard(), keystroke);
    let target = snapshot(&config, args.caller_pane);

    presenter.start_spinner("Sending to terminal...");
    let result = dispatcher.deliver(&target, &payload).await;
    presenter.stop_spinner();

    let reporter = ResultReporter::new(
        create_clipboard(),
        create_notifier(),
        config.notify_or_default(),
    );
    let outcome = reporter.report(&result, &payload).await;

    presenter.send_result(&result);
    if outcome.copied_to_clipboard {
        presenter.info("The reference is on the clipboard; paste it manually.");
    }

    if result.is_success() {
        ExitCode::from(EXIT_SUCCESS)
    } else {
        ExitCode::from(EXIT_ERROR)
    }
}

/// Report availability and classification of the terminal
pub async fn run_status(pane_id: Option<u64>, caller_pane: Option<u64>) -> ExitCode {
    let presenter = Presenter::new();
    let store = XdgConfigStore::new();

    let overrides = AppConfig {
        wezterm: pane_id.map(|id| WeztermConfig {
            pane_id: Some(id),
            ..Default::default()
        }),
        ..Default::default()
    };
    let config = match load_merged_config(&store, overrides).await {
        Ok(config) => config,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    let host = wezterm_host(&config, caller_pane);
    let panes = match host.list_panes() {
        Ok(panes) => panes,
        Err(e) => {
            presenter.warn(&e.to_string());
            Vec::new()
        }
    };
    let target = host.tree(&panes);

    let dispatcher = Dispatcher::from_config(&config, create_clipboard(), NoOpKeystroke::new());
    let available = dispatcher.is_terminal_available(&target);
    let variant = dispatcher.classifier().classify(&target);

    presenter.terminal_status(available, variant, panes.len());

    if available {
        ExitCode::from(EXIT_SUCCESS)
    } else {
        ExitCode::from(EXIT_ERROR)
    }
}

/// CLI flags expressed as a partial config
pub fn send_overrides(args: &SendArgs) -> AppConfig {
    let paste = (args.no_paste || args.settle_delay.is_some()).then(|| PasteConfig {
        enabled: args.no_paste.then_some(false),
        settle_delay_ms: args.settle_delay,
        ..Default::default()
    });

    AppConfig {
        notify: args.notify.then_some(true),
        paste,
        wezterm: args.pane_id.map(|id| WeztermConfig {
            pane_id: Some(id),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Partial config from the environment
pub fn env_config() -> AppConfig {
    env_config_from(|key| env::var(key).ok())
}

fn env_config_from(lookup: impl Fn(&str) -> Option<String>) -> AppConfig {
    let platform = lookup(ENV_PASTE_PLATFORM).filter(|s| !s.is_empty());
    AppConfig {
        paste: platform.map(|platform| PasteConfig {
            platform: Some(platform),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Load and merge configuration: defaults < file < env < cli.
///
/// An invalid file is ignored with a warning; invalid env or CLI values are errors.
pub async fn load_merged_config<S: ConfigStore>(
    store: &S,
    cli_config: AppConfig,
) -> Result<AppConfig, ConfigError> {
    let file_config = store.load_or_empty().await;

    let config = AppConfig::defaults()
        .merge(file_config)
        .merge(env_config())
        .merge(cli_config);

    config.validate()?;
    config
        .keystroke_tool_or_default()
        .parse::<KeystrokeToolPreference>()?;
    Ok(config)
}

/// Format the payload, reading the selected lines when an excerpt is wanted.
pub async fn build_payload(args: &SendArgs) -> Result<Payload, String> {
    let path = args.path.display().to_string();

    if !args.excerpt {
        return Ok(Selection::reference(path, args.lines).to_payload());
    }

    let content = tokio::fs::read_to_string(&args.path)
        .await
        .map_err(|e| format!("Cannot read {}: {}", path, e))?;
    let text = extract_lines(&content, args.lines);
    if text.is_empty() {
        return Err(format!(
            "Line {} is past the end of {}",
            args.lines.start(),
            path
        ));
    }

    Ok(Selection::excerpt(path, args.lines, text).to_payload())
}

async fn keystroke_for(config: &AppConfig) -> Result<Box<dyn Keystroke>, ConfigError> {
    if !config.paste_enabled_or_default() {
        return Ok(Box::new(NoOpKeystroke::new()));
    }

    let preference: KeystrokeToolPreference = config.keystroke_tool_or_default().parse()?;
    match create_keystroke(preference).await {
        Ok((keystroke, tool)) => {
            debug!(%tool, "keystroke adapter ready");
            Ok(keystroke)
        }
        Err(e) => {
            warn!(error = %e, "synthetic paste unavailable");
            Ok(Box::new(NoOpKeystroke::new()))
        }
    }
}

fn wezterm_host(config: &AppConfig, caller_pane: Option<u64>) -> WeztermHost {
    WeztermHost::new(config.wezterm_binary_or_default())
        .with_focus(config.wezterm_pane_id())
        .with_caller(caller_pane)
}

/// Live target, or one reporting no visible terminal when the mux cannot be reached.
fn snapshot(config: &AppConfig, caller_pane: Option<u64>) -> crate::host::ObjectRef {
    match wezterm_host(config, caller_pane).snapshot() {
        Ok(target) => target,
        Err(e) => {
            warn!(error = %e, "could not query wezterm");
            WeztermHost::unavailable()
        }
    }
}
