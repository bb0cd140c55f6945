//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::{AppConfig, ClassifierConfig, PasteConfig, ProbeConfig, WeztermConfig};
use crate::domain::error::ConfigError;
use crate::infrastructure::KeystrokeToolPreference;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let mut config = store.load().await?;
    set_value(&mut config, key, value)?;
    config.validate()?;

    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let config = store.load().await?;
    presenter.output(get_value(&config, key).as_deref().unwrap_or(NOT_SET));

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        presenter.key_value(key, get_value(&config, key).as_deref().unwrap_or(NOT_SET));
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn check_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        Ok(())
    } else {
        Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        })
    }
}

/// Parse `value` for `key` and store it in `config`
fn set_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "notify" => config.notify = Some(parse_bool(key, value)?),
        "paste.enabled" => paste(config).enabled = Some(parse_bool(key, value)?),
        "paste.platform" => paste(config).platform = Some(value.to_lowercase()),
        "paste.settle_delay_ms" => paste(config).settle_delay_ms = Some(parse_number(key, value)?),
        "paste.keystroke_tool" => {
            value.parse::<KeystrokeToolPreference>()?;
            paste(config).keystroke_tool = Some(value.to_lowercase());
        }
        "probe.max_depth" => probe(config).max_depth = Some(parse_number(key, value)?),
        "probe.max_nodes" => probe(config).max_nodes = Some(parse_number(key, value)?),
        "classifier.modern_tokens" => classifier(config).modern_tokens = Some(parse_list(value)),
        "classifier.classic_tokens" => classifier(config).classic_tokens = Some(parse_list(value)),
        "wezterm.binary" => wezterm(config).binary = Some(value.to_string()),
        _ => return check_key(key),
    }
    Ok(())
}

/// Display form of the stored value for `key`
fn get_value(config: &AppConfig, key: &str) -> Option<String> {
    let paste = config.paste.as_ref();
    let probe = config.probe.as_ref();
    let classifier = config.classifier.as_ref();

    match key {
        "notify" => config.notify.map(|b| b.to_string()),
        "paste.enabled" => paste.and_then(|p| p.enabled).map(|b| b.to_string()),
        "paste.platform" => paste.and_then(|p| p.platform.clone()),
        "paste.settle_delay_ms" => paste.and_then(|p| p.settle_delay_ms).map(|n| n.to_string()),
        "paste.keystroke_tool" => paste.and_then(|p| p.keystroke_tool.clone()),
        "probe.max_depth" => probe.and_then(|p| p.max_depth).map(|n| n.to_string()),
        "probe.max_nodes" => probe.and_then(|p| p.max_nodes).map(|n| n.to_string()),
        "classifier.modern_tokens" => classifier
            .and_then(|c| c.modern_tokens.as_ref())
            .map(|t| t.join(", ")),
        "classifier.classic_tokens" => classifier
            .and_then(|c| c.classic_tokens.as_ref())
            .map(|t| t.join(", ")),
        "wezterm.binary" => config.wezterm.as_ref().and_then(|w| w.binary.clone()),
        _ => None,
    }
}

fn paste(config: &mut AppConfig) -> &mut PasteConfig {
    config.paste.get_or_insert_with(PasteConfig::default)
}

fn probe(config: &mut AppConfig) -> &mut ProbeConfig {
    config.probe.get_or_insert_with(ProbeConfig::default)
}

fn classifier(config: &mut AppConfig) -> &mut ClassifierConfig {
    config.classifier.get_or_insert_with(ClassifierConfig::default)
}

fn wezterm(config: &mut AppConfig) -> &mut WeztermConfig {
    config.wezterm.get_or_insert_with(WeztermConfig::default)
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: "Value must be 'true' or 'false'".to_string(),
        }),
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::ValidationError {
        key: key.to_string(),
        message: format!("'{}' is not a non-negative integer", value),
    })
}

/// Comma-separated tokens, blanks dropped
fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
