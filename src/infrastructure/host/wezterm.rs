//! WezTerm host adapter
//!
//! Snapshots `wezterm cli list --format json` into a scripted object tree:
//!
//! ```text
//! wezterm.Mux                      isVisible, activate, getContentManager
//! ├── wezterm.Window
//! │   └── wezterm.Tab
//! │       └── wezterm.Pane          sendText, hasFocus, activate
//! └── ...
//! ```
//!
//! The content manager's selected content is the tab holding the focused
//! pane, and its component is that pane. The focused pane is the one the most
//! recently active GUI client shows (`wezterm cli list-clients`); the pane
//! this process was started from is never picked unless asked for.
//!
//! `sendText` shells out to `wezterm cli` and waits for it. Activation is
//! spawned and not waited for.

use std::collections::BTreeMap;
use std::io;
use std::process::{Command, Stdio};
use std::sync::Arc;
use std::thread;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::host::{ArgKind, HostFault, ObjectRef, ScriptedObject, Value};

/// Errors talking to the wezterm mux
#[derive(Debug, Clone, Error)]
pub enum WeztermError {
    #[error("'{0}' not found. Is WezTerm installed and on PATH?")]
    NotFound(String),

    #[error("wezterm cli failed: {0}")]
    CommandFailed(String),

    #[error("Could not parse wezterm pane list: {0}")]
    ParseError(String),
}

/// One entry of `wezterm cli list --format json`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PaneInfo {
    pub pane_id: u64,
    pub tab_id: u64,
    pub window_id: u64,
    #[serde(default)]
    pub workspace: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub cwd: Option<String>,
    /// Active pane within its tab
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_zoomed: bool,
}

/// Parse the JSON emitted by `wezterm cli list --format json`
pub fn parse_pane_list(json: &str) -> Result<Vec<PaneInfo>, WeztermError> {
    serde_json::from_str(json).map_err(|e| WeztermError::ParseError(e.to_string()))
}

/// One entry of `wezterm cli list-clients --format json`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientInfo {
    #[serde(default)]
    pub focused_pane_id: Option<u64>,
    #[serde(default)]
    pub idle_time: Option<IdleTime>,
    #[serde(default)]
    pub workspace: Option<String>,
}

/// Serialized `Duration` since the client's last input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct IdleTime {
    pub secs: u64,
    #[serde(default)]
    pub nanos: u32,
}

pub fn parse_client_list(json: &str) -> Result<Vec<ClientInfo>, WeztermError> {
    serde_json::from_str(json).map_err(|e| WeztermError::ParseError(e.to_string()))
}

/// Focused pane of the client with the most recent input
pub fn client_focus(clients: &[ClientInfo]) -> Option<u64> {
    clients
        .iter()
        .filter(|c| c.focused_pane_id.is_some())
        .min_by_key(|c| c.idle_time.map_or((u64::MAX, u32::MAX), |t| (t.secs, t.nanos)))
        .and_then(|c| c.focused_pane_id)
}

/// What is known about which pane the user is looking at
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusHints {
    /// Pane asked for explicitly; wins when it exists
    pub requested: Option<u64>,
    /// Pane focused in the most recently active GUI client
    pub client: Option<u64>,
    /// Pane this process runs in (`WEZTERM_PANE`)
    pub caller: Option<u64>,
}

/// Commands a pane object can issue
pub trait PaneDriver: Send + Sync {
    fn send_text(&self, pane_id: u64, text: &str) -> Result<(), WeztermError>;

    fn activate(&self, pane_id: u64) -> Result<(), WeztermError>;
}

/// Thin wrapper around the `wezterm cli` subcommands
#[derive(Debug, Clone)]
pub struct WeztermCli {
    binary: String,
}

impl WeztermCli {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    fn run(&self, args: &[&str]) -> Result<String, WeztermError> {
        debug!(binary = %self.binary, ?args, "running wezterm cli");
        let output = Command::new(&self.binary)
            .arg("cli")
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| self.launch_error(e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(WeztermError::CommandFailed(if stderr.is_empty() {
                format!("exited with status: {}", output.status)
            } else {
                stderr
            }));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Start a subcommand and return without waiting for it.
    fn spawn(&self, args: &[&str]) -> Result<(), WeztermError> {
        debug!(binary = %self.binary, ?args, "spawning wezterm cli");
        let mut child = Command::new(&self.binary)
            .arg("cli")
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| self.launch_error(e))?;

        // Reaped off the caller's thread
        thread::spawn(move || match child.wait() {
            Ok(status) if !status.success() => debug!(%status, "wezterm cli exited with failure"),
            Err(e) => debug!(error = %e, "could not wait for wezterm cli"),
            Ok(_) => {}
        });
        Ok(())
    }

    fn launch_error(&self, e: io::Error) -> WeztermError {
        if e.kind() == io::ErrorKind::NotFound {
            WeztermError::NotFound(self.binary.clone())
        } else {
            WeztermError::CommandFailed(e.to_string())
        }
    }

    pub fn list_panes(&self) -> Result<Vec<PaneInfo>, WeztermError> {
        parse_pane_list(&self.run(&["list", "--format", "json"])?)
    }

    pub fn list_clients(&self) -> Result<Vec<ClientInfo>, WeztermError> {
        parse_client_list(&self.run(&["list-clients", "--format", "json"])?)
    }
}

impl PaneDriver for WeztermCli {
    /// Sends without bracketed paste so the text lands as typed input.
    fn send_text(&self, pane_id: u64, text: &str) -> Result<(), WeztermError> {
        let pane = pane_id.to_string();
        self.run(&["send-text", "--pane-id", &pane, "--no-paste", "--", text])
            .map(|_| ())
    }

    /// Fire and forget; `Ok` only means the command was started.
    fn activate(&self, pane_id: u64) -> Result<(), WeztermError> {
        let pane = pane_id.to_string();
        self.spawn(&["activate-pane", "--pane-id", &pane])
    }
}

/// Builds delivery targets from the live mux
pub struct WeztermHost {
    cli: WeztermCli,
    driver: Arc<dyn PaneDriver>,
    requested: Option<u64>,
    caller: Option<u64>,
}

impl WeztermHost {
    pub fn new(binary: impl Into<String>) -> Self {
        let cli = WeztermCli::new(binary);
        Self {
            driver: Arc::new(cli.clone()),
            cli,
            requested: None,
            caller: None,
        }
    }

    /// Treat `pane_id` as the focused pane whatever the clients report
    pub fn with_focus(mut self, pane_id: Option<u64>) -> Self {
        self.requested = pane_id;
        self
    }

    /// Pane this process was started from, kept out of focus guessing
    pub fn with_caller(mut self, pane_id: Option<u64>) -> Self {
        self.caller = pane_id;
        self
    }

    pub fn list_panes(&self) -> Result<Vec<PaneInfo>, WeztermError> {
        self.cli.list_panes()
    }

    /// Focus hints, asking the GUI clients unless a pane was requested
    pub fn focus_hints(&self) -> FocusHints {
        let client = if self.requested.is_some() {
            None
        } else {
            match self.cli.list_clients() {
                Ok(clients) => client_focus(&clients),
                Err(e) => {
                    debug!(error = %e, "no client focus available");
                    None
                }
            }
        };
        FocusHints {
            requested: self.requested,
            client,
            caller: self.caller,
        }
    }

    /// Target tree for an already fetched pane list
    pub fn tree(&self, panes: &[PaneInfo]) -> ObjectRef {
        build_tree(panes, self.focus_hints(), self.driver.clone())
    }

    /// Query the mux and build the target tree
    pub fn snapshot(&self) -> Result<ObjectRef, WeztermError> {
        let panes = self.list_panes()?;
        debug!(panes = panes.len(), "wezterm snapshot");
        Ok(self.tree(&panes))
    }

    /// A target that reports itself as not visible
    pub fn unavailable() -> ObjectRef {
        ScriptedObject::builder("wezterm.Mux")
            .getter("isVisible", Value::Bool(false))
            .build()
    }
}

/// Pick the pane to deliver to.
///
/// An existing requested pane wins. Otherwise the client's focused pane,
/// unless it is the caller's own. Failing that, a pane of the tab the user is
/// in (the client's, else the caller's), active one first, and as a last
/// resort the first active pane anywhere. The caller is never guessed.
fn focused_pane(panes: &[PaneInfo], hints: FocusHints) -> Option<u64> {
    let find = |id: u64| panes.iter().find(|p| p.pane_id == id);

    if let Some(id) = hints.requested {
        return find(id).map(|p| p.pane_id);
    }
    if let Some(pane) = hints
        .client
        .filter(|&id| Some(id) != hints.caller)
        .and_then(find)
    {
        return Some(pane.pane_id);
    }

    let home_tab = hints
        .client
        .or(hints.caller)
        .and_then(find)
        .map(|p| (p.window_id, p.tab_id));
    let eligible = |p: &&PaneInfo| Some(p.pane_id) != hints.caller;
    let in_home = |p: &&PaneInfo| Some((p.window_id, p.tab_id)) == home_tab;

    panes
        .iter()
        .filter(eligible)
        .filter(in_home)
        .find(|p| p.is_active)
        .or_else(|| panes.iter().filter(eligible).find(in_home))
        .or_else(|| panes.iter().filter(eligible).find(|p| p.is_active))
        .map(|p| p.pane_id)
}

fn fault(member: &str, err: WeztermError) -> HostFault {
    HostFault::new(member, err.to_string())
}

fn pane_object(pane: &PaneInfo, focused: bool, driver: &Arc<dyn PaneDriver>) -> ObjectRef {
    let id = pane.pane_id;
    let sender = driver.clone();
    let activator = driver.clone();

    ScriptedObject::builder("wezterm.Pane")
        .method("sendText", &[ArgKind::Text], move |args| {
            let text = args.first().and_then(Value::as_text).unwrap_or_default();
            sender
                .send_text(id, text)
                .map(|_| Value::Unit)
                .map_err(|e| fault("sendText", e))
        })
        .method("activate", &[], move |_| {
            activator
                .activate(id)
                .map(|_| Value::Unit)
                .map_err(|e| fault("activate", e))
        })
        .getter("hasFocus", Value::Bool(focused))
        .getter("getTitle", Value::Text(pane.title.clone().unwrap_or_default()))
        .field("paneId", Value::Int(id as i64))
        .build()
}

/// Assemble the mux tree for `panes`
pub fn build_tree(panes: &[PaneInfo], hints: FocusHints, driver: Arc<dyn PaneDriver>) -> ObjectRef {
    let focus = focused_pane(panes, hints);
    debug!(?focus, ?hints, "wezterm focus");

    // window -> tab -> panes, in id order
    let mut layout: BTreeMap<u64, BTreeMap<u64, Vec<&PaneInfo>>> = BTreeMap::new();
    for pane in panes {
        layout
            .entry(pane.window_id)
            .or_default()
            .entry(pane.tab_id)
            .or_default()
            .push(pane);
    }

    let mut focused: Option<(Arc<ScriptedObject>, ObjectRef)> = None;
    let mut mux = ScriptedObject::builder("wezterm.Mux")
        .getter("isVisible", Value::Bool(!panes.is_empty()));

    for (window_id, tabs) in layout {
        let mut window = ScriptedObject::builder("wezterm.Window")
            .field("windowId", Value::Int(window_id as i64));
        for (tab_id, tab_panes) in tabs {
            let tab = ScriptedObject::builder("wezterm.Tab")
                .field("tabId", Value::Int(tab_id as i64))
                .build();
            for pane in tab_panes {
                let is_focused = Some(pane.pane_id) == focus;
                let object = pane_object(pane, is_focused, &driver);
                if is_focused {
                    focused = Some((tab.clone(), object.clone()));
                }
                tab.push_child(object);
            }
            window = window.child(tab);
        }
        mux = mux.child(window.build());
    }

    if let Some((tab, pane)) = focused {
        tab.set_field(0, "component", Value::Object(pane.clone()));
        let content = ScriptedObject::builder("wezterm.Workspace")
            .getter("getSelectedContent", Value::Object(tab))
            .build();
        let activator = driver.clone();
        let pane_id = focus.unwrap_or_default();
        mux = mux
            .getter("getContentManager", Value::Object(content))
            .method("activate", &[], move |_| {
                activator
                    .activate(pane_id)
                    .map(|_| Value::Unit)
                    .map_err(|e| fault("activate", e))
            });
    }

    mux.build()
}
