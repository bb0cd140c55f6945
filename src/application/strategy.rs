//! Delivery strategies
//!
//! Each strategy chains a handful of capability probes that stand for the
//! names a "send text to this terminal" entry point has had across host
//! versions. A strategy is delivered as soon as one probe invokes
//! successfully and not applicable only when every probe in its chain is.

use tracing::debug;

use crate::domain::delivery::{EngineVariant, Outcome};
use crate::domain::payload::Payload;
use crate::host::{HostObject, ObjectRef, Value};

use super::classify::TokenSets;
use super::probe::{
    probe_flag, try_get_path, try_get_related, try_invoke, try_invoke_any, type_name_of, walk,
    ProbeLimits, Visited,
};

/// Member names probed by the strategies
pub mod vocab {
    /// `(text)` senders on UI-level objects
    pub const SEND: &[&str] = &["sendText", "sendString", "sendInput", "pasteText"];
    /// `(text, userInput)` senders used by terminal starters
    pub const SEND_FLAGGED: &[&str] = &["sendString", "sendText"];
    /// `(text)` writers on low-level connectors
    pub const WRITE: &[&str] = &["write", "writeString"];
    pub const CONNECTED: &[&str] = &["isConnected"];
    pub const FOCUSED: &[&str] = &["hasFocus", "isFocusOwner", "isFocused", "isActive"];
    pub const VISIBLE: &[&str] = &["isVisible", "isAvailable"];
    pub const ACTIVATE: &[&str] = &["activate", "show", "requestFocus"];

    pub const FOCUS_OWNER: &[&str] = &["getFocusOwner", "getFocusedComponent", "focusOwner"];
    pub const CONTENT_MANAGER: &[&str] = &["getContentManager", "contentManager"];
    pub const SELECTED_CONTENT: &[&str] = &["getSelectedContent", "selectedContent"];
    pub const COMPONENT: &[&str] = &["getComponent", "component"];

    pub const VIEW: &[&str] = &["getTerminalView", "getView", "terminalView", "myView"];
    pub const SESSION: &[&str] = &["getSession", "getTerminalSession", "session", "mySession"];
    pub const CONTROLLER: &[&str] = &[
        "getController",
        "getTerminalController",
        "controller",
        "myController",
    ];
    pub const WIDGET: &[&str] = &["getTerminalWidget", "getWidget", "terminalWidget", "myWidget"];
    pub const STARTER: &[&str] = &["getTerminalStarter", "terminalStarter", "myTerminalStarter"];
    pub const CONNECTOR: &[&str] = &[
        "getTtyConnector",
        "getConnector",
        "ttyConnector",
        "myTtyConnector",
    ];
}

const MODERN_DESCENTS: &[&[&str]] = &[vocab::VIEW, vocab::SESSION, vocab::CONTROLLER];
const SESSION_DESCENTS: &[&[&str]] = &[vocab::SESSION, vocab::CONTROLLER];
const GENERIC_DESCENTS: &[&[&str]] = &[
    vocab::VIEW,
    vocab::SESSION,
    vocab::CONTROLLER,
    vocab::WIDGET,
];
const SELECTED_COMPONENT: &[&[&str]] = &[
    vocab::CONTENT_MANAGER,
    vocab::SELECTED_CONTENT,
    vocab::COMPONENT,
];

/// What every strategy may consult
#[derive(Debug, Clone, Copy)]
pub struct StrategyContext<'a> {
    pub tokens: &'a TokenSets,
    pub limits: ProbeLimits,
}

pub type StrategyFn = fn(&StrategyContext<'_>, &ObjectRef, &Payload) -> Outcome;

/// One named attempt path
#[derive(Clone, Copy)]
pub struct Strategy {
    pub name: &'static str,
    run: StrategyFn,
}

impl Strategy {
    pub const fn new(name: &'static str, run: StrategyFn) -> Self {
        Self { name, run }
    }

    pub fn run(&self, ctx: &StrategyContext<'_>, target: &ObjectRef, payload: &Payload) -> Outcome {
        (self.run)(ctx, target, payload)
    }
}

impl std::fmt::Debug for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Strategy").field(&self.name).finish()
    }
}

pub const BLOCK_WIDGET_SEND: Strategy = Strategy::new("block-widget-send", block_widget_send);
pub const BLOCK_SESSION_SEND: Strategy = Strategy::new("block-session-send", block_session_send);
pub const CLASSIC_WIDGET_SEND: Strategy = Strategy::new("classic-widget-send", classic_widget_send);
pub const CLASSIC_STARTER_SEND: Strategy =
    Strategy::new("classic-starter-send", classic_starter_send);
pub const CLASSIC_CONNECTOR_WRITE: Strategy =
    Strategy::new("classic-connector-write", classic_connector_write);
pub const GENERIC_TREE_SEND: Strategy = Strategy::new("generic-tree-send", generic_tree_send);
pub const FOCUSED_COMPONENT: Strategy = Strategy::new("focused-component", focused_component);
pub const SELECTED_CONTENT_MODERN: Strategy =
    Strategy::new("selected-content-modern", selected_content_modern);
pub const SELECTED_CONTENT_CLASSIC: Strategy =
    Strategy::new("selected-content-classic", selected_content_classic);

/// Strategies tried first for a variant
pub fn variant_strategies(variant: EngineVariant) -> &'static [Strategy] {
    match variant {
        EngineVariant::ModernBlock => &[BLOCK_WIDGET_SEND, BLOCK_SESSION_SEND],
        EngineVariant::Classic => &[
            CLASSIC_WIDGET_SEND,
            CLASSIC_STARTER_SEND,
            CLASSIC_CONNECTOR_WRITE,
        ],
        EngineVariant::Unknown => &[GENERIC_TREE_SEND],
    }
}

/// Probe-based part of the tail shared by every variant
pub const SHARED_TAIL: &[Strategy] = &[
    FOCUSED_COMPONENT,
    SELECTED_CONTENT_MODERN,
    SELECTED_CONTENT_CLASSIC,
];

fn block_widget_send(ctx: &StrategyContext<'_>, target: &ObjectRef, payload: &Payload) -> Outcome {
    let nodes = terminal_nodes(ctx, target, |name| ctx.tokens.is_modern(name));
    outcome(nodes.iter().any(|node| send_direct(node.as_ref(), payload)))
}

fn block_session_send(ctx: &StrategyContext<'_>, target: &ObjectRef, payload: &Payload) -> Outcome {
    let nodes = terminal_nodes(ctx, target, |name| ctx.tokens.is_modern(name));
    outcome(
        nodes
            .iter()
            .any(|node| send_descending(ctx, node.as_ref(), payload, MODERN_DESCENTS)),
    )
}

fn classic_widget_send(ctx: &StrategyContext<'_>, target: &ObjectRef, payload: &Payload) -> Outcome {
    let nodes = terminal_nodes(ctx, target, |name| ctx.tokens.is_classic(name));
    outcome(nodes.iter().any(|node| send_direct(node.as_ref(), payload)))
}

fn classic_starter_send(ctx: &StrategyContext<'_>, target: &ObjectRef, payload: &Payload) -> Outcome {
    let nodes = terminal_nodes(ctx, target, |name| ctx.tokens.is_classic(name));
    outcome(
        nodes
            .iter()
            .flat_map(|node| with_widget(node))
            .any(|widget| starter_send(widget.as_ref(), payload)),
    )
}

fn classic_connector_write(
    ctx: &StrategyContext<'_>,
    target: &ObjectRef,
    payload: &Payload,
) -> Outcome {
    let nodes = terminal_nodes(ctx, target, |name| ctx.tokens.is_classic(name));
    outcome(
        nodes
            .iter()
            .flat_map(|node| with_widget(node))
            .any(|widget| connector_write(widget.as_ref(), payload)),
    )
}

fn generic_tree_send(ctx: &StrategyContext<'_>, target: &ObjectRef, payload: &Payload) -> Outcome {
    let nodes = terminal_nodes(ctx, target, |_| true);
    outcome(
        nodes
            .iter()
            .any(|node| send_descending(ctx, node.as_ref(), payload, GENERIC_DESCENTS)),
    )
}

/// The focus owner reported by the host, else the first focused node of the
/// tree followed by its ancestors.
fn focused_component(ctx: &StrategyContext<'_>, target: &ObjectRef, payload: &Payload) -> Outcome {
    let mut chain = Vec::new();
    if let Some(owner) = try_get_related(target.as_ref(), vocab::FOCUS_OWNER) {
        chain.push(owner);
    }

    let visited = walk(target, ctx.limits);
    if let Some(mut index) = visited
        .iter()
        .position(|v| probe_flag(v.node.as_ref(), vocab::FOCUSED) == Some(true))
    {
        loop {
            chain.push(visited[index].node.clone());
            match visited[index].parent {
                Some(parent) => index = parent,
                None => break,
            }
        }
    }

    if chain.is_empty() {
        debug!("no focused component");
        return Outcome::NotApplicable;
    }

    outcome(chain.iter().any(|node| {
        send_descending(ctx, node.as_ref(), payload, GENERIC_DESCENTS)
            || connector_write(node.as_ref(), payload)
    }))
}

fn selected_content_modern(
    ctx: &StrategyContext<'_>,
    target: &ObjectRef,
    payload: &Payload,
) -> Outcome {
    outcome(entry_points(target).iter().any(|entry| {
        try_get_related(entry.as_ref(), vocab::VIEW)
            .into_iter()
            .chain(std::iter::once(entry.clone()))
            .any(|view| send_descending(ctx, view.as_ref(), payload, SESSION_DESCENTS))
    }))
}

fn selected_content_classic(
    _ctx: &StrategyContext<'_>,
    target: &ObjectRef,
    payload: &Payload,
) -> Outcome {
    outcome(entry_points(target).iter().any(|entry| {
        with_widget(entry).iter().any(|widget| {
            starter_send(widget.as_ref(), payload)
                || connector_write(widget.as_ref(), payload)
                || send_direct(widget.as_ref(), payload)
        })
    }))
}

fn outcome(delivered: bool) -> Outcome {
    if delivered {
        Outcome::Delivered
    } else {
        Outcome::NotApplicable
    }
}

fn text(payload: &Payload) -> Value {
    Value::Text(payload.as_str().to_string())
}

/// Nodes of the tree whose type name passes `filter`, focused ones first.
///
/// Once any node reports focus, only focused nodes, their ancestors and their
/// descendants qualify. Unfocused siblings are never written to.
fn terminal_nodes(
    ctx: &StrategyContext<'_>,
    target: &ObjectRef,
    filter: impl Fn(&str) -> bool,
) -> Vec<ObjectRef> {
    let visited = walk(target, ctx.limits);
    let focused: Vec<bool> = visited
        .iter()
        .map(|v| probe_flag(v.node.as_ref(), vocab::FOCUSED) == Some(true))
        .collect();
    let scope = focus_scope(&visited, &focused);

    let (first, rest): (Vec<_>, Vec<_>) = visited
        .iter()
        .enumerate()
        .filter(|(i, _)| scope.as_ref().map_or(true, |scope| scope[*i]))
        .filter(|(_, v)| type_name_of(v.node.as_ref()).is_some_and(|name| filter(&name)))
        .partition(|(i, _)| focused[*i]);

    first
        .into_iter()
        .chain(rest)
        .map(|(_, v)| v.node.clone())
        .collect()
}

/// Walk positions on a line of ancestry with a focused node, or `None` when
/// nothing in the walk reports focus.
fn focus_scope(visited: &[Visited], focused: &[bool]) -> Option<Vec<bool>> {
    if !focused.contains(&true) {
        return None;
    }

    // Pre-order: every parent index is smaller than its children's
    let mut below = vec![false; visited.len()];
    for (i, v) in visited.iter().enumerate() {
        below[i] = focused[i] || v.parent.is_some_and(|p| below[p]);
    }

    let mut scope = below;
    for (i, _) in focused.iter().enumerate().filter(|(_, f)| **f) {
        let mut cursor = visited[i].parent;
        while let Some(p) = cursor {
            scope[p] = true;
            cursor = visited[p].parent;
        }
    }
    Some(scope)
}

/// The selected tab's component if the host has one, then the target itself.
fn entry_points(target: &ObjectRef) -> Vec<ObjectRef> {
    let mut entries = Vec::with_capacity(2);
    if let Some(component) = try_get_path(target.as_ref(), SELECTED_COMPONENT) {
        entries.push(component);
    }
    entries.push(target.clone());
    entries
}

/// A node's embedded terminal widget if it has one, then the node itself.
fn with_widget(node: &ObjectRef) -> Vec<ObjectRef> {
    let mut widgets = Vec::with_capacity(2);
    if let Some(widget) = try_get_related(node.as_ref(), vocab::WIDGET) {
        widgets.push(widget);
    }
    widgets.push(node.clone());
    widgets
}

/// UI-level send on a single object; success is not confirmed any further.
fn send_direct(obj: &dyn HostObject, payload: &Payload) -> bool {
    let text = text(payload);
    try_invoke_any(obj, vocab::SEND, std::slice::from_ref(&text)).is_some()
        || vocab::SEND_FLAGGED
            .iter()
            .any(|name| try_invoke(obj, name, &[text.clone(), Value::Bool(true)]).is_invoked())
}

/// Direct send, then the same through related objects, at most `max_depth` levels down.
fn send_descending(
    ctx: &StrategyContext<'_>,
    obj: &dyn HostObject,
    payload: &Payload,
    descents: &[&[&str]],
) -> bool {
    fn go(
        obj: &dyn HostObject,
        payload: &Payload,
        descents: &[&[&str]],
        depth: usize,
        max_depth: usize,
    ) -> bool {
        if send_direct(obj, payload) {
            return true;
        }
        if depth >= max_depth {
            return false;
        }
        descents
            .iter()
            .filter_map(|names| try_get_related(obj, names))
            .any(|next| go(next.as_ref(), payload, descents, depth + 1, max_depth))
    }

    go(obj, payload, descents, 0, ctx.limits.max_depth)
}

fn starter_send(widget: &dyn HostObject, payload: &Payload) -> bool {
    try_get_related(widget, vocab::STARTER).is_some_and(|starter| send_direct(starter.as_ref(), payload))
}

/// Write to the TTY connector, but only once it confirms it is connected.
fn connector_write(widget: &dyn HostObject, payload: &Payload) -> bool {
    let Some(connector) = try_get_related(widget, vocab::CONNECTOR) else {
        return false;
    };
    if probe_flag(connector.as_ref(), vocab::CONNECTED) != Some(true) {
        debug!(connector = ?connector, "connector not confirmed connected");
        return false;
    }
    try_invoke_any(connector.as_ref(), vocab::WRITE, &[text(payload)]).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{ArgKind, HostFault, ScriptedObject};
    use std::sync::{Arc, Mutex};

    type Log = Arc<Mutex<Vec<String>>>;

    fn recorder(log: &Log) -> impl Fn(&[Value]) -> Result<Value, HostFault> + Send + Sync + 'static {
        let log = log.clone();
        move |args| {
            if let Some(text) = args.first().and_then(Value::as_text) {
                log.lock().unwrap().push(text.to_string());
            }
            Ok(Value::Unit)
        }
    }

    fn ctx(tokens: &TokenSets) -> StrategyContext<'_> {
        StrategyContext {
            tokens,
            limits: ProbeLimits::default(),
        }
    }

    fn payload() -> Payload {
        Payload::new("\nsrc/lib.rs:7")
    }

    #[test]
    fn variant_lists_are_distinct() {
        let names = |v| {
            variant_strategies(v)
                .iter()
                .map(|s| s.name)
                .collect::<Vec<_>>()
        };
        assert_eq!(
            names(EngineVariant::ModernBlock),
            ["block-widget-send", "block-session-send"]
        );
        assert_eq!(names(EngineVariant::Unknown), ["generic-tree-send"]);
        assert_eq!(names(EngineVariant::Classic).len(), 3);
    }

    #[test]
    fn block_session_send_descends_to_controller() {
        let log = Log::default();
        let controller = ScriptedObject::builder("terminal.block.TerminalController")
            .method("sendText", &[ArgKind::Text], recorder(&log))
            .build();
        let session = ScriptedObject::builder("terminal.block.TerminalSession")
            .field("myController", Value::Object(controller))
            .build();
        let view = ScriptedObject::builder("terminal.block.BlockTerminalView")
            .getter("getSession", Value::Object(session))
            .build();
        let root: ObjectRef = ScriptedObject::builder("host.ToolWindow").child(view).build();

        let tokens = TokenSets::default();
        assert_eq!(
            BLOCK_WIDGET_SEND.run(&ctx(&tokens), &root, &payload()),
            Outcome::NotApplicable
        );
        assert_eq!(
            BLOCK_SESSION_SEND.run(&ctx(&tokens), &root, &payload()),
            Outcome::Delivered
        );
        assert_eq!(*log.lock().unwrap(), ["\nsrc/lib.rs:7"]);
    }

    #[test]
    fn descent_stops_at_max_depth() {
        let log = Log::default();
        let deep = ScriptedObject::builder("x.Deep")
            .method("sendText", &[ArgKind::Text], recorder(&log))
            .build();
        let mut node: ObjectRef = deep;
        for i in 0..3 {
            node = ScriptedObject::builder(format!("x.Level{}", i))
                .getter("getSession", Value::Object(node))
                .build();
        }
        let tokens = TokenSets::default();
        let shallow = StrategyContext {
            tokens: &tokens,
            limits: ProbeLimits {
                max_depth: 2,
                max_nodes: 10,
            },
        };
        assert!(!send_descending(&shallow, node.as_ref(), &payload(), SESSION_DESCENTS));
        assert!(send_descending(&ctx(&tokens), node.as_ref(), &payload(), SESSION_DESCENTS));
        assert_eq!(log.lock().unwrap().len(), 1);
    }

    #[test]
    fn starter_uses_flagged_send() {
        let log = Log::default();
        let starter = ScriptedObject::builder("com.jediterm.terminal.TerminalStarter")
            .method("sendString", &[ArgKind::Text, ArgKind::Bool], recorder(&log))
            .build();
        let widget = ScriptedObject::builder("com.jediterm.terminal.ui.JediTermWidget")
            .hidden_method("getTerminalStarter", &[], move |_| {
                Ok(Value::Object(starter.clone()))
            })
            .build();
        let root: ObjectRef = ScriptedObject::builder("host.ToolWindow").child(widget).build();

        let tokens = TokenSets::default();
        assert_eq!(
            CLASSIC_WIDGET_SEND.run(&ctx(&tokens), &root, &payload()),
            Outcome::NotApplicable
        );
        assert_eq!(
            CLASSIC_STARTER_SEND.run(&ctx(&tokens), &root, &payload()),
            Outcome::Delivered
        );
        assert_eq!(log.lock().unwrap().len(), 1);
    }

    #[test]
    fn disconnected_connector_is_not_written() {
        let log = Log::default();
        let connector = ScriptedObject::builder("com.pty4j.PtyProcessTtyConnector")
            .getter("isConnected", Value::Bool(false))
            .method("write", &[ArgKind::Text], recorder(&log))
            .build();
        let widget = ScriptedObject::builder("org.jetbrains.plugins.terminal.ShellTerminalWidget")
            .getter("getTtyConnector", Value::Object(connector))
            .build();
        let root: ObjectRef = ScriptedObject::builder("host.ToolWindow").child(widget).build();

        let tokens = TokenSets::default();
        assert_eq!(
            CLASSIC_CONNECTOR_WRITE.run(&ctx(&tokens), &root, &payload()),
            Outcome::NotApplicable
        );
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn connected_connector_is_written() {
        let log = Log::default();
        let connector = ScriptedObject::builder("com.pty4j.PtyProcessTtyConnector")
            .getter("isConnected", Value::Bool(true))
            .method("write", &[ArgKind::Text], recorder(&log))
            .build();
        let widget = ScriptedObject::builder("org.jetbrains.plugins.terminal.ShellTerminalWidget")
            .field("myTtyConnector", Value::Object(connector))
            .build();
        let root: ObjectRef = ScriptedObject::builder("host.ToolWindow").child(widget).build();

        let tokens = TokenSets::default();
        assert_eq!(
            CLASSIC_CONNECTOR_WRITE.run(&ctx(&tokens), &root, &payload()),
            Outcome::Delivered
        );
    }

    #[test]
    fn focused_node_is_preferred_in_tree_scans() {
        let first = Log::default();
        let second = Log::default();
        let idle = ScriptedObject::builder("x.Pane")
            .method("sendText", &[ArgKind::Text], recorder(&first))
            .getter("hasFocus", Value::Bool(false))
            .build();
        let active = ScriptedObject::builder("x.Pane")
            .method("sendText", &[ArgKind::Text], recorder(&second))
            .getter("hasFocus", Value::Bool(true))
            .build();
        let root: ObjectRef = ScriptedObject::builder("x.Window")
            .child(idle)
            .child(active)
            .build();

        let tokens = TokenSets::default();
        assert_eq!(
            GENERIC_TREE_SEND.run(&ctx(&tokens), &root, &payload()),
            Outcome::Delivered
        );
        assert!(first.lock().unwrap().is_empty());
        assert_eq!(second.lock().unwrap().len(), 1);
    }

    #[test]
    fn unfocused_sibling_is_skipped_when_focused_pane_fails() {
        let other = Log::default();
        let broken = ScriptedObject::builder("x.Pane")
            .method("sendText", &[ArgKind::Text], |_| {
                Err(HostFault::new("sendText", "pane gone"))
            })
            .getter("hasFocus", Value::Bool(true))
            .build();
        let idle = ScriptedObject::builder("x.Pane")
            .method("sendText", &[ArgKind::Text], recorder(&other))
            .getter("hasFocus", Value::Bool(false))
            .build();
        let tab = ScriptedObject::builder("x.Tab").child(broken).build();
        let root: ObjectRef = ScriptedObject::builder("x.Window")
            .child(idle)
            .child(tab)
            .build();

        let tokens = TokenSets::default();
        assert_eq!(
            GENERIC_TREE_SEND.run(&ctx(&tokens), &root, &payload()),
            Outcome::NotApplicable
        );
        assert!(other.lock().unwrap().is_empty());
    }

    #[test]
    fn focus_scope_covers_ancestors_and_descendants() {
        let log = Log::default();
        let session = ScriptedObject::builder("x.Session")
            .method("sendText", &[ArgKind::Text], recorder(&log))
            .build();
        let pane = ScriptedObject::builder("x.Pane")
            .getter("hasFocus", Value::Bool(true))
            .child(session)
            .build();
        let root: ObjectRef = ScriptedObject::builder("x.Window")
            .child(ScriptedObject::builder("x.Sidebar").build())
            .child(pane)
            .build();

        let visited = walk(&root, ProbeLimits::default());
        let focused: Vec<bool> = visited
            .iter()
            .map(|v| probe_flag(v.node.as_ref(), vocab::FOCUSED) == Some(true))
            .collect();
        // window, sidebar, pane, session
        assert_eq!(
            focus_scope(&visited, &focused),
            Some(vec![true, false, true, true])
        );

        let tokens = TokenSets::default();
        assert_eq!(
            GENERIC_TREE_SEND.run(&ctx(&tokens), &root, &payload()),
            Outcome::Delivered
        );
        assert_eq!(log.lock().unwrap().len(), 1);
    }

    #[test]
    fn focused_component_walks_up_to_ancestor() {
        let log = Log::default();
        let editor = ScriptedObject::builder("x.InputEditor")
            .getter("isFocusOwner", Value::Bool(true))
            .build();
        let panel = ScriptedObject::builder("x.TerminalPanel")
            .method("sendText", &[ArgKind::Text], recorder(&log))
            .child(editor)
            .build();
        let root: ObjectRef = ScriptedObject::builder("x.ToolWindow").child(panel).build();

        let tokens = TokenSets::default();
        assert_eq!(
            FOCUSED_COMPONENT.run(&ctx(&tokens), &root, &payload()),
            Outcome::Delivered
        );
        assert_eq!(log.lock().unwrap().len(), 1);
    }

    #[test]
    fn focused_component_without_focus_is_not_applicable() {
        let root: ObjectRef = ScriptedObject::builder("x.ToolWindow").build();
        let tokens = TokenSets::default();
        assert_eq!(
            FOCUSED_COMPONENT.run(&ctx(&tokens), &root, &payload()),
            Outcome::NotApplicable
        );
    }

    #[test]
    fn selected_content_modern_uses_view_session() {
        let log = Log::default();
        let session = ScriptedObject::builder("x.Session")
            .method("sendText", &[ArgKind::Text], recorder(&log))
            .build();
        let view = ScriptedObject::builder("x.View")
            .getter("getSession", Value::Object(session))
            .build();
        let component = ScriptedObject::builder("x.Component")
            .getter("getTerminalView", Value::Object(view))
            .build();
        let content = ScriptedObject::builder("x.Content")
            .getter("getComponent", Value::Object(component))
            .build();
        let manager = ScriptedObject::builder("x.ContentManager")
            .getter("getSelectedContent", Value::Object(content))
            .build();
        let root: ObjectRef = ScriptedObject::builder("x.ToolWindow")
            .getter("getContentManager", Value::Object(manager))
            .build();

        let tokens = TokenSets::default();
        assert_eq!(
            SELECTED_CONTENT_MODERN.run(&ctx(&tokens), &root, &payload()),
            Outcome::Delivered
        );
        assert_eq!(log.lock().unwrap().len(), 1);
    }
}
