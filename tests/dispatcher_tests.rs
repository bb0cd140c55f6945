//! Delivery cascade tests against scripted host trees

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use term_courier::application::ports::{
    Clipboard, ClipboardError, Keystroke, KeystrokeError, NoticeKind, NotificationError, Notifier,
};
use term_courier::application::{
    Classifier, Dispatcher, PasteFallback, ProbeLimits, ResultReporter, SYNTHETIC_PASTE,
};
use term_courier::domain::delivery::{EngineVariant, SendResult};
use term_courier::domain::payload::{LineSpan, Payload, Selection};
use term_courier::domain::platform::{PasteShortcut, Platform};
use term_courier::host::{ArgKind, HostFault, ObjectRef, ScriptedObject, Value};

type Log = Arc<Mutex<Vec<String>>>;

#[derive(Default, Clone)]
struct MockClipboard {
    copied: Log,
}

#[async_trait]
impl Clipboard for MockClipboard {
    async fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        self.copied.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

#[derive(Default, Clone)]
struct MockKeystroke {
    pressed: Arc<Mutex<Vec<PasteShortcut>>>,
}

#[async_trait]
impl Keystroke for MockKeystroke {
    async fn press_paste(&self, shortcut: PasteShortcut) -> Result<(), KeystrokeError> {
        self.pressed.lock().unwrap().push(shortcut);
        Ok(())
    }
}

#[derive(Default, Clone)]
struct MockNotifier {
    shown: Log,
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn notify(
        &self,
        _title: &str,
        message: &str,
        _kind: NoticeKind,
    ) -> Result<(), NotificationError> {
        self.shown.lock().unwrap().push(message.to_string());
        Ok(())
    }
}

struct Harness {
    dispatcher: Dispatcher<MockClipboard, MockKeystroke>,
    clipboard: MockClipboard,
    keystroke: MockKeystroke,
}

fn harness(platform: Platform) -> Harness {
    let clipboard = MockClipboard::default();
    let keystroke = MockKeystroke::default();
    let paste = PasteFallback::new(clipboard.clone(), keystroke.clone(), Platform::Windows)
        .on_platform(platform)
        .with_settle_delay(Duration::ZERO);
    Harness {
        dispatcher: Dispatcher::new(Classifier::default(), ProbeLimits::default(), paste),
        clipboard,
        keystroke,
    }
}

fn recorder(log: &Log) -> impl Fn(&[Value]) -> Result<Value, HostFault> + Send + Sync + 'static {
    let log = log.clone();
    move |args| {
        if let Some(text) = args.first().and_then(Value::as_text) {
            log.lock().unwrap().push(text.to_string());
        }
        Ok(Value::Unit)
    }
}

fn payload() -> Payload {
    Selection::reference("src/main.rs", LineSpan::single(42).unwrap()).to_payload()
}

#[tokio::test]
async fn unknown_target_without_capabilities_reports_error() {
    let root: ObjectRef = ScriptedObject::builder("host.ToolWindow")
        .child(ScriptedObject::builder("host.Label").build())
        .build();
    let h = harness(Platform::Linux);

    let result = h.dispatcher.deliver(&root, &payload()).await;

    assert!(result.is_error());
    assert!(result.message().contains("Could not send to terminal"));
}

#[tokio::test]
async fn nested_send_receives_payload_verbatim() {
    let log = Log::default();
    let pane = ScriptedObject::builder("host.Pane")
        .method("sendText", &[ArgKind::Text], recorder(&log))
        .build();
    let root: ObjectRef = ScriptedObject::builder("host.ToolWindow").child(pane).build();
    let h = harness(Platform::Linux);

    let result = h.dispatcher.deliver(&root, &payload()).await;

    assert!(result.is_success());
    assert_eq!(*log.lock().unwrap(), ["\nsrc/main.rs:42"]);
}

#[tokio::test]
async fn excerpt_is_sent_once_to_root_capability() {
    let span = LineSpan::new(10, 12).unwrap();
    let payload = Selection::excerpt("src/a.txt", span, "foo()\n").to_payload();
    assert_eq!(payload.as_str(), "\n# From: src/a.txt:10-12\nfoo()\n");

    let log = Log::default();
    let root: ObjectRef = ScriptedObject::builder("host.Pane")
        .method("sendText", &[ArgKind::Text], recorder(&log))
        .build();
    let h = harness(Platform::Linux);

    let result = h.dispatcher.deliver(&root, &payload).await;

    assert_eq!(
        result,
        SendResult::Success("Code reference sent to terminal: # From: src/a.txt:10-12".into())
    );
    assert_eq!(*log.lock().unwrap(), ["\n# From: src/a.txt:10-12\nfoo()\n"]);
}

#[test]
fn classification_is_deterministic() {
    let root: ObjectRef = ScriptedObject::builder("host.ToolWindow")
        .child(ScriptedObject::builder("org.jetbrains.plugins.terminal.ShellTerminalWidget").build())
        .child(ScriptedObject::builder("org.jetbrains.plugins.terminal.block.BlockTerminalView").build())
        .build();
    let classifier = Classifier::default();

    let first = classifier.classify(&root);
    assert_eq!(first, EngineVariant::ModernBlock);
    for _ in 0..5 {
        assert_eq!(classifier.classify(&root), first);
    }
}

#[tokio::test]
async fn faulting_capabilities_do_not_stop_the_cascade() {
    let log = Log::default();
    let panicking = ScriptedObject::builder("host.BrokenPane")
        .method("sendText", &[ArgKind::Text], |_| panic!("host exploded"))
        .build();
    let failing = ScriptedObject::builder("host.FailingPane")
        .method("sendText", &[ArgKind::Text], |_| {
            Err(HostFault::new("sendText", "disposed"))
        })
        .build();
    let working = ScriptedObject::builder("host.Pane")
        .method("sendText", &[ArgKind::Text], recorder(&log))
        .build();
    let root: ObjectRef = ScriptedObject::builder("host.ToolWindow")
        .child(panicking)
        .child(failing)
        .child(working)
        .build();
    let h = harness(Platform::Linux);

    let trace = h.dispatcher.attempt(&root, &payload()).await;

    assert!(trace.result.is_success());
    assert_eq!(trace.delivered_by, Some("generic-tree-send"));
    assert_eq!(log.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn faulting_variant_strategy_hands_over_to_shared_tail() {
    let log = Log::default();
    let starter = ScriptedObject::builder("host.Starter")
        .method("sendString", &[ArgKind::Text, ArgKind::Bool], recorder(&log))
        .build();
    let widget = ScriptedObject::builder("host.EmbeddedWidget")
        .getter("getTerminalStarter", Value::Object(starter))
        .build();
    let component = ScriptedObject::builder("host.ContentPanel")
        .getter("getTerminalWidget", Value::Object(widget))
        .build();
    let content = ScriptedObject::builder("host.Content")
        .getter("getComponent", Value::Object(component))
        .build();
    let manager = ScriptedObject::builder("host.ContentManager")
        .getter("getSelectedContent", Value::Object(content))
        .build();
    let classic = ScriptedObject::builder("com.jediterm.terminal.ui.JediTermWidget")
        .method("sendText", &[ArgKind::Text], |_| panic!("widget disposed"))
        .build();
    let root: ObjectRef = ScriptedObject::builder("host.ToolWindow")
        .getter("getContentManager", Value::Object(manager))
        .child(classic)
        .build();
    let h = harness(Platform::Linux);

    let trace = h.dispatcher.attempt(&root, &payload()).await;

    assert_eq!(trace.variant, EngineVariant::Classic);
    assert!(trace.result.is_success());
    assert_eq!(trace.delivered_by, Some("selected-content-classic"));
    assert_eq!(trace.attempted.first(), Some(&"classic-widget-send"));
    assert_eq!(trace.attempted.last(), Some(&"selected-content-classic"));
    assert_eq!(trace.attempted.len(), 6);
    assert_eq!(*log.lock().unwrap(), ["\nsrc/main.rs:42"]);
}

#[tokio::test]
async fn failed_focused_pane_never_spills_into_other_tabs() {
    let other = Log::default();
    let background = ScriptedObject::builder("host.Tab")
        .child(
            ScriptedObject::builder("host.Pane")
                .method("sendText", &[ArgKind::Text], recorder(&other))
                .getter("hasFocus", Value::Bool(false))
                .build(),
        )
        .build();
    let current = ScriptedObject::builder("host.Tab")
        .child(
            ScriptedObject::builder("host.Pane")
                .method("sendText", &[ArgKind::Text], |_| {
                    Err(HostFault::new("sendText", "pane gone"))
                })
                .getter("hasFocus", Value::Bool(true))
                .build(),
        )
        .build();
    let root: ObjectRef = ScriptedObject::builder("host.Window")
        .child(background)
        .child(current)
        .build();
    let h = harness(Platform::Linux);

    let result = h.dispatcher.deliver(&root, &payload()).await;

    assert!(result.is_error());
    assert!(other.lock().unwrap().is_empty());
}

#[tokio::test]
async fn modern_target_falls_through_to_classic_tail() {
    let log = Log::default();
    let starter = ScriptedObject::builder("com.jediterm.terminal.TerminalStarter")
        .method("sendString", &[ArgKind::Text, ArgKind::Bool], recorder(&log))
        .build();
    let widget = ScriptedObject::builder("host.EmbeddedWidget")
        .getter("getTerminalStarter", Value::Object(starter))
        .build();
    let component = ScriptedObject::builder("host.ContentPanel")
        .getter("getTerminalWidget", Value::Object(widget))
        .build();
    let content = ScriptedObject::builder("host.Content")
        .getter("getComponent", Value::Object(component))
        .build();
    let manager = ScriptedObject::builder("host.ContentManager")
        .getter("getSelectedContent", Value::Object(content))
        .build();
    let root: ObjectRef = ScriptedObject::builder("host.ToolWindow")
        .getter("getContentManager", Value::Object(manager))
        .child(ScriptedObject::builder("org.jetbrains.plugins.terminal.block.BlockTerminalView").build())
        .build();
    let h = harness(Platform::Linux);

    let trace = h.dispatcher.attempt(&root, &payload()).await;

    assert_eq!(trace.variant, EngineVariant::ModernBlock);
    assert!(trace.result.is_success());
    assert_eq!(trace.delivered_by, Some("selected-content-classic"));
    assert_eq!(
        trace.attempted,
        [
            "block-widget-send",
            "block-session-send",
            "focused-component",
            "selected-content-modern",
            "selected-content-classic",
        ]
    );
    assert_eq!(*log.lock().unwrap(), ["\nsrc/main.rs:42"]);
}

#[tokio::test]
async fn paste_never_runs_off_the_sanctioned_platform() {
    let root: ObjectRef = ScriptedObject::builder("host.ToolWindow").build();
    let h = harness(Platform::Linux);

    let trace = h.dispatcher.attempt(&root, &payload()).await;

    assert!(trace.result.is_error());
    assert!(!trace.attempted.contains(&SYNTHETIC_PASTE));
    assert!(h.clipboard.copied.lock().unwrap().is_empty());
    assert!(h.keystroke.pressed.lock().unwrap().is_empty());
}

#[tokio::test]
async fn paste_runs_last_on_the_sanctioned_platform() {
    let root: ObjectRef = ScriptedObject::builder("host.ToolWindow").build();
    let h = harness(Platform::Windows);

    let trace = h.dispatcher.attempt(&root, &payload()).await;

    assert!(trace.result.is_success());
    assert_eq!(trace.delivered_by, Some(SYNTHETIC_PASTE));
    assert_eq!(*h.clipboard.copied.lock().unwrap(), ["\nsrc/main.rs:42"]);
    assert_eq!(*h.keystroke.pressed.lock().unwrap(), [PasteShortcut::CtrlV]);
}

#[tokio::test]
async fn panicking_tree_still_yields_a_result() {
    struct Hostile;

    impl term_courier::host::HostObject for Hostile {
        fn type_chain(&self) -> &[String] {
            panic!("type lookup failed")
        }

        fn children(&self) -> Vec<ObjectRef> {
            panic!("children failed")
        }
    }

    let root: ObjectRef = Arc::new(Hostile);
    let h = harness(Platform::Linux);

    let result = h.dispatcher.deliver(&root, &payload()).await;

    assert!(result.is_error());
}

#[tokio::test]
async fn clipboard_copy_happens_only_on_error() {
    let payload = payload();

    let clipboard = MockClipboard::default();
    let notifier = MockNotifier::default();
    let reporter = ResultReporter::new(clipboard.clone(), notifier.clone(), true);

    let success = SendResult::Success("Code reference sent to terminal: src/main.rs:42".into());
    let outcome = reporter.report(&success, &payload).await;
    assert!(!outcome.copied_to_clipboard);
    assert!(clipboard.copied.lock().unwrap().is_empty());

    let error = SendResult::Error("No terminal is open or visible.".into());
    let outcome = reporter.report(&error, &payload).await;
    assert!(outcome.copied_to_clipboard);
    assert!(outcome.notified);
    assert_eq!(*clipboard.copied.lock().unwrap(), ["\nsrc/main.rs:42"]);

    let shown = notifier.shown.lock().unwrap();
    assert_eq!(shown.len(), 2);
    assert!(shown[1].ends_with("The reference was copied to the clipboard."));
}
