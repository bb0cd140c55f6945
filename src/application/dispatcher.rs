//! Delivery dispatcher use case
//!
//! Classifies the target, then runs the strategies planned for that variant
//! followed by the shared tail, stopping at the first one that delivers.

use tracing::{debug, info, warn};

use crate::domain::config::AppConfig;
use crate::domain::delivery::{DeliveryError, EngineVariant, SendResult};
use crate::domain::payload::Payload;
use crate::host::ObjectRef;

use super::classify::{Classifier, TokenSets};
use super::paste::PasteFallback;
use super::ports::{Clipboard, Keystroke};
use super::probe::{probe_flag, try_get_path, walk, ProbeLimits};
use super::strategy::{variant_strategies, vocab, Strategy, StrategyContext, SHARED_TAIL};

/// Name of the final cascade step
pub const SYNTHETIC_PASTE: &str = "synthetic-paste";

/// One entry of a delivery plan
#[derive(Debug, Clone, Copy)]
pub enum Step {
    Probe(Strategy),
    Paste,
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::Probe(strategy) => strategy.name,
            Step::Paste => SYNTHETIC_PASTE,
        }
    }
}

/// What happened during one `deliver` call
#[derive(Debug, Clone)]
pub struct DeliveryTrace {
    pub variant: EngineVariant,
    /// Steps run, in order
    pub attempted: Vec<&'static str>,
    pub delivered_by: Option<&'static str>,
    pub result: SendResult,
}

/// Strategy cascade over an opaque terminal target
pub struct Dispatcher<C, K>
where
    C: Clipboard,
    K: Keystroke,
{
    classifier: Classifier,
    limits: ProbeLimits,
    paste: PasteFallback<C, K>,
}

impl<C, K> Dispatcher<C, K>
where
    C: Clipboard,
    K: Keystroke,
{
    pub fn new(classifier: Classifier, limits: ProbeLimits, paste: PasteFallback<C, K>) -> Self {
        Self {
            classifier,
            limits,
            paste,
        }
    }

    /// Wire classifier, probe limits and paste fallback from configuration
    pub fn from_config(config: &AppConfig, clipboard: C, keystroke: K) -> Self {
        let limits = ProbeLimits {
            max_depth: config.max_depth_or_default(),
            max_nodes: config.max_nodes_or_default(),
        };
        Self::new(
            Classifier::new(TokenSets::from_config(config), limits),
            limits,
            PasteFallback::from_config(clipboard, keystroke, config),
        )
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn paste(&self) -> &PasteFallback<C, K> {
        &self.paste
    }

    /// Variant strategies, then the shared tail, then the synthetic paste.
    pub fn plan(&self, variant: EngineVariant) -> Vec<Step> {
        variant_strategies(variant)
            .iter()
            .chain(SHARED_TAIL)
            .copied()
            .map(Step::Probe)
            .chain(std::iter::once(Step::Paste))
            .collect()
    }

    /// Send `payload` to the terminal behind `target`.
    pub async fn deliver(&self, target: &ObjectRef, payload: &Payload) -> SendResult {
        self.attempt(target, payload).await.result
    }

    /// Like [`deliver`](Self::deliver) but also reports which steps ran.
    pub async fn attempt(&self, target: &ObjectRef, payload: &Payload) -> DeliveryTrace {
        if probe_flag(target.as_ref(), vocab::VISIBLE) == Some(false) {
            warn!("terminal reports it is not visible");
            return DeliveryTrace {
                variant: EngineVariant::Unknown,
                attempted: Vec::new(),
                delivered_by: None,
                result: DeliveryError::NoSurface.into(),
            };
        }

        let variant = self.classifier.classify(target);
        let ctx = StrategyContext {
            tokens: self.classifier.tokens(),
            limits: self.limits,
        };

        let mut attempted = Vec::new();
        for step in self.plan(variant) {
            if matches!(step, Step::Paste) && !self.paste.is_applicable() {
                debug!("synthetic paste skipped on this platform");
                continue;
            }
            attempted.push(step.name());
            let outcome = match step {
                Step::Probe(strategy) => strategy.run(&ctx, target, payload),
                Step::Paste => self.paste.paste(target, payload).await,
            };
            debug!(strategy = step.name(), ?outcome, "strategy finished");

            if outcome.is_delivered() {
                info!(%variant, strategy = step.name(), "code reference delivered");
                return DeliveryTrace {
                    variant,
                    attempted,
                    delivered_by: Some(step.name()),
                    result: SendResult::Success(format!(
                        "Code reference sent to terminal: {}",
                        payload.headline()
                    )),
                };
            }
        }

        warn!(%variant, attempted = attempted.len(), "no strategy delivered");
        let error = DeliveryError::Exhausted {
            variant,
            attempted: attempted.len(),
        };
        DeliveryTrace {
            variant,
            attempted,
            delivered_by: None,
            result: error.into(),
        }
    }

    /// Cheap check whether a terminal surface seems to be present.
    pub fn is_terminal_available(&self, root: &ObjectRef) -> bool {
        if probe_flag(root.as_ref(), vocab::VISIBLE) == Some(false) {
            return false;
        }

        if try_get_path(root.as_ref(), &[vocab::CONTENT_MANAGER, vocab::SELECTED_CONTENT]).is_some()
        {
            return true;
        }

        if self.classifier.classify(root) != EngineVariant::Unknown {
            return true;
        }

        walk(root, self.limits)
            .iter()
            .any(|v| probe_flag(v.node.as_ref(), vocab::FOCUSED) == Some(true))
    }
}
