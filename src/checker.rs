//! Domain spoofability checker
//!
//! Turns the text of the sender address field into a rendered
//! security assessment. Each valid evaluation bumps a generation
//! number and gets its own cancellation token; a response is only
//! rendered if its generation is still the latest, so a slow answer to
//! an old input can never overwrite a newer one.

use crate::address::domain_of;
use crate::api::DomainCheckApi;
use crate::config::CheckerConfig;
use crate::debounce::Debouncer;
use crate::error::Error;
use crate::mode::FieldMode;
use crate::model::DomainCheckResult;
use crate::notify::{Notification, Notifier, TracingNotifier};
use crate::render::{DetailPanel, StatusLine};
use crate::view::CheckerView;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// What the checker is currently displaying.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CheckerState {
    /// Nothing to show: no valid address, or the field is not in
    /// free-text mode.
    #[default]
    Idle,
    Checking {
        domain: String,
    },
    Resolved {
        domain: String,
        result: DomainCheckResult,
    },
    Failed {
        domain: String,
        reason: String,
    },
}

impl CheckerState {
    /// The domain the state refers to, if any.
    #[must_use]
    pub fn domain(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Checking { domain }
            | Self::Resolved { domain, .. }
            | Self::Failed { domain, .. } => Some(domain),
        }
    }
}

struct Shared<V> {
    view: V,
    state: CheckerState,
    mode: FieldMode,
    generation: u64,
    in_flight: Option<CancellationToken>,
}

struct Inner<A, V> {
    api: A,
    notifier: Arc<dyn Notifier>,
    request_timeout: Duration,
    debouncer: Debouncer,
    shared: Mutex<Shared<V>>,
}

/// Debounced domain checker owning its view nodes.
///
/// Clones share the same state and view.
pub struct DomainChecker<A, V> {
    inner: Arc<Inner<A, V>>,
}

impl<A, V> Clone for DomainChecker<A, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: DomainCheckApi, V: CheckerView> DomainChecker<A, V> {
    /// Create a checker that reports failures through `tracing`.
    pub fn new(api: A, view: V, config: &CheckerConfig) -> Self {
        Self::with_notifier(api, view, config, Arc::new(TracingNotifier))
    }

    pub fn with_notifier(
        api: A,
        view: V,
        config: &CheckerConfig,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                notifier,
                request_timeout: config.request_timeout,
                debouncer: Debouncer::new(config.debounce),
                shared: Mutex::new(Shared {
                    view,
                    state: CheckerState::Idle,
                    mode: FieldMode::Custom,
                    generation: 0,
                    in_flight: None,
                }),
            }),
        }
    }

    /// Current display state.
    #[must_use]
    pub fn state(&self) -> CheckerState {
        self.lock().state.clone()
    }

    #[must_use]
    pub fn mode(&self) -> FieldMode {
        self.lock().mode.clone()
    }

    /// Check the domain of `text` right away and render the outcome.
    ///
    /// Text without a usable domain clears the display without any
    /// network call. Failures are shown to the user, never returned.
    pub async fn evaluate(&self, text: &str) {
        let Some(domain) = domain_of(text) else {
            debug!("No domain in {:?}, clearing display", text);
            self.clear();
            return;
        };
        let domain = domain.to_string();

        let (generation, cancel) = {
            let mut shared = self.lock();
            if let Some(previous) = shared.in_flight.take() {
                previous.cancel();
            }
            shared.generation += 1;
            let token = CancellationToken::new();
            shared.in_flight = Some(token.clone());
            shared.state = CheckerState::Checking {
                domain: domain.clone(),
            };
            shared.view.set_spinner(true);
            shared.view.set_status(StatusLine::checking());
            (shared.generation, token)
        };

        debug!("Dispatching check #{} for {}", generation, domain);

        let outcome = tokio::select! {
            () = cancel.cancelled() => {
                debug!("Check #{} for {} cancelled", generation, domain);
                return;
            }
            outcome = tokio::time::timeout(
                self.inner.request_timeout,
                self.inner.api.check_domain(&domain),
            ) => outcome.unwrap_or_else(|_| Err(Error::Timeout)),
        };

        let mut shared = self.lock();
        if shared.generation != generation {
            debug!("Discarding stale response #{} for {}", generation, domain);
            return;
        }
        shared.in_flight = None;
        shared.view.set_spinner(false);

        match outcome {
            Ok(result) => {
                info!("{} spoofable={}", domain, result.spoofable);
                shared.view.set_status(StatusLine::resolved(&result));
                shared
                    .view
                    .show_details(&DetailPanel::from_result(&domain, &result));
                shared.state = CheckerState::Resolved { domain, result };
            }
            Err(e) => {
                warn!("Domain check for {} failed: {}", domain, e);
                // Detail panel keeps whatever it showed last.
                shared.view.set_status(StatusLine::error());
                shared.state = CheckerState::Failed {
                    domain: domain.clone(),
                    reason: e.to_string(),
                };
                drop(shared);
                self.inner.notifier.notify(Notification::error(
                    "Error",
                    format!("Could not check {domain}: {e}"),
                ));
            }
        }
    }

    /// Debounced [`evaluate`](Self::evaluate), for every edit of the
    /// address field.
    ///
    /// Ignored unless the field is in free-text mode.
    pub fn request(&self, text: impl Into<String>) {
        if !self.lock().mode.is_custom() {
            debug!("Address edited outside custom mode, skipping check");
            return;
        }
        let checker = self.clone();
        let text = text.into();
        self.inner
            .debouncer
            .call(async move { checker.evaluate(&text).await });
    }

    /// Switch the field mode.
    ///
    /// Entering free-text mode schedules a debounced check of `text`;
    /// leaving it clears the display immediately.
    pub fn set_mode(&self, mode: FieldMode, text: &str) {
        let custom = mode.is_custom();
        self.lock().mode = mode;
        if custom {
            self.request(text);
        } else {
            self.reset();
        }
    }

    /// Whether a debounced check is still waiting for its quiet period.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.inner.debouncer.is_pending()
    }

    /// Wait for the last debounced check to finish or be superseded.
    pub async fn settle(&self) {
        self.inner.debouncer.settle().await;
    }

    /// Drop pending and in-flight checks and clear the display.
    pub fn reset(&self) {
        self.inner.debouncer.cancel();
        self.clear();
    }

    fn clear(&self) {
        let mut shared = self.lock();
        if let Some(in_flight) = shared.in_flight.take() {
            in_flight.cancel();
        }
        shared.generation += 1;
        shared.state = CheckerState::Idle;
        shared.view.clear_status();
        shared.view.set_spinner(false);
        shared.view.hide_details();
    }

    fn lock(&self) -> MutexGuard<'_, Shared<V>> {
        self.inner
            .shared
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
