//! The typeahead controller.
//!
//! [`Typeahead`] owns the interaction state, validates configuration,
//! composes the navigation machine, hint engine, direction probe, and rate
//! limiter, and emits the outward signal contract.
//!
//! # Signals
//!
//! - `value_changed(ValueChange)`: every text edit, hint acceptance, and
//!   commit, carrying the new value and its source
//! - `fetch_requested(String)`: per rate-limit policy, once the text length
//!   reaches `min_length`
//! - `activated(String)`: a candidate was committed (Enter or row click)
//! - `highlighted(String)`: the active row changed during keyboard
//!   navigation
//!
//! # Driving the control
//!
//! The host feeds normalized [`InputEvent`]s to
//! [`handle_event`](Typeahead::handle_event), replaces the configuration
//! through [`update`](Typeahead::update) when new candidates arrive, calls
//! [`poll`](Typeahead::poll) from its tick loop (debounced fetches and
//! outside-click dismissals mature there), and draws from
//! [`render`](Typeahead::render).
//!
//! All transitions run synchronously inside the call that triggered them;
//! the only deferred work is a debounce deadline inside the rate limiter.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use horizon_typeahead_core::{RateLimiter, Signal};

use crate::config::{ConfigurationError, RateLimitSettings, TypeaheadConfig};
use crate::direction::{BidiProbe, DirectionProbe, TextDirection};
use crate::events::{InputEvent, Key};
use crate::hint::compute_hint;
use crate::model::SuggestionItem;
use crate::nav::NavState;
use crate::outside_click::{self, OutsideClickId};

/// Where a value change originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeSource {
    /// The user edited the text.
    Edit,
    /// The user accepted the inline hint (Tab or End).
    HintAccept,
    /// The user committed a candidate (Enter or row click).
    Commit,
}

/// Payload of the `value_changed` signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueChange {
    /// The new text value.
    pub value: String,
    /// Where the change originated.
    pub source: ChangeSource,
}

/// One render pass of derived visual state.
///
/// `rows` holds one option-template output per candidate while the panel is
/// open, in candidate order; the control never interprets the output type.
#[derive(Debug, Clone)]
pub struct RenderPass<R> {
    /// Template output per visible candidate.
    pub rows: Vec<R>,
    /// Whether the suggestion panel is visible.
    pub is_open: bool,
    /// The inline hint (empty, or the value extended to the active row).
    pub hint: String,
    /// Text direction for layout decisions (e.g. spinner placement).
    pub direction: TextDirection,
    /// The host's loading pass-through flag.
    pub show_loading: bool,
}

/// The orchestrating typeahead control.
///
/// Generic over the candidate type `T` and the option template's opaque
/// output `R`.
pub struct Typeahead<T, R> {
    config: TypeaheadConfig<T, R>,
    settings: RateLimitSettings,
    nav: NavState,
    value: String,
    hint: String,
    direction: TextDirection,
    limiter: RateLimiter<String>,
    probe: Box<dyn DirectionProbe>,
    /// Set by the outside-click watcher; applied on the next poll.
    dismiss_requested: Arc<AtomicBool>,
    click_watch: Option<OutsideClickId>,
    /// Mount-time fetch, deferred to the first poll so the host can connect
    /// its slots first.
    initial_fetch: Option<String>,

    /// Signal emitted on every text edit, hint acceptance, and commit.
    pub value_changed: Signal<ValueChange>,
    /// Signal emitted when a fetch request passes the rate limiter.
    pub fetch_requested: Signal<String>,
    /// Signal emitted when a candidate is committed.
    pub activated: Signal<String>,
    /// Signal emitted when the active row changes during navigation.
    pub highlighted: Signal<String>,
}

impl<T: SuggestionItem, R> Typeahead<T, R> {
    /// Create a control from a validated configuration.
    ///
    /// Fails fast with a [`ConfigurationError`] naming the offending
    /// property when the prop contract is violated.
    pub fn new(config: TypeaheadConfig<T, R>) -> Result<Self, ConfigurationError> {
        let settings = config.validate()?;

        let probe: Box<dyn DirectionProbe> = Box::new(BidiProbe);
        let direction = probe.probe(&config.value).unwrap_or_default();

        let initial_fetch = (config.value.chars().count() >= config.min_length)
            .then(|| config.value.clone());

        let limiter = RateLimiter::new(settings.policy, settings.wait);
        let value = config.value.clone();

        Ok(Self {
            config,
            settings,
            nav: NavState::closed(),
            value,
            hint: String::new(),
            direction,
            limiter,
            probe,
            dismiss_requested: Arc::new(AtomicBool::new(false)),
            click_watch: None,
            initial_fetch,
            value_changed: Signal::new(),
            fetch_requested: Signal::new(),
            activated: Signal::new(),
            highlighted: Signal::new(),
        })
    }

    /// Replace the direction probe (builder pattern).
    ///
    /// The default probe derives direction from the text content; hosts with
    /// a platform computed-style capability can substitute it here.
    pub fn with_direction_probe(mut self, probe: impl DirectionProbe + 'static) -> Self {
        self.probe = Box::new(probe);
        self.direction = self.probe.probe(&self.value).unwrap_or_default();
        self
    }

    // =========================================================================
    // State accessors
    // =========================================================================

    /// The current text value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The current inline hint (empty, or `value` extended to the active row).
    pub fn hint(&self) -> &str {
        &self.hint
    }

    /// Whether the suggestion panel is visible.
    pub fn is_open(&self) -> bool {
        self.nav.is_open()
    }

    /// The active row index, if a row is highlighted.
    pub fn active_index(&self) -> Option<usize> {
        self.nav.active()
    }

    /// The last observed text direction.
    pub fn direction(&self) -> TextDirection {
        self.direction
    }

    /// The current configuration.
    pub fn config(&self) -> &TypeaheadConfig<T, R> {
        &self.config
    }

    // =========================================================================
    // Configuration replacement
    // =========================================================================

    /// Replace the configuration (new options, externally changed value).
    ///
    /// Re-validates the prop contract and re-derives the interaction state:
    /// the active row resets, an empty candidate list closes the panel, and
    /// the hint and direction are recomputed. This path is not treated as a
    /// user-initiated change: no fetch request is issued, and `value_changed`
    /// is not emitted.
    pub fn update(&mut self, config: TypeaheadConfig<T, R>) -> Result<(), ConfigurationError> {
        let settings = config.validate()?;

        if settings != self.settings {
            // Policy or wait changed: the limiter restarts, cancelling any
            // armed debounce deadline.
            self.limiter.reconfigure(settings.policy, settings.wait);
            self.settings = settings;
        }

        self.value = config.value.clone();
        self.config = config;

        // A still-pending mount fetch tracks the replaced value.
        if self.initial_fetch.is_some() {
            self.initial_fetch = self.qualifies().then(|| self.value.clone());
        }

        self.nav.sync_options(self.config.options.len());
        self.probe_direction();
        self.recompute_hint();
        Ok(())
    }

    // =========================================================================
    // Event handling
    // =========================================================================

    /// Handle a normalized input event, stamped with the current time.
    pub fn handle_event(&mut self, event: &mut InputEvent) {
        self.handle_event_at(event, Instant::now());
    }

    /// Handle a normalized input event at an explicit time.
    ///
    /// The timestamp only matters to the rate limiter; passing it explicitly
    /// keeps throttle/debounce behavior deterministic under test and under
    /// host-driven clocks.
    pub fn handle_event_at(&mut self, event: &mut InputEvent, now: Instant) {
        match event {
            InputEvent::FocusIn(e) => {
                let was_open = self.nav.is_open();
                self.nav.on_focus(self.config.options.len());
                self.recompute_hint();
                if self.nav.is_open() && !was_open {
                    e.base.accept();
                }
            }
            InputEvent::Edited(e) => {
                self.value = e.value.clone();
                self.value_changed.emit(ValueChange {
                    value: self.value.clone(),
                    source: ChangeSource::Edit,
                });

                self.probe_direction();
                self.nav.on_text_changed(self.config.options.len());
                self.recompute_hint();

                if self.qualifies() {
                    if let Some(query) = self.limiter.request(now, self.value.clone()) {
                        tracing::trace!(
                            target: "horizon_typeahead::typeahead",
                            %query,
                            "fetch request admitted"
                        );
                        self.fetch_requested.emit(query);
                    }
                }
                e.base.accept();
            }
            InputEvent::KeyPress(e) => {
                let key = e.key;
                let handled = self.handle_key(key);
                if handled {
                    e.base.accept();
                }
            }
            InputEvent::OptionClick(e) => {
                if self.nav.is_open() && e.index < self.config.options.len() {
                    self.commit(e.index);
                    // Accepting asks the host to stop native propagation so
                    // the outside-click listener does not immediately re-fire.
                    e.base.accept();
                }
            }
        }

        if self.nav.is_open() {
            self.ensure_click_watch();
        }
    }

    fn handle_key(&mut self, key: Key) -> bool {
        let option_count = self.config.options.len();
        match key {
            Key::ArrowDown => {
                if option_count == 0 {
                    return false;
                }
                self.nav.on_arrow_down(option_count);
                self.after_navigation();
                true
            }
            Key::ArrowUp => {
                if option_count == 0 {
                    return false;
                }
                self.nav.on_arrow_up(option_count);
                self.after_navigation();
                true
            }
            Key::Enter => match self.nav.active() {
                Some(index) if self.nav.is_open() => {
                    self.commit(index);
                    true
                }
                _ => false,
            },
            Key::Escape => {
                if self.nav.is_open() {
                    self.nav.close();
                    self.recompute_hint();
                    true
                } else {
                    false
                }
            }
            Key::Tab | Key::End => {
                if self.nav.is_open() && !self.hint.is_empty() {
                    // Accept the hint; the panel stays as-is.
                    self.value = self.hint.clone();
                    self.value_changed.emit(ValueChange {
                        value: self.value.clone(),
                        source: ChangeSource::HintAccept,
                    });
                    self.probe_direction();
                    self.recompute_hint();
                    true
                } else {
                    false
                }
            }
            Key::Unknown => false,
        }
    }

    /// Commit the candidate at `index`: its display string becomes the
    /// value, the panel closes, and the commit callbacks fire.
    fn commit(&mut self, index: usize) {
        let display_value = self.config.options[index]
            .display(&self.config.display_key)
            .to_string();
        tracing::debug!(
            target: "horizon_typeahead::typeahead",
            index,
            value = %display_value,
            "candidate committed"
        );

        self.value = display_value.clone();
        self.nav.close();
        self.probe_direction();
        self.recompute_hint();

        self.activated.emit(display_value.clone());
        self.value_changed.emit(ValueChange {
            value: display_value,
            source: ChangeSource::Commit,
        });
    }

    fn after_navigation(&mut self) {
        self.recompute_hint();
        if let Some(index) = self.nav.active() {
            let display = self.config.options[index]
                .display(&self.config.display_key)
                .to_string();
            self.highlighted.emit(display);
        }
    }

    // =========================================================================
    // Deferred work
    // =========================================================================

    /// Apply deferred work: outside-click dismissal and matured debounce
    /// fetches. Call from the host's tick loop.
    ///
    /// Returns `true` when visual state changed and the host should re-render.
    pub fn poll(&mut self, now: Instant) -> bool {
        let mut changed = false;

        if self.dismiss_requested.swap(false, Ordering::SeqCst) && self.nav.is_open() {
            tracing::debug!(
                target: "horizon_typeahead::typeahead",
                "panel dismissed by outside click"
            );
            self.nav.close();
            self.recompute_hint();
            changed = true;
        }

        if let Some(query) = self.initial_fetch.take() {
            if let Some(admitted) = self.limiter.request(now, query) {
                self.fetch_requested.emit(admitted);
            }
        }

        if let Some(query) = self.limiter.poll(now) {
            tracing::trace!(
                target: "horizon_typeahead::typeahead",
                %query,
                "debounced fetch request matured"
            );
            self.fetch_requested.emit(query);
        }

        changed
    }

    /// Close the panel without changing the value.
    ///
    /// This is the direct host-facing dismissal path; outside clicks routed
    /// through the registry arrive here via [`poll`](Self::poll).
    pub fn dismiss(&mut self) {
        if self.nav.is_open() {
            self.nav.close();
            self.recompute_hint();
        }
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Produce one render pass of derived visual state.
    ///
    /// Calls the option template once per candidate while the panel is open,
    /// passing whether the candidate is the active row.
    pub fn render(&self) -> RenderPass<R> {
        let rows = match (&self.config.option_template, self.nav.is_open()) {
            (Some(template), true) => {
                let active = self.nav.active();
                self.config
                    .options
                    .iter()
                    .enumerate()
                    .map(|(index, item)| template(item, active == Some(index)))
                    .collect()
            }
            _ => Vec::new(),
        };

        RenderPass {
            rows,
            is_open: self.nav.is_open(),
            hint: self.hint.clone(),
            direction: self.direction,
            show_loading: self.config.show_loading,
        }
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    fn qualifies(&self) -> bool {
        self.value.chars().count() >= self.config.min_length
    }

    fn probe_direction(&mut self) {
        self.direction = self.probe.probe(&self.value).unwrap_or_default();
    }

    fn recompute_hint(&mut self) {
        self.hint = compute_hint(
            &self.value,
            &self.config.options,
            &self.config.display_key,
            self.config.hint_enabled,
            self.nav.active(),
        );
    }

    fn ensure_click_watch(&mut self) {
        if self.click_watch.is_none() {
            let flag = self.dismiss_requested.clone();
            self.click_watch = Some(outside_click::register(move || {
                flag.store(true, Ordering::SeqCst);
            }));
        }
    }
}

impl<T, R> Drop for Typeahead<T, R> {
    fn drop(&mut self) {
        // No fetch may fire after teardown.
        self.limiter.cancel_pending();
        if let Some(id) = self.click_watch.take() {
            outside_click::deregister(id);
        }
    }
}

impl<T, R> std::fmt::Debug for Typeahead<T, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Typeahead")
            .field("value", &self.value)
            .field("hint", &self.hint)
            .field("is_open", &self.nav.is_open())
            .field("active_index", &self.nav.active())
            .field("direction", &self.direction)
            .field("option_count", &self.config.options.len())
            .finish()
    }
}
