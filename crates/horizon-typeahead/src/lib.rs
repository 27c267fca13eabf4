//! Headless typeahead/autocomplete control.
//!
//! This crate provides [`Typeahead`], the interaction core of a
//! suggestion-list input: as the user types, the host supplies a candidate
//! list and the control owns everything else: open/close state, keyboard
//! navigation with wrap-around, an inline autocomplete hint for the best
//! prefix match, commit-on-selection semantics, outside-click dismissal, and
//! rate-limited fetch notification.
//!
//! Rendering, styling, and platform event wiring stay on the host side:
//! input arrives as already-normalized [`InputEvent`]s, candidate rows are
//! produced by a caller-supplied option template whose output the control
//! never interprets, and outward notification flows through
//! [`Signal`](horizon_typeahead_core::Signal)s.
//!
//! # Architecture
//!
//! - [`TypeaheadConfig`]: host-supplied props, re-validated on every
//!   replacement; violations surface as [`ConfigurationError`]s
//! - a navigation state machine over panel-visibility plus an
//!   `Option<usize>` active-row cursor
//! - inline hint computation against the active candidate
//! - [`direction`]: Unicode first-strong direction detection with a
//!   [`DirectionProbe`] seam for platform style systems
//! - [`outside_click`]: the process-wide, ref-counted outside-click
//!   registry
//! - `horizon-typeahead-core`: signals, the timer queue, and the
//!   none/throttle/debounce rate limiter
//!
//! # Example
//!
//! ```
//! use horizon_typeahead::{
//!     InputEvent, Key, Record, SuggestionItem, Typeahead, TypeaheadConfig,
//! };
//!
//! let options = vec![
//!     Record::new().with_field("id", "1").with_field("name", "value 1"),
//!     Record::new().with_field("id", "2").with_field("name", "value 2"),
//! ];
//!
//! let config = TypeaheadConfig::new("name")
//!     .with_options(options)
//!     .with_option_template(|item: &Record, selected: bool| {
//!         (item.field("name").unwrap_or("").to_string(), selected)
//!     });
//!
//! let mut control = Typeahead::new(config)?;
//! control.fetch_requested.connect(|query| println!("fetch: {query}"));
//!
//! // Typing opens the panel; ArrowDown highlights the first row.
//! let mut edit = InputEvent::edited("valu");
//! control.handle_event(&mut edit);
//! let mut down = InputEvent::key_press(Key::ArrowDown);
//! control.handle_event(&mut down);
//!
//! assert_eq!(control.hint(), "value 1");
//! let pass = control.render();
//! assert!(pass.is_open);
//! assert_eq!(pass.rows[0], ("value 1".to_string(), true));
//! # Ok::<(), horizon_typeahead::ConfigurationError>(())
//! ```

mod config;
pub mod direction;
mod events;
mod hint;
mod model;
mod nav;
pub mod outside_click;
mod typeahead;

pub use config::{ConfigurationError, OptionTemplate, RateLimitSettings, TypeaheadConfig};
pub use direction::{BidiProbe, DirectionProbe, TextDirection, detect_base_direction};
pub use events::{
    EditEvent, EventBase, FocusInEvent, InputEvent, Key, KeyPressEvent, OptionClickEvent,
};
pub use model::{Record, SuggestionItem};
pub use outside_click::{ClickHook, OutsideClickId};
pub use typeahead::{ChangeSource, RenderPass, Typeahead, ValueChange};

// Re-export the core types hosts interact with directly.
pub use horizon_typeahead_core::{ConnectionId, RateLimitPolicy, Signal};
