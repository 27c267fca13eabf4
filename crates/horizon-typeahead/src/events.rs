//! Normalized input events for the typeahead control.
//!
//! The control does not wire itself to any windowing system. The host
//! listens for platform focus/keyboard/mouse activity on the input element
//! and its suggestion rows, translates it into these already-normalized
//! events, and feeds them to [`Typeahead::handle_event`](crate::Typeahead::handle_event).
//!
//! Each event carries an accepted flag. When the control consumes an event
//! it calls `accept()`; the host should then suppress the platform default
//! for it (keep focus on Tab, stop native click propagation for a row click
//! so the global outside-click listener does not immediately re-fire).

/// Common data for all input events.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventBase {
    /// Whether the event has been accepted (handled).
    accepted: bool,
}

impl EventBase {
    /// Create a new event base.
    pub fn new() -> Self {
        Self { accepted: false }
    }

    /// Check if the event has been accepted.
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// Accept the event, asking the host to suppress its platform default.
    pub fn accept(&mut self) {
        self.accepted = true;
    }

    /// Ignore the event, leaving the platform default in place.
    pub fn ignore(&mut self) {
        self.accepted = false;
    }
}

/// Keyboard keys the control reacts to.
///
/// Hosts map their platform key codes onto this enum; anything the control
/// does not consume maps to [`Key::Unknown`] and is left unaccepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Move the active row down (opens the panel when closed).
    ArrowDown,
    /// Move the active row up (opens the panel when closed).
    ArrowUp,
    /// Commit the active row.
    Enter,
    /// Close the panel, leaving the text unchanged.
    Escape,
    /// Accept the inline hint.
    Tab,
    /// Accept the inline hint.
    End,
    /// Any other key; never consumed by the control.
    Unknown,
}

/// Focus received by the input element.
#[derive(Debug, Clone, Copy, Default)]
pub struct FocusInEvent {
    /// Base event data.
    pub base: EventBase,
}

impl FocusInEvent {
    /// Create a new focus-in event.
    pub fn new() -> Self {
        Self {
            base: EventBase::new(),
        }
    }
}

/// The input element's text was edited by the user.
#[derive(Debug, Clone)]
pub struct EditEvent {
    /// Base event data.
    pub base: EventBase,
    /// The full new text value.
    pub value: String,
}

impl EditEvent {
    /// Create a new edit event carrying the full new value.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            base: EventBase::new(),
            value: value.into(),
        }
    }
}

/// A key was pressed while the input element had focus.
#[derive(Debug, Clone, Copy)]
pub struct KeyPressEvent {
    /// Base event data.
    pub base: EventBase,
    /// The key that was pressed.
    pub key: Key,
}

impl KeyPressEvent {
    /// Create a new key press event.
    pub fn new(key: Key) -> Self {
        Self {
            base: EventBase::new(),
            key,
        }
    }
}

/// A suggestion row was clicked.
#[derive(Debug, Clone, Copy)]
pub struct OptionClickEvent {
    /// Base event data.
    pub base: EventBase,
    /// Index of the clicked row in the current options.
    pub index: usize,
}

impl OptionClickEvent {
    /// Create a new option click event.
    pub fn new(index: usize) -> Self {
        Self {
            base: EventBase::new(),
            index,
        }
    }
}

/// Enumeration of all input events the control consumes.
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// Focus received by the input element.
    FocusIn(FocusInEvent),
    /// The text was edited.
    Edited(EditEvent),
    /// A key was pressed.
    KeyPress(KeyPressEvent),
    /// A suggestion row was clicked.
    OptionClick(OptionClickEvent),
}

impl InputEvent {
    /// Create a focus-in event.
    pub fn focus_in() -> Self {
        Self::FocusIn(FocusInEvent::new())
    }

    /// Create an edit event carrying the full new value.
    pub fn edited(value: impl Into<String>) -> Self {
        Self::Edited(EditEvent::new(value))
    }

    /// Create a key press event.
    pub fn key_press(key: Key) -> Self {
        Self::KeyPress(KeyPressEvent::new(key))
    }

    /// Create an option click event for the given row index.
    pub fn option_click(index: usize) -> Self {
        Self::OptionClick(OptionClickEvent::new(index))
    }

    /// Check if the event has been accepted.
    pub fn is_accepted(&self) -> bool {
        match self {
            Self::FocusIn(e) => e.base.is_accepted(),
            Self::Edited(e) => e.base.is_accepted(),
            Self::KeyPress(e) => e.base.is_accepted(),
            Self::OptionClick(e) => e.base.is_accepted(),
        }
    }

    /// Accept the event.
    pub fn accept(&mut self) {
        match self {
            Self::FocusIn(e) => e.base.accept(),
            Self::Edited(e) => e.base.accept(),
            Self::KeyPress(e) => e.base.accept(),
            Self::OptionClick(e) => e.base.accept(),
        }
    }

    /// Ignore the event.
    pub fn ignore(&mut self) {
        match self {
            Self::FocusIn(e) => e.base.ignore(),
            Self::Edited(e) => e.base.ignore(),
            Self::KeyPress(e) => e.base.ignore(),
            Self::OptionClick(e) => e.base.ignore(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_start_unaccepted() {
        assert!(!InputEvent::focus_in().is_accepted());
        assert!(!InputEvent::edited("x").is_accepted());
        assert!(!InputEvent::key_press(Key::Enter).is_accepted());
        assert!(!InputEvent::option_click(0).is_accepted());
    }

    #[test]
    fn test_accept_and_ignore() {
        let mut event = InputEvent::key_press(Key::Tab);
        event.accept();
        assert!(event.is_accepted());
        event.ignore();
        assert!(!event.is_accepted());
    }
}
