//! Navigation state machine for the suggestion panel.
//!
//! Tracks panel visibility and the active (keyboard-highlighted) row, and
//! computes transitions for focus, text-change, arrow-key, dismissal, and
//! commit events. The active cursor is an `Option<usize>`: `None` means no
//! row is highlighted.
//!
//! Invariants maintained here:
//!
//! - the active index, when present, is a valid index into the current
//!   options; it resets whenever the options are replaced or the panel
//!   closes
//! - the panel is never open while the options are empty
//! - wrap-around is modular over the option count at key-press time

/// Panel visibility plus the active row cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavState {
    open: bool,
    active: Option<usize>,
}

impl NavState {
    /// The initial state: closed, nothing active.
    pub fn closed() -> Self {
        Self::default()
    }

    /// Whether the suggestion panel is visible.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The active row index, if a row is highlighted.
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Focus received: open the panel if there is anything to show.
    ///
    /// No row becomes active.
    pub fn on_focus(&mut self, option_count: usize) {
        if option_count > 0 {
            self.open = true;
            self.active = None;
        }
    }

    /// The text changed: open over a non-empty candidate list, close over an
    /// empty one. The active row always resets.
    pub fn on_text_changed(&mut self, option_count: usize) {
        self.open = option_count > 0;
        self.active = None;
    }

    /// ArrowDown pressed.
    ///
    /// On a closed panel this only opens it; the first row is not selected
    /// yet. On an open panel the cursor advances with wrap-around, selecting
    /// row 0 first when nothing was active. Empty options are a no-op.
    pub fn on_arrow_down(&mut self, option_count: usize) {
        if option_count == 0 {
            return;
        }
        if !self.open {
            self.open = true;
            self.active = None;
            return;
        }
        self.active = Some(match self.active {
            Some(index) => (index + 1) % option_count,
            None => 0,
        });
    }

    /// ArrowUp pressed.
    ///
    /// On a closed panel this only opens it, symmetric with ArrowDown. On an
    /// open panel the cursor retreats with wrap-around, selecting the last
    /// row first when nothing was active. Empty options are a no-op.
    pub fn on_arrow_up(&mut self, option_count: usize) {
        if option_count == 0 {
            return;
        }
        if !self.open {
            self.open = true;
            self.active = None;
            return;
        }
        self.active = Some(match self.active {
            Some(index) => (index + option_count - 1) % option_count,
            None => option_count - 1,
        });
    }

    /// Close the panel and clear the active row.
    ///
    /// Used for Escape, commit, and outside-click dismissal.
    pub fn close(&mut self) {
        self.open = false;
        self.active = None;
    }

    /// The options were replaced (configuration update).
    ///
    /// The active row resets unconditionally; an empty list also closes the
    /// panel. Visibility is otherwise preserved, since a replacement is not
    /// a user-initiated change.
    pub fn sync_options(&mut self, option_count: usize) {
        self.active = None;
        if option_count == 0 {
            self.open = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_opens_when_options_exist() {
        let mut nav = NavState::closed();
        nav.on_focus(3);
        assert!(nav.is_open());
        assert_eq!(nav.active(), None);

        let mut empty = NavState::closed();
        empty.on_focus(0);
        assert!(!empty.is_open());
    }

    #[test]
    fn test_text_change_tracks_option_count() {
        let mut nav = NavState::closed();
        nav.on_text_changed(2);
        assert!(nav.is_open());

        nav.on_arrow_down(2);
        assert_eq!(nav.active(), Some(0));

        // A change with no candidates closes and resets.
        nav.on_text_changed(0);
        assert!(!nav.is_open());
        assert_eq!(nav.active(), None);
    }

    #[test]
    fn test_arrow_down_on_closed_panel_only_opens() {
        let mut nav = NavState::closed();
        nav.on_arrow_down(3);
        assert!(nav.is_open());
        assert_eq!(nav.active(), None);
    }

    #[test]
    fn test_arrow_down_cycles_with_wraparound() {
        let mut nav = NavState::closed();
        nav.on_text_changed(3);

        // From none, presses walk 0, 1, 2 and wrap back to 0.
        let mut seen = Vec::new();
        for _ in 0..4 {
            nav.on_arrow_down(3);
            seen.push(nav.active());
        }
        assert_eq!(seen, vec![Some(0), Some(1), Some(2), Some(0)]);
    }

    #[test]
    fn test_arrow_up_from_none_selects_last() {
        let mut nav = NavState::closed();
        nav.on_text_changed(3);

        let mut seen = Vec::new();
        for _ in 0..4 {
            nav.on_arrow_up(3);
            seen.push(nav.active());
        }
        assert_eq!(seen, vec![Some(2), Some(1), Some(0), Some(2)]);
    }

    #[test]
    fn test_arrows_ignore_empty_options() {
        let mut nav = NavState::closed();
        nav.on_arrow_down(0);
        nav.on_arrow_up(0);
        assert!(!nav.is_open());
        assert_eq!(nav.active(), None);
    }

    #[test]
    fn test_single_option_wraps_to_itself() {
        let mut nav = NavState::closed();
        nav.on_text_changed(1);
        nav.on_arrow_down(1);
        assert_eq!(nav.active(), Some(0));
        nav.on_arrow_down(1);
        assert_eq!(nav.active(), Some(0));
        nav.on_arrow_up(1);
        assert_eq!(nav.active(), Some(0));
    }

    #[test]
    fn test_close_resets_active() {
        let mut nav = NavState::closed();
        nav.on_text_changed(3);
        nav.on_arrow_down(3);
        nav.close();
        assert!(!nav.is_open());
        assert_eq!(nav.active(), None);
    }

    #[test]
    fn test_sync_options_resets_active_keeps_visibility() {
        let mut nav = NavState::closed();
        nav.on_text_changed(3);
        nav.on_arrow_down(3);

        nav.sync_options(5);
        assert!(nav.is_open());
        assert_eq!(nav.active(), None);

        nav.sync_options(0);
        assert!(!nav.is_open());
    }
}
