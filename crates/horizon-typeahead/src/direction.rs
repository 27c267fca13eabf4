//! Text direction detection.
//!
//! Layout decisions made outside the core (placing a loading spinner on the
//! opposite side of text flow, aligning the hint overlay) need to know
//! whether the typed text runs left-to-right or right-to-left. The control
//! re-detects direction whenever the value changes or the configuration is
//! replaced and reports it on every render pass.
//!
//! Detection follows the Unicode Bidirectional Algorithm's first-strong rule
//! (P2/P3 of UAX #9): the first character with a strong directional class
//! decides. Hosts backed by a platform style system can substitute their own
//! source through the [`DirectionProbe`] seam; a probe that cannot answer
//! defaults to left-to-right.

use unicode_bidi::{BidiClass, bidi_class};

/// Text direction for layout decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextDirection {
    /// Left-to-right direction (default for Latin, Cyrillic, Greek, etc.).
    #[default]
    LeftToRight,
    /// Right-to-left direction (for Arabic, Hebrew, etc.).
    RightToLeft,
}

impl TextDirection {
    /// Check if this direction is left-to-right.
    pub fn is_ltr(self) -> bool {
        matches!(self, Self::LeftToRight)
    }

    /// Check if this direction is right-to-left.
    pub fn is_rtl(self) -> bool {
        matches!(self, Self::RightToLeft)
    }
}

/// Detect the base direction of text using the first-strong rule.
///
/// # Returns
///
/// - `TextDirection::RightToLeft` if the first strong character is R or AL
/// - `TextDirection::LeftToRight` otherwise (including empty strings)
///
/// # Example
///
/// ```
/// use horizon_typeahead::{TextDirection, detect_base_direction};
///
/// assert_eq!(detect_base_direction("Hello"), TextDirection::LeftToRight);
/// assert_eq!(detect_base_direction("مرحبا"), TextDirection::RightToLeft);
/// assert_eq!(detect_base_direction("123!@#"), TextDirection::LeftToRight);
/// ```
pub fn detect_base_direction(text: &str) -> TextDirection {
    for c in text.chars() {
        match bidi_class(c) {
            // Strong LTR
            BidiClass::L => return TextDirection::LeftToRight,
            // Strong RTL
            BidiClass::R | BidiClass::AL => return TextDirection::RightToLeft,
            // Continue searching for other classes
            _ => continue,
        }
    }

    // Default to LTR if no strong directional character found
    TextDirection::LeftToRight
}

/// Source of text direction for the control.
///
/// The default [`BidiProbe`] derives direction from the text itself. Hosts
/// whose platform exposes a computed style direction can implement this
/// trait over that capability instead.
pub trait DirectionProbe: Send + Sync {
    /// Determine the direction for the given text.
    ///
    /// Return `None` when the underlying capability is unavailable or
    /// fails; the control then falls back to left-to-right.
    fn probe(&self, text: &str) -> Option<TextDirection>;
}

/// The default probe: Unicode first-strong detection over the text content.
#[derive(Debug, Clone, Copy, Default)]
pub struct BidiProbe;

impl DirectionProbe for BidiProbe {
    fn probe(&self, text: &str) -> Option<TextDirection> {
        Some(detect_base_direction(text))
    }
}
