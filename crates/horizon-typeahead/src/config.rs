//! Configuration for the typeahead control.
//!
//! The host supplies a [`TypeaheadConfig`] at construction and replaces it
//! wholesale on every update cycle (new candidate list, externally changed
//! value). Two of the properties deliberately stay loosely typed
//! (`rate_limit_by` as a string, `rate_limit_wait` as a float) because the
//! control's contract is *dynamic* prop validation: an unknown policy name
//! or a non-numeric wait must surface as a [`ConfigurationError`] naming
//! the offender, never be silently coerced or defaulted.
//!
//! Validation runs once per configuration update via
//! [`TypeaheadConfig::validate`], which returns the typed rate-limit
//! settings on success. A configuration error is a programming-contract
//! violation: the control refuses to operate on it (fail-fast), it is not a
//! runtime condition an end user can trigger.

use std::sync::Arc;
use std::time::Duration;

use horizon_typeahead_core::RateLimitPolicy;

/// Rendering delegate for a single candidate row.
///
/// Called once per visible candidate per render pass with the item and
/// whether it is the active (highlighted) row. The output type `R` is
/// opaque to the control.
pub type OptionTemplate<T, R> = Arc<dyn Fn(&T, bool) -> R + Send + Sync>;

/// Errors raised at configuration-validation time.
///
/// These surface synchronously from [`Typeahead::new`](crate::Typeahead::new)
/// and [`Typeahead::update`](crate::Typeahead::update) and are not
/// recoverable internally.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    /// A required property was not supplied.
    #[error("required property `{0}` is missing")]
    MissingProperty(&'static str),

    /// `rate_limit_by` is not one of the known policy names.
    #[error("invalid value `{value}` for property `rate_limit_by`: expected one of `none`, `throttle`, `debounce`")]
    InvalidRateLimitBy {
        /// The offending value.
        value: String,
    },

    /// `rate_limit_wait` is not a finite, non-negative number.
    #[error("property `rate_limit_wait` must be a finite, non-negative number of milliseconds, got `{value}`")]
    InvalidRateLimitWait {
        /// The offending value.
        value: f64,
    },
}

/// The typed rate-limit settings produced by a successful validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitSettings {
    /// The admission policy.
    pub policy: RateLimitPolicy,
    /// The window/defer duration.
    pub wait: Duration,
}

/// Host-supplied configuration, immutable per update cycle.
pub struct TypeaheadConfig<T, R> {
    /// Current text value.
    pub value: String,
    /// Candidate list for the current text (host-filtered or host-fetched).
    pub options: Vec<T>,
    /// Field name used to read a display string from a candidate. Required.
    pub display_key: String,
    /// Minimum text length (in `char`s) before fetch requests are permitted.
    pub min_length: usize,
    /// Whether the inline hint is computed.
    pub hint_enabled: bool,
    /// Rate-limit policy name: `none`, `throttle`, or `debounce`.
    pub rate_limit_by: String,
    /// Rate-limit wait in milliseconds. Must be finite and non-negative.
    pub rate_limit_wait: f64,
    /// Whether the host is currently fetching; pure render pass-through.
    pub show_loading: bool,
    /// Rendering delegate for candidate rows. Required.
    pub option_template: Option<OptionTemplate<T, R>>,
}

impl<T, R> TypeaheadConfig<T, R> {
    /// Create a configuration with defaults for the given display key.
    ///
    /// Defaults: empty value, no options, `min_length` 1, hint enabled, no
    /// rate limiting, loading indicator off. The option template must still
    /// be supplied before the configuration validates.
    pub fn new(display_key: impl Into<String>) -> Self {
        Self {
            value: String::new(),
            options: Vec::new(),
            display_key: display_key.into(),
            min_length: 1,
            hint_enabled: true,
            rate_limit_by: RateLimitPolicy::None.as_str().to_string(),
            rate_limit_wait: 0.0,
            show_loading: false,
            option_template: None,
        }
    }

    /// Set the current text value using builder pattern.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Set the candidate list using builder pattern.
    pub fn with_options(mut self, options: Vec<T>) -> Self {
        self.options = options;
        self
    }

    /// Set the minimum fetch length using builder pattern.
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    /// Enable or disable the inline hint using builder pattern.
    pub fn with_hint_enabled(mut self, enabled: bool) -> Self {
        self.hint_enabled = enabled;
        self
    }

    /// Set the rate-limit policy name using builder pattern.
    pub fn with_rate_limit_by(mut self, policy: impl Into<String>) -> Self {
        self.rate_limit_by = policy.into();
        self
    }

    /// Set the rate-limit wait (milliseconds) using builder pattern.
    pub fn with_rate_limit_wait(mut self, wait_ms: f64) -> Self {
        self.rate_limit_wait = wait_ms;
        self
    }

    /// Set the loading pass-through flag using builder pattern.
    pub fn with_show_loading(mut self, show_loading: bool) -> Self {
        self.show_loading = show_loading;
        self
    }

    /// Set the option template using builder pattern.
    pub fn with_option_template<F>(mut self, template: F) -> Self
    where
        F: Fn(&T, bool) -> R + Send + Sync + 'static,
    {
        self.option_template = Some(Arc::new(template));
        self
    }

    /// Validate the configuration's prop contract.
    ///
    /// Checks, in order: the option template is present, the display key is
    /// present, the rate-limit policy name is known, and the wait is a
    /// finite non-negative number. Returns the typed rate-limit settings on
    /// success.
    pub fn validate(&self) -> Result<RateLimitSettings, ConfigurationError> {
        if self.option_template.is_none() {
            return Err(ConfigurationError::MissingProperty("option_template"));
        }
        if self.display_key.is_empty() {
            return Err(ConfigurationError::MissingProperty("display_key"));
        }

        let policy: RateLimitPolicy = self.rate_limit_by.parse().map_err(|_| {
            ConfigurationError::InvalidRateLimitBy {
                value: self.rate_limit_by.clone(),
            }
        })?;

        if !self.rate_limit_wait.is_finite() || self.rate_limit_wait < 0.0 {
            return Err(ConfigurationError::InvalidRateLimitWait {
                value: self.rate_limit_wait,
            });
        }

        Ok(RateLimitSettings {
            policy,
            wait: Duration::from_secs_f64(self.rate_limit_wait / 1000.0),
        })
    }
}

impl<T: Clone, R> Clone for TypeaheadConfig<T, R> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            options: self.options.clone(),
            display_key: self.display_key.clone(),
            min_length: self.min_length,
            hint_enabled: self.hint_enabled,
            rate_limit_by: self.rate_limit_by.clone(),
            rate_limit_wait: self.rate_limit_wait,
            show_loading: self.show_loading,
            option_template: self.option_template.clone(),
        }
    }
}

impl<T, R> std::fmt::Debug for TypeaheadConfig<T, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeaheadConfig")
            .field("value", &self.value)
            .field("option_count", &self.options.len())
            .field("display_key", &self.display_key)
            .field("min_length", &self.min_length)
            .field("hint_enabled", &self.hint_enabled)
            .field("rate_limit_by", &self.rate_limit_by)
            .field("rate_limit_wait", &self.rate_limit_wait)
            .field("show_loading", &self.show_loading)
            .field("has_option_template", &self.option_template.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Record, SuggestionItem};

    fn valid_config() -> TypeaheadConfig<Record, String> {
        TypeaheadConfig::new("name")
            .with_option_template(|item: &Record, _selected| item.display("name").to_string())
    }

    #[test]
    fn test_defaults() {
        let config = valid_config();
        assert_eq!(config.min_length, 1);
        assert!(config.hint_enabled);
        assert_eq!(config.rate_limit_by, "none");
        assert_eq!(config.rate_limit_wait, 0.0);
        assert!(!config.show_loading);
    }

    #[test]
    fn test_validate_accepts_each_policy() {
        for (name, policy) in [
            ("none", RateLimitPolicy::None),
            ("throttle", RateLimitPolicy::Throttle),
            ("debounce", RateLimitPolicy::Debounce),
        ] {
            let settings = valid_config()
                .with_rate_limit_by(name)
                .with_rate_limit_wait(250.0)
                .validate()
                .unwrap();
            assert_eq!(settings.policy, policy);
            assert_eq!(settings.wait, Duration::from_millis(250));
        }
    }

    #[test]
    fn test_missing_option_template() {
        let config = TypeaheadConfig::<Record, String>::new("name");
        assert_eq!(
            config.validate(),
            Err(ConfigurationError::MissingProperty("option_template"))
        );
    }

    #[test]
    fn test_missing_display_key() {
        let config = TypeaheadConfig::<Record, String>::new("")
            .with_option_template(|item: &Record, _| item.display("name").to_string());
        assert_eq!(
            config.validate(),
            Err(ConfigurationError::MissingProperty("display_key"))
        );
    }

    #[test]
    fn test_invalid_rate_limit_by_names_offender() {
        let err = valid_config()
            .with_rate_limit_by("trottle")
            .validate()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::InvalidRateLimitBy {
                value: "trottle".to_string()
            }
        );
        assert!(err.to_string().contains("trottle"));
    }

    #[test]
    fn test_non_numeric_rate_limit_wait_rejected() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -1.0] {
            let err = valid_config()
                .with_rate_limit_wait(bad)
                .validate()
                .unwrap_err();
            assert!(matches!(
                err,
                ConfigurationError::InvalidRateLimitWait { .. }
            ));
        }
    }

    #[test]
    fn test_validation_order_reports_template_first() {
        let config = TypeaheadConfig::<Record, String>::new("").with_rate_limit_by("bogus");
        assert_eq!(
            config.validate(),
            Err(ConfigurationError::MissingProperty("option_template"))
        );
    }
}
