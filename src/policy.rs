use serde::{Deserialize, Serialize};

/// Which log events are eligible for notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchMode {
    /// Every event is eligible.
    All,
    /// Only events carrying an exception (default, compatible with the
    /// usual error-tracker setup).
    #[default]
    ExceptionsOnly,
    /// Nothing is sent, exceptions included.
    Off,
}

/// Decide whether a log event should produce a notice.
///
/// Rules, evaluated in order: a disabled forwarder or `Off` mode never
/// notifies; exceptions are always notified under both remaining modes;
/// plain messages only under `All`.
pub fn should_notify(enabled: bool, mode: DispatchMode, has_exception: bool) -> bool {
    if !enabled || mode == DispatchMode::Off {
        return false;
    }
    if has_exception {
        // Exceptions are always notified
        return true;
    }
    mode == DispatchMode::All
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_never_notifies() {
        for mode in [DispatchMode::All, DispatchMode::ExceptionsOnly, DispatchMode::Off] {
            for has_exception in [true, false] {
                assert!(!should_notify(false, mode, has_exception));
            }
        }
    }

    #[test]
    fn test_off_never_notifies() {
        assert!(!should_notify(true, DispatchMode::Off, true));
        assert!(!should_notify(true, DispatchMode::Off, false));
    }

    #[test]
    fn test_exceptions_notify_under_both_active_modes() {
        assert!(should_notify(true, DispatchMode::All, true));
        assert!(should_notify(true, DispatchMode::ExceptionsOnly, true));
    }

    #[test]
    fn test_plain_message_only_under_all() {
        assert!(should_notify(true, DispatchMode::All, false));
        assert!(!should_notify(true, DispatchMode::ExceptionsOnly, false));
    }

    #[test]
    fn test_default_mode_is_exceptions_only() {
        assert_eq!(DispatchMode::default(), DispatchMode::ExceptionsOnly);
    }
}
