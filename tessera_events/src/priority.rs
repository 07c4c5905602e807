// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Ordinal controlling listener invocation order within one event kind.
///
/// Lower priorities run first. [`Priority::Monitor`] runs last and is meant
/// for listeners that need the final word on an event (for example, a veto
/// that must not be overridden) or that only observe the outcome.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    /// Runs before every other priority.
    Low,
    /// The default priority.
    #[default]
    Normal,
    /// Runs after `Normal` listeners.
    High,
    /// Runs after every other priority.
    Monitor,
}

#[cfg(test)]
mod tests {
    use super::Priority;

    #[test]
    fn ordinal_order() {
        assert!(Priority::Low < Priority::Normal, "low before normal");
        assert!(Priority::Normal < Priority::High, "normal before high");
        assert!(Priority::High < Priority::Monitor, "high before monitor");
        assert_eq!(Priority::default(), Priority::Normal);
    }
}
