use std::env;

/// Slots reserved up front for the value stack; it grows past this on demand.
pub const STACK_INITIAL: usize = 256;

/// VM configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VmOptions {
    /// Emit a TRACE event (stack + disassembled instruction) before each instruction.
    pub trace: bool,
    /// Maximum number of values on the stack. `None` lets the stack grow freely.
    pub stack_max: Option<usize>,
}

impl VmOptions {
    /// Defaults overridden by `LOX_TRACE` (0/1) and `LOX_STACK_MAX`.
    ///
    /// Unparsable values are ignored.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            trace: env_bool("LOX_TRACE", defaults.trace),
            stack_max: env_usize("LOX_STACK_MAX").or(defaults.stack_max),
        }
    }

    /// Sets the trace switch.
    #[must_use]
    pub const fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Bounds the value stack.
    #[must_use]
    pub const fn with_stack_max(mut self, stack_max: usize) -> Self {
        self.stack_max = Some(stack_max);
        self
    }
}

fn env_usize(k: &str) -> Option<usize> {
    env::var(k).ok().and_then(|s| s.parse().ok())
}

fn env_bool(k: &str, d: bool) -> bool {
    env::var(k)
        .ok()
        .and_then(|s| s.parse::<u8>().ok())
        .map_or(d, |v| v != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let opts = VmOptions::default().with_trace(true).with_stack_max(4);
        assert!(opts.trace);
        assert_eq!(opts.stack_max, Some(4));
        assert_eq!(VmOptions::default().stack_max, None);
    }

    #[test]
    fn env_helpers_fall_back_on_garbage() {
        assert_eq!(env_usize("LOX_TEST_UNSET_USIZE"), None);
        assert!(env_bool("LOX_TEST_UNSET_BOOL", true));
    }
}
