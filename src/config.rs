use log::warn;

use crate::frame::Binding;

/// Default cell heap capacity.
pub const DEFAULT_HEAP_CAPACITY: usize = 1_000_000;

/// Startup configuration for a `Runtime`.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of cells the heap may hand out.
    pub heap_capacity: usize,
    /// Bindings installed in the global frame, in order.
    pub initial_frame: Vec<Binding>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            heap_capacity: DEFAULT_HEAP_CAPACITY,
            initial_frame: Vec::new(),
        }
    }
}

impl Config {
    /// Defaults, with the heap capacity overridden by `LEXENV_HEAP_CAPACITY`
    /// when it is set to a positive integer.
    pub fn from_env() -> Self {
        let mut config = Config::default();
        if let Ok(raw) = std::env::var("LEXENV_HEAP_CAPACITY") {
            match parse_capacity(&raw) {
                Some(capacity) => config.heap_capacity = capacity,
                None => warn!(
                    "ignoring LEXENV_HEAP_CAPACITY={:?}, using {}",
                    raw, DEFAULT_HEAP_CAPACITY
                ),
            }
        }
        config
    }

    pub fn with_heap_capacity(mut self, capacity: usize) -> Self {
        self.heap_capacity = capacity;
        self
    }

    /// Append one binding to the initial global frame.
    pub fn with_binding(mut self, binding: Binding) -> Self {
        self.initial_frame.push(binding);
        self
    }
}

fn parse_capacity(raw: &str) -> Option<usize> {
    match raw.trim().parse::<usize>() {
        Ok(0) | Err(_) => None,
        Ok(n) => Some(n),
    }
}
