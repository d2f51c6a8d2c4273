//! Environment chains and variable resolution.
//!
//! An environment is a list of frames, innermost first, ending in `Nil`.
//! Extension conses a new frame on the front; the old chain is shared, never
//! copied.

use log::{debug, log_enabled, trace, Level};

use crate::config::Config;
use crate::error::{EnvError, EnvResult};
use crate::frame::{self, entry_parts, Binding};
use crate::heap::Heap;
use crate::printer;
use crate::symbol::SymbolTable;
use crate::value::{SymbolId, Value};

/// The empty environment. Structurally identical to the empty list.
pub const EMPTY_ENVIRONMENT: Value = Value::Nil;

/// True for the null cell reference, wherever it came from.
pub fn is_empty_environment(env: Value) -> bool {
    matches!(env, Value::Nil)
}

/// Prepend `frame` to `base`.
pub fn extend_environment(heap: &mut Heap, frame: Value, base: Value) -> EnvResult<Value> {
    if !frame.is_list_like() {
        return Err(EnvError::Malformed(format!("frame {:?} is not a list", frame)));
    }
    if !base.is_list_like() {
        return Err(EnvError::Malformed(format!(
            "base environment {:?} is not a list",
            base
        )));
    }
    heap.cons(frame, base)
}

/// The innermost frame of `env`.
pub fn first_frame(heap: &Heap, env: Value) -> EnvResult<Value> {
    match env {
        Value::Nil => Err(EnvError::Malformed("first frame of the empty environment".into())),
        env => heap
            .car_val(env)
            .map_err(|_| EnvError::Malformed(format!("{:?} is not an environment", env))),
    }
}

/// `env` with its innermost frame removed.
pub fn enclosing_environment(heap: &Heap, env: Value) -> EnvResult<Value> {
    match env {
        Value::Nil => Err(EnvError::Malformed(
            "enclosing environment of the empty environment".into(),
        )),
        env => heap
            .cdr_val(env)
            .map_err(|_| EnvError::Malformed(format!("{:?} is not an environment", env))),
    }
}

/// Number of frames in the chain.
pub fn environment_depth(heap: &Heap, env: Value) -> EnvResult<usize> {
    let mut depth = 0;
    let mut current = env;
    while !is_empty_environment(current) {
        current = enclosing_environment(heap, current)?;
        depth += 1;
    }
    Ok(depth)
}

/// Search `env` for `var`, innermost frame first and front to back within
/// a frame. Returns the bound value of the first match.
pub fn find_value(heap: &Heap, var: SymbolId, env: Value) -> EnvResult<Option<Value>> {
    let mut env = env;
    let mut depth = 0;

    while !is_empty_environment(env) {
        let mut scanner = first_frame(heap, env)?;
        while let Value::Pair(id) = scanner {
            let cell = heap.get(id)?;
            let (name, value) = entry_parts(heap, cell.first)?;
            if name == var {
                trace!("resolved {:?} at depth {}", var, depth);
                return Ok(Some(value));
            }
            scanner = cell.rest;
        }
        if !scanner.is_nil() {
            return Err(EnvError::Malformed(format!(
                "frame at depth {} is an improper list",
                depth
            )));
        }

        env = enclosing_environment(heap, env)?;
        depth += 1;
    }

    trace!("{:?} not found in {} frame(s)", var, depth);
    Ok(None)
}

/// Owns the cell heap and symbol table that environments are built from.
pub struct Runtime {
    pub heap: Heap,
    pub symbols: SymbolTable,
    global: Option<Value>,
}

impl Runtime {
    pub fn new(heap_capacity: usize) -> Self {
        Runtime {
            heap: Heap::new(heap_capacity),
            symbols: SymbolTable::new(),
            global: None,
        }
    }

    /// Create a runtime and set up its global environment from `config`.
    pub fn from_config(config: &Config) -> EnvResult<Self> {
        let mut rt = Runtime::new(config.heap_capacity);
        rt.setup_environment(&config.initial_frame)?;
        Ok(rt)
    }

    /// Build the global environment: one frame holding `initial_frame`,
    /// enclosed by the empty environment. Only allowed once per runtime.
    pub fn setup_environment(&mut self, initial_frame: &[Binding]) -> EnvResult<Value> {
        if self.global.is_some() {
            return Err(EnvError::AlreadyInitialized);
        }
        let frame = frame::build_frame(&mut self.heap, &mut self.symbols, initial_frame)?;
        let env = extend_environment(&mut self.heap, frame, EMPTY_ENVIRONMENT)?;
        debug!(
            "global environment ready: {} binding(s), {} cell(s) in use",
            initial_frame.len(),
            self.heap.total_cells()
        );
        if log_enabled!(Level::Trace) {
            trace!(
                "global environment: {}",
                printer::print_environment(env, &self.heap, &self.symbols)
            );
        }
        self.global = Some(env);
        Ok(env)
    }

    /// The global environment, once set up.
    pub fn global(&self) -> Option<Value> {
        self.global
    }

    /// Intern `name` as a symbol value.
    pub fn symbol(&mut self, name: &str) -> EnvResult<Value> {
        Ok(Value::Symbol(self.symbols.intern(name)?))
    }

    /// Build a frame for a procedure application.
    pub fn make_frame(&mut self, params: Value, args: Value) -> EnvResult<Value> {
        frame::make_frame(&mut self.heap, params, args)
    }

    /// Build a frame for an application of the named procedure.
    pub fn make_frame_for(&mut self, procedure: &str, params: Value, args: Value) -> EnvResult<Value> {
        frame::make_frame_for(&mut self.heap, procedure, params, args)
    }

    pub fn extend_environment(&mut self, frame: Value, base: Value) -> EnvResult<Value> {
        extend_environment(&mut self.heap, frame, base)
    }

    /// Pair `params` with `args` and prepend the new frame to `base`.
    pub fn extend_with(&mut self, params: Value, args: Value, base: Value) -> EnvResult<Value> {
        let frame = self.make_frame(params, args)?;
        self.extend_environment(frame, base)
    }

    pub fn first_frame(&self, env: Value) -> EnvResult<Value> {
        first_frame(&self.heap, env)
    }

    pub fn enclosing_environment(&self, env: Value) -> EnvResult<Value> {
        enclosing_environment(&self.heap, env)
    }

    /// Non-fatal lookup: `Ok(None)` when no frame binds `name`.
    pub fn find_binding(&self, name: &str, env: Value) -> EnvResult<Option<Binding>> {
        // A name that was never interned cannot appear in any frame.
        let Some(var) = self.symbols.lookup(name) else {
            trace!("{} was never interned", name);
            return Ok(None);
        };
        Ok(find_value(&self.heap, var, env)?.map(|value| Binding::new(name, value)))
    }

    /// Resolve `name`, treating absence as an unbound-variable error.
    pub fn lookup_variable_value(&self, name: &str, env: Value) -> EnvResult<Value> {
        trace!("lookup {}", name);
        match self.find_binding(name, env)? {
            Some(binding) => Ok(binding.value),
            None => {
                debug!(
                    "unbound variable {} after {:?} frame(s)",
                    name,
                    environment_depth(&self.heap, env).ok()
                );
                Err(EnvError::Unbound(name.to_string()))
            }
        }
    }

    /// The bindings of `frame`, in order.
    pub fn frame_bindings(&self, frame: Value) -> EnvResult<Vec<Binding>> {
        frame::frame_bindings(&self.heap, &self.symbols, frame)
    }
}
