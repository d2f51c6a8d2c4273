//! Frames: one lexical scope level.
//!
//! A frame is a list of `(name . value)` entries:
//!
//! ```text
//!   frame ---> [ . | . ]---> [ . | . ]---> nil
//!                |             |
//!             [x | 1]       [y | 2]
//! ```
//!
//! Each binding costs two cells, one for the entry and one for the backbone.
//! Frames are never mutated once built.

use log::debug;

use crate::error::{EnvError, EnvResult};
use crate::heap::Heap;
use crate::symbol::SymbolTable;
use crate::value::{SymbolId, Value};

/// A (name, value) association. Used as the input descriptor for the
/// initial global frame and as the result of a successful resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub variable: String,
    pub value: Value,
}

impl Binding {
    pub fn new(variable: impl Into<String>, value: Value) -> Self {
        Binding {
            variable: variable.into(),
            value,
        }
    }
}

/// Build a frame from a sequence of bindings. The end of the slice ends the
/// sequence; an empty slice yields the empty frame.
pub fn build_frame(
    heap: &mut Heap,
    symbols: &mut SymbolTable,
    bindings: &[Binding],
) -> EnvResult<Value> {
    let entries = bindings
        .iter()
        .map(|b| -> EnvResult<(Value, Value)> {
            Ok((Value::Symbol(symbols.intern(&b.variable)?), b.value))
        })
        .collect::<EnvResult<Vec<_>>>()?;
    let frame = link_entries(heap, &entries)?;
    debug!("built frame with {} binding(s)", entries.len());
    Ok(frame)
}

/// Pair parameter names with argument values positionally:
/// `(a b c) (1 2 3) => ((a . 1) (b . 2) (c . 3))`.
pub fn make_frame(heap: &mut Heap, params: Value, args: Value) -> EnvResult<Value> {
    pair_up(heap, None, params, args)
}

/// Like `make_frame`, but names the procedure being applied in any arity
/// error.
pub fn make_frame_for(
    heap: &mut Heap,
    procedure: &str,
    params: Value,
    args: Value,
) -> EnvResult<Value> {
    pair_up(heap, Some(procedure), params, args)
}

fn pair_up(
    heap: &mut Heap,
    procedure: Option<&str>,
    params: Value,
    args: Value,
) -> EnvResult<Value> {
    let mut entries = Vec::new();
    let mut p = params;
    let mut a = args;

    loop {
        match (p, a) {
            (Value::Nil, Value::Nil) => break,
            (Value::Pair(pid), Value::Pair(aid)) => {
                let param = heap.get(pid)?;
                let arg = heap.get(aid)?;
                if !param.first.is_symbol() {
                    return Err(EnvError::Malformed(format!(
                        "parameter {:?} is not a symbol",
                        param.first
                    )));
                }
                entries.push((param.first, arg.first));
                p = param.rest;
                a = arg.rest;
            }
            // Exactly one list ran out first.
            (Value::Nil, Value::Pair(_)) | (Value::Pair(_), Value::Nil) => {
                let err = EnvError::ArityMismatch {
                    procedure: procedure.map(str::to_string),
                    parameters: heap.list_len(params)?,
                    arguments: heap.list_len(args)?,
                };
                debug!("{}", err);
                return Err(err);
            }
            (p, a) => {
                return Err(EnvError::Malformed(format!(
                    "improper parameter or argument list (tails {:?}, {:?})",
                    p, a
                )));
            }
        }
    }

    link_entries(heap, &entries)
}

/// Allocate entry and backbone cells so the frame lists `entries` in order.
fn link_entries(heap: &mut Heap, entries: &[(Value, Value)]) -> EnvResult<Value> {
    let mut frame = Value::Nil;
    for &(name, value) in entries.iter().rev() {
        let entry = heap.cons(name, value)?;
        frame = heap.cons(entry, frame)?;
    }
    Ok(frame)
}

/// Split one frame entry into its name and value.
pub(crate) fn entry_parts(heap: &Heap, entry: Value) -> EnvResult<(SymbolId, Value)> {
    let cell = match entry {
        Value::Pair(id) => heap.get(id)?,
        other => {
            return Err(EnvError::Malformed(format!(
                "frame entry {:?} is not a pair",
                other
            )))
        }
    };
    let name = cell
        .first
        .as_symbol()
        .ok_or_else(|| EnvError::Malformed(format!("frame entry {:?} is not named", entry)))?;
    Ok((name, cell.rest))
}

/// The entries of a frame, in order.
pub fn frame_bindings(heap: &Heap, symbols: &SymbolTable, frame: Value) -> EnvResult<Vec<Binding>> {
    heap.list_to_vec(frame)?
        .into_iter()
        .map(|entry| -> EnvResult<Binding> {
            let (name, value) = entry_parts(heap, entry)?;
            let variable = symbols
                .name(name)
                .ok_or_else(|| EnvError::Malformed(format!("unknown symbol {:?}", name)))?;
            Ok(Binding::new(variable, value))
        })
        .collect()
}
