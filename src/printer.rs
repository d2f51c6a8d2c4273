use crate::heap::Heap;
use crate::symbol::SymbolTable;
use crate::value::Value;

/// Print a value to a string.
pub fn print_val(val: Value, heap: &Heap, symbols: &SymbolTable) -> String {
    let mut out = String::new();
    print_inner(val, heap, symbols, &mut out, 0);
    out
}

/// Print one frame as a list of `(name . value)` entries.
pub fn print_frame(frame: Value, heap: &Heap, symbols: &SymbolTable) -> String {
    print_val(frame, heap, symbols)
}

/// Print an environment chain, innermost frame first: `[f0 | f1 | ...]`.
pub fn print_environment(env: Value, heap: &Heap, symbols: &SymbolTable) -> String {
    let mut frames = Vec::new();
    let mut current = env;
    while let Value::Pair(id) = current {
        match heap.get(id) {
            Ok(cell) => {
                frames.push(print_frame(cell.first, heap, symbols));
                current = cell.rest;
            }
            Err(_) => break,
        }
    }
    let mut out = format!("[{}", frames.join(" | "));
    if !current.is_nil() {
        out.push_str(" . ");
        print_inner(current, heap, symbols, &mut out, 0);
    }
    out.push(']');
    out
}

fn print_inner(val: Value, heap: &Heap, symbols: &SymbolTable, out: &mut String, depth: usize) {
    if depth > 1000 {
        out.push_str("...");
        return;
    }

    match val {
        Value::Nil => out.push_str("()"),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::Symbol(id) => {
            let Some(name) = symbols.name(id) else {
                out.push_str(&format!("#<symbol {}>", id.0));
                return;
            };
            // Escape names the reader would split.
            if name.is_empty() || name.contains(' ') || name.contains('(') || name.contains(')')
                || name.contains('"') || name.contains(';') || name.contains('\\')
            {
                out.push('|');
                out.push_str(name);
                out.push('|');
            } else {
                out.push_str(name);
            }
        }
        Value::Pair(id) => {
            let Ok(cell) = heap.get(id) else {
                out.push_str(&format!("#<cell {}>", id.0));
                return;
            };
            out.push('(');
            print_inner(cell.first, heap, symbols, out, depth + 1);

            let mut current = cell.rest;
            loop {
                match current {
                    Value::Nil => break,
                    Value::Pair(pid) => match heap.get(pid) {
                        Ok(next) => {
                            out.push(' ');
                            print_inner(next.first, heap, symbols, out, depth + 1);
                            current = next.rest;
                        }
                        Err(_) => {
                            out.push_str(" . ");
                            print_inner(current, heap, symbols, out, depth + 1);
                            break;
                        }
                    },
                    _ => {
                        out.push_str(" . ");
                        print_inner(current, heap, symbols, out, depth + 1);
                        break;
                    }
                }
            }
            out.push(')');
        }
    }
}
