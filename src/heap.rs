use crate::error::{EnvError, EnvResult};
use crate::value::{PairId, Value};

/// A single structural cell on the heap.
pub struct ConsCell {
    pub first: Value,
    pub rest: Value,
}

/// The cell heap. All pairs are allocated here and live until the heap is
/// dropped: there is no reclamation and no mutation after allocation.
/// PairId is an index into `cells`.
///
/// A cell may only refer to cells allocated before it, so every chain of
/// `rest` links ends.
pub struct Heap {
    cells: Vec<ConsCell>,
    capacity: usize,
}

impl Heap {
    pub fn new(capacity: usize) -> Self {
        Heap {
            cells: Vec::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    /// Allocate a new cell. Each call returns a distinct, previously unused
    /// PairId. Returns Err(HeapOverflow) if capacity is exceeded, and
    /// Err(Malformed) if either half names a cell this heap never handed out.
    pub fn alloc(&mut self, first: Value, rest: Value) -> EnvResult<PairId> {
        self.check(first)?;
        self.check(rest)?;

        if self.cells.len() >= self.capacity {
            return Err(EnvError::HeapOverflow(self.capacity));
        }
        let index = u32::try_from(self.cells.len())
            .map_err(|_| EnvError::HeapOverflow(self.cells.len()))?;

        self.cells.push(ConsCell { first, rest });
        Ok(PairId(index))
    }

    /// Allocate a cell and wrap it as a value.
    pub fn cons(&mut self, first: Value, rest: Value) -> EnvResult<Value> {
        Ok(Value::Pair(self.alloc(first, rest)?))
    }

    /// The cell behind `id`, or Malformed if this heap never allocated it.
    #[inline]
    pub fn get(&self, id: PairId) -> EnvResult<&ConsCell> {
        self.cells
            .get(id.0 as usize)
            .ok_or_else(|| EnvError::Malformed(format!("{:?} is not a cell of this heap", id)))
    }

    #[inline]
    pub fn first(&self, id: PairId) -> EnvResult<Value> {
        Ok(self.get(id)?.first)
    }

    #[inline]
    pub fn rest(&self, id: PairId) -> EnvResult<Value> {
        Ok(self.get(id)?.rest)
    }

    fn check(&self, val: Value) -> EnvResult<()> {
        if let Value::Pair(id) = val {
            self.get(id)?;
        }
        Ok(())
    }

    /// First element of a pair value. Fails on Nil and on atoms.
    pub fn car_val(&self, val: Value) -> EnvResult<Value> {
        match val {
            Value::Pair(id) => self.first(id),
            other => Err(EnvError::Malformed(format!("car of non-pair {:?}", other))),
        }
    }

    /// Rest of a pair value. Fails on Nil and on atoms.
    pub fn cdr_val(&self, val: Value) -> EnvResult<Value> {
        match val {
            Value::Pair(id) => self.rest(id),
            other => Err(EnvError::Malformed(format!("cdr of non-pair {:?}", other))),
        }
    }

    /// Build a proper list from a slice of values.
    pub fn list(&mut self, values: &[Value]) -> EnvResult<Value> {
        let mut result = Value::Nil;
        for &val in values.iter().rev() {
            result = self.cons(val, result)?;
        }
        Ok(result)
    }

    /// Collect a proper list into a Vec. Improper lists are Malformed.
    pub fn list_to_vec(&self, val: Value) -> EnvResult<Vec<Value>> {
        let mut result = Vec::new();
        let mut current = val;
        loop {
            match current {
                Value::Nil => return Ok(result),
                Value::Pair(id) => {
                    let cell = self.get(id)?;
                    result.push(cell.first);
                    current = cell.rest;
                }
                other => {
                    return Err(EnvError::Malformed(format!(
                        "list ends in {:?}",
                        other
                    )))
                }
            }
        }
    }

    /// Length of a list, counting pairs until the first non-pair tail.
    pub fn list_len(&self, val: Value) -> EnvResult<usize> {
        let mut count = 0;
        let mut current = val;
        while let Value::Pair(id) = current {
            count += 1;
            current = self.rest(id)?;
        }
        Ok(count)
    }

    /// Returns the number of allocated cells.
    pub fn total_cells(&self) -> usize {
        self.cells.len()
    }
}
