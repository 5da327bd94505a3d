use crate::foundation::error::{PulpError, PulpResult};
use crate::transform::affine::Transform;

const INITIAL_CAPACITY: usize = 16;

/// Save/restore stack of transforms.
///
/// Overflow is never an error: capacity doubles when full. Popping an empty stack is.
#[derive(Clone, Debug)]
pub struct TransformStack {
    entries: Vec<Transform>,
}

impl TransformStack {
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(INITIAL_CAPACITY),
        }
    }

    pub fn push(&mut self, t: &Transform) {
        if self.entries.len() == self.entries.capacity() {
            self.entries.reserve_exact(self.entries.capacity().max(1));
        }
        self.entries.push(*t);
    }

    pub fn pop(&mut self) -> PulpResult<Transform> {
        self.entries.pop().ok_or(PulpError::EmptyTransformStack)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/stack.rs"]
mod tests;
