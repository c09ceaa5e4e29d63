// Copyright 2026 The html5tree Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The work list that replaces recursion in the tree walkers.

use log::trace;

use crate::error::Result;

/// A LIFO of (source node, target parent) pairs.
///
/// Growth never aborts the process: when the backing storage is full the
/// capacity is doubled with a fallible reservation, and a refusal surfaces
/// as `ConvertError::OutOfMemory`.
pub struct Stack<S, P> {
    items: Vec<(S, P)>,
}

impl<S, P> Stack<S, P> {
    pub fn with_capacity(capacity: usize) -> Result<Stack<S, P>> {
        let mut items = Vec::new();
        items.try_reserve_exact(capacity.max(1))?;
        Ok(Stack { items })
    }

    pub fn push(&mut self, source: S, parent: P) -> Result<()> {
        if self.items.len() == self.items.capacity() {
            let extra = self.items.capacity().max(1);
            self.items.try_reserve_exact(extra)?;
            trace!("work stack grown to {}", self.items.capacity());
        }
        self.items.push((source, parent));
        Ok(())
    }

    pub fn pop(&mut self) -> Option<(S, P)> {
        self.items.pop()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::Stack;

    #[test]
    fn lifo_order() {
        let mut stack = Stack::with_capacity(4).unwrap();
        for i in 0..3 {
            stack.push(i, ()).unwrap();
        }
        assert_eq!(stack.len(), 3);
        assert_eq!(stack.pop(), Some((2, ())));
        assert_eq!(stack.pop(), Some((1, ())));
        assert_eq!(stack.pop(), Some((0, ())));
        assert!(stack.is_empty());
        assert_eq!(stack.pop(), None);
    }

    #[test]
    fn doubles_when_full() {
        let mut stack = Stack::with_capacity(2).unwrap();
        let initial = stack.capacity();
        for i in 0..initial {
            stack.push(i, i).unwrap();
        }
        stack.push(initial, initial).unwrap();
        assert!(stack.capacity() >= initial * 2);
        assert_eq!(stack.len(), initial + 1);
    }

    #[test]
    fn zero_capacity_still_grows() {
        let mut stack = Stack::with_capacity(0).unwrap();
        for i in 0..100 {
            stack.push(i, "p").unwrap();
        }
        assert_eq!(stack.len(), 100);
        assert_eq!(stack.pop(), Some((99, "p")));
    }
}
