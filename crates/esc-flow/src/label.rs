//! Fresh control-flow label minting: loop continue/break labels
//! and inlined-finally labels all come from one counter so every label
//! in a compile is unique, mirroring `esc-ir`'s `NodeIdAllocator` shape.

use std::rc::Rc;

#[derive(Default)]
pub struct LabelAllocator {
    next: u32,
}

impl LabelAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self) -> Rc<str> {
        let label = format!("L{}", self.next);
        self.next += 1;
        Rc::from(label)
    }
}
