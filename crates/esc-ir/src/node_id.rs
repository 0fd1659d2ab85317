//! Node identity. IDs are handed out by a per-compile allocator
//! and never reused, so two nodes with the same ID are the same
//! logical node even across a `withX` replacement that otherwise
//! copies every field.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

#[derive(Default)]
pub struct NodeIdAllocator {
    next: u32,
}

impl NodeIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }
}

/// Fields common to every IR node: identity, the token that produced
/// it, and its terminal source offset.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeMeta {
    pub id: NodeId,
    pub token: esc_token::Token,
    pub finish: u32,
}

impl NodeMeta {
    pub fn span(&self) -> esc_common::Span {
        esc_common::Span::new(self.token.start(), self.finish)
    }
}
