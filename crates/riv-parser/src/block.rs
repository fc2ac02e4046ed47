//! The block tree — glyph nesting levels rebuilt as an explicit arena.
//!
//! Glyphs arrive as a flat, level-tagged sequence. A glyph at the current
//! depth is a leaf of the current block; a deeper glyph opens nested blocks
//! until the depths match; a shallower glyph closes them. After building,
//! [`BlockTree::decorate`] gives every leaf its block-boundary links.

use crate::token::GlyphTokens;

/// Index of a node in the tree's arena.
pub type NodeId = usize;

/// A glyph leaf with its decoration links.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    pub glyph: GlyphTokens,
    pub level: usize,
    /// First leaf of the enclosing block, descending into sub-blocks.
    pub first_id: Option<NodeId>,
    /// Leaf after the enclosing block ends, or `None` at the top.
    pub following_id: Option<NodeId>,
}

/// An ordered run of leaves and nested blocks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Block {
    pub children: Vec<NodeId>,
}

/// One arena node.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Leaf(Leaf),
    Block(Block),
}

/// Arena block tree. Node 0 is always the root block.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl BlockTree {
    /// Rebuild the nesting implied by each glyph's level.
    pub fn build(glyphs: Vec<(usize, GlyphTokens)>) -> Self {
        let mut nodes = vec![Node::Block(Block::default())];
        let root = 0;
        let mut stack = vec![root];

        for (level, glyph) in glyphs {
            let depth = level.max(1);
            stack.truncate(depth);
            while stack.len() < depth {
                let parent = stack.last().copied().unwrap_or(root);
                let id = push_child(&mut nodes, parent, Node::Block(Block::default()));
                stack.push(id);
            }
            let parent = stack.last().copied().unwrap_or(root);
            push_child(
                &mut nodes,
                parent,
                Node::Leaf(Leaf {
                    glyph,
                    level,
                    first_id: None,
                    following_id: None,
                }),
            );
        }

        Self { nodes, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// All leaves in execution order.
    pub fn leaves(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_leaves(self.root, &mut out);
        out
    }

    fn collect_leaves(&self, id: NodeId, out: &mut Vec<NodeId>) {
        match &self.nodes[id] {
            Node::Leaf(_) => out.push(id),
            Node::Block(b) => {
                for &child in &b.children {
                    self.collect_leaves(child, out);
                }
            }
        }
    }

    /// Assign `first_id` and `following_id` to every leaf.
    pub fn decorate(&mut self) {
        self.decorate_block(self.root, None);
    }

    fn decorate_block(&mut self, block_id: NodeId, following: Option<NodeId>) {
        let children = match &self.nodes[block_id] {
            Node::Block(b) => b.children.clone(),
            Node::Leaf(_) => return,
        };
        let first = children.first().and_then(|&c| self.first_leaf(c));

        for (i, &child) in children.iter().enumerate() {
            if let Node::Leaf(leaf) = &mut self.nodes[child] {
                leaf.first_id = first;
                leaf.following_id = following;
            } else {
                // Leaves inside a nested block follow on to the next
                // sibling here, or to wherever this block follows on.
                let next = children
                    .get(i + 1)
                    .and_then(|&n| self.first_leaf(n))
                    .or(following);
                self.decorate_block(child, next);
            }
        }
    }

    /// First leaf under `id`, descending through nested blocks.
    pub fn first_leaf(&self, id: NodeId) -> Option<NodeId> {
        match &self.nodes[id] {
            Node::Leaf(_) => Some(id),
            Node::Block(b) => b.children.first().and_then(|&c| self.first_leaf(c)),
        }
    }
}

fn push_child(nodes: &mut Vec<Node>, parent: NodeId, node: Node) -> NodeId {
    let id = nodes.len();
    nodes.push(node);
    if let Node::Block(block) = &mut nodes[parent] {
        block.children.push(id);
    }
    id
}
