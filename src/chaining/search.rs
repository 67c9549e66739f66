// Node storage of a single breadth first search.
//
// Every discovered node is a slot pointing back to the slot it was reached
// from. Slots are never changed after they are pushed, so paths share their
// prefixes and a path is rebuilt by walking the parents back to the seed.
use super::graph::{Edge, NodeId};
use super::{Chain, LinkGraph, Node};
use crate::board::Candidate;
use crate::errors::ChainingError;

#[derive(Copy, Clone, Debug)]
pub(crate) struct Slot {
    pub id: NodeId,
    pub is_on: bool,
    pub parent: Option<u32>,
    pub depth: u32,
    // pattern of the link from the parent
    pub pattern: Option<u32>,
}

impl Slot {
    pub fn root(id: NodeId, is_on: bool) -> Slot {
        Slot {
            id,
            is_on,
            parent: None,
            depth: 0,
            pattern: None,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Arena {
    seed: Candidate,
    limit: usize,
    slots: Vec<Slot>,
}

impl Arena {
    pub fn new(seed: Candidate, limit: usize) -> Arena {
        Arena {
            seed,
            limit,
            slots: vec![],
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[cfg(test)]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot(&self, index: u32) -> Slot {
        self.slots[index as usize]
    }

    pub fn push(&mut self, slot: Slot) -> Result<u32, ChainingError> {
        if self.slots.len() >= self.limit {
            return Err(ChainingError::CapacityExceeded {
                seed: self.seed,
                limit: self.limit,
            });
        }
        self.slots.push(slot);
        Ok(self.slots.len() as u32 - 1)
    }

    // slot reached from the slot at `index` through `edge`
    pub fn child(&self, index: u32, edge: Edge) -> Slot {
        let parent = self.slot(index);
        Slot {
            id: edge.to,
            is_on: !parent.is_on,
            parent: Some(index),
            depth: parent.depth + 1,
            pattern: edge.pattern,
        }
    }

    pub fn is_ancestor(&self, mut index: u32, id: NodeId) -> bool {
        loop {
            let slot = self.slot(index);
            if slot.id == id {
                return true;
            }
            match slot.parent {
                Some(parent) => index = parent,
                None => return false,
            }
        }
    }

    fn path(&self, mut index: u32) -> Vec<Slot> {
        let mut path = vec![];
        loop {
            let slot = self.slot(index);
            path.push(slot);
            match slot.parent {
                Some(parent) => index = parent,
                None => break,
            }
        }
        path.reverse();
        path
    }

    /// The chain from the seed to the slot at `index`, extended by `last` if given.
    pub fn chain(&self, graph: &LinkGraph, index: u32, last: Option<Slot>) -> Chain {
        let mut path = self.path(index);
        path.extend(last);
        let nodes = path
            .iter()
            .map(|slot| Node::new(*graph.map(slot.id), slot.is_on).with_advanced(slot.pattern.is_some()))
            .collect();
        let patterns = path[1..].iter().map(|slot| graph.pattern(slot.pattern)).collect();
        Chain::new(nodes, patterns)
    }
}
