//! Parent to descendant reset map for cascading selections

use std::collections::VecDeque;

/// How far a reset travels from the changed parent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CascadeMode {
    /// Reset only the descendants listed for the parent
    #[default]
    Direct,
    /// Reset the listed descendants and, recursively, theirs
    Transitive,
}

/// Static map from a parent field to the fields reset when it changes
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    edges: Vec<(&'static str, Vec<&'static str>)>,
    mode: CascadeMode,
}

impl DependencyGraph {
    pub fn new(mode: CascadeMode) -> Self {
        Self {
            edges: Vec::new(),
            mode,
        }
    }

    /// Declare the descendants of `parent`, builder style
    pub fn with_edge(mut self, parent: &'static str, descendants: &[&'static str]) -> Self {
        self.edges.push((parent, descendants.to_vec()));
        self
    }

    fn direct(&self, parent: &str) -> &[&'static str] {
        self.edges
            .iter()
            .find(|(p, _)| *p == parent)
            .map(|(_, d)| d.as_slice())
            .unwrap_or_default()
    }

    /// Fields to reset when `parent` changes, in declaration order, without duplicates
    pub fn descendants(&self, parent: &str) -> Vec<&'static str> {
        let mut out: Vec<&'static str> = Vec::new();
        let mut queue: VecDeque<&'static str> = self.direct(parent).iter().copied().collect();
        while let Some(next) = queue.pop_front() {
            if next == parent || out.contains(&next) {
                continue;
            }
            out.push(next);
            if self.mode == CascadeMode::Transitive {
                queue.extend(self.direct(next));
            }
        }
        out
    }
}
