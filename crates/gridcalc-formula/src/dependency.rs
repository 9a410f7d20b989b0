//! Dependency tracking for formula calculation

use gridcalc_core::CellReference;
use std::collections::{BTreeSet, HashMap, HashSet};

/// Dependency graph for formula cells
///
/// Tracks which cells depend on which other cells so a whole grid can be
/// evaluated precedents first. Neighbour sets are ordered, which keeps
/// [`calculation_order`](Self::calculation_order) deterministic.
#[derive(Debug, Default, Clone)]
pub struct DependencyGraph {
    /// Cell → Cells that depend on it (dependents)
    dependents: HashMap<CellReference, BTreeSet<CellReference>>,
    /// Cell → Cells it depends on (precedents)
    precedents: HashMap<CellReference, BTreeSet<CellReference>>,
}

impl DependencyGraph {
    /// Create a new empty dependency graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a dependency: dependent depends on precedent
    pub fn add_dependency(&mut self, precedent: CellReference, dependent: CellReference) {
        self.dependents
            .entry(precedent)
            .or_default()
            .insert(dependent);
        self.precedents
            .entry(dependent)
            .or_default()
            .insert(precedent);
    }

    /// Remove all dependencies for a cell
    pub fn clear_dependencies(&mut self, cell: CellReference) {
        if let Some(precedents) = self.precedents.remove(&cell) {
            for precedent in precedents {
                if let Some(deps) = self.dependents.get_mut(&precedent) {
                    deps.remove(&cell);
                }
            }
        }

        if let Some(dependents) = self.dependents.remove(&cell) {
            for dependent in dependents {
                if let Some(precs) = self.precedents.get_mut(&dependent) {
                    precs.remove(&cell);
                }
            }
        }
    }

    /// Get cells that depend on the given cell
    pub fn dependents(&self, cell: CellReference) -> impl Iterator<Item = CellReference> + '_ {
        self.dependents
            .get(&cell)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Get cells that the given cell depends on
    pub fn precedents(&self, cell: CellReference) -> impl Iterator<Item = CellReference> + '_ {
        self.precedents
            .get(&cell)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Order `cells` so every cell comes after the cells it depends on
    ///
    /// Transitive precedents are included in the result. Edges that would
    /// close a cycle are skipped, so cells on a cycle still appear once.
    pub fn calculation_order<I>(&self, cells: I) -> Vec<CellReference>
    where
        I: IntoIterator<Item = CellReference>,
    {
        let mut result = Vec::new();
        let mut visited = HashSet::new();

        for cell in cells {
            if !visited.insert(cell) {
                continue;
            }

            // Post-order DFS over precedents with an explicit stack
            let mut stack = vec![(cell, self.precedents(cell))];
            while let Some((node, precedents)) = stack.last_mut() {
                let node = *node;
                match precedents.next() {
                    Some(precedent) => {
                        if visited.insert(precedent) {
                            stack.push((precedent, self.precedents(precedent)));
                        }
                    }
                    None => {
                        stack.pop();
                        result.push(node);
                    }
                }
            }
        }

        result
    }

    /// Detect a circular reference reachable from a cell
    ///
    /// True when the cell is on a cycle or depends, directly or not, on a
    /// cell that is. Use [`circular_cells`](Self::circular_cells) to check
    /// many cells at once.
    pub fn has_circular_reference(&self, cell: CellReference) -> bool {
        self.circular_cells().contains(&cell)
    }

    /// Every cell that is on a cycle or depends on a cell that is
    ///
    /// Runs in time linear in the size of the graph: one strongly connected
    /// components pass, then a walk over dependents.
    pub fn circular_cells(&self) -> HashSet<CellReference> {
        let mut circular = self.cycle_members();

        let mut pending: Vec<CellReference> = circular.iter().copied().collect();
        while let Some(cell) = pending.pop() {
            for dependent in self.dependents(cell) {
                if circular.insert(dependent) {
                    pending.push(dependent);
                }
            }
        }

        circular
    }

    /// Cells inside a cycle, found with Tarjan's algorithm
    fn cycle_members(&self) -> HashSet<CellReference> {
        let mut members = HashSet::new();
        let mut index: HashMap<CellReference, usize> = HashMap::new();
        let mut low_link: HashMap<CellReference, usize> = HashMap::new();
        let mut component_stack: Vec<CellReference> = Vec::new();
        let mut on_stack: HashSet<CellReference> = HashSet::new();
        let mut next_index = 0;

        for &root in self.precedents.keys() {
            if index.contains_key(&root) {
                continue;
            }

            index.insert(root, next_index);
            low_link.insert(root, next_index);
            next_index += 1;
            component_stack.push(root);
            on_stack.insert(root);

            let mut stack = vec![(root, self.precedents(root))];
            while let Some((node, precedents)) = stack.last_mut() {
                let node = *node;
                match precedents.next() {
                    Some(next) => match index.get(&next).copied() {
                        None => {
                            index.insert(next, next_index);
                            low_link.insert(next, next_index);
                            next_index += 1;
                            component_stack.push(next);
                            on_stack.insert(next);
                            stack.push((next, self.precedents(next)));
                        }
                        Some(next_position) if on_stack.contains(&next) => {
                            if let Some(low) = low_link.get_mut(&node) {
                                *low = (*low).min(next_position);
                            }
                        }
                        Some(_) => {}
                    },
                    None => {
                        stack.pop();
                        let node_low = low_link.get(&node).copied().unwrap_or(usize::MAX);

                        if let Some((parent, _)) = stack.last() {
                            if let Some(low) = low_link.get_mut(parent) {
                                *low = (*low).min(node_low);
                            }
                        }

                        if Some(&node_low) == index.get(&node) {
                            let mut component = Vec::new();
                            while let Some(member) = component_stack.pop() {
                                on_stack.remove(&member);
                                component.push(member);
                                if member == node {
                                    break;
                                }
                            }

                            let self_loop = self
                                .precedents
                                .get(&node)
                                .is_some_and(|set| set.contains(&node));
                            if component.len() > 1 || self_loop {
                                members.extend(component);
                            }
                        }
                    }
                }
            }
        }

        members
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cell(a1: &str) -> CellReference {
        CellReference::parse(a1).unwrap()
    }

    #[test]
    fn test_add_dependency() {
        let mut graph = DependencyGraph::new();

        let a1 = cell("A1");
        let b1 = cell("B1");

        graph.add_dependency(a1, b1);

        assert!(graph.dependents(a1).any(|c| c == b1));
        assert!(graph.precedents(b1).any(|c| c == a1));
    }

    #[test]
    fn test_clear_dependencies() {
        let mut graph = DependencyGraph::new();
        graph.add_dependency(cell("A1"), cell("B1"));
        graph.add_dependency(cell("B1"), cell("C1"));

        graph.clear_dependencies(cell("B1"));

        assert_eq!(graph.dependents(cell("A1")).count(), 0);
        assert_eq!(graph.precedents(cell("C1")).count(), 0);
        assert_eq!(graph.precedents(cell("B1")).count(), 0);
        assert!(graph.circular_cells().is_empty());
    }

    #[test]
    fn test_calculation_order() {
        let mut graph = DependencyGraph::new();

        // C1 = B1 + A1, B1 = A1
        graph.add_dependency(cell("A1"), cell("B1"));
        graph.add_dependency(cell("B1"), cell("C1"));
        graph.add_dependency(cell("A1"), cell("C1"));

        let order = graph.calculation_order([cell("C1"), cell("B1")]);
        assert_eq!(order, vec![cell("A1"), cell("B1"), cell("C1")]);
    }

    #[test]
    fn test_calculation_order_with_cycle() {
        let mut graph = DependencyGraph::new();
        graph.add_dependency(cell("A1"), cell("B1"));
        graph.add_dependency(cell("B1"), cell("A1"));

        let order = graph.calculation_order([cell("A1"), cell("B1")]);
        assert_eq!(order, vec![cell("B1"), cell("A1")]);
    }

    #[test]
    fn test_circular_reference() {
        let mut graph = DependencyGraph::new();

        let a1 = cell("A1");
        let b1 = cell("B1");
        let c1 = cell("C1");
        let d1 = cell("D1");
        let e1 = cell("E1");

        // A1 -> B1 -> C1 -> A1 (circular), C1 -> D1
        graph.add_dependency(a1, b1);
        graph.add_dependency(b1, c1);
        graph.add_dependency(c1, a1);
        graph.add_dependency(c1, d1);
        graph.add_dependency(e1, a1);

        assert!(graph.has_circular_reference(a1));
        assert!(graph.has_circular_reference(b1));
        assert!(graph.has_circular_reference(c1));
        // Downstream of the cycle
        assert!(graph.has_circular_reference(d1));
        // Upstream only
        assert!(!graph.has_circular_reference(e1));
    }

    #[test]
    fn test_self_reference() {
        let mut graph = DependencyGraph::new();
        graph.add_dependency(cell("A1"), cell("A1"));
        assert!(graph.has_circular_reference(cell("A1")));
    }

    #[test]
    fn test_circular_cells() {
        let mut graph = DependencyGraph::new();

        // A1 <-> B1, C1 reads B1, D1 reads itself, E1 feeds A1, F1 reads E1
        graph.add_dependency(cell("A1"), cell("B1"));
        graph.add_dependency(cell("B1"), cell("A1"));
        graph.add_dependency(cell("B1"), cell("C1"));
        graph.add_dependency(cell("D1"), cell("D1"));
        graph.add_dependency(cell("E1"), cell("A1"));
        graph.add_dependency(cell("E1"), cell("F1"));

        let mut circular: Vec<CellReference> = graph.circular_cells().into_iter().collect();
        circular.sort();
        assert_eq!(circular, vec![cell("A1"), cell("B1"), cell("C1"), cell("D1")]);
    }

    #[test]
    fn test_long_chain() {
        const LENGTH: u32 = 200_000;
        let mut graph = DependencyGraph::new();

        // A2 reads A1, A3 reads A2, ...
        for row in 1..LENGTH {
            graph.add_dependency(CellReference::new(row - 1, 0), CellReference::new(row, 0));
        }

        let last = CellReference::new(LENGTH - 1, 0);
        let order = graph.calculation_order([last]);
        assert_eq!(order.len(), LENGTH as usize);
        assert_eq!(order[0], CellReference::new(0, 0));
        assert_eq!(order[order.len() - 1], last);

        assert!(!graph.has_circular_reference(last));

        // Closing the loop puts every cell on one cycle
        graph.add_dependency(last, CellReference::new(0, 0));
        assert_eq!(graph.circular_cells().len(), LENGTH as usize);
    }
}
