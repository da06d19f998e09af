//! Binding compiler: validates edges and orders them for dispatch.

use std::collections::{HashSet, VecDeque};

use crate::binding::edge::BindingEdge;
use crate::binding::error::{BindingError, BindingResult};
use crate::binding::slot::SlotKind;

/// Validated evaluation order for a set of edges
#[derive(Debug, Clone, Default)]
pub struct CompiledPlan {
    /// Edge indices in topological order
    pub order: Vec<usize>,

    /// Edge-to-edge dependencies (from_idx, to_idx)
    pub dependencies: Vec<(usize, usize)>,

    pub stats: PlanStats,
}

/// Statistics about the compiled plan
#[derive(Debug, Clone, Default)]
pub struct PlanStats {
    pub total_edges: usize,

    /// Edges with no upstream edge (fired by UI input only)
    pub root_edges: usize,

    /// Distinct slots read or written by any edge
    pub slots_touched: usize,

    pub compile_time_us: u64,
}

impl CompiledPlan {
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Validates binding edges and orders them for evaluation
pub struct BindingCompiler;

impl BindingCompiler {
    /// Validate `edges` and compute a topological evaluation order.
    ///
    /// Edge B depends on edge A when A writes a slot B reads. Ties are
    /// broken by declaration order so evaluation is deterministic.
    pub fn compile(edges: &[BindingEdge]) -> BindingResult<CompiledPlan> {
        let start_time = std::time::Instant::now();

        Self::validate_edges(edges)?;
        Self::validate_shared_outputs(edges)?;

        let dependencies = Self::build_dependencies(edges);
        let order = Self::topological_sort(edges, &dependencies)?;

        let root_edges = (0..edges.len())
            .filter(|&i| !dependencies.iter().any(|&(_, to)| to == i))
            .count();
        let slots_touched = edges
            .iter()
            .flat_map(|e| e.triggers.iter().chain(&e.context).chain(&e.outputs))
            .collect::<HashSet<_>>()
            .len();

        Ok(CompiledPlan {
            order,
            dependencies,
            stats: PlanStats {
                total_edges: edges.len(),
                root_edges,
                slots_touched,
                compile_time_us: start_time.elapsed().as_micros() as u64,
            },
        })
    }

    /// Per-edge checks
    fn validate_edges(edges: &[BindingEdge]) -> BindingResult<()> {
        let mut names = HashSet::new();
        for edge in edges {
            if !names.insert(edge.name) {
                return Err(BindingError::DuplicateEdge(edge.name));
            }
            if edge.triggers.is_empty() {
                return Err(BindingError::NoTriggers(edge.name));
            }
            if let Some(&slot) = edge.outputs.iter().find(|s| s.is_input()) {
                return Err(BindingError::WritesInput {
                    edge: edge.name,
                    slot,
                });
            }
            if let Some(slot) = edge.error_slot {
                if !edge.writes(slot) {
                    return Err(BindingError::ErrorSlotNotOutput {
                        edge: edge.name,
                        slot,
                    });
                }
                if slot.kind() != SlotKind::Status {
                    return Err(BindingError::ErrorSlotNotStatus {
                        edge: edge.name,
                        slot,
                    });
                }
            }
        }
        Ok(())
    }

    /// Two edges may write the same slot only if no single slot change can
    /// fire both.
    fn validate_shared_outputs(edges: &[BindingEdge]) -> BindingResult<()> {
        for (i, first) in edges.iter().enumerate() {
            for second in &edges[i + 1..] {
                let shares_trigger = first.triggers.iter().any(|t| second.triggers.contains(t));
                if !shares_trigger {
                    continue;
                }
                if let Some(&slot) = first.outputs.iter().find(|s| second.writes(**s)) {
                    return Err(BindingError::ConflictingOutputs {
                        slot,
                        first: first.name,
                        second: second.name,
                    });
                }
            }
        }
        Ok(())
    }

    fn build_dependencies(edges: &[BindingEdge]) -> Vec<(usize, usize)> {
        let mut deps = Vec::new();
        for (from, upstream) in edges.iter().enumerate() {
            for (to, downstream) in edges.iter().enumerate() {
                if from == to {
                    continue;
                }
                if upstream.outputs.iter().any(|s| downstream.reads(*s)) {
                    deps.push((from, to));
                }
            }
        }
        deps
    }

    /// Kahn's algorithm; leftover edges form a cycle
    fn topological_sort(
        edges: &[BindingEdge],
        dependencies: &[(usize, usize)],
    ) -> BindingResult<Vec<usize>> {
        let n = edges.len();
        let mut adj = vec![Vec::new(); n];
        let mut in_degree = vec![0usize; n];

        for &(from, to) in dependencies {
            adj[from].push(to);
            in_degree[to] += 1;
        }

        let mut queue: VecDeque<usize> = (0..n).filter(|&i| in_degree[i] == 0).collect();
        let mut result = Vec::with_capacity(n);

        while let Some(node) = queue.pop_front() {
            result.push(node);
            for &neighbor in &adj[node] {
                in_degree[neighbor] -= 1;
                if in_degree[neighbor] == 0 {
                    queue.push_back(neighbor);
                }
            }
        }

        if result.len() < n {
            let stuck = (0..n)
                .filter(|i| !result.contains(i))
                .map(|i| edges[i].name)
                .collect();
            return Err(BindingError::CycleDetected(stuck));
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::edge::{HandlerContext, SlotView};
    use crate::binding::slot::{SlotId, SlotWrites};
    use crate::error::Result;

    fn noop(_: &mut HandlerContext<'_>, _: &SlotView<'_>) -> Result<SlotWrites> {
        Ok(SlotWrites::new())
    }

    #[test]
    fn test_compile_empty() {
        let plan = BindingCompiler::compile(&[]).unwrap();
        assert!(plan.is_empty());
        assert_eq!(plan.stats.total_edges, 0);
    }

    #[test]
    fn test_order_follows_data_flow() {
        // Declared downstream-first on purpose
        let edges = vec![
            BindingEdge::new("chart", noop)
                .trigger(SlotId::TableData)
                .output(SlotId::Chart),
            BindingEdge::new("upload", noop)
                .trigger(SlotId::UploadContents)
                .output(SlotId::TableData),
        ];
        let plan = BindingCompiler::compile(&edges).unwrap();
        assert_eq!(plan.order, vec![1, 0]);
        assert_eq!(plan.dependencies, vec![(1, 0)]);
        assert_eq!(plan.stats.root_edges, 1);
    }

    #[test]
    fn test_context_reads_create_dependencies() {
        let edges = vec![
            BindingEdge::new("select", noop)
                .trigger(SlotId::FileListClick)
                .context(SlotId::FileList)
                .output(SlotId::TableData),
            BindingEdge::new("list", noop)
                .trigger(SlotId::FileListRefresh)
                .output(SlotId::FileList),
        ];
        let plan = BindingCompiler::compile(&edges).unwrap();
        assert_eq!(plan.order, vec![1, 0]);
    }

    #[test]
    fn test_cycle_detected() {
        let edges = vec![
            BindingEdge::new("a", noop)
                .trigger(SlotId::TableData)
                .output(SlotId::Chart),
            BindingEdge::new("b", noop)
                .trigger(SlotId::Chart)
                .output(SlotId::TableData),
            BindingEdge::new("c", noop)
                .trigger(SlotId::AppStart)
                .output(SlotId::FileList),
        ];
        let err = BindingCompiler::compile(&edges).unwrap_err();
        assert_eq!(err, BindingError::CycleDetected(vec!["a", "b"]));
    }

    #[test]
    fn test_edge_without_triggers_rejected() {
        let edges = vec![BindingEdge::new("lonely", noop).output(SlotId::Chart)];
        assert_eq!(
            BindingCompiler::compile(&edges).unwrap_err(),
            BindingError::NoTriggers("lonely")
        );
    }

    #[test]
    fn test_writing_input_slot_rejected() {
        let edges = vec![BindingEdge::new("loop", noop)
            .trigger(SlotId::TableData)
            .output(SlotId::SelectedColumn)];
        assert!(matches!(
            BindingCompiler::compile(&edges).unwrap_err(),
            BindingError::WritesInput {
                slot: SlotId::SelectedColumn,
                ..
            }
        ));
    }

    #[test]
    fn test_error_slot_must_be_status_output() {
        let not_output = vec![BindingEdge::new("e", noop)
            .trigger(SlotId::AppStart)
            .output(SlotId::FileList)
            .errors_to(SlotId::StatusMessage)];
        assert!(matches!(
            BindingCompiler::compile(&not_output).unwrap_err(),
            BindingError::ErrorSlotNotOutput { .. }
        ));

        let not_status = vec![BindingEdge::new("e", noop)
            .trigger(SlotId::AppStart)
            .output(SlotId::FileList)
            .errors_to(SlotId::FileList)];
        assert!(matches!(
            BindingCompiler::compile(&not_status).unwrap_err(),
            BindingError::ErrorSlotNotStatus { .. }
        ));
    }

    #[test]
    fn test_shared_output_on_shared_trigger_rejected() {
        let edges = vec![
            BindingEdge::new("first", noop)
                .trigger(SlotId::AppStart)
                .output(SlotId::StatusMessage),
            BindingEdge::new("second", noop)
                .trigger(SlotId::AppStart)
                .trigger(SlotId::ResetDataset)
                .output(SlotId::StatusMessage),
        ];
        assert_eq!(
            BindingCompiler::compile(&edges).unwrap_err(),
            BindingError::ConflictingOutputs {
                slot: SlotId::StatusMessage,
                first: "first",
                second: "second",
            }
        );
    }

    #[test]
    fn test_shared_output_on_disjoint_triggers_allowed() {
        let edges = vec![
            BindingEdge::new("first", noop)
                .trigger(SlotId::AppStart)
                .output(SlotId::StatusMessage),
            BindingEdge::new("second", noop)
                .trigger(SlotId::ResetDataset)
                .output(SlotId::StatusMessage),
        ];
        assert!(BindingCompiler::compile(&edges).is_ok());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let edges = vec![
            BindingEdge::new("same", noop).trigger(SlotId::AppStart),
            BindingEdge::new("same", noop).trigger(SlotId::ResetDataset),
        ];
        assert_eq!(
            BindingCompiler::compile(&edges).unwrap_err(),
            BindingError::DuplicateEdge("same")
        );
    }
}
