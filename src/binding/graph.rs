//! Compiled binding graph: runs the edges an event triggers.

use std::collections::{HashMap, HashSet};

use crate::binding::compiler::{BindingCompiler, CompiledPlan};
use crate::binding::edge::{BindingEdge, HandlerContext, SlotView};
use crate::binding::error::{BindingError, BindingResult};
use crate::binding::slot::{check_kind, SlotId, SlotStore, SlotValue, SlotWrites};
use crate::types::StatusMessage;

/// A handler or wiring failure observed during one dispatch
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeFailure {
    pub edge: &'static str,
    pub message: String,
}

/// What happened while propagating one event
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispatchReport {
    /// Edges that fired, in evaluation order
    pub fired: Vec<&'static str>,
    /// Slots written, in first-write order
    pub changed: Vec<SlotId>,
    pub failures: Vec<EdgeFailure>,
}

impl DispatchReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn did_fire(&self, edge: &str) -> bool {
        self.fired.iter().any(|e| *e == edge)
    }

    fn mark(&mut self, slot: SlotId) {
        if !self.changed.contains(&slot) {
            self.changed.push(slot);
        }
    }
}

/// Static set of binding edges plus their evaluation order
#[derive(Debug)]
pub struct BindingGraph {
    edges: Vec<BindingEdge>,
    plan: CompiledPlan,
}

impl BindingGraph {
    /// Validate the edges and compile their evaluation order.
    pub fn new(edges: Vec<BindingEdge>) -> BindingResult<Self> {
        let plan = BindingCompiler::compile(&edges)?;
        tracing::debug!(
            "Compiled binding graph: {} edges, {} dependencies in {}us",
            plan.stats.total_edges,
            plan.dependencies.len(),
            plan.stats.compile_time_us
        );
        Ok(Self { edges, plan })
    }

    pub fn edges(&self) -> &[BindingEdge] {
        &self.edges
    }

    pub fn plan(&self) -> &CompiledPlan {
        &self.plan
    }

    /// Edge names in evaluation order
    pub fn evaluation_order(&self) -> Vec<&'static str> {
        self.plan.order.iter().map(|&i| self.edges[i].name).collect()
    }

    /// Apply an event's writes and propagate them through the graph.
    ///
    /// Each edge fires at most once, after every edge it depends on. Handler
    /// failures are routed to the edge's error slot and never abort the
    /// dispatch; only a mistyped event write is returned as an error, and in
    /// that case nothing is applied.
    pub fn dispatch(
        &self,
        slots: &mut SlotStore,
        ctx: &mut HandlerContext<'_>,
        event: SlotWrites,
    ) -> BindingResult<DispatchReport> {
        for (slot, value) in event.iter() {
            check_kind(*slot, value)?;
        }

        let mut report = DispatchReport::default();
        let mut dirty: HashSet<SlotId> = HashSet::new();
        // Slot -> edge that wrote it during this dispatch
        let mut written_by: HashMap<SlotId, &'static str> = HashMap::new();

        for (slot, value) in event {
            slots.set(slot, value)?;
            dirty.insert(slot);
            report.mark(slot);
        }

        for &idx in &self.plan.order {
            let edge = &self.edges[idx];
            if !edge.triggers.iter().any(|t| dirty.contains(t)) {
                continue;
            }
            report.fired.push(edge.name);

            let outcome = {
                let view = SlotView::new(slots, edge);
                (edge.handler)(ctx, &view)
            };

            let writes = match outcome {
                Ok(writes) => match Self::check_writes(edge, &writes, &written_by) {
                    Ok(()) => writes,
                    Err(e) => {
                        tracing::error!("Discarding writes of edge '{}': {}", edge.name, e);
                        match Self::failure_writes(edge, e.to_string(), &mut report) {
                            Some(w) => w,
                            None => continue,
                        }
                    }
                },
                Err(e) => {
                    tracing::warn!("Edge '{}' failed: {}", edge.name, e);
                    match Self::failure_writes(edge, e.to_string(), &mut report) {
                        Some(w) => w,
                        None => continue,
                    }
                }
            };

            for (slot, value) in writes {
                if let Some(first) = written_by.get(&slot) {
                    // Only reachable for error-slot writes; regular writes were checked above.
                    tracing::error!(
                        "{}",
                        BindingError::OutputConflict {
                            slot,
                            first: *first,
                            second: edge.name,
                        }
                    );
                    continue;
                }
                if let Err(e) = slots.set(slot, value) {
                    tracing::error!("Edge '{}': {}", edge.name, e);
                    continue;
                }
                written_by.insert(slot, edge.name);
                dirty.insert(slot);
                report.mark(slot);
            }
        }

        Ok(report)
    }

    fn check_writes(
        edge: &BindingEdge,
        writes: &SlotWrites,
        written_by: &HashMap<SlotId, &'static str>,
    ) -> BindingResult<()> {
        for (slot, value) in writes.iter() {
            if !edge.writes(*slot) {
                return Err(BindingError::UndeclaredWrite {
                    edge: edge.name,
                    slot: *slot,
                });
            }
            check_kind(*slot, value)?;
            if let Some(first) = written_by.get(slot) {
                return Err(BindingError::OutputConflict {
                    slot: *slot,
                    first: *first,
                    second: edge.name,
                });
            }
        }
        Ok(())
    }

    /// Record a failure and build the error-slot write for it, if any.
    fn failure_writes(
        edge: &BindingEdge,
        message: String,
        report: &mut DispatchReport,
    ) -> Option<SlotWrites> {
        report.failures.push(EdgeFailure {
            edge: edge.name,
            message: message.clone(),
        });
        edge.error_slot.map(|slot| {
            SlotWrites::new().set(slot, SlotValue::Status(StatusMessage::error(message)))
        })
    }
}
