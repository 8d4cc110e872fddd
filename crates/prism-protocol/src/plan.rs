// SPDX-FileCopyrightText: 2026 Prism Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scheduling checks for execution plans.
//!
//! Parsing accepts any plan the JSON describes. Before dispatching subtasks,
//! callers run [`ExecutionPlan::schedule`] to reject dangling dependencies and
//! cycles, and to get an order in which blockers run first.

use std::collections::{HashMap, HashSet};

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use prism_core::PrismError;
use thiserror::Error;

use crate::directive::{ExecutionPlan, Subtask, SubtaskStatus};

/// Why a plan cannot be scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("subtask id {0} appears more than once")]
    DuplicateId(u32),

    #[error("subtask {subtask} is blocked by unknown subtask {missing}")]
    UnknownDependency { subtask: u32, missing: u32 },

    #[error("parallelizable lists unknown subtask {0}")]
    UnknownParallel(u32),

    #[error("dependency cycle through subtask {0}")]
    Cycle(u32),
}

impl From<PlanError> for PrismError {
    fn from(err: PlanError) -> Self {
        PrismError::InvalidPlan(err.to_string())
    }
}

impl ExecutionPlan {
    pub fn subtask(&self, id: u32) -> Option<&Subtask> {
        self.subtasks.iter().find(|s| s.id == id)
    }

    /// Subtask ids ordered so that every blocker precedes the subtasks it blocks.
    pub fn schedule(&self) -> Result<Vec<u32>, PlanError> {
        let graph = self.dependency_graph()?;
        let order = toposort(&graph, None).map_err(|cycle| PlanError::Cycle(graph[cycle.node_id()]))?;
        Ok(order.into_iter().map(|index| graph[index]).collect())
    }

    /// Subtasks that can start now: not yet done, with every blocker done.
    ///
    /// A subtask counts as done when its id is in `completed` or its status
    /// is `complete`. Failed subtasks are never ready again.
    pub fn ready(&self, completed: &HashSet<u32>) -> Vec<u32> {
        let done: HashSet<u32> = self
            .subtasks
            .iter()
            .filter(|s| completed.contains(&s.id) || s.status == Some(SubtaskStatus::Complete))
            .map(|s| s.id)
            .collect();

        self.subtasks
            .iter()
            .filter(|s| !done.contains(&s.id) && s.status != Some(SubtaskStatus::Failed))
            .filter(|s| s.blocking.iter().flatten().all(|b| done.contains(b)))
            .map(|s| s.id)
            .collect()
    }

    /// The declared parallel group, checked against the plan's ids.
    pub fn parallel_group(&self) -> Result<&[u32], PlanError> {
        let group = self.parallelizable.as_deref().unwrap_or_default();
        if let Some(&missing) = group.iter().find(|id| self.subtask(**id).is_none()) {
            return Err(PlanError::UnknownParallel(missing));
        }
        Ok(group)
    }

    fn dependency_graph(&self) -> Result<DiGraph<u32, ()>, PlanError> {
        let mut graph = DiGraph::new();
        let mut index: HashMap<u32, NodeIndex> = HashMap::new();

        for subtask in &self.subtasks {
            if index.contains_key(&subtask.id) {
                return Err(PlanError::DuplicateId(subtask.id));
            }
            index.insert(subtask.id, graph.add_node(subtask.id));
        }

        for subtask in &self.subtasks {
            let to = index[&subtask.id];
            for blocker in subtask.blocking.iter().flatten() {
                let from = index.get(blocker).ok_or(PlanError::UnknownDependency {
                    subtask: subtask.id,
                    missing: *blocker,
                })?;
                graph.add_edge(*from, to, ());
            }
        }

        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use prism_core::{ComplexityTier, ModelId};

    use super::*;

    fn subtask(id: u32, blocking: &[u32]) -> Subtask {
        Subtask {
            id,
            task: format!("step {id}"),
            specialist: ModelId::from("qwen-2.5-coder"),
            blocking: if blocking.is_empty() {
                None
            } else {
                Some(blocking.to_vec())
            },
            status: None,
        }
    }

    fn plan(subtasks: Vec<Subtask>) -> ExecutionPlan {
        ExecutionPlan {
            complexity: ComplexityTier::Complex,
            subtasks,
            parallelizable: None,
            estimated_tokens: None,
        }
    }

    fn position(order: &[u32], id: u32) -> usize {
        order.iter().position(|x| *x == id).unwrap()
    }

    #[test]
    fn schedule_puts_blockers_first() {
        let p = plan(vec![subtask(3, &[1, 2]), subtask(2, &[1]), subtask(1, &[])]);
        let order = p.schedule().unwrap();
        assert_eq!(order.len(), 3);
        assert!(position(&order, 1) < position(&order, 2));
        assert!(position(&order, 2) < position(&order, 3));
    }

    #[test]
    fn cycle_is_rejected() {
        let p = plan(vec![subtask(1, &[2]), subtask(2, &[1])]);
        assert!(matches!(p.schedule(), Err(PlanError::Cycle(_))));
    }

    #[test]
    fn self_block_is_a_cycle() {
        let p = plan(vec![subtask(1, &[1])]);
        assert_eq!(p.schedule(), Err(PlanError::Cycle(1)));
    }

    #[test]
    fn dangling_dependency_is_rejected() {
        let p = plan(vec![subtask(1, &[9])]);
        assert_eq!(
            p.schedule(),
            Err(PlanError::UnknownDependency { subtask: 1, missing: 9 })
        );
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let p = plan(vec![subtask(1, &[]), subtask(1, &[])]);
        assert_eq!(p.schedule(), Err(PlanError::DuplicateId(1)));
    }

    #[test]
    fn empty_plan_schedules_to_nothing() {
        assert!(plan(vec![]).schedule().unwrap().is_empty());
    }

    #[test]
    fn ready_follows_completion() {
        let p = plan(vec![subtask(1, &[]), subtask(2, &[1]), subtask(3, &[1, 2])]);
        assert_eq!(p.ready(&HashSet::new()), [1]);
        assert_eq!(p.ready(&HashSet::from([1])), [2]);
        assert_eq!(p.ready(&HashSet::from([1, 2])), [3]);
        assert!(p.ready(&HashSet::from([1, 2, 3])).is_empty());
    }

    #[test]
    fn ready_honors_status_fields() {
        let mut first = subtask(1, &[]);
        first.status = Some(SubtaskStatus::Complete);
        let mut failed = subtask(2, &[]);
        failed.status = Some(SubtaskStatus::Failed);
        let p = plan(vec![first, failed, subtask(3, &[1])]);
        assert_eq!(p.ready(&HashSet::new()), [3]);
    }

    #[test]
    fn parallel_group_checks_ids() {
        let mut p = plan(vec![subtask(1, &[]), subtask(2, &[])]);
        assert!(p.parallel_group().unwrap().is_empty());
        p.parallelizable = Some(vec![1, 2]);
        assert_eq!(p.parallel_group().unwrap(), [1, 2]);
        p.parallelizable = Some(vec![1, 5]);
        assert_eq!(p.parallel_group(), Err(PlanError::UnknownParallel(5)));
    }

    #[test]
    fn plan_error_converts_to_prism_error() {
        let err: PrismError = PlanError::Cycle(4).into();
        assert!(err.to_string().contains("cycle through subtask 4"));
    }
}
