//! Exact raid planning on forests.
//!
//! Each component is rooted and walked once, leaves first. For every node we
//! compute the best gold for its subtree under two entry contexts: the node
//! is not yet alerted when its subtree starts, or its parent has already
//! alerted it.
//!
//! A child subtree is placed either wholly before its parent or wholly after
//! it. Before: the child is entered unalerted, and unless it is a shield it
//! alerts the parent. After: the child is entered alerted, unless the parent
//! is a shield. Across all 2^k placements of k children only one fact about
//! the before-group matters to the parent, namely whether it alerts the
//! parent, so the fold over children keeps just two running states.
//!
//! Orderings are never copied per state. Each node remembers which side every
//! child went to for each entry context; the ordering is assembled in a
//! single pass at the end. Traversal and assembly both run on explicit
//! stacks, so path-like components of any length are safe.
//!
//! Ties are resolved deterministically: fold states are expanded in the
//! order (not alerted, alerted), the before-placement candidate ahead of the
//! after-placement one, and a candidate replaces the held one only when it
//! is strictly better. The final outcome also prefers "not alerted" on ties.

use rayon::prelude::*;

use super::{RaidPlan, RaidStrategy, SearchError, SolverConfig};
use crate::graph::{FortFlags, FortGraph, Gold};

/// Entry context: subtree root not yet alerted by its parent.
const UNALERTED: usize = 0;
/// Entry context: subtree root already alerted by its parent.
const ALERTED: usize = 1;

/// Which side of its parent a child subtree is attacked on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Placement {
    #[default]
    Before,
    After,
}

/// Back-pointer for one fold state after one child.
#[derive(Debug, Clone, Copy, Default)]
struct Step {
    /// Fold state this one was extended from.
    from: bool,
    placement: Placement,
}

/// Per-node result for both entry contexts.
#[derive(Debug, Clone, Default)]
struct NodeRecord {
    gold: [Gold; 2],
    placements: [Vec<Placement>; 2],
}

/// One component rooted at `nodes[0]`.
///
/// Local indices are assigned in discovery order, so every child has a
/// larger local index than its parent.
#[derive(Debug)]
struct RootedTree {
    nodes: Vec<usize>,
    children: Vec<Vec<usize>>,
}

/// Best ordering of a single component, as fort ids.
struct ComponentPlan {
    order: Vec<usize>,
    gold: Gold,
}

/// Dynamic-programming strategy, optimal on acyclic graphs.
#[derive(Debug, Clone, Default)]
pub struct TreeDp {
    config: SolverConfig,
}

impl TreeDp {
    pub fn new() -> Self {
        TreeDp::default()
    }

    pub fn with_config(config: SolverConfig) -> Self {
        TreeDp { config }
    }

    /// Solves every component, rooting each at its first fort in insertion order.
    pub fn solve(&self, graph: &FortGraph) -> Result<RaidPlan, SearchError> {
        self.solve_with_roots::<&str>(graph, &[])
    }

    /// Solves every component, rooting each at the first of `roots` inside it,
    /// or at its first fort in insertion order when none is given.
    ///
    /// Components appear in the ordering in the order their roots were chosen.
    pub fn solve_with_roots<S: AsRef<str>>(
        &self,
        graph: &FortGraph,
        roots: &[S],
    ) -> Result<RaidPlan, SearchError> {
        let trees = root_components(graph, roots)?;

        let plans: Vec<ComponentPlan> = if self.config.threads > 1 && trees.len() > 1 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.config.threads)
                .build()?;
            pool.install(|| {
                trees
                    .par_iter()
                    .map(|t| solve_tree(graph, t))
                    .collect::<Vec<_>>()
            })
        } else {
            trees.iter().map(|t| solve_tree(graph, t)).collect()
        };

        let mut order = Vec::with_capacity(graph.len());
        let mut gold = Gold::ZERO;
        for plan in plans {
            gold += plan.gold;
            order.extend(plan.order.into_iter().map(|id| graph.fort_at(id).label.clone()));
        }

        tracing::debug!(
            forts = graph.len(),
            components = trees.len(),
            threads = self.config.threads,
            %gold,
            "tree dp solved"
        );
        Ok(RaidPlan { order, gold })
    }
}

impl RaidStrategy for TreeDp {
    fn name(&self) -> &'static str {
        "tree-dp"
    }

    fn choose_order(&mut self, graph: &FortGraph) -> Result<Vec<String>, SearchError> {
        Ok(self.solve(graph)?.order)
    }
}

/// Entry context of a child attacked after a parent with `flags`.
fn after_context(parent: FortFlags) -> usize {
    if parent.shield {
        UNALERTED
    } else {
        ALERTED
    }
}

/// Splits the graph into rooted components, failing on any cycle.
fn root_components<S: AsRef<str>>(
    graph: &FortGraph,
    roots: &[S],
) -> Result<Vec<RootedTree>, SearchError> {
    let mut starts = Vec::with_capacity(roots.len() + graph.len());
    for root in roots {
        let root = root.as_ref();
        let id = graph
            .id_of(root)
            .ok_or_else(|| SearchError::UnknownRoot(root.to_string()))?;
        starts.push(id);
    }
    starts.extend(0..graph.len());

    let mut visited = vec![false; graph.len()];
    let mut trees = Vec::new();
    for start in starts {
        if !visited[start] {
            trees.push(grow_tree(graph, start, &mut visited)?);
        }
    }
    Ok(trees)
}

fn grow_tree(
    graph: &FortGraph,
    root: usize,
    visited: &mut [bool],
) -> Result<RootedTree, SearchError> {
    let mut nodes = vec![root];
    let mut parents: Vec<Option<usize>> = vec![None];
    let mut children: Vec<Vec<usize>> = vec![Vec::new()];
    visited[root] = true;

    let mut stack = vec![0];
    while let Some(local) = stack.pop() {
        let id = nodes[local];
        let parent_id = parents[local].map(|p| nodes[p]);
        for &next in graph.adjacent_ids(id) {
            if Some(next) == parent_id {
                continue;
            }
            // In a tree every other neighbour is still undiscovered here.
            if visited[next] {
                return Err(SearchError::NotATree {
                    fort: graph.fort_at(next).label.clone(),
                });
            }
            visited[next] = true;
            let child = nodes.len();
            nodes.push(next);
            parents.push(Some(local));
            children.push(Vec::new());
            children[local].push(child);
            stack.push(child);
        }
    }
    Ok(RootedTree { nodes, children })
}

fn solve_tree(graph: &FortGraph, tree: &RootedTree) -> ComponentPlan {
    let mut records = vec![NodeRecord::default(); tree.nodes.len()];
    for local in (0..tree.nodes.len()).rev() {
        let record = solve_node(graph, tree, local, &records);
        records[local] = record;
    }
    let gold = records[0].gold[UNALERTED];
    ComponentPlan {
        order: assemble(graph, tree, &records),
        gold,
    }
}

/// Folds a node's children into the two running states, then resolves both
/// entry contexts.
fn solve_node(
    graph: &FortGraph,
    tree: &RootedTree,
    local: usize,
    records: &[NodeRecord],
) -> NodeRecord {
    let fort = graph.fort_at(tree.nodes[local]);
    let kids = &tree.children[local];
    let late = after_context(fort.flags);

    // Indexed by "a before-child alerts this node". Placing a child after
    // never changes the index, so the unalerted state stays reachable.
    let mut best: [Option<Gold>; 2] = [Some(Gold::ZERO), None];
    let mut trail: Vec<[Step; 2]> = Vec::with_capacity(kids.len());

    for &child in kids {
        let child_shield = graph.fort_at(tree.nodes[child]).flags.shield;
        let early_gold = records[child].gold[UNALERTED];
        let late_gold = records[child].gold[late];

        let mut next: [Option<Gold>; 2] = [None, None];
        let mut steps = [Step::default(); 2];
        for from in [false, true] {
            let Some(sofar) = best[from as usize] else {
                continue;
            };
            let candidates = [
                (Placement::Before, from || !child_shield, sofar + early_gold),
                (Placement::After, from, sofar + late_gold),
            ];
            for (placement, to, gold) in candidates {
                let slot = to as usize;
                if next[slot].map_or(true, |held| gold > held) {
                    next[slot] = Some(gold);
                    steps[slot] = Step { from, placement };
                }
            }
        }
        best = next;
        trail.push(steps);
    }

    let mut record = NodeRecord::default();
    for entered in [UNALERTED, ALERTED] {
        let mut chosen: Option<(Gold, bool)> = None;
        for outcome in [false, true] {
            let Some(kids_gold) = best[outcome as usize] else {
                continue;
            };
            let alerted = entered == ALERTED || fort.flags.self_alert || outcome;
            let total = kids_gold + Gold::collected(fort.value, alerted, fort.flags.immune);
            if chosen.map_or(true, |(held, _)| total > held) {
                chosen = Some((total, outcome));
            }
        }
        if let Some((total, outcome)) = chosen {
            record.gold[entered] = total;
            record.placements[entered] = backtrack(&trail, outcome);
        }
    }
    record
}

/// Recovers each child's placement from the fold trail, ending in `outcome`.
fn backtrack(trail: &[[Step; 2]], mut outcome: bool) -> Vec<Placement> {
    let mut placements = vec![Placement::Before; trail.len()];
    for (i, steps) in trail.iter().enumerate().rev() {
        let step = steps[outcome as usize];
        placements[i] = step.placement;
        outcome = step.from;
    }
    placements
}

enum Task {
    Expand { local: usize, context: usize },
    Emit(usize),
}

/// Builds the component ordering: before-children, the node, after-children.
fn assemble(graph: &FortGraph, tree: &RootedTree, records: &[NodeRecord]) -> Vec<usize> {
    let mut order = Vec::with_capacity(tree.nodes.len());
    let mut stack = vec![Task::Expand {
        local: 0,
        context: UNALERTED,
    }];

    while let Some(task) = stack.pop() {
        match task {
            Task::Emit(local) => order.push(tree.nodes[local]),
            Task::Expand { local, context } => {
                let kids = &tree.children[local];
                let placements = &records[local].placements[context];
                let late = after_context(graph.fort_at(tree.nodes[local]).flags);

                // Pushed in reverse so they pop in attack order.
                for (&child, &placement) in kids.iter().zip(placements).rev() {
                    if placement == Placement::After {
                        stack.push(Task::Expand {
                            local: child,
                            context: late,
                        });
                    }
                }
                stack.push(Task::Emit(local));
                for (&child, &placement) in kids.iter().zip(placements).rev() {
                    if placement == Placement::Before {
                        stack.push(Task::Expand {
                            local: child,
                            context: UNALERTED,
                        });
                    }
                }
            }
        }
    }
    order
}
