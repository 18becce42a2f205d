//! Task scheduler (C5): a FIFO of "advance one node one stage" tasks, global
//! stop flags, and deadline enforcement (§4.5, §5).
//!
//! The spec's singly-linked FIFO with a `next` pointer is a `VecDeque` here —
//! same queue discipline, no reason to hand-roll a linked list the teacher
//! never needed either.

use std::collections::VecDeque;
use std::time::Instant;
use tracing::{debug, debug_span};

use crate::error::Result;
use crate::node::NodeRef;
use crate::params::{DecompositionParameters, Statistics};
use crate::stages;

/// Early-exit flags, checked at every dequeue (§4.5).
#[derive(Debug, Clone, Copy, Default)]
pub struct StopFlags {
    pub found_irregularity: bool,
    pub found_nongraphicness: bool,
    pub found_noncographicness: bool,
    pub found_neither_graphic_nor_cographic: bool,
}

impl StopFlags {
    fn should_stop(&self, params: &DecompositionParameters) -> bool {
        (params.stop_when_irregular && self.found_irregularity)
            || (params.stop_when_nongraphic && self.found_nongraphicness)
            || (params.stop_when_noncographic && self.found_noncographicness)
            || (params.stop_when_neither_graphic_nor_cographic
                && self.found_neither_graphic_nor_cographic)
    }
}

struct Task {
    node: NodeRef,
    start_time: Instant,
}

/// Drives a decomposition to completion (or until a stop flag / deadline
/// fires), then runs `set-attributes` over whatever tree resulted so partial
/// results are still returned (§5: "the partial tree is still walked").
pub struct Scheduler {
    queue: VecDeque<Task>,
    params: DecompositionParameters,
    stats: Statistics,
    flags: StopFlags,
}

impl Scheduler {
    pub fn new(params: DecompositionParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            queue: VecDeque::new(),
            params,
            stats: Statistics::default(),
            flags: StopFlags::default(),
        })
    }

    pub fn enqueue(&mut self, node: NodeRef) {
        self.queue.push_back(Task {
            node,
            start_time: Instant::now(),
        });
    }

    pub fn statistics(&self) -> Statistics {
        self.stats
    }

    /// Runs the root to completion, returning it with its tree fully decided
    /// (subject to stop flags/deadline).
    pub fn run(&mut self, root: NodeRef) -> Result<NodeRef> {
        let span = debug_span!("decompose");
        let _guard = span.enter();
        self.enqueue(root.clone());
        while let Some(task) = self.queue.pop_front() {
            if self.flags.should_stop(&self.params) {
                debug!("stop flag set, draining remaining tasks");
                break;
            }
            if let Some(deadline) = self.params.deadline {
                if task.start_time.elapsed() > deadline {
                    debug!("deadline exceeded, stopping cleanly");
                    break;
                }
            }
            self.dispatch(task.node)?;
        }
        crate::node::Node::set_attributes(&root);
        Ok(root)
    }

    /// Dispatches on the node's progress flags in the fixed order of §4.5.
    fn dispatch(&mut self, node: NodeRef) -> Result<()> {
        use crate::node::{NodeType, TriState};

        let (tested_two_connected, node_type) = {
            let n = node.borrow();
            (n.progress.tested_two_connected, n.node_type)
        };
        if node_type != NodeType::Unknown {
            // Already resolved to a leaf/sum elsewhere (e.g. a violator found
            // inline); nothing further to schedule.
            return Ok(());
        }

        if node.borrow().matrix.num_rows() == 0 && node.borrow().matrix.num_columns() == 0 {
            let mut n = node.borrow_mut();
            n.node_type = NodeType::Planar;
            n.regularity = TriState::Yes;
            n.graphicness = TriState::Yes;
            n.cographicness = TriState::Yes;
            n.progress.tested_two_connected = true;
            return Ok(());
        }

        if !tested_two_connected {
            self.stats.one_sum_calls += 1;
            let outcome = stages::one_sum::run(&node)?;
            if !outcome.children.is_empty() {
                // Split into a 1-sum: this node is now an internal OneSum
                // node, its children are the remaining work.
                for child in outcome.children {
                    self.enqueue(child);
                }
                return Ok(());
            }
            // Already a single connected component: fall through and keep
            // dispatching the later stages on this same node below.
        }

        let shortcut = {
            let n = node.borrow();
            self.params.direct_graphicness
                || n.matrix.num_rows() <= 3
                || n.matrix.num_columns() <= 3
        };
        // `direct_graphic` either resolves the node into a genuine Graph/Cograph
        // leaf (node_type leaves Unknown: stop dispatching this node) or just
        // commits a single negative attribute without settling the node type
        // (keep dispatching the later stages below).
        let graphicness_unknown = node.borrow().graphicness == TriState::Unknown;
        if graphicness_unknown && shortcut {
            self.stats.graphicness_calls += 1;
            if let Some(outcome) = stages::direct_graphic::run(&node, false)? {
                self.maybe_flag_after(&outcome);
            }
        }
        let cographicness_unknown = node.borrow().cographicness == TriState::Unknown;
        if cographicness_unknown && shortcut {
            self.stats.graphicness_calls += 1;
            if let Some(outcome) = stages::direct_graphic::run(&node, true)? {
                self.maybe_flag_after(&outcome);
            }
        }
        if node.borrow().node_type != NodeType::Unknown {
            return Ok(());
        }

        let tested_r10 = node.borrow().progress.tested_r10;
        if !tested_r10 {
            self.stats.one_sum_calls += 1;
            if stages::r10::run(&node)? {
                return Ok(());
            }
        }

        let tested_sp = node.borrow().progress.tested_series_parallel;
        if !tested_sp && self.params.series_parallel {
            self.stats.series_parallel_calls += 1;
            let outcome = stages::series_parallel::run(&node)?;
            for child in outcome.children {
                self.enqueue(child);
            }
            if outcome.settled {
                return Ok(());
            }
        } else if !tested_sp {
            node.borrow_mut().progress.tested_series_parallel = true;
        }

        let nested_open = node.borrow().nested.matrix.is_none();
        if nested_open {
            stages::nested_minors::run(&node)?;
        }

        let graphic_seq_unknown = node.borrow().progress.last_prefix_graphic.is_none();
        if graphic_seq_unknown {
            self.stats.graphic_test_calls += 1;
            stages::graphicness_sequence::run(&node, false)?;
        }
        let cographic_seq_unknown = node.borrow().progress.last_prefix_cographic.is_none();
        if cographic_seq_unknown {
            self.stats.graphic_test_calls += 1;
            stages::graphicness_sequence::run(&node, true)?;
        }

        self.stats.enumeration_calls += 1;
        let outcome = stages::three_separation::run(&node)?;
        for child in outcome.children {
            self.enqueue(child);
        }
        Ok(())
    }

    fn maybe_flag_after(&mut self, outcome: &stages::direct_graphic::Outcome) {
        if outcome.became_irregular {
            self.flags.found_irregularity = true;
        }
        if outcome.became_nongraphic {
            self.flags.found_nongraphicness = true;
        }
        if outcome.became_noncographic {
            self.flags.found_noncographicness = true;
        }
    }
}
