//! In-flight runs.
//!
//! Each dispatched run gets a ticket. A completion is only applied when its
//! ticket is still the latest one for that exercise; anything older is a
//! stale response and is dropped.

use std::collections::HashMap;
use std::sync::mpsc::{Receiver, Sender, channel};

use crate::model::ExecutionResult;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RunTicket {
    pub exercise_id: String,
    pub seq: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunCompletion {
    pub ticket: RunTicket,
    pub result: ExecutionResult,
}

#[derive(Debug, Default)]
pub struct RunTracker {
    next_seq: u64,
    latest: HashMap<String, u64>,
    in_flight: HashMap<String, u64>,
}

impl RunTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a ticket, or `None` while a run for the same exercise is out.
    pub fn dispatch(&mut self, exercise_id: &str) -> Option<RunTicket> {
        if self.is_running(exercise_id) {
            return None;
        }
        self.next_seq += 1;
        let seq = self.next_seq;
        self.latest.insert(exercise_id.to_string(), seq);
        self.in_flight.insert(exercise_id.to_string(), seq);
        Some(RunTicket {
            exercise_id: exercise_id.to_string(),
            seq,
        })
    }

    pub fn is_running(&self, exercise_id: &str) -> bool {
        self.in_flight.contains_key(exercise_id)
    }

    /// Settles a ticket. Returns `true` when the result should be displayed.
    pub fn complete(&mut self, ticket: &RunTicket) -> bool {
        if self.in_flight.get(&ticket.exercise_id) == Some(&ticket.seq) {
            self.in_flight.remove(&ticket.exercise_id);
        }
        self.latest.get(&ticket.exercise_id) == Some(&ticket.seq)
    }

    /// Forgets the outstanding run for `exercise_id`; its result will be dropped.
    pub fn supersede(&mut self, exercise_id: &str) {
        if self.in_flight.remove(exercise_id).is_some() {
            self.next_seq += 1;
            self.latest.insert(exercise_id.to_string(), self.next_seq);
        }
    }

    pub fn running_count(&self) -> usize {
        self.in_flight.len()
    }
}

/// Runs submissions off the UI thread and hands results back through a channel.
pub struct RunQueue {
    tx: Sender<RunCompletion>,
    rx: Receiver<RunCompletion>,
    #[cfg(not(target_arch = "wasm32"))]
    executor: std::sync::Arc<dyn crate::gateway::Executor>,
    #[cfg(target_arch = "wasm32")]
    gateway: crate::gateway::PistonGateway,
    repaint: Option<egui::Context>,
}

impl RunQueue {
    #[cfg(not(target_arch = "wasm32"))]
    pub fn new(executor: std::sync::Arc<dyn crate::gateway::Executor>) -> Self {
        let (tx, rx) = channel();
        Self {
            tx,
            rx,
            executor,
            repaint: None,
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn new(gateway: crate::gateway::PistonGateway) -> Self {
        let (tx, rx) = channel();
        Self {
            tx,
            rx,
            gateway,
            repaint: None,
        }
    }

    /// Context to wake when a result arrives.
    pub fn set_repaint(&mut self, ctx: egui::Context) {
        self.repaint = Some(ctx);
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn submit(&self, ticket: RunTicket, source: String) {
        let executor = std::sync::Arc::clone(&self.executor);
        let tx = self.tx.clone();
        let repaint = self.repaint.clone();
        log::debug!("dispatching run {} for '{}'", ticket.seq, ticket.exercise_id);

        std::thread::spawn(move || {
            let result = executor.execute(&source);
            let _ = tx.send(RunCompletion { ticket, result });
            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        });
    }

    #[cfg(target_arch = "wasm32")]
    pub fn submit(&self, ticket: RunTicket, source: String) {
        let gateway = self.gateway.clone();
        let tx = self.tx.clone();
        let repaint = self.repaint.clone();
        log::debug!("dispatching run {} for '{}'", ticket.seq, ticket.exercise_id);

        wasm_bindgen_futures::spawn_local(async move {
            let result = gateway.execute(&source).await;
            let _ = tx.send(RunCompletion { ticket, result });
            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        });
    }

    /// Drains every completion that has arrived so far.
    pub fn poll(&self) -> Vec<RunCompletion> {
        self.rx.try_iter().collect()
    }
}
