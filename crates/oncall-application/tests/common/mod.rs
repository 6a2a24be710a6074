//! Hand-written collaborators shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use oncall_core::ServiceError;
use oncall_core::analysis::{Analysis, AnalysisService};
use oncall_core::ticket::{Ticket, TicketFile, TicketService};
use oncall_core::upload::UploadedFile;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

pub fn ticket(key: &str, description: &str) -> Ticket {
    Ticket {
        key: key.to_string(),
        description: description.to_string(),
        log_files: vec![TicketFile::new("dummy_log.txt", "text/plain", b"log".to_vec())],
        attachments: Vec::new(),
    }
}

pub fn log_file(name: &str) -> UploadedFile {
    UploadedFile::new(name, "text/plain", format!("contents of {name}").into_bytes())
}

pub fn attachment(name: &str) -> UploadedFile {
    UploadedFile::new(name, "image/png", vec![0x89, 0x50, 0x4e, 0x47])
}

/// Ticket service with per-key failures, gates and delays.
#[derive(Default)]
pub struct ScriptedTicketService {
    calls: AtomicUsize,
    failures: Mutex<HashMap<String, ServiceError>>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    entered: Mutex<HashMap<String, Arc<Notify>>>,
    delays: Mutex<HashMap<String, Duration>>,
    uppercase_keys: AtomicBool,
}

impl ScriptedTicketService {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail(&self, key: &str, error: ServiceError) {
        self.failures.lock().unwrap().insert(key.to_string(), error);
    }

    /// Blocks fetches of `key` until the returned gate is notified.
    /// The second handle fires once the fetch has reached the service.
    pub fn gate(&self, key: &str) -> (Arc<Notify>, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let entered = Arc::new(Notify::new());
        self.gates.lock().unwrap().insert(key.to_string(), gate.clone());
        self.entered
            .lock()
            .unwrap()
            .insert(key.to_string(), entered.clone());
        (gate, entered)
    }

    /// Answers with the key upper-cased, like trackers that normalize keys.
    pub fn uppercase_keys(&self) {
        self.uppercase_keys.store(true, Ordering::SeqCst);
    }

    pub fn delay(&self, key: &str, delay: Duration) {
        self.delays.lock().unwrap().insert(key.to_string(), delay);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TicketService for ScriptedTicketService {
    async fn get_ticket(&self, key: &str) -> Result<Ticket, ServiceError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;

        let entered = self.entered.lock().unwrap().get(key).cloned();
        if let Some(entered) = entered {
            entered.notify_one();
        }
        let gate = self.gates.lock().unwrap().get(key).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        let delay = self.delays.lock().unwrap().get(key).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(error) = self.failures.lock().unwrap().get(key).cloned() {
            return Err(error);
        }
        let description = format!("Description for {key} (fetch {n})");
        if self.uppercase_keys.load(Ordering::SeqCst) {
            return Ok(ticket(&key.to_uppercase(), &description));
        }
        Ok(ticket(key, &description))
    }
}

/// Analysis service that replays queued outcomes, then falls back to a
/// numbered default.
#[derive(Default)]
pub struct ScriptedAnalysisService {
    calls: AtomicUsize,
    queued: Mutex<VecDeque<Result<Analysis, ServiceError>>>,
    last_input: Mutex<Option<(String, Vec<String>, Vec<String>)>>,
    gates: Mutex<VecDeque<(Arc<Notify>, Arc<Notify>)>>,
}

impl ScriptedAnalysisService {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push(&self, outcome: Result<Analysis, ServiceError>) {
        self.queued.lock().unwrap().push_back(outcome);
    }

    /// Blocks the next analysis call until the returned gate is notified.
    /// The second handle fires once that call has reached the service.
    pub fn gate_next(&self) -> (Arc<Notify>, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let entered = Arc::new(Notify::new());
        self.gates
            .lock()
            .unwrap()
            .push_back((gate.clone(), entered.clone()));
        (gate, entered)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// (ticket key, log names, attachment names) of the last call.
    pub fn last_input(&self) -> Option<(String, Vec<String>, Vec<String>)> {
        self.last_input.lock().unwrap().clone()
    }
}

pub fn analysis(tag: &str) -> Analysis {
    Analysis {
        summary: format!("Summary {tag}"),
        root_cause: format!("Root cause {tag}"),
        solution: format!("Solution {tag}"),
    }
}

#[async_trait]
impl AnalysisService for ScriptedAnalysisService {
    async fn analyze(
        &self,
        ticket: &Ticket,
        logs: &[UploadedFile],
        attachments: &[UploadedFile],
    ) -> Result<Analysis, ServiceError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        *self.last_input.lock().unwrap() = Some((
            ticket.key.clone(),
            logs.iter().map(|f| f.name.clone()).collect(),
            attachments.iter().map(|f| f.name.clone()).collect(),
        ));

        let gate = self.gates.lock().unwrap().pop_front();
        if let Some((gate, entered)) = gate {
            entered.notify_one();
            gate.notified().await;
        }

        if let Some(outcome) = self.queued.lock().unwrap().pop_front() {
            return outcome;
        }
        Ok(analysis(&format!("#{n}")))
    }
}
