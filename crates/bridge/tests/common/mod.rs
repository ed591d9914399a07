//! In-memory collaborators and a recording logger for bridge tests.

#![allow(dead_code)]

use anyhow::{anyhow, Result};
use bytes::Bytes;
use kafka_to_sqs_bridge::{
    CollaboratorFactory, Logger, Options, ProducerSettings, QueueProducer, StreamConsumer,
    StreamHandler,
};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{mpsc, Notify};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Error,
}

#[derive(Default)]
pub struct RecordingLogger {
    entries: Mutex<Vec<(Level, String)>>,
}

impl RecordingLogger {
    pub fn entries(&self, level: Level) -> Vec<String> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    fn push(&self, level: Level, args: fmt::Arguments<'_>) {
        self.entries.lock().unwrap().push((level, args.to_string()));
    }
}

impl Logger for RecordingLogger {
    fn info(&self, args: fmt::Arguments<'_>) {
        self.push(Level::Info, args);
    }

    fn warn(&self, args: fmt::Arguments<'_>) {
        self.push(Level::Warn, args);
    }

    fn error(&self, args: fmt::Arguments<'_>) {
        self.push(Level::Error, args);
    }
}

/// How a collaborator's start operation behaves.
#[derive(Clone)]
pub enum Step {
    Succeed,
    Fail(&'static str),
    /// Succeed once the notify fires.
    WaitFor(Arc<Notify>),
}

impl Step {
    async fn run(&self) -> Result<()> {
        match self {
            Step::Succeed => Ok(()),
            Step::Fail(msg) => Err(anyhow!(*msg)),
            Step::WaitFor(gate) => {
                gate.notified().await;
                Ok(())
            }
        }
    }
}

/// Everything the mocks observed.
#[derive(Default)]
pub struct Probe {
    pub consumers_built: AtomicUsize,
    pub producers_built: AtomicUsize,
    pub connect_calls: AtomicUsize,
    pub init_calls: AtomicUsize,
    pub disconnects: AtomicUsize,
    pub create_job_calls: AtomicUsize,
    pub consumer_topic: Mutex<Option<String>>,
    pub consumer_group: Mutex<Option<String>>,
    pub producer_settings: Mutex<Option<ProducerSettings>>,
    pub handler: Mutex<Option<Arc<dyn StreamHandler>>>,
}

impl Probe {
    pub fn handler(&self) -> Arc<dyn StreamHandler> {
        self.handler
            .lock()
            .unwrap()
            .clone()
            .expect("consumer was never connected")
    }

    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

pub struct MockConsumer {
    probe: Arc<Probe>,
    connect: Step,
}

#[async_trait::async_trait]
impl StreamConsumer for MockConsumer {
    async fn connect(&self, consumer_group: &str, handler: Arc<dyn StreamHandler>) -> Result<()> {
        self.probe.connect_calls.fetch_add(1, Ordering::SeqCst);
        *self.probe.consumer_group.lock().unwrap() = Some(consumer_group.to_string());
        *self.probe.handler.lock().unwrap() = Some(handler);
        self.connect.run().await
    }

    async fn disconnect(&self) {
        self.probe.disconnects.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct MockProducer {
    probe: Arc<Probe>,
    init: Step,
    fail_on: Option<Bytes>,
    hang_jobs: bool,
    jobs: mpsc::UnboundedSender<Bytes>,
}

#[async_trait::async_trait]
impl QueueProducer for MockProducer {
    async fn init(&self) -> Result<()> {
        self.probe.init_calls.fetch_add(1, Ordering::SeqCst);
        self.init.run().await
    }

    async fn create_job(&self, payload: Bytes) -> Result<()> {
        self.probe.create_job_calls.fetch_add(1, Ordering::SeqCst);
        if self.hang_jobs {
            std::future::pending::<()>().await;
        }
        if self.fail_on.as_ref() == Some(&payload) {
            return Err(anyhow!("queue rejected job"));
        }
        let _ = self.jobs.send(payload);
        Ok(())
    }
}

pub struct MockFactory {
    pub probe: Arc<Probe>,
    pub connect: Step,
    pub init: Step,
    pub fail_on: Option<Bytes>,
    /// Make every `create_job` wait forever.
    pub hang_jobs: bool,
    jobs: mpsc::UnboundedSender<Bytes>,
}

impl MockFactory {
    /// Factory whose collaborators start successfully, plus the receiving end
    /// of every job they create.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Bytes>) {
        let (jobs, rx) = mpsc::unbounded_channel();
        let factory = Self {
            probe: Arc::new(Probe::default()),
            connect: Step::Succeed,
            init: Step::Succeed,
            fail_on: None,
            hang_jobs: false,
            jobs,
        };
        (factory, rx)
    }
}

impl CollaboratorFactory for MockFactory {
    type Consumer = MockConsumer;
    type Producer = MockProducer;

    fn consumer(&self, topic: &str, _log: Arc<dyn Logger>) -> Result<MockConsumer> {
        self.probe.consumers_built.fetch_add(1, Ordering::SeqCst);
        *self.probe.consumer_topic.lock().unwrap() = Some(topic.to_string());
        Ok(MockConsumer {
            probe: Arc::clone(&self.probe),
            connect: self.connect.clone(),
        })
    }

    fn producer(&self, settings: ProducerSettings) -> Result<MockProducer> {
        self.probe.producers_built.fetch_add(1, Ordering::SeqCst);
        *self.probe.producer_settings.lock().unwrap() = Some(settings);
        Ok(MockProducer {
            probe: Arc::clone(&self.probe),
            init: self.init.clone(),
            fail_on: self.fail_on.clone(),
            hang_jobs: self.hang_jobs,
            jobs: self.jobs.clone(),
        })
    }
}

pub fn orders_options(log: Arc<RecordingLogger>) -> Options {
    Options {
        topic: Some("orders".to_string()),
        log: Some(log),
        consumer_group: Some("g1".to_string()),
        sqs_url: Some("queue://orders".to_string()),
    }
}

/// Poll `cond` until it holds or a second has passed.
pub async fn eventually(cond: impl Fn() -> bool) -> bool {
    for _ in 0..200 {
        if cond() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    cond()
}

pub async fn next_job(rx: &mut mpsc::UnboundedReceiver<Bytes>) -> Option<Bytes> {
    tokio::time::timeout(Duration::from_secs(1), rx.recv())
        .await
        .ok()
        .flatten()
}
