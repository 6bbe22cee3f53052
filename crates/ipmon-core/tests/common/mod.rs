//! Test doubles and common utilities for reconciliation contract tests
//!
//! All doubles share their counters through `Arc`, so tests keep a clone and
//! inspect calls after handing the double to the reconciler. A shared
//! [`CallLog`] records the cross-component call order (publish vs write).

use async_trait::async_trait;
use ipmon_core::config::RecordRef;
use ipmon_core::error::{Error, Result};
use ipmon_core::ip::IpAddress;
use ipmon_core::traits::{EventSink, IpProbe, ReconcileEvent, RecordStore};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Shared log of cross-component calls, in invocation order
pub type CallLog = Arc<Mutex<Vec<&'static str>>>;

/// Create an empty call log
pub fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// A probe that returns a scripted result
#[derive(Clone)]
pub struct ScriptedProbe {
    /// IP to return; `None` makes every call fail
    result: Option<IpAddress>,
    /// Call counter for current()
    call_count: Arc<AtomicUsize>,
}

impl ScriptedProbe {
    /// Probe that always returns the given address
    pub fn returning(ip: &str) -> Self {
        Self {
            result: Some(IpAddress::new(ip)),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Probe that always fails (simulated timeout)
    pub fn failing() -> Self {
        Self {
            result: None,
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of times current() was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IpProbe for ScriptedProbe {
    async fn current(&self) -> Result<IpAddress> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        match &self.result {
            Some(ip) => Ok(ip.clone()),
            None => Err(Error::probe("simulated probe timeout")),
        }
    }

    fn probe_name(&self) -> &'static str {
        "scripted"
    }
}

/// A record store that serves a scripted record and records writes
#[derive(Clone)]
pub struct MockStore {
    /// Record content to serve; `None` makes reads fail
    content: Option<IpAddress>,
    /// When true, writes fail
    fail_writes: bool,
    /// Call counter for read()
    read_count: Arc<AtomicUsize>,
    /// Addresses passed to write(), in order
    writes: Arc<Mutex<Vec<IpAddress>>>,
    /// Shared call-order log
    log: CallLog,
}

impl MockStore {
    /// Store whose record holds the given address
    pub fn holding(ip: &str, log: CallLog) -> Self {
        Self {
            content: Some(IpAddress::new(ip)),
            fail_writes: false,
            read_count: Arc::new(AtomicUsize::new(0)),
            writes: Arc::new(Mutex::new(Vec::new())),
            log,
        }
    }

    /// Store whose reads always fail
    pub fn unreadable(log: CallLog) -> Self {
        Self {
            content: None,
            fail_writes: false,
            read_count: Arc::new(AtomicUsize::new(0)),
            writes: Arc::new(Mutex::new(Vec::new())),
            log,
        }
    }

    /// Make subsequent writes fail
    pub fn with_failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Number of times read() was called
    pub fn read_count(&self) -> usize {
        self.read_count.load(Ordering::SeqCst)
    }

    /// Addresses passed to write(), in order (failed attempts included)
    pub fn writes(&self) -> Vec<IpAddress> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecordStore for MockStore {
    async fn read(&self, _record: &RecordRef) -> Result<IpAddress> {
        self.read_count.fetch_add(1, Ordering::SeqCst);
        match &self.content {
            Some(ip) => Ok(ip.clone()),
            None => Err(Error::record_read("simulated read failure")),
        }
    }

    async fn write(&self, _record: &RecordRef, new_ip: &IpAddress) -> Result<()> {
        self.log.lock().unwrap().push("write");
        self.writes.lock().unwrap().push(new_ip.clone());
        if self.fail_writes {
            Err(Error::record_write("simulated write failure"))
        } else {
            Ok(())
        }
    }

    fn store_name(&self) -> &'static str {
        "mock"
    }
}

/// A sink that records published events
#[derive(Clone)]
pub struct RecordingSink {
    /// When true, publishes fail after being recorded
    fail: bool,
    /// Events passed to publish(), in order
    events: Arc<Mutex<Vec<ReconcileEvent>>>,
    /// Shared call-order log
    log: CallLog,
}

impl RecordingSink {
    /// Sink that accepts every publish
    pub fn new(log: CallLog) -> Self {
        Self {
            fail: false,
            events: Arc::new(Mutex::new(Vec::new())),
            log,
        }
    }

    /// Sink whose publishes fail (after being recorded)
    pub fn failing(log: CallLog) -> Self {
        Self {
            fail: true,
            events: Arc::new(Mutex::new(Vec::new())),
            log,
        }
    }

    /// Events passed to publish(), in order
    pub fn events(&self) -> Vec<ReconcileEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventSink for RecordingSink {
    async fn publish(&self, event: &ReconcileEvent) -> Result<()> {
        self.log.lock().unwrap().push("publish");
        self.events.lock().unwrap().push(event.clone());
        if self.fail {
            Err(Error::notify("simulated webhook failure"))
        } else {
            Ok(())
        }
    }

    fn sink_name(&self) -> &'static str {
        "recording"
    }
}

/// The record reference used throughout the contract tests
pub fn test_record() -> RecordRef {
    RecordRef::new("zone123", "rec456", "home.example.com")
}
