//! Background synthesis with last-request-wins delivery.
//!
//! Rendering an 8-second ambient loop takes long enough to stall the input
//! loop, so banks are built on a worker thread. Every request gets a ticket;
//! only the bank matching the newest ticket is ever handed back.

use super::bank::SoundBank;
use super::AudioError;
use crate::tier::Tier;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

struct Request {
    ticket: u64,
    tier: Tier,
    seed: u64,
}

struct Completed {
    ticket: u64,
    bank: Result<SoundBank, AudioError>,
}

/// Owns the synthesis thread and filters out stale results.
pub struct SynthesisWorker {
    requests: Option<Sender<Request>>,
    results: Receiver<Completed>,
    latest: u64,
    handle: Option<JoinHandle<()>>,
}

impl SynthesisWorker {
    pub fn spawn() -> Self {
        let (request_tx, request_rx) = mpsc::channel::<Request>();
        let (result_tx, result_rx) = mpsc::channel::<Completed>();

        let handle = thread::Builder::new()
            .name("synthesis".into())
            .spawn(move || run(request_rx, result_tx))
            .map_err(|e| tracing::error!("Failed to start synthesis thread: {}", e))
            .ok();

        Self {
            requests: handle.as_ref().map(|_| request_tx),
            results: result_rx,
            latest: 0,
            handle,
        }
    }

    /// Queues a bank for `tier` and returns its ticket. Any bank still
    /// pending from an earlier request becomes stale.
    pub fn request(&mut self, tier: Tier, seed: u64) -> u64 {
        self.latest += 1;
        let ticket = self.latest;
        let sent = self
            .requests
            .as_ref()
            .is_some_and(|tx| tx.send(Request { ticket, tier, seed }).is_ok());
        if !sent {
            tracing::warn!("Synthesis thread unavailable; {} audio skipped", tier);
        }
        ticket
    }

    /// Ticket of the most recent request (0 before any request).
    pub fn latest_ticket(&self) -> u64 {
        self.latest
    }

    /// Returns the bank for the latest request if it has finished.
    pub fn poll(&mut self) -> Option<Result<SoundBank, AudioError>> {
        let mut fresh = None;
        while let Ok(done) = self.results.try_recv() {
            if let Some(bank) = self.accept(done) {
                fresh = Some(bank);
            }
        }
        fresh
    }

    /// Blocks up to `timeout` for the latest request's bank.
    pub fn wait_latest(&mut self, timeout: Duration) -> Option<Result<SoundBank, AudioError>> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.results.recv_timeout(remaining) {
                Ok(done) => {
                    if let Some(bank) = self.accept(done) {
                        return Some(bank);
                    }
                }
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                    return None
                }
            }
        }
    }

    fn accept(&self, done: Completed) -> Option<Result<SoundBank, AudioError>> {
        if done.ticket == self.latest {
            Some(done.bank)
        } else {
            tracing::debug!(
                ticket = done.ticket,
                latest = self.latest,
                "discarding stale sound bank"
            );
            None
        }
    }
}

impl Drop for SynthesisWorker {
    fn drop(&mut self) {
        // Closing the channel ends the worker loop
        self.requests.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn run(requests: Receiver<Request>, results: Sender<Completed>) {
    while let Ok(mut request) = requests.recv() {
        // Skip anything superseded while we were busy
        while let Ok(newer) = requests.try_recv() {
            request = newer;
        }

        let bank = SoundBank::synthesize(request.tier, request.seed);
        if results
            .send(Completed {
                ticket: request.ticket,
                bank,
            })
            .is_err()
        {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WAIT: Duration = Duration::from_secs(60);

    #[test]
    fn test_single_request_completes() {
        let mut worker = SynthesisWorker::spawn();
        let ticket = worker.request(Tier::One, 5);
        assert_eq!(ticket, 1);
        let bank = worker.wait_latest(WAIT).unwrap().unwrap();
        assert_eq!(bank.tier(), Tier::One);
        assert_eq!(bank, SoundBank::synthesize(Tier::One, 5).unwrap());
    }

    #[test]
    fn test_last_request_wins() {
        let mut worker = SynthesisWorker::spawn();
        worker.request(Tier::One, 1);
        worker.request(Tier::Two, 2);
        let latest = worker.request(Tier::Three, 3);
        assert_eq!(worker.latest_ticket(), latest);

        let bank = worker.wait_latest(WAIT).unwrap().unwrap();
        assert_eq!(bank.tier(), Tier::Three);
        // Nothing older shows up afterwards
        assert!(worker.poll().is_none());
    }

    #[test]
    fn test_poll_before_anything_finishes() {
        let mut worker = SynthesisWorker::spawn();
        assert!(worker.poll().is_none());
        assert_eq!(worker.latest_ticket(), 0);
    }

    #[test]
    fn test_finished_bank_is_dropped_after_newer_request() {
        let mut worker = SynthesisWorker::spawn();
        worker.request(Tier::One, 1);
        // Let the first bank finish before anything supersedes it
        let finished = worker.results.recv_timeout(WAIT).unwrap();
        assert_eq!(finished.ticket, 1);

        let latest = worker.request(Tier::Three, 3);
        assert_eq!(latest, 2);
        assert!(worker.accept(finished).is_none());

        let bank = worker.wait_latest(WAIT).unwrap().unwrap();
        assert_eq!(bank.tier(), Tier::Three);
        assert!(worker.poll().is_none());
    }

    #[test]
    fn test_poll_skips_stale_results() {
        let mut worker = SynthesisWorker::spawn();
        worker.request(Tier::One, 1);
        worker.request(Tier::Two, 2);

        // Both results already queued, older one first
        let (tx, rx) = mpsc::channel();
        worker.results = rx;
        tx.send(Completed {
            ticket: 1,
            bank: SoundBank::synthesize(Tier::One, 1),
        })
        .unwrap();
        tx.send(Completed {
            ticket: 2,
            bank: SoundBank::synthesize(Tier::Two, 2),
        })
        .unwrap();

        let bank = worker.poll().unwrap().unwrap();
        assert_eq!(bank.tier(), Tier::Two);
        assert!(worker.poll().is_none());

        // A late stale result on its own yields nothing
        tx.send(Completed {
            ticket: 1,
            bank: SoundBank::synthesize(Tier::One, 1),
        })
        .unwrap();
        assert!(worker.poll().is_none());
    }
}
