//! Round-robin dispatch with a credit window
//!
//! This is the message-passing counterpart of the bounded queue. Workers
//! share nothing with the dispatcher except two channels each: one carrying
//! chunks out, one carrying counts back. Sends never block; instead the
//! dispatcher keeps at most `window` chunks in flight, polling every result
//! slot without blocking once the window fills and refusing to issue a new
//! chunk until a credit comes back.
//!
//! After the last chunk the dispatcher drains every outstanding result and
//! only then sends one terminal message per worker.

use crate::{
    aggregator::ResultAggregator,
    error::{EngineError, Result},
};
use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::Duration;
use wordtally_core::{Chunk, PartialCounts, SourceId};

/// How long an unproductive poll pass waits on the oldest in-flight chunk
const POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Dispatcher to worker
#[derive(Debug)]
pub enum WorkMessage {
    /// A chunk to classify; ownership moves to the worker
    Chunk(Chunk),
    /// Terminal marker
    Terminate,
}

/// Worker to dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultMessage {
    /// Source the chunk belonged to
    pub source_id: SourceId,
    /// Counts for that chunk
    pub counts: PartialCounts,
}

/// Dispatcher end of a worker's channels
#[derive(Debug)]
pub struct WorkerLink {
    work: Sender<WorkMessage>,
    results: Receiver<ResultMessage>,
}

/// Worker end of its channels
#[derive(Debug)]
pub struct WorkerEndpoint {
    id: usize,
    work: Receiver<WorkMessage>,
    results: Sender<ResultMessage>,
}

/// Create the channel pair for worker `id`
pub fn link(id: usize) -> (WorkerLink, WorkerEndpoint) {
    let (work_tx, work_rx) = mpsc::channel();
    let (results_tx, results_rx) = mpsc::channel();

    (
        WorkerLink {
            work: work_tx,
            results: results_rx,
        },
        WorkerEndpoint {
            id,
            work: work_rx,
            results: results_tx,
        },
    )
}

impl WorkerEndpoint {
    /// Worker life cycle: classify chunks until the terminal marker arrives
    ///
    /// Returns the number of chunks processed.
    pub fn serve(self) -> Result<usize> {
        let mut processed = 0;
        loop {
            match self.work.recv() {
                Ok(WorkMessage::Chunk(chunk)) => {
                    let reply = ResultMessage {
                        source_id: chunk.source_id,
                        counts: chunk.count_words(),
                    };
                    drop(chunk);
                    self.results
                        .send(reply)
                        .map_err(|_| EngineError::WorkerDisconnected { worker: self.id })?;
                    processed += 1;
                }
                Ok(WorkMessage::Terminate) => return Ok(processed),
                Err(_) => return Err(EngineError::WorkerDisconnected { worker: self.id }),
            }
        }
    }
}

/// Round-robin dispatcher bounded by a credit window
#[derive(Debug)]
pub struct DispatchBackpressure {
    links: Vec<WorkerLink>,
    window: usize,
    next: usize,
    outstanding: usize,
    // worker index of every in-flight chunk, oldest first
    in_flight: VecDeque<usize>,
    dispatched: Vec<usize>,
}

impl DispatchBackpressure {
    /// Create a dispatcher whose window equals the worker count
    pub fn new(links: Vec<WorkerLink>) -> Result<Self> {
        let window = links.len();
        Self::with_window(links, window)
    }

    /// Create a dispatcher with an explicit credit window
    pub fn with_window(links: Vec<WorkerLink>, window: usize) -> Result<Self> {
        if links.is_empty() {
            return Err(EngineError::Config(
                "at least one worker is required".into(),
            ));
        }
        if window == 0 {
            return Err(EngineError::Config(
                "credit window must be greater than 0".into(),
            ));
        }

        let workers = links.len();
        Ok(Self {
            links,
            window,
            next: 0,
            outstanding: 0,
            in_flight: VecDeque::with_capacity(window),
            dispatched: vec![0; workers],
        })
    }

    /// Chunks sent but not yet answered
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    /// The credit window
    pub fn window(&self) -> usize {
        self.window
    }

    /// Send `chunk` to the next worker in turn
    ///
    /// Blocks (polling) while the window is full.
    pub fn dispatch(&mut self, chunk: Chunk, aggregator: &ResultAggregator) -> Result<()> {
        while self.outstanding >= self.window {
            self.wait_for_credit(aggregator)?;
        }

        let worker = self.next;
        log::trace!(
            "dispatching {} bytes of source {} to worker {worker}",
            chunk.len(),
            chunk.source_id
        );
        self.links[worker]
            .work
            .send(WorkMessage::Chunk(chunk))
            .map_err(|_| EngineError::WorkerDisconnected { worker })?;

        self.next = (worker + 1) % self.links.len();
        self.outstanding += 1;
        self.in_flight.push_back(worker);
        self.dispatched[worker] += 1;

        if self.outstanding >= self.window {
            self.poll(aggregator)?;
        }
        Ok(())
    }

    /// One non-blocking pass over every result slot
    ///
    /// Returns the number of results merged.
    pub fn poll(&mut self, aggregator: &ResultAggregator) -> Result<usize> {
        let mut drained = 0;
        for worker in 0..self.links.len() {
            loop {
                match self.links[worker].results.try_recv() {
                    Ok(reply) => {
                        self.accept(worker, reply, aggregator)?;
                        drained += 1;
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        return Err(EngineError::WorkerDisconnected { worker })
                    }
                }
            }
        }

        log::trace!("poll drained {drained}, {} outstanding", self.outstanding);
        Ok(drained)
    }

    /// Merge every outstanding result
    pub fn drain(&mut self, aggregator: &ResultAggregator) -> Result<()> {
        while self.outstanding > 0 {
            self.wait_for_credit(aggregator)?;
        }
        Ok(())
    }

    /// Send one terminal marker per worker
    ///
    /// Returns how many chunks each worker was sent.
    pub fn terminate(self) -> Result<Vec<usize>> {
        for (worker, link) in self.links.iter().enumerate() {
            link.work
                .send(WorkMessage::Terminate)
                .map_err(|_| EngineError::WorkerDisconnected { worker })?;
        }

        log::debug!("sent {} terminal markers", self.links.len());
        Ok(self.dispatched)
    }

    /// Drain, then terminate
    pub fn finish(mut self, aggregator: &ResultAggregator) -> Result<Vec<usize>> {
        self.drain(aggregator)?;
        self.terminate()
    }

    fn wait_for_credit(&mut self, aggregator: &ResultAggregator) -> Result<()> {
        if self.poll(aggregator)? > 0 {
            return Ok(());
        }

        let Some(&oldest) = self.in_flight.front() else {
            return Ok(());
        };
        match self.links[oldest].results.recv_timeout(POLL_INTERVAL) {
            Ok(reply) => self.accept(oldest, reply, aggregator),
            Err(RecvTimeoutError::Timeout) => Ok(()),
            Err(RecvTimeoutError::Disconnected) => {
                Err(EngineError::WorkerDisconnected { worker: oldest })
            }
        }
    }

    fn accept(
        &mut self,
        worker: usize,
        reply: ResultMessage,
        aggregator: &ResultAggregator,
    ) -> Result<()> {
        aggregator.merge(reply.source_id, reply.counts)?;

        self.outstanding = self.outstanding.saturating_sub(1);
        if let Some(pos) = self.in_flight.iter().position(|&w| w == worker) {
            self.in_flight.remove(pos);
        }
        Ok(())
    }
}
