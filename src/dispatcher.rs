//! Serialized execution of intents on a single controlling thread.
//!
//! The input callback hands intents over through an [`IntentSender`] without
//! ever blocking.  The [`Dispatcher`] drains the matching receiver one intent
//! at a time and runs each to completion, including every desktop service
//! round-trip, before taking the next.  That total order is what keeps the
//! desktop collection consistent: the service has no multi-step atomicity of
//! its own.

use crate::error::DesktopError;
use crate::intent::NavigationIntent;
use crate::navigator::{Navigator, Outcome};
use crate::traits::DesktopService;
use log::{info, warn};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};

/// Producer half of the intent queue.
///
/// Either unbounded or bounded; in both cases [`try_send`](Self::try_send)
/// returns immediately.  Every intent that cannot be queued is counted so
/// the dispatcher can log it later, off the input callback.
#[derive(Debug, Clone)]
pub struct IntentSender {
    tx: Tx,
    dropped: Arc<AtomicUsize>,
}

#[derive(Debug, Clone)]
enum Tx {
    Unbounded(mpsc::Sender<NavigationIntent>),
    Bounded(mpsc::SyncSender<NavigationIntent>),
}

/// Why an intent could not be queued.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HandoffError {
    #[error("intent queue is full, dropped {0}")]
    Full(NavigationIntent),
    #[error("dispatcher has stopped, dropped {0}")]
    Disconnected(NavigationIntent),
}

impl IntentSender {
    /// Queue `intent` without waiting.
    pub fn try_send(&self, intent: NavigationIntent) -> Result<(), HandoffError> {
        let result = match &self.tx {
            Tx::Unbounded(tx) => tx
                .send(intent)
                .map_err(|e| HandoffError::Disconnected(e.0)),
            Tx::Bounded(tx) => tx.try_send(intent).map_err(|e| match e {
                mpsc::TrySendError::Full(i) => HandoffError::Full(i),
                mpsc::TrySendError::Disconnected(i) => HandoffError::Disconnected(i),
            }),
        };
        if result.is_err() {
            self.dropped.fetch_add(1, Ordering::Relaxed);
        }
        result
    }
}

/// Consumer half of the intent queue, owned by the [`Dispatcher`].
#[derive(Debug)]
pub struct IntentReceiver {
    rx: mpsc::Receiver<NavigationIntent>,
    dropped: Arc<AtomicUsize>,
}

impl IntentReceiver {
    /// Block until the next intent, or `None` once every sender is gone.
    pub fn recv(&self) -> Option<NavigationIntent> {
        self.rx.recv().ok()
    }

    /// Drain whatever is queued right now without blocking.
    pub fn try_iter(&self) -> mpsc::TryIter<'_, NavigationIntent> {
        self.rx.try_iter()
    }

    /// Number of intents senders failed to queue since the last call.
    pub fn take_dropped(&self) -> usize {
        self.dropped.swap(0, Ordering::Relaxed)
    }
}

/// Create the FIFO between the input callback and the dispatcher.
///
/// `capacity` of `None` gives an unbounded queue; `Some(n)` bounds it to `n`
/// pending intents, beyond which new intents are dropped.
pub fn intent_channel(capacity: Option<usize>) -> (IntentSender, IntentReceiver) {
    let dropped = Arc::new(AtomicUsize::new(0));
    let (tx, rx) = match capacity {
        Some(n) => {
            let (tx, rx) = mpsc::sync_channel(n);
            (Tx::Bounded(tx), rx)
        }
        None => {
            let (tx, rx) = mpsc::channel();
            (Tx::Unbounded(tx), rx)
        }
    };
    (
        IntentSender {
            tx,
            dropped: Arc::clone(&dropped),
        },
        IntentReceiver { rx, dropped },
    )
}

/// The result of one dispatched intent, as sent to an attached reporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    pub intent: NavigationIntent,
    pub result: Result<Outcome, DesktopError>,
}

/// Owns the [`Navigator`] and executes intents strictly one after another.
pub struct Dispatcher<S: DesktopService> {
    navigator: Navigator<S>,
    report_tx: Option<mpsc::Sender<DispatchReport>>,
}

impl<S: DesktopService> Dispatcher<S> {
    pub fn new(navigator: Navigator<S>) -> Self {
        Self {
            navigator,
            report_tx: None,
        }
    }

    /// Attach a report channel.
    ///
    /// Every dispatched intent produces exactly one [`DispatchReport`], in
    /// dispatch order.  The receiver can be owned by anything that wants to
    /// surface results to the user (a tray balloon, a test, …).
    pub fn set_reporter(&mut self, tx: mpsc::Sender<DispatchReport>) {
        self.report_tx = Some(tx);
    }

    /// Execute one intent to completion.
    ///
    /// Failures are logged and reported, then discarded.  They never stop
    /// the dispatcher.
    pub fn dispatch(&mut self, intent: NavigationIntent) {
        let result = self.navigator.handle(intent);
        match &result {
            Ok(Outcome::MovedWithoutSwitch(_)) => {
                warn!("{}: window moved, desktop not switched", intent)
            }
            Ok(_) => info!("{}: done", intent),
            Err(e) => warn!("{}: {}", intent, e),
        }
        if let Some(tx) = &self.report_tx {
            let _ = tx.send(DispatchReport { intent, result });
        }
    }

    /// Drain `intents` until every sender has been dropped.
    ///
    /// Blocks the calling thread; run it on the thread that owns the desktop
    /// service.
    pub fn run(&mut self, intents: IntentReceiver) {
        info!("dispatcher running");
        while let Some(intent) = intents.recv() {
            self.dispatch(intent);
            log_dropped(&intents);
        }
        log_dropped(&intents);
        info!("all intent sources closed, exiting");
    }
}

fn log_dropped(intents: &IntentReceiver) {
    let dropped = intents.take_dropped();
    if dropped > 0 {
        warn!("{} intent(s) could not be queued and were dropped", dropped);
    }
}
