//! Polls a [`Sampler`] and reports only when the load changes.
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
    time::{Duration, Instant},
};

use crate::{SENTINEL, Sampler, SourceKind, ThermalLoad, safe_mpsc};

/// A change in thermal load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThermalEvent {
    /// The new reading.
    pub load: ThermalLoad,
    /// The reading before it, `None` for the first event.
    pub previous: Option<ThermalLoad>,
    /// The sampler's source selection.
    pub source: SourceKind,
}

/// Tracks the last reading and decides whether a new one is worth reporting.
#[derive(Debug, Default)]
pub struct ChangeDetector {
    last: Option<ThermalLoad>,
}

impl ChangeDetector {
    /// Record `load`, returning an event if it differs from the previous reading.
    pub fn observe(&mut self, load: ThermalLoad, source: SourceKind) -> Option<ThermalEvent> {
        let previous = self.last.replace(load);
        (previous != Some(load)).then_some(ThermalEvent {
            load,
            previous,
            source,
        })
    }
}

/// Sample every `interval` while `running` is set, sending an event whenever the load changes.
///
/// Failed readings count as [`SENTINEL`]. Returns once `running` is cleared or the receiver is dropped.
pub fn monitor_thread(
    sampler: Arc<Sampler>,
    interval: Duration,
    running: Arc<AtomicBool>,
    sink: safe_mpsc::SafeSender<ThermalEvent>,
) {
    log::info!("[MON] Monitor started, interval {interval:?}");
    let mut detector = ChangeDetector::default();
    while running.load(Ordering::Relaxed) {
        let start = Instant::now();
        let load = match sampler.sample() {
            Ok(load) => load,
            Err(e) => {
                log::warn!("[MON] Sampling failed: {e}");
                SENTINEL
            }
        };
        if let Some(event) = detector.observe(load, sampler.kind()) {
            match sink.send(event) {
                Ok(()) => {}
                Err(safe_mpsc::SafeSendError::NotReady(_)) => {
                    log::debug!("[MON] Sink not ready, dropping {load}");
                }
                Err(safe_mpsc::SafeSendError::Disconnected(_)) => {
                    log::info!("[MON] Sink disconnected");
                    break;
                }
            }
        }
        let elapsed = start.elapsed();
        if elapsed < interval {
            thread::sleep(interval - elapsed);
        }
    }
    log::info!("[MON] Exiting thread");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::tests::Fixed;

    #[test]
    fn only_changes_are_reported() {
        let mut det = ChangeDetector::default();
        let a = ThermalLoad::from_percent(10.0);
        let b = ThermalLoad::from_percent(30.0);
        let first = det.observe(a, SourceKind::Auto).unwrap();
        assert_eq!(first.previous, None);
        assert_eq!(det.observe(a, SourceKind::Auto), None);
        let second = det.observe(b, SourceKind::Auto).unwrap();
        assert_eq!(second.previous, Some(a));
        assert_eq!(second.load, b);
    }

    #[test]
    fn steady_source_emits_once() {
        let sampler = Arc::new(Sampler::with_sources(vec![Box::new(Fixed(Some(55)))]));
        let running = Arc::new(AtomicBool::new(true));
        let (tx, rx) = safe_mpsc::channel();
        let hdl = {
            let running = running.clone();
            thread::spawn(move || {
                monitor_thread(sampler, Duration::from_millis(5), running, tx)
            })
        };
        let event = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(event.load.percent(), 55);
        assert_eq!(event.previous, None);
        thread::sleep(Duration::from_millis(50));
        running.store(false, Ordering::Relaxed);
        hdl.join().unwrap();
        assert_eq!(rx.try_recv(), None);
    }

    #[test]
    fn failing_source_reports_sentinel() {
        let sampler = Arc::new(Sampler::with_sources(vec![Box::new(Fixed(None))]));
        let running = Arc::new(AtomicBool::new(true));
        let (tx, rx) = safe_mpsc::channel();
        let hdl = {
            let running = running.clone();
            thread::spawn(move || {
                monitor_thread(sampler, Duration::from_millis(5), running, tx)
            })
        };
        let event = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(event.load, SENTINEL);
        drop(rx);
        // Steady sentinel readings never send again, so clear the flag to end the loop.
        running.store(false, Ordering::Relaxed);
        hdl.join().unwrap();
    }
}
