//! A channel whose receiver can refuse input without being dropped.
//!
//! Producers check readiness on every send, so a consumer that is busy (or not yet set up)
//! can pause them cheaply.
use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::{self, Receiver, RecvTimeoutError, Sender},
    },
    time::Duration,
};

/// Sending half of a [`channel`].
#[derive(Debug, Clone)]
pub struct SafeSender<T> {
    sender: Sender<T>,
    ready: Arc<AtomicBool>,
}

/// Receiving half of a [`channel`].
#[derive(Debug)]
pub struct SafeReceiver<T> {
    receiver: Receiver<T>,
    ready: Arc<AtomicBool>,
}

/// Create a channel that starts out ready.
pub fn channel<T>() -> (SafeSender<T>, SafeReceiver<T>) {
    let (tx, rx) = mpsc::channel();
    let ready = Arc::new(AtomicBool::new(true));
    (
        SafeSender {
            sender: tx,
            ready: ready.clone(),
        },
        SafeReceiver {
            receiver: rx,
            ready,
        },
    )
}

impl<T> SafeSender<T> {
    /// Send a value, failing if the receiver is gone or not ready.
    pub fn send(&self, value: T) -> Result<(), SafeSendError<T>> {
        if self.ready.load(Ordering::Relaxed) {
            self.sender.send(value).map_err(SafeSendError::from)
        } else {
            Err(SafeSendError::NotReady(value))
        }
    }

    /// Whether the receiver currently accepts values.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Relaxed)
    }
}

impl<T> SafeReceiver<T> {
    /// Allow or refuse incoming values.
    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::Relaxed);
    }

    /// Wait up to `timeout` for the next value.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<T, RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Take a value if one is queued.
    pub fn try_recv(&self) -> Option<T> {
        self.receiver.try_recv().ok()
    }
}

/// Why a [`SafeSender::send`] failed. The value is handed back.
pub enum SafeSendError<T> {
    /// The receiver was dropped.
    Disconnected(T),
    /// The receiver is alive but refusing input.
    NotReady(T),
}

impl<T> SafeSendError<T> {
    /// Recover the value that was not sent.
    pub fn into_inner(self) -> T {
        match self {
            SafeSendError::Disconnected(v) | SafeSendError::NotReady(v) => v,
        }
    }
}

impl<T> From<mpsc::SendError<T>> for SafeSendError<T> {
    fn from(err: mpsc::SendError<T>) -> Self {
        SafeSendError::Disconnected(err.0)
    }
}

impl<T> fmt::Debug for SafeSendError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SafeSendError::Disconnected(_) => f.write_str("Disconnected(..)"),
            SafeSendError::NotReady(_) => f.write_str("NotReady(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_ready_hands_value_back() {
        let (tx, rx) = channel();
        rx.set_ready(false);
        assert!(!tx.is_ready());
        let err = tx.send(7u8).unwrap_err();
        assert!(matches!(err, SafeSendError::NotReady(_)));
        assert_eq!(err.into_inner(), 7);
        rx.set_ready(true);
        tx.send(8).unwrap();
        assert_eq!(rx.try_recv(), Some(8));
    }

    #[test]
    fn dropped_receiver_disconnects() {
        let (tx, rx) = channel::<u8>();
        drop(rx);
        assert!(matches!(tx.send(1), Err(SafeSendError::Disconnected(1))));
    }
}
