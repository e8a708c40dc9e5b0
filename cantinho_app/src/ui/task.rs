//! Background requests: a future spawned on the app's tokio runtime whose
//! result the UI thread polls once per frame.

use std::future::Future;

use eframe::egui;
use tokio::runtime::Runtime;
use tokio::sync::oneshot::{self, error::TryRecvError};

#[derive(Debug, PartialEq)]
pub enum TaskPoll<T> {
    /// Still running
    Waiting,
    Ready(T),
    /// The task ended without producing a value (panicked or was aborted)
    Lost,
}

/// Handle to one in-flight request.
///
/// Dropping the handle does not cancel the request; its result is simply
/// discarded.
pub struct Pending<T> {
    receiver: Option<oneshot::Receiver<T>>,
}

impl<T: Send + 'static> Pending<T> {
    pub fn spawn<F>(runtime: &Runtime, ctx: &egui::Context, future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        let (sender, receiver) = oneshot::channel();
        let ctx = ctx.clone();
        runtime.spawn(async move {
            let value = future.await;
            // The screen may be gone already
            let _ = sender.send(value);
            ctx.request_repaint();
        });
        Self {
            receiver: Some(receiver),
        }
    }
}

impl<T> Pending<T> {
    pub fn poll(&mut self) -> TaskPoll<T> {
        let Some(receiver) = self.receiver.as_mut() else {
            return TaskPoll::Lost;
        };
        match receiver.try_recv() {
            Ok(value) => {
                self.receiver = None;
                TaskPoll::Ready(value)
            }
            Err(TryRecvError::Empty) => TaskPoll::Waiting,
            Err(TryRecvError::Closed) => {
                log::error!("Background request ended without a result");
                self.receiver = None;
                TaskPoll::Lost
            }
        }
    }
}

/// Polls an optional slot, clearing it once the task finished.
pub fn take_ready<T>(slot: &mut Option<Pending<T>>) -> Option<T> {
    let pending = slot.as_mut()?;
    match pending.poll() {
        TaskPoll::Waiting => None,
        TaskPoll::Ready(value) => {
            *slot = None;
            Some(value)
        }
        TaskPoll::Lost => {
            *slot = None;
            None
        }
    }
}
