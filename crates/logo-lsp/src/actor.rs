// Dweve Logo - Logo Language Server
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Single-threaded worker per document.
//!
//! # Architecture
//!
//! Each [`DocumentActor`] owns one [`DocumentHandler`] and one named OS
//! thread. Requests are boxed closures sent over an unbounded FIFO queue; the
//! worker runs them one at a time, in submission order, with exclusive access
//! to the handler. Every request hands back a [`Pending`] that resolves once
//! the closure has run.
//!
//! ```text
//! caller ──submit──▶ [ task | task | task ] ──▶ worker thread ──▶ DocumentHandler
//!    ▲                                               │
//!    └──────────────── Pending<T> ◀── oneshot ───────┘
//! ```
//!
//! # Failure Model
//!
//! - A panicking task is caught at the worker boundary and logged; its
//!   `Pending` resolves to [`AnalysisError::TaskFailed`] and the worker moves
//!   on to the next task.
//! - After [`DocumentActor::shutdown`], new submissions fail immediately with
//!   [`AnalysisError::ShutDown`]. The worker finishes the task it is running;
//!   tasks still queued are dropped and resolve to `TaskFailed`.

use crate::constants::WORKER_THREAD_PREFIX;
use crate::document::DocumentHandler;
use crate::error::{AnalysisError, AnalysisResult};
use crate::semantic_tokens::to_lsp_tokens;
use parking_lot::Mutex;
use std::any::Any;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use std::thread::{self, JoinHandle, ThreadId};
use tokio::sync::{mpsc, oneshot};
use tower_lsp::lsp_types::{Diagnostic, Location, SemanticTokens, Url};
use tracing::{debug, error};

type Task = Box<dyn FnOnce(&mut DocumentHandler) + Send + 'static>;

static NEXT_WORKER: AtomicUsize = AtomicUsize::new(0);

/// Result of a request queued on a [`DocumentActor`].
///
/// Resolves exactly once: to the value produced by the task, or to
/// [`AnalysisError::TaskFailed`] if the task panicked or was dropped.
#[derive(Debug)]
#[must_use = "a pending result does nothing unless awaited or waited on"]
pub struct Pending<T> {
    uri: Url,
    receiver: oneshot::Receiver<AnalysisResult<T>>,
}

impl<T> Pending<T> {
    /// Block the current thread until the task completes.
    ///
    /// # Panics
    ///
    /// Panics when called from within an asynchronous runtime; `.await` the
    /// `Pending` there instead.
    pub fn wait(self) -> AnalysisResult<T> {
        let uri = self.uri;
        self.receiver
            .blocking_recv()
            .unwrap_or(Err(AnalysisError::TaskFailed { uri }))
    }
}

impl<T> Future for Pending<T> {
    type Output = AnalysisResult<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match Pin::new(&mut this.receiver).poll(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(_)) => Poll::Ready(Err(AnalysisError::TaskFailed {
                uri: this.uri.clone(),
            })),
        }
    }
}

/// A document handler confined to its own worker thread.
pub struct DocumentActor {
    uri: Url,
    running: Arc<AtomicBool>,
    sender: Mutex<Option<mpsc::UnboundedSender<Task>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
    worker_id: ThreadId,
}

impl DocumentActor {
    /// Start a worker thread for `uri`.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the thread cannot be created.
    pub fn spawn(uri: Url) -> std::io::Result<Self> {
        let (sender, receiver) = mpsc::unbounded_channel::<Task>();
        let running = Arc::new(AtomicBool::new(true));
        let name = format!(
            "{}-{}",
            WORKER_THREAD_PREFIX,
            NEXT_WORKER.fetch_add(1, Ordering::Relaxed)
        );

        let worker = thread::Builder::new().name(name.clone()).spawn({
            let handler = DocumentHandler::new(uri.clone());
            let running = Arc::clone(&running);
            move || run_worker(handler, receiver, running)
        })?;
        debug!("Spawned worker {} for {}", name, uri);

        Ok(Self {
            uri,
            running,
            sender: Mutex::new(Some(sender)),
            worker_id: worker.thread().id(),
            worker: Mutex::new(Some(worker)),
        })
    }

    pub fn uri(&self) -> &Url {
        &self.uri
    }

    /// Identity of the worker thread; stable for the actor's whole life.
    pub fn worker_id(&self) -> ThreadId {
        self.worker_id
    }

    pub fn is_shut_down(&self) -> bool {
        !self.running.load(Ordering::Acquire)
    }

    /// Whether the worker thread has exited.
    pub fn is_terminated(&self) -> bool {
        self.worker
            .lock()
            .as_ref()
            .map_or(true, JoinHandle::is_finished)
    }

    /// Queue `task` to run against the handler.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::ShutDown`] if the actor has been shut down.
    pub fn submit<T, F>(&self, task: F) -> AnalysisResult<Pending<T>>
    where
        T: Send + 'static,
        F: FnOnce(&mut DocumentHandler) -> AnalysisResult<T> + Send + 'static,
    {
        let (result_sender, receiver) = oneshot::channel();
        let task: Task = Box::new(move |handler| {
            // The receiver may already be gone; nothing to report then.
            let _ = result_sender.send(task(handler));
        });

        let guard = self.sender.lock();
        let sender = guard
            .as_ref()
            .filter(|_| !self.is_shut_down())
            .ok_or_else(|| self.shut_down_error())?;
        sender.send(task).map_err(|_| self.shut_down_error())?;

        Ok(Pending {
            uri: self.uri.clone(),
            receiver,
        })
    }

    /// Replace the document text; resolves to the diagnostics of the new parse.
    pub fn set_text(&self, text: impl Into<String>) -> AnalysisResult<Pending<Vec<Diagnostic>>> {
        let text = text.into();
        self.submit(move |handler| {
            handler.set_text(&text);
            handler.diagnostics()
        })
    }

    pub fn semantic_tokens_full(&self) -> AnalysisResult<Pending<SemanticTokens>> {
        self.submit(|handler| {
            handler
                .semantic_tokens_full()
                .map(|data| to_lsp_tokens(&data))
        })
    }

    /// Declarations of the symbol at the 0-based `line` and `character`.
    pub fn declaration(&self, line: u32, character: u32) -> AnalysisResult<Pending<Vec<Location>>> {
        self.submit(move |handler| handler.declaration(line, character))
    }

    /// Stop accepting work and let the worker exit after its current task.
    ///
    /// Idempotent. Does not wait for the worker; see [`DocumentActor::join`].
    pub fn shutdown(&self) {
        let was_running = self.running.swap(false, Ordering::AcqRel);
        // Dropping the sender wakes an idle worker.
        self.sender.lock().take();
        if was_running {
            debug!("Shut down worker for {}", self.uri);
        }
    }

    /// Block until the worker thread has exited.
    ///
    /// Must not be called from the worker itself.
    pub fn join(&self) {
        let Some(worker) = self.worker.lock().take() else {
            return;
        };
        if worker.join().is_err() {
            error!("Worker for {} exited abnormally", self.uri);
        }
    }

    fn shut_down_error(&self) -> AnalysisError {
        AnalysisError::ShutDown {
            uri: self.uri.clone(),
        }
    }
}

impl std::fmt::Debug for DocumentActor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentActor")
            .field("uri", &self.uri)
            .field("worker_id", &self.worker_id)
            .field("shut_down", &self.is_shut_down())
            .finish()
    }
}

fn run_worker(
    mut handler: DocumentHandler,
    mut receiver: mpsc::UnboundedReceiver<Task>,
    running: Arc<AtomicBool>,
) {
    while let Some(task) = receiver.blocking_recv() {
        if !running.load(Ordering::Acquire) {
            break;
        }
        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| task(&mut handler))) {
            error!(
                "Task for {} panicked: {}",
                handler.uri(),
                panic_message(payload.as_ref())
            );
        }
    }
    // Dropping the receiver drops every queued task and fails its Pending.
    debug!("Worker for {} exiting", handler.uri());
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}
