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

//! Document registry with delayed worker recycling.
//!
//! This module maps document URIs to their [`DocumentActor`]s and decides
//! when a closed document's worker may be destroyed.
//!
//! # Lifecycle
//!
//! ```text
//!            handler_for               schedule_for_removal
//!   absent ─────────────▶ live ─────────────────────────▶ recyclable
//!     ▲                    ▲                                  │
//!     │                    └────── handler_for (in time) ─────┤
//!     └──────────────── clean_up (deadline passed) ───────────┘
//! ```
//!
//! A URI is never live and recyclable at the same time. Recyclable entries
//! are ordered by deadline, so a cleanup pass only ever inspects the front of
//! the queue and stops at the first entry that has not yet expired.
//!
//! # Thread Safety
//!
//! The registry is not synchronized. The server keeps it behind a
//! `parking_lot::Mutex` and never holds the guard across an await point.
//! Expiry is evaluated lazily on every registry access rather than by a timer.

use crate::actor::DocumentActor;
use crate::constants::DEFAULT_RECYCLE_DELAY;
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_lsp::lsp_types::Url;
use tracing::{debug, warn};

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Instant>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Instant::now()),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock() += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock()
    }
}

/// Builds the actor for a newly opened document.
pub type ActorFactory = Box<dyn Fn(&Url) -> io::Result<DocumentActor> + Send + Sync>;

/// Registry counters for monitoring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryStatistics {
    /// Actors created by the factory.
    pub created: u64,
    /// Recyclable actors reclaimed by a reopen.
    pub recycled: u64,
    /// Actors shut down after their grace window elapsed.
    pub evicted: u64,
    /// Current number of live documents.
    pub live: usize,
    /// Current number of documents waiting for eviction.
    pub recyclable: usize,
}

struct RecyclableEntry {
    actor: Arc<DocumentActor>,
    key: (Instant, u64),
}

/// URI to actor map with a grace window for closed documents.
pub struct DocumentRegistry {
    live: HashMap<Url, Arc<DocumentActor>>,
    recyclable: HashMap<Url, RecyclableEntry>,
    /// Deadline order of `recyclable`; the sequence number breaks ties.
    deadlines: BTreeMap<(Instant, u64), Url>,
    next_sequence: u64,
    recycle_delay: Duration,
    clock: Arc<dyn Clock>,
    factory: ActorFactory,
    stats: RegistryStatistics,
}

impl DocumentRegistry {
    /// Registry with the default recycle delay, the system clock and real
    /// worker threads.
    pub fn new() -> Self {
        Self {
            live: HashMap::new(),
            recyclable: HashMap::new(),
            deadlines: BTreeMap::new(),
            next_sequence: 0,
            recycle_delay: DEFAULT_RECYCLE_DELAY,
            clock: Arc::new(SystemClock),
            factory: Box::new(|uri| DocumentActor::spawn(uri.clone())),
            stats: RegistryStatistics::default(),
        }
    }

    pub fn with_recycle_delay(mut self, recycle_delay: Duration) -> Self {
        self.recycle_delay = recycle_delay;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn(&Url) -> io::Result<DocumentActor> + Send + Sync + 'static,
    {
        self.factory = Box::new(factory);
        self
    }

    pub fn recycle_delay(&self) -> Duration {
        self.recycle_delay
    }

    /// The actor for `uri`, reclaiming a recyclable one or creating a new one.
    ///
    /// Expired entries are evicted first, so a document whose grace window
    /// has passed always gets a fresh actor.
    ///
    /// # Errors
    ///
    /// Propagates the factory's error when a new worker cannot be started.
    pub fn handler_for(&mut self, uri: &Url) -> io::Result<Arc<DocumentActor>> {
        self.clean_up();

        if let Some(actor) = self.live.get(uri) {
            return Ok(Arc::clone(actor));
        }

        if let Some(entry) = self.recyclable.remove(uri) {
            self.deadlines.remove(&entry.key);
            self.live.insert(uri.clone(), Arc::clone(&entry.actor));
            self.stats.recycled += 1;
            debug!("Recycled worker for {}", uri);
            return Ok(entry.actor);
        }

        let actor = Arc::new((self.factory)(uri)?);
        self.live.insert(uri.clone(), Arc::clone(&actor));
        self.stats.created += 1;
        debug!("Created worker for {}", uri);
        Ok(actor)
    }

    /// The actor already serving `uri`, live or recyclable, without moving it
    /// between states.
    ///
    /// Read-only queries use this so that a request racing a close does not
    /// pull the document back into the live set.
    pub fn find(&mut self, uri: &Url) -> Option<Arc<DocumentActor>> {
        self.clean_up();
        self.live
            .get(uri)
            .or_else(|| self.recyclable.get(uri).map(|entry| &entry.actor))
            .map(Arc::clone)
    }

    /// Move a live document into the grace window.
    ///
    /// Logs a warning and does nothing if `uri` is not live.
    pub fn schedule_for_removal(&mut self, uri: &Url) {
        self.clean_up();

        let Some(actor) = self.live.remove(uri) else {
            warn!("Cannot schedule {} for removal: document is not open", uri);
            return;
        };

        let key = (self.clock.now() + self.recycle_delay, self.next_sequence);
        self.next_sequence += 1;
        self.deadlines.insert(key, uri.clone());
        self.recyclable.insert(uri.clone(), RecyclableEntry { actor, key });
        debug!("Scheduled {} for removal in {:?}", uri, self.recycle_delay);
    }

    /// Shut down every recyclable actor whose deadline has passed.
    pub fn clean_up(&mut self) {
        let now = self.clock.now();
        while let Some(entry) = self.deadlines.first_entry() {
            if entry.key().0 > now {
                break;
            }
            let uri = entry.remove();
            if let Some(expired) = self.recyclable.remove(&uri) {
                expired.actor.shutdown();
                self.stats.evicted += 1;
                debug!("Evicted worker for {}", uri);
            }
        }
    }

    /// Shut down every actor, live or recyclable, and forget all documents.
    pub fn shutdown_all(&mut self) {
        for (_, actor) in self.live.drain() {
            actor.shutdown();
        }
        for (_, entry) in self.recyclable.drain() {
            entry.actor.shutdown();
        }
        self.deadlines.clear();
    }

    pub fn is_live(&self, uri: &Url) -> bool {
        self.live.contains_key(uri)
    }

    pub fn is_recyclable(&self, uri: &Url) -> bool {
        self.recyclable.contains_key(uri)
    }

    /// Snapshot of the registry counters.
    pub fn statistics(&self) -> RegistryStatistics {
        RegistryStatistics {
            live: self.live.len(),
            recyclable: self.recyclable.len(),
            ..self.stats.clone()
        }
    }
}

impl Default for DocumentRegistry {
    fn default() -> Self {
        Self::new()
    }
}
