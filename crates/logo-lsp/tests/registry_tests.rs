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

//! Document registry lifecycle tests driven by a manual clock.

use logo_lsp::registry::{DocumentRegistry, ManualClock, RegistryStatistics};
use logo_lsp::DocumentActor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tower_lsp::lsp_types::Url;

const DELAY: Duration = Duration::from_secs(300);

fn uri(name: &str) -> Url {
    Url::parse(&format!("file:///{name}.logo")).unwrap()
}

fn registry() -> (DocumentRegistry, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new());
    let registry = DocumentRegistry::new()
        .with_recycle_delay(DELAY)
        .with_clock(clock.clone());
    (registry, clock)
}

#[test]
fn test_handler_for_reuses_live_instance() {
    let (mut registry, _clock) = registry();
    let first = registry.handler_for(&uri("a")).unwrap();
    let second = registry.handler_for(&uri("a")).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(registry.statistics().created, 1);
}

#[test]
fn test_distinct_documents_get_distinct_workers() {
    let (mut registry, _clock) = registry();
    let a = registry.handler_for(&uri("a")).unwrap();
    let b = registry.handler_for(&uri("b")).unwrap();
    assert!(!Arc::ptr_eq(&a, &b));
    assert_ne!(a.worker_id(), b.worker_id());
    registry.shutdown_all();
}

#[test]
fn test_reopen_within_delay_recycles_instance() {
    let (mut registry, clock) = registry();
    let first = registry.handler_for(&uri("a")).unwrap();
    registry.schedule_for_removal(&uri("a"));
    assert!(registry.is_recyclable(&uri("a")));
    assert!(!registry.is_live(&uri("a")));

    clock.advance(DELAY - Duration::from_secs(1));
    let second = registry.handler_for(&uri("a")).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert!(!second.is_shut_down());
    assert!(registry.is_live(&uri("a")));
    assert!(!registry.is_recyclable(&uri("a")));
    assert_eq!(registry.statistics().recycled, 1);
}

#[test]
fn test_handler_is_shut_down_after_delay() {
    let (mut registry, clock) = registry();
    let first = registry.handler_for(&uri("a")).unwrap();
    registry.schedule_for_removal(&uri("a"));

    clock.advance(DELAY);
    registry.clean_up();
    assert!(first.is_shut_down());
    assert!(!registry.is_recyclable(&uri("a")));

    let second = registry.handler_for(&uri("a")).unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
    assert!(!second.is_shut_down());
}

#[test]
fn test_expired_entry_is_not_revived_without_explicit_cleanup() {
    let (mut registry, clock) = registry();
    let first = registry.handler_for(&uri("a")).unwrap();
    registry.schedule_for_removal(&uri("a"));

    clock.advance(DELAY + Duration::from_secs(1));
    let second = registry.handler_for(&uri("a")).unwrap();

    assert!(!Arc::ptr_eq(&first, &second));
    assert!(first.is_shut_down());
}

#[test]
fn test_cleanup_evicts_in_deadline_order() {
    let (mut registry, clock) = registry();
    let a = registry.handler_for(&uri("a")).unwrap();
    let b = registry.handler_for(&uri("b")).unwrap();
    let c = registry.handler_for(&uri("c")).unwrap();

    registry.schedule_for_removal(&uri("a"));
    clock.advance(Duration::from_secs(60));
    registry.schedule_for_removal(&uri("b"));
    clock.advance(Duration::from_secs(60));
    registry.schedule_for_removal(&uri("c"));

    // a expires at 300s, b at 360s, c at 420s.
    clock.advance(Duration::from_secs(250));
    registry.clean_up();
    assert!(a.is_shut_down());
    assert!(b.is_shut_down());
    assert!(!c.is_shut_down());
    assert!(registry.is_recyclable(&uri("c")));

    clock.advance(Duration::from_secs(60));
    registry.clean_up();
    assert!(c.is_shut_down());
    assert_eq!(registry.statistics().evicted, 3);
}

#[test]
fn test_removing_unknown_document_is_noop() {
    let (mut registry, _clock) = registry();
    registry.schedule_for_removal(&uri("missing"));
    assert!(!registry.is_recyclable(&uri("missing")));
    assert_eq!(registry.statistics(), RegistryStatistics::default());
}

#[test]
fn test_double_removal_keeps_first_deadline() {
    let (mut registry, clock) = registry();
    let actor = registry.handler_for(&uri("a")).unwrap();
    registry.schedule_for_removal(&uri("a"));
    clock.advance(Duration::from_secs(200));
    registry.schedule_for_removal(&uri("a"));

    clock.advance(Duration::from_secs(100));
    registry.clean_up();
    assert!(actor.is_shut_down());
}

#[test]
fn test_statistics_count_lifecycle_events() {
    let (mut registry, clock) = registry();
    registry.handler_for(&uri("a")).unwrap();
    registry.handler_for(&uri("b")).unwrap();
    registry.schedule_for_removal(&uri("a"));
    registry.handler_for(&uri("a")).unwrap();
    registry.schedule_for_removal(&uri("b"));

    assert_eq!(
        registry.statistics(),
        RegistryStatistics {
            created: 2,
            recycled: 1,
            evicted: 0,
            live: 1,
            recyclable: 1,
        }
    );

    clock.advance(DELAY);
    registry.clean_up();
    let stats = registry.statistics();
    assert_eq!((stats.evicted, stats.live, stats.recyclable), (1, 1, 0));
    registry.shutdown_all();
}

#[test]
fn test_shutdown_all_stops_every_worker() {
    let (mut registry, _clock) = registry();
    let live = registry.handler_for(&uri("live")).unwrap();
    let closed = registry.handler_for(&uri("closed")).unwrap();
    registry.schedule_for_removal(&uri("closed"));

    registry.shutdown_all();

    assert!(live.is_shut_down());
    assert!(closed.is_shut_down());
    live.join();
    closed.join();
    assert!(live.is_terminated());
    assert!(closed.is_terminated());
    let stats = registry.statistics();
    assert_eq!((stats.live, stats.recyclable), (0, 0));
}

#[test]
fn test_custom_factory_is_used_for_new_documents() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let mut registry = DocumentRegistry::new().with_factory(move |uri| {
        counter.fetch_add(1, Ordering::SeqCst);
        DocumentActor::spawn(uri.clone())
    });

    let actor = registry.handler_for(&uri("a")).unwrap();
    registry.handler_for(&uri("a")).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(actor.uri(), &uri("a"));
    registry.shutdown_all();
}
