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

//! LSP backend implementation.
//!
//! # Request Flow
//!
//! Every document has its own [`DocumentActor`]. Notifications and requests
//! look the actor up in the [`DocumentRegistry`], enqueue work on it and
//! await the result outside the registry lock. Only `did_open` and
//! `did_change` create or revive actors; queries are answered by whatever
//! actor the document already has, even during its grace window. Because an actor runs its
//! queue in order, a query that arrives after a change always sees the
//! parse produced by that change.
//!
//! Diagnostics are published from a spawned task once the re-parse
//! completes. Each publication carries the document version it was computed
//! for and is skipped if a newer version has arrived in the meantime.

use crate::actor::DocumentActor;
use crate::constants::{BYTES_PER_MEGABYTE, DEFAULT_MAX_DOCUMENT_SIZE, DEFAULT_RECYCLE_DELAY};
use crate::error::AnalysisError;
use crate::registry::{DocumentRegistry, RegistryStatistics};
use crate::semantic_tokens::legend;
use crate::utils::negotiate_position_encoding;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tower_lsp::jsonrpc::{self, Result};
use tower_lsp::lsp_types::request::{GotoDeclarationParams, GotoDeclarationResponse};
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};
use tracing::{debug, error, info, warn};

/// Logo Language Server backend.
pub struct LogoLanguageServer {
    /// LSP client connection.
    client: Client,
    /// Per-document workers.
    registry: Arc<Mutex<DocumentRegistry>>,
    /// Latest version seen for each open document.
    versions: Arc<DashMap<Url, i32>>,
    /// Maximum document size in bytes.
    max_document_size: usize,
}

impl LogoLanguageServer {
    /// Create a server with a 5 minute recycle delay and a 16 MB document limit.
    pub fn new(client: Client) -> Self {
        Self::with_config(client, DEFAULT_RECYCLE_DELAY, DEFAULT_MAX_DOCUMENT_SIZE)
    }

    /// Create a server with custom limits.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use logo_lsp::LogoLanguageServer;
    /// use std::time::Duration;
    /// use tower_lsp::Client;
    ///
    /// fn create_server(client: Client) -> LogoLanguageServer {
    ///     // Drop closed documents after 30 seconds, accept up to 1 MB
    ///     LogoLanguageServer::with_config(client, Duration::from_secs(30), 1024 * 1024)
    /// }
    /// ```
    pub fn with_config(client: Client, recycle_delay: Duration, max_document_size: usize) -> Self {
        let registry = DocumentRegistry::new().with_recycle_delay(recycle_delay);
        Self {
            client,
            registry: Arc::new(Mutex::new(registry)),
            versions: Arc::new(DashMap::new()),
            max_document_size,
        }
    }

    pub fn max_document_size(&self) -> usize {
        self.max_document_size
    }

    /// Snapshot of the document registry counters.
    pub fn registry_statistics(&self) -> RegistryStatistics {
        self.registry.lock().statistics()
    }

    fn actor_for(&self, uri: &Url) -> Result<Arc<DocumentActor>> {
        self.registry.lock().handler_for(uri).map_err(|e| {
            error!("Failed to start worker for {}: {}", uri, e);
            jsonrpc::Error::internal_error()
        })
    }

    /// The actor of an open or recently closed document.
    ///
    /// Queries never create or revive a worker; a document the server does
    /// not know yet is not ready.
    fn query_actor(&self, uri: &Url) -> Result<Arc<DocumentActor>> {
        self.registry.lock().find(uri).ok_or_else(|| {
            debug!("Query for unknown document {}", uri);
            AnalysisError::NotReady { uri: uri.clone() }.into()
        })
    }

    /// Reject documents over the size limit.
    async fn within_size_limit(&self, uri: &Url, text: &str) -> bool {
        let size = text.len();
        if size <= self.max_document_size {
            return true;
        }
        error!(
            "Document size limit exceeded: {} has {} bytes > {} bytes maximum",
            uri, size, self.max_document_size
        );
        self.client
            .show_message(
                MessageType::ERROR,
                format!(
                    "Document too large: {} bytes exceeds maximum of {} bytes ({} MB)",
                    size,
                    self.max_document_size,
                    self.max_document_size / BYTES_PER_MEGABYTE
                ),
            )
            .await;
        false
    }

    /// Re-parse `uri` and publish its diagnostics when the parse completes.
    async fn update(&self, uri: Url, version: i32, text: String) {
        if !self.within_size_limit(&uri, &text).await {
            return;
        }
        self.versions.insert(uri.clone(), version);

        let pending = match self.actor_for(&uri).map(|actor| actor.set_text(text)) {
            Ok(Ok(pending)) => pending,
            Ok(Err(e)) => {
                warn!("Dropping change for {}: {}", uri, e);
                return;
            }
            Err(_) => return,
        };

        let client = self.client.clone();
        let versions = Arc::clone(&self.versions);
        tokio::spawn(async move {
            let diagnostics = match pending.await {
                Ok(diagnostics) => diagnostics,
                Err(e) => {
                    warn!("No diagnostics for {}: {}", uri, e);
                    return;
                }
            };
            let current = versions.get(&uri).map(|entry| *entry.value());
            if current != Some(version) {
                debug!("Skipping stale diagnostics for {} (version {})", uri, version);
                return;
            }
            debug!("Publishing {} diagnostics for {}", diagnostics.len(), uri);
            client
                .publish_diagnostics(uri, diagnostics, Some(version))
                .await;
        });
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for LogoLanguageServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        info!("Logo Language Server initializing");

        let position_encoding = negotiate_position_encoding(&params.capabilities);
        if position_encoding.is_none() {
            warn!("Client does not offer UTF-32 positions; columns may drift outside the BMP");
        }

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                position_encoding,
                text_document_sync: Some(TextDocumentSyncCapability::Options(
                    TextDocumentSyncOptions {
                        open_close: Some(true),
                        change: Some(TextDocumentSyncKind::FULL),
                        will_save: None,
                        will_save_wait_until: None,
                        save: Some(TextDocumentSyncSaveOptions::Supported(true)),
                    },
                )),
                declaration_provider: Some(DeclarationCapability::Simple(true)),
                semantic_tokens_provider: Some(
                    SemanticTokensServerCapabilities::SemanticTokensOptions(
                        SemanticTokensOptions {
                            work_done_progress_options: Default::default(),
                            legend: legend(),
                            range: Some(false),
                            full: Some(SemanticTokensFullOptions::Bool(true)),
                        },
                    ),
                ),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "logo-lsp".to_string(),
                version: Some(crate::VERSION.to_string()),
            }),
        })
    }

    async fn initialized(&self, _params: InitializedParams) {
        info!("Logo Language Server initialized");
    }

    async fn shutdown(&self) -> Result<()> {
        info!("Logo Language Server shutting down");
        self.registry.lock().shutdown_all();
        self.versions.clear();
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let document = params.text_document;
        info!(
            "Document opened: {} ({} bytes, {} lines)",
            document.uri,
            document.text.len(),
            document.text.lines().count()
        );
        self.update(document.uri, document.version, document.text).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;

        if params.content_changes.iter().any(|change| change.range.is_some()) {
            error!("Ignoring incremental change for {}: only full sync is supported", uri);
            return;
        }
        let Some(change) = params.content_changes.into_iter().last() else {
            warn!("Document change event for {} had no content changes", uri);
            return;
        };

        debug!("Document changed: {} (version {}, {} bytes)", uri, version, change.text.len());
        self.update(uri, version, change.text).await;
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        debug!("Document saved: {}", params.text_document.uri);
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        debug!("Document closed: {}", uri);
        self.registry.lock().schedule_for_removal(&uri);
        self.versions.remove(&uri);
        self.client.publish_diagnostics(uri, vec![], None).await;
    }

    async fn semantic_tokens_full(
        &self,
        params: SemanticTokensParams,
    ) -> Result<Option<SemanticTokensResult>> {
        let uri = params.text_document.uri;
        let pending = self.query_actor(&uri)?.semantic_tokens_full()?;
        let tokens = pending.await?;
        debug!("Semantic tokens for {}: {} tokens", uri, tokens.data.len());
        Ok(Some(SemanticTokensResult::Tokens(tokens)))
    }

    async fn goto_declaration(
        &self,
        params: GotoDeclarationParams,
    ) -> Result<Option<GotoDeclarationResponse>> {
        let TextDocumentPositionParams {
            text_document,
            position,
        } = params.text_document_position_params;
        let pending = self
            .query_actor(&text_document.uri)?
            .declaration(position.line, position.character)?;
        let locations = pending.await?;
        debug!(
            "Declarations at {}:{}:{}: {} found",
            text_document.uri,
            position.line,
            position.character,
            locations.len()
        );
        Ok(Some(GotoDeclarationResponse::Array(locations)))
    }
}
