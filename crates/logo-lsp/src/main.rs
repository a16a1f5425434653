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

//! `logo-lsp`: language server for Logo turtle-graphics programs.
//!
//! Speaks LSP over stdin/stdout. Logs go to stderr so they never corrupt the
//! protocol stream.
//!
//! # What the Client Gets
//!
//! - Syntax errors as diagnostics after every full-text change
//! - Semantic highlighting (`keyword`, `string`, `number`, `function`,
//!   `variable`, with `declaration`/`definition` modifiers)
//! - Go to declaration for `:variables` and procedure calls
//!
//! Clients must send full document text on every change. Columns are
//! counted in characters; clients offering the UTF-32 position encoding get
//! exact positions on every line.
//!
//! # Logging
//!
//! `RUST_LOG` takes any `tracing` filter. Without it the server logs at
//! `info` for itself and for `tower_lsp`:
//!
//! ```bash
//! RUST_LOG=logo_lsp=debug logo-lsp 2> logo-lsp.log
//! ```
//!
//! # Client Setup
//!
//! ## Neovim (0.10+)
//!
//! ```lua
//! vim.filetype.add({ extension = { logo = 'logo', lgo = 'logo' } })
//! vim.api.nvim_create_autocmd('FileType', {
//!   pattern = 'logo',
//!   callback = function()
//!     vim.lsp.start({ name = 'logo-lsp', cmd = { 'logo-lsp' } })
//!   end,
//! })
//! ```
//!
//! ## Helix (`languages.toml`)
//!
//! ```toml
//! [language-server.logo-lsp]
//! command = "logo-lsp"
//!
//! [[language]]
//! name = "logo"
//! scope = "source.logo"
//! file-types = ["logo", "lgo"]
//! comment-token = ";"
//! language-servers = ["logo-lsp"]
//! ```

use logo_lsp::LogoLanguageServer;
use tower_lsp::{LspService, Server};
use tracing_subscriber::EnvFilter;

/// Default log filter when `RUST_LOG` is unset or invalid.
const DEFAULT_LOG_FILTER: &str = "logo_lsp=info,tower_lsp=info";

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("Starting Logo Language Server v{}", logo_lsp::VERSION);

    let (service, socket) = LspService::new(LogoLanguageServer::new);
    Server::new(tokio::io::stdin(), tokio::io::stdout(), socket)
        .serve(service)
        .await;

    tracing::info!("Logo Language Server stopped");
}
