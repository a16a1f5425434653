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

//! Error types for document analysis.

use serde_json::json;
use thiserror::Error;
use tower_lsp::jsonrpc;
use tower_lsp::lsp_types::Url;

/// Failure of a request made against a document.
///
/// Syntax errors are not failures; they are reported as diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// A query arrived before any text was supplied for the document.
    #[error("document {uri} has not been parsed yet")]
    NotReady { uri: Url },

    /// Work was submitted to a worker that has been shut down.
    #[error("worker for {uri} has been shut down")]
    ShutDown { uri: Url },

    /// The task panicked, or was dropped unexecuted when its worker stopped.
    #[error("task for {uri} did not complete")]
    TaskFailed { uri: Url },
}

impl AnalysisError {
    /// The document the failed request was made against.
    pub fn uri(&self) -> &Url {
        match self {
            Self::NotReady { uri } | Self::ShutDown { uri } | Self::TaskFailed { uri } => uri,
        }
    }
}

impl From<AnalysisError> for jsonrpc::Error {
    fn from(error: AnalysisError) -> Self {
        let code = match error {
            AnalysisError::NotReady { .. } => jsonrpc::ErrorCode::InvalidRequest,
            AnalysisError::ShutDown { .. } | AnalysisError::TaskFailed { .. } => {
                jsonrpc::ErrorCode::InternalError
            }
        };
        jsonrpc::Error {
            code,
            message: error.to_string().into(),
            data: Some(json!({ "uri": error.uri().as_str() })),
        }
    }
}

/// Result type for document requests.
pub type AnalysisResult<T> = Result<T, AnalysisError>;
