//! Context sizing for prompt assembly.
//!
//! Decides whether a document travels to the model whole or as a summary,
//! and keeps joined retrieval snippets inside a fixed character budget.

use crate::chunker::Chunk;

/// Separator placed between joined retrieval snippets.
const CHUNK_SEPARATOR: &str = "\n\n---\n\n";

/// Marker appended when joined snippets are cut to the budget.
const CONTEXT_TRUNCATED_MARKER: &str = "\n\n[Context truncated...]";

/// Marker appended when a whole document is cut to the budget.
const DOCUMENT_TRUNCATED_MARKER: &str = "\n\n[Document truncated due to length...]";

/// How a document should reach the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextStrategy {
    /// The document fits the context budget and is sent verbatim.
    FullDocument,
    /// The document is too long and must be summarised first.
    Summarize,
}

/// Character budgets for model context assembly.
#[derive(Debug, Clone, Copy)]
pub struct ContextPolicy {
    /// Longest document sent to the model without summarisation.
    pub max_context_length: usize,
    /// Budget for joined retrieval snippets, leaving room for the query
    /// and response.
    pub max_joined_length: usize,
}

impl Default for ContextPolicy {
    fn default() -> Self {
        Self {
            max_context_length: 30_000,
            max_joined_length: 4_000,
        }
    }
}

impl ContextPolicy {
    /// Pick the delivery strategy for a document.
    pub fn strategy_for(&self, text: &str) -> ContextStrategy {
        if text.chars().count() <= self.max_context_length {
            ContextStrategy::FullDocument
        } else {
            ContextStrategy::Summarize
        }
    }

    /// Join retrieval snippets with separators, cutting to the snippet
    /// budget when the combined text runs over.
    pub fn join_chunks(&self, chunks: &[Chunk]) -> String {
        let joined = chunks
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join(CHUNK_SEPARATOR);

        truncate_chars(&joined, self.max_joined_length, CONTEXT_TRUNCATED_MARKER)
    }

    /// Cut a whole document to the context budget, marking the cut.
    ///
    /// Used as the fallback when summarisation is unavailable.
    pub fn truncate_document(&self, text: &str) -> String {
        truncate_chars(text, self.max_context_length, DOCUMENT_TRUNCATED_MARKER)
    }
}

/// Truncate to `limit` characters, appending `marker` only when a cut
/// actually happened. Operates on character counts so multi-byte text is
/// never split inside a code point.
fn truncate_chars(text: &str, limit: usize, marker: &str) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(limit).collect();
    cut.push_str(marker);
    cut
}

// ── Tests ─────────────────────────────────────────────────────────────────────
