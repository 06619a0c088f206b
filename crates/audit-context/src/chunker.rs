//! Overlapping text chunking for retrieval pipelines.
//!
//! Splits long documents into windows that prefer to end on a sentence
//! boundary, so downstream embedding or summarisation never sees a chunk
//! cut mid-sentence when a boundary exists near the window edge.

/// Characters treated as sentence terminators by the boundary scan.
const SENTENCE_ENDINGS: [char; 4] = ['.', '!', '?', '\n'];

/// Window sizing for [`TextChunker`].
#[derive(Debug, Clone, Copy)]
pub struct ChunkerConfig {
    /// Nominal chunk length in characters.
    pub chunk_size: usize,
    /// Characters shared between consecutive chunks.
    pub overlap: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1_000,
            overlap: 200,
        }
    }
}

/// One window of the source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// 0-based position of the chunk in document order.
    pub index: usize,
    /// The window text, trimmed of surrounding whitespace.
    pub text: String,
}

/// Splits text into overlapping, sentence-aware windows.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextChunker {
    config: ChunkerConfig,
}

impl TextChunker {
    pub fn new(config: ChunkerConfig) -> Self {
        Self { config }
    }

    /// Split `text` into chunks.
    ///
    /// Text that already fits in one window is returned as a single chunk.
    /// Longer text is windowed `chunk_size` characters at a time; when an
    /// interior window can end on a sentence terminator within the trailing
    /// `overlap` characters, it is shortened to that boundary. The next
    /// window starts `overlap` characters before the previous nominal end.
    ///
    /// All offsets are in characters, not bytes, so multi-byte text windows
    /// the same way regardless of encoding width.
    pub fn chunk_text(&self, text: &str) -> Vec<Chunk> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let chars: Vec<char> = text.chars().collect();
        if chars.len() <= self.config.chunk_size {
            return vec![Chunk {
                index: 0,
                text: text.to_string(),
            }];
        }

        let mut chunks = Vec::new();
        let mut start = 0usize;

        while start < chars.len() {
            let mut end = start + self.config.chunk_size;

            // Interior windows try to break on a sentence ending within the
            // overlap range; the final window keeps whatever is left.
            if end < chars.len() {
                let floor = start + self.config.chunk_size.saturating_sub(self.config.overlap);
                for i in ((floor + 1)..=end).rev() {
                    if SENTENCE_ENDINGS.contains(&chars[i - 1]) {
                        end = i;
                        break;
                    }
                }
            }

            let window: String = chars[start..end.min(chars.len())].iter().collect();
            let trimmed = window.trim();
            if !trimmed.is_empty() {
                chunks.push(Chunk {
                    index: chunks.len(),
                    text: trimmed.to_string(),
                });
            }

            // Advance from the nominal end, not the clamped one, so the tail
            // of the document is never emitted twice.
            let next = end.saturating_sub(self.config.overlap);
            if next <= start {
                // Degenerate configs (overlap >= chunk_size) must still
                // terminate.
                start = end.min(chars.len());
            } else {
                start = next;
            }
        }

        chunks
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
