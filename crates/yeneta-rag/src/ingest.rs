//! Document chunking and passage ingestion

use std::path::Path;
use std::sync::Arc;

use yeneta_core::{
    ChunkingConfig, Difficulty, EmbeddingProvider, Error, IngestionReport, Passage, Result,
    SourceDocument, detect_language,
};

use crate::content_store::LocalContentStore;

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Greedily pack words into pieces of at most `size` characters
fn split_words(paragraph: &str, size: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();

    for word in paragraph.split_whitespace() {
        // Words longer than a whole chunk are cut on char boundaries
        if char_len(word) > size {
            if !current.is_empty() {
                pieces.push(std::mem::take(&mut current));
            }
            let chars: Vec<char> = word.chars().collect();
            pieces.extend(chars.chunks(size).map(|c| c.iter().collect::<String>()));
            continue;
        }

        if current.is_empty() {
            current.push_str(word);
        } else if char_len(&current) + 1 + char_len(word) <= size {
            current.push(' ');
            current.push_str(word);
        } else {
            pieces.push(std::mem::replace(&mut current, word.to_string()));
        }
    }

    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

/// Trailing whole words of `chunk` totalling at most `overlap` characters
fn overlap_tail(chunk: &str, overlap: usize) -> String {
    let mut tail: Vec<&str> = Vec::new();
    let mut length = 0;

    for word in chunk.split_whitespace().rev() {
        let added = char_len(word) + usize::from(!tail.is_empty());
        if length + added > overlap {
            break;
        }
        length += added;
        tail.push(word);
    }

    tail.reverse();
    tail.join(" ")
}

/// Split text into chunks of at most `chunk_size` characters
///
/// Paragraph boundaries are preferred, then word boundaries. Each chunk after
/// the first starts with up to `chunk_overlap` characters of whole words from
/// the end of the previous chunk when they fit.
pub fn chunk_text(text: &str, config: &ChunkingConfig) -> Vec<String> {
    let size = config.chunk_size.max(1);
    let mut chunks: Vec<String> = Vec::new();
    let mut current = String::new();

    let pieces = text
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .flat_map(|p| {
            if char_len(p) <= size {
                vec![p.to_string()]
            } else {
                split_words(p, size)
            }
        });

    for piece in pieces {
        if current.is_empty() {
            current = piece;
        } else if char_len(&current) + 2 + char_len(&piece) <= size {
            current.push_str("\n\n");
            current.push_str(&piece);
        } else {
            let tail = overlap_tail(&current, config.chunk_overlap);
            chunks.push(std::mem::take(&mut current));
            current = if !tail.is_empty() && char_len(&tail) + 1 + char_len(&piece) <= size {
                format!("{} {}", tail, piece)
            } else {
                piece
            };
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Splits documents into passages, embeds them and stores them
pub struct PassageIngestor<E: EmbeddingProvider + ?Sized> {
    embedder: Arc<E>,
    store: Arc<LocalContentStore>,
    chunking: ChunkingConfig,
}

impl<E: EmbeddingProvider + ?Sized> PassageIngestor<E> {
    pub fn new(embedder: Arc<E>, store: Arc<LocalContentStore>) -> Self {
        Self {
            embedder,
            store,
            chunking: ChunkingConfig::default(),
        }
    }

    pub fn with_chunking(mut self, chunking: ChunkingConfig) -> Self {
        self.chunking = chunking;
        self
    }

    /// Ingest one document as passages `<document id>#<chunk index>`
    pub async fn ingest(&self, document: &SourceDocument) -> Result<IngestionReport> {
        let mut report = IngestionReport::default();

        for (index, chunk) in chunk_text(&document.text, &self.chunking).into_iter().enumerate() {
            let id = format!("{}#{}", document.id, index);

            let embedding = match self.embedder.embed(&chunk).await {
                Ok(embedding) => embedding,
                Err(e) => {
                    report.passages_failed += 1;
                    report.errors.push(format!("{}: {}", id, e));
                    continue;
                }
            };

            let passage = Passage {
                id: id.clone(),
                text: chunk,
                subject: document.subject.clone(),
                language: document.language,
                difficulty: document.difficulty,
                embedding,
            };

            match self.store.insert(passage) {
                Ok(()) => report.passages_stored += 1,
                Err(e) => {
                    report.passages_failed += 1;
                    report.errors.push(format!("{}: {}", id, e));
                }
            }
        }

        tracing::info!(
            document = %document.id,
            stored = report.passages_stored,
            failed = report.passages_failed,
            "document ingested"
        );
        Ok(report)
    }

    pub async fn ingest_all(&self, documents: &[SourceDocument]) -> Result<IngestionReport> {
        let mut report = IngestionReport::default();
        for document in documents {
            report.merge(self.ingest(document).await?);
        }
        Ok(report)
    }
}

/// Read a text or markdown file as a source document
///
/// The document id is the file stem and the language is detected from the text.
pub async fn document_from_file(
    path: &Path,
    subject: &str,
    difficulty: Difficulty,
) -> Result<SourceDocument> {
    let text = tokio::fs::read_to_string(path).await?;
    let id = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| Error::InvalidInput(format!("invalid file name: {}", path.display())))?
        .to_string();

    Ok(SourceDocument {
        id,
        language: detect_language(&text),
        text,
        subject: subject.to_string(),
        difficulty,
    })
}
