use crate::error::IngestError;
use crate::models::IngestionOptions;

/// Fixed-size overlapping window policy. Defaults come from
/// `IngestionOptions` (500 chars per segment, 50 chars of overlap).
#[derive(Debug, Clone, Copy)]
pub struct ChunkingConfig {
    pub max_chars: usize,
    pub overlap_chars: usize,
}

impl From<IngestionOptions> for ChunkingConfig {
    fn from(value: IngestionOptions) -> Self {
        Self {
            max_chars: value.chunk_max_chars,
            overlap_chars: value.chunk_overlap_chars,
        }
    }
}

impl ChunkingConfig {
    fn validate(&self) -> Result<(), IngestError> {
        if self.max_chars == 0 {
            return Err(IngestError::InvalidChunkConfig(
                "max_chars must be positive".to_string(),
            ));
        }
        if self.overlap_chars >= self.max_chars {
            return Err(IngestError::InvalidChunkConfig(format!(
                "overlap {} must be smaller than max {}",
                self.overlap_chars, self.max_chars
            )));
        }
        Ok(())
    }
}

/// A text window plus its character offset into the concatenated
/// source text. The offset is what page attribution keys off.
#[derive(Debug, Clone)]
pub struct Segment {
    pub text: String,
    pub start_offset: usize,
}

pub fn split_overlapping(text: &str, config: ChunkingConfig) -> Result<Vec<Segment>, IngestError> {
    config.validate()?;

    let chars: Vec<char> = text.chars().collect();
    if chars.iter().all(|ch| ch.is_whitespace()) {
        return Ok(Vec::new());
    }

    let step = config.max_chars - config.overlap_chars;
    let mut segments = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let end = (start + config.max_chars).min(chars.len());
        segments.push(Segment {
            text: chars[start..end].iter().collect(),
            start_offset: start,
        });
        if end == chars.len() {
            break;
        }
        start += step;
    }

    Ok(segments)
}

/// Restrict a file name to the index's allowed key characters: every
/// character outside `[A-Za-z0-9-]` (dots, spaces, underscores
/// included) becomes `-`. Uniqueness within a batch comes from the
/// ordinal the caller appends.
pub fn sanitize_document_key(name: &str) -> String {
    name.chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' {
                ch
            } else {
                '-'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{sanitize_document_key, split_overlapping, ChunkingConfig};

    fn config(max: usize, overlap: usize) -> ChunkingConfig {
        ChunkingConfig {
            max_chars: max,
            overlap_chars: overlap,
        }
    }

    #[test]
    fn segment_count_matches_window_arithmetic() {
        let text = "x".repeat(1000);
        let segments = split_overlapping(&text, config(500, 50)).unwrap();

        // ceil((1000 - 50) / (500 - 50)) = 3
        assert_eq!(segments.len(), 3);
        assert!(segments.iter().all(|segment| segment.text.len() <= 500));
    }

    #[test]
    fn consecutive_segments_share_the_overlap() {
        let text: String = ('a'..='z').cycle().take(120).collect();
        let segments = split_overlapping(&text, config(100, 20)).unwrap();

        assert_eq!(segments.len(), 2);
        let tail: String = segments[0].text.chars().skip(80).collect();
        let head: String = segments[1].text.chars().take(20).collect();
        assert_eq!(tail, head);
        assert_eq!(segments[1].start_offset, 80);
    }

    #[test]
    fn short_text_yields_a_single_segment() {
        let segments = split_overlapping("short", config(500, 50)).unwrap();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text, "short");
        assert_eq!(segments[0].start_offset, 0);
    }

    #[test]
    fn blank_text_yields_no_segments() {
        let segments = split_overlapping("  \n\t ", config(500, 50)).unwrap();
        assert!(segments.is_empty());
    }

    #[test]
    fn overlap_at_or_above_max_is_rejected() {
        assert!(split_overlapping("abc", config(50, 50)).is_err());
        assert!(split_overlapping("abc", config(0, 0)).is_err());
    }

    #[test]
    fn sanitized_keys_contain_only_allowed_characters() {
        let key = sanitize_document_key("My Report_v2.final.pdf");
        assert_eq!(key, "My-Report-v2-final-pdf");
        assert!(!key.contains('.'));
        assert!(!key.contains(' '));
        assert!(!key.contains('_'));
    }

    #[test]
    fn sanitized_keys_with_ordinals_are_unique_per_batch() {
        let base = sanitize_document_key("doc.pdf");
        let ids: Vec<String> = (0..5).map(|ordinal| format!("{base}-{ordinal}")).collect();
        let unique: std::collections::HashSet<&String> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
    }
}
