//! Line/column lookup for spans.
//!
//! Shells that highlight an error need 1-based line and column numbers;
//! the evaluator only knows byte offsets.

use tala_ir::Span;

/// Pre-computed line start offsets for O(log L) lookups.
#[derive(Clone, Debug, Default)]
pub struct LineOffsetTable {
    /// Byte offset of each line start; `offsets[0] == 0`.
    offsets: Vec<u32>,
}

impl LineOffsetTable {
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0u32];
        for (i, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                offsets.push(u32::try_from(i + 1).unwrap_or(u32::MAX));
            }
        }
        LineOffsetTable { offsets }
    }

    /// 1-based line number containing `offset`.
    pub fn line_from_offset(&self, offset: u32) -> u32 {
        let line_idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        u32::try_from(line_idx).map_or(u32::MAX, |l| l.saturating_add(1))
    }

    /// 1-based `(line, column)`; the column counts characters, not bytes.
    pub fn offset_to_line_col(&self, source: &str, offset: u32) -> (u32, u32) {
        let line = self.line_from_offset(offset);
        let line_start = self
            .offsets
            .get((line as usize).saturating_sub(1))
            .copied()
            .unwrap_or(0) as usize;
        let end = (offset as usize).min(source.len());
        let chars = source
            .get(line_start..end)
            .map_or(0, |text| text.chars().count());
        (line, u32::try_from(chars).unwrap_or(u32::MAX).saturating_add(1))
    }

    /// Source text of the given 1-based line, without its newline.
    pub fn line_text<'s>(&self, source: &'s str, line: u32) -> &'s str {
        let idx = (line as usize).saturating_sub(1);
        let Some(&start) = self.offsets.get(idx) else {
            return "";
        };
        let end = self
            .offsets
            .get(idx + 1)
            .map_or(source.len(), |next| (*next as usize).saturating_sub(1));
        source
            .get(start as usize..end)
            .unwrap_or("")
            .trim_end_matches('\r')
    }

    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }
}

/// 1-based `(line, column)` of a span's start, for one-off lookups.
pub fn span_start_line_col(source: &str, span: Span) -> (u32, u32) {
    LineOffsetTable::build(source).offset_to_line_col(source, span.start)
}

#[cfg(test)]
mod tests;
