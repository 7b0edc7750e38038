//! Line and column lookup for byte offsets.

/// Byte offsets of every line start in a source text.
///
/// Built once per source with `memchr`, then each lookup is a binary search.
#[derive(Clone, Debug, Default)]
pub struct LineOffsetTable {
    /// `offsets[i]` is the byte offset where line `i + 1` starts.
    offsets: Vec<u32>,
}

impl LineOffsetTable {
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0u32];
        offsets.extend(
            memchr::memchr_iter(b'\n', source.as_bytes())
                .map(|i| u32::try_from(i + 1).unwrap_or(u32::MAX)),
        );
        LineOffsetTable { offsets }
    }

    /// 1-based line containing `offset`.
    #[inline]
    pub fn line_from_offset(&self, offset: u32) -> u32 {
        let idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        u32::try_from(idx).unwrap_or(u32::MAX).saturating_add(1)
    }

    /// 1-based `(line, column)` for `offset`. Columns count characters.
    pub fn offset_to_line_col(&self, source: &str, offset: u32) -> (u32, u32) {
        let line = self.line_from_offset(offset);
        let line_start = self.line_start(line);
        let end = (offset as usize).min(source.len());
        let col = source
            .get(line_start..end)
            .map_or(0, |text| text.chars().count());
        (line, u32::try_from(col).unwrap_or(u32::MAX).saturating_add(1))
    }

    /// Text of 1-based `line`, without its trailing newline.
    /// Out-of-range lines are empty.
    pub fn line_text<'src>(&self, source: &'src str, line: u32) -> &'src str {
        if line == 0 || line as usize > self.offsets.len() {
            return "";
        }
        let start = self.line_start(line);
        let end = self
            .offsets
            .get(line as usize)
            .map_or(source.len(), |&next| next as usize);
        source
            .get(start..end)
            .unwrap_or("")
            .trim_end_matches(['\n', '\r'])
    }

    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }

    fn line_start(&self, line: u32) -> usize {
        let idx = (line as usize).saturating_sub(1);
        self.offsets.get(idx).copied().unwrap_or(0) as usize
    }
}
