//! Incremental line and column tracking.

/// Line and column of the last position handed out.
///
/// Tokens arrive in source order, so each lookup only scans the bytes since
/// the previous one. Columns count characters, not bytes.
#[derive(Copy, Clone, Debug)]
pub(crate) struct LineTracker {
    offset: usize,
    line: u32,
    column: u32,
}

impl Default for LineTracker {
    fn default() -> Self {
        LineTracker {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

impl LineTracker {
    /// 1-based `(line, column)` of byte `target` in `source`.
    pub(crate) fn advance_to(&mut self, source: &str, target: usize) -> (u32, u32) {
        let target = target.min(source.len());
        if target < self.offset {
            *self = LineTracker::default();
        }

        let gap = source.as_bytes().get(self.offset..target).unwrap_or(&[]);
        let tail_start = match memchr::memrchr(b'\n', gap) {
            Some(last) => {
                let newlines = memchr::memchr_iter(b'\n', gap).count();
                self.line = self.line.saturating_add(saturating_u32(newlines));
                self.column = 1;
                self.offset + last + 1
            }
            None => self.offset,
        };
        let chars = source.get(tail_start..target).map_or(0, |tail| tail.chars().count());
        self.column = self.column.saturating_add(saturating_u32(chars));
        self.offset = target;
        (self.line, self.column)
    }
}

fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::LineTracker;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_positions_advance_across_lines() {
        let source = "ab\ncd\n\n  é x";
        let mut tracker = LineTracker::default();
        assert_eq!(tracker.advance_to(source, 0), (1, 1));
        assert_eq!(tracker.advance_to(source, 1), (1, 2));
        assert_eq!(tracker.advance_to(source, 1), (1, 2));
        assert_eq!(tracker.advance_to(source, 4), (2, 2));
        // `x` follows a two-byte character.
        assert_eq!(tracker.advance_to(source, 12), (4, 5));
        assert_eq!(tracker.advance_to(source, 99), (4, 6));
    }

    #[test]
    fn test_moving_backwards_rescans() {
        let source = "a\nb";
        let mut tracker = LineTracker::default();
        assert_eq!(tracker.advance_to(source, 2), (2, 1));
        assert_eq!(tracker.advance_to(source, 1), (1, 2));
    }
}
