//! Source locations

/// A byte range in the source together with the line it starts on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    /// 1-based line of `start`
    pub line: u32,
}

impl Span {
    pub fn new(start: usize, end: usize, line: u32) -> Self {
        Self { start, end, line }
    }

    /// Smallest span covering both `self` and `other`
    pub fn merge(self, other: Span) -> Span {
        let first = if other.start < self.start { other } else { self };
        Span {
            start: first.start,
            end: self.end.max(other.end),
            line: first.line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_earliest_line() {
        let a = Span::new(10, 14, 2);
        let b = Span::new(30, 31, 4);
        assert_eq!(a.merge(b), Span::new(10, 31, 2));
        assert_eq!(b.merge(a), Span::new(10, 31, 2));
    }
}
