//! Opaque alphabetic column labels: `a, b, ..., z, aa, ab, ..., zz, aaa, ...`.

/// Restartable, unbounded iterator over lowercase alphabetic labels.
///
/// Labels are ordered by length first and lexicographically within a
/// length, so the 27th label is `aa` and the 703rd is `aaa`.
#[derive(Debug, Clone, Default)]
pub struct ColumnLabels {
    next: usize,
}

impl ColumnLabels {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Iterator for ColumnLabels {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        let label = column_label(self.next);
        self.next += 1;
        Some(label)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.next += n;
        self.next()
    }
}

/// Label for the zero-based column position `index` (bijective base 26).
pub fn column_label(index: usize) -> String {
    let mut remaining = index + 1;
    let mut letters = Vec::new();
    while remaining > 0 {
        remaining -= 1;
        letters.push(b'a' + (remaining % 26) as u8);
        remaining /= 26;
    }
    letters.reverse();
    letters.into_iter().map(char::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_labels() {
        let labels: Vec<String> = ColumnLabels::new().take(3).collect();
        assert_eq!(labels, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_length_boundaries() {
        assert_eq!(column_label(25), "z");
        assert_eq!(column_label(26), "aa");
        assert_eq!(column_label(27), "ab");
        assert_eq!(column_label(51), "az");
        assert_eq!(column_label(52), "ba");
        assert_eq!(column_label(701), "zz");
        assert_eq!(column_label(702), "aaa");
    }

    #[test]
    fn test_nth_matches_direct_index() {
        let mut labels = ColumnLabels::new();
        assert_eq!(labels.nth(26).as_deref(), Some("aa"));
        assert_eq!(labels.next().as_deref(), Some("ab"));
    }

    #[test]
    fn test_sequence_snapshot() {
        let labels: Vec<String> = ColumnLabels::new().skip(24).take(6).collect();
        insta::assert_snapshot!(labels.join(","), @"y,z,aa,ab,ac,ad");
    }
}
