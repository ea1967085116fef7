use crate::core::types::ColumnType;

/// tbl key letter for a data column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Numeric,
    Left,
}

impl Alignment {
    pub fn for_type(kind: ColumnType) -> Self {
        match kind {
            ColumnType::Integer | ColumnType::Float => Alignment::Numeric,
            ColumnType::Text | ColumnType::Blob | ColumnType::Null => Alignment::Left,
        }
    }

    pub fn key(self) -> char {
        match self {
            Alignment::Numeric => 'N',
            Alignment::Left => 'L',
        }
    }
}

/// Data layout line, e.g. `N L L .`.
pub fn layout_line(types: &[ColumnType]) -> String {
    let mut line = types
        .iter()
        .map(|&t| Alignment::for_type(t).key().to_string())
        .collect::<Vec<_>>()
        .join(" ");
    if !line.is_empty() {
        line.push(' ');
    }
    line.push('.');
    line
}

/// Heading layout line: each column left aligned in bold (`LB` per column).
pub fn heading_line(ncol: usize) -> String {
    "LB".repeat(ncol)
}

/// True if `format` contains `box` not adjoined by alphanumerics.
///
/// Every occurrence is checked, not only the first, so `allbox box` is boxed.
pub fn is_box(format: &str) -> bool {
    const WORD: &str = "box";
    format.match_indices(WORD).any(|(at, _)| {
        let before = format[..at].chars().next_back();
        let after = format[at + WORD.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_types_align_numeric() {
        assert_eq!(Alignment::for_type(ColumnType::Integer), Alignment::Numeric);
        assert_eq!(Alignment::for_type(ColumnType::Float), Alignment::Numeric);
        assert_eq!(Alignment::for_type(ColumnType::Text), Alignment::Left);
        assert_eq!(Alignment::for_type(ColumnType::Blob), Alignment::Left);
        assert_eq!(Alignment::for_type(ColumnType::Null), Alignment::Left);
    }

    #[test]
    fn test_layout_line() {
        let types = [ColumnType::Integer, ColumnType::Text, ColumnType::Null];
        assert_eq!(layout_line(&types), "N L L .");
        assert_eq!(layout_line(&[ColumnType::Float]), "N .");
        assert_eq!(layout_line(&[]), ".");
    }

    #[test]
    fn test_heading_line() {
        assert_eq!(heading_line(3), "LBLBLB");
        assert_eq!(heading_line(0), "");
    }

    #[test]
    fn test_is_box() {
        assert!(is_box("box"));
        assert!(!is_box("boxed"));
        assert!(is_box("a-box"));
        assert!(!is_box("boxer"));
        assert!(!is_box("abox"));
        assert!(is_box("center box"));
        assert!(is_box("allbox,box"));
        assert!(is_box("allbox box"));
        assert!(!is_box("allbox"));
        assert!(!is_box(""));
    }
}
