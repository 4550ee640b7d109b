//! Row types

/// One row of cell text, in column order
///
/// A cell is either present (possibly with empty text) or absent. Absence
/// means the source had no entry at that position, which the mapper treats
/// differently from an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Row {
    cells: Vec<Option<String>>,
}

impl Row {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty row with room for `capacity` cells
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cells: Vec::with_capacity(capacity),
        }
    }

    /// Create a row where every cell is present
    pub fn from_text<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: cells.into_iter().map(|s| Some(s.into())).collect(),
        }
    }

    /// Append a present cell
    pub fn push<S: Into<String>>(&mut self, text: S) {
        self.cells.push(Some(text.into()));
    }

    /// Append an absent cell
    pub fn push_absent(&mut self) {
        self.cells.push(None);
    }

    /// Set the cell at `index`, padding with absent cells as needed
    pub fn set(&mut self, index: usize, text: Option<String>) {
        if index >= self.cells.len() {
            self.cells.resize(index + 1, None);
        }
        self.cells[index] = text;
    }

    /// Get the text of a cell, or `None` if it is absent or out of range
    pub fn cell(&self, index: usize) -> Option<&str> {
        self.cells.get(index).and_then(|c| c.as_deref())
    }

    /// Iterate over all cell positions
    pub fn cells(&self) -> impl Iterator<Item = Option<&str>> + '_ {
        self.cells.iter().map(|c| c.as_deref())
    }

    /// Number of cell positions (present or absent)
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if row has no cell positions
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl From<Vec<Option<String>>> for Row {
    fn from(cells: Vec<Option<String>>) -> Self {
        Self { cells }
    }
}

impl<S: Into<String>> FromIterator<S> for Row {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_text(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_differs_from_empty() {
        let mut row = Row::new();
        row.push("");
        row.push_absent();

        assert_eq!(row.len(), 2);
        assert_eq!(row.cell(0), Some(""));
        assert_eq!(row.cell(1), None);
        assert_eq!(row.cell(5), None);
    }

    #[test]
    fn test_set_pads_with_absent_cells() {
        let mut row = Row::new();
        row.set(2, Some("C".into()));

        assert_eq!(row.len(), 3);
        assert_eq!(row.cells().collect::<Vec<_>>(), vec![None, None, Some("C")]);
    }

    #[test]
    fn test_collect_from_strings() {
        let row: Row = ["Id", "Name"].into_iter().collect();
        assert_eq!(row, Row::from_text(vec!["Id", "Name"]));
    }
}
