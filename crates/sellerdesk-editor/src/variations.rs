//! Ordered, contiguous list of variation rows.

use sellerdesk_core::VariationDraft;

use crate::error::EditorError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariationList {
    rows: Vec<VariationDraft>,
}

impl VariationList {
    #[must_use]
    pub fn new(rows: Vec<VariationDraft>) -> Self {
        Self { rows }
    }

    /// Appends one empty row and returns its index.
    pub fn add(&mut self) -> usize {
        self.rows.push(VariationDraft::default());
        self.rows.len() - 1
    }

    /// Removes and returns the row at `index`; later rows shift down.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::VariationIndex`] when `index` is out of range.
    pub fn delete(&mut self, index: usize) -> Result<VariationDraft, EditorError> {
        if index >= self.rows.len() {
            return Err(EditorError::VariationIndex {
                index,
                len: self.rows.len(),
            });
        }
        Ok(self.rows.remove(index))
    }

    /// Whether the editor offers a delete action for the row. The first row
    /// is fixed.
    #[must_use]
    pub fn can_delete(&self, index: usize) -> bool {
        index >= 1 && index < self.rows.len()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&VariationDraft> {
        self.rows.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut VariationDraft> {
        self.rows.get_mut(index)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[VariationDraft] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VariationDraft> {
        self.rows.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Ids of rows the server already knows about.
    pub fn persisted_ids(&self) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .filter(|v| v.is_persisted())
            .filter_map(|v| v.id.as_deref())
    }
}
