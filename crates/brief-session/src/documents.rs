//! Document references for the active session.

use tracing::debug;

use brief_core::types::DocumentReference;

/// Ordered, id-keyed set of document references.
///
/// Ids are unique within a session: `add` keeps the first reference seen
/// for an id and skips later ones, so concurrent upload settlements are
/// order-independent. `clear` exists solely for session reset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DocumentRegistry {
    references: Vec<DocumentReference>,
}

impl DocumentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a reference, skipping it if its id is already registered.
    pub fn add(&mut self, reference: DocumentReference) {
        if self.contains(&reference.id) {
            debug!(id = %reference.id, "skipping duplicate document reference");
            return;
        }
        self.references.push(reference);
    }

    /// Remove all references. Used only by session reset.
    pub fn clear(&mut self) {
        self.references.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.references.iter().any(|r| r.id == id)
    }

    pub fn references(&self) -> &[DocumentReference] {
        &self.references
    }

    pub fn len(&self) -> usize {
        self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }
}
