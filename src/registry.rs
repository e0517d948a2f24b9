//! Ordered, append-only collection of curves.

use crate::curve::Curve;

/// The dataset registry backing a chart.
///
/// Insertion order is display and legend order. There is no update-in-place
/// or remove-one; replacing a curve means clearing and re-plotting.
#[derive(Debug, Clone, Default)]
pub struct DatasetRegistry {
    curves: Vec<Curve>,
}

impl DatasetRegistry {
    /// Create an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self { curves: Vec::new() }
    }

    /// Append a curve at the end.
    pub fn add_curve(&mut self, curve: Curve) {
        self.curves.push(curve);
    }

    /// Remove every curve. Clearing an empty registry is a no-op.
    pub fn clear(&mut self) {
        self.curves.clear();
    }

    /// Read-only view of the curves in display order.
    #[must_use]
    pub fn curves(&self) -> &[Curve] {
        &self.curves
    }

    /// The most recently added curve.
    #[must_use]
    pub fn last(&self) -> Option<&Curve> {
        self.curves.last()
    }

    /// Iterate curves in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, Curve> {
        self.curves.iter()
    }

    /// Legend labels in display order.
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.curves.iter().map(Curve::label).collect()
    }

    /// Number of curves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    /// Whether the registry holds no curves.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }
}

impl<'a> IntoIterator for &'a DatasetRegistry {
    type Item = &'a Curve;
    type IntoIter = std::slice::Iter<'a, Curve>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
