//! Create / update / skip decision for the delivery-date metafield.
//!
//! [`decide`] is pure: it inspects what the preorder service reported and what
//! the platform currently stores, and names the single write (if any) that
//! brings the two in line. Callers execute the write.

use crate::metafield::{MetafieldId, MetafieldRecord};

/// Preorder data resolved for one product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreorderInfo {
    /// Display-formatted date, e.g. `"Jun 12, 2025"`. Compared as an opaque string.
    pub delivery_date: Option<String>,
}

impl PreorderInfo {
    #[must_use]
    pub fn new(delivery_date: impl Into<String>) -> Self {
        Self {
            delivery_date: Some(delivery_date.into()),
        }
    }

    #[must_use]
    pub fn absent() -> Self {
        Self::default()
    }

    /// The delivery date, with blank strings treated as absent.
    #[must_use]
    pub fn date(&self) -> Option<&str> {
        self.delivery_date.as_deref().filter(|d| !d.trim().is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoPreorderData,
    AlreadyUpToDate,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NoPreorderData => write!(f, "no preorder data"),
            SkipReason::AlreadyUpToDate => write!(f, "already up to date"),
        }
    }
}

/// The write that [`decide`] selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncDecision {
    Skip(SkipReason),
    /// No delivery-date metafield exists; create one.
    Create { value: String },
    /// The existing metafield holds a different value; overwrite it in place.
    Update { id: MetafieldId, value: String },
}

/// What actually happened for one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Skipped(SkipReason),
    Created(MetafieldRecord),
    Updated(MetafieldRecord),
}

/// Compares fetched preorder data against the stored metafield.
///
/// - no delivery date: `Skip(NoPreorderData)`, whatever is stored
/// - nothing stored: `Create`
/// - stored value equals the date exactly: `Skip(AlreadyUpToDate)`
/// - anything else (including a stored `null`): `Update` the existing record
///
/// An existing record is never shadowed by a second `Create`.
#[must_use]
pub fn decide(fetched: &PreorderInfo, existing: Option<&MetafieldRecord>) -> SyncDecision {
    let Some(date) = fetched.date() else {
        return SyncDecision::Skip(SkipReason::NoPreorderData);
    };

    match existing {
        None => SyncDecision::Create {
            value: date.to_owned(),
        },
        Some(record) if record.value.as_deref() == Some(date) => {
            SyncDecision::Skip(SkipReason::AlreadyUpToDate)
        }
        Some(record) => SyncDecision::Update {
            id: record.id,
            value: date.to_owned(),
        },
    }
}
