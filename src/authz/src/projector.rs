//! Field redaction by projection
//!
//! Pure functions: given a granted tier, keep every field tagged at or below
//! it and drop the rest. Dropped fields are omitted outright, never replaced
//! with masked placeholders, so a projection leaks neither values nor the
//! shape of fields the viewer is not entitled to.

use crate::engine::decision::AccessDecision;
use tamshai_directory::{PartialRecord, Record, Tier};

/// Project a record down to the fields visible at a tier
pub fn project(record: &Record, tier: Tier) -> PartialRecord {
    let fields = record
        .fields
        .iter()
        .filter(|(_, field)| field.tier <= tier)
        .map(|(name, field)| (name.clone(), field.clone()))
        .collect();

    PartialRecord {
        owner: record.owner.clone(),
        resource_type: record.resource_type.clone(),
        tier,
        fields,
    }
}

/// Project a record under a decision; `None` when the decision denied
pub fn project_for_decision(record: &Record, decision: &AccessDecision) -> Option<PartialRecord> {
    decision.granted_tier.map(|tier| project(record, tier))
}
