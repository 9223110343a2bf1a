//! Ranked result display.
//!
//! Turns a [`RankedResultSet`] into per-entry views: rank label, dps, signed
//! delta against the equipped baseline, and the slot-labelled items that
//! make up the combination. Order is taken as given by the engine.

use bs_core::{ItemSlot, ItemSpec, round_to_cents};

use crate::types::{BulkComboResult, RankedResultSet};

pub const NO_CHANGES_MESSAGE: &str = "No changes - this is your currently equipped gear!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaSign {
    Positive,
    Negative,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedItemLine {
    pub item: ItemSpec,
    pub slot: ItemSlot,
    pub slot_label: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntryView {
    /// 1-based position in the engine's ordering.
    pub rank: usize,
    pub rank_label: String,
    pub dps: f64,
    pub dps_label: String,
    pub delta: f64,
    /// Signed delta, or empty when the entry is the equipped gear.
    pub delta_label: String,
    pub delta_sign: DeltaSign,
    pub no_changes: bool,
    pub items: Vec<RankedItemLine>,
}

impl RankedEntryView {
    /// Message shown in place of the item list, if any.
    pub fn notice(&self) -> Option<&'static str> {
        self.no_changes.then_some(NO_CHANGES_MESSAGE)
    }
}

/// Format a dps value with two decimals. Non-finite values render as `n/a`.
pub fn format_dps(dps: f64) -> String {
    if !dps.is_finite() {
        return "n/a".to_string();
    }
    format!("{:.2}", round_to_cents(dps))
}

/// Format a dps delta with an explicit `+` for non-negative values.
pub fn format_dps_delta(delta: f64) -> String {
    if !delta.is_finite() {
        return "n/a".to_string();
    }
    let sign = if delta >= 0.0 { "+" } else { "" };
    format!("{}{}", sign, format_dps(delta))
}

pub fn rank_entry(result: &BulkComboResult, rank: usize, baseline: &BulkComboResult) -> RankedEntryView {
    let delta = result.dps_average - baseline.dps_average;
    let no_changes = result.is_baseline();

    let items = result
        .items_added
        .iter()
        .map(|is| RankedItemLine {
            item: is.item.clone(),
            slot: is.slot,
            slot_label: is.slot.display_name(),
        })
        .collect();

    RankedEntryView {
        rank,
        rank_label: format!("Rank {}", rank),
        dps: result.dps_average,
        dps_label: format_dps(result.dps_average),
        delta,
        delta_label: if no_changes {
            String::new()
        } else {
            format_dps_delta(delta)
        },
        delta_sign: if delta >= 0.0 {
            DeltaSign::Positive
        } else {
            DeltaSign::Negative
        },
        no_changes,
        items,
    }
}

/// Views for every result, ranked from 1 in the order provided.
pub fn rank_results(set: &RankedResultSet) -> Vec<RankedEntryView> {
    set.results
        .iter()
        .enumerate()
        .map(|(i, r)| rank_entry(r, i + 1, &set.baseline))
        .collect()
}

/// The results block is only shown when there is something in it.
pub fn results_visible(set: &RankedResultSet) -> bool {
    !set.results.is_empty()
}
