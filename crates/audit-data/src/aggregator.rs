//! Call-volume aggregation over service areas.
//!
//! Sums validated records per service area and across the whole dataset.
//! Drop rates are never stored here: [`DropStats::drop_rate`] derives them
//! from the sums on demand, so re-ordering the input cannot change any
//! result.

use std::collections::BTreeMap;

use audit_core::models::{CallRecord, DropStats, ServiceAreaAggregate};

/// Stateless helper that groups call records by service area.
pub struct CallAggregator;

impl CallAggregator {
    /// Aggregate `records` by service area.
    ///
    /// Returns one aggregate per distinct area, sorted by area name so the
    /// output is deterministic regardless of input order.
    pub fn aggregate_by_area(records: &[CallRecord]) -> Vec<ServiceAreaAggregate> {
        // Use BTreeMap for automatically sorted keys.
        let mut map: BTreeMap<String, DropStats> = BTreeMap::new();

        for record in records {
            map.entry(record.service_area.clone())
                .or_default()
                .add_record(record);
        }

        map.into_iter()
            .map(|(service_area, stats)| ServiceAreaAggregate {
                service_area,
                stats,
            })
            .collect()
    }

    /// Sum every record into a single dataset-wide [`DropStats`].
    pub fn aggregate_overall(records: &[CallRecord]) -> DropStats {
        let mut totals = DropStats::default();
        for record in records {
            totals.add_record(record);
        }
        totals
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
