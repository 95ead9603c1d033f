use crate::changes::ChangeMap;
use crate::record::Ordered;

/// Produce a new snapshot with `changes` applied, sorted ascending by order
///
/// The input is left untouched. The sort is stable, so records sharing a key
/// keep their relative position.
pub fn apply_changes<R: Ordered>(records: &[R], changes: &ChangeMap<R::Id>) -> Vec<R> {
    let mut updated: Vec<R> = records
        .iter()
        .map(|record| {
            let mut record = record.clone();
            if let Some(order) = changes.get(record.id()) {
                record.set_order(order);
            }
            record
        })
        .collect();

    updated.sort_by_key(|record| record.order());
    updated
}
