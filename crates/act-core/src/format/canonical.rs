//! Canonical text form that parses back into the same act.

use crate::models::act::ActRecord;

use super::{format_plain, DATE_FORMAT};

/// Render `act` as header plus one canonical item line per item.
pub fn render_canonical(act: &ActRecord) -> String {
    let mut lines = Vec::with_capacity(act.items().len() + 1);
    lines.push(format!(
        "#АКТ {} | Объект: {}",
        act.date().format(DATE_FORMAT),
        act.object_name()
    ));

    for item in act.items() {
        lines.push(format!(
            "{} {} {} × {}₽",
            item.name(),
            format_plain(item.quantity()),
            item.unit(),
            format_plain(item.price())
        ));
    }

    lines.join("\n")
}
