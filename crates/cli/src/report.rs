// Text rendering for reconciliation results.
// Pure functions: engine types in, strings out. No IO.

use fitdiff_recon::{Inventory, ReconSummary, ReconTable, SummaryViews};

use crate::util::{display_width, pad_right, signed};

const GAP: &str = "  ";

/// Left-aligned columns sized to the widest cell. The last column is not
/// padded, so lines carry no trailing whitespace.
fn render_grid(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| display_width(h)).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(display_width(cell));
        }
    }

    let mut out = render_line(&widths, headers.iter().copied());
    out.push('\n');
    for row in rows {
        out.push_str(&render_line(&widths, row.iter().map(String::as_str)));
        out.push('\n');
    }
    out
}

fn render_line<'a>(widths: &[usize], cells: impl Iterator<Item = &'a str>) -> String {
    let parts: Vec<String> = cells
        .enumerate()
        .map(|(i, cell)| {
            if i + 1 == widths.len() {
                cell.to_string()
            } else {
                pad_right(cell, widths[i])
            }
        })
        .collect();
    parts.join(GAP)
}

/// One titled block per view, in Correct / Missing / Extra order.
/// Empty views still print their title and header.
pub fn render_views(views: &SummaryViews) -> String {
    let blocks: Vec<String> = views
        .iter()
        .map(|(kind, rows)| {
            let cells: Vec<Vec<String>> = rows
                .iter()
                .map(|r| vec![r.item.clone(), r.quantity.to_string()])
                .collect();
            format!("{}:\n{}", kind.title(), render_grid(&["item", "quantity"], &cells))
        })
        .collect();
    blocks.join("\n")
}

/// Full reconciliation table: item, subject, reference, signed diff.
pub fn render_table(table: &ReconTable) -> String {
    let cells: Vec<Vec<String>> = table
        .rows()
        .iter()
        .map(|r| {
            vec![
                r.item.clone(),
                r.subject_qty.to_string(),
                r.reference_qty.to_string(),
                signed(r.diff),
            ]
        })
        .collect();
    format!(
        "Reconciliation:\n{}",
        render_grid(&["item", "subject", "reference", "diff"], &cells)
    )
}

pub fn render_inventory(inventory: &Inventory) -> String {
    let cells: Vec<Vec<String>> = inventory
        .iter()
        .map(|(item, qty)| vec![item.to_string(), qty.to_string()])
        .collect();
    render_grid(&["item", "quantity"], &cells)
}

/// One-line human summary for stderr.
pub fn summary_line(s: &ReconSummary) -> String {
    format!(
        "{} item(s): {} correct, {} missing ({} unit(s)), {} extra ({} unit(s))",
        s.total_items, s.correct, s.missing, s.missing_units, s.extra, s.extra_units,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitdiff_recon::{reconcile, InputFormat, InventorySource, ReconReport};

    fn scenario() -> ReconReport {
        reconcile(
            InventorySource::new("A x5\nB x2\n", InputFormat::Multibuy),
            InventorySource::new("B x2\nC x4\n", InputFormat::Multibuy),
        )
        .unwrap()
    }

    #[test]
    fn views_render_in_fixed_order() {
        let text = render_views(&scenario().views);
        assert_eq!(
            text,
            "Correct Items:\nitem  quantity\nB     2\n\
             \nMissing Items:\nitem  quantity\nC     4\n\
             \nExtra Items:\nitem  quantity\nA     5\n"
        );
    }

    #[test]
    fn empty_view_keeps_header() {
        let report = reconcile(
            InventorySource::new("Rifter x1\n", InputFormat::Multibuy),
            InventorySource::new("Rifter x1\n", InputFormat::Multibuy),
        )
        .unwrap();
        let text = render_views(&report.views);
        assert!(text.contains("Missing Items:\nitem  quantity\n\nExtra Items:"), "{text}");
        assert!(text.ends_with("Extra Items:\nitem  quantity\n"), "{text}");
        assert!(text.starts_with("Correct Items:\nitem    quantity\nRifter  1\n"), "{text}");
    }

    #[test]
    fn columns_sized_to_widest_item() {
        let report = reconcile(
            InventorySource::new("Republic Fleet EMP S x400\nRifter\n", InputFormat::Multibuy),
            InventorySource::new("", InputFormat::Multibuy),
        )
        .unwrap();
        let text = render_views(&report.views);
        assert!(text.contains("item                  quantity\n"), "{text}");
        assert!(text.contains("Republic Fleet EMP S  400\n"), "{text}");
        assert!(text.contains("Rifter                1\n"), "{text}");
    }

    #[test]
    fn table_has_signed_diffs() {
        let text = render_table(&scenario().table);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Reconciliation:");
        assert_eq!(lines[1], "item  subject  reference  diff");
        assert_eq!(lines[2], "A     5        0          +5");
        assert_eq!(lines[3], "B     2        2          0");
        assert_eq!(lines[4], "C     0        4          -4");
    }

    #[test]
    fn no_trailing_whitespace() {
        let text = render_table(&scenario().table) + &render_views(&scenario().views);
        for line in text.lines() {
            assert_eq!(line, line.trim_end(), "trailing space in {line:?}");
        }
    }

    #[test]
    fn summary_line_counts() {
        let line = summary_line(&scenario().summary);
        assert_eq!(line, "3 item(s): 1 correct, 1 missing (4 unit(s)), 1 extra (5 unit(s))");
    }
}
