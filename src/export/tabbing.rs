//! tabbing environment: uniform tab stops, no rules.

use super::options::TabbingOptions;
use super::{column_count, FormatOptions};

pub(super) fn render(
    matrix: &[Vec<String>],
    tabbing: &TabbingOptions,
    options: &FormatOptions,
) -> String {
    let cols = column_count(matrix);
    let mut out = String::from("\\begin{tabbing} \n");

    for _ in 0..cols {
        out.push_str(&format!("\\hspace{{{}pt}}\\=", tabbing.width_pt()));
    }
    out.push_str("\\kill \n");

    for row in matrix {
        let cells: Vec<String> = row
            .iter()
            .map(|text| {
                if options.math_mode {
                    format!("${}$", text)
                } else {
                    text.clone()
                }
            })
            .collect();
        out.push_str(&cells.join(" \\> "));
        out.push_str(" \\\\ \n");
    }

    out.push_str("\\end{tabbing} \n");
    out
}
