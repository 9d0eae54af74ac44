//! longtable and tabular environments.

use super::{close_stretch, column_count, open_stretch, push_column_spec, FormatOptions};
use super::options::{HeaderStyle, TableOptions};

pub(super) fn render(
    matrix: &[Vec<String>],
    table: &TableOptions,
    options: &FormatOptions,
    long: bool,
) -> String {
    let rows = matrix.len();
    let cols = column_count(matrix);
    let borders = &table.borders;
    let environment = if long { "longtable" } else { "tabular" };

    // Header rows beyond the table collapse onto the last row
    let header_rows = table
        .column_header
        .map(|header| header.count.min(rows))
        .unwrap_or(0);

    let mut out = String::new();
    if long {
        out.push_str("% Package: \\usepackage{longtable} \n\n");
    }
    open_stretch(&mut out, options);

    if long {
        out.push_str("\\begin{longtable}[l]");
    } else {
        out.push_str("\\begin{tabular}");
    }
    push_column_spec(&mut out, cols, table.align, borders);

    for (i, row) in matrix.iter().enumerate() {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(j, text)| {
                let item = if options.math_mode {
                    format!("${}$", text)
                } else {
                    text.clone()
                };

                let header = match (table.column_header, table.row_header) {
                    (Some(header), _) if i < header.count => Some(header),
                    (_, Some(header)) if j < header.count => Some(header),
                    _ => None,
                };

                match header {
                    Some(style) => {
                        let div_left = j == 0 && borders.left_of_first();
                        let div_right = borders.right_of(j, cols);
                        header_span(&item, &style, div_left, div_right)
                    }
                    None => item,
                }
            })
            .collect();

        super::push_row(&mut out, cells.iter().map(String::as_str));
        if borders.rule_below(i, rows) {
            out.push_str(" \\hline ");
        }
        out.push('\n');

        if long && table.column_header.is_some() && i + 1 == header_rows {
            out.push_str("\\endhead \n");
            out.push_str("\\endfoot \n");
            out.push_str("\\endlastfoot \n");
        }
    }

    out.push_str(&format!("\\end{{{}}} \n", environment));
    close_stretch(&mut out, options);
    out
}

/// Wrap a header cell in its styling and a one-column `\multicolumn` span
fn header_span(item: &str, style: &HeaderStyle, div_left: bool, div_right: bool) -> String {
    let mut code = item.to_string();
    if style.underline {
        code = format!("\\underline{{{}}}", code);
    }
    if style.italic {
        code = format!("\\textit{{{}}}", code);
    }
    if style.bold {
        code = format!("\\textbf{{{}}}", code);
    }

    let mut spec = String::new();
    if div_left {
        spec.push('|');
    }
    spec.push(style.align.code());
    if div_right {
        spec.push('|');
    }

    format!("\\multicolumn{{1}}{{{}}}{{{}}}", spec, code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::options::{Alignment, Borders, Dialect};
    use pretty_assertions::assert_eq;

    fn matrix(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    fn tabular(table: TableOptions) -> FormatOptions {
        FormatOptions::new(Dialect::Tabular(table))
    }

    #[test]
    fn test_plain_tabular() {
        let m = matrix(&[&["a", "b"], &["c", "d"]]);
        let table = TableOptions::default();
        let out = render(&m, &table, &tabular(table), false);
        assert_eq!(
            out,
            "\\begin{tabular}{ll}\na & b \\\\ \nc & d \\\\ \n\\end{tabular} \n"
        );
    }

    #[test]
    fn test_bordered_tabular() {
        let m = matrix(&[&["a", "b"], &["c", "d"]]);
        let table = TableOptions {
            borders: Borders {
                border: true,
                ..Default::default()
            },
            ..Default::default()
        };
        let out = render(&m, &table, &tabular(table), false);
        assert_eq!(
            out,
            "\\begin{tabular}{|ll|} \\hline \n\
             a & b \\\\ \n\
             c & d \\\\  \\hline \n\
             \\end{tabular} \n"
        );
    }

    #[test]
    fn test_math_mode_wraps_each_cell() {
        let m = matrix(&[&["x^2", "y"]]);
        let table = TableOptions::default();
        let out = render(&m, &table, &tabular(table).with_math_mode(true), false);
        assert!(out.contains("$x^2$ & $y$ \\\\ "));
    }

    #[test]
    fn test_header_span_nesting() {
        let style = HeaderStyle {
            align: Alignment::Center,
            bold: true,
            italic: true,
            underline: true,
            count: 1,
        };
        assert_eq!(
            header_span("Name", &style, true, true),
            "\\multicolumn{1}{|c|}{\\textbf{\\textit{\\underline{Name}}}}"
        );
        let plain = HeaderStyle::default();
        assert_eq!(header_span("x", &plain, false, false), "\\multicolumn{1}{l}{x}");
    }

    #[test]
    fn test_column_header_beats_row_header() {
        let m = matrix(&[&["h1", "h2"], &["r", "v"]]);
        let table = TableOptions {
            column_header: Some(HeaderStyle {
                bold: true,
                ..Default::default()
            }),
            row_header: Some(HeaderStyle {
                italic: true,
                ..Default::default()
            }),
            ..Default::default()
        };
        let out = render(&m, &table, &tabular(table), false);
        assert!(out.contains("\\multicolumn{1}{l}{\\textbf{h1}} & \\multicolumn{1}{l}{\\textbf{h2}} \\\\ "));
        assert!(out.contains("\\multicolumn{1}{l}{\\textit{r}} & v \\\\ "));
    }

    #[test]
    fn test_header_dividers_follow_borders() {
        let m = matrix(&[&["a", "b", "c"], &["d", "e", "f"]]);
        let table = TableOptions {
            borders: Borders {
                border: true,
                ..Default::default()
            },
            column_header: Some(HeaderStyle::default()),
            ..Default::default()
        };
        let out = render(&m, &table, &tabular(table), false);
        assert!(out.contains(
            "\\multicolumn{1}{|l}{a} & \\multicolumn{1}{l}{b} & \\multicolumn{1}{l|}{c} \\\\ "
        ));
    }

    #[test]
    fn test_longtable_markers_after_header_rows() {
        let m = matrix(&[&["h"], &["a"], &["b"]]);
        let table = TableOptions {
            column_header: Some(HeaderStyle {
                count: 2,
                ..Default::default()
            }),
            ..Default::default()
        };
        let options = FormatOptions::new(Dialect::LongTable(table));
        let out = render(&m, &table, &options, true);

        assert!(out.starts_with("% Package: \\usepackage{longtable} \n\n\\begin{longtable}[l]{l}\n"));
        let expected = "\\multicolumn{1}{l}{a} \\\\ \n\\endhead \n\\endfoot \n\\endlastfoot \nb \\\\ \n";
        assert!(out.contains(expected), "{}", out);
        assert!(out.ends_with("\\end{longtable} \n"));
    }

    #[test]
    fn test_longtable_header_count_clamped() {
        let m = matrix(&[&["a"], &["b"]]);
        let table = TableOptions {
            column_header: Some(HeaderStyle {
                count: 50,
                ..Default::default()
            }),
            ..Default::default()
        };
        let options = FormatOptions::new(Dialect::LongTable(table));
        let out = render(&m, &table, &options, true);

        assert_eq!(out.matches("\\endhead").count(), 1);
        assert!(out.contains("\\multicolumn{1}{l}{b} \\\\ \n\\endhead \n"));
    }

    #[test]
    fn test_tabular_has_no_longtable_markers() {
        let m = matrix(&[&["a"], &["b"]]);
        let table = TableOptions {
            column_header: Some(HeaderStyle::default()),
            ..Default::default()
        };
        let out = render(&m, &table, &tabular(table), false);
        assert!(!out.contains("\\endhead"));
        assert!(!out.contains("usepackage"));
    }
}
