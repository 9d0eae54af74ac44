//! Math-mode grids: array, matrix and the amsmath bracket matrices.
//!
//! Cells are never wrapped in `$`; math mode instead surrounds the whole
//! body with `\[ ... \]`.

use super::options::{ArrayOptions, Decoration, MatrixOptions, SpecialMatrixKind};
use super::{
    close_display_math, close_stretch, column_count, open_display_math, open_stretch,
    push_column_spec, push_row, FormatOptions, AMSMATH_HINT,
};

pub(super) fn render_array(
    matrix: &[Vec<String>],
    array: &ArrayOptions,
    options: &FormatOptions,
) -> String {
    let rows = matrix.len();
    let cols = column_count(matrix);
    let borders = &array.borders;

    let mut out = String::new();
    open_stretch(&mut out, options);
    open_display_math(&mut out, options);
    open_decoration(&mut out, array.decoration);

    out.push_str("\\begin{array}");
    push_column_spec(&mut out, cols, array.align, borders);

    for (i, row) in matrix.iter().enumerate() {
        push_row(&mut out, row.iter().map(String::as_str));
        if borders.rule_below(i, rows) {
            out.push_str(" \\hline ");
        }
        out.push('\n');
    }

    out.push_str("\\end{array} \n");
    close_decoration(&mut out, array.decoration);
    close_display_math(&mut out, options);
    close_stretch(&mut out, options);
    out
}

pub(super) fn render_matrix(
    matrix: &[Vec<String>],
    matrix_options: &MatrixOptions,
    options: &FormatOptions,
) -> String {
    let mut out = String::from(AMSMATH_HINT);
    open_stretch(&mut out, options);
    open_display_math(&mut out, options);
    open_decoration(&mut out, matrix_options.decoration);

    push_environment(&mut out, "matrix", matrix);

    close_decoration(&mut out, matrix_options.decoration);
    close_display_math(&mut out, options);
    close_stretch(&mut out, options);
    out
}

pub(super) fn render_special_matrix(
    matrix: &[Vec<String>],
    kind: SpecialMatrixKind,
    options: &FormatOptions,
) -> String {
    let mut out = String::from(AMSMATH_HINT);
    open_stretch(&mut out, options);
    open_display_math(&mut out, options);

    push_environment(&mut out, kind.name(), matrix);

    close_display_math(&mut out, options);
    close_stretch(&mut out, options);
    out
}

fn push_environment(out: &mut String, name: &str, matrix: &[Vec<String>]) {
    out.push_str(&format!("\\begin{{{}}} \n", name));
    for row in matrix {
        push_row(out, row.iter().map(String::as_str));
        out.push('\n');
    }
    out.push_str(&format!("\\end{{{}}} \n", name));
}

fn open_decoration(out: &mut String, decoration: Decoration) {
    if let Some((left, _)) = decoration.delimiters() {
        out.push_str("\\left");
        out.push(left);
        out.push('\n');
    }
}

fn close_decoration(out: &mut String, decoration: Decoration) {
    if let Some((_, right)) = decoration.delimiters() {
        out.push_str("\\right");
        out.push(right);
        out.push('\n');
    }
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

    #[test]
    fn test_array_with_decoration_and_math() {
        let m = matrix(&[&["1", "0"], &["0", "1"]]);
        let array = ArrayOptions {
            align: Alignment::Center,
            borders: Borders::default(),
            decoration: Decoration::Parentheses,
        };
        let options = FormatOptions::new(Dialect::Array(array)).with_math_mode(true);
        assert_eq!(
            render_array(&m, &array, &options),
            "\\[ \n\
             \\left(\n\
             \\begin{array}{cc}\n\
             1 & 0 \\\\ \n\
             0 & 1 \\\\ \n\
             \\end{array} \n\
             \\right)\n\
             \\] \n"
        );
    }

    #[test]
    fn test_array_cells_not_dollar_wrapped() {
        let m = matrix(&[&["x"]]);
        let array = ArrayOptions::default();
        let options = FormatOptions::new(Dialect::Array(array)).with_math_mode(true);
        assert!(!render_array(&m, &array, &options).contains('$'));
    }

    #[test]
    fn test_array_borders() {
        let m = matrix(&[&["a", "b"], &["c", "d"]]);
        let array = ArrayOptions {
            borders: Borders {
                first_row: true,
                first_column: true,
                ..Default::default()
            },
            ..Default::default()
        };
        let options = FormatOptions::new(Dialect::Array(array));
        assert_eq!(
            render_array(&m, &array, &options),
            "\\begin{array}{l|l}\n\
             a & b \\\\  \\hline \n\
             c & d \\\\ \n\
             \\end{array} \n"
        );
    }

    #[test]
    fn test_matrix_with_bars() {
        let m = matrix(&[&["a", "b"]]);
        let matrix_options = MatrixOptions {
            decoration: Decoration::Bars,
        };
        let options = FormatOptions::new(Dialect::Matrix(matrix_options));
        assert_eq!(
            render_matrix(&m, &matrix_options, &options),
            "% Package: \\usepackage{amsmath} \n\n\
             \\left|\n\
             \\begin{matrix} \n\
             a & b \\\\ \n\
             \\end{matrix} \n\
             \\right|\n"
        );
    }

    #[test]
    fn test_special_matrix_kinds() {
        let m = matrix(&[&["1"]]);
        for kind in SpecialMatrixKind::ALL {
            let options = FormatOptions::new(Dialect::SpecialMatrix(kind));
            let out = render_special_matrix(&m, kind, &options);
            assert!(out.starts_with(AMSMATH_HINT));
            assert!(out.contains(&format!("\\begin{{{}}} \n1 \\\\ \n\\end{{{}}} \n", kind.name(), kind.name())));
        }
    }

    #[test]
    fn test_special_matrix_math_mode() {
        let m = matrix(&[&["1", "2"]]);
        let kind = SpecialMatrixKind::BMatrix;
        let options = FormatOptions::new(Dialect::SpecialMatrix(kind)).with_math_mode(true);
        assert_eq!(
            render_special_matrix(&m, kind, &options),
            "% Package: \\usepackage{amsmath} \n\n\
             \\[ \n\
             \\begin{bmatrix} \n\
             1 & 2 \\\\ \n\
             \\end{bmatrix} \n\
             \\] \n"
        );
    }
}
