//! Export engine: grid contents x format options -> text.
//!
//! LaTeX output is produced by one renderer per dialect; the remaining
//! formats (tab-delimited, HTML, delimited literals, algebra-system
//! constructors) come straight from [`crate::codec`].

mod array;
pub mod options;
mod tabbing;
mod table;

pub use options::{
    Alignment, ArrayOptions, Borders, Decoration, Dialect, ExportPreferences, FormatOptions,
    GridType, HeaderStyle, MatrixOptions, SpecialMatrixKind, TabbingOptions, TableOptions,
};

use crate::codec;
use crate::error::{GridError, GridResult};

/// Every export the editor offers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    TabDelimited,
    Html,
    /// `[[1,2],[3,4]]`
    Brackets,
    /// `{{1,2},{3,4}}` (GeoGebra lists)
    Braces,
    /// `<<1,2>,<3,4>>`
    AngleBrackets,
    Maxima,
    Sage,
    Markup(FormatOptions),
}

impl ExportFormat {
    /// Tags for the non-LaTeX formats
    pub const PLAIN_TAGS: [&'static str; 7] =
        ["tab", "html", "brackets", "braces", "angle", "maxima", "sage"];

    /// Resolve a format tag. LaTeX grid-type tags take their options from `prefs`.
    pub fn from_tag(tag: &str, prefs: &ExportPreferences) -> GridResult<Self> {
        let format = match tag.trim() {
            "tab" => ExportFormat::TabDelimited,
            "html" => ExportFormat::Html,
            "brackets" => ExportFormat::Brackets,
            "braces" => ExportFormat::Braces,
            "angle" => ExportFormat::AngleBrackets,
            "maxima" => ExportFormat::Maxima,
            "sage" => ExportFormat::Sage,
            other => {
                let grid_type: GridType = other.parse()?;
                ExportFormat::Markup(prefs.format_options_for(grid_type))
            }
        };
        Ok(format)
    }

    /// Short description for menus and status messages
    pub fn description(&self) -> String {
        match self {
            ExportFormat::TabDelimited => "tab-delimited text".to_string(),
            ExportFormat::Html => "HTML table".to_string(),
            ExportFormat::Brackets => "[ ] list".to_string(),
            ExportFormat::Braces => "{ } list".to_string(),
            ExportFormat::AngleBrackets => "< > list".to_string(),
            ExportFormat::Maxima => "Maxima matrix".to_string(),
            ExportFormat::Sage => "Sage matrix".to_string(),
            ExportFormat::Markup(options) => format!("LaTeX {}", options.grid_type()),
        }
    }
}

/// Render `matrix` in the requested format
pub fn render(matrix: &[Vec<String>], format: &ExportFormat) -> String {
    match format {
        ExportFormat::TabDelimited => codec::to_tab_delimited(matrix),
        ExportFormat::Html => codec::to_html(matrix),
        ExportFormat::Brackets => codec::to_delimited(matrix, "[", "]"),
        ExportFormat::Braces => codec::to_delimited(matrix, "{", "}"),
        ExportFormat::AngleBrackets => codec::to_delimited(matrix, "<", ">"),
        ExportFormat::Maxima => codec::to_maxima(matrix),
        ExportFormat::Sage => codec::to_sage(matrix),
        ExportFormat::Markup(options) => render_markup(matrix, options),
    }
}

/// Render `matrix` as LaTeX using the dialect selected in `options`
pub fn render_markup(matrix: &[Vec<String>], options: &FormatOptions) -> String {
    tracing::debug!(
        grid_type = %options.grid_type(),
        rows = matrix.len(),
        "rendering LaTeX"
    );
    match &options.dialect {
        Dialect::LongTable(table) => table::render(matrix, table, options, true),
        Dialect::Tabular(table) => table::render(matrix, table, options, false),
        Dialect::Tabbing(tabbing) => tabbing::render(matrix, tabbing, options),
        Dialect::Array(array) => array::render_array(matrix, array, options),
        Dialect::Matrix(matrix_options) => array::render_matrix(matrix, matrix_options, options),
        Dialect::SpecialMatrix(kind) => array::render_special_matrix(matrix, *kind, options),
    }
}

/// Render by textual grid-type tag, reporting unknown tags
pub fn render_tagged(
    matrix: &[Vec<String>],
    tag: &str,
    prefs: &ExportPreferences,
) -> GridResult<String> {
    let grid_type: GridType = tag.parse().map_err(|err: GridError| {
        tracing::warn!("export requested for {}", err);
        err
    })?;
    Ok(render_markup(matrix, &prefs.format_options_for(grid_type)))
}

// ========== Shared Pieces ==========

const AMSMATH_HINT: &str = "% Package: \\usepackage{amsmath} \n\n";

fn open_stretch(out: &mut String, options: &FormatOptions) {
    if options.stretch {
        out.push_str("{ \n");
        out.push_str("\\renewcommand{\\arraystretch}{1.0}\n\n");
    }
}

fn close_stretch(out: &mut String, options: &FormatOptions) {
    if options.stretch {
        out.push_str("} \n");
    }
}

fn open_display_math(out: &mut String, options: &FormatOptions) {
    if options.math_mode {
        out.push_str("\\[ \n");
    }
}

fn close_display_math(out: &mut String, options: &FormatOptions) {
    if options.math_mode {
        out.push_str("\\] \n");
    }
}

/// `{|l|l|}`-style column spec followed by the optional top rule and a newline
fn push_column_spec(out: &mut String, cols: usize, align: Alignment, borders: &Borders) {
    out.push('{');
    if borders.left_of_first() {
        out.push('|');
    }
    for col in 0..cols {
        out.push(align.code());
        if borders.right_of(col, cols) {
            out.push('|');
        }
    }
    out.push('}');
    if borders.rule_on_top() {
        out.push_str(" \\hline ");
    }
    out.push('\n');
}

/// Cells joined by ` & `, terminated by ` \\ `
fn push_row<'a, I>(out: &mut String, cells: I)
where
    I: IntoIterator<Item = &'a str>,
{
    let mut first = true;
    for cell in cells {
        if !first {
            out.push_str(" & ");
        }
        out.push_str(cell);
        first = false;
    }
    out.push_str(" \\\\ ");
}

fn column_count(matrix: &[Vec<String>]) -> usize {
    matrix.first().map_or(0, Vec::len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    fn matrix(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_plain_formats() {
        let m = matrix(&[&["1", "2"], &["3", "4"]]);
        assert_eq!(render(&m, &ExportFormat::Brackets), "[[1,2],[3,4]]");
        assert_eq!(render(&m, &ExportFormat::Braces), "{{1,2},{3,4}}");
        assert_eq!(render(&m, &ExportFormat::AngleBrackets), "<<1,2>,<3,4>>");
        assert_eq!(render(&m, &ExportFormat::Maxima), "matrix([1,2],[3,4])");
        assert_eq!(render(&m, &ExportFormat::Sage), "matrix(QQ, [[1,2],[3,4]])");
        assert_eq!(render(&m, &ExportFormat::TabDelimited), "1\t2\n3\t4\n");
    }

    #[test]
    fn test_format_tags() {
        let prefs = ExportPreferences::default();
        for tag in ExportFormat::PLAIN_TAGS {
            assert!(ExportFormat::from_tag(tag, &prefs).is_ok(), "{}", tag);
        }
        assert_matches!(
            ExportFormat::from_tag("tabular", &prefs),
            Ok(ExportFormat::Markup(FormatOptions {
                dialect: Dialect::Tabular(_),
                ..
            }))
        );
        assert_matches!(
            ExportFormat::from_tag("csv", &prefs),
            Err(GridError::UnknownGridType(_))
        );
    }

    #[test]
    fn test_render_tagged_unknown() {
        let m = matrix(&[&["a"]]);
        let prefs = ExportPreferences::default();
        assert_matches!(
            render_tagged(&m, "supertabular", &prefs),
            Err(GridError::UnknownGridType(tag)) if tag == "supertabular"
        );
        assert!(render_tagged(&m, "matrix", &prefs)
            .unwrap()
            .contains("\\begin{matrix}"));
    }

    #[test]
    fn test_column_spec() {
        let mut out = String::new();
        let borders = Borders {
            border: true,
            first_column: true,
            ..Default::default()
        };
        push_column_spec(&mut out, 3, Alignment::Center, &borders);
        assert_eq!(out, "{|c|cc|} \\hline \n");
    }

    #[test]
    fn test_stretch_wrapper() {
        let m = matrix(&[&["a"]]);
        let options = FormatOptions::new(Dialect::Matrix(MatrixOptions::default())).with_stretch(true);
        let out = render_markup(&m, &options);
        assert!(out.contains("{ \n\\renewcommand{\\arraystretch}{1.0}\n\n\\begin{matrix}"));
        assert!(out.ends_with("\\end{matrix} \n} \n"));
    }
}
