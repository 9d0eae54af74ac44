//! Conversions between the cell matrix and flat interchange text.

use regex::Regex;
use std::sync::OnceLock;

/// Placeholder that protects `\&` while splitting on `&`
const AMP_SENTINEL: &str = "<~~amp~~>";

/// Cells joined by tabs, every row terminated by a newline
pub fn to_tab_delimited(matrix: &[Vec<String>]) -> String {
    let mut out = String::new();
    for row in matrix {
        out.push_str(&row.join("\t"));
        out.push('\n');
    }
    out
}

/// Split text into rows on newlines and into cells on tabs.
///
/// A trailing carriage return on each line is dropped, as are blank lines
/// at the end of the text.
pub fn from_tab_delimited(text: &str) -> Vec<Vec<String>> {
    let mut lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    lines
        .into_iter()
        .map(|line| line.split('\t').map(str::to_string).collect())
        .collect()
}

/// Wrap the matrix and each row in `left`...`right`, cells comma-joined.
///
/// `[[1,2],[3,4]]` for brackets, `{{1,2},{3,4}}` for braces.
pub fn to_delimited(matrix: &[Vec<String>], left: &str, right: &str) -> String {
    let rows: Vec<String> = matrix
        .iter()
        .map(|row| format!("{}{}{}", left, row.join(","), right))
        .collect();
    format!("{}{}{}", left, rows.join(","), right)
}

/// Maxima matrix constructor: `matrix([1,2],[3,4])`
pub fn to_maxima(matrix: &[Vec<String>]) -> String {
    let rows: Vec<String> = matrix
        .iter()
        .map(|row| format!("[{}]", row.join(",")))
        .collect();
    format!("matrix({})", rows.join(","))
}

/// SageMath matrix over the rationals: `matrix(QQ, [[1,2],[3,4]])`
pub fn to_sage(matrix: &[Vec<String>]) -> String {
    format!("matrix(QQ, {})", to_delimited(matrix, "[", "]"))
}

/// Bordered HTML table. Cell text is emitted verbatim (no escaping).
pub fn to_html(matrix: &[Vec<String>]) -> String {
    let mut out = String::from("<TABLE BORDER=1 CELLPADDING=1 CELLSPACING=0>\n");
    for row in matrix {
        out.push_str("<TR>\n");
        for cell in row {
            out.push_str("<TD>");
            out.push_str(cell);
            out.push_str("</TD>");
        }
        out.push_str("\n</TR>\n");
    }
    out.push_str("</TABLE>");
    out
}

fn markup_noise() -> &'static Regex {
    static NOISE: OnceLock<Regex> = OnceLock::new();
    NOISE.get_or_init(|| {
        let patterns = [
            // row rules
            r"\\hline",
            r"\\cline\{[^}]*\}",
            r"\\(?:toprule|midrule|bottomrule)(?:\[[^\]]*\])?",
            // longtable head/foot markers
            r"\\end(?:firsthead|head|lastfoot|foot)\b",
            // environment delimiters with their optional/column arguments
            r"\\begin\{[^}]*\}(?:\[[^\]]*\])?(?:\{[^}]*\})?",
            r"\\end\{[^}]*\}",
        ];
        Regex::new(&patterns.join("|")).expect("markup noise pattern is valid")
    })
}

/// Lines that only open or close the wrappers placed around an environment
fn markup_scaffold() -> &'static Regex {
    static SCAFFOLD: OnceLock<Regex> = OnceLock::new();
    SCAFFOLD.get_or_init(|| {
        let lines = [
            // stretch scope
            r"\{",
            r"\}",
            r"\\renewcommand\{\\arraystretch\}\{[^}]*\}",
            // display math
            r"\\\[",
            r"\\\]",
            // array decoration
            r"\\(?:left|right)(?:\\[{}|]|[()\[\]|.])",
            // tabbing stops
            r".*\\kill",
        ];
        Regex::new(&format!(r"(?m)^[ \t]*(?:{})[ \t]*$", lines.join("|")))
            .expect("markup scaffold pattern is valid")
    })
}

/// `%` up to the end of the line, unless the `%` itself is escaped
fn markup_comment() -> &'static Regex {
    static COMMENT: OnceLock<Regex> = OnceLock::new();
    COMMENT.get_or_init(|| {
        Regex::new(r"(?m)(^|[^\\])((?:\\\\)*)%.*$").expect("markup comment pattern is valid")
    })
}

/// Best-effort lexer for LaTeX table source.
///
/// Rows are split on `\\` and cells on `&` (or `\>` inside tabbing);
/// escaped ampersands survive. Rules, environment delimiters, longtable
/// markers, comments and the stretch, display-math and `\left`/`\right`
/// lines the exporter wraps around a table are dropped. Nested braces and
/// commands inside a cell pass through as-is.
pub fn parse_markup_table(text: &str) -> Vec<Vec<String>> {
    let mut text = text.replace('\r', "").replace("\\&", AMP_SENTINEL);
    if text.contains("\\begin{tabbing}") {
        text = text.replace("\\>", "&");
    }
    let text = markup_comment().replace_all(&text, "$1$2");
    let text = markup_scaffold().replace_all(&text, "");
    let text = markup_noise().replace_all(&text, "");

    text.split("\\\\")
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            line.split('&')
                .map(|cell| cell.replace(AMP_SENTINEL, "\\&").trim().to_string())
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn matrix(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_tab_delimited() {
        let m = matrix(&[&["a", "b"], &["c", "d"]]);
        assert_eq!(to_tab_delimited(&m), "a\tb\nc\td\n");
        assert_eq!(from_tab_delimited("a\tb\nc\td\n"), m);
    }

    #[test]
    fn test_from_tab_delimited_edge_cases() {
        assert!(from_tab_delimited("").is_empty());
        assert!(from_tab_delimited("\n\n").is_empty());
        assert_eq!(
            from_tab_delimited("a\tb\r\nc\td\r\n\r\n"),
            matrix(&[&["a", "b"], &["c", "d"]])
        );
        // interior blank lines become single empty rows
        assert_eq!(
            from_tab_delimited("a\n\nb"),
            matrix(&[&["a"], &[""], &["b"]])
        );
    }

    #[test]
    fn test_delimited_literals() {
        let m = matrix(&[&["1", "2"], &["3", "4"]]);
        assert_eq!(to_delimited(&m, "[", "]"), "[[1,2],[3,4]]");
        assert_eq!(to_delimited(&m, "{", "}"), "{{1,2},{3,4}}");
        assert_eq!(to_delimited(&m, "<", ">"), "<<1,2>,<3,4>>");
        assert_eq!(to_maxima(&m), "matrix([1,2],[3,4])");
        assert_eq!(to_sage(&m), "matrix(QQ, [[1,2],[3,4]])");
    }

    #[test]
    fn test_html() {
        let m = matrix(&[&["a", "<b>"]]);
        assert_eq!(
            to_html(&m),
            "<TABLE BORDER=1 CELLPADDING=1 CELLSPACING=0>\n<TR>\n<TD>a</TD><TD><b></TD>\n</TR>\n</TABLE>"
        );
    }

    #[test]
    fn test_parse_markup_simple() {
        assert_eq!(
            parse_markup_table("a & b \\\\ c & d \\\\"),
            matrix(&[&["a", "b"], &["c", "d"]])
        );
    }

    #[test]
    fn test_parse_markup_keeps_escaped_ampersand() {
        assert_eq!(
            parse_markup_table("R\\&D & x \\\\ \\hline y & z"),
            matrix(&[&["R\\&D", "x"], &["y", "z"]])
        );
    }

    #[test]
    fn test_parse_markup_strips_environment() {
        let source = "% Package: \\usepackage{longtable} \n\n\
                      \\begin{longtable}[l]{|l|l|} \\hline \n\
                      a & b \\\\  \\hline \n\
                      \\endhead \n\
                      c & 50\\% \\\\ \\cline{1-2} \n\
                      \\end{longtable} \n";
        assert_eq!(
            parse_markup_table(source),
            matrix(&[&["a", "b"], &["c", "50\\%"]])
        );
    }

    #[test]
    fn test_parse_markup_unbalanced_braces_pass_through() {
        assert_eq!(
            parse_markup_table("\\textbf{a & b} \\\\"),
            matrix(&[&["\\textbf{a", "b}"]])
        );
    }

    #[test]
    fn test_parse_markup_comment_after_row_end() {
        assert_eq!(
            parse_markup_table("a & b \\\\% note\nc & d \\\\"),
            matrix(&[&["a", "b"], &["c", "d"]])
        );
        assert_eq!(
            parse_markup_table("a & 50\\% \\\\ % trailing\n"),
            matrix(&[&["a", "50\\%"]])
        );
    }

    #[test]
    fn test_parse_markup_strips_wrappers() {
        let stretched = "{ \n\\renewcommand{\\arraystretch}{1.0}\n\n\
                         \\begin{tabular}{ll}\na & b \\\\ \nc & d \\\\ \n\\end{tabular} \n} \n";
        assert_eq!(
            parse_markup_table(stretched),
            matrix(&[&["a", "b"], &["c", "d"]])
        );

        let decorated = "\\[ \n\\left(\n\\begin{array}{ll}\na & b \\\\ \nc & d \\\\ \n\
                         \\end{array} \n\\right)\n\\] \n";
        assert_eq!(
            parse_markup_table(decorated),
            matrix(&[&["a", "b"], &["c", "d"]])
        );
    }

    #[test]
    fn test_parse_markup_tabbing() {
        let source = "\\begin{tabbing} \n\\hspace{20pt}\\=\\hspace{20pt}\\=\\kill \n\
                      a \\> b \\\\ \nc \\> d \\\\ \n\\end{tabbing} \n";
        assert_eq!(
            parse_markup_table(source),
            matrix(&[&["a", "b"], &["c", "d"]])
        );
        // outside tabbing `\>` is a math space, not a separator
        assert_eq!(
            parse_markup_table("$a\\>b$ & c \\\\"),
            matrix(&[&["$a\\>b$", "c"]])
        );
    }
}
