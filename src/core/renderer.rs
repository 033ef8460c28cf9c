//! Fixed-width text grid for a [`CrosstabMatrix`].
//!
//! ```text
//! ----------------------------------
//! |         | TOTAL | Tech | Other |
//! ----------------------------------
//! |TOTAL    |   2   |  1   |   1   |
//! ----------------------------------
//! |contract1|   1   |  1   |   0   |
//! ----------------------------------
//! ```
//!
//! Every width is measured in characters.

use crate::domain::model::{CountCell, CrosstabMatrix};
use std::fmt;

pub struct TableRenderer<'a> {
    matrix: &'a CrosstabMatrix,
    label_width: usize,
}

impl<'a> TableRenderer<'a> {
    pub fn new(matrix: &'a CrosstabMatrix) -> Self {
        let label_width = matrix
            .contracts()
            .iter()
            .map(|contract| char_len(contract))
            .max()
            .unwrap_or(0);

        Self { matrix, label_width }
    }

    pub fn render(&self) -> String {
        let categories = self.matrix.categories();
        let header = header_row(categories, self.label_width);
        let rule = separator(char_len(&header));

        let mut out = String::new();
        out.push_str(&rule);
        out.push('\n');
        out.push_str(&header);
        out.push('\n');
        out.push_str(&rule);
        out.push('\n');

        for contract in self.matrix.contracts() {
            out.push('|');
            out.push_str(contract);
            out.push_str(&" ".repeat(self.label_width - char_len(contract)));
            out.push('|');
            out.push_str(&row_cells(self.matrix.cells(contract), categories));
            out.push_str(&rule);
            out.push('\n');
        }

        out
    }
}

impl fmt::Display for TableRenderer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Number of decimal digits; zero has one.
pub fn digit_count(mut n: u64) -> usize {
    if n == 0 {
        return 1;
    }
    let mut count = 0;
    while n != 0 {
        n /= 10;
        count += 1;
    }
    count
}

pub fn separator(len: usize) -> String {
    "-".repeat(len)
}

pub fn header_row(categories: &[String], label_width: usize) -> String {
    let mut row = String::from("|");
    row.push_str(&" ".repeat(label_width));
    for category in categories {
        row.push_str("| ");
        row.push_str(category);
        row.push(' ');
    }
    row.push('|');
    row
}

/// Centers `count` in a field two characters wider than `category`. An odd
/// remainder goes to the right.
pub fn format_cell(count: u64, category: &str) -> String {
    let field_width = char_len(category) + 2;
    let digits = digit_count(count);
    let pad = field_width.saturating_sub(digits) / 2;
    let extra = usize::from(2 * pad + digits < field_width);

    format!(
        "{}{}{}|",
        " ".repeat(pad),
        count,
        " ".repeat(pad + extra)
    )
}

/// One cell per category, in the given order, followed by a newline.
pub fn row_cells(cells: &[CountCell], categories: &[String]) -> String {
    let mut out = String::new();
    for category in categories {
        let count = cells
            .iter()
            .find(|cell| &cell.category == category)
            .map(|cell| cell.count)
            .unwrap_or(0);
        out.push_str(&format_cell(count, category));
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::TOTAL;

    fn labels(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn cell(category: &str, count: u64) -> CountCell {
        CountCell {
            contract: "contract1".to_string(),
            category: category.to_string(),
            count,
        }
    }

    #[test]
    fn test_digit_count() {
        assert_eq!(digit_count(0), 1);
        assert_eq!(digit_count(7), 1);
        assert_eq!(digit_count(123), 3);
        assert_eq!(digit_count(1000), 4);
    }

    #[test]
    fn test_separator() {
        assert_eq!(separator(4), "----");
        assert_eq!(separator(0), "");
    }

    #[test]
    fn test_header_row() {
        let categories = labels(&["category1", "category2", "category3"]);

        assert_eq!(
            header_row(&categories, 10),
            "|          | category1 | category2 | category3 |"
        );
    }

    #[test]
    fn test_format_cell_centers_count() {
        assert_eq!(format_cell(2, "category2"), "     2     |");
    }

    #[test]
    fn test_format_cell_puts_remainder_on_the_right() {
        // width 6, one digit: 2 left, 3 right
        assert_eq!(format_cell(1, "Tech"), "  1   |");
        // width 7, two digits: 2 left, 3 right
        assert_eq!(format_cell(42, "TOTAL"), "  42   |");
    }

    #[test]
    fn test_format_cell_wider_than_field() {
        assert_eq!(format_cell(12345, "IT"), "12345|");
    }

    #[test]
    fn test_format_cell_counts_characters_not_bytes() {
        assert_eq!(format_cell(3, "Santé"), "   3   |");
    }

    #[test]
    fn test_row_cells_follow_category_order() {
        let cells = vec![cell("category1", 1), cell("category2", 2), cell("category3", 3)];
        let categories = labels(&["category3", "category2", "category1"]);

        assert_eq!(
            row_cells(&cells, &categories),
            "     3     |     2     |     1     |\n"
        );
    }

    #[test]
    fn test_row_cells_missing_category_renders_zero() {
        let cells = vec![cell("Tech", 4)];
        let categories = labels(&["Tech", "Other"]);

        assert_eq!(row_cells(&cells, &categories), "  4   |   0   |\n");
    }

    #[test]
    fn test_render_full_grid() {
        let mut matrix = CrosstabMatrix::new();
        matrix.record("contract1", "Tech");
        matrix.record("contract2", "Other");

        let rule = "-".repeat(34);
        let expected = [
            rule.as_str(),
            "|         | TOTAL | Tech | Other |",
            rule.as_str(),
            "|TOTAL    |   2   |  1   |   1   |",
            rule.as_str(),
            "|contract1|   1   |  1   |   0   |",
            rule.as_str(),
            "|contract2|   1   |  0   |   1   |",
            rule.as_str(),
        ]
        .join("\n")
            + "\n";

        assert_eq!(TableRenderer::new(&matrix).render(), expected);
    }

    #[test]
    fn test_rows_line_up_with_header() {
        let mut matrix = CrosstabMatrix::new();
        matrix.record("FULL_TIME", "Tech");
        matrix.record("INTERNSHIP", "Marketing / Comm'");
        matrix.record("Other", "Tech");

        let rendered = TableRenderer::new(&matrix).render();
        let widths: Vec<usize> = rendered.lines().map(|line| line.chars().count()).collect();

        assert!(widths.iter().all(|w| *w == widths[0]));
        assert_eq!(rendered.lines().count(), 3 + 2 * matrix.contracts().len());
    }

    #[test]
    fn test_empty_matrix_renders_total_only() {
        let matrix = CrosstabMatrix::new();
        let rendered = TableRenderer::new(&matrix).render();

        assert_eq!(
            rendered,
            "---------------\n|     | TOTAL |\n---------------\n|TOTAL|   0   |\n---------------\n"
        );
        assert!(rendered.contains(TOTAL));
    }

    #[test]
    fn test_render_is_repeatable() {
        let mut matrix = CrosstabMatrix::new();
        matrix.record("FULL_TIME", "Tech");
        let renderer = TableRenderer::new(&matrix);

        assert_eq!(renderer.render(), renderer.render());
        assert_eq!(renderer.to_string(), renderer.render());
    }
}
