//! Page layout for tabular reports.
//!
//! Coordinates are PDF points with the origin at the bottom-left corner of a
//! US Letter page. The title and the column headers appear on the first page
//! only; continuation pages start their rows at the top margin.

/// US Letter, in points.
pub const PAGE_WIDTH: f32 = 612.0;
pub const PAGE_HEIGHT: f32 = 792.0;

pub const FONT_SIZE: f32 = 10.0;

const TITLE_X: f32 = 200.0;
const TITLE_Y: f32 = 750.0;
const HEADER_Y: f32 = 730.0;
const FIRST_ROW_Y: f32 = 710.0;
const ROW_STEP: f32 = 20.0;
const BOTTOM_MARGIN: f32 = 100.0;
const TOP_Y: f32 = 750.0;

/// A column header and its left edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub header: String,
    pub x: f32,
}

impl Column {
    pub fn new(header: impl Into<String>, x: f32) -> Self {
        Self {
            header: header.into(),
            x,
        }
    }
}

/// A report to be laid out: a title, columns and rows of cell text.
///
/// Each row holds one cell per column; missing trailing cells are left blank.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub title: String,
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

/// A piece of text placed on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct Placed {
    pub x: f32,
    pub y: f32,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub items: Vec<Placed>,
}

impl PageLayout {
    fn place(&mut self, x: f32, y: f32, text: &str) {
        self.items.push(Placed {
            x,
            y,
            text: text.to_string(),
        });
    }
}

/// Distribute a report over pages.
///
/// Rows start at y = 710 and step down by 20. After a row is placed, if the
/// cursor has dropped below 100 a new page begins at y = 750. Always yields at
/// least one page.
pub fn layout(report: &Report) -> Vec<PageLayout> {
    let mut pages = Vec::new();
    let mut page = PageLayout::default();

    page.place(TITLE_X, TITLE_Y, &report.title);
    for column in &report.columns {
        page.place(column.x, HEADER_Y, &column.header);
    }

    let mut y = FIRST_ROW_Y;
    let mut page_has_rows = false;
    for row in &report.rows {
        for (column, cell) in report.columns.iter().zip(row) {
            page.place(column.x, y, cell);
        }
        page_has_rows = true;
        y -= ROW_STEP;

        if y < BOTTOM_MARGIN {
            pages.push(std::mem::take(&mut page));
            page_has_rows = false;
            y = TOP_Y;
        }
    }

    // A break right after the last row leaves nothing to flush.
    if page_has_rows || pages.is_empty() {
        pages.push(page);
    }
    pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn report(rows: usize) -> Report {
        Report {
            title: "Reporte".into(),
            columns: vec![Column::new("A", 30.0), Column::new("B", 200.0)],
            rows: (0..rows).map(|i| vec![format!("a{i}"), format!("b{i}")]).collect(),
        }
    }

    fn row_ys(page: &PageLayout) -> Vec<f32> {
        page.items
            .iter()
            .filter(|p| p.x == 30.0 && p.text.starts_with('a'))
            .map(|p| p.y)
            .collect()
    }

    #[test]
    fn empty_report_has_title_and_headers_on_one_page() {
        let pages = layout(&report(0));
        assert_eq!(pages.len(), 1);
        assert_eq!(
            pages[0].items[0],
            Placed {
                x: 200.0,
                y: 750.0,
                text: "Reporte".into()
            }
        );
        assert!(pages[0].items[1..].iter().all(|p| p.y == 730.0));
    }

    #[test]
    fn first_page_holds_rows_from_710_down_to_110() {
        let pages = layout(&report(31));
        assert_eq!(pages.len(), 1);
        let ys = row_ys(&pages[0]);
        assert_eq!(ys.len(), 31);
        assert_eq!(ys.first(), Some(&710.0));
        assert_eq!(ys.last(), Some(&110.0));
    }

    #[test]
    fn overflow_rows_continue_at_top_of_next_page() {
        let pages = layout(&report(32));
        assert_eq!(pages.len(), 2);
        assert_eq!(row_ys(&pages[1]), vec![750.0]);
        // No title or headers on continuation pages.
        assert_eq!(pages[1].items.len(), 2);
    }

    #[test]
    fn continuation_pages_hold_33_rows() {
        let pages = layout(&report(31 + 33 + 1));
        assert_eq!(pages.len(), 3);
        assert_eq!(row_ys(&pages[1]).len(), 33);
        assert_eq!(row_ys(&pages[2]).len(), 1);
    }

    proptest! {
        #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

        #[test]
        fn every_row_lands_once_inside_margins(rows in 0usize..200) {
            let pages = layout(&report(rows));
            let placed: usize = pages.iter().map(|p| row_ys(p).len()).sum();
            prop_assert_eq!(placed, rows);
            for page in &pages {
                for item in &page.items {
                    prop_assert!(item.y >= BOTTOM_MARGIN && item.y <= PAGE_HEIGHT);
                }
            }
        }
    }
}
