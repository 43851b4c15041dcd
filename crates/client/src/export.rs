//! CSV export of the current filtered and sorted view.

use crate::columns::Column;
use crate::locale::Labels;
use dashboard_core::{DateRange, PurchaseRow};
use thiserror::Error;
use tracing::info;

/// Marks the payload as UTF-8 for spreadsheet tools that need it to show
/// Hebrew headers.
const BYTE_ORDER_MARK: char = '\u{FEFF}';

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Export is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
}

pub fn export_filename(range: &DateRange) -> String {
    format!("purchases_{}_to_{}.csv", range.start_date, range.end_date)
}

/// The header row is plain comma-joined labels; every data field is quoted
/// with embedded quotes doubled. Returns `None` when there is nothing to
/// export.
pub fn export_csv(
    rows: &[PurchaseRow],
    range: &DateRange,
    labels: &Labels,
) -> Result<Option<CsvExport>, ExportError> {
    if rows.is_empty() {
        return Ok(None);
    }

    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for row in rows {
        writer.write_record(Column::ALL.iter().map(|c| c.value(row)))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;

    let body = String::from_utf8(bytes)?;
    let header = Column::ALL
        .iter()
        .map(|c| c.header(labels))
        .collect::<Vec<_>>()
        .join(",");

    let mut content = String::with_capacity(header.len() + body.len() + 4);
    content.push(BYTE_ORDER_MARK);
    content.push_str(&header);
    content.push('\n');
    content.push_str(body.strip_suffix('\n').unwrap_or(&body));

    info!(rows = rows.len(), "Exported purchases");
    Ok(Some(CsvExport {
        filename: export_filename(range),
        content,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::DisplayLanguage;

    fn range() -> DateRange {
        DateRange::new(Some("2024-03-01"), Some("2024-03-31")).unwrap()
    }

    fn row(item_name: &str, revenue: f64) -> PurchaseRow {
        PurchaseRow {
            date: "2024-03-15".into(),
            transaction_id: "T1".into(),
            first_source: "google".into(),
            first_medium: "cpc".into(),
            first_campaign: "spring".into(),
            source: "google".into(),
            medium: "cpc".into(),
            campaign: "spring".into(),
            landing_page: "/sale".into(),
            item_name: item_name.into(),
            revenue,
        }
    }

    #[test]
    fn test_empty_view_exports_nothing() {
        let labels = Labels::for_language(DisplayLanguage::Hebrew);
        assert_eq!(export_csv(&[], &range(), labels).unwrap(), None);
    }

    #[test]
    fn test_quotes_every_field_and_doubles_inner_quotes() {
        let labels = Labels::for_language(DisplayLanguage::English);
        let export = export_csv(&[row(r#"Mug "XL", blue"#, 10.0)], &range(), labels)
            .unwrap()
            .unwrap();

        assert_eq!(export.filename, "purchases_2024-03-01_to_2024-03-31.csv");
        assert!(export.content.starts_with('\u{FEFF}'));
        assert!(!export.content.ends_with('\n'));

        let lines: Vec<&str> = export.content.trim_start_matches('\u{FEFF}').lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "Date,Transaction ID,First Source,First Medium,First Campaign,Session Source,\
             Session Medium,Campaign (UTM),Landing Page,Item Name,Revenue"
        );
        assert_eq!(
            lines[1],
            r#""2024-03-15","T1","google","cpc","spring","google","cpc","spring","/sale","Mug ""XL"", blue","10""#
        );
    }

    #[test]
    fn test_hebrew_headers_and_row_order() {
        let labels = Labels::for_language(DisplayLanguage::Hebrew);
        let rows = vec![row("b", 2.5), row("a", 1.0)];
        let export = export_csv(&rows, &range(), labels).unwrap().unwrap();
        let lines: Vec<&str> = export.content.lines().collect();
        assert!(lines[0].starts_with("\u{FEFF}תאריך,"));
        assert!(lines[0].contains(",דף נחיתה,"));
        assert!(!lines[0].contains('"'));
        assert!(lines[1].ends_with(r#""b","2.5""#));
        assert!(lines[2].ends_with(r#""a","1""#));
    }
}
