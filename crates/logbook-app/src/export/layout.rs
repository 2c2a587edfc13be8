//! Month sheet layout
//!
//! Places the header block, the daily trip table and the summary row of one
//! month into typed cells. Rendering (fonts, fills, borders, widths) is done
//! separately by the Excel writer.

use logbook_domain::model::{DayKind, LedgerLine, MonthLedger, MonthSummary};
use logbook_types::LogbookConfig;

pub type Row = u32;
pub type Col = u16;

/// Columns A..K
pub const COLUMN_COUNT: Col = 11;
/// First of the two table header rows
pub const TABLE_HEADER_ROW: Row = 9;
/// Row of the first calendar day
pub const FIRST_DAY_ROW: Row = 11;
/// Blank bordered rows between the last day and the summary row
pub const TRAILING_BLANK_ROWS: Row = 3;

/// Trip table columns
pub mod col {
    use super::Col;

    pub const DATE_START: Col = 0;
    pub const DATE_END: Col = 1;
    pub const ODOMETER_START: Col = 2;
    pub const ODOMETER_END: Col = 3;
    pub const PURPOSE: Col = 4;
    pub const CLIENT: Col = 5;
    pub const WORK_FLAG: Col = 6;
    pub const WORK_KM: Col = 7;
    pub const PERSONAL_KM: Col = 8;
    pub const RATE: Col = 9;
    pub const AMOUNT: Col = 10;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Text(String),
    Number(u64),
    Blank,
}

impl CellValue {
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Text(text) => text.clone(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Blank => String::new(),
        }
    }
}

/// Presentation role of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellStyle {
    Title,
    SectionHeading,
    Label,
    Value,
    Spacer,
    TableHeader,
    Body,
    WeekendDate,
    HolidayDate,
    Total,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutCell {
    pub row: Row,
    pub col: Col,
    pub value: CellValue,
    pub style: CellStyle,
    /// Bottom-right corner when the cell is merged over a range
    pub merge_to: Option<(Row, Col)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetLayout {
    pub name: String,
    pub cells: Vec<LayoutCell>,
}

impl SheetLayout {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: Vec::new(),
        }
    }

    fn put(&mut self, row: Row, col: Col, value: CellValue, style: CellStyle) {
        self.cells.push(LayoutCell {
            row,
            col,
            value,
            style,
            merge_to: None,
        });
    }

    fn text(&mut self, row: Row, col: Col, text: impl Into<String>, style: CellStyle) {
        self.put(row, col, CellValue::Text(text.into()), style);
    }

    fn merged(&mut self, (row, col): (Row, Col), to: (Row, Col), text: &str, style: CellStyle) {
        self.cells.push(LayoutCell {
            row,
            col,
            value: CellValue::Text(text.to_string()),
            style,
            merge_to: Some(to),
        });
    }

    pub fn cell(&self, row: Row, col: Col) -> Option<&LayoutCell> {
        self.cells.iter().rev().find(|c| c.row == row && c.col == col)
    }

    pub fn value_at(&self, row: Row, col: Col) -> Option<&CellValue> {
        self.cell(row, col).map(|c| &c.value)
    }

    pub fn last_row(&self) -> Row {
        self.cells.iter().map(|c| c.row).max().unwrap_or(0)
    }
}

/// `1st`, `2nd`, `3rd`, `4th` ... with `11th`..`13th`
pub fn ordinal(day: u32) -> String {
    let suffix = match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", day, suffix)
}

/// Row of the trailing total for a month with `days` days
pub fn summary_row(days: u32) -> Row {
    FIRST_DAY_ROW + days - 1 + TRAILING_BLANK_ROWS + 1
}

/// Lay out one month sheet
pub fn assemble_sheet(ledger: &MonthLedger, config: &LogbookConfig) -> SheetLayout {
    let mut layout = SheetLayout::new(ledger.summary.sheet_name.clone());

    write_details(&mut layout, config);
    write_odometer_block(&mut layout, &ledger.summary, config);
    write_table_header(&mut layout);

    let mut row = FIRST_DAY_ROW;
    for line in &ledger.lines {
        write_day_row(&mut layout, row, line, config);
        row += 1;
    }

    for _ in 0..TRAILING_BLANK_ROWS {
        write_blank_row(&mut layout, row);
        row += 1;
    }

    for column in 0..col::AMOUNT {
        layout.put(row, column, CellValue::Blank, CellStyle::Body);
    }
    layout.put(
        row,
        col::AMOUNT,
        CellValue::Number(ledger.summary.total_cost),
        CellStyle::Total,
    );

    layout
}

fn write_details(layout: &mut SheetLayout, config: &LogbookConfig) {
    layout.merged((0, 0), (1, COLUMN_COUNT - 1), &config.company_name, CellStyle::Title);

    layout.merged((2, 0), (2, 1), "BASIC DETAILS", CellStyle::SectionHeading);
    let employee = &config.employee;
    let basic = [
        ("Name:", &employee.name),
        ("Employee ID:", &employee.id),
        ("Department:", &employee.department),
        ("Manager:", &employee.manager),
    ];
    for (offset, (label, value)) in basic.into_iter().enumerate() {
        let row = 4 + offset as Row;
        layout.text(row, 0, label, CellStyle::Label);
        layout.text(row, 1, value.as_str(), CellStyle::Value);
    }

    layout.merged((2, 3), (2, 4), "VEHICLE DETAILS", CellStyle::SectionHeading);
    let vehicle = &config.vehicle;
    let details = [
        ("Make:", &vehicle.make),
        ("Model:", &vehicle.model),
        ("Year:", &vehicle.year),
        ("Registration:", &vehicle.registration),
        ("Engine Size:", &vehicle.engine_size),
    ];
    for (offset, (label, value)) in details.into_iter().enumerate() {
        let row = 3 + offset as Row;
        layout.text(row, 3, label, CellStyle::Label);
        layout.text(row, 4, value.as_str(), CellStyle::Value);
    }

    for row in 2..=8 {
        layout.put(row, COLUMN_COUNT - 1, CellValue::Blank, CellStyle::Spacer);
    }
}

fn write_odometer_block(layout: &mut SheetLayout, summary: &MonthSummary, config: &LogbookConfig) {
    let month = summary.month;
    let month_name = month.month_name();

    layout.merged((2, 6), (2, 7), "ODOMETER READING", CellStyle::SectionHeading);

    layout.text(5, 6, "Financial year:", CellStyle::Label);
    layout.text(5, 7, config.financial_year_label(), CellStyle::Value);

    layout.text(
        6,
        6,
        format!("As at 1st of {} {}", month_name, month.year()),
        CellStyle::Label,
    );
    layout.put(
        6,
        7,
        CellValue::Number(summary.starting_odometer),
        CellStyle::Value,
    );
    layout.put(6, 8, CellValue::Number(summary.total_distance), CellStyle::Value);

    layout.text(
        7,
        6,
        format!(
            "As at {} of {} {}",
            ordinal(month.days_in_month()),
            month_name,
            month.year()
        ),
        CellStyle::Label,
    );
    layout.put(
        7,
        7,
        CellValue::Number(summary.ending_odometer),
        CellStyle::Value,
    );
}

fn write_table_header(layout: &mut SheetLayout) {
    let top = TABLE_HEADER_ROW;
    let bottom = TABLE_HEADER_ROW + 1;

    layout.merged(
        (top, col::DATE_START),
        (top, col::DATE_END),
        "Date of Trip (DD/MM/YY)",
        CellStyle::TableHeader,
    );
    layout.merged(
        (top, col::ODOMETER_START),
        (top, col::ODOMETER_END),
        "Odometer Reading",
        CellStyle::TableHeader,
    );

    let tall = [
        (col::PURPOSE, "Purpose of Trip"),
        (col::CLIENT, "Name of Client"),
        (col::WORK_FLAG, "Work-related travel? (Y/N)"),
        (col::WORK_KM, "Work-related Travel (KM)"),
        (col::PERSONAL_KM, "Personal Travel (KM)"),
        (col::RATE, "INR Per KM"),
        (col::AMOUNT, "Amount (INR)"),
    ];
    for (column, title) in tall {
        layout.merged((top, column), (bottom, column), title, CellStyle::TableHeader);
    }

    layout.text(bottom, col::DATE_START, "Start", CellStyle::TableHeader);
    layout.text(bottom, col::DATE_END, "End", CellStyle::TableHeader);
    layout.text(bottom, col::ODOMETER_START, "Start", CellStyle::TableHeader);
    layout.text(bottom, col::ODOMETER_END, "End", CellStyle::TableHeader);
}

fn write_day_row(layout: &mut SheetLayout, row: Row, line: &LedgerLine, config: &LogbookConfig) {
    let date = line.day.display_date();
    let date_style = match line.day.kind {
        DayKind::Workday => CellStyle::Body,
        DayKind::Weekend => CellStyle::WeekendDate,
        DayKind::Holiday => CellStyle::HolidayDate,
    };
    layout.text(row, col::DATE_START, date.as_str(), date_style);
    layout.text(row, col::DATE_END, date, date_style);

    let Some(trip) = line.trip else {
        for column in col::ODOMETER_START..COLUMN_COUNT {
            layout.put(row, column, CellValue::Blank, CellStyle::Body);
        }
        return;
    };

    let body = CellStyle::Body;
    layout.put(row, col::ODOMETER_START, CellValue::Number(trip.odometer_start), body);
    layout.put(row, col::ODOMETER_END, CellValue::Number(trip.odometer_end), body);
    layout.text(row, col::PURPOSE, config.trip_purpose.as_str(), body);
    layout.text(row, col::CLIENT, config.client_name.as_str(), body);
    layout.text(row, col::WORK_FLAG, config.is_work_travel.as_str(), body);
    layout.put(row, col::WORK_KM, CellValue::Number(trip.work_km), body);
    let personal = trip.personal_km.map_or(CellValue::Blank, CellValue::Number);
    layout.put(row, col::PERSONAL_KM, personal, body);
    layout.put(row, col::RATE, CellValue::Number(trip.rate_per_km), body);
    layout.put(row, col::AMOUNT, CellValue::Number(trip.amount), body);
}

fn write_blank_row(layout: &mut SheetLayout, row: Row) {
    for column in 0..COLUMN_COUNT {
        layout.put(row, column, CellValue::Blank, CellStyle::Body);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use logbook_domain::model::YearMonth;
    use logbook_domain::service::{accumulate, HolidayCalendar, TripRates};
    use logbook_types::{Employee, Vehicle};
    use std::collections::BTreeSet;
    use std::path::PathBuf;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn config(holidays: &[NaiveDate]) -> LogbookConfig {
        LogbookConfig {
            start_date: date(2024, 8, 1),
            end_date: date(2025, 3, 31),
            initial_odometer: 1000,
            inr_per_km: 10,
            work_related_km: 100,
            personal_travel_km: None,
            trip_purpose: "Official".to_string(),
            client_name: "Blink Charging".to_string(),
            is_work_travel: "Y".to_string(),
            company_name: "Acme Pvt Ltd".to_string(),
            financial_year: None,
            employee: Employee::default(),
            vehicle: Vehicle::default(),
            holidays: holidays.iter().copied().collect::<BTreeSet<_>>(),
            output_file_path: PathBuf::from("out.xlsx"),
        }
    }

    fn layout_for(year: i32, month: u32, config: &LogbookConfig) -> SheetLayout {
        let calendar = HolidayCalendar::new(config.holidays.iter().copied());
        let rates = TripRates {
            work_km: config.work_related_km,
            personal_km: config.personal_travel_km,
            rate_per_km: config.inr_per_km,
        };
        let month = YearMonth::new(year, month).unwrap();
        let ledger = accumulate(month, calendar.month_days(month), config.initial_odometer, &rates);
        assemble_sheet(&ledger, config)
    }

    fn text(value: &str) -> CellValue {
        CellValue::Text(value.to_string())
    }

    #[test]
    fn test_ordinal_suffixes() {
        assert_eq!(ordinal(1), "1st");
        assert_eq!(ordinal(2), "2nd");
        assert_eq!(ordinal(3), "3rd");
        assert_eq!(ordinal(11), "11th");
        assert_eq!(ordinal(12), "12th");
        assert_eq!(ordinal(13), "13th");
        assert_eq!(ordinal(21), "21st");
        assert_eq!(ordinal(28), "28th");
        assert_eq!(ordinal(29), "29th");
        assert_eq!(ordinal(30), "30th");
        assert_eq!(ordinal(31), "31st");
    }

    #[test]
    fn test_header_block() {
        let cfg = config(&[]);
        let layout = layout_for(2024, 8, &cfg);

        assert_eq!(layout.name, "Aug24");
        let title = layout.cell(0, 0).unwrap();
        assert_eq!(title.value, text("Acme Pvt Ltd"));
        assert_eq!(title.merge_to, Some((1, 10)));

        assert_eq!(layout.value_at(4, 0), Some(&text("Name:")));
        assert_eq!(layout.value_at(4, 1), Some(&text("Ashish Kumar")));
        assert_eq!(layout.value_at(7, 1), Some(&text("Ajay Singh")));
        assert_eq!(layout.value_at(3, 3), Some(&text("Make:")));
        assert_eq!(layout.value_at(7, 4), Some(&text("1199 CC")));
        assert_eq!(layout.value_at(5, 7), Some(&text("2024-25")));
    }

    #[test]
    fn test_odometer_block() {
        let cfg = config(&[]);
        let layout = layout_for(2024, 8, &cfg);

        assert_eq!(layout.value_at(6, 6), Some(&text("As at 1st of August 2024")));
        assert_eq!(layout.value_at(6, 7), Some(&CellValue::Number(1000)));
        assert_eq!(layout.value_at(7, 6), Some(&text("As at 31st of August 2024")));
        assert_eq!(layout.value_at(7, 7), Some(&CellValue::Number(3200)));
        assert_eq!(layout.value_at(6, 8), Some(&CellValue::Number(2200)));
    }

    #[test]
    fn test_february_odometer_label() {
        let cfg = config(&[]);
        let layout = layout_for(2024, 2, &cfg);
        assert_eq!(
            layout.value_at(7, 6),
            Some(&text("As at 29th of February 2024"))
        );
    }

    #[test]
    fn test_table_header() {
        let cfg = config(&[]);
        let layout = layout_for(2024, 8, &cfg);

        let date_header = layout.cell(TABLE_HEADER_ROW, col::DATE_START).unwrap();
        assert_eq!(date_header.value, text("Date of Trip (DD/MM/YY)"));
        assert_eq!(date_header.merge_to, Some((TABLE_HEADER_ROW, col::DATE_END)));

        let amount = layout.cell(TABLE_HEADER_ROW, col::AMOUNT).unwrap();
        assert_eq!(amount.value, text("Amount (INR)"));
        assert_eq!(amount.merge_to, Some((TABLE_HEADER_ROW + 1, col::AMOUNT)));

        assert_eq!(
            layout.value_at(TABLE_HEADER_ROW + 1, col::ODOMETER_END),
            Some(&text("End"))
        );
    }

    #[test]
    fn test_workday_row() {
        let cfg = config(&[]);
        let layout = layout_for(2024, 8, &cfg);
        // 2024-08-01 is a Thursday
        let row = FIRST_DAY_ROW;

        assert_eq!(layout.value_at(row, col::DATE_START), Some(&text("01/08/24")));
        assert_eq!(layout.value_at(row, col::DATE_END), Some(&text("01/08/24")));
        assert_eq!(layout.value_at(row, col::ODOMETER_START), Some(&CellValue::Number(1000)));
        assert_eq!(layout.value_at(row, col::ODOMETER_END), Some(&CellValue::Number(1100)));
        assert_eq!(layout.value_at(row, col::PURPOSE), Some(&text("Official")));
        assert_eq!(layout.value_at(row, col::CLIENT), Some(&text("Blink Charging")));
        assert_eq!(layout.value_at(row, col::WORK_FLAG), Some(&text("Y")));
        assert_eq!(layout.value_at(row, col::WORK_KM), Some(&CellValue::Number(100)));
        assert_eq!(layout.value_at(row, col::PERSONAL_KM), Some(&CellValue::Blank));
        assert_eq!(layout.value_at(row, col::RATE), Some(&CellValue::Number(10)));
        assert_eq!(layout.value_at(row, col::AMOUNT), Some(&CellValue::Number(1000)));

        // Friday continues from Thursday's reading
        assert_eq!(
            layout.value_at(row + 1, col::ODOMETER_START),
            Some(&CellValue::Number(1100))
        );
    }

    #[test]
    fn test_weekend_row_is_blank() {
        let cfg = config(&[]);
        let layout = layout_for(2024, 8, &cfg);
        // 2024-08-03 is a Saturday
        let row = FIRST_DAY_ROW + 2;

        let start = layout.cell(row, col::DATE_START).unwrap();
        assert_eq!(start.value, text("03/08/24"));
        assert_eq!(start.style, CellStyle::WeekendDate);
        for column in col::ODOMETER_START..COLUMN_COUNT {
            assert_eq!(layout.value_at(row, column), Some(&CellValue::Blank));
        }
        // Monday picks up where Friday stopped
        assert_eq!(
            layout.value_at(row + 2, col::ODOMETER_START),
            Some(&CellValue::Number(1200))
        );
    }

    #[test]
    fn test_sunday_holiday_row_style() {
        let cfg = config(&[date(2025, 1, 26)]);
        let layout = layout_for(2025, 1, &cfg);
        let row = FIRST_DAY_ROW + 25;

        let cell = layout.cell(row, col::DATE_START).unwrap();
        assert_eq!(cell.value, text("26/01/25"));
        assert_eq!(cell.style, CellStyle::HolidayDate);
        assert_eq!(layout.value_at(row, col::AMOUNT), Some(&CellValue::Blank));
    }

    #[test]
    fn test_day_rows_match_month_length() {
        let cfg = config(&[]);
        for (year, month, days) in [(2024, 2, 29), (2025, 2, 28), (2024, 9, 30), (2024, 8, 31)] {
            let layout = layout_for(year, month, &cfg);
            let day_rows = (FIRST_DAY_ROW..summary_row(days))
                .filter(|&row| {
                    matches!(layout.value_at(row, col::DATE_START), Some(CellValue::Text(_)))
                })
                .count();
            assert_eq!(day_rows as u32, days, "{}-{}", year, month);
        }
    }

    #[test]
    fn test_summary_row() {
        let cfg = config(&[]);
        let layout = layout_for(2024, 8, &cfg);
        let row = summary_row(31);

        assert_eq!(row, FIRST_DAY_ROW + 31 + 3);
        assert_eq!(layout.last_row(), row);
        let total = layout.cell(row, col::AMOUNT).unwrap();
        assert_eq!(total.value, CellValue::Number(22000));
        assert_eq!(total.style, CellStyle::Total);

        for blank in (FIRST_DAY_ROW + 31)..row {
            for column in 0..COLUMN_COUNT {
                assert_eq!(layout.value_at(blank, column), Some(&CellValue::Blank));
            }
        }
    }

    #[test]
    fn test_personal_travel_written_when_configured() {
        let mut cfg = config(&[]);
        cfg.personal_travel_km = Some(5);
        let layout = layout_for(2024, 8, &cfg);

        assert_eq!(
            layout.value_at(FIRST_DAY_ROW, col::PERSONAL_KM),
            Some(&CellValue::Number(5))
        );
        assert_eq!(
            layout.value_at(FIRST_DAY_ROW, col::ODOMETER_END),
            Some(&CellValue::Number(1105))
        );
        assert_eq!(
            layout.value_at(summary_row(31), col::AMOUNT),
            Some(&CellValue::Number(22000))
        );
    }
}
