//! Excel export functionality

use chrono::Datelike;
use logbook_types::{Error, LogbookConfig, Result};
use rust_xlsxwriter::{
    DocProperties, ExcelDateTime, Format, FormatAlign, FormatBorder, FormatUnderline, Workbook,
    Worksheet, XlsxError,
};
use std::collections::BTreeMap;
use std::path::Path;

use super::layout::{col, CellStyle, CellValue, LayoutCell, SheetLayout, COLUMN_COUNT};

const HEADER_FILL: u32 = 0xB4C7E7;
const HOLIDAY_FILL: u32 = 0xE6E6FF;
const WEEKEND_FONT: u32 = 0xFF0000;
const HOLIDAY_FONT: u32 = 0x0000FF;
const MIN_COLUMN_WIDTH: f64 = 12.0;

fn excel_error(e: XlsxError) -> Error {
    Error::Excel(e.to_string())
}

/// Formats for each cell role
struct SheetFormats {
    title: Format,
    section_heading: Format,
    label: Format,
    value: Format,
    spacer: Format,
    table_header: Format,
    body: Format,
    weekend_date: Format,
    holiday_date: Format,
    total: Format,
}

impl SheetFormats {
    fn new() -> Self {
        let center = Format::new()
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_text_wrap();

        Self {
            title: center
                .clone()
                .set_font_name("Algerian")
                .set_font_size(18.0)
                .set_bold()
                .set_background_color(HEADER_FILL)
                .set_border(FormatBorder::Thin),
            section_heading: center
                .clone()
                .set_font_size(12.0)
                .set_bold()
                .set_underline(FormatUnderline::Single),
            label: Format::new()
                .set_bold()
                .set_align(FormatAlign::Right)
                .set_align(FormatAlign::VerticalCenter)
                .set_text_wrap(),
            value: Format::new()
                .set_align(FormatAlign::Left)
                .set_align(FormatAlign::VerticalCenter)
                .set_text_wrap()
                .set_border(FormatBorder::Thin),
            spacer: Format::new().set_border_right(FormatBorder::Thin),
            table_header: center
                .set_bold()
                .set_background_color(HEADER_FILL)
                .set_border(FormatBorder::Thin),
            body: Format::new().set_border(FormatBorder::Thin),
            weekend_date: Format::new()
                .set_font_color(WEEKEND_FONT)
                .set_border(FormatBorder::Thin),
            holiday_date: Format::new()
                .set_bold()
                .set_font_color(HOLIDAY_FONT)
                .set_background_color(HOLIDAY_FILL)
                .set_border(FormatBorder::Thin),
            total: Format::new().set_bold().set_border(FormatBorder::Thin),
        }
    }

    fn get(&self, style: CellStyle) -> &Format {
        match style {
            CellStyle::Title => &self.title,
            CellStyle::SectionHeading => &self.section_heading,
            CellStyle::Label => &self.label,
            CellStyle::Value => &self.value,
            CellStyle::Spacer => &self.spacer,
            CellStyle::TableHeader => &self.table_header,
            CellStyle::Body => &self.body,
            CellStyle::WeekendDate => &self.weekend_date,
            CellStyle::HolidayDate => &self.holiday_date,
            CellStyle::Total => &self.total,
        }
    }
}

/// Create an empty workbook carrying the document properties for `config`.
///
/// The creation date is the log's start date, so the same configuration
/// always yields the same bytes.
pub fn new_workbook(config: &LogbookConfig) -> Result<Workbook> {
    let start = config.start_date;
    let year = u16::try_from(start.year())
        .map_err(|_| Error::Excel(format!("Start year {} is outside Excel's range", start.year())))?;
    let created = ExcelDateTime::from_ymd(year, start.month() as u8, start.day() as u8)
        .map_err(excel_error)?;

    let mut workbook = Workbook::new();
    let properties = DocProperties::new()
        .set_title(format!("Log Book {}", config.financial_year_label()))
        .set_author(&config.employee.name)
        .set_company(&config.company_name)
        .set_creation_datetime(&created);
    workbook.set_properties(&properties);
    Ok(workbook)
}

/// Render a sheet layout into `sheet`
pub fn write_sheet(sheet: &mut Worksheet, layout: &SheetLayout) -> Result<()> {
    sheet.set_name(&layout.name).map_err(excel_error)?;

    let formats = SheetFormats::new();
    for cell in &layout.cells {
        let format = formats.get(cell.style);
        match cell.merge_to {
            Some((last_row, last_col)) => {
                sheet
                    .merge_range(
                        cell.row,
                        cell.col,
                        last_row,
                        last_col,
                        &cell.value.as_text(),
                        format,
                    )
                    .map_err(excel_error)?;
            }
            None => write_cell(sheet, cell, format)?,
        }
    }

    for (column, width) in column_widths(layout) {
        sheet.set_column_width(column, width).map_err(excel_error)?;
    }

    Ok(())
}

fn write_cell(sheet: &mut Worksheet, cell: &LayoutCell, format: &Format) -> Result<()> {
    match &cell.value {
        CellValue::Text(text) => {
            sheet
                .write_string_with_format(cell.row, cell.col, text, format)
                .map_err(excel_error)?;
        }
        CellValue::Number(n) => {
            sheet
                .write_number_with_format(cell.row, cell.col, *n as f64, format)
                .map_err(excel_error)?;
        }
        CellValue::Blank => {
            sheet
                .write_blank(cell.row, cell.col, format)
                .map_err(excel_error)?;
        }
    }
    Ok(())
}

/// Widest unmerged content per column, with fixed widths for the date and
/// travel columns
fn column_widths(layout: &SheetLayout) -> BTreeMap<u16, f64> {
    let mut widths: BTreeMap<u16, f64> = (0..COLUMN_COUNT).map(|c| (c, MIN_COLUMN_WIDTH)).collect();

    for cell in layout.cells.iter().filter(|c| c.merge_to.is_none()) {
        let len = cell.value.as_text().chars().count() as f64 + 2.0;
        let width = widths.entry(cell.col).or_insert(MIN_COLUMN_WIDTH);
        if len > *width {
            *width = len;
        }
    }

    widths.insert(col::DATE_START, 20.0);
    widths.insert(col::WORK_FLAG, 20.0);
    widths.insert(col::WORK_KM, 20.0);
    widths.insert(col::PERSONAL_KM, 15.0);
    widths
}

/// Serialize the workbook and write it with a single file write.
///
/// Returns the number of bytes written.
pub fn save_workbook(workbook: &mut Workbook, path: &Path) -> Result<usize> {
    let buffer = workbook.save_to_buffer().map_err(excel_error)?;
    std::fs::write(path, &buffer)?;
    Ok(buffer.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_widths_use_content_and_fixed_columns() {
        let mut layout = SheetLayout::new("Aug24");
        layout.cells.push(LayoutCell {
            row: 11,
            col: col::CLIENT,
            value: CellValue::Text("A very long client name for width".to_string()),
            style: CellStyle::Body,
            merge_to: None,
        });
        layout.cells.push(LayoutCell {
            row: 0,
            col: 0,
            value: CellValue::Text("x".repeat(80)),
            style: CellStyle::Title,
            merge_to: Some((1, 10)),
        });

        let widths = column_widths(&layout);
        assert_eq!(widths.len(), COLUMN_COUNT as usize);
        assert_eq!(widths[&col::CLIENT], 35.0);
        assert_eq!(widths[&col::DATE_START], 20.0);
        assert_eq!(widths[&col::PERSONAL_KM], 15.0);
        assert_eq!(widths[&col::RATE], MIN_COLUMN_WIDTH);
    }

    #[test]
    fn test_write_sheet_sets_name() {
        let mut workbook = Workbook::new();
        let mut layout = SheetLayout::new("Feb25");
        layout.cells.push(LayoutCell {
            row: 11,
            col: 0,
            value: CellValue::Number(42),
            style: CellStyle::Body,
            merge_to: None,
        });

        let sheet = workbook.add_worksheet();
        write_sheet(sheet, &layout).unwrap();
        assert_eq!(sheet.name(), "Feb25");
    }
}
