//! Sheet layout and Excel rendering

pub mod excel;
pub mod layout;

pub use excel::{new_workbook, save_workbook, write_sheet};
pub use layout::{assemble_sheet, CellStyle, CellValue, LayoutCell, SheetLayout};
