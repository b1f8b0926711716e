use super::ReportOptions;
use crate::Result;
use crate::matrix::{Emphasis, MatrixRow, StatusMatrix};
use camino::Utf8Path;
use ohno::IntoAppError;
use rust_xlsxwriter::{DocProperties, Format, FormatAlign, FormatBorder, Workbook};
use std::fs;
use std::io::Write;

const TITLE_ROW: u32 = 0;
const HEADER_ROW: u32 = 1;
const FIRST_DATA_ROW: u32 = 2;
const TITLE_FONT_SIZE: f64 = 14.0;

/// Cell formats shared by every row of the sheet.
struct Formats {
    title: Format,
    header: Format,
    summary: Format,
    detail: Format,
    separator: Format,
}

impl Formats {
    fn new() -> Self {
        let centered_cell = Format::new()
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_border(FormatBorder::Thin);

        Self {
            title: centered_cell.clone().set_bold().set_font_size(TITLE_FONT_SIZE),
            header: centered_cell.clone().set_bold(),
            summary: centered_cell.clone().set_bold(),
            detail: centered_cell.set_italic(),
            separator: Format::new()
                .set_border_top(FormatBorder::Thin)
                .set_border_bottom(FormatBorder::Thin),
        }
    }

    const fn for_emphasis(&self, emphasis: Emphasis) -> &Format {
        match emphasis {
            Emphasis::Summary => &self.summary,
            Emphasis::Detail => &self.detail,
        }
    }
}

/// Render the status matrix as an xlsx workbook into `writer`.
#[expect(unused_results, reason = "rust_xlsxwriter methods return &mut Worksheet for chaining")]
#[expect(clippy::cast_precision_loss, reason = "Intentional conversion to f64 for Excel output")]
pub fn generate<W: Write>(matrix: &StatusMatrix, options: &ReportOptions, writer: &mut W) -> Result<()> {
    let mut workbook = Workbook::new();

    let properties = DocProperties::new().set_author("jira-matrix").set_title(&options.title);
    workbook.set_properties(&properties);

    let worksheet = workbook.add_worksheet().set_name(&options.sheet_name)?;
    let formats = Formats::new();

    // The label column and the total column are always present, so a title or separator
    // always spans at least two cells
    let last_col = u16::try_from(matrix.column_count() - 1).into_app_err("too many issue types to fit in a worksheet")?;

    worksheet.merge_range(TITLE_ROW, 0, TITLE_ROW, last_col, &options.title, &formats.title)?;

    for (col_idx, header) in matrix.header().into_iter().enumerate() {
        #[expect(clippy::cast_possible_truncation, reason = "Column index bounded by last_col")]
        worksheet.write_string_with_format(HEADER_ROW, col_idx as u16, header, &formats.header)?;
    }

    let mut row = FIRST_DATA_ROW;
    for matrix_row in matrix.rows() {
        match matrix_row {
            MatrixRow::Data { label, emphasis, values } => {
                let format = formats.for_emphasis(*emphasis);

                worksheet.write_string_with_format(row, 0, label, format)?;
                for (idx, value) in values.iter().enumerate() {
                    #[expect(clippy::cast_possible_truncation, reason = "Column index bounded by last_col")]
                    worksheet.write_number_with_format(row, (idx + 1) as u16, *value as f64, format)?;
                }
                worksheet.write_number_with_format(row, last_col, matrix_row.total() as f64, format)?;
            }
            MatrixRow::Separator => {
                worksheet.merge_range(row, 0, row, last_col, "", &formats.separator)?;
            }
        }

        row += 1;
    }

    for col in 0..=last_col {
        worksheet.set_column_width(col, options.column_width)?;
    }

    let data = workbook.save_to_buffer()?;
    writer.write_all(&data)?;

    Ok(())
}

/// Render the status matrix and write it to `path`, replacing any existing file.
///
/// The workbook is fully rendered in memory before the file is touched.
pub fn save(matrix: &StatusMatrix, options: &ReportOptions, path: &Utf8Path) -> Result<()> {
    let mut data = Vec::new();
    generate(matrix, options, &mut data)?;

    fs::write(path, data).into_app_err_with(|| format!("unable to write report '{path}'"))
}
