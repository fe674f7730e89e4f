//! Download naming for rendered quotations

use chrono::NaiveDate;

/// MIME type of an .xlsx workbook
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// `quotation_<customer>_<YYYY-MM-DD>.xlsx`
///
/// Path separators in the customer name become `_` so the result is always a
/// single file name.
pub fn quotation_file_name(customer_name: &str, date: NaiveDate) -> String {
    let customer: String = customer_name
        .trim()
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();

    format!("quotation_{}_{}.xlsx", customer, date.format("%Y-%m-%d"))
}

/// `Content-Disposition` value with an ASCII fallback and an RFC 5987 UTF-8 name
pub fn content_disposition(file_name: &str) -> String {
    let ascii: String = file_name
        .chars()
        .map(|c| {
            if c.is_ascii() && !c.is_ascii_control() && c != '"' {
                c
            } else {
                '_'
            }
        })
        .collect();

    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        ascii,
        urlencoding::encode(file_name)
    )
}
