//! Orders spreadsheet export

use crate::contract::Order;
use crate::domain::service::format_money;
use chrono::{DateTime, Utc};
use rust_xlsxwriter::{Color, Format, FormatAlign, Workbook, XlsxError};

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const SHEET_NAME: &str = "Orders";

const HEADERS: [&str; 9] = [
    "Order ID",
    "Product",
    "Quantity",
    "Customer Name",
    "Phone",
    "Address",
    "Total Amount",
    "Sale Date",
    "Created By",
];

const COLUMN_WIDTHS: [f64; 9] = [10.0, 20.0, 10.0, 20.0, 15.0, 30.0, 15.0, 20.0, 15.0];

const MISSING: &str = "N/A";

/// `orders_export_YYYYMMDD_HHMMSS.xlsx`
pub fn export_filename(at: DateTime<Utc>) -> String {
    format!("orders_export_{}.xlsx", at.format("%Y%m%d_%H%M%S"))
}

/// Render orders into an xlsx workbook, one row per order under a styled header
pub fn orders_workbook(orders: &[Order]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(0x4472C4))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, title) in (0u16..).zip(HEADERS) {
        worksheet.write_string_with_format(0, col, title, &header)?;
    }

    for (row, order) in (1u32..).zip(orders) {
        worksheet.write_number(row, 0, order.id)?;
        worksheet.write_string(row, 1, &order.product_name)?;
        worksheet.write_number(row, 2, order.quantity_sold as f64)?;
        worksheet.write_string(row, 3, order.customer_name.as_deref().unwrap_or(MISSING))?;
        worksheet.write_string(row, 4, order.customer_phone.as_deref().unwrap_or(MISSING))?;
        worksheet.write_string(row, 5, order.customer_address.as_deref().unwrap_or(MISSING))?;
        worksheet.write_string(row, 6, format_money(order.total_amount))?;
        worksheet.write_string(row, 7, order.sale_date.format("%Y-%m-%d %H:%M:%S").to_string())?;
        worksheet.write_string(row, 8, &order.created_by)?;
    }

    for (col, width) in (0u16..).zip(COLUMN_WIDTHS) {
        worksheet.set_column_width(col, width)?;
    }

    workbook.save_to_buffer()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal::Decimal;

    #[test]
    fn test_export_filename() {
        let at = Utc.with_ymd_and_hms(2025, 10, 18, 9, 5, 3).unwrap();
        assert_eq!(export_filename(at), "orders_export_20251018_090503.xlsx");
    }

    #[test]
    fn test_workbook_is_a_zip_archive() {
        let order = Order {
            id: 1,
            product_id: 3,
            product_name: "Paracetamol".into(),
            quantity_sold: 2,
            total_amount: Decimal::new(500, 2),
            customer_name: None,
            customer_address: Some("1 Main St".into()),
            customer_phone: None,
            sale_date: Utc::now(),
            created_by: "clerk".into(),
        };

        let bytes = orders_workbook(&[order]).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }
}
