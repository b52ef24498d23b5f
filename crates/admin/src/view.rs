use chrono::{DateTime, Utc};
use console::style;
use shared::domain::responses::{CouponResponse, CouponStatus};

pub const DATE_FORMAT: &str = "%d %b %Y";

const HEADERS: [&str; 7] = [
    "Code",
    "Discount",
    "Usage",
    "Start Date",
    "End Date",
    "Status",
    "Id",
];

fn row(coupon: &CouponResponse, now: DateTime<Utc>) -> [String; 7] {
    [
        coupon.code.clone(),
        format!("{}%", coupon.discount_percent),
        format!("{}/{}", coupon.usage_count, coupon.usage_limit),
        coupon.start_date.format(DATE_FORMAT).to_string(),
        coupon.end_date.format(DATE_FORMAT).to_string(),
        CouponStatus::at(coupon.end_date, now).to_string(),
        coupon.id.to_string(),
    ]
}

/// Renders the coupon table as of `now`.
pub fn render_table(coupons: &[CouponResponse], now: DateTime<Utc>) -> String {
    let rows: Vec<[String; 7]> = coupons.iter().map(|c| row(c, now)).collect();

    let mut widths = HEADERS.map(str::len);
    for cells in &rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let header = line(&HEADERS.map(String::from));
    let mut out = vec![style(header).bold().to_string()];

    if rows.is_empty() {
        out.push(style("No coupons yet").dim().to_string());
    }

    for cells in &rows {
        let text = line(cells);
        let styled = if cells[5] == CouponStatus::Active.to_string() {
            style(text).green()
        } else {
            style(text).red()
        };
        out.push(styled.to_string());
    }

    out.join("\n")
}
