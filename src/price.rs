//! Rupiah formatting, matching `Intl.NumberFormat("id-ID", { currency: "IDR" })`
//! with no fraction digits.

/// Format an amount in rupiah, e.g. `1234000` → `"Rp 1.234.000"`.
pub fn format_idr(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if amount < 0 {
        format!("-Rp {}", grouped)
    } else {
        format!("Rp {}", grouped)
    }
}
