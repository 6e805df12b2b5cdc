/// Amounts are kept in kobo.
pub type Amount = i64;

pub const KOBO_PER_NAIRA: Amount = 100;

/// Largest amount a single request may move, ₦1,000,000,000.
pub const MAX_AMOUNT: Amount = naira(1_000_000_000);
pub const MIN_AMOUNT: Amount = -MAX_AMOUNT;

pub const AMOUNT_TOO_LARGE_MESSAGE: &str = "Amount is too large.";

pub const fn naira(value: i64) -> Amount {
    value * KOBO_PER_NAIRA
}

/// Formats kobo as naira with thousands separators, `₦1,000` or `₦4,500.50`.
pub fn format_naira(amount: Amount) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let abs = amount.unsigned_abs();
    let whole = abs / KOBO_PER_NAIRA as u64;
    let fraction = abs % KOBO_PER_NAIRA as u64;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if fraction == 0 {
        format!("{sign}₦{grouped}")
    } else {
        format!("{sign}₦{grouped}.{fraction:02}")
    }
}
