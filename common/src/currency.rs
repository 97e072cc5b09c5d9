/// Prices are whole rupees with no minor units. All money math in this crate
/// is exact `u64` arithmetic; formatting is the only place digits move.
///
/// Indian grouping: the last three digits form one group, every group above
/// that is two digits ("12,34,567").
pub fn group_digits(amount: u64) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let head = head.as_bytes();
    let mut grouped = String::new();
    let lead = head.len() % 2;
    if lead == 1 {
        grouped.push(head[0] as char);
    }
    for pair in head[lead..].chunks(2) {
        if !grouped.is_empty() {
            grouped.push(',');
        }
        grouped.push(pair[0] as char);
        grouped.push(pair[1] as char);
    }
    grouped.push(',');
    grouped.push_str(tail);
    grouped
}

/// Format a rupee amount for display.
pub fn format_amount(amount: u64) -> String {
    format!("₹{}", group_digits(amount))
}
