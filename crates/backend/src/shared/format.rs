/// Число с разделителями тысяч (точками): `1234567` -> `1.234.567`
pub fn format_number(n: usize) -> String {
    let digits = n.to_string();
    let head = digits.len() % 3;
    let mut groups: Vec<&str> = Vec::new();
    if head > 0 {
        groups.push(&digits[..head]);
    }
    let mut i = head;
    while i < digits.len() {
        groups.push(&digits[i..i + 3]);
        i += 3;
    }
    groups.join(".")
}

/// Response size for the request log; `-` when unknown (streamed body).
pub fn format_size(size: Option<usize>) -> String {
    size.map(format_number).unwrap_or_else(|| "-".to_string())
}
