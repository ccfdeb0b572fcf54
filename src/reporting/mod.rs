pub mod chart;
pub mod console;
pub mod insights;

pub use insights::ModelInsights;

/// Celé číslo s oddeľovačom tisícov (1234567 -> "1,234,567")
pub fn with_thousands(value: usize) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
