use chrono::NaiveDate;

/// fr-FR digit group separator (narrow no-break space).
const GROUP_SEPARATOR: char = '\u{202f}';

/// Renders an Ariary amount the way fr-FR locales do: `2 500 000 Ar`.
pub fn format_currency(amount: u128) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 * GROUP_SEPARATOR.len_utf8() + 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(c);
    }
    grouped.push_str(" Ar");
    grouped
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Coarse bucket of a progress percentage, used to color the gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressBand {
    Minimal,
    Low,
    Medium,
    High,
}

impl ProgressBand {
    pub fn of(progress: u8) -> Self {
        match progress {
            80.. => ProgressBand::High,
            50..=79 => ProgressBand::Medium,
            25..=49 => ProgressBand::Low,
            _ => ProgressBand::Minimal,
        }
    }
}
