//! Display helpers for book cards and the detail screen

use super::models::Book;

/// Price with yen sign and thousands separators, e.g. `¥1,760`
pub fn format_price(yen: u32) -> String {
    let digits = yen.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("¥{}", grouped)
}

/// Number of filled stars for a rating
pub fn star_count(rating: f32) -> u8 {
    rating.clamp(0.0, 5.0).floor() as u8
}

/// Estimated download size in megabytes
pub fn estimated_size_mb(page_count: u32) -> u32 {
    (page_count as f64 * 0.15).round() as u32
}

/// Progress badge shown on an owned book's card
pub fn card_label(book: &Book) -> Option<String> {
    if !book.is_owned {
        return None;
    }
    match book.progress {
        Some(100) => Some("Finished".to_string()),
        Some(p) => Some(format!("{}%", p)),
        None => None,
    }
}

/// Where tapping a card leads: owned books open in the reader
pub fn card_path(book: &Book) -> String {
    if book.is_owned {
        format!("/reader/{}", book.id)
    } else {
        format!("/book/{}", book.id)
    }
}
