use chrono::{DateTime, Local, Utc};

const FORMAT: &str = "%H:%M:%S";

/// Serde adapter writing a `TimeSlot` as its "HH:00" label
pub mod time_label {
    use crate::core::data::TimeSlot;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(slot: &TimeSlot, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&slot.label())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<TimeSlot, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<TimeSlot>().map_err(Error::custom)
    }
}

/// Local wall-clock time of an event, used by notifications
pub fn format_clock(dt: &DateTime<Utc>) -> String {
    dt.with_timezone(&Local).format(FORMAT).to_string()
}

/// Truncate to `max_chars` characters, marking the cut with an ellipsis
pub fn truncate_string(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max_chars - 1).collect();
    out.push('…');
    out
}

/// Pad or truncate to exactly `width` characters
pub fn fit(text: &str, width: usize) -> String {
    let cut = truncate_string(text, width);
    let pad = width.saturating_sub(cut.chars().count());
    format!("{}{}", cut, " ".repeat(pad))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        assert_eq!(truncate_string("Mathématiques", 20), "Mathématiques");
        assert_eq!(truncate_string("Mathématiques", 6), "Mathé…");
        assert_eq!(truncate_string("abc", 0), "");
    }

    #[test]
    fn test_fit_pads_to_width() {
        assert_eq!(fit("A101", 6), "A101  ");
        assert_eq!(fit("Base de données", 8).chars().count(), 8);
    }
}
