//! Static source styling: badge classes for the table and colours for the
//! source chart. Sources are matched on their lowercase alphanumeric key, so
//! `(direct)`, `Direct` and `direct` all share one entry.

/// Badge class for sources missing from `KNOWN_SOURCES`.
pub const DEFAULT_BADGE: &str = "badge-default";

/// Chart colours for unrecognised sources, picked by slice position.
pub const PALETTE: [&str; 10] = [
    "#6366F1", "#14B8A6", "#F97316", "#EC4899", "#84CC16", "#06B6D4", "#A855F7", "#EAB308",
    "#EF4444", "#64748B",
];

/// (source key, badge class, chart colour)
const KNOWN_SOURCES: &[(&str, &str, &str)] = &[
    ("google", "badge-google", "#4285F4"),
    ("facebook", "badge-facebook", "#1877F2"),
    ("fb", "badge-facebook", "#1877F2"),
    ("mfacebookcom", "badge-facebook", "#1877F2"),
    ("instagram", "badge-instagram", "#E4405F"),
    ("ig", "badge-instagram", "#E4405F"),
    ("tiktok", "badge-tiktok", "#111111"),
    ("youtube", "badge-youtube", "#FF0000"),
    ("bing", "badge-bing", "#008373"),
    ("direct", "badge-direct", "#6B7280"),
    ("email", "badge-email", "#F59E0B"),
    ("newsletter", "badge-email", "#F59E0B"),
    ("whatsapp", "badge-whatsapp", "#25D366"),
    ("linkedin", "badge-linkedin", "#0A66C2"),
    ("twitter", "badge-twitter", "#1DA1F2"),
    ("chatgptcom", "badge-ai", "#10A37F"),
];

pub fn source_key(source: &str) -> String {
    source
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

fn lookup(source: &str) -> Option<&'static (&'static str, &'static str, &'static str)> {
    let key = source_key(source);
    KNOWN_SOURCES.iter().find(|(known, _, _)| *known == key)
}

pub fn badge_class(source: &str) -> &'static str {
    lookup(source).map(|entry| entry.1).unwrap_or(DEFAULT_BADGE)
}

/// Fixed colour for a recognised source, else the palette colour at `index`.
pub fn chart_color(source: &str, index: usize) -> &'static str {
    lookup(source)
        .map(|entry| entry.2)
        .unwrap_or(PALETTE[index % PALETTE.len()])
}

/// Colour for the collapsed "other" slice.
pub fn fallback_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_key_strips_punctuation() {
        assert_eq!(source_key("(direct)"), "direct");
        assert_eq!(source_key("m.facebook.com"), "mfacebookcom");
        assert_eq!(source_key("Google"), "google");
    }

    #[test]
    fn test_badge_lookup_with_default() {
        assert_eq!(badge_class("google"), "badge-google");
        assert_eq!(badge_class("(direct)"), "badge-direct");
        assert_eq!(badge_class("IG"), "badge-instagram");
        assert_eq!(badge_class("some-affiliate"), DEFAULT_BADGE);
        assert_eq!(badge_class("(not set)"), DEFAULT_BADGE);
    }

    #[test]
    fn test_chart_colors_are_deterministic() {
        assert_eq!(chart_color("google", 5), "#4285F4");
        assert_eq!(chart_color("unknown", 0), PALETTE[0]);
        assert_eq!(chart_color("unknown", 12), PALETTE[2]);
        assert_eq!(chart_color("unknown", 3), chart_color("another", 3));
    }
}
