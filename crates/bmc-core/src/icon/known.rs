//! Built-in icon names for a few well-known sites.

use crate::url_model::second_level_label;

/// Second-level domain label → built-in icon name.
const KNOWN_ICONS: &[(&str, &str)] = &[
    ("github", "github"),
    ("gitlab", "gitlab"),
    ("bitbucket", "bitbucket"),
    ("react", "react"),
    ("vuejs", "vuejs"),
    ("angular", "angular"),
    ("figma", "figma"),
    ("youtube", "youtube"),
    ("stackoverflow", "stack-overflow"),
    ("twitter", "twitter"),
    ("facebook", "facebook"),
    ("linkedin", "linkedin"),
];

/// Built-in icon for `domain`, matched on its second-level label.
pub fn known_icon(domain: &str) -> Option<&'static str> {
    let label = second_level_label(domain)?;
    KNOWN_ICONS
        .iter()
        .find(|(key, _)| *key == label)
        .map(|(_, icon)| *icon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_domains_map_to_icons() {
        assert_eq!(known_icon("github.com"), Some("github"));
        assert_eq!(known_icon("www.YouTube.com"), Some("youtube"));
        assert_eq!(known_icon("stackoverflow.com"), Some("stack-overflow"));
        assert_eq!(known_icon("gist.github.com"), Some("github"));
        assert_eq!(known_icon("linkedin.com:443"), Some("linkedin"));
    }

    #[test]
    fn unknown_or_single_label_domains() {
        assert_eq!(known_icon("example.com"), None);
        assert_eq!(known_icon("github"), None);
        assert_eq!(known_icon("github.co.uk"), None);
    }
}
