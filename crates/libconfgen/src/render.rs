//! Deterministic rendering of configuration documents.
//!
//! Rendering is pure: the same settings always produce byte-identical
//! output, and the line order is the order the settings are declared in,
//! never the order options arrived in.

/// A single `Key=value` assignment destined for a sectioned document.
///
/// The value is optional. An absent (or empty) value means the setting
/// is omitted from the rendered output entirely; no defaults are ever
/// written on its behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setting {
    pub key: &'static str,
    pub value: Option<String>,
}

impl Setting {
    pub fn new(key: &'static str, value: Option<String>) -> Self {
        Setting { key, value }
    }
}

/// Render a sectioned document: the `[Header]` line, then one
/// `Key=value` line per present setting, in slice order.
pub fn render_sectioned(header: &str, settings: &[Setting]) -> String {
    let mut out = String::new();
    out.push_str(header);
    out.push('\n');

    for setting in settings {
        if let Some(value) = &setting.value
            && !value.is_empty()
        {
            out.push_str(setting.key);
            out.push('=');
            out.push_str(value);
            out.push('\n');
        }
    }

    out
}

/// Render a flat document: one line per whitespace-separated token of
/// `list`, preserving token order, no header.
pub fn render_flat(list: &str) -> String {
    let mut out = String::new();
    for token in list.split_whitespace() {
        out.push_str(token);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sectioned_header_only() {
        let out = render_sectioned("[Journal]", &[]);
        assert_eq!(out, "[Journal]\n");
    }

    #[test]
    fn test_sectioned_present_settings_in_order() {
        let settings = [
            Setting::new("Storage", Some("auto".to_string())),
            Setting::new("Compress", Some("yes".to_string())),
        ];
        let out = render_sectioned("[Journal]", &settings);
        assert_eq!(out, "[Journal]\nStorage=auto\nCompress=yes\n");
    }

    #[test]
    fn test_sectioned_absent_settings_omitted() {
        let settings = [
            Setting::new("Storage", None),
            Setting::new("Compress", Some("yes".to_string())),
            Setting::new("RateLimitBurst", None),
        ];
        let out = render_sectioned("[Journal]", &settings);
        assert_eq!(out, "[Journal]\nCompress=yes\n");
    }

    #[test]
    fn test_sectioned_empty_value_treated_as_absent() {
        let settings = [
            Setting::new("Storage", Some(String::new())),
            Setting::new("Compress", Some("no".to_string())),
        ];
        let out = render_sectioned("[Journal]", &settings);
        assert_eq!(out, "[Journal]\nCompress=no\n");
    }

    #[test]
    fn test_sectioned_order_fixed_by_declaration_not_input() {
        // The slice order is the output order, whatever the caller's
        // argument order was.
        let settings = [
            Setting::new("Storage", Some("persistent".to_string())),
            Setting::new("Compress", Some("no".to_string())),
            Setting::new("RateLimitIntervalSec", Some("30s".to_string())),
            Setting::new("RateLimitBurst", Some("1000".to_string())),
            Setting::new("ForwardToSyslog", Some("yes".to_string())),
            Setting::new("ForwardToKMsg", Some("no".to_string())),
            Setting::new("ForwardToConsole", Some("no".to_string())),
            Setting::new("ForwardToWall", Some("yes".to_string())),
        ];
        let out = render_sectioned("[Journal]", &settings);
        assert_eq!(
            out,
            "[Journal]\n\
             Storage=persistent\n\
             Compress=no\n\
             RateLimitIntervalSec=30s\n\
             RateLimitBurst=1000\n\
             ForwardToSyslog=yes\n\
             ForwardToKMsg=no\n\
             ForwardToConsole=no\n\
             ForwardToWall=yes\n"
        );
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let settings = [
            Setting::new("Storage", Some("auto".to_string())),
            Setting::new("ForwardToSyslog", Some("yes".to_string())),
        ];
        let first = render_sectioned("[Journal]", &settings);
        let second = render_sectioned("[Journal]", &settings);
        assert_eq!(first, second);
        assert_eq!(render_flat("ipip sit"), render_flat("ipip sit"));
    }

    #[test]
    fn test_flat_one_token_per_line() {
        assert_eq!(render_flat("ipip sit vti"), "ipip\nsit\nvti\n");
    }

    #[test]
    fn test_flat_preserves_order_and_collapses_whitespace() {
        assert_eq!(render_flat("  vti \t ipip\nsit  "), "vti\nipip\nsit\n");
    }

    #[test]
    fn test_flat_empty_input_renders_nothing() {
        assert_eq!(render_flat(""), "");
        assert_eq!(render_flat("   \t "), "");
    }
}
