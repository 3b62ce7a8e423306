//! Typed site configuration.
//!
//! Every knob the page behavior depends on lives here with a named field and
//! a documented default. The page can override individual fields through an
//! inline `<script type="application/json" id="site-config">` block; unknown
//! or malformed JSON falls back to the defaults rather than failing the page.

use serde::Deserialize;

/// Id of the optional inline JSON override block in the page markup.
pub const CONFIG_SCRIPT_ID: &str = "site-config";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SiteConfig {
    /// Fixed-header allowance subtracted when scrolling to an anchor, in px.
    #[serde(default = "default_scroll_offset_px")]
    pub scroll_offset_px: u32,
    /// Extra px added to the scroll-spy probe beyond the header allowance.
    #[serde(default = "default_scroll_probe_extra_px")]
    pub scroll_probe_extra_px: u32,
    /// Quiet period for debounced input handlers, in ms.
    #[serde(default = "default_debounce_delay_ms")]
    pub debounce_delay_ms: u32,
    /// Minimum interval between throttled scroll handler runs, in ms.
    #[serde(default = "default_throttle_delay_ms")]
    pub throttle_delay_ms: u32,
    /// Default toast lifetime, in ms. A per-toast value of 0 means sticky.
    #[serde(default = "default_notification_duration_ms")]
    pub notification_duration_ms: u32,
    /// Exit-animation delay before a dismissed toast is detached, in ms.
    #[serde(default = "default_notification_exit_ms")]
    pub notification_exit_ms: u32,
    /// Auto-hide delay for form status messages, in ms.
    #[serde(default = "default_status_autohide_ms")]
    pub status_autohide_ms: u32,
    /// Stat-counter animation duration, in ms.
    #[serde(default = "default_counter_duration_ms")]
    pub counter_duration_ms: u32,
    /// Delay before the welcome toast after setup, in ms.
    #[serde(default = "default_welcome_delay_ms")]
    pub welcome_delay_ms: u32,
    #[serde(default = "default_true")]
    pub enable_lazy_loading: bool,
    #[serde(default = "default_true")]
    pub enable_intersection_observer: bool,
    #[serde(default = "default_true")]
    pub enable_smooth_scrolling: bool,
    #[serde(default)]
    pub enable_parallax: bool,
    /// Recipient of the mailto fallback submission path.
    #[serde(default = "default_contact_email")]
    pub contact_email: String,
}

fn default_scroll_offset_px() -> u32 {
    80
}

fn default_scroll_probe_extra_px() -> u32 {
    100
}

fn default_debounce_delay_ms() -> u32 {
    300
}

fn default_throttle_delay_ms() -> u32 {
    100
}

fn default_notification_duration_ms() -> u32 {
    4000
}

fn default_notification_exit_ms() -> u32 {
    300
}

fn default_status_autohide_ms() -> u32 {
    5000
}

fn default_counter_duration_ms() -> u32 {
    2000
}

fn default_welcome_delay_ms() -> u32 {
    1000
}

fn default_true() -> bool {
    true
}

fn default_contact_email() -> String {
    "refyconpro@gmail.com".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        serde_json::from_str("{}").expect("empty object yields all defaults")
    }
}

impl SiteConfig {
    /// Parse an inline JSON override. Absent fields keep their defaults;
    /// malformed JSON yields the full defaults.
    pub fn from_json_str(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let c = SiteConfig::default();
        assert_eq!(c.scroll_offset_px, 80);
        assert_eq!(c.scroll_probe_extra_px, 100);
        assert_eq!(c.debounce_delay_ms, 300);
        assert_eq!(c.throttle_delay_ms, 100);
        assert_eq!(c.notification_duration_ms, 4000);
        assert_eq!(c.notification_exit_ms, 300);
        assert_eq!(c.status_autohide_ms, 5000);
        assert_eq!(c.counter_duration_ms, 2000);
        assert!(c.enable_lazy_loading);
        assert!(c.enable_intersection_observer);
        assert!(c.enable_smooth_scrolling);
        assert!(!c.enable_parallax);
        assert_eq!(c.contact_email, "refyconpro@gmail.com");
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let c = SiteConfig::from_json_str(r#"{"scroll_offset_px": 64, "enable_parallax": true}"#);
        assert_eq!(c.scroll_offset_px, 64);
        assert!(c.enable_parallax);
        assert_eq!(c.debounce_delay_ms, 300);
        assert_eq!(c.contact_email, "refyconpro@gmail.com");
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let c = SiteConfig::from_json_str(r#"{"animation_duration_ms": 600, "scroll_offset_px": 64}"#);
        assert_eq!(c.scroll_offset_px, 64);
        assert_eq!(c.debounce_delay_ms, 300);
    }

    #[test]
    fn malformed_json_falls_back_to_defaults() {
        let c = SiteConfig::from_json_str("{not json");
        assert_eq!(c, SiteConfig::default());
    }
}
