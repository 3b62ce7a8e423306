//! Notification (toast) model shared between host tests and the browser
//! layer. Rendering and timers live in `web::notifications`.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

impl NotificationKind {
    /// Anything unrecognized renders as Info.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "success" => NotificationKind::Success,
            "error" => NotificationKind::Error,
            "warning" => NotificationKind::Warning,
            _ => NotificationKind::Info,
        }
    }

    pub fn css_suffix(self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
            NotificationKind::Warning => "warning",
            NotificationKind::Info => "info",
        }
    }

    /// Font Awesome icon class for the toast body.
    pub fn icon_class(self) -> &'static str {
        match self {
            NotificationKind::Success => "fa-check-circle",
            NotificationKind::Error => "fa-exclamation-circle",
            NotificationKind::Warning => "fa-exclamation-triangle",
            NotificationKind::Info => "fa-info-circle",
        }
    }

    /// Accent color for the toast border and icon.
    pub fn accent_color(self) -> &'static str {
        match self {
            NotificationKind::Success => "#27ae60",
            NotificationKind::Error => "#e74c3c",
            NotificationKind::Warning => "#f39c12",
            NotificationKind::Info => "#3498db",
        }
    }
}

/// One toast. Lifetime is bounded by its visible duration; `auto_dismiss_ms`
/// of 0 means the toast stays until explicitly closed.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: String,
    pub message: String,
    pub kind: NotificationKind,
    pub auto_dismiss_ms: u32,
}

impl Notification {
    /// Sticky toasts never schedule an auto-dismiss; only the close button
    /// removes them.
    pub fn is_sticky(&self) -> bool {
        self.auto_dismiss_ms == 0
    }
}

/// Short unique element ids. An LCG is plenty here; ids only need to be
/// unique within one page view.
#[derive(Debug)]
pub struct IdGenerator {
    state: u64,
}

impl IdGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed | 1,
        }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }

    /// 9 characters of base-36, matching the original id shape.
    pub fn next_id(&mut self) -> String {
        const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
        let mut v = self.next_u64();
        let mut out = String::with_capacity(9);
        for _ in 0..9 {
            out.push(ALPHABET[(v % 36) as usize] as char);
            v /= 36;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_and_unknown_falls_back_to_info() {
        for kind in [
            NotificationKind::Success,
            NotificationKind::Error,
            NotificationKind::Warning,
            NotificationKind::Info,
        ] {
            assert_eq!(NotificationKind::from_label(kind.css_suffix()), kind);
        }
        assert_eq!(
            NotificationKind::from_label("verbose"),
            NotificationKind::Info
        );
        assert_eq!(NotificationKind::from_label(""), NotificationKind::Info);
    }

    #[test]
    fn kind_metadata_is_distinct() {
        let kinds = [
            NotificationKind::Success,
            NotificationKind::Error,
            NotificationKind::Warning,
            NotificationKind::Info,
        ];
        let mut colors: Vec<_> = kinds.iter().map(|k| k.accent_color()).collect();
        colors.sort_unstable();
        colors.dedup();
        assert_eq!(colors.len(), 4);
    }

    #[test]
    fn zero_dismiss_delay_means_sticky() {
        let note = Notification {
            id: "abc123def".to_string(),
            message: "hola".to_string(),
            kind: NotificationKind::Info,
            auto_dismiss_ms: 0,
        };
        assert!(note.is_sticky());

        let timed = Notification {
            auto_dismiss_ms: 4000,
            ..note
        };
        assert!(!timed.is_sticky());
    }

    #[test]
    fn ids_are_nine_chars_and_unique() {
        let mut gen = IdGenerator::new(0x5EED);
        let mut ids: Vec<String> = (0..1000).map(|_| gen.next_id()).collect();
        assert!(ids.iter().all(|id| id.len() == 9));
        assert!(ids
            .iter()
            .all(|id| id.chars().all(|c| c.is_ascii_alphanumeric())));
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 1000);
    }
}
