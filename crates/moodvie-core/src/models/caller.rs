/// Screen that opened the movie detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallerOrigin {
    /// Opened from the user's collection: the movie is already owned.
    HomeScreen,
    /// Opened after a barcode scan: the movie may be added.
    BarcodeScanner,
}

impl CallerOrigin {
    /// Value written under the `caller` bundle key.
    pub fn as_bundle_str(&self) -> &'static str {
        match self {
            Self::HomeScreen => "HomeScreen",
            Self::BarcodeScanner => "BarcodeScanner",
        }
    }

    pub fn from_bundle_str(s: &str) -> Option<Self> {
        match s {
            "HomeScreen" => Some(Self::HomeScreen),
            "BarcodeScanner" => Some(Self::BarcodeScanner),
            _ => None,
        }
    }
}

impl std::fmt::Display for CallerOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_bundle_str())
    }
}

/// Which collection actions the detail screen shows and wires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionLayout {
    /// Delete shown and wired, add removed.
    DeleteOnly,
    /// Add shown and wired, delete removed.
    AddOnly,
    /// Unknown caller: both controls stay on screen with no handler.
    Unconfigured { caller: String },
}

impl ActionLayout {
    /// Select the layout once, from the raw `caller` bundle value.
    pub fn for_caller(raw: &str) -> Self {
        match CallerOrigin::from_bundle_str(raw) {
            Some(CallerOrigin::HomeScreen) => Self::DeleteOnly,
            Some(CallerOrigin::BarcodeScanner) => Self::AddOnly,
            None => {
                tracing::warn!(caller = raw, "Unrecognized caller, leaving actions unwired");
                Self::Unconfigured {
                    caller: raw.to_string(),
                }
            }
        }
    }

    pub fn shows_add(&self) -> bool {
        !matches!(self, Self::DeleteOnly)
    }

    pub fn shows_delete(&self) -> bool {
        !matches!(self, Self::AddOnly)
    }

    pub fn add_wired(&self) -> bool {
        matches!(self, Self::AddOnly)
    }

    pub fn delete_wired(&self) -> bool {
        matches!(self, Self::DeleteOnly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_screen_shows_only_delete() {
        let layout = ActionLayout::for_caller("HomeScreen");
        assert_eq!(layout, ActionLayout::DeleteOnly);
        assert!(!layout.shows_add());
        assert!(layout.shows_delete() && layout.delete_wired());
    }

    #[test]
    fn test_barcode_scanner_shows_only_add() {
        let layout = ActionLayout::for_caller("BarcodeScanner");
        assert_eq!(layout, ActionLayout::AddOnly);
        assert!(!layout.shows_delete());
        assert!(layout.shows_add() && layout.add_wired());
    }

    #[test]
    fn test_unknown_caller_keeps_both_inert() {
        let layout = ActionLayout::for_caller("homescreen");
        assert!(layout.shows_add() && layout.shows_delete());
        assert!(!layout.add_wired() && !layout.delete_wired());
    }

    #[test]
    fn test_caller_round_trips_through_bundle_str() {
        for caller in [CallerOrigin::HomeScreen, CallerOrigin::BarcodeScanner] {
            assert_eq!(CallerOrigin::from_bundle_str(caller.as_bundle_str()), Some(caller));
        }
    }
}
