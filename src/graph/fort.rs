//! Fort attributes.
//!
//! A fort carries an immutable value and a set of alert flags that are
//! fixed when the fort is added to a graph.

/// Label marker for a self-alerting fort in the text graph format.
pub const SELF_ALERT_MARKER: char = '!';
/// Label marker for a shield fort in the text graph format.
pub const SHIELD_MARKER: char = '#';
/// Label marker for an immune fort in the text graph format.
pub const IMMUNE_MARKER: char = '*';

/// Alert-related behaviour of a fort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FortFlags {
    /// Goes on alert the moment it is attacked, before its gold is taken.
    pub self_alert: bool,
    /// Never alerts its neighbours when attacked.
    pub shield: bool,
    /// Alerts never halve its gold.
    pub immune: bool,
}

impl FortFlags {
    pub const NONE: FortFlags = FortFlags {
        self_alert: false,
        shield: false,
        immune: false,
    };

    pub const fn self_alert() -> Self {
        FortFlags {
            self_alert: true,
            ..FortFlags::NONE
        }
    }

    pub const fn shield() -> Self {
        FortFlags {
            shield: true,
            ..FortFlags::NONE
        }
    }

    pub const fn immune() -> Self {
        FortFlags {
            immune: true,
            ..FortFlags::NONE
        }
    }

    /// Reads the flags encoded as marker characters inside a label.
    pub fn from_label_markers(label: &str) -> Self {
        FortFlags {
            self_alert: label.contains(SELF_ALERT_MARKER),
            shield: label.contains(SHIELD_MARKER),
            immune: label.contains(IMMUNE_MARKER),
        }
    }

    /// Returns `label` with any marker for a set flag that it lacks appended.
    pub fn mark_label(self, label: &str) -> String {
        let mut marked = label.to_string();
        let present = FortFlags::from_label_markers(label);
        if self.self_alert && !present.self_alert {
            marked.push(SELF_ALERT_MARKER);
        }
        if self.shield && !present.shield {
            marked.push(SHIELD_MARKER);
        }
        if self.immune && !present.immune {
            marked.push(IMMUNE_MARKER);
        }
        marked
    }
}

/// A fort stored in a [`FortGraph`](super::FortGraph).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fort {
    pub label: String,
    pub value: u32,
    pub flags: FortFlags,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_decode_each_flag() {
        assert_eq!(FortFlags::from_label_markers("plain"), FortFlags::NONE);
        assert_eq!(FortFlags::from_label_markers("a!"), FortFlags::self_alert());
        assert_eq!(FortFlags::from_label_markers("#b"), FortFlags::shield());
        assert_eq!(FortFlags::from_label_markers("c*"), FortFlags::immune());

        let all = FortFlags::from_label_markers("x!#*");
        assert!(all.self_alert && all.shield && all.immune);
    }

    #[test]
    fn mark_label_appends_only_missing_markers() {
        assert_eq!(FortFlags::NONE.mark_label("a"), "a");
        assert_eq!(FortFlags::shield().mark_label("a"), "a#");
        assert_eq!(FortFlags::shield().mark_label("#a"), "#a");

        let flags = FortFlags {
            self_alert: true,
            shield: false,
            immune: true,
        };
        let marked = flags.mark_label("k");
        assert_eq!(marked, "k!*");
        assert_eq!(FortFlags::from_label_markers(&marked), flags);
    }
}
