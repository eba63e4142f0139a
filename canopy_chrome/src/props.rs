// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layered chrome props and the three-layer merge.
//!
//! A caller hands an adaptive chrome **one** prop object, split into:
//!
//! - [`CommonProps`] — the structural intersection of both families' prop
//!   sets. A property is common only if its type in the overlay family is
//!   the same as in the panel family; a same-name property with a narrower
//!   or different type stays family-specific and must be supplied there.
//! - [`OverlayProps`] — properties exclusive to the overlay (dialog) family.
//! - [`PanelProps`] — properties exclusive to the panel (drawer) family.
//!
//! [`ChromeProps::resolve`] merges, per resolution:
//!
//! ```text
//! chosen-family defaults  ←  common props  ←  family-specific props
//! ```
//!
//! Scalar properties overwrite layer by layer; `class` values are
//! **concatenated** across all three layers, never overwritten, so a
//! family's base class always survives caller additions.

use alloc::borrow::Cow;
use alloc::string::String;
use smallvec::SmallVec;

use crate::Family;

/// A class token contributed by one layer.
pub type Class = Cow<'static, str>;

/// Edge a panel-family chrome anchors to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Edge {
    /// Anchored to the bottom edge (the console's default drawer).
    #[default]
    Bottom,
    /// Anchored to the top edge.
    Top,
    /// Anchored to the left edge.
    Left,
    /// Anchored to the right edge.
    Right,
}

/// Properties whose name and type are identical in both families.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CommonProps {
    /// Class contributed to whichever family renders.
    pub class: Option<Class>,
    /// Whether the chrome is modal (blocks interaction behind it).
    pub modal: Option<bool>,
}

/// Properties exclusive to the overlay (dialog) family.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OverlayProps {
    /// Class contributed only when the overlay family renders.
    pub class: Option<Class>,
    /// Whether focus is trapped inside the overlay.
    pub trap_focus: Option<bool>,
    /// Whether pressing escape closes the overlay.
    pub close_on_escape: Option<bool>,
}

/// Properties exclusive to the panel (drawer) family.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PanelProps {
    /// Class contributed only when the panel family renders.
    pub class: Option<Class>,
    /// Edge the panel anchors to.
    pub edge: Option<Edge>,
    /// Whether the page behind the panel scales down while open.
    pub scale_background: Option<bool>,
    /// Whether the panel can be dismissed by dragging it away.
    pub dismissible: Option<bool>,
}

/// The single logical prop object an adaptive chrome accepts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChromeProps {
    /// Properties common to both families.
    pub common: CommonProps,
    /// Overlay-family overrides.
    pub overlay: OverlayProps,
    /// Panel-family overrides.
    pub panel: PanelProps,
}

/// Family-specific slice of a [`ResolvedProps`].
#[derive(Clone, Debug, PartialEq)]
pub enum FamilyProps {
    /// Overlay-family props after the merge.
    Overlay {
        /// Whether focus is trapped inside the overlay.
        trap_focus: bool,
        /// Whether pressing escape closes the overlay.
        close_on_escape: bool,
    },
    /// Panel-family props after the merge.
    Panel {
        /// Edge the panel anchors to.
        edge: Edge,
        /// Whether the page behind the panel scales down while open.
        scale_background: bool,
        /// Whether the panel can be dismissed by dragging it away.
        dismissible: bool,
    },
}

/// Props after the three-layer merge, for the chosen family.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedProps {
    classes: SmallVec<[Class; 3]>,
    /// Whether the chrome is modal.
    pub modal: bool,
    /// The family-specific slice.
    pub family: FamilyProps,
}

impl ResolvedProps {
    /// Class tokens in layer order: family default, common, family-specific.
    #[must_use]
    pub fn classes(&self) -> &[Class] {
        &self.classes
    }

    /// The merged class string, space-joined in layer order.
    #[must_use]
    pub fn class(&self) -> String {
        let mut out = String::new();
        for (i, c) in self.classes.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push_str(c);
        }
        out
    }
}

// Family default layers. These play the role of the concrete component
// family's own defaults in the merge order.
const OVERLAY_BASE_CLASS: &str = "chrome-overlay";
const PANEL_BASE_CLASS: &str = "chrome-panel";
const DEFAULT_MODAL: bool = true;
const DEFAULT_TRAP_FOCUS: bool = true;
const DEFAULT_CLOSE_ON_ESCAPE: bool = true;
const DEFAULT_SCALE_BACKGROUND: bool = false;
const DEFAULT_DISMISSIBLE: bool = true;

impl ChromeProps {
    /// Merge the three layers for the chosen family.
    #[must_use]
    pub fn resolve(&self, family: Family) -> ResolvedProps {
        let mut classes: SmallVec<[Class; 3]> = SmallVec::new();
        classes.push(Cow::Borrowed(match family {
            Family::Overlay => OVERLAY_BASE_CLASS,
            Family::Panel => PANEL_BASE_CLASS,
        }));
        if let Some(c) = &self.common.class {
            classes.push(c.clone());
        }

        let modal = self.common.modal.unwrap_or(DEFAULT_MODAL);

        let family = match family {
            Family::Overlay => {
                if let Some(c) = &self.overlay.class {
                    classes.push(c.clone());
                }
                FamilyProps::Overlay {
                    trap_focus: self.overlay.trap_focus.unwrap_or(DEFAULT_TRAP_FOCUS),
                    close_on_escape: self
                        .overlay
                        .close_on_escape
                        .unwrap_or(DEFAULT_CLOSE_ON_ESCAPE),
                }
            }
            Family::Panel => {
                if let Some(c) = &self.panel.class {
                    classes.push(c.clone());
                }
                FamilyProps::Panel {
                    edge: self.panel.edge.unwrap_or_default(),
                    scale_background: self
                        .panel
                        .scale_background
                        .unwrap_or(DEFAULT_SCALE_BACKGROUND),
                    dismissible: self.panel.dismissible.unwrap_or(DEFAULT_DISMISSIBLE),
                }
            }
        };

        ResolvedProps {
            classes,
            modal,
            family,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::borrow::ToOwned;

    #[test]
    fn defaults_resolve_per_family() {
        let props = ChromeProps::default();

        let overlay = props.resolve(Family::Overlay);
        assert_eq!(overlay.class(), "chrome-overlay");
        assert!(overlay.modal);
        assert_eq!(
            overlay.family,
            FamilyProps::Overlay {
                trap_focus: true,
                close_on_escape: true,
            }
        );

        let panel = props.resolve(Family::Panel);
        assert_eq!(panel.class(), "chrome-panel");
        assert_eq!(
            panel.family,
            FamilyProps::Panel {
                edge: Edge::Bottom,
                scale_background: false,
                dismissible: true,
            }
        );
    }

    #[test]
    fn classes_concatenate_across_all_three_layers() {
        let props = ChromeProps {
            common: CommonProps {
                class: Some("gap-2".into()),
                ..CommonProps::default()
            },
            overlay: OverlayProps {
                class: Some("max-w-lg".into()),
                ..OverlayProps::default()
            },
            panel: PanelProps {
                class: Some("pb-4".into()),
                ..PanelProps::default()
            },
        };

        assert_eq!(
            props.resolve(Family::Overlay).class(),
            "chrome-overlay gap-2 max-w-lg"
        );
        assert_eq!(
            props.resolve(Family::Panel).class(),
            "chrome-panel gap-2 pb-4"
        );
    }

    #[test]
    fn scalar_layers_overwrite_later_wins() {
        let props = ChromeProps {
            common: CommonProps {
                modal: Some(false),
                ..CommonProps::default()
            },
            overlay: OverlayProps {
                close_on_escape: Some(false),
                ..OverlayProps::default()
            },
            panel: PanelProps {
                edge: Some(Edge::Right),
                dismissible: Some(false),
                ..PanelProps::default()
            },
        };

        let overlay = props.resolve(Family::Overlay);
        assert!(!overlay.modal);
        assert_eq!(
            overlay.family,
            FamilyProps::Overlay {
                trap_focus: true,
                close_on_escape: false,
            }
        );

        let panel = props.resolve(Family::Panel);
        assert!(!panel.modal);
        assert_eq!(
            panel.family,
            FamilyProps::Panel {
                edge: Edge::Right,
                scale_background: false,
                dismissible: false,
            }
        );
    }

    #[test]
    fn owned_classes_are_supported() {
        let props = ChromeProps {
            common: CommonProps {
                class: Some(Cow::Owned("m-".to_owned() + "2")),
                ..CommonProps::default()
            },
            ..ChromeProps::default()
        };
        assert_eq!(props.resolve(Family::Panel).class(), "chrome-panel m-2");
    }
}
