//! Surface selection and rendering.
//!
//! A render pass resolves a fresh view model, picks the layout for the
//! requested surface and capability tier, and builds it. Failures never
//! escape: a missing required field yields [`SurfaceLayout::Placeholder`].
//!
//! The capability tier is resolved once by the caller and passed in, instead
//! of each layout checking the host version for itself.

mod layout;
mod style;

pub use layout::{
    compact_leading, expanded_region, keyline_tint, small_lock_screen, standard_lock_screen,
    status_indicator, CompactLeading, EtaRow, ExpandedRegion, FooterTrailing, Headline,
    PlaceholderLayout, ProgressBar, SmallBody, SmallHeaderIcon, SmallLockScreen,
    StandardLockScreen, StatusIndicator,
};
pub use style::{style_for, StateStyle, StatusIcon, Tint};

use print_activity_protocol::ContentSnapshot;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::color::{Argb, ThemeVariant};
use crate::error::Result;
use crate::labels::LabelResolver;
use crate::presentation::PresentationPolicy;
use crate::state::{ResolvedViewModel, StateResolver};

/// Host capability ladder, lowest first. Comparing tiers is meaningful:
/// a surface may use any layout whose tier is `<=` the host's.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    uniffi::Enum,
)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityTier {
    /// One lock screen layout for every size.
    #[default]
    Legacy,
    /// Host reports a lock screen family (small / medium) per placement.
    AdaptiveLockScreen,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, uniffi::Enum,
)]
#[serde(rename_all = "snake_case")]
pub enum LockScreenFamily {
    Small,
    #[default]
    Medium,
}

/// One rendering region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, uniffi::Enum)]
#[serde(tag = "surface", rename_all = "snake_case")]
pub enum Surface {
    LockScreen { family: LockScreenFamily },
    Expanded,
    CompactLeading,
    CompactTrailing,
    Minimal,
}

impl Surface {
    pub const ALL: [Surface; 6] = [
        Surface::LockScreen {
            family: LockScreenFamily::Medium,
        },
        Surface::LockScreen {
            family: LockScreenFamily::Small,
        },
        Surface::Expanded,
        Surface::CompactLeading,
        Surface::CompactTrailing,
        Surface::Minimal,
    ];

    /// Lock screen draws on the light palette; the companion region is always dark.
    pub fn theme_variant(self) -> ThemeVariant {
        match self {
            Surface::LockScreen { .. } => ThemeVariant::Light,
            _ => ThemeVariant::Dark,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Surface::LockScreen {
                family: LockScreenFamily::Small,
            } => "lock_screen_small",
            Surface::LockScreen {
                family: LockScreenFamily::Medium,
            } => "lock_screen",
            Surface::Expanded => "expanded",
            Surface::CompactLeading => "compact_leading",
            Surface::CompactTrailing => "compact_trailing",
            Surface::Minimal => "minimal",
        }
    }
}

/// Countdown thresholds in hours, one per surface.
///
/// Larger surfaces switch to a countdown earlier than the compact ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, uniffi::Record)]
#[serde(default, rename_all = "camelCase")]
pub struct SurfaceThresholds {
    pub lock_screen: i64,
    pub small_lock_screen: i64,
    pub expanded: i64,
    pub compact_leading: i64,
}

impl Default for SurfaceThresholds {
    fn default() -> Self {
        Self {
            lock_screen: 3,
            small_lock_screen: 1,
            expanded: 3,
            compact_leading: 1,
        }
    }
}

/// Which lock screen layout the host can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockScreenLayout {
    Standard,
    Small,
}

/// Picks the lock screen layout. Hosts below the adaptive tier always get the
/// standard layout, whatever family they report.
pub fn select_lock_screen_layout(
    tier: CapabilityTier,
    family: LockScreenFamily,
) -> LockScreenLayout {
    if tier >= CapabilityTier::AdaptiveLockScreen && family == LockScreenFamily::Small {
        LockScreenLayout::Small
    } else {
        LockScreenLayout::Standard
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum SurfaceLayout {
    StandardLockScreen(StandardLockScreen),
    SmallLockScreen(SmallLockScreen),
    Expanded(ExpandedRegion),
    CompactLeading { leading: CompactLeading },
    StatusIndicator { indicator: StatusIndicator },
    Placeholder(PlaceholderLayout),
}

impl SurfaceLayout {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, SurfaceLayout::Placeholder(_))
    }
}

/// Output of one render pass for one surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedSurface {
    pub surface: Surface,
    pub view_model: Option<ResolvedViewModel>,
    pub layout: SurfaceLayout,
    /// Companion region outline color; `None` on the lock screen.
    pub keyline_tint: Option<Argb>,
}

/// Everything a render pass needs besides the snapshot itself.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub resolver: StateResolver<'a>,
    pub policy: PresentationPolicy<'a>,
    pub labels: &'a dyn LabelResolver,
    pub tier: CapabilityTier,
    pub thresholds: SurfaceThresholds,
}

impl RenderContext<'_> {
    /// Renders one surface. Never fails; see [`SurfaceLayout::Placeholder`].
    pub fn render(
        &self,
        snapshot: Option<&ContentSnapshot>,
        instance_id: &str,
        surface: Surface,
    ) -> RenderedSurface {
        let resolved = self
            .resolver
            .resolve(snapshot, instance_id, surface.theme_variant());

        let vm = match resolved {
            Ok(vm) => vm,
            Err(err) => {
                warn!(instance_id, surface = surface.name(), error = %err, "Rendering placeholder");
                return RenderedSurface {
                    surface,
                    view_model: None,
                    layout: SurfaceLayout::Placeholder(PlaceholderLayout::for_error(&err)),
                    keyline_tint: None,
                };
            }
        };

        let layout = match self.build_layout(&vm, surface) {
            Ok(layout) => layout,
            Err(err) => {
                warn!(instance_id, surface = surface.name(), error = %err, "Rendering placeholder");
                SurfaceLayout::Placeholder(PlaceholderLayout::for_error(&err))
            }
        };

        let keyline_tint = match surface {
            Surface::LockScreen { .. } => None,
            _ => Some(keyline_tint(&vm)),
        };

        RenderedSurface {
            surface,
            view_model: Some(vm),
            layout,
            keyline_tint,
        }
    }

    /// Renders every surface for one instance.
    pub fn render_all(
        &self,
        snapshot: Option<&ContentSnapshot>,
        instance_id: &str,
    ) -> Vec<RenderedSurface> {
        Surface::ALL
            .iter()
            .map(|surface| self.render(snapshot, instance_id, *surface))
            .collect()
    }

    fn build_layout(&self, vm: &ResolvedViewModel, surface: Surface) -> Result<SurfaceLayout> {
        let t = self.thresholds;
        let layout = match surface {
            Surface::LockScreen { family } => match select_lock_screen_layout(self.tier, family) {
                LockScreenLayout::Small => SurfaceLayout::SmallLockScreen(small_lock_screen(
                    vm,
                    &self.policy,
                    t.small_lock_screen,
                )),
                LockScreenLayout::Standard => SurfaceLayout::StandardLockScreen(
                    standard_lock_screen(vm, &self.policy, t.lock_screen),
                ),
            },
            Surface::Expanded => SurfaceLayout::Expanded(expanded_region(
                vm,
                &self.policy,
                self.labels,
                t.expanded,
            )?),
            Surface::CompactLeading => SurfaceLayout::CompactLeading {
                leading: compact_leading(vm, &self.policy, t.compact_leading),
            },
            Surface::CompactTrailing | Surface::Minimal => SurfaceLayout::StatusIndicator {
                indicator: status_indicator(vm),
            },
        };
        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_are_ordered() {
        assert!(CapabilityTier::Legacy < CapabilityTier::AdaptiveLockScreen);
    }

    #[test]
    fn legacy_tier_degrades_to_standard() {
        assert_eq!(
            select_lock_screen_layout(CapabilityTier::Legacy, LockScreenFamily::Small),
            LockScreenLayout::Standard
        );
        assert_eq!(
            select_lock_screen_layout(CapabilityTier::Legacy, LockScreenFamily::Medium),
            LockScreenLayout::Standard
        );
    }

    #[test]
    fn adaptive_tier_uses_family() {
        assert_eq!(
            select_lock_screen_layout(CapabilityTier::AdaptiveLockScreen, LockScreenFamily::Small),
            LockScreenLayout::Small
        );
        assert_eq!(
            select_lock_screen_layout(CapabilityTier::AdaptiveLockScreen, LockScreenFamily::Medium),
            LockScreenLayout::Standard
        );
    }

    #[test]
    fn theme_variant_per_surface() {
        assert_eq!(
            Surface::LockScreen {
                family: LockScreenFamily::Small
            }
            .theme_variant(),
            ThemeVariant::Light
        );
        assert_eq!(Surface::Minimal.theme_variant(), ThemeVariant::Dark);
    }

    #[test]
    fn default_thresholds_match_surface_sizes() {
        let t = SurfaceThresholds::default();
        assert_eq!((t.lock_screen, t.expanded), (3, 3));
        assert_eq!((t.small_lock_screen, t.compact_leading), (1, 1));
    }
}
