// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! How prims present themselves in the host's outliner: cell styling, icons and tooltips.

use std::collections::BTreeMap;
use std::rc::Rc;

use glam::Vec3;
use stage::ArcType;

use crate::UsdSceneItem;

const DEFAULT_ICON: &str = "out_USD_UsdTyped.png";
const COMPOSITION_ARC_BADGE: &str = "out_USD_CompArcBadge.png";
const VARIANT_BADGE: &str = "out_USD_CompArcBadgeV.png";
const INVISIBLE_COLOR_NAME: &str = "outlinerInvisibleColor";
const INVISIBLE_COLOR_FALLBACK: Vec3 = Vec3::splat(0.403922);

/// Source of named display colors, such as the user's [`Preferences`](crate::Preferences).
pub trait ColorPreferences {
    /// The RGB components of the color called `name`, if it is defined.
    fn color(&self, name: &str) -> Option<[f64; 3]>;
}

/// Styling of one outliner cell.  Fields the handler leaves alone keep the host's defaults.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CellInfo {
    pub font_strikeout: bool,
    pub text_fg_color: Option<Vec3>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IconPosition {
    #[default]
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

/// An outliner icon: a base image plus an optional badge drawn over one of its corners.  Empty
/// names mean no image.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Icon {
    pub base_icon: String,
    pub badge_icon: String,
    pub pos: IconPosition,
}

impl Icon {
    pub fn new(base_icon: impl Into<String>) -> Self {
        Self {
            base_icon: base_icon.into(),
            ..Default::default()
        }
    }
}

fn type_icon(node_type: &str) -> Option<&'static str> {
    Some(match node_type {
        "" => "out_USD_Def.png",
        "BlendShape" => "out_USD_BlendShape.png",
        "Camera" => "out_USD_Camera.png",
        "Capsule" => "out_USD_Capsule.png",
        "Cone" => "out_USD_Cone.png",
        "Cube" => "out_USD_Cube.png",
        "Cylinder" => "out_USD_Cylinder.png",
        "GeomSubset" => "out_USD_GeomSubset.png",
        "LightFilter" => "out_USD_LightFilter.png",
        "LightPortal" => "out_USD_LightPortal.png",
        "mayaReference" | "AL_MayaReference" => "out_USD_mayaReference.png",
        "Mesh" => "out_USD_Mesh.png",
        "NurbsPatch" => "out_USD_NurbsPatch.png",
        "PointInstancer" => "out_USD_PointInstancer.png",
        "Points" => "out_USD_Points.png",
        "Scope" => "out_USD_Scope.png",
        "SkelAnimation" => "out_USD_SkelAnimation.png",
        "Skeleton" => "out_USD_Skeleton.png",
        "SkelRoot" => "out_USD_SkelRoot.png",
        "Sphere" => "out_USD_Sphere.png",
        "Volume" => "out_USD_Volume.png",
        _ => return None,
    })
}

/// Singular and plural tooltip names of the arc types the outliner reports.
fn arc_names(arc_type: ArcType) -> Option<(&'static str, &'static str)> {
    match arc_type {
        ArcType::Reference => Some(("Reference", "References")),
        ArcType::Payload => Some(("Payload", "Payloads")),
        ArcType::Inherit => Some(("Inherit", "Inherits")),
        ArcType::Specialize => Some(("Specialize", "Specializes")),
        ArcType::Variant => Some(("Variant", "Variants")),
        ArcType::Root | ArcType::Relocate => None,
    }
}

pub struct UsdUiInfoHandler {
    colors: Rc<dyn ColorPreferences>,
}

impl UsdUiInfoHandler {
    pub fn new(colors: Rc<dyn ColorPreferences>) -> Self {
        Self { colors }
    }

    /// Styles inactive prims struck out in the invisible-object color.  Returns whether `info`
    /// was changed.
    pub fn tree_view_cell_info(&self, item: &UsdSceneItem, info: &mut CellInfo) -> bool {
        let Ok(active) = item.stage().is_active(item.path()) else {
            return false;
        };
        if active {
            return false;
        }
        info.font_strikeout = true;
        info.text_fg_color = Some(
            self.colors
                .color(INVISIBLE_COLOR_NAME)
                .map(|rgb| Vec3::from(rgb.map(|c| c as f32)))
                .unwrap_or(INVISIBLE_COLOR_FALLBACK),
        );
        true
    }

    /// The icon for `item`'s prim type, badged when the prim has composition arcs.  Without an
    /// item this is the generic scene description icon.
    pub fn tree_view_icon(&self, item: Option<&UsdSceneItem>) -> Icon {
        let Some(item) = item else {
            return Icon::new(DEFAULT_ICON);
        };
        let mut icon = Icon::default();
        if let Some(base) = type_icon(&item.node_type()) {
            icon.base_icon = base.to_owned();
        }

        let arcs = item.stage().composition_arcs(item.path()).unwrap_or_default();
        for arc in arcs {
            match arc.arc_type {
                ArcType::Reference | ArcType::Payload | ArcType::Inherit | ArcType::Specialize => {
                    // A variant badge takes precedence, so keep looking.
                    icon.badge_icon = COMPOSITION_ARC_BADGE.to_owned();
                    icon.pos = IconPosition::LowerRight;
                }
                ArcType::Variant => {
                    icon.badge_icon = VARIANT_BADGE.to_owned();
                    icon.pos = IconPosition::LowerRight;
                    break;
                }
                ArcType::Root | ArcType::Relocate => {}
            }
        }
        icon
    }

    /// Summarizes the prim's composition arcs, e.g.
    /// `<b>Composition Arcs:</b> Inherit, 2 References`.  Empty when there are none.
    pub fn tree_view_tooltip(&self, item: &UsdSceneItem) -> String {
        let mut counts: BTreeMap<ArcType, usize> = BTreeMap::new();
        for arc in item.stage().composition_arcs(item.path()).unwrap_or_default() {
            if arc_names(arc.arc_type).is_some() {
                *counts.entry(arc.arc_type).or_default() += 1;
            }
        }
        if counts.is_empty() {
            return String::new();
        }

        let entries: Vec<String> = counts
            .into_iter()
            .filter_map(|(arc_type, count)| {
                let (singular, plural) = arc_names(arc_type)?;
                Some(match count {
                    1 => singular.to_owned(),
                    n => format!("{} {}", n, plural),
                })
            })
            .collect();
        format!("<b>Composition Arcs:</b> {}", entries.join(", "))
    }

    pub fn long_run_time_label(&self) -> &'static str {
        "Universal Scene Description"
    }
}

// End of File
