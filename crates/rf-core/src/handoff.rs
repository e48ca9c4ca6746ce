//! Selection hand-off: what the selection step passes to the material step.
//!
//! JSON for the page, MessagePack for compact transfer between steps.

use crate::model::{Category, SelectionRegion};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionHandoff {
    pub category: Category,
    pub image_url: String,
    pub regions: Vec<HandoffRegion>,
    /// Union bounding box of every region, `None` when nothing is selected.
    pub bounds: Option<AreaBounds>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandoffRegion {
    pub points: Vec<Point>,
    pub width: f64,
    /// CSS `rgba(...)` string.
    pub fill_color: String,
    pub outline_color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AreaBounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl From<Rect> for AreaBounds {
    fn from(r: Rect) -> Self {
        Self {
            x: r.x0,
            y: r.y0,
            width: r.width(),
            height: r.height(),
        }
    }
}

impl SelectionHandoff {
    pub fn from_regions(category: Category, image_url: &str, regions: &[SelectionRegion]) -> Self {
        let bounds = regions
            .iter()
            .filter_map(|r| r.path.bounds())
            .reduce(|acc, b| acc.union(b))
            .map(AreaBounds::from);
        Self {
            category,
            image_url: image_url.to_string(),
            regions: regions
                .iter()
                .map(|r| HandoffRegion {
                    points: r.path.points().to_vec(),
                    width: r.path.width,
                    fill_color: r.fill_color.to_css(),
                    outline_color: r.outline_color.to_css(),
                })
                .collect(),
            bounds,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string(self).map_err(|e| format!("Serialization error: {e}"))
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Hand-off parse error: {e}"))
    }

    pub fn to_msgpack(&self) -> Result<Vec<u8>, String> {
        rmp_serde::to_vec_named(self).map_err(|e| format!("Serialization error: {e}"))
    }

    pub fn from_msgpack(bytes: &[u8]) -> Result<Self, String> {
        rmp_serde::from_slice(bytes).map_err(|e| format!("Hand-off decode error: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PenColor, Stroke};
    use pretty_assertions::assert_eq;

    fn region(points: &[(f64, f64)]) -> SelectionRegion {
        let stroke = Stroke::from_points(
            points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
            10.0,
            PenColor::Warm.stroke(),
        );
        SelectionRegion::from_stroke(stroke, PenColor::Warm.fill())
    }

    #[test]
    fn bounds_union_all_regions() {
        let handoff = SelectionHandoff::from_regions(
            Category::Floor,
            "blob:room",
            &[
                region(&[(10.0, 10.0), (50.0, 10.0), (50.0, 40.0)]),
                region(&[(100.0, 80.0), (120.0, 90.0), (105.0, 95.0)]),
            ],
        );
        assert_eq!(
            handoff.bounds,
            Some(AreaBounds {
                x: 10.0,
                y: 10.0,
                width: 110.0,
                height: 85.0,
            })
        );
        assert_eq!(handoff.regions[0].fill_color, "rgba(255, 119, 51, 0.2)");
    }

    #[test]
    fn empty_selection_has_no_bounds() {
        let handoff = SelectionHandoff::from_regions(Category::Wall, "", &[]);
        assert!(handoff.is_empty());
        assert_eq!(handoff.bounds, None);
        assert!(handoff.to_json().unwrap().contains(r#""bounds":null"#));
    }

    #[test]
    fn json_field_names() {
        let handoff = SelectionHandoff::from_regions(
            Category::Door,
            "blob:x",
            &[region(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0)])],
        );
        let json = handoff.to_json().unwrap();
        assert!(json.contains(r#""category":"door""#), "{json}");
        assert!(json.contains(r#""imageUrl":"blob:x""#), "{json}");
        assert!(json.contains(r#""outlineColor":"rgba(255, 119, 51, 0.5)""#), "{json}");
    }

    #[test]
    fn msgpack_decodes_to_same_value() {
        let handoff = SelectionHandoff::from_regions(
            Category::Wall,
            "blob:y",
            &[region(&[(1.5, 2.5), (8.0, 2.0), (3.0, 9.0)])],
        );
        let bytes = handoff.to_msgpack().unwrap();
        assert_eq!(SelectionHandoff::from_msgpack(&bytes).unwrap(), handoff);
        assert!(SelectionHandoff::from_msgpack(&[0xc1]).is_err());
    }
}
