//! Radial placement of disease and manifestation nodes.
//!
//! The subject sits at the origin. Diseases are spread evenly around it at a
//! distance that shrinks as the association grows. Manifestations of the
//! focused disease fan out over a 240° arc centred on the disease's angle,
//! measured from the disease node.

use std::f64::consts::TAU;

use autoab_common::BiomarkerAssociation;
use serde::Serialize;
use tracing::debug;

use crate::grouping::{group_associations, DiseaseGroup};
use crate::palette::{disease_color, manifestation_color, NodeColor};

pub const DISEASE_MIN_DISTANCE: f64 = 70.0;
pub const DISEASE_MAX_DISTANCE: f64 = 340.0;
pub const MANIFESTATION_MIN_DISTANCE: f64 = 55.0;
pub const MANIFESTATION_MAX_DISTANCE: f64 = 270.0;
/// Used for manifestations whose prevalence is negative or NaN.
pub const MANIFESTATION_FALLBACK_DISTANCE: f64 = 200.0;
pub const MANIFESTATION_ARC_DEGREES: f64 = 240.0;

/// Linear map of a percentage clamped to [0, 100] onto [max, min].
fn inverse_linear(percent: f64, min: f64, max: f64) -> f64 {
    let p = percent.clamp(0.0, 100.0);
    max - (p / 100.0) * (max - min)
}

/// Distance from the subject; 0% → 340, 100% → 70.
pub fn disease_distance(association: f64) -> f64 {
    let association = if association.is_nan() { 0.0 } else { association };
    inverse_linear(association, DISEASE_MIN_DISTANCE, DISEASE_MAX_DISTANCE)
}

/// Distance from the parent disease; 0% → 270, 100% → 55.
pub fn manifestation_distance(prevalence: f64) -> f64 {
    if prevalence.is_nan() || prevalence < 0.0 {
        return MANIFESTATION_FALLBACK_DISTANCE;
    }
    inverse_linear(prevalence, MANIFESTATION_MIN_DISTANCE, MANIFESTATION_MAX_DISTANCE)
}

pub fn disease_angle(index: usize, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    TAU * index as f64 / count as f64
}

/// Angles for `count` manifestations around `parent_angle`.
/// A single manifestation sits exactly on the parent's angle.
pub fn manifestation_angles(parent_angle: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![parent_angle],
        _ => {
            let arc = MANIFESTATION_ARC_DEGREES.to_radians();
            let start = parent_angle - arc / 2.0;
            let step = arc / (count - 1) as f64;
            (0..count).map(|i| start + step * i as f64).collect()
        }
    }
}

fn polar(angle: f64, distance: f64) -> (f64, f64) {
    (angle.cos() * distance, angle.sin() * distance)
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseNode {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub angle: f64,
    pub distance: f64,
    pub association: f64,
    pub color: NodeColor,
    pub manifestation_count: usize,
    pub focused: bool,
    /// A sibling of the focused disease; renderers hide or fade it.
    pub dimmed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestationNode {
    pub name: String,
    pub disease: String,
    pub x: f64,
    pub y: f64,
    pub angle: f64,
    pub distance: f64,
    pub prevalence: f64,
    pub prevalence_display: String,
    pub color: NodeColor,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkLayout {
    pub subject: String,
    pub focused: Option<String>,
    pub disease_nodes: Vec<DiseaseNode>,
    pub manifestation_nodes: Vec<ManifestationNode>,
}

impl NetworkLayout {
    /// Nothing to draw; renderers show their empty state.
    pub fn is_empty(&self) -> bool {
        self.disease_nodes.is_empty()
    }

    pub fn disease(&self, name: &str) -> Option<&DiseaseNode> {
        self.disease_nodes.iter().find(|n| n.name == name)
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Group `rows` and lay them out around `subject`.
pub fn compute_layout(
    subject: &str,
    rows: &[BiomarkerAssociation],
    selected_disease: Option<&str>,
) -> NetworkLayout {
    let groups = group_associations(rows);
    layout_groups(subject, &groups, selected_disease)
}

/// Lay out already-grouped diseases.
pub fn layout_groups(
    subject: &str,
    groups: &[DiseaseGroup],
    selected_disease: Option<&str>,
) -> NetworkLayout {
    let focused = selected_disease.and_then(|name| groups.iter().find(|g| g.name == name));
    if let (Some(name), None) = (selected_disease, focused) {
        debug!(disease = name, subject, "Selected disease not in layout; showing overview");
    }

    let count = groups.len();
    let mut disease_nodes = Vec::with_capacity(count);
    let mut manifestation_nodes = Vec::new();

    for (index, group) in groups.iter().enumerate() {
        let angle = disease_angle(index, count);
        let distance = disease_distance(group.association);
        let (x, y) = polar(angle, distance);
        let is_focused = focused.is_some_and(|f| f.name == group.name);

        if is_focused {
            let angles = manifestation_angles(angle, group.manifestations.len());
            for (m, m_angle) in group.manifestations.iter().zip(angles) {
                let m_distance = manifestation_distance(m.prevalence);
                let (dx, dy) = polar(m_angle, m_distance);
                manifestation_nodes.push(ManifestationNode {
                    name: m.name.clone(),
                    disease: group.name.clone(),
                    x: x + dx,
                    y: y + dy,
                    angle: m_angle,
                    distance: m_distance,
                    prevalence: m.prevalence,
                    prevalence_display: m.prevalence_display.clone(),
                    color: manifestation_color(m.prevalence),
                });
            }
        }

        disease_nodes.push(DiseaseNode {
            name: group.name.clone(),
            x,
            y,
            angle,
            distance,
            association: group.association,
            color: disease_color(group.association),
            manifestation_count: group.manifestations.len(),
            focused: is_focused,
            dimmed: focused.is_some() && !is_focused,
        });
    }

    NetworkLayout {
        subject: subject.to_string(),
        focused: focused.map(|g| g.name.clone()),
        disease_nodes,
        manifestation_nodes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::Manifestation;

    fn group(name: &str, association: f64, manifestations: &[(&str, f64)]) -> DiseaseGroup {
        DiseaseGroup {
            name: name.into(),
            association,
            manifestations: manifestations
                .iter()
                .map(|(n, p)| Manifestation {
                    name: n.to_string(),
                    prevalence: *p,
                    prevalence_display: format!("{p}%"),
                })
                .collect(),
        }
    }

    #[test]
    fn test_disease_distance_bounds_and_clamping() {
        assert_eq!(disease_distance(0.0), 340.0);
        assert_eq!(disease_distance(100.0), 70.0);
        assert_eq!(disease_distance(50.0), 205.0);
        assert_eq!(disease_distance(-20.0), 340.0);
        assert_eq!(disease_distance(250.0), 70.0);
    }

    #[test]
    fn test_disease_distance_is_monotone() {
        let mut previous = f64::INFINITY;
        for p in 0..=100 {
            let d = disease_distance(p as f64);
            assert!(d <= previous);
            previous = d;
        }
    }

    #[test]
    fn test_manifestation_distance_bounds_and_fallback() {
        assert_eq!(manifestation_distance(0.0), 270.0);
        assert_eq!(manifestation_distance(100.0), 55.0);
        assert_eq!(manifestation_distance(-0.5), 200.0);
        assert_eq!(manifestation_distance(f64::NAN), 200.0);
        assert_eq!(manifestation_distance(140.0), 55.0);
    }

    #[test]
    fn test_diseases_are_spread_evenly() {
        assert_eq!(disease_angle(0, 4), 0.0);
        assert_eq!(disease_angle(1, 4), TAU / 4.0);
        assert_eq!(disease_angle(3, 4), TAU * 3.0 / 4.0);
    }

    #[test]
    fn test_manifestation_arc_is_centred_on_parent() {
        let parent = 1.0;
        let angles = manifestation_angles(parent, 3);
        let half_arc = MANIFESTATION_ARC_DEGREES.to_radians() / 2.0;
        assert!((angles[0] - (parent - half_arc)).abs() < 1e-12);
        assert!((angles[1] - parent).abs() < 1e-12);
        assert!((angles[2] - (parent + half_arc)).abs() < 1e-12);
    }

    #[test]
    fn test_single_manifestation_uses_parent_angle_exactly() {
        let groups = vec![group("SLE", 40.0, &[]), group("SSc", 20.0, &[("Raynaud", 90.0)])];
        let layout = layout_groups("Anti-Scl70", &groups, Some("SSc"));

        let parent = layout.disease("SSc").unwrap();
        assert_eq!(layout.manifestation_nodes.len(), 1);
        assert_eq!(layout.manifestation_nodes[0].angle, parent.angle);
    }

    #[test]
    fn test_manifestations_are_offset_from_parent_node() {
        let groups = vec![group("SLE", 100.0, &[("Rash", 100.0)])];
        let layout = layout_groups("Anti-Ro52", &groups, Some("SLE"));

        // Angle 0: parent at (70, 0), manifestation 55 further out.
        let node = &layout.manifestation_nodes[0];
        assert!((node.x - 125.0).abs() < 1e-9);
        assert!(node.y.abs() < 1e-9);
    }

    #[test]
    fn test_focus_dims_siblings_only() {
        let groups = vec![group("SLE", 40.0, &[("Rash", 60.0)]), group("SSc", 20.0, &[])];
        let layout = layout_groups("A", &groups, Some("SLE"));
        assert_eq!(layout.focused.as_deref(), Some("SLE"));
        assert!(layout.disease("SLE").unwrap().focused);
        assert!(!layout.disease("SLE").unwrap().dimmed);
        assert!(layout.disease("SSc").unwrap().dimmed);
    }

    #[test]
    fn test_unknown_selection_renders_overview() {
        let groups = vec![group("SLE", 40.0, &[("Rash", 60.0)])];
        let layout = layout_groups("A", &groups, Some("Gout"));
        assert_eq!(layout.focused, None);
        assert!(layout.manifestation_nodes.is_empty());
        assert!(layout.disease_nodes.iter().all(|n| !n.dimmed));
    }

    #[test]
    fn test_empty_rows_give_empty_layout() {
        let layout = compute_layout("Anti-Ro52", &[], None);
        assert!(layout.is_empty());
        assert!(layout.manifestation_nodes.is_empty());
        assert_eq!(layout.subject, "Anti-Ro52");
    }
}
