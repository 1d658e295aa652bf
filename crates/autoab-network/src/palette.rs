//! Four-tier colour banding for disease and manifestation nodes.
//!
//! Thresholds are evaluated top-down, first match wins.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Strong,
    Moderate,
    Weak,
    Minimal,
}

/// Disease tiers by association %: ≥50, ≥25, ≥10, else.
pub const DISEASE_THRESHOLDS: [f64; 3] = [50.0, 25.0, 10.0];
/// Manifestation tiers by prevalence %: ≥75, ≥40, ≥20, else.
pub const MANIFESTATION_THRESHOLDS: [f64; 3] = [75.0, 40.0, 20.0];

fn tier_for(percent: f64, thresholds: &[f64; 3]) -> Tier {
    if percent >= thresholds[0] {
        Tier::Strong
    } else if percent >= thresholds[1] {
        Tier::Moderate
    } else if percent >= thresholds[2] {
        Tier::Weak
    } else {
        Tier::Minimal
    }
}

pub fn disease_tier(association: f64) -> Tier {
    tier_for(association, &DISEASE_THRESHOLDS)
}

pub fn manifestation_tier(prevalence: f64) -> Tier {
    tier_for(prevalence, &MANIFESTATION_THRESHOLDS)
}

/// Fill gradient, border and glow for one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeColor {
    pub tier: Tier,
    pub gradient: [&'static str; 2],
    pub border: &'static str,
    pub glow: &'static str,
}

impl Tier {
    pub fn disease_color(self) -> NodeColor {
        let (gradient, border, glow) = match self {
            Tier::Strong   => (["#ef4444", "#b91c1c"], "#fca5a5", "rgba(239, 68, 68, 0.55)"),
            Tier::Moderate => (["#f97316", "#c2410c"], "#fdba74", "rgba(249, 115, 22, 0.45)"),
            Tier::Weak     => (["#eab308", "#a16207"], "#fde047", "rgba(234, 179, 8, 0.35)"),
            Tier::Minimal  => (["#64748b", "#334155"], "#cbd5e1", "rgba(100, 116, 139, 0.25)"),
        };
        NodeColor { tier: self, gradient, border, glow }
    }

    pub fn manifestation_color(self) -> NodeColor {
        let (gradient, border, glow) = match self {
            Tier::Strong   => (["#8b5cf6", "#6d28d9"], "#c4b5fd", "rgba(139, 92, 246, 0.55)"),
            Tier::Moderate => (["#3b82f6", "#1d4ed8"], "#93c5fd", "rgba(59, 130, 246, 0.45)"),
            Tier::Weak     => (["#06b6d4", "#0e7490"], "#67e8f9", "rgba(6, 182, 212, 0.35)"),
            Tier::Minimal  => (["#94a3b8", "#475569"], "#e2e8f0", "rgba(148, 163, 184, 0.25)"),
        };
        NodeColor { tier: self, gradient, border, glow }
    }
}

pub fn disease_color(association: f64) -> NodeColor {
    disease_tier(association).disease_color()
}

pub fn manifestation_color(prevalence: f64) -> NodeColor {
    manifestation_tier(prevalence).manifestation_color()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disease_tier_boundaries() {
        assert_eq!(disease_tier(100.0), Tier::Strong);
        assert_eq!(disease_tier(50.0), Tier::Strong);
        assert_eq!(disease_tier(49.99), Tier::Moderate);
        assert_eq!(disease_tier(25.0), Tier::Moderate);
        assert_eq!(disease_tier(24.99), Tier::Weak);
        assert_eq!(disease_tier(10.0), Tier::Weak);
        assert_eq!(disease_tier(9.99), Tier::Minimal);
        assert_eq!(disease_tier(-1.0), Tier::Minimal);
    }

    #[test]
    fn test_manifestation_tier_boundaries() {
        assert_eq!(manifestation_tier(75.0), Tier::Strong);
        assert_eq!(manifestation_tier(74.9), Tier::Moderate);
        assert_eq!(manifestation_tier(40.0), Tier::Moderate);
        assert_eq!(manifestation_tier(39.9), Tier::Weak);
        assert_eq!(manifestation_tier(20.0), Tier::Weak);
        assert_eq!(manifestation_tier(19.9), Tier::Minimal);
    }

    #[test]
    fn test_nan_falls_to_lowest_tier() {
        assert_eq!(disease_tier(f64::NAN), Tier::Minimal);
        assert_eq!(manifestation_tier(f64::NAN), Tier::Minimal);
    }

    #[test]
    fn test_same_percent_can_band_differently_per_kind() {
        // 50% is a strong disease association but only a moderate prevalence.
        assert_eq!(disease_color(50.0).tier, Tier::Strong);
        assert_eq!(manifestation_color(50.0).tier, Tier::Moderate);
    }
}
