use tracing::debug;

use crate::entities::prediction::RiskTier;

/// Lower bound of the moderate tier
pub const MODERATE_THRESHOLD: f64 = 0.3;

/// Lower bound of the high tier
pub const HIGH_THRESHOLD: f64 = 0.6;

/// Map a probability to its risk tier
///
/// `p < 0.3` is Low, `0.3 <= p < 0.6` is Moderate, `p >= 0.6` is High.
/// Values outside [0, 1] fall into the nearest tier.
pub fn classify(probability: f64) -> RiskTier {
    if probability >= HIGH_THRESHOLD {
        RiskTier::High
    } else if probability >= MODERATE_THRESHOLD {
        RiskTier::Moderate
    } else {
        RiskTier::Low
    }
}

/// Map the scoring service's own label onto a tier
///
/// The service says `Medium` where the form says `Moderate`.
pub fn interpret_server_label(label: &str) -> Option<RiskTier> {
    match label.trim().to_ascii_lowercase().as_str() {
        "low" => Some(RiskTier::Low),
        "medium" | "moderate" => Some(RiskTier::Moderate),
        "high" => Some(RiskTier::High),
        _ => None,
    }
}

/// Note a server label that disagrees with the recomputed tier
pub(crate) fn log_label_disagreement(label: &str, tier: RiskTier) {
    match interpret_server_label(label) {
        Some(server_tier) if server_tier != tier => {
            debug!("Server labelled the result {} but the probability maps to {}", label, tier.label());
        }
        None => debug!("Unrecognised server risk label '{}'", label),
        _ => {}
    }
}
