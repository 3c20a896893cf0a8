use hearth_types::{PricingInfo, RuralityTier, Territory};

/// Projected annual job output per resident.
const JOBS_PER_RESIDENT: u64 = 500;

/// Classifies a population count into a rurality tier.
///
/// Boundaries are inclusive on the lower tier: exactly 50,000 is `Small`,
/// not `Rural`.
pub fn rurality_tier(population: u64) -> RuralityTier {
    match population {
        0..=49_999 => RuralityTier::Rural,
        50_000..=149_999 => RuralityTier::Small,
        150_000..=499_999 => RuralityTier::Medium,
        _ => RuralityTier::Metro,
    }
}

/// One-time and monthly claim fees in whole dollars for a tier.
pub fn tier_fees(tier: RuralityTier) -> (u64, u64) {
    match tier {
        RuralityTier::Rural => (2_500, 99),
        RuralityTier::Small => (5_000, 199),
        RuralityTier::Medium => (10_000, 399),
        RuralityTier::Metro => (25_000, 799),
    }
}

/// Produces the fee quote for a territory.
///
/// A `rurality_classification` already set on the territory is honored
/// as-is, even when it disagrees with what the population would yield —
/// territories may be manually reclassified upstream. A free claim zeroes
/// every fee regardless of tier.
pub fn calculate_territory_pricing(territory: &Territory, is_first_300_free: bool) -> PricingInfo {
    let tier = territory
        .rurality_classification
        .unwrap_or_else(|| rurality_tier(territory.population));

    let (one_time_fee, monthly_fee) = if is_first_300_free {
        (0, 0)
    } else {
        tier_fees(tier)
    };

    let total_first_year = if is_first_300_free {
        0
    } else {
        one_time_fee + monthly_fee * 12
    };

    let projected_job_output = territory
        .projected_job_output
        .unwrap_or_else(|| territory.population.saturating_mul(JOBS_PER_RESIDENT));

    PricingInfo {
        rurality_tier: tier,
        one_time_fee,
        monthly_fee,
        total_first_year,
        projected_job_output,
        is_free: is_first_300_free,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_boundaries_are_inclusive_on_the_lower_tier() {
        assert_eq!(rurality_tier(0), RuralityTier::Rural);
        assert_eq!(rurality_tier(49_999), RuralityTier::Rural);
        assert_eq!(rurality_tier(50_000), RuralityTier::Small);
        assert_eq!(rurality_tier(149_999), RuralityTier::Small);
        assert_eq!(rurality_tier(150_000), RuralityTier::Medium);
        assert_eq!(rurality_tier(499_999), RuralityTier::Medium);
        assert_eq!(rurality_tier(500_000), RuralityTier::Metro);
    }

    #[test]
    fn rural_fee_example() {
        let territory = Territory::new(1, "Pine Flats", 40_000);
        let pricing = calculate_territory_pricing(&territory, false);

        assert_eq!(pricing.rurality_tier, RuralityTier::Rural);
        assert_eq!(pricing.one_time_fee, 2_500);
        assert_eq!(pricing.monthly_fee, 99);
        assert_eq!(pricing.total_first_year, 3_688);
        assert!(!pricing.is_free);
    }

    #[test]
    fn free_claim_zeroes_fees_regardless_of_tier() {
        let territory = Territory::new(2, "Lakeside Metro", 600_000);
        let pricing = calculate_territory_pricing(&territory, true);

        assert_eq!(pricing.rurality_tier, RuralityTier::Metro);
        assert_eq!(pricing.one_time_fee, 0);
        assert_eq!(pricing.monthly_fee, 0);
        assert_eq!(pricing.total_first_year, 0);
        assert!(pricing.is_free);
    }

    #[test]
    fn preset_classification_is_never_overridden() {
        let mut territory = Territory::new(3, "Edge Case County", 600_000);
        territory.rurality_classification = Some(RuralityTier::Rural);

        let pricing = calculate_territory_pricing(&territory, false);

        // Population says metro; the manual override wins.
        assert_eq!(pricing.rurality_tier, RuralityTier::Rural);
        assert_eq!(pricing.one_time_fee, 2_500);
    }

    #[test]
    fn projected_job_output_prefers_preset_value() {
        let mut territory = Territory::new(4, "Harborview", 100_000);
        territory.projected_job_output = Some(123);
        assert_eq!(
            calculate_territory_pricing(&territory, false).projected_job_output,
            123
        );

        territory.projected_job_output = None;
        assert_eq!(
            calculate_territory_pricing(&territory, false).projected_job_output,
            100_000 * 500
        );
    }

    #[test]
    fn fee_schedule_per_tier() {
        assert_eq!(tier_fees(RuralityTier::Rural), (2_500, 99));
        assert_eq!(tier_fees(RuralityTier::Small), (5_000, 199));
        assert_eq!(tier_fees(RuralityTier::Medium), (10_000, 399));
        assert_eq!(tier_fees(RuralityTier::Metro), (25_000, 799));
    }
}
