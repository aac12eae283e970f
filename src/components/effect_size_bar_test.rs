use super::*;

#[test]
fn thresholds_per_statistic() {
    assert_eq!(
        effect_thresholds(EffectSizeKind::CohensD),
        EffectThresholds { small: 0.2, medium: 0.5, large: 0.8, max: 1.5 }
    );
    assert_eq!(
        effect_thresholds(EffectSizeKind::RSquared),
        EffectThresholds { small: 0.01, medium: 0.06, large: 0.14, max: 0.5 }
    );
    assert_eq!(
        effect_thresholds(EffectSizeKind::EtaSquared),
        effect_thresholds(EffectSizeKind::RSquared)
    );
    assert_eq!(
        effect_thresholds(EffectSizeKind::CramersV),
        EffectThresholds { small: 0.1, medium: 0.3, large: 0.5, max: 1.0 }
    );
}

#[test]
fn percentage_scales_against_max() {
    assert!((effect_percentage(EffectSizeKind::CohensD, 0.75) - 50.0).abs() < 1e-9);
    assert!((effect_percentage(EffectSizeKind::CramersV, 0.5) - 50.0).abs() < 1e-9);
}

#[test]
fn percentage_uses_magnitude_and_clamps() {
    // Sign is irrelevant; only magnitude is shown.
    assert!((effect_percentage(EffectSizeKind::CohensD, -0.75) - 50.0).abs() < 1e-9);
    // Values past the display scale pin at 100%.
    assert!((effect_percentage(EffectSizeKind::CohensD, 3.0) - 100.0).abs() < 1e-9);
}

#[test]
fn level_colors_match_band() {
    assert_eq!(effect_level_color(EffectLevel::Small), "#80cbc4");
    assert_eq!(effect_level_color(EffectLevel::Medium), "#ffab00");
    assert_eq!(effect_level_color(EffectLevel::Large), "#00e676");
}

#[test]
fn kind_names_read_as_spaced_uppercase() {
    assert_eq!(effect_kind_name(EffectSizeKind::CohensD), "COHENS D");
    assert_eq!(effect_kind_name(EffectSizeKind::CramersV), "CRAMERS V");
}
