use super::*;

#[test]
fn catalog_covers_all_industries() {
    for industry in ALL_INDUSTRIES {
        let (label, icon, description) = industry_option(industry);
        assert!(!label.is_empty());
        assert!(!icon.is_empty());
        assert!(!description.is_empty());
    }
}

#[test]
fn labels_match_expected_values() {
    assert_eq!(industry_label(Industry::Manufacturing), "制造业");
    assert_eq!(industry_label(Industry::Other), "其他");
    assert_eq!(industry_icon(Industry::Ecommerce), "🛒");
}

#[test]
fn wire_values_round_trip() {
    for industry in ALL_INDUSTRIES {
        assert_eq!(industry_from_value(industry_value(industry)), Some(industry));
    }
}

#[test]
fn wire_values_match_serde_strings() {
    for industry in ALL_INDUSTRIES {
        let serialized = serde_json::to_string(&industry).unwrap();
        assert_eq!(serialized, format!("\"{}\"", industry_value(industry)));
    }
}

#[test]
fn unknown_wire_value_is_rejected() {
    assert_eq!(industry_from_value("agriculture"), None);
}
