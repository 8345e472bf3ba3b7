use immo_estimator::app::{run, EstimationRequest, Method};
use immo_estimator::domain::{
    condition_index, estimate_from_comparables, estimate_residential, estimate_technical,
    price_range, Attic, ComparableSale, ConditionCategory, DetailValue, EnergyRating,
    ExpertCoefficient, FinishCondition, Glazing, HeatingSystem, HistoryError, Parameters,
    Property, PropertyType, RangeMode, ReferenceGridRow, RoofCondition, Session, TechnicalState,
    ValuationError,
};
use pretty_assertions::assert_eq;
use time::macros::date;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

fn plain_house(surface: f64, land_area: f64) -> Property {
    Property {
        property_type: PropertyType::House,
        commune: "Jambes".into(),
        surface,
        land_area,
        condition: ConditionCategory::Good,
        energy_rating: EnergyRating::C,
        ..Property::default()
    }
}

#[test]
fn reference_example_house_on_the_grid() {
    let row = ReferenceGridRow::new("Namur", PropertyType::House, 2000.0, 10.0, 0.0);
    let mut params = Parameters::default();
    params.condition.good = 0.0;

    let result = estimate_residential(&row, &plain_house(100.0, 200.0), &params);

    assert_eq!(result.detail.get("built_value"), Some(&DetailValue::Amount(200_000.0)));
    assert_eq!(result.detail.get("land_value"), Some(&DetailValue::Amount(2_000.0)));
    assert_eq!(result.detail.number("adjustment_pct"), Some(0.0));
    assert!(close(result.value, 202_000.0));
    assert!(close(result.low, 189_880.0));
    assert!(close(result.high, 214_120.0));
}

#[test]
fn bad_roof_reference_example() {
    let mut params = Parameters::default();
    params.technical.roof.flat_fee_without_attic = 18_000.0;
    params.technical.roof.impact_factor = 0.70;

    let mut property = plain_house(100.0, 0.0);
    property.technical.roof = RoofCondition::Bad;
    property.attic = None;

    let row = ReferenceGridRow::new("Namur", PropertyType::House, 2000.0, 0.0, 0.0);
    let estimate = estimate_technical(&row, &property, &params, &ExpertCoefficient::default());
    assert!(close(estimate.impacts.roof, -12_600.0));
    assert!(close(estimate.result.detail.number("impact_roof").unwrap(), -12_600.0));
}

#[test]
fn degressivity_starts_just_above_the_threshold() {
    let row = ReferenceGridRow::new("Namur", PropertyType::House, 2000.0, 0.0, 0.0);
    let params = Parameters::default();
    let threshold = params.degressivity.threshold_area;

    let at = estimate_technical(
        &row,
        &plain_house(threshold, 0.0),
        &params,
        &ExpertCoefficient::default(),
    );
    assert_eq!(at.market.rate, 2000.0);

    let above = estimate_technical(
        &row,
        &plain_house(threshold + 0.01, 0.0),
        &params,
        &ExpertCoefficient::default(),
    );
    assert!(close(above.market.rate, 2000.0 * (1.0 - params.degressivity.rate)));
}

#[test]
fn insufficient_comparables_regardless_of_inputs() {
    let sale = ComparableSale {
        price: 250_000.0,
        surface_area: 110.0,
        sale_date: date!(2025 - 01 - 15),
        distance_km: 0.5,
        condition: ConditionCategory::Renovated,
        energy_rating: EnergyRating::B,
        note: "rue voisine".into(),
    };
    let result = estimate_from_comparables(
        &plain_house(110.0, 500.0),
        &[sale.clone(), sale],
        &Parameters::default(),
        date!(2025 - 06 - 01),
    );
    assert_eq!(
        result,
        Err(ValuationError::InsufficientComparables {
            found: 2,
            required: 3
        })
    );
}

#[test]
fn condition_index_maximum_and_modulated_range() {
    let best = TechnicalState {
        roof: RoofCondition::Perfect,
        heating: HeatingSystem::HeatPump,
        kitchen: FinishCondition::New,
        bathroom: FinishCondition::New,
        glazing: Glazing::Triple,
    };
    assert_eq!(condition_index(&best, EnergyRating::A), 10.0);

    let range = price_range(
        100_000.0,
        RangeMode::IndexModulated {
            index: 9.0,
            neutral_pct: 0.06,
        },
    );
    assert_eq!((range.low_pct, range.high_pct), (0.05, 0.08));
}

#[test]
fn technical_estimate_with_many_features() {
    let row = ReferenceGridRow::new("Namur", PropertyType::Apartment, 2350.0, 0.0, 0.0);
    let mut property = Property {
        property_type: PropertyType::Apartment,
        surface: 85.0,
        bedrooms: 2,
        bathrooms: 1,
        energy_rating: EnergyRating::D,
        floor: Some(immo_estimator::domain::FloorInfo {
            level: 2,
            elevator: false,
        }),
        technical: TechnicalState {
            roof: RoofCondition::Perfect,
            heating: HeatingSystem::GasCondensing,
            kitchen: FinishCondition::Dated,
            bathroom: FinishCondition::Good,
            glazing: Glazing::Double,
        },
        ..Property::default()
    };
    property.amenities.balcony = true;
    property.attic = Some(Attic {
        area: 0.0,
        finishable: false,
    });

    let params = Parameters::default();
    let estimate = estimate_technical(&row, &property, &params, &ExpertCoefficient::new(-5.0, ""));

    let expected_impacts = 6_000.0 - 6_000.0 - 6_000.0 - 5_000.0 + 3_000.0;
    assert!(close(estimate.impacts.total(), expected_impacts));
    assert!(close(estimate.technical_value, 85.0 * 2350.0 + expected_impacts));
    assert!(close(estimate.result.value, estimate.technical_value * 0.95));
    assert!(estimate.result.low <= estimate.result.value);
    assert!(estimate.result.value <= estimate.result.high);
}

#[test]
fn session_flow_records_and_updates_history() {
    let mut session = Session::default();
    let request = EstimationRequest {
        method: Method::Technical,
        zone: "Charleroi".into(),
        property: plain_house(130.0, 400.0),
        comparables: Vec::new(),
        expert: ExpertCoefficient::new(0.0, ""),
        as_of: None,
    };

    for _ in 0..3 {
        run(&mut session, &request, date!(2025 - 06 - 01)).unwrap();
    }
    assert_eq!(session.history.len(), 3);

    let untouched: Vec<_> = [0, 2]
        .iter()
        .map(|index| session.history.get(*index).cloned())
        .collect();

    session
        .history
        .update_sale(1, 195_000.0, "12/07/2025")
        .unwrap();
    assert_eq!(
        session.history.update_sale(1, 1.0, "July 12th"),
        Err(HistoryError::InvalidDateFormat("July 12th".into()))
    );

    assert_eq!(session.history.get(0).cloned(), untouched[0]);
    assert_eq!(session.history.get(2).cloned(), untouched[1]);
    let updated = session.history.get(1).unwrap();
    assert_eq!(updated.sold_price, Some(195_000.0));
    assert_eq!(updated.sold_date, Some(date!(2025 - 07 - 12)));
}

#[test]
fn missing_grid_row_stops_the_run() {
    let mut session = Session::default();
    let request = EstimationRequest {
        method: Method::Grid,
        zone: "Charleroi".into(),
        property: Property {
            property_type: PropertyType::Commerce,
            ..Property::default()
        },
        comparables: Vec::new(),
        expert: ExpertCoefficient::default(),
        as_of: None,
    };
    let error = run(&mut session, &request, date!(2025 - 06 - 01)).unwrap_err();
    assert_eq!(
        error.to_string(),
        "no reference grid row for zone 'Charleroi' and type Commerce"
    );
}

#[test]
fn demo_requests_parse_and_run() {
    let mut session = Session::default();
    for (name, source) in [
        ("grid", include_str!("../demos/grid_request.json")),
        ("comparables", include_str!("../demos/comparables_request.json")),
        ("technical", include_str!("../demos/technical_request.json")),
    ] {
        let request: EstimationRequest = serde_json::from_str(source)
            .unwrap_or_else(|err| panic!("{name} demo does not parse: {err}"));
        let outcome = run(&mut session, &request, date!(2025 - 06 - 01))
            .unwrap_or_else(|err| panic!("{name} demo fails: {err}"));
        assert!(outcome.result.value > 0.0, "{name} demo value");
    }
}
