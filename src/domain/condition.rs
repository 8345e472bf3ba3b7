//! Composite 2..=10 score from the categorical technical attributes.
//!
//! Every table is bounded to [2, 10], so the mean is too. There is no clamp.

use super::entities::{
    EnergyRating, FinishCondition, Glazing, HeatingSystem, RoofCondition, TechnicalState,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConditionScores {
    pub roof: f64,
    pub heating: f64,
    pub kitchen: f64,
    pub bathroom: f64,
    pub glazing: f64,
    pub energy: f64,
}

impl ConditionScores {
    pub fn index(&self) -> f64 {
        (self.roof + self.heating + self.kitchen + self.bathroom + self.glazing + self.energy) / 6.0
    }
}

pub fn condition_scores(technical: &TechnicalState, energy: EnergyRating) -> ConditionScores {
    ConditionScores {
        roof: roof_score(technical.roof),
        heating: heating_score(technical.heating),
        kitchen: finish_score(technical.kitchen),
        bathroom: finish_score(technical.bathroom),
        glazing: glazing_score(technical.glazing),
        energy: energy_score(energy),
    }
}

pub fn condition_index(technical: &TechnicalState, energy: EnergyRating) -> f64 {
    condition_scores(technical, energy).index()
}

fn roof_score(roof: RoofCondition) -> f64 {
    match roof {
        RoofCondition::Perfect => 10.0,
        RoofCondition::Average => 6.0,
        RoofCondition::Bad => 2.0,
        RoofCondition::Unknown => 5.0,
    }
}

fn heating_score(heating: HeatingSystem) -> f64 {
    match heating {
        HeatingSystem::HeatPump => 10.0,
        HeatingSystem::GasCondensing => 9.0,
        HeatingSystem::Gas => 7.0,
        HeatingSystem::Wood => 6.0,
        HeatingSystem::Oil => 5.0,
        HeatingSystem::Electric => 4.0,
        HeatingSystem::Absent => 2.0,
        HeatingSystem::Unknown => 5.0,
    }
}

fn finish_score(finish: FinishCondition) -> f64 {
    match finish {
        FinishCondition::New => 10.0,
        FinishCondition::Good => 8.0,
        FinishCondition::Dated => 5.0,
        FinishCondition::ToRenovate => 2.0,
        FinishCondition::Unknown => 6.0,
    }
}

fn glazing_score(glazing: Glazing) -> f64 {
    match glazing {
        Glazing::Triple => 10.0,
        Glazing::Double => 8.0,
        Glazing::DoubleOld => 6.0,
        Glazing::Single => 2.0,
        Glazing::Unknown => 5.0,
    }
}

fn energy_score(energy: EnergyRating) -> f64 {
    match energy {
        EnergyRating::A => 10.0,
        EnergyRating::B => 9.0,
        EnergyRating::C => 8.0,
        EnergyRating::D => 6.0,
        EnergyRating::E => 5.0,
        EnergyRating::F => 3.0,
        EnergyRating::G => 2.0,
        EnergyRating::Unknown => 5.0,
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn roof() -> impl Strategy<Value = RoofCondition> {
        prop_oneof![
            Just(RoofCondition::Perfect),
            Just(RoofCondition::Average),
            Just(RoofCondition::Bad),
            Just(RoofCondition::Unknown),
        ]
    }

    fn heating() -> impl Strategy<Value = HeatingSystem> {
        prop_oneof![
            Just(HeatingSystem::HeatPump),
            Just(HeatingSystem::GasCondensing),
            Just(HeatingSystem::Gas),
            Just(HeatingSystem::Oil),
            Just(HeatingSystem::Electric),
            Just(HeatingSystem::Wood),
            Just(HeatingSystem::Absent),
            Just(HeatingSystem::Unknown),
        ]
    }

    fn finish() -> impl Strategy<Value = FinishCondition> {
        prop_oneof![
            Just(FinishCondition::New),
            Just(FinishCondition::Good),
            Just(FinishCondition::Dated),
            Just(FinishCondition::ToRenovate),
            Just(FinishCondition::Unknown),
        ]
    }

    fn glazing() -> impl Strategy<Value = Glazing> {
        prop_oneof![
            Just(Glazing::Triple),
            Just(Glazing::Double),
            Just(Glazing::DoubleOld),
            Just(Glazing::Single),
            Just(Glazing::Unknown),
        ]
    }

    fn energy() -> impl Strategy<Value = EnergyRating> {
        (0usize..8).prop_map(|i| {
            EnergyRating::LETTERS
                .get(i)
                .copied()
                .unwrap_or(EnergyRating::Unknown)
        })
    }

    proptest! {
        #[test]
        fn index_stays_within_two_and_ten(
            roof in roof(),
            heating in heating(),
            kitchen in finish(),
            bathroom in finish(),
            glazing in glazing(),
            energy in energy(),
        ) {
            let technical = TechnicalState { roof, heating, kitchen, bathroom, glazing };
            let index = condition_index(&technical, energy);
            prop_assert!((2.0..=10.0).contains(&index), "index {} out of bounds", index);
        }
    }
}
