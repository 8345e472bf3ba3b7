//! Three-page seller report rendered as plain text.
//!
//! Page 1 is the synthesis, page 2 lists every detail entry of the estimation,
//! page 3 shows the grid row and the parameters used.

use std::fmt;

use time::Date;

use crate::domain::{
    ComparableSale, DetailValue, EnergyRating, EstimationResult, ExpertCoefficient, Parameters,
    Property, PropertyType, ReferenceGridRow,
};
use crate::util::format::{date, euro, euro_per_area, pct, signed_pct};
use crate::util::version::{version_label, AGENCY, AGENCY_EMAIL, APP_NAME};

/// Which model produced the result, with the extra inputs the report shows.
#[derive(Clone, Copy, Debug)]
pub enum ReportModel<'a> {
    Grid,
    Comparables {
        sales: &'a [ComparableSale],
    },
    Technical {
        condition_index: f64,
        expert: &'a ExpertCoefficient,
    },
}

#[derive(Clone, Copy, Debug)]
pub struct ReportInput<'a> {
    pub property: &'a Property,
    /// Absent for the comparables model, which does not use the grid.
    pub row: Option<&'a ReferenceGridRow>,
    pub result: &'a EstimationResult,
    pub params: &'a Parameters,
    pub model: ReportModel<'a>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    pub heading: String,
    pub lines: Vec<String>,
}

impl Section {
    fn new(heading: &str) -> Self {
        Self {
            heading: heading.to_string(),
            lines: Vec::new(),
        }
    }

    fn line(&mut self, text: impl Into<String>) {
        self.lines.push(text.into());
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Page {
    pub title: String,
    pub subtitle: String,
    pub sections: Vec<Section>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    pub issued_on: Date,
    pub pages: Vec<Page>,
}

pub fn render(input: &ReportInput<'_>, issued_on: Date) -> Report {
    let pages = vec![
        Page {
            title: "Rapport d'estimation - Vente".to_string(),
            subtitle: "Synthese (page 1/3)".to_string(),
            sections: synthesis(input),
        },
        Page {
            title: "Detail des calculs".to_string(),
            subtitle: "Calculs (page 2/3)".to_string(),
            sections: vec![calculation(input.result)],
        },
        Page {
            title: "Referentiel utilise".to_string(),
            subtitle: "Grille & hypotheses (page 3/3)".to_string(),
            sections: methodology(input),
        },
    ];
    Report { issued_on, pages }
}

fn synthesis(input: &ReportInput<'_>) -> Vec<Section> {
    let property = input.property;
    let mut subject = Section::new("Bien");
    match input.row {
        Some(row) => subject.line(format!(
            "Zone referentiel: {}  |  Type: {}",
            row.zone, property.property_type
        )),
        None => subject.line(format!("Type: {}", property.property_type)),
    }
    if !property.commune.is_empty() {
        subject.line(format!("Adresse/Commune: {}", property.commune));
    }
    if !property.owner.is_empty() {
        subject.line(format!("Proprietaire: {}", property.owner));
    }
    subject.line(format!("Surface: {:.0} m2", property.surface));
    if property.property_type == PropertyType::House {
        subject.line(format!("Terrain: {:.0} m2", property.land_area));
    }
    if property.property_type.is_residential() {
        subject.line(format!(
            "Etat: {}  |  PEB: {}",
            property.condition.label(),
            property.energy_rating.label()
        ));
    } else {
        subject.line(format!("Methode commerce: {}", property.commerce.label()));
    }

    let result = input.result;
    let mut estimate = Section::new("Estimation");
    estimate.line(format!("Prix conseille: {}", euro(result.value)));
    estimate.line(format!(
        "Fourchette: {} -> {}",
        euro(result.low),
        euro(result.high)
    ));

    let conclusion_text = match input.model {
        ReportModel::Grid => {
            "Estimation basee sur referentiel interne + ajustements (mode expert)."
        }
        ReportModel::Comparables { .. } => {
            "Estimation basee sur ventes comparables ponderees (surface, distance, anciennete)."
        }
        ReportModel::Technical {
            condition_index,
            expert,
        } => {
            estimate.line(format!("Indice d'etat: {condition_index:.1}/10"));
            estimate.line(format!("Coefficient expert: {:+.1}%", expert.percent));
            if !expert.justification.is_empty() {
                estimate.line(format!("Justification: {}", expert.justification));
            }
            "Estimation basee sur referentiel interne + impacts techniques + avis d'expert."
        }
    };
    let mut conclusion = Section::new("Conclusion");
    conclusion.line(conclusion_text);

    vec![subject, estimate, conclusion]
}

fn calculation(result: &EstimationResult) -> Section {
    let mut section = Section::new("Base et ajustements");
    for entry in result.detail.iter() {
        section.line(format!(
            "{}: {}",
            detail_label(&entry.key),
            format_detail(&entry.value)
        ));
    }
    section.line(format!("Total: {}", euro(result.value)));
    section
}

fn methodology(input: &ReportInput<'_>) -> Vec<Section> {
    let params = input.params;
    let mut sections = Vec::new();

    if let Some(row) = input.row {
        let mut grid = Section::new("Ligne referentiel selectionnee");
        grid.line(format!("Zone: {}", row.zone));
        grid.line(format!("Type: {}", row.property_type));
        if row.property_type.is_residential() {
            grid.line(format!("Base: {}", euro_per_area(row.base_rate_per_area)));
        }
        if row.property_type == PropertyType::House {
            grid.line(format!("Terrain: {}", euro_per_area(row.land_rate_per_area)));
        }
        if row.property_type == PropertyType::Commerce {
            grid.line(format!(
                "Commerce (si methode €/m²): {}",
                euro_per_area(row.commerce_rate_per_area)
            ));
        }
        sections.push(grid);
    }

    let mut extracts = Section::new("Parametres (extraits)");
    let energy = EnergyRating::LETTERS
        .iter()
        .map(|rating| {
            format!(
                "{}:{}",
                rating.label(),
                signed_pct(params.energy.for_rating(*rating))
            )
        })
        .collect::<Vec<_>>()
        .join("  ");
    extracts.line(format!("PEB {energy}"));
    extracts.line(format!(
        "Etat Renove:{}  Bon:{}  A rafraichir:{}  A renover:{}",
        signed_pct(params.condition.renovated),
        signed_pct(params.condition.good),
        signed_pct(params.condition.to_refresh),
        signed_pct(params.condition.to_renovate)
    ));
    extracts.line(format!(
        "Degressivite: -{} au-dessus de {:.0} m2",
        pct(params.degressivity.rate),
        params.degressivity.threshold_area
    ));
    extracts.line(format!("Fourchette: +/- {}", pct(params.range.pct)));
    extracts.line(format!(
        "Annexes garage/parking/terrasse/jardin/cave: {} / {} / {} / {} / {}",
        euro(params.annexes.garage),
        euro(params.annexes.parking),
        euro(params.annexes.terrace),
        euro(params.annexes.garden),
        euro(params.annexes.basement)
    ));
    sections.push(extracts);

    match input.model {
        ReportModel::Grid => {}
        ReportModel::Comparables { sales } => {
            let mut list = Section::new("Ventes comparables");
            for (position, sale) in sales.iter().enumerate() {
                list.line(format!(
                    "#{} {} - {:.0} m2 - {} - {:.1} km{}",
                    position + 1,
                    euro(sale.price),
                    sale.surface_area,
                    date(sale.sale_date),
                    sale.distance_km,
                    if sale.note.is_empty() {
                        String::new()
                    } else {
                        format!(" ({})", sale.note)
                    }
                ));
            }
            sections.push(list);
        }
        ReportModel::Technical { .. } => {
            let technical = &params.technical;
            let mut list = Section::new("Hypotheses techniques");
            list.line(format!(
                "Toiture: forfait {} sans grenier, {} + {} avec grenier, coefficient moyen {:.2}, facteur {:.2}",
                euro(technical.roof.flat_fee_without_attic),
                euro(technical.roof.attic_base),
                euro_per_area(technical.roof.attic_rate_per_area),
                technical.roof.average_coefficient,
                technical.roof.impact_factor
            ));
            list.line(format!(
                "Chambres: reference {} (maison) / {} (appartement), {} par chambre",
                technical.rooms.bedroom_reference_house,
                technical.rooms.bedroom_reference_apartment,
                euro(technical.rooms.per_bedroom)
            ));
            list.line(format!(
                "Coefficient expert borne entre {:+.0}% et {:+.0}%",
                params.expert.min_pct, params.expert.max_pct
            ));
            sections.push(list);
        }
    }

    sections
}

fn format_detail(value: &DetailValue) -> String {
    match value {
        DetailValue::Amount(amount) => euro(*amount),
        DetailValue::RatePerArea(rate) => euro_per_area(*rate),
        DetailValue::Percent(fraction) => signed_pct(*fraction),
        DetailValue::Score(score) => format!("{score:.2}"),
        DetailValue::Text(text) => text.clone(),
    }
}

/// Human label for a detail key; unknown keys are shown as-is.
pub fn detail_label(key: &str) -> String {
    let label = match key {
        "grid_rate_per_area" => "Base zone/type (grille)",
        "base_rate_per_area" => "Base retenue (apres degressivite)",
        "adjustment_pct" => "Ajustement total (PEB + etat)",
        "built_value" => "Valeur batie",
        "land_value" => "Valeur terrain",
        "annexes" => "Annexes",
        "method" => "Methode",
        "commerce_rate_per_area" => "€/m² commercial (zone)",
        "annual_rent" => "Loyer annuel",
        "yield_rate" => "Taux rendement",
        "comparable_count" => "Nombre de comparables",
        "subject_adjustment_pct" => "Ajustement du bien (PEB + etat)",
        "weight_sum" => "Somme des poids",
        "weighted_rate_per_area" => "Prix/m² pondere",
        "amenity_bonus" => "Bonus garage/parking",
        "market_value" => "Valeur de marche",
        "impact_roof" => "Impact toiture",
        "impact_heating" => "Impact chauffage",
        "impact_kitchen" => "Impact cuisine",
        "impact_bathroom" => "Impact salle de bain",
        "impact_glazing" => "Impact vitrage",
        "impact_energy" => "Impact PEB",
        "impact_bedrooms" => "Impact chambres",
        "impact_bathrooms" => "Impact salles de bain (nombre)",
        "impact_floor" => "Impact etage/ascenseur",
        "impact_garage" => "Impact garage",
        "impact_parking" => "Impact parking",
        "impact_balcony" => "Impact balcon",
        "impact_terrace" => "Impact terrasse",
        "impact_garden" => "Impact jardin",
        "impact_basement" => "Impact cave",
        "impact_attic" => "Impact grenier amenageable",
        "impacts_total" => "Total impacts techniques",
        "technical_value" => "Valeur technique",
        "condition_index" => "Indice d'etat",
        "expert_coefficient_pct" => "Coefficient expert",
        "expert_justification" => "Justification expert",
        "final_value" => "Valeur finale",
        "range_low_pct" => "Fourchette basse",
        "range_high_pct" => "Fourchette haute",
        _ => return comparable_label(key).unwrap_or_else(|| key.to_string()),
    };
    label.to_string()
}

fn comparable_label(key: &str) -> Option<String> {
    let rest = key.strip_prefix("comparable_")?;
    let (number, field) = rest.split_once('_')?;
    let number: usize = number.parse().ok()?;
    match field {
        "adjusted_rate" => Some(format!("Comparable #{number} prix/m² ajuste")),
        "weight" => Some(format!("Comparable #{number} poids")),
        _ => None,
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, page) in self.pages.iter().enumerate() {
            if position > 0 {
                writeln!(f, "\x0c")?;
            }
            writeln!(f, "{}", page.title)?;
            writeln!(f, "{AGENCY}")?;
            writeln!(f, "Contact: {AGENCY_EMAIL}")?;
            writeln!(f, "Date: {}", date(self.issued_on))?;
            writeln!(f, "{}", page.subtitle)?;
            writeln!(f, "{}", "-".repeat(72))?;
            for section in &page.sections {
                writeln!(f)?;
                writeln!(f, "{}", section.heading)?;
                for line in &section.lines {
                    writeln!(f, "   {line}")?;
                }
            }
            writeln!(f)?;
            writeln!(f, "{APP_NAME} {}", version_label())?;
        }
        Ok(())
    }
}
