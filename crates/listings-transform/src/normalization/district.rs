//! Neighbourhood → district normalization.
//!
//! The raw export spells neighbourhoods in several ways (article case,
//! abbreviations, combined barris). Each value is resolved to one of the ten
//! district labels, falling back to keyword and substring heuristics before
//! giving up and passing the raw text through.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::LazyLock;

use listings_common::column_string_values;
use listings_model::District;
use polars::prelude::{Column, DataFrame};

use crate::error::{Result, TransformError};

/// Label written for listings without a neighbourhood.
pub const UNKNOWN_DISTRICT: &str = "Unknown";

/// Known neighbourhood spellings, grouped by district.
///
/// Order matters: substring matching walks this table top to bottom and
/// takes the first hit.
pub static NEIGHBOURHOOD_DISTRICTS: &[(&str, District)] = &[
    // 1. Ciutat Vella
    ("Ciutat Vella", District::CiutatVella),
    ("el Raval", District::CiutatVella),
    ("El Raval", District::CiutatVella),
    ("el Barri Gòtic", District::CiutatVella),
    ("El Gòtic", District::CiutatVella),
    ("el Gòtic", District::CiutatVella),
    ("la Barceloneta", District::CiutatVella),
    ("La Barceloneta", District::CiutatVella),
    ("Sant Pere, Santa Caterina i la Ribera", District::CiutatVella),
    ("Sant Pere/Santa Caterina", District::CiutatVella),
    ("El Born", District::CiutatVella),

    // 2. Eixample
    ("Eixample", District::Eixample),
    ("el Fort Pienc", District::Eixample),
    ("la Sagrada Família", District::Eixample),
    ("La Sagrada Família", District::Eixample),
    ("la Dreta de l'Eixample", District::Eixample),
    ("Dreta de l'Eixample", District::Eixample),
    ("l'Antiga Esquerra de l'Eixample", District::Eixample),
    ("L'Antiga Esquerra de l'Eixample", District::Eixample),
    ("la Nova Esquerra de l'Eixample", District::Eixample),
    ("La Nova Esquerra de l'Eixample", District::Eixample),
    ("Sant Antoni", District::Eixample),

    // 3. Sants-Montjuïc
    ("Sants-Montjuïc", District::SantsMontjuic),
    ("el Poble-Sec", District::SantsMontjuic),
    ("El Poble-sec", District::SantsMontjuic),
    ("el Poble Sec", District::SantsMontjuic),
    ("la Marina del Prat Vermell", District::SantsMontjuic),
    ("la Marina de Port", District::SantsMontjuic),
    ("la Font de la Guatlla", District::SantsMontjuic),
    ("Hostafrancs", District::SantsMontjuic),
    ("la Bordeta", District::SantsMontjuic),
    ("Sants - Badal", District::SantsMontjuic),
    ("Sants", District::SantsMontjuic),

    // 4. Les Corts
    ("Les Corts", District::LesCorts),
    ("les Corts", District::LesCorts),
    ("la Maternitat i Sant Ramon", District::LesCorts),
    ("La Maternitat i Sant Ramon", District::LesCorts),
    ("Pedralbes", District::LesCorts),

    // 5. Sarrià-Sant Gervasi
    ("Sarrià-Sant Gervasi", District::SarriaSantGervasi),
    ("Sarrià", District::SarriaSantGervasi),
    ("Vallvidrera, el Tibidabo i les Planes", District::SarriaSantGervasi),
    ("les Tres Torres", District::SarriaSantGervasi),
    ("Les Tres Torres", District::SarriaSantGervasi),
    ("Sant Gervasi - la Bonanova", District::SarriaSantGervasi),
    ("Sant Gervasi - Galvany", District::SarriaSantGervasi),
    ("el Putxet i el Farró", District::SarriaSantGervasi),
    ("El Putget i Farró", District::SarriaSantGervasi),

    // 6. Gràcia
    ("Gràcia", District::Gracia),
    ("Vallcarca i els Penitents", District::Gracia),
    ("el Coll", District::Gracia),
    ("El Coll", District::Gracia),
    ("la Salut", District::Gracia),
    ("La Salut", District::Gracia),
    ("la Vila de Gràcia", District::Gracia),
    ("Vila de Gràcia", District::Gracia),
    ("el Camp d'en Grassot i Gràcia Nova", District::Gracia),
    ("Camp d'en Grassot i Gràcia Nova", District::Gracia),

    // 7. Horta-Guinardó
    ("Horta-Guinardó", District::HortaGuinardo),
    ("el Baix Guinardó", District::HortaGuinardo),
    ("El Baix Guinardó", District::HortaGuinardo),
    ("Can Baró", District::HortaGuinardo),
    ("el Guinardó", District::HortaGuinardo),
    ("El Guinardó", District::HortaGuinardo),
    ("Guinardó", District::HortaGuinardo),
    ("la Font d'en Fargues", District::HortaGuinardo),
    ("La Font d'en Fargues", District::HortaGuinardo),
    ("Font den Fargues", District::HortaGuinardo),
    ("el Carmel", District::HortaGuinardo),
    ("El Carmel", District::HortaGuinardo),
    ("Carmel", District::HortaGuinardo),
    ("la Teixonera", District::HortaGuinardo),
    ("La Teixonera", District::HortaGuinardo),
    ("Sant Genís dels Agudells", District::HortaGuinardo),
    ("Montbau", District::HortaGuinardo),
    ("la Vall d'Hebron", District::HortaGuinardo),
    ("La Vall d'Hebron", District::HortaGuinardo),
    ("la Clota", District::HortaGuinardo),
    ("Horta", District::HortaGuinardo),

    // 8. Nou Barris
    ("Nou Barris", District::NouBarris),
    ("Vilapicina i la Torre Llobeta", District::NouBarris),
    ("Porta", District::NouBarris),
    ("el Turó de la Peira", District::NouBarris),
    ("El Turó de la Peira", District::NouBarris),
    ("Turó de la Peira - Can Peguera", District::NouBarris),
    ("Can Peguera", District::NouBarris),
    ("la Guineueta", District::NouBarris),
    ("La Guineueta", District::NouBarris),
    ("Canyelles", District::NouBarris),
    ("les Roquetes", District::NouBarris),
    ("Les Roquetes", District::NouBarris),
    ("Verdum", District::NouBarris),
    ("Verdum - Los Roquetes", District::NouBarris),
    ("la Prosperitat", District::NouBarris),
    ("La Prosperitat", District::NouBarris),
    ("la Trinitat Nova", District::NouBarris),
    ("La Trinitat Nova", District::NouBarris),
    ("Trinitat Nova", District::NouBarris),
    ("Torre Baró", District::NouBarris),
    ("Ciutat Meridiana", District::NouBarris),
    ("Vallbona", District::NouBarris),

    // 9. Sant Andreu
    ("Sant Andreu", District::SantAndreu),
    ("Sant Andreu de Palomar", District::SantAndreu),
    ("la Trinitat Vella", District::SantAndreu),
    ("La Trinitat Vella", District::SantAndreu),
    ("Baró de Viver", District::SantAndreu),
    ("el Bon Pastor", District::SantAndreu),
    ("El Bon Pastor", District::SantAndreu),
    ("la Sagrera", District::SantAndreu),
    ("La Sagrera", District::SantAndreu),
    ("el Congrés i els Indians", District::SantAndreu),
    ("El Congrés i els Indians", District::SantAndreu),
    ("Navas", District::SantAndreu),

    // 10. Sant Martí
    ("Sant Martí", District::SantMarti),
    ("el Camp de l'Arpa del Clot", District::SantMarti),
    ("El Camp de l'Arpa del Clot", District::SantMarti),
    ("el Clot", District::SantMarti),
    ("El Clot", District::SantMarti),
    ("el Parc i la Llacuna del Poblenou", District::SantMarti),
    ("El Parc i la Llacuna del Poblenou", District::SantMarti),
    ("Glòries - El Parc", District::SantMarti),
    ("la Vila Olímpica del Poblenou", District::SantMarti),
    ("La Vila Olímpica del Poblenou", District::SantMarti),
    ("La Vila Olímpica", District::SantMarti),
    ("el Poblenou", District::SantMarti),
    ("El Poblenou", District::SantMarti),
    ("Diagonal Mar i el Front Marítim del Poblenou", District::SantMarti),
    ("Diagonal Mar - La Mar Bella", District::SantMarti),
    ("el Besòs i el Maresme", District::SantMarti),
    ("El Besòs i el Maresme", District::SantMarti),
    ("Provençals del Poblenou", District::SantMarti),
    ("Sant Martí de Provençals", District::SantMarti),
    ("la Verneda i la Pau", District::SantMarti),
    ("La Verneda i La Pau", District::SantMarti),
];

static EXACT: LazyLock<HashMap<&'static str, District>> =
    LazyLock::new(|| NEIGHBOURHOOD_DISTRICTS.iter().copied().collect());

static LOWERED: LazyLock<Vec<(&'static str, String, District)>> = LazyLock::new(|| {
    NEIGHBOURHOOD_DISTRICTS
        .iter()
        .map(|(name, district)| (*name, name.to_lowercase(), *district))
        .collect()
});

/// Spellings that defeat substring matching, checked on lowercased text.
const KEYWORDS: &[(&str, District)] = &[
    ("font d'en fargues", District::HortaGuinardo),
    ("font den fargues", District::HortaGuinardo),
    ("can baró", District::HortaGuinardo),
    ("can baro", District::HortaGuinardo),
];

/// How a raw neighbourhood was resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DistrictMatch {
    /// The trimmed value is a known spelling.
    Exact(District),
    /// A keyword heuristic fired.
    Keyword(District),
    /// The value and a known spelling contain one another.
    Partial {
        district: District,
        matched: &'static str,
    },
    /// Nothing matched; the trimmed value is kept.
    Unrecognized(String),
    /// Null or blank.
    Missing,
}

impl DistrictMatch {
    pub fn district(&self) -> Option<District> {
        match self {
            DistrictMatch::Exact(district)
            | DistrictMatch::Keyword(district)
            | DistrictMatch::Partial { district, .. } => Some(*district),
            DistrictMatch::Unrecognized(_) | DistrictMatch::Missing => None,
        }
    }

    /// The value written back to the neighbourhood column.
    pub fn label(&self) -> &str {
        match self {
            DistrictMatch::Unrecognized(raw) => raw,
            DistrictMatch::Missing => UNKNOWN_DISTRICT,
            resolved => resolved.district().map_or(UNKNOWN_DISTRICT, |d| d.as_str()),
        }
    }
}

/// Resolves one raw neighbourhood value.
pub fn resolve_district(raw: Option<&str>) -> DistrictMatch {
    // Blank text is missing, not a partial match: the empty string is a
    // substring of every table entry and would otherwise land on the first one.
    let Some(trimmed) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return DistrictMatch::Missing;
    };

    if let Some(district) = EXACT.get(trimmed) {
        return DistrictMatch::Exact(*district);
    }

    let lowered = trimmed.to_lowercase();
    if let Some((_, district)) = KEYWORDS
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
    {
        return DistrictMatch::Keyword(*district);
    }

    if let Some((name, _, district)) = LOWERED
        .iter()
        .find(|(_, known, _)| known.contains(lowered.as_str()) || lowered.contains(known.as_str()))
    {
        return DistrictMatch::Partial {
            district: *district,
            matched: name,
        };
    }

    DistrictMatch::Unrecognized(trimmed.to_string())
}

/// Outcome of normalizing a neighbourhood column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DistrictNormalization {
    pub exact: usize,
    pub keyword: usize,
    pub partial: usize,
    pub missing: usize,
    /// Rows per written label, including `Unknown` and passthrough values.
    pub counts: BTreeMap<String, usize>,
    /// Distinct raw values that matched nothing.
    pub unrecognized: BTreeSet<String>,
}

impl DistrictNormalization {
    /// Rows whose value passed through unchanged.
    pub fn unrecognized_rows(&self) -> usize {
        self.counts
            .iter()
            .filter(|(label, _)| self.unrecognized.contains(*label))
            .map(|(_, count)| count)
            .sum()
    }
}

/// Rewrites `column` in place with district labels.
pub fn normalize_district_column(
    df: &mut DataFrame,
    column: &str,
) -> Result<DistrictNormalization> {
    let raw = column_string_values(df, column).map_err(|_| TransformError::ColumnNotFound {
        column: column.to_string(),
    })?;

    let mut report = DistrictNormalization::default();
    let mut labels = Vec::with_capacity(raw.len());
    for value in &raw {
        let resolved = resolve_district(value.as_deref());
        match &resolved {
            DistrictMatch::Exact(_) => report.exact += 1,
            DistrictMatch::Keyword(_) => report.keyword += 1,
            DistrictMatch::Partial { .. } => report.partial += 1,
            DistrictMatch::Missing => report.missing += 1,
            DistrictMatch::Unrecognized(name) => {
                report.unrecognized.insert(name.clone());
            }
        }
        let label = resolved.label().to_string();
        *report.counts.entry(label.clone()).or_default() += 1;
        labels.push(label);
    }

    df.with_column(Column::new(column.into(), labels))?;

    if !report.unrecognized.is_empty() {
        tracing::warn!(
            distinct = report.unrecognized.len(),
            rows = report.unrecognized_rows(),
            "neighbourhoods without a district passed through unchanged"
        );
    }
    tracing::debug!(
        exact = report.exact,
        keyword = report.keyword,
        partial = report.partial,
        missing = report.missing,
        "normalized neighbourhoods"
    );

    Ok(report)
}
