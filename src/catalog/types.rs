//! Exercise variant records and their categorical attributes.

use serde::{Deserialize, Deserializer, Serialize};

/// Two-level rating used for ROI and setup time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rating {
    Alto,
    #[default]
    Bajo,
}

impl Rating {
    /// Get display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Rating::Alto => "Alto",
            Rating::Bajo => "Bajo",
        }
    }

    /// Parse a rating, ignoring case.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "alto" => Some(Rating::Alto),
            "bajo" => Some(Rating::Bajo),
            _ => None,
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Saturation / loadability intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Intensity {
    #[default]
    Baja,
    Media,
    Alta,
}

/// Movement nature, from slow grinds to ballistic actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Naturaleza {
    #[default]
    Grind,
    #[serde(rename = "Semi-ballistic")]
    SemiBallistic,
    Ballistic,
}

impl Naturaleza {
    /// Get display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Naturaleza::Grind => "Grind",
            Naturaleza::SemiBallistic => "Semi-ballistic",
            Naturaleza::Ballistic => "Ballistic",
        }
    }

    /// Get all natures.
    pub fn all() -> [Naturaleza; 3] {
        [
            Naturaleza::Grind,
            Naturaleza::SemiBallistic,
            Naturaleza::Ballistic,
        ]
    }
}

impl std::fmt::Display for Naturaleza {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Intra-abdominal pressure (PIA) profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PiaType {
    Decompresivo,
    #[default]
    Manejable,
    Hiperpresivo,
}

/// Potential threat level of a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ThreatLevel {
    Bajo,
    #[default]
    Medio,
    Alto,
}

impl ThreatLevel {
    /// Get display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            ThreatLevel::Bajo => "Bajo",
            ThreatLevel::Medio => "Medio",
            ThreatLevel::Alto => "Alto",
        }
    }
}

impl std::fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Natera isometric classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NateraOption {
    #[serde(rename = "ISO-Push")]
    IsoPush,
    #[serde(rename = "ISO-Hold")]
    IsoHold,
    #[serde(rename = "ISO-Switch")]
    IsoSwitch,
    #[default]
    #[serde(rename = "No aplica")]
    NotApplicable,
}

/// Jordan eccentric classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JordanOption {
    #[serde(rename = "Slow Eccentric")]
    SlowEccentric,
    Braking,
    Overspeed,
    #[default]
    #[serde(rename = "No aplica")]
    NotApplicable,
}

/// One specific way of performing an exercise.
///
/// Every field falls back to a neutral default so that partial catalog
/// records still load: missing or null arrays are empty, missing or null
/// scales are zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExerciseVariant {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub nombre_tecnico: String,
    #[serde(deserialize_with = "null_as_default")]
    pub arquetipos: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub setup_time: Rating,
    #[serde(deserialize_with = "null_as_default")]
    pub roi: Rating,
    #[serde(deserialize_with = "null_as_default")]
    pub equipamiento: String,
    #[serde(deserialize_with = "null_as_default")]
    pub perfil_resistencia: String,
    /// External stability, 1 (unstable) to 5
    #[serde(deserialize_with = "null_as_default")]
    pub estabilidad_externa: u8,
    #[serde(deserialize_with = "null_as_default")]
    pub saturacion: Intensity,
    #[serde(deserialize_with = "null_as_default")]
    pub loadability: Intensity,
    /// Priority ordered, index 0 dominates
    #[serde(deserialize_with = "null_as_default")]
    pub limiting_factor: Vec<String>,
    /// Priority ordered, index 0 dominates
    #[serde(deserialize_with = "null_as_default")]
    pub target_primarios: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub target_secundarios: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub natera: NateraOption,
    #[serde(deserialize_with = "null_as_default")]
    pub jordan: JordanOption,
    #[serde(deserialize_with = "null_as_default")]
    pub naturaleza: Naturaleza,
    #[serde(deserialize_with = "null_as_default")]
    pub vbt_ready: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub dynamo_tests: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub camara_app: bool,
    /// Rehab phase, 1-4
    #[serde(deserialize_with = "null_as_default")]
    pub fase_rehab: u8,
    #[serde(deserialize_with = "null_as_default")]
    pub estadio_tendon: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub pia_ideal: PiaType,
    #[serde(deserialize_with = "null_as_default")]
    pub pia_conservador: PiaType,
    #[serde(deserialize_with = "null_as_default")]
    pub amenaza_potencial: ThreatLevel,
    /// Axial load, 0-3
    #[serde(deserialize_with = "null_as_default")]
    pub carga_axial: u8,
    /// Impact, 0-3
    #[serde(deserialize_with = "null_as_default")]
    pub impacto: u8,
    /// Technical demand, 1-5
    #[serde(deserialize_with = "null_as_default")]
    pub demanda_tecnica: u8,
    #[serde(deserialize_with = "null_as_default")]
    pub fatiga_local: u8,
    #[serde(deserialize_with = "null_as_default")]
    pub fatiga_sistemica: u8,
    #[serde(deserialize_with = "null_as_default")]
    pub valsalva_probable: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub kpi_primario: String,
    #[serde(deserialize_with = "null_as_default")]
    pub kpi_secundarios: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observaciones: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supuestos: Option<String>,
}

/// Read `null` as the field's default, like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ExerciseVariant {
    /// Create a variant with the given id and technical name.
    pub fn new(id: impl Into<String>, nombre_tecnico: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            nombre_tecnico: nombre_tecnico.into(),
            ..Default::default()
        }
    }

    /// Dominant primary target, if any.
    pub fn primary_target(&self) -> Option<&str> {
        self.target_primarios.first().map(String::as_str)
    }

    /// Dominant limiting factor, if any.
    pub fn primary_limiting_factor(&self) -> Option<&str> {
        self.limiting_factor.first().map(String::as_str)
    }
}
