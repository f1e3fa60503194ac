use serde::{Deserialize, Deserializer, Serialize};
use std::ops::Add;

/// One component of a product's material composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialShare {
    pub name: String,
    pub percentage: f64,
}

impl MaterialShare {
    pub fn new(name: impl Into<String>, percentage: f64) -> Self {
        Self {
            name: name.into(),
            percentage,
        }
    }
}

/// Attributes of a product submitted for scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInput {
    pub product_name: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub brand: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub subcategory: Option<String>,
    pub materials: Vec<MaterialShare>,
    pub origin: String,
    pub care_instruction: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub certification1: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub certification2: Option<String>,
}

impl ProductInput {
    pub fn new(
        product_name: impl Into<String>,
        origin: impl Into<String>,
        care_instruction: impl Into<String>,
    ) -> Self {
        Self {
            product_name: product_name.into(),
            brand: None,
            category: None,
            subcategory: None,
            materials: Vec::new(),
            origin: origin.into(),
            care_instruction: care_instruction.into(),
            certification1: None,
            certification2: None,
        }
    }

    pub fn with_material(mut self, name: impl Into<String>, percentage: f64) -> Self {
        self.materials.push(MaterialShare::new(name, percentage));
        self
    }

    /// Fills the first empty certification slot; a third label is ignored.
    pub fn with_certification(mut self, name: impl Into<String>) -> Self {
        let name = Some(name.into());
        if self.certification1.is_none() {
            self.certification1 = name;
        } else if self.certification2.is_none() {
            self.certification2 = name;
        }
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn certification_slots(&self) -> [Option<&str>; 2] {
        [
            self.certification1.as_deref(),
            self.certification2.as_deref(),
        ]
    }
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Composition-weighted material indicators, in physical units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MaterialImpact {
    pub carbon: f64,
    pub water: f64,
    pub energy: f64,
    pub chemical: f64,
}

impl Add for MaterialImpact {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            carbon: self.carbon + rhs.carbon,
            water: self.water + rhs.water,
            energy: self.energy + rhs.energy,
            chemical: self.chemical + rhs.chemical,
        }
    }
}

/// Use-phase indicators of the product's care regimen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CareImpact {
    pub energy: f64,
    pub water: f64,
    pub co2: f64,
}

/// Impact indices of the manufacturing origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct OriginImpact {
    pub grid: f64,
    pub transport: f64,
    pub manufacturing: f64,
}

/// Raw impact vectors for one product before normalization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RawImpacts {
    pub material: MaterialImpact,
    pub care: CareImpact,
    pub origin: OriginImpact,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialImpactBreakdown {
    pub co2: f64,
    pub water: f64,
    pub energy: f64,
    pub chemical: f64,
}

impl MaterialImpactBreakdown {
    pub fn mean(&self) -> f64 {
        (self.co2 + self.water + self.energy + self.chemical) / 4.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactBreakdown {
    pub co2: f64,
    pub water: f64,
    pub energy: f64,
}

impl ImpactBreakdown {
    pub fn mean(&self) -> f64 {
        (self.co2 + self.water + self.energy) / 3.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OriginImpactBreakdown {
    pub grid: f64,
    pub transport: f64,
    pub manufacturing: f64,
}

impl OriginImpactBreakdown {
    pub fn mean(&self) -> f64 {
        (self.grid + self.transport + self.manufacturing) / 3.0
    }
}

/// All ten indicators as 0-100 badness values (100 = worst in the table).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub material_impact: MaterialImpactBreakdown,
    pub care_impact: ImpactBreakdown,
    pub origin_impact: OriginImpactBreakdown,
}

/// Per-category mean badness before the category weights are applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryBadness {
    pub material: f64,
    pub care: f64,
    pub origin: f64,
}

/// Outcome of scoring one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// `environmental_score + applied_certification_bonus`, clamped to 0..=100.
    pub final_score: f64,
    /// 100 minus the weighted category badness.
    pub environmental_score: f64,
    /// Sum of certification bonuses in percentage points, before the cap.
    pub certification_bonus: f64,
    /// Bonus actually added to the environmental score.
    pub applied_certification_bonus: f64,
    pub category_badness: CategoryBadness,
    pub breakdown: ScoreBreakdown,
}
