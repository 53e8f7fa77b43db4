use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Categorical columns
// ---------------------------------------------------------------------------

/// Penguin species. Declaration order is the order used by every control,
/// legend and chart series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Species {
    Adelie,
    Gentoo,
    Chinstrap,
}

impl Species {
    pub const ALL: [Species; 3] = [Species::Adelie, Species::Gentoo, Species::Chinstrap];

    pub fn as_str(self) -> &'static str {
        match self {
            Species::Adelie => "Adelie",
            Species::Gentoo => "Gentoo",
            Species::Chinstrap => "Chinstrap",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Island {
    Biscoe,
    Dream,
    Torgersen,
}

impl Island {
    pub fn as_str(self) -> &'static str {
        match self {
            Island::Biscoe => "Biscoe",
            Island::Dream => "Dream",
            Island::Torgersen => "Torgersen",
        }
    }
}

impl fmt::Display for Island {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn as_str(self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Attribute – a continuous measurement column
// ---------------------------------------------------------------------------

/// The continuous (float-valued) measurement columns of the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    BillLengthMm,
    BillDepthMm,
    FlipperLengthMm,
    BodyMassG,
}

impl Attribute {
    /// Column order as it appears in the source table.
    pub const ALL: [Attribute; 4] = [
        Attribute::BillLengthMm,
        Attribute::BillDepthMm,
        Attribute::FlipperLengthMm,
        Attribute::BodyMassG,
    ];

    /// Source column name.
    pub fn column(self) -> &'static str {
        match self {
            Attribute::BillLengthMm => "bill_length_mm",
            Attribute::BillDepthMm => "bill_depth_mm",
            Attribute::FlipperLengthMm => "flipper_length_mm",
            Attribute::BodyMassG => "body_mass_g",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Attribute {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Attribute::ALL
            .into_iter()
            .find(|a| a.column() == s)
            .ok_or_else(|| anyhow::anyhow!("unknown continuous column '{s}'"))
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the dataset
// ---------------------------------------------------------------------------

/// One observed penguin. Measurement cells and `sex` may be missing (`NA`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Record {
    pub species: Species,
    pub island: Island,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub bill_length_mm: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub bill_depth_mm: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub flipper_length_mm: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub body_mass_g: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub sex: Option<Sex>,
    pub year: u16,
}

impl Record {
    /// Value of a continuous column, `None` when missing.
    pub fn value(&self, attribute: Attribute) -> Option<f64> {
        match attribute {
            Attribute::BillLengthMm => self.bill_length_mm,
            Attribute::BillDepthMm => self.bill_depth_mm,
            Attribute::FlipperLengthMm => self.flipper_length_mm,
            Attribute::BodyMassG => self.body_mass_g,
        }
    }

    /// Treat `NaN` and infinite measurements as missing.
    fn without_non_finite(mut self) -> Self {
        for cell in [
            &mut self.bill_length_mm,
            &mut self.bill_depth_mm,
            &mut self.flipper_length_mm,
            &mut self.body_mass_g,
        ] {
            if cell.is_some_and(|v| !v.is_finite()) {
                *cell = None;
            }
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// Column names in source order.
pub const COLUMNS: [&str; 8] = [
    "species",
    "island",
    "bill_length_mm",
    "bill_depth_mm",
    "flipper_length_mm",
    "body_mass_g",
    "sex",
    "year",
];

/// The full immutable dataset. Records are never mutated after load, every
/// view downstream is a read-only projection. Every present measurement is
/// finite.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn from_records(records: Vec<Record>) -> Self {
        Dataset {
            records: records.into_iter().map(Record::without_non_finite).collect(),
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Columns holding continuous numeric measurements, in source order.
    pub fn continuous_columns(&self) -> &'static [Attribute] {
        &Attribute::ALL
    }

    /// Number of records of the given species.
    pub fn count_species(&self, species: Species) -> usize {
        self.records.iter().filter(|r| r.species == species).count()
    }
}
