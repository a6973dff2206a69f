use serde::{Deserialize, Serialize};

/// Calendar bucket used when resampling a return series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Period {
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl Period {
    /// Number of buckets of this period in one calendar year.
    pub fn buckets_per_year(&self) -> u32 {
        match self {
            Period::Weekly => 52,
            Period::Monthly => 12,
            Period::Quarterly => 4,
            Period::Yearly => 1,
        }
    }
}

/// Caller hint for the price-vs-return classification of raw input.
///
/// `Auto` applies the magnitude heuristic; the other two variants make the
/// classification explicit so a caller is never silently misread.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataKind {
    #[default]
    Auto,
    Prices,
    Returns,
}

/// Which tail(s) of the distribution an outlier filter applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutlierTail {
    Upper,
    Lower,
    Both,
}
