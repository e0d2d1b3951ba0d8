//! Text normalization stages.

pub mod district;
pub mod price;

pub use district::{
    DistrictMatch, DistrictNormalization, NEIGHBOURHOOD_DISTRICTS, UNKNOWN_DISTRICT,
    normalize_district_column, resolve_district,
};
pub use price::{PriceCleaning, clean_price_column, parse_price, strip_price_formatting};
