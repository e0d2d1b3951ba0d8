//! Derived listing features.

pub mod amenities;
pub mod professionalism;

pub use amenities::{AmenitySummary, PremiumAmenities, add_amenity_features, count_amenities};
pub use professionalism::{
    ProfessionalismSummary, add_professionalism, availability_score, listings_score,
    professionalism_score, response_time_score,
};
