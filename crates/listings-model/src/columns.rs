//! Column names of the listings dataset.
//!
//! Raw columns keep the names of the source export. Derived columns are
//! added by the transform stages.

pub const HOST_RESPONSE_TIME: &str = "host_response_time";
pub const HOST_LISTINGS_COUNT: &str = "host_listings_count";
pub const HOST_HAS_PROFILE_PIC: &str = "host_has_profile_pic";
/// Raw neighbourhood; rewritten in place with the district label.
pub const NEIGHBOURHOOD: &str = "neighbourhood";
pub const PROPERTY_TYPE: &str = "property_type";
pub const ROOM_TYPE: &str = "room_type";
pub const ACCOMMODATES: &str = "accommodates";
pub const AMENITIES: &str = "amenities";
pub const SQUARE_FEET: &str = "square_feet";
pub const PRICE: &str = "price";
pub const MINIMUM_NIGHTS: &str = "minimum_nights";
pub const AVAILABILITY_365: &str = "availability_365";
pub const NUMBER_OF_REVIEWS: &str = "number_of_reviews";
pub const REVIEW_SCORES_RATING: &str = "review_scores_rating";

pub const AMENITIES_COUNT: &str = "amenities_count";
pub const AMENITIES_PREMIUM_COUNT: &str = "amenities_premium_count";
pub const PROFESSIONALISM: &str = "professionalism";
pub const SQUARE_METERS: &str = "square_meters";
pub const SQUARE_METERS_IMPUTED: &str = "square_meters_imputed";

/// Columns kept from the raw export, in output order.
pub const DEFAULT_COLUMNS: &[&str] = &[
    HOST_RESPONSE_TIME,
    HOST_LISTINGS_COUNT,
    HOST_HAS_PROFILE_PIC,
    NEIGHBOURHOOD,
    PROPERTY_TYPE,
    ROOM_TYPE,
    ACCOMMODATES,
    AMENITIES,
    SQUARE_FEET,
    PRICE,
    MINIMUM_NIGHTS,
    AVAILABILITY_365,
    NUMBER_OF_REVIEWS,
    REVIEW_SCORES_RATING,
];

/// Columns the pipeline cannot run without, whatever the configured selection.
pub const REQUIRED_COLUMNS: &[&str] = &[
    HOST_RESPONSE_TIME,
    HOST_LISTINGS_COUNT,
    NEIGHBOURHOOD,
    PROPERTY_TYPE,
    AMENITIES,
    SQUARE_FEET,
    PRICE,
    AVAILABILITY_365,
];
