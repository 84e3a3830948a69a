//! Great-circle distance and nearest-facility lookup.
//!
//! The lookup is a linear scan. Facility counts per category are in the low
//! hundreds and lookups are not on a request-serving path.

use reliefnet_types::models::{Facility, Nearest};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points given in decimal degrees.
///
/// Uses the haversine formula, which stays well-conditioned for both tiny and
/// near-antipodal separations.
///
/// # Example
///
/// ```
/// use reliefnet_geo::haversine_distance_km;
///
/// // Quarter of the equator
/// let d = haversine_distance_km(0.0, 0.0, 0.0, 90.0);
/// assert!((d - 10007.54).abs() < 0.01);
/// ```
pub fn haversine_distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    // Rounding can push `a` a hair past 1 near the antipode
    let a = ((d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2))
    .clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Closest facility to the user, or `None` if there are no facilities.
///
/// Ties go to whichever facility comes first.
pub fn find_nearest(facilities: &[Facility], user_lat: f64, user_lon: f64) -> Option<Nearest> {
    let mut best: Option<(&Facility, f64)> = None;

    for facility in facilities {
        let distance =
            haversine_distance_km(user_lat, user_lon, facility.latitude, facility.longitude);
        match best {
            Some((_, min)) if distance >= min => {}
            _ => best = Some((facility, distance)),
        }
    }

    best.map(|(facility, distance_km)| Nearest {
        name: facility.name.clone(),
        address: facility.address.clone(),
        distance_km,
    })
}
