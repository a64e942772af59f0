//! Motor de distancias geográficas
//!
//! Distancia de círculo máximo (fórmula de haversine sobre una Tierra
//! esférica) y búsqueda del punto más cercano.

use crate::models::Coordinates;

pub const EARTH_RADIUS_KM: f64 = 6371.0;
pub const KM_TO_METERS: f64 = 1000.0;

/// Distancia en metros entre dos coordenadas
pub fn distance(point1: Coordinates, point2: Coordinates) -> f64 {
    let d_lat = (point2.latitude - point1.latitude).to_radians();
    let d_lon = (point2.longitude - point1.longitude).to_radians();

    let lat1 = point1.latitude.to_radians();
    let lat2 = point2.latitude.to_radians();

    let haversine = (d_lat / 2.0).sin().powi(2) + (d_lon / 2.0).sin().powi(2) * lat1.cos() * lat2.cos();
    // El redondeo puede dejar `haversine` apenas por encima de 1 en puntos antípodas
    let central_angle = 2.0 * haversine.clamp(0.0, 1.0).sqrt().asin();

    EARTH_RADIUS_KM * central_angle * KM_TO_METERS
}

/// Candidato más cercano a `target` y su distancia en metros
///
/// Recorrido lineal con comparación estricta: ante un empate gana el primer
/// candidato de la secuencia. Sin candidatos devuelve `(None, f64::INFINITY)`.
pub fn find_closest(target: Coordinates, candidates: &[Coordinates]) -> (Option<Coordinates>, f64) {
    let mut closest = None;
    let mut min_distance = f64::INFINITY;

    for &candidate in candidates {
        let current = distance(candidate, target);
        if current < min_distance {
            min_distance = current;
            closest = Some(candidate);
        }
    }

    (closest, min_distance)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-6;

    fn samples() -> Vec<Coordinates> {
        vec![
            Coordinates::new(0.0, 0.0),
            Coordinates::new(55.753215, 37.620393),
            Coordinates::new(-33.8688, 151.2093),
            Coordinates::new(40.7128, -74.006),
            Coordinates::new(89.9, 179.9),
            Coordinates::new(-89.9, -179.9),
        ]
    }

    #[test]
    fn test_distance_to_itself_is_zero() {
        for point in samples() {
            assert_eq!(distance(point, point), 0.0);
        }
    }

    #[test]
    fn test_distance_is_symmetric() {
        for a in samples() {
            for b in samples() {
                assert!((distance(a, b) - distance(b, a)).abs() < TOLERANCE);
            }
        }
    }

    #[test]
    fn test_distance_is_finite_and_non_negative() {
        let antipodes = distance(Coordinates::new(0.0, 0.0), Coordinates::new(0.0, 180.0));
        assert!(antipodes.is_finite());
        assert!((antipodes - std::f64::consts::PI * EARTH_RADIUS_KM * KM_TO_METERS).abs() < 1.0);

        for a in samples() {
            for b in samples() {
                let d = distance(a, b);
                assert!(d.is_finite() && d >= 0.0);
            }
        }
    }

    #[test]
    fn test_one_degree_of_longitude_at_equator() {
        let d = distance(Coordinates::new(0.0, 0.0), Coordinates::new(0.0, 1.0));
        assert!((d - 111_195.0).abs() < 1.0, "got {}", d);
    }

    #[test]
    fn test_find_closest_empty() {
        let (closest, min_distance) = find_closest(Coordinates::new(1.0, 1.0), &[]);
        assert!(closest.is_none());
        assert_eq!(min_distance, f64::INFINITY);
    }

    #[test]
    fn test_find_closest_picks_minimum() {
        let target = Coordinates::new(0.0, 0.0);
        let candidates = [
            Coordinates::new(10.0, 10.0),
            Coordinates::new(0.5, 0.5),
            Coordinates::new(-3.0, 2.0),
        ];

        let (closest, min_distance) = find_closest(target, &candidates);
        assert_eq!(closest, Some(Coordinates::new(0.5, 0.5)));
        assert!((min_distance - distance(target, candidates[1])).abs() < TOLERANCE);
    }

    #[test]
    fn test_find_closest_tie_keeps_first() {
        let target = Coordinates::new(0.0, 0.0);
        let east = Coordinates::new(0.0, 1.0);
        let west = Coordinates::new(0.0, -1.0);

        assert_eq!(find_closest(target, &[east, west]).0, Some(east));
        assert_eq!(find_closest(target, &[west, east]).0, Some(west));
    }
}
