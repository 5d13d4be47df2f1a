//! Route alternative ordering.

use super::types::{AnnotatedRoute, RankedDirections};

/// Order route alternatives by accessibility.
///
/// Sorts ascending by `(obstacle_count, duration_value)`: fewer
/// obstacles first, ties broken by shorter duration. The first route
/// becomes the recommendation, the rest stay as ordered alternatives.
pub fn rank(mut routes: Vec<AnnotatedRoute>) -> RankedDirections {
    routes.sort_by_key(|route| (route.obstacle_count, route.duration_value));
    in_given_order(routes)
}

/// Wrap routes without reordering them.
pub(crate) fn in_given_order(routes: Vec<AnnotatedRoute>) -> RankedDirections {
    let total_routes = routes.len();
    let mut routes = routes.into_iter();
    RankedDirections {
        recommended_route: routes.next(),
        alternative_routes: routes.collect(),
        total_routes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Coordinate;

    fn route(route_index: usize, obstacle_count: usize, duration_value: i64) -> AnnotatedRoute {
        AnnotatedRoute {
            route_index,
            summary: String::new(),
            distance: String::new(),
            distance_value: 0,
            duration: String::new(),
            duration_value,
            start_address: String::new(),
            end_address: String::new(),
            start_location: Coordinate::new(0.0, 0.0),
            end_location: Coordinate::new(0.0, 0.0),
            steps: Vec::new(),
            overview_polyline: String::new(),
            obstacles: Vec::new(),
            obstacle_count,
            is_accessible: obstacle_count == 0,
        }
    }

    #[test]
    fn test_fewest_obstacles_wins() {
        let ranked = rank(vec![route(0, 2, 100), route(1, 0, 200), route(2, 1, 150)]);

        let recommended = ranked.recommended_route.unwrap();
        assert_eq!(recommended.obstacle_count, 0);
        assert_eq!(recommended.route_index, 1);

        let alternative_counts: Vec<_> = ranked
            .alternative_routes
            .iter()
            .map(|r| r.obstacle_count)
            .collect();
        assert_eq!(alternative_counts, vec![1, 2]);
        assert_eq!(ranked.total_routes, 3);
    }

    #[test]
    fn test_duration_breaks_ties() {
        let ranked = rank(vec![route(0, 1, 300), route(1, 1, 100), route(2, 1, 200)]);
        let durations: Vec<_> = std::iter::once(ranked.recommended_route.unwrap().duration_value)
            .chain(
                ranked
                    .alternative_routes
                    .iter()
                    .map(|r| r.duration_value),
            )
            .collect();
        assert_eq!(durations, vec![100, 200, 300]);
    }

    #[test]
    fn test_empty_input() {
        let ranked = rank(Vec::new());
        assert!(ranked.recommended_route.is_none());
        assert!(ranked.alternative_routes.is_empty());
        assert_eq!(ranked.total_routes, 0);
    }

    #[test]
    fn test_single_route() {
        let ranked = rank(vec![route(0, 3, 100)]);
        assert!(ranked.recommended_route.is_some());
        assert!(ranked.alternative_routes.is_empty());
        assert_eq!(ranked.total_routes, 1);
    }

    #[test]
    fn test_in_given_order_preserves_upstream_order() {
        let ranked = in_given_order(vec![route(0, 2, 100), route(1, 0, 200)]);
        assert_eq!(ranked.recommended_route.unwrap().route_index, 0);
        assert_eq!(ranked.alternative_routes[0].route_index, 1);
    }
}
