use crate::core::math::Point;

/// Douglas-Peucker point reduction.
///
/// Returns the subsequence of `points` (first and last always retained,
/// unmodified) such that every dropped point lies within `tolerance` of the
/// segment connecting its surrounding retained points, measured by
/// perpendicular distance clamped to the segment endpoints. All comparisons
/// use squared distances.
///
/// The recursion is run iteratively with an explicit stack so pathological
/// inputs cannot overflow the call stack. Ties on maximum deviation resolve
/// to the first point in scan order, so identical input always yields bit
/// identical output.
///
/// Inputs of one or two points, and a non-positive tolerance, return the
/// input unchanged.
pub fn douglas_peucker(points: &[Point], tolerance: f64) -> Vec<Point> {
    if points.len() <= 2 || tolerance <= 0.0 {
        return points.to_vec();
    }
    let tolerance_sqr = tolerance * tolerance;

    let mut out = Vec::with_capacity(points.len());
    out.push(points[0]);

    // dp_stack holds pending floater indices; the current floater is the top.
    let mut dp_stack: Vec<usize> = Vec::with_capacity(16);
    let mut anchor = 0usize;
    let mut floater = points.len() - 1;
    dp_stack.push(floater);

    loop {
        let a = points[anchor];
        let f = points[floater];
        let fx = (f.x - a.x) as f64;
        let fy = (f.y - a.y) as f64;
        let len_sqr = fx * fx + fy * fy;

        let mut max_dist_sqr = 0.0f64;
        let mut furthest = anchor;
        for (i, &p) in points.iter().enumerate().take(floater).skip(anchor + 1) {
            let px = (p.x - a.x) as f64;
            let py = (p.y - a.y) as f64;
            let dist_sqr = if len_sqr == 0.0 {
                // anchor and floater coincide; fall back to distance from the
                // anchor
                px * px + py * py
            } else {
                let dot = px * fx + py * fy;
                if dot <= 0.0 {
                    px * px + py * py
                } else if dot >= len_sqr {
                    let qx = px - fx;
                    let qy = py - fy;
                    qx * qx + qy * qy
                } else {
                    let t = dot / len_sqr;
                    let qx = px - t * fx;
                    let qy = py - t * fy;
                    qx * qx + qy * qy
                }
            };
            if dist_sqr > max_dist_sqr {
                max_dist_sqr = dist_sqr;
                furthest = i;
            }
        }

        if max_dist_sqr <= tolerance_sqr {
            // everything between anchor and floater is within tolerance
            out.push(points[floater]);
            anchor = floater;
            dp_stack.pop();
            match dp_stack.last() {
                Some(&next_floater) => floater = next_floater,
                None => break,
            }
        } else {
            floater = furthest;
            dp_stack.push(floater);
        }
    }

    out
}

/// In-place variant of [`douglas_peucker`].
pub fn douglas_peucker_in_place(points: &mut Vec<Point>, tolerance: f64) {
    if points.len() > 2 && tolerance > 0.0 {
        *points = douglas_peucker(points, tolerance);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn max_deviation(original: &[Point], simplified: &[Point]) -> f64 {
        let mut max = 0.0f64;
        for &p in original {
            let mut best = f64::INFINITY;
            for w in simplified.windows(2) {
                let (a, b) = (w[0], w[1]);
                let fx = (b.x - a.x) as f64;
                let fy = (b.y - a.y) as f64;
                let px = (p.x - a.x) as f64;
                let py = (p.y - a.y) as f64;
                let len_sqr = fx * fx + fy * fy;
                let d = if len_sqr == 0.0 {
                    px * px + py * py
                } else {
                    let t = (px * fx + py * fy).clamp(0.0, len_sqr) / len_sqr;
                    let qx = px - t * fx;
                    let qy = py - t * fy;
                    qx * qx + qy * qy
                };
                best = best.min(d);
            }
            max = max.max(best.sqrt());
        }
        max
    }

    #[test]
    fn short_inputs_unchanged() {
        let one = vec![Point::new(1, 2)];
        let two = vec![Point::new(1, 2), Point::new(3, 4)];
        assert_eq!(douglas_peucker(&one, 1000.0), one);
        assert_eq!(douglas_peucker(&two, 1000.0), two);
    }

    #[test]
    fn zero_tolerance_changes_nothing() {
        let pts = vec![
            Point::new(0, 0),
            Point::new(50, 0),
            Point::new(100, 0),
            Point::new(100, 100),
        ];
        assert_eq!(douglas_peucker(&pts, 0.0), pts);
    }

    #[test]
    fn drops_near_collinear_points() {
        let pts = vec![
            Point::new(0, 0),
            Point::new(500, 3),
            Point::new(1000, 0),
            Point::new(1500, -2),
            Point::new(2000, 0),
        ];
        let simplified = douglas_peucker(&pts, 10.0);
        assert_eq!(
            simplified,
            vec![Point::new(0, 0), Point::new(2000, 0)]
        );
    }

    #[test]
    fn keeps_endpoints_and_respects_tolerance() {
        // sawtooth with mixed amplitudes
        let pts: Vec<Point> = (0..50)
            .map(|i| Point::new(i * 100, if i % 2 == 0 { 0 } else { 40 + (i % 7) * 30 }))
            .collect();
        let tolerance = 55.0;
        let simplified = douglas_peucker(&pts, tolerance);
        assert_eq!(simplified.first(), pts.first());
        assert_eq!(simplified.last(), pts.last());
        assert!(max_deviation(&pts, &simplified) <= tolerance);
    }

    #[test]
    fn coincident_anchor_floater_uses_euclidean_distance() {
        let pts = vec![
            Point::new(0, 0),
            Point::new(5, 5),
            Point::new(300, 0),
            Point::new(0, 0),
        ];
        let simplified = douglas_peucker(&pts, 20.0);
        assert!(simplified.contains(&Point::new(300, 0)));
        assert!(!simplified.contains(&Point::new(5, 5)));
    }

    #[test]
    fn deterministic_on_ties() {
        let pts = vec![
            Point::new(0, 0),
            Point::new(100, 50),
            Point::new(200, 0),
            Point::new(300, 50),
            Point::new(400, 0),
        ];
        let a = douglas_peucker(&pts, 30.0);
        let b = douglas_peucker(&pts, 30.0);
        assert_eq!(a, b);
    }
}
