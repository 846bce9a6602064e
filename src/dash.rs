/// Split a polyline into the visible runs of a dash pattern.
///
/// `pattern` alternates on/off lengths and is multiplied by `scale`
/// (the line width). The pattern phase carries across vertices, so a dash
/// may turn a corner. An empty pattern returns the polyline unchanged.
pub fn dash_polyline(points: &[(f64, f64)], pattern: &[f64], scale: f64) -> Vec<Vec<(f64, f64)>> {
    if points.len() < 2 {
        return Vec::new();
    }
    let period: f64 = pattern.iter().sum::<f64>() * scale;
    if pattern.is_empty() || pattern.len() % 2 != 0 || period <= 0.0 {
        return vec![points.to_vec()];
    }

    let mut runs = Vec::new();
    let mut idx = 0;
    let mut on = true;
    let mut remaining = pattern[0] * scale;
    let mut current = vec![points[0]];

    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let len = ((b.0 - a.0).powi(2) + (b.1 - a.1).powi(2)).sqrt();
        let mut t = 0.0;
        while len - t > remaining {
            t += remaining;
            let f = t / len;
            let q = (a.0 + (b.0 - a.0) * f, a.1 + (b.1 - a.1) * f);
            if on {
                current.push(q);
                runs.push(std::mem::take(&mut current));
            } else {
                current = vec![q];
            }
            idx = (idx + 1) % pattern.len();
            on = !on;
            remaining = pattern[idx] * scale;
        }
        remaining -= len - t;
        if on {
            current.push(b);
        }
    }
    if on && current.len() >= 2 {
        runs.push(current);
    }
    runs
}
