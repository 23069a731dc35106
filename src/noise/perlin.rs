use bevy::math::{Vec2, Vec4};

/// Classic 2D Perlin noise, roughly in [-1, 1].
pub fn perlin(pos: Vec2) -> f32 {
    gradient_noise(pos, None)
}

/// Perlin noise that repeats every `period` units on each axis.
///
/// Only whole-number periods tile seamlessly, since wrapping happens on lattice cells.
pub fn perlin_periodic(pos: Vec2, period: Vec2) -> f32 {
    gradient_noise(pos, Some(period))
}

fn gradient_noise(pos: Vec2, period: Option<Vec2>) -> f32 {
    // Corners of the lattice cell, packed as (x0, y0, x1, y1)
    let packed = Vec4::new(pos.x, pos.y, pos.x, pos.y);
    let mut cell = packed.floor() + Vec4::new(0.0, 0.0, 1.0, 1.0);
    let local = packed - packed.floor() - Vec4::new(0.0, 0.0, 1.0, 1.0);
    if let Some(period) = period {
        cell = floor_mod(cell, Vec4::new(period.x, period.y, period.x, period.y));
    }
    let cell = mod289(cell);

    let ix = Vec4::new(cell.x, cell.z, cell.x, cell.z);
    let iy = Vec4::new(cell.y, cell.y, cell.w, cell.w);
    let fx = Vec4::new(local.x, local.z, local.x, local.z);
    let fy = Vec4::new(local.y, local.y, local.w, local.w);

    // Hash each corner onto a gradient on the diamond |gx| + |gy| = 1
    let hash = permute(permute(ix) + iy);
    let gx = fract(hash * (1.0 / 41.0)) * 2.0 - 1.0;
    let gy = gx.abs() - 0.5;
    let gx = gx - (gx + 0.5).floor();

    let g00 = Vec2::new(gx.x, gy.x);
    let g10 = Vec2::new(gx.y, gy.y);
    let g01 = Vec2::new(gx.z, gy.z);
    let g11 = Vec2::new(gx.w, gy.w);
    let norm = taylor_inv_sqrt(Vec4::new(
        g00.dot(g00),
        g01.dot(g01),
        g10.dot(g10),
        g11.dot(g11),
    ));

    let n00 = (g00 * norm.x).dot(Vec2::new(fx.x, fy.x));
    let n10 = (g10 * norm.z).dot(Vec2::new(fx.y, fy.y));
    let n01 = (g01 * norm.y).dot(Vec2::new(fx.z, fy.z));
    let n11 = (g11 * norm.w).dot(Vec2::new(fx.w, fy.w));

    let blend = fade(Vec2::new(local.x, local.y));
    let along_x = Vec2::new(n00, n01).lerp(Vec2::new(n10, n11), blend.x);
    2.3 * (along_x.x + (along_x.y - along_x.x) * blend.y)
}

// Quintic blend: t³·(t·(t·6−15)+10)
fn fade(t: Vec2) -> Vec2 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn fract(x: Vec4) -> Vec4 {
    x - x.floor()
}

fn floor_mod(x: Vec4, m: Vec4) -> Vec4 {
    x - m * (x / m).floor()
}

fn mod289(x: Vec4) -> Vec4 {
    x - (x * (1.0 / 289.0)).floor() * 289.0
}

// Permutation polynomial (34x² + x) mod 289
fn permute(x: Vec4) -> Vec4 {
    mod289((x * 34.0 + 1.0) * x)
}

fn taylor_inv_sqrt(r: Vec4) -> Vec4 {
    Vec4::splat(1.792_842_9) - r * 0.853_734_7
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_on_lattice_points() {
        for y in -3..3 {
            for x in -3..3 {
                let v = perlin(Vec2::new(x as f32, y as f32));
                assert!(v.abs() < 1e-6, "({x}, {y}) -> {v}");
            }
        }
    }

    #[test]
    fn deterministic_and_varied() {
        let samples: Vec<f32> = (0..64)
            .map(|i| perlin(Vec2::new(i as f32 * 0.37, i as f32 * 0.21 + 0.5)))
            .collect();
        let again: Vec<f32> = (0..64)
            .map(|i| perlin(Vec2::new(i as f32 * 0.37, i as f32 * 0.21 + 0.5)))
            .collect();
        assert_eq!(samples, again);

        let (min, max) = samples
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(mn, mx), &v| {
                (mn.min(v), mx.max(v))
            });
        assert!(max - min > 0.2, "noise is flat: [{min}, {max}]");
        assert!(min > -1.7 && max < 1.7, "out of range: [{min}, {max}]");
    }

    #[test]
    fn periodic_variant_wraps() {
        let period = Vec2::splat(4.0);
        for &(x, y) in &[(0.37, 1.91), (2.5, 0.25), (3.99, 3.01)] {
            let p = Vec2::new(x, y);
            let base = perlin_periodic(p, period);
            let shifted_x = perlin_periodic(p + Vec2::new(4.0, 0.0), period);
            let shifted_y = perlin_periodic(p + Vec2::new(0.0, 8.0), period);
            assert!((base - shifted_x).abs() < 1e-4, "{base} vs {shifted_x}");
            assert!((base - shifted_y).abs() < 1e-4, "{base} vs {shifted_y}");
        }
    }

    #[test]
    fn periodic_matches_plain_inside_first_period() {
        // Wrapping only touches cells at or past the period boundary
        let p = Vec2::new(1.3, 2.6);
        assert_eq!(perlin(p), perlin_periodic(p, Vec2::splat(8.0)));
    }
}
