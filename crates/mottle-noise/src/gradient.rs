//! Perlin-style gradient noise over a fixed permutation table.

use crate::{lerp, Noise2D};

/// Classic permutation sequence from Ken Perlin's reference
/// implementation. Kept fixed so gradient noise is deterministic across
/// runs and across implementations.
const PERM_REF: [i32; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219,
    203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211, 133, 230,
    220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209, 76,
    132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173,
    186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212, 207, 206,
    59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44, 154, 163,
    70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232,
    178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162,
    241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157, 184, 84, 204,
    176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114, 67, 29, 24, 72, 243, 141,
    128, 195, 78, 66, 215, 61, 156, 180,
];

/// The table doubled to 512 entries so corner hashes never wrap.
static PERMUTATIONS: [i32; 512] = build_permutations();

const fn build_permutations() -> [i32; 512] {
    let mut table = [0i32; 512];
    let mut i = 0;
    while i < 256 {
        table[i] = PERM_REF[i];
        table[i + 256] = PERM_REF[i];
        i += 1;
    }
    table
}

/// Quintic fade curve `t^3 (t (6t - 15) + 10)`.
#[inline]
fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// 16-way gradient selection: the hash's low 4 bits pick components
/// from (x, y, z) with per-bit sign flips.
#[inline]
fn grad(hash: i32, x: f32, y: f32, z: f32) -> f32 {
    let h = hash & 0x0f;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
}

/// Deterministic Perlin-style gradient noise.
///
/// Samples are a pure function of the coordinate, the fixed permutation
/// table, and the current `scale`; the output is clamped to `[-3, 3]`.
///
/// # Example
///
/// ```
/// use mottle_noise::GradientNoise;
///
/// let noise = GradientNoise::new(1.0);
/// let v = noise.value(3.7, 8.2);
/// assert_eq!(v, noise.value(3.7, 8.2));
/// assert!((-3.0..=3.0).contains(&v));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct GradientNoise {
    scale: f32,
}

impl GradientNoise {
    /// Creates a gradient noise generator with the given output scale.
    pub fn new(scale: f32) -> Self {
        Self { scale }
    }

    /// Returns the output scale.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Sets the output scale for subsequent samples.
    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    /// Samples the noise at the given coordinate.
    ///
    /// Deterministic, so it is available on `&self`; the [`Noise2D`]
    /// impl delegates here.
    pub fn value(&self, x: f32, y: f32) -> f32 {
        let xi = (x.floor() as i32 & 0xff) as usize;
        let yi = y.floor() as i32 & 0xff;

        let dx = x - x.floor();
        let dy = y - y.floor();

        let u = fade(dx);
        let v = fade(dy);

        let a = (PERMUTATIONS[xi] + yi) as usize;
        let aa = PERMUTATIONS[a] as usize;
        let ab = PERMUTATIONS[a + 1] as usize;
        let b = (PERMUTATIONS[xi + 1] + yi) as usize;
        let ba = PERMUTATIONS[b] as usize;
        let bb = PERMUTATIONS[b + 1] as usize;

        // Two z-layers are evaluated: gradients at z = 0 through the
        // base corner hashes, and gradients at z = -1 through the
        // hashes shifted by one. The dot products take the absolute
        // coordinates, offset by -1 toward the far corners.
        let near = lerp(
            lerp(
                grad(PERMUTATIONS[aa], x, y, 0.0),
                grad(PERMUTATIONS[ba], x - 1.0, y, 0.0),
                u,
            ),
            lerp(
                grad(PERMUTATIONS[ab], x, y - 1.0, 0.0),
                grad(PERMUTATIONS[bb], x - 1.0, y - 1.0, 0.0),
                u,
            ),
            v,
        );
        let far = lerp(
            lerp(
                grad(PERMUTATIONS[aa + 1], x, y, -1.0),
                grad(PERMUTATIONS[ba + 1], x - 1.0, y, -1.0),
                u,
            ),
            lerp(
                grad(PERMUTATIONS[ab + 1], x, y - 1.0, -1.0),
                grad(PERMUTATIONS[bb + 1], x - 1.0, y - 1.0, -1.0),
                u,
            ),
            v,
        );

        // The far layer is blended with constant weight 0: only the
        // z = 0 layer ever reaches the output.
        (lerp(near, far, 0.0) * self.scale).clamp(-3.0, 3.0)
    }
}

impl Noise2D for GradientNoise {
    fn sample(&mut self, x: f32, y: f32) -> f32 {
        self.value(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic() {
        let noise = GradientNoise::new(1.0);
        for i in 0..200 {
            let x = i as f32 * 0.613;
            let y = i as f32 * 1.271;
            assert_eq!(noise.value(x, y), noise.value(x, y));
        }
    }

    #[test]
    fn test_clamped_range() {
        for &scale in &[0.5, 1.0, 2.0, 100.0] {
            let noise = GradientNoise::new(scale);
            for i in 0..100 {
                for j in 0..100 {
                    let v = noise.value(i as f32 * 1.37, j as f32 * 0.71);
                    assert!(
                        (-3.0..=3.0).contains(&v),
                        "value {} out of [-3, 3] at scale {}",
                        v,
                        scale
                    );
                }
            }
        }
    }

    #[test]
    fn test_finite_everywhere() {
        let noise = GradientNoise::new(1.0);
        for &(x, y) in &[
            (0.0, 0.0),
            (-17.25, 3.5),
            (1023.9, -4096.1),
            (0.0001, 255.9999),
        ] {
            assert!(noise.value(x, y).is_finite());
        }
    }

    #[test]
    fn test_scale_zero_is_zero() {
        let noise = GradientNoise::new(0.0);
        for i in 0..50 {
            assert_eq!(noise.value(i as f32 * 0.9, i as f32 * 2.3), 0.0);
        }
    }

    #[test]
    fn test_set_scale_applies() {
        let mut noise = GradientNoise::new(1.0);
        let base = noise.value(5.3, 2.8);
        noise.set_scale(0.0);
        assert_eq!(noise.value(5.3, 2.8), 0.0);
        noise.set_scale(1.0);
        assert_eq!(noise.value(5.3, 2.8), base);
    }

    #[test]
    fn test_permutation_table_doubled() {
        for i in 0..256 {
            assert_eq!(PERMUTATIONS[i], PERMUTATIONS[i + 256]);
        }
        // Spot-check the published reference sequence.
        assert_eq!(PERMUTATIONS[0], 151);
        assert_eq!(PERMUTATIONS[1], 160);
        assert_eq!(PERMUTATIONS[255], 180);
    }

    #[test]
    fn test_varies_across_coordinates() {
        let noise = GradientNoise::new(1.0);
        let v1 = noise.value(0.3, 0.7);
        let v2 = noise.value(7.9, 2.1);
        let v3 = noise.value(101.5, 54.25);
        assert!(v1 != v2 || v2 != v3, "noise should vary");
    }
}
