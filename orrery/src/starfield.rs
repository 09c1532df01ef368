//! Background star field

use common::Vertex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const STAR_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Scatter `count` white points uniformly through a cube of edge `spread`
/// centred on the origin. A seed makes the field reproducible.
pub fn generate(count: usize, spread: f32, seed: Option<u64>) -> Vec<Vertex> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    scatter(&mut rng, count, spread)
}

fn scatter<R: Rng>(rng: &mut R, count: usize, spread: f32) -> Vec<Vertex> {
    (0..count)
        .map(|_| {
            let position = [
                (rng.gen::<f32>() - 0.5) * spread,
                (rng.gen::<f32>() - 0.5) * spread,
                (rng.gen::<f32>() - 0.5) * spread,
            ];
            Vertex::new(position, STAR_COLOR)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_count_inside_cube() {
        let stars = generate(10_000, 200.0, Some(1));
        assert_eq!(stars.len(), 10_000);
        for star in &stars {
            assert!(star.position.iter().all(|c| (-100.0..=100.0).contains(c)));
            assert_eq!(star.color, STAR_COLOR);
        }
    }

    #[test]
    fn same_seed_same_field() {
        let a = generate(64, 200.0, Some(42));
        let b = generate(64, 200.0, Some(42));
        let c = generate(64, 200.0, Some(43));
        let positions = |v: &[Vertex]| v.iter().map(|s| s.position).collect::<Vec<_>>();
        assert_eq!(positions(&a), positions(&b));
        assert_ne!(positions(&a), positions(&c));
    }

    #[test]
    fn empty_field() {
        assert!(generate(0, 200.0, None).is_empty());
    }
}
