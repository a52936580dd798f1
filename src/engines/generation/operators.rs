use crate::engines::generation::genome::{Genome, ShapeGene};
use crate::types::Canvas;
use rand::seq::index;
use rand::Rng;

/// Largest coordinate shift a single mutation applies, in either direction
pub const COORDINATE_MUTATION_STEP: i64 = 50;

/// Tournament selection: best of `tournament_size` distinct random candidates.
///
/// Ties go to whichever candidate was drawn first. The sample is capped at
/// the population size.
pub fn tournament_selection<R: Rng>(
    population: &[Genome],
    fitness: &[f64],
    tournament_size: usize,
    rng: &mut R,
) -> Genome {
    debug_assert_eq!(population.len(), fitness.len());
    let amount = tournament_size.min(population.len()).max(1);

    let mut contenders = index::sample(rng, population.len(), amount).into_iter();
    let mut best_idx = contenders.next().unwrap_or(0);

    for idx in contenders {
        if fitness[idx] > fitness[best_idx] {
            best_idx = idx;
        }
    }

    population[best_idx].clone()
}

/// Prefix crossover on shape boundaries.
///
/// The child is a random-length prefix of `parent_a` followed by a
/// random-length prefix of `parent_b`. When both prefixes come out empty the
/// child gets the first shape of a randomly chosen parent instead.
pub fn crossover<R: Rng>(parent_a: &Genome, parent_b: &Genome, rng: &mut R) -> Genome {
    let cut_a = rng.gen_range(0..=parent_a.len());
    let cut_b = rng.gen_range(0..=parent_b.len());

    let child: Genome = parent_a.shapes()[..cut_a]
        .iter()
        .chain(&parent_b.shapes()[..cut_b])
        .copied()
        .collect();

    if !child.is_empty() {
        return child;
    }

    let (first, second) = if rng.gen_bool(0.5) {
        (parent_a, parent_b)
    } else {
        (parent_b, parent_a)
    };

    first
        .shapes()
        .first()
        .or_else(|| second.shapes().first())
        .copied()
        .into_iter()
        .collect()
}

/// Mutation: perturb each field independently with probability `mutation_rate`.
///
/// Coordinates move by up to [`COORDINATE_MUTATION_STEP`] and are clamped to the
/// canvas; color channels are redrawn. The input genome is left untouched.
pub fn mutate<R: Rng>(genome: &Genome, mutation_rate: f64, canvas: &Canvas, rng: &mut R) -> Genome {
    let mut mutated = genome.clone();

    for shape in mutated.shapes_mut() {
        mutate_shape(shape, mutation_rate, canvas, rng);
    }

    mutated
}

fn mutate_shape<R: Rng>(shape: &mut ShapeGene, mutation_rate: f64, canvas: &Canvas, rng: &mut R) {
    let (width, height) = (canvas.width(), canvas.height());
    let mut moved = [false; 4];

    for ((coord, limit), flag) in [
        (&mut shape.x0, width),
        (&mut shape.y0, height),
        (&mut shape.x1, width),
        (&mut shape.y1, height),
    ]
    .into_iter()
    .zip(moved.iter_mut())
    {
        if rng.gen::<f64>() < mutation_rate {
            *coord = shift_coordinate(*coord, limit, rng);
            *flag = true;
        }
    }

    for channel in shape.fill.iter_mut().chain(shape.outline.iter_mut()) {
        if rng.gen::<f64>() < mutation_rate {
            *channel = rng.gen();
        }
    }

    // re-order only the axes whose coordinates moved
    let [x0_moved, y0_moved, x1_moved, y1_moved] = moved;
    if x0_moved || x1_moved {
        shape.x1 = shape.x1.max(shape.x0);
    }
    if y0_moved || y1_moved {
        shape.y1 = shape.y1.max(shape.y0);
    }
}

fn shift_coordinate<R: Rng>(value: u32, limit: u32, rng: &mut R) -> u32 {
    let delta = rng.gen_range(-COORDINATE_MUTATION_STEP..=COORDINATE_MUTATION_STEP);
    (value as i64 + delta).clamp(0, limit as i64) as u32
}
