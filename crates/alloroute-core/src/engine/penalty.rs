use super::config::PenaltyKind;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A strategy producing one multiplicative penalty factor per edge of a
/// just-found path.
///
/// `listlen` is the path's edge count (node count minus one); `listlen = 0`
/// yields an empty list. Factors below 1 weaken a contact's energy and so
/// raise its traversal cost for the next search; `worst` is the harshest
/// bound and `least` the mildest, both conventionally in (0, 1).
pub trait PenaltyPolicy {
    fn factors(&mut self, listlen: usize, worst: f64, least: f64) -> Vec<f64>;
}

/// Draws each factor independently, interpolating between `least` and
/// `-worst` with a uniform random fraction per position; factors may be
/// negative. Reproducible only when constructed from a seed.
pub struct RandomPenalty {
    rng: StdRng,
}

impl RandomPenalty {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl PenaltyPolicy for RandomPenalty {
    fn factors(&mut self, listlen: usize, worst: f64, least: f64) -> Vec<f64> {
        (0..listlen)
            .map(|_| {
                let f: f64 = self.rng.gen_range(0.0..1.0);
                (1.0 - f) * least - f * worst
            })
            .collect()
    }
}

/// Symmetric profile that is harshest in the middle of the path and mildest
/// at its ends: a linear ramp from `least` near the ends toward `worst` at
/// the center, mirrored. Odd-length paths place exactly `worst` at the
/// center position.
#[derive(Debug, Default, Clone, Copy)]
pub struct WedgePenalty;

impl PenaltyPolicy for WedgePenalty {
    fn factors(&mut self, listlen: usize, worst: f64, least: f64) -> Vec<f64> {
        if listlen == 0 {
            return Vec::new();
        }
        let center = (listlen as f64 - 1.0) / 2.0;
        if center == 0.0 {
            // A single edge sits at the center of its path.
            return vec![worst];
        }
        (0..listlen)
            .map(|i| {
                let from_end = center - (i as f64 - center).abs();
                least + (worst - least) * (from_end / center)
            })
            .collect()
    }
}

/// Instantiates the policy named by the configuration.
pub fn make_policy(kind: PenaltyKind, seed: Option<u64>) -> Box<dyn PenaltyPolicy> {
    match kind {
        PenaltyKind::Random => Box::new(RandomPenalty::new(seed)),
        PenaltyKind::Wedge => Box::new(WedgePenalty),
    }
}
