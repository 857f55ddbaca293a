// Target selection for the automated opponent.
// Uniform over unattacked cells; no hunt/target mode, no density model.

use rand::Rng;

use crate::board::BB;

/// Pick one cell uniformly from those not yet attacked.
///
/// `attacked` is the union of hits and misses on the target board. Returns
/// `None` only when every cell has been attacked, which a game that ends on
/// the last sinking never reaches.
pub fn choose_attack<R: Rng + ?Sized>(attacked: &BB, rng: &mut R) -> Option<(usize, usize)> {
    let open = !*attacked;
    let n = open.count_ones();
    if n == 0 {
        return None;
    }
    open.iter().nth(rng.random_range(0..n))
}
