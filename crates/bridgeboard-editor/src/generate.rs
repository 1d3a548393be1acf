//! Random connected graph generator.
//!
//! Not part of the editing core: a convenience for producing material the
//! bridge detector can chew on. Biased 70/30 toward sparse graphs, which
//! tend to contain bridges.

use crate::session::EditorSession;
use bridgeboard_graph::Vec2;
use rand::Rng;
use tracing::info;

pub const MIN_NODES: usize = 5;
pub const MAX_NODES: usize = 8;

/// Nodes are placed at least this far from the canvas border.
const PLACEMENT_MARGIN: f32 = 60.0;

/// Probability of taking the sparse branch (at most one extra edge).
const SPARSE_BIAS: f64 = 0.7;

/// Per-pair probability of an extra edge on the dense branch.
const DENSIFY_PROBABILITY: f64 = 0.65;

/// Replace the session contents with a connected random graph of
/// [`MIN_NODES`]..=[`MAX_NODES`] nodes placed inside `extent`.
///
/// A random spanning tree guarantees connectivity. With probability 0.7 at
/// most one extra random edge is added (favoring bridge-containing graphs);
/// otherwise every remaining non-tree pair is added independently with
/// probability 0.65 (favoring bridge-free graphs). The status is left at
/// `Checking`; the caller issues the bridge query right after.
pub fn generate_random<R: Rng>(session: &mut EditorSession, extent: Vec2, rng: &mut R) {
    session.clear();
    let n = rng.gen_range(MIN_NODES..=MAX_NODES);

    let mut ids = Vec::with_capacity(n);
    for _ in 0..n {
        let x = PLACEMENT_MARGIN + rng.r#gen::<f32>() * (extent.x - 2.0 * PLACEMENT_MARGIN);
        let y = PLACEMENT_MARGIN + rng.r#gen::<f32>() * (extent.y - 2.0 * PLACEMENT_MARGIN);
        ids.push(session.add_node_at(Vec2::new(x, y)));
    }

    // Spanning tree: each node links to a random earlier one.
    for i in 1..n {
        let j = rng.gen_range(0..i);
        let _ = session.connect(ids[i], ids[j]);
    }

    if rng.gen_bool(SPARSE_BIAS) {
        for _ in 0..rng.gen_range(0..=1u32) {
            let u = ids[rng.gen_range(0..n)];
            let v = ids[rng.gen_range(0..n)];
            // Self-loop/duplicate draws are simply skipped.
            let _ = session.connect(u, v);
        }
    } else {
        for i in 0..n {
            for j in (i + 1)..n {
                if rng.gen_bool(DENSIFY_PROBABILITY) {
                    let _ = session.connect(ids[i], ids[j]);
                }
            }
        }
    }

    info!(
        nodes = n,
        edges = session.store().edge_count(),
        "generated random graph"
    );
    session.mark_checking();
}
