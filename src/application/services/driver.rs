//! Demo driver sequence
//!
//! Builds a tree from random keys, prints it in every order, skews it with an
//! ascending run, confirms the imbalance, rebalances and prints it again.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, instrument};

use crate::application::ApplicationResult;
use crate::config::{DemoConfig, Settings};
use crate::domain::{render, BalancedBst, Key, Node, RenderStyle, TraversalOrder};

/// Draw `size` keys uniformly from `[0, max_key)`.
pub fn random_keys<R: Rng + ?Sized>(size: usize, max_key: Key, rng: &mut R) -> Vec<Key> {
    (0..size).map(|_| rng.gen_range(0..max_key)).collect()
}

/// Keys visited by one traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalSnapshot {
    pub order: TraversalOrder,
    pub keys: Vec<Key>,
}

/// Everything the driver observed, step by step.
#[derive(Debug, Clone)]
pub struct DemoReport {
    pub seed: Option<u64>,
    pub input: Vec<Key>,
    pub initial_drawing: String,
    pub balanced_initially: bool,
    pub initial_traversals: Vec<TraversalSnapshot>,
    pub skew_keys: Vec<Key>,
    pub skewed_drawing: String,
    pub balanced_after_skew: bool,
    /// Key removed after skewing, None when no keys were generated
    pub deleted_key: Option<Key>,
    pub balanced_after_rebalance: bool,
    pub final_traversals: Vec<TraversalSnapshot>,
    pub final_drawing: String,
}

pub struct DemoDriver {
    config: DemoConfig,
    style: RenderStyle,
}

impl DemoDriver {
    pub fn new(settings: &Settings) -> Self {
        Self {
            config: settings.demo.clone(),
            style: settings.render.style,
        }
    }

    /// The ascending run inserted to unbalance the tree.
    ///
    /// Stops early instead of wrapping when the run would leave the key range.
    pub fn skew_keys(&self) -> Vec<Key> {
        (0..self.config.skew_count)
            .map_while(|offset| {
                Key::try_from(offset)
                    .ok()
                    .and_then(|offset| self.config.skew_start.checked_add(offset))
            })
            .collect()
    }

    #[instrument(level = "info", skip(self))]
    pub fn run(&self) -> ApplicationResult<DemoReport> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let input = random_keys(self.config.size, self.config.max_key, &mut rng);
        debug!(?input, "generated keys");

        let mut tree = BalancedBst::new(input.iter().copied());
        let initial_drawing = render(&tree, self.style);
        let balanced_initially = tree.is_balanced();
        info!(len = tree.len(), balanced = balanced_initially, "initial tree");
        let initial_traversals = snapshots(&tree)?;

        let skew_keys = self.skew_keys();
        for &key in &skew_keys {
            tree.insert(key);
        }
        let skewed_drawing = render(&tree, self.style);
        let balanced_after_skew = tree.is_balanced();
        info!(
            height = tree.height(tree.root()),
            balanced = balanced_after_skew,
            "after skewing run"
        );

        // delete step: the first generated key
        let deleted_key = input.first().copied();
        if let Some(key) = deleted_key {
            tree.delete_item(key);
            debug!(key, len = tree.len(), "deleted key");
        }

        tree.rebalance();
        let balanced_after_rebalance = tree.is_balanced();
        info!(
            height = tree.height(tree.root()),
            balanced = balanced_after_rebalance,
            "after rebalance"
        );

        Ok(DemoReport {
            seed: self.config.seed,
            input,
            initial_drawing,
            balanced_initially,
            initial_traversals,
            skew_keys,
            skewed_drawing,
            balanced_after_skew,
            deleted_key,
            balanced_after_rebalance,
            final_traversals: snapshots(&tree)?,
            final_drawing: render(&tree, self.style),
        })
    }
}

fn snapshots(tree: &BalancedBst) -> ApplicationResult<Vec<TraversalSnapshot>> {
    TraversalOrder::ALL
        .iter()
        .map(|&order| -> ApplicationResult<TraversalSnapshot> {
            let mut keys = Vec::with_capacity(tree.len());
            let mut visit = |node: &Node| keys.push(node.key);
            tree.traverse(order, Some(&mut visit))?;
            Ok(TraversalSnapshot { order, keys })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(size: usize, seed: u64) -> Settings {
        let mut settings = Settings::default();
        settings.demo.size = size;
        settings.demo.seed = Some(seed);
        settings
    }

    #[test]
    fn given_max_key_when_generating_then_keys_in_range() {
        let mut rng = StdRng::seed_from_u64(1);
        let keys = random_keys(500, 100, &mut rng);
        assert_eq!(keys.len(), 500);
        assert!(keys.iter().all(|k| (0..100).contains(k)));
    }

    #[test]
    fn given_same_seed_when_running_twice_then_same_input() {
        let settings = seeded(20, 42);
        let first = DemoDriver::new(&settings).run().unwrap();
        let second = DemoDriver::new(&settings).run().unwrap();
        assert_eq!(first.input, second.input);
        assert_eq!(first.final_drawing, second.final_drawing);
    }

    #[test]
    fn given_default_skew_when_running_then_unbalanced_then_rebalanced() {
        let report = DemoDriver::new(&seeded(15, 7)).run().unwrap();
        assert!(report.balanced_initially);
        assert_eq!(report.skew_keys, vec![100, 101, 102, 103]);
        assert!(!report.balanced_after_skew);
        assert!(report.balanced_after_rebalance);
    }

    #[test]
    fn given_report_when_inspecting_final_in_order_then_contains_skew_keys() {
        let report = DemoDriver::new(&seeded(10, 3)).run().unwrap();
        let in_order = report
            .final_traversals
            .iter()
            .find(|s| s.order == TraversalOrder::In)
            .unwrap();
        assert!(in_order.keys.windows(2).all(|w| w[0] < w[1]));
        assert!(in_order.keys.ends_with(&[100, 101, 102, 103]));
        assert_eq!(report.final_traversals.len(), 4);
    }

    #[test]
    fn given_report_when_inspecting_final_traversals_then_deleted_key_is_gone() {
        let report = DemoDriver::new(&seeded(15, 11)).run().unwrap();
        let deleted = report.deleted_key.expect("input is never empty for size 15");
        assert_eq!(Some(&deleted), report.input.first());
        for snapshot in &report.final_traversals {
            assert!(!snapshot.keys.contains(&deleted), "{}", snapshot.order);
        }
        let initial_in_order = &report
            .initial_traversals
            .iter()
            .find(|s| s.order == TraversalOrder::In)
            .unwrap()
            .keys;
        assert!(initial_in_order.contains(&deleted));
    }

    #[test]
    fn given_no_keys_when_running_then_nothing_deleted() {
        let report = DemoDriver::new(&seeded(0, 5)).run().unwrap();
        assert_eq!(report.deleted_key, None);
        assert!(report.balanced_after_rebalance);
    }

    #[test]
    fn given_skew_start_near_key_max_when_building_run_then_stops_at_range_end() {
        let mut settings = seeded(5, 1);
        settings.demo.skew_start = Key::MAX - 1;
        let driver = DemoDriver::new(&settings);
        assert_eq!(driver.skew_keys(), vec![Key::MAX - 1, Key::MAX]);
        assert!(driver.run().is_ok());
    }
}
