//! Bagged ensembles of randomized decision trees.
use log::debug;
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use rand::rngs::StdRng;
use rayon::prelude::*;
use serde::{Serialize, Deserialize};

use crate::{Classifier, Dataset, Error, Learner, Result, Schema};
use crate::classifier::argmax;
use crate::common::checker;
use crate::learner::decision_tree::{Criterion, DTree, Node};


const DEFAULT_N_TREES: usize = 100;
const DEFAULT_SEED: u64 = 1;


/// A learner that grows `n_trees` decision trees, each on a bootstrap
/// sample drawn from the given distribution, and each considering a
/// random subset of the attributes at every node.
///
/// Tree `t` is grown with the random generator seeded by `seed + t`,
/// so the result does not depend on how the trees are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomForest {
    n_trees: usize,
    max_features: Option<usize>,
    max_depth: Option<usize>,
    min_leaf_weight: f64,
    criterion: Criterion,
    seed: u64,
}


impl Default for RandomForest {
    fn default() -> Self {
        Self {
            n_trees: DEFAULT_N_TREES,
            max_features: None,
            max_depth: None,
            min_leaf_weight: 1.0,
            criterion: Criterion::Gini,
            seed: DEFAULT_SEED,
        }
    }
}


impl RandomForest {
    /// Initializes the `RandomForest` instance.
    pub fn init() -> Self {
        Self::default()
    }


    /// Set the number of trees. Default is `100`.
    pub fn n_trees(mut self, n: usize) -> Self {
        assert!(n > 0);
        self.n_trees = n;
        self
    }


    /// Set the number of candidate attributes per node.
    /// Default is `floor(log2(m)) + 1` for `m` attributes.
    pub fn max_features(mut self, n: usize) -> Self {
        assert!(n > 0);
        self.max_features = Some(n);
        self
    }


    /// Set the maximal depth of each tree. Default is unlimited.
    pub fn max_depth(mut self, depth: usize) -> Self {
        assert!(depth > 0);
        self.max_depth = Some(depth);
        self
    }


    /// Set the minimal weight of a leaf. Default is `1.0`.
    pub fn min_leaf_weight(mut self, weight: f64) -> Self {
        assert!(weight >= 0.0);
        self.min_leaf_weight = weight;
        self
    }


    /// Set criterion for node splitting.
    pub fn criterion(mut self, criterion: Criterion) -> Self {
        self.criterion = criterion;
        self
    }


    /// Set the random seed. Default is `1`.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }


    /// Check the hyper-parameters.
    /// Deserialized values do not pass through the setters.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| Err(Error::Config(reason));
        if self.n_trees == 0 {
            return invalid("`n_trees` must be positive".into());
        }
        if self.max_features == Some(0) {
            return invalid("`max_features` must be positive".into());
        }
        if self.max_depth == Some(0) {
            return invalid("`max_depth` must be positive".into());
        }
        if !(self.min_leaf_weight.is_finite() && self.min_leaf_weight >= 0.0) {
            return invalid(format!(
                "`min_leaf_weight` must be non-negative, got {}",
                self.min_leaf_weight
            ));
        }
        Ok(())
    }


    fn n_candidates(&self, n_features: usize) -> usize {
        let default = (n_features.max(1) as f64).log2().floor() as usize + 1;
        self.max_features
            .unwrap_or(default)
            .clamp(1, n_features.max(1))
    }


    fn tree_learner(&self, n_features: usize) -> DTree {
        let tree = DTree::init()
            .criterion(self.criterion)
            .min_leaf_weight(self.min_leaf_weight)
            .max_features(self.n_candidates(n_features));
        match self.max_depth {
            Some(depth) => tree.max_depth(depth),
            None => tree,
        }
    }
}


/// Classifier produced by [`RandomForest`].
/// The distribution is the average of the leaf distributions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestClassifier {
    schema: Schema,
    n_classes: usize,
    trees: Vec<Node>,
}


impl ForestClassifier {
    /// Returns the trees of this forest.
    pub fn trees(&self) -> &[Node] {
        &self.trees[..]
    }


    /// Averaged class probabilities for the `row`-th example.
    pub fn probabilities(&self, data: &Dataset, row: usize) -> Vec<f64> {
        let mut dist = vec![0.0; self.n_classes];
        for tree in &self.trees {
            dist.iter_mut()
                .zip(tree.distribution(data, row))
                .for_each(|(d, p)| *d += p);
        }
        let n_trees = self.trees.len().max(1) as f64;
        dist.iter_mut().for_each(|d| *d /= n_trees);
        dist
    }
}


impl Learner for RandomForest {
    type Model = ForestClassifier;


    fn name(&self) -> &str {
        "RandomForest"
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        let features = self.max_features
            .map_or("log2(m) + 1".to_string(), |n| n.to_string());
        let depth = self.max_depth
            .map_or("Unlimited".to_string(), |d| d.to_string());
        Some(vec![
            ("# of trees", self.n_trees.to_string()),
            ("Features per node", features),
            ("Max. depth", depth),
            ("Criterion", self.criterion.to_string()),
            ("Seed", self.seed.to_string()),
        ])
    }


    fn fit_weighted(&self, train: &Dataset, dist: &[f64])
        -> Result<Self::Model>
    {
        self.validate()?;
        let rows = checker::check_sample(train)?;
        checker::check_distribution(train, dist)?;
        checker::check_mass(dist, &rows)?;
        let n_classes = train.n_classes()?;
        let n_sample = train.shape().0;

        let sampler = WeightedIndex::new(rows.iter().map(|&i| dist[i]))
            .map_err(|e| Error::InsufficientData(e.to_string()))?;

        let learner = self.tree_learner(train.schema().feature_indices().len());

        let trees = (0..self.n_trees)
            .into_par_iter()
            .map(|t| {
                let mut rng = StdRng::seed_from_u64(
                    self.seed.wrapping_add(t as u64)
                );

                // Bootstrap: draw `rows.len()` examples with replacement.
                let mut counts = vec![0.0; n_sample];
                for _ in 0..rows.len() {
                    counts[rows[sampler.sample(&mut rng)]] += 1.0;
                }
                learner.grow(train, &counts, &mut rng)
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "random forest grown with {} trees, {} leaves in total",
            trees.len(),
            trees.iter().map(|t| t.n_leaves()).sum::<usize>()
        );

        Ok(ForestClassifier {
            schema: train.schema().clone(),
            n_classes,
            trees,
        })
    }
}


impl Classifier for ForestClassifier {
    fn schema(&self) -> &Schema {
        &self.schema
    }


    fn predict(&self, data: &Dataset, row: usize) -> usize {
        argmax(&self.probabilities(data, row))
    }


    fn distribution(&self, data: &Dataset, row: usize) -> Option<Vec<f64>> {
        Some(self.probabilities(data, row))
    }
}
