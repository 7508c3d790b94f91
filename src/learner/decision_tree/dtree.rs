use log::debug;
use rand::prelude::*;
use rand::rngs::StdRng;
use rand::seq::index;
use serde::{Serialize, Deserialize};

use crate::{Dataset, Learner, Result};
use crate::common::checker;

use super::{
    node::*,
    criterion::*,
    split_rule::*,
    dtree_classifier::DTreeClassifier,
};


/// Smallest total weight a child may carry.
const DEFAULT_MIN_LEAF_WEIGHT: f64 = 1.0;


/// Generates a [`DTreeClassifier`] for a given distribution
/// over examples.
///
/// Weights are rescaled so that the uniform distribution counts
/// each labeled example once; `min_leaf_weight` is expressed in
/// that unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DTree {
    criterion: Criterion,
    max_depth: Option<usize>,
    min_leaf_weight: f64,
    max_features: Option<usize>,
}


impl Default for DTree {
    fn default() -> Self {
        Self {
            criterion: Criterion::default(),
            max_depth: None,
            min_leaf_weight: DEFAULT_MIN_LEAF_WEIGHT,
            max_features: None,
        }
    }
}


impl DTree {
    /// Initialize [`DTree`].
    /// By default the tree grows until its leaves are pure.
    #[inline]
    pub fn init() -> Self {
        Self::default()
    }


    /// Specify the maximal depth of the tree.
    pub fn max_depth(mut self, depth: usize) -> Self {
        assert!(depth > 0);
        self.max_depth = Some(depth);
        self
    }


    /// Set criterion for node splitting.
    /// See [`Criterion`].
    #[inline]
    pub fn criterion(mut self, criterion: Criterion) -> Self {
        self.criterion = criterion;
        self
    }


    /// Specify the minimal weight of a leaf.
    pub fn min_leaf_weight(mut self, weight: f64) -> Self {
        assert!(weight >= 0.0);
        self.min_leaf_weight = weight;
        self
    }


    /// Specify the number of randomly chosen candidate attributes
    /// per node. By default every attribute is a candidate.
    pub fn max_features(mut self, n: usize) -> Self {
        assert!(n > 0);
        self.max_features = Some(n);
        self
    }


    /// Grow a tree on `train` where `weights[i]` is the (count-scaled)
    /// weight of example `i`. Examples without label or weight are ignored.
    pub(crate) fn grow<R: Rng>(
        &self,
        train: &Dataset,
        weights: &[f64],
        rng: &mut R,
    ) -> Result<Node>
    {
        let n_classes = train.n_classes()?;
        let rows = train.labeled_rows()?
            .into_iter()
            .filter(|&i| weights[i] > 0.0)
            .filter_map(|i| train.label(i).map(|y| (i, y, weights[i])))
            .collect::<Vec<_>>();

        let grower = Grower {
            data: train,
            features: train.schema().feature_indices(),
            n_classes,
            criterion: self.criterion,
            min_leaf: self.min_leaf_weight,
            max_features: self.max_features,
        };
        Ok(grower.full_tree(rows, self.max_depth, rng))
    }
}


impl Learner for DTree {
    type Model = DTreeClassifier;


    fn name(&self) -> &str {
        "DecisionTree"
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        let depth = self.max_depth
            .map_or("Unlimited".to_string(), |d| d.to_string());
        Some(vec![
            ("Criterion", self.criterion.to_string()),
            ("Max. depth", depth),
            ("Min. leaf weight", format!("{}", self.min_leaf_weight)),
        ])
    }


    fn fit_weighted(&self, train: &Dataset, dist: &[f64])
        -> Result<Self::Model>
    {
        let rows = checker::check_sample(train)?;
        checker::check_distribution(train, dist)?;
        let mass = checker::check_mass(dist, &rows)?;

        let scale = rows.len() as f64 / mass;
        let weights = dist.iter().map(|d| d * scale).collect::<Vec<_>>();

        let mut rng = StdRng::seed_from_u64(0);
        let root = self.grow(train, &weights, &mut rng)?;
        debug!(
            "decision tree grown with {} leaves, depth {}",
            root.n_leaves(),
            root.depth()
        );

        Ok(DTreeClassifier::new(train.schema().clone(), root))
    }
}


/// The fixed context of one tree growth.
struct Grower<'a> {
    data: &'a Dataset,
    features: Vec<usize>,
    n_classes: usize,
    criterion: Criterion,
    min_leaf: f64,
    max_features: Option<usize>,
}


impl Grower<'_> {
    /// Construct a binary tree over `rows`,
    /// each entry being `(row, label, weight)`.
    fn full_tree<R: Rng>(
        &self,
        rows: Vec<(usize, usize, f64)>,
        depth: Option<usize>,
        rng: &mut R,
    ) -> Node
    {
        let mut counts = vec![0.0; self.n_classes];
        for &(_, y, w) in &rows {
            counts[y] += w;
        }

        let total = counts.iter().sum::<f64>();
        let pure = counts.iter().filter(|&&c| c > 0.0).count() <= 1;
        if pure || depth == Some(0) || total < 2.0 * self.min_leaf {
            return Node::leaf(counts);
        }

        // Find the best split among the candidate attributes.
        let parent = self.criterion.impurity(&counts);
        let best = self.candidates(rng)
            .into_iter()
            .filter_map(|attr| {
                self.criterion.best_split(
                    self.data, attr, &rows, self.n_classes, self.min_leaf
                )
            })
            .fold(None, |best: Option<(Splitter, f64)>, (rule, score)| {
                match best {
                    Some((_, s)) if s <= score => best,
                    _ => Some((rule, score)),
                }
            });

        let rule = match best {
            Some((rule, score)) if score < parent - 1e-12 => rule,
            _ => return Node::leaf(counts),
        };

        // Split the rows for left/right childrens
        let (lrows, rrows): (Vec<_>, Vec<_>) = rows.into_iter()
            .partition(|&(i, _, _)| rule.split(self.data, i) == LR::Left);

        // If the split has no meaning, construct a leaf node.
        if lrows.is_empty() || rrows.is_empty() {
            return Node::leaf(counts);
        }

        let depth = depth.map(|d| d - 1);
        let left = self.full_tree(lrows, depth, rng);
        let right = self.full_tree(rrows, depth, rng);
        Node::branch(rule, left, right)
    }


    /// Candidate attributes for one node, in ascending order.
    fn candidates<R: Rng>(&self, rng: &mut R) -> Vec<usize> {
        let n = self.features.len();
        match self.max_features {
            Some(k) if k < n => {
                let mut picked = index::sample(rng, n, k)
                    .into_iter()
                    .map(|j| self.features[j])
                    .collect::<Vec<_>>();
                picked.sort_unstable();
                picked
            },
            _ => self.features.clone(),
        }
    }
}
