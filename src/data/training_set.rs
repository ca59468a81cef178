use crate::error::{Error, Result};
use crate::math::matrix::Matrix;

/// One supervised sample: an input row vector paired with the reference
/// output row vector the network should produce for it.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingItem {
    input: Matrix,
    reference: Matrix,
}

impl TrainingItem {
    /// Pairs an input with its reference output. Both matrices must be row
    /// vectors.
    pub fn new(input: Matrix, reference: Matrix) -> Result<TrainingItem> {
        if input.rows() != 1 {
            return Err(Error::IllegalDimensions {
                rows: input.rows(),
                cols: input.cols(),
            });
        }
        if reference.rows() != 1 {
            return Err(Error::IllegalDimensions {
                rows: reference.rows(),
                cols: reference.cols(),
            });
        }
        Ok(TrainingItem { input, reference })
    }

    pub fn input(&self) -> &Matrix {
        &self.input
    }

    pub fn reference(&self) -> &Matrix {
        &self.reference
    }
}

/// Sample shapes shared by every training-data source, whichever access
/// style it offers.
pub trait TrainingShape {
    /// Width of every input vector in the set.
    fn nbr_inputs(&self) -> usize;

    /// Width of every reference vector in the set.
    fn nbr_outputs(&self) -> usize;
}

/// Supplies training samples in bulk.
///
/// The training loop shuffles and partitions samples itself, so a set only
/// hands over its full ordered collection once per epoch.
pub trait TrainingSet: TrainingShape {
    /// The full sample collection, in set order.
    fn training_data(&self) -> Vec<TrainingItem>;
}

/// Streams training samples one at a time.
pub trait TrainingCursor: TrainingShape {
    /// Hands out the next sample, starting a new sweep from the first sample
    /// once the previous sweep is exhausted.
    fn next_item(&mut self) -> &TrainingItem;

    /// True while the current sweep still has samples left.
    fn has_more(&self) -> bool;

    /// Rewinds to the first sample.
    fn reset(&mut self);
}

/// An in-memory training set over an owned sample vector, usable both in
/// bulk and through the cursor.
#[derive(Debug, Clone)]
pub struct VecTrainingSet {
    items: Vec<TrainingItem>,
    nbr_inputs: usize,
    nbr_outputs: usize,
    position: usize,
}

impl VecTrainingSet {
    /// Builds a set from at least one sample. The sample shapes are taken
    /// from the first item.
    pub fn new(items: Vec<TrainingItem>) -> Result<VecTrainingSet> {
        let first = items
            .first()
            .ok_or(Error::IllegalState("a training set requires at least one sample"))?;
        let nbr_inputs = first.input().cols();
        let nbr_outputs = first.reference().cols();
        Ok(VecTrainingSet {
            items,
            nbr_inputs,
            nbr_outputs,
            position: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl TrainingShape for VecTrainingSet {
    fn nbr_inputs(&self) -> usize {
        self.nbr_inputs
    }

    fn nbr_outputs(&self) -> usize {
        self.nbr_outputs
    }
}

impl TrainingSet for VecTrainingSet {
    fn training_data(&self) -> Vec<TrainingItem> {
        self.items.clone()
    }
}

impl TrainingCursor for VecTrainingSet {
    fn next_item(&mut self) -> &TrainingItem {
        if !self.has_more() {
            self.position = 0;
        }
        let position = self.position;
        self.position += 1;
        &self.items[position]
    }

    fn has_more(&self) -> bool {
        self.position < self.items.len()
    }

    fn reset(&mut self) {
        self.position = 0;
    }
}
