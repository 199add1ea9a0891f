//! Bed classification on top of the ONNX runtime.
//!
//! The model is a plain 3-class image classifier: input is one RGB frame as
//! an NHWC f32 tensor with pixel values scaled to [0, 1], output is one
//! activation per [`PlateState`]. Confidence is the maximum activation,
//! the label its position (first maximal index on ties).

use std::path::Path;

use tract_onnx::prelude::*;
use tracing::info;

use crate::camera::Frame;
use crate::error::ClassifierError;
use crate::labels::{PlateState, LABEL_COUNT};

type BedModel = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// One classifier verdict for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub state: PlateState,
    /// Maximum output activation, in [0, 1].
    pub confidence: f32,
}

/// Anything that can classify bed frames for the engine.
pub trait Classifier {
    fn classify(&mut self, frame: &Frame) -> Result<Classification, ClassifierError>;
}

/// Classifier backed by an ONNX model file.
#[derive(Debug)]
pub struct OnnxClassifier {
    model: BedModel,
    width: u32,
    height: u32,
}

impl OnnxClassifier {
    /// Load and optimize the model for the configured frame dimensions.
    pub fn load(path: &Path, width: u32, height: u32) -> Result<Self, ClassifierError> {
        let model = tract_onnx::onnx()
            .model_for_path(path)
            .map_err(|e| ClassifierError::ModelLoad(e.to_string()))?
            .with_input_fact(
                0,
                f32::fact([1, height as usize, width as usize, 3]).into(),
            )
            .map_err(|e| ClassifierError::ModelLoad(e.to_string()))?
            .into_optimized()
            .map_err(|e| ClassifierError::ModelLoad(e.to_string()))?
            .into_runnable()
            .map_err(|e| ClassifierError::ModelLoad(e.to_string()))?;

        info!("Loaded bed model from {:?}", path);
        Ok(Self {
            model,
            width,
            height,
        })
    }
}

impl Classifier for OnnxClassifier {
    fn classify(&mut self, frame: &Frame) -> Result<Classification, ClassifierError> {
        let (width, height) = (self.width as usize, self.height as usize);
        let input: Tensor =
            tract_ndarray::Array4::from_shape_fn((1, height, width, 3), |(_, y, x, c)| {
                f32::from(frame.image.get_pixel(x as u32, y as u32)[c]) / 255.0
            })
            .into();

        let outputs = self
            .model
            .run(tvec!(input.into()))
            .map_err(|e| ClassifierError::Inference(e.to_string()))?;
        let scores = outputs[0]
            .to_array_view::<f32>()
            .map_err(|e| ClassifierError::Inference(e.to_string()))?;
        let scores: Vec<f32> = scores.iter().copied().collect();

        classification_from_scores(&scores)
    }
}

/// Reduce raw model activations to a [`Classification`].
///
/// The output must be exactly as wide as the label set; a mismatched model
/// is rejected here rather than silently misread.
fn classification_from_scores(scores: &[f32]) -> Result<Classification, ClassifierError> {
    if scores.len() != LABEL_COUNT {
        return Err(ClassifierError::OutputShape {
            expected: LABEL_COUNT,
            actual: scores.len(),
        });
    }

    let (index, confidence) = scores
        .iter()
        .copied()
        .enumerate()
        .fold((0, scores[0]), |best, (i, v)| {
            if v > best.1 {
                (i, v)
            } else {
                best
            }
        });

    let state = PlateState::from_index(index).ok_or(ClassifierError::OutputShape {
        expected: LABEL_COUNT,
        actual: scores.len(),
    })?;

    Ok(Classification { state, confidence })
}
