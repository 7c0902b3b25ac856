use crate::image_classifier::interface::BoundingBox;
use tract_onnx::prelude::tract_ndarray::{ArrayView3, Axis};

/// A raw detection in model input coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub class_index: usize,
    pub confidence: f32,
    pub bounding_box: BoundingBox,
}

/// YOLOv8 layout: `[1, 4 + classes, boxes]`, no objectness column.
pub fn decode_v8(output: ArrayView3<f32>, min_confidence: f32) -> Vec<Candidate> {
    let rows = output.index_axis(Axis(0), 0);
    let (features, boxes) = (rows.shape()[0], rows.shape()[1]);
    if features <= 4 {
        return vec![];
    }

    let mut candidates = Vec::new();
    for i in 0..boxes {
        let (class_index, confidence) = (4..features)
            .map(|j| (j - 4, rows[[j, i]]))
            .fold((0, f32::MIN), |best, next| if next.1 > best.1 { next } else { best });
        if confidence < min_confidence {
            continue;
        }
        candidates.push(Candidate {
            class_index,
            confidence,
            bounding_box: BoundingBox::from_center(
                rows[[0, i]],
                rows[[1, i]],
                rows[[2, i]],
                rows[[3, i]],
            ),
        });
    }
    candidates
}

/// YOLOv5 layout: `[1, boxes, 5 + classes]` with an objectness column.
pub fn decode_v5(output: ArrayView3<f32>, min_confidence: f32) -> Vec<Candidate> {
    let rows = output.index_axis(Axis(0), 0);
    let (boxes, features) = (rows.shape()[0], rows.shape()[1]);
    if features <= 5 {
        return vec![];
    }

    let mut candidates = Vec::new();
    for i in 0..boxes {
        let objectness = rows[[i, 4]];
        if objectness < min_confidence {
            continue;
        }
        let (class_index, class_probability) = (5..features)
            .map(|j| (j - 5, rows[[i, j]]))
            .fold((0, f32::MIN), |best, next| if next.1 > best.1 { next } else { best });
        let confidence = objectness * class_probability;
        if confidence < min_confidence {
            continue;
        }
        candidates.push(Candidate {
            class_index,
            confidence,
            bounding_box: BoundingBox::from_center(
                rows[[i, 0]],
                rows[[i, 1]],
                rows[[i, 2]],
                rows[[i, 3]],
            ),
        });
    }
    candidates
}

/// Greedy per-class non-maximum suppression, strongest first.
pub fn non_max_suppression(mut candidates: Vec<Candidate>, iou_threshold: f32) -> Vec<Candidate> {
    candidates.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

    let mut kept: Vec<Candidate> = Vec::new();
    for candidate in candidates {
        let overlaps = kept.iter().any(|k| {
            k.class_index == candidate.class_index
                && k.bounding_box.iou(&candidate.bounding_box) > iou_threshold
        });
        if !overlaps {
            kept.push(candidate);
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use tract_onnx::prelude::tract_ndarray::Array3;

    #[test]
    fn test_decode_v8_picks_best_class() {
        // 2 classes, 3 boxes
        let mut output = Array3::<f32>::zeros((1, 6, 3));
        for (i, (cx, s0, s1)) in [(50.0, 0.9, 0.1), (60.0, 0.2, 0.7), (70.0, 0.1, 0.1)]
            .into_iter()
            .enumerate()
        {
            output[[0, 0, i]] = cx;
            output[[0, 1, i]] = 40.0;
            output[[0, 2, i]] = 20.0;
            output[[0, 3, i]] = 10.0;
            output[[0, 4, i]] = s0;
            output[[0, 5, i]] = s1;
        }

        let candidates = decode_v8(output.view(), 0.25);

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].class_index, 0);
        assert_eq!(candidates[0].bounding_box.x_min, 40.0);
        assert_eq!(candidates[0].bounding_box.y_max, 45.0);
        assert_eq!(candidates[1].class_index, 1);
        assert!((candidates[1].confidence - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_decode_v5_multiplies_objectness() {
        let mut output = Array3::<f32>::zeros((1, 2, 7));
        output[[0, 0, 4]] = 0.8;
        output[[0, 0, 6]] = 0.5;
        output[[0, 1, 4]] = 0.1;
        output[[0, 1, 5]] = 1.0;

        let candidates = decode_v5(output.view(), 0.25);

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].class_index, 1);
        assert!((candidates[0].confidence - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_nms_keeps_strongest_of_overlapping_boxes() {
        let candidate = |class_index, confidence, cx| Candidate {
            class_index,
            confidence,
            bounding_box: BoundingBox::from_center(cx, 50.0, 20.0, 20.0),
        };

        let kept = non_max_suppression(
            vec![
                candidate(0, 0.6, 51.0),
                candidate(0, 0.9, 50.0),
                candidate(1, 0.5, 50.0),
                candidate(0, 0.4, 150.0),
            ],
            0.45,
        );

        let confidences: Vec<f32> = kept.iter().map(|c| c.confidence).collect();
        assert_eq!(confidences, vec![0.9, 0.5, 0.4]);
    }
}
