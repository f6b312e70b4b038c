//! Conversion of detection results into stored face records.

use ftrack_detect::DetectedFace;
use ftrack_models::{BoundingBox, Face};

/// Map the faces of one detection response onto a stored image.
///
/// The age is the rounded mean of the service's estimate; the gender
/// string is carried verbatim.
pub fn faces_for_image(image_id: i64, detected: &[DetectedFace]) -> Vec<Face> {
    detected
        .iter()
        .map(|face| Face {
            id: 0,
            image_id,
            gender: face.demographics.gender.clone(),
            age: face.demographics.age.mean.round().max(0.0) as u32,
            bbox: BoundingBox {
                height: face.bbox.height,
                width: face.bbox.width,
                x: face.bbox.x,
                y: face.bbox.y,
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ftrack_detect::{AgeEstimate, Demographics, FaceBox};

    fn detected(gender: &str, mean: f64) -> DetectedFace {
        DetectedFace {
            demographics: Demographics {
                gender: gender.to_string(),
                age: AgeEstimate {
                    mean,
                    variance: 1.0,
                },
            },
            bbox: FaceBox {
                height: 10,
                width: 8,
                x: 1,
                y: 2,
            },
        }
    }

    #[test]
    fn test_age_is_rounded_mean() {
        let faces = faces_for_image(7, &[detected("male", 32.5), detected("female", 27.4)]);
        assert_eq!(faces[0].age, 33);
        assert_eq!(faces[1].age, 27);
        assert!(faces.iter().all(|f| f.image_id == 7));
    }

    #[test]
    fn test_gender_carried_verbatim() {
        let faces = faces_for_image(1, &[detected("nonbinary", 40.0)]);
        assert_eq!(faces[0].gender, "nonbinary");
    }
}
