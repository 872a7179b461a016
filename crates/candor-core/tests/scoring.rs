//! End-to-end properties of the scoring pipeline through the public API.

use candor_core::{
    band_for_score, FaceBox, FaceLandmarks, FaceSample, Photo, PixelFrame, Point, ScoreError,
    Scorer, Tunables,
};

fn base_landmarks() -> FaceLandmarks {
    FaceLandmarks {
        positions: vec![Point::new(200.0, 210.0)],
        jaw_outline: vec![
            Point::new(110.0, 160.0),
            Point::new(118.0, 230.0),
            Point::new(150.0, 285.0),
            Point::new(200.0, 305.0),
            Point::new(250.0, 285.0),
            Point::new(282.0, 230.0),
            Point::new(290.0, 160.0),
        ],
        left_eye: vec![
            Point::new(145.0, 175.0),
            Point::new(172.0, 170.0),
            Point::new(172.0, 184.0),
            Point::new(145.0, 188.0),
        ],
        right_eye: vec![
            Point::new(228.0, 170.0),
            Point::new(255.0, 175.0),
            Point::new(255.0, 188.0),
            Point::new(228.0, 184.0),
        ],
        nose: vec![
            Point::new(200.0, 185.0),
            Point::new(188.0, 232.0),
            Point::new(212.0, 232.0),
        ],
        mouth: vec![
            Point::new(172.0, 258.0),
            Point::new(228.0, 258.0),
            Point::new(200.0, 274.0),
        ],
    }
}

fn photo(landmarks: FaceLandmarks, embedding: Option<Vec<f32>>) -> Photo {
    Photo {
        frame: PixelFrame::from_rgba(12, 12, vec![150; 12 * 12 * 4]).unwrap(),
        face: FaceSample {
            landmarks,
            bounds: FaceBox::new(100.0, 140.0, 200.0, 180.0),
            embedding,
        },
    }
}

/// Move the jaw inward and enlarge both eyes: the classic edit.
fn retouched_landmarks() -> FaceLandmarks {
    let mut lm = base_landmarks();
    for p in lm.jaw_outline.iter_mut() {
        p.x += (200.0 - p.x) * 0.12;
    }
    for eye in [&mut lm.left_eye, &mut lm.right_eye] {
        let cx = eye.iter().map(|p| p.x).sum::<f32>() / eye.len() as f32;
        let cy = eye.iter().map(|p| p.y).sum::<f32>() / eye.len() as f32;
        for p in eye.iter_mut() {
            p.x = cx + (p.x - cx) * 1.4;
            p.y = cy + (p.y - cy) * 1.4;
        }
    }
    lm
}

#[test]
fn same_seed_same_inputs_identical_result() {
    let reference = photo(base_landmarks(), Some(vec![0.2; 128]));
    let candidate = photo(retouched_landmarks(), Some(vec![0.2; 128]));

    let a = Scorer::with_seed(Tunables::default(), 99)
        .score(&reference, &candidate)
        .unwrap();
    let b = Scorer::with_seed(Tunables::default(), 99)
        .score(&reference, &candidate)
        .unwrap();

    assert_eq!(a, b);
}

#[test]
fn identical_inputs_score_equals_filter_bonus() {
    let p = photo(base_landmarks(), Some(vec![0.5; 64]));
    let mut scorer = Scorer::with_seed(Tunables::default(), 3);
    let result = scorer.score(&p, &p).unwrap();

    assert_eq!(result.score, result.filter_bonus);
    assert!(result.filter_bonus <= 5);
}

#[test]
fn retouching_raises_the_score() {
    let reference = photo(base_landmarks(), None);
    let candidate = photo(retouched_landmarks(), None);
    let mut scorer = Scorer::with_seed(Tunables::default(), 3);

    let honest = scorer.score(&reference, &reference).unwrap();
    let edited = scorer.score(&reference, &candidate).unwrap();

    assert!(edited.score > honest.score);
    assert!(edited.score <= 100);
}

#[test]
fn different_person_pair_is_pinned_with_no_bonus() {
    let reference = photo(base_landmarks(), Some(vec![0.0; 128]));
    let mut embedding = vec![0.0; 128];
    embedding[0] = 0.55;
    let candidate = photo(base_landmarks(), Some(embedding));

    let mut scorer = Scorer::with_seed(Tunables::default(), 3);
    let result = scorer.score(&reference, &candidate).unwrap();

    assert_eq!(result.score, 90);
    assert_eq!(result.filter_bonus, 0);
}

#[test]
fn missing_embeddings_fall_back_to_geometry() {
    let reference = photo(base_landmarks(), None);
    let candidate = photo(retouched_landmarks(), None);

    let mut scorer = Scorer::with_seed(Tunables::default(), 3);
    let result = scorer.score(&reference, &candidate).unwrap();
    assert!(result.score > 0 && result.score <= 100);
}

#[test]
fn jaw_topology_mismatch_still_yields_a_complete_result() {
    let reference = photo(base_landmarks(), None);
    let mut lm = base_landmarks();
    lm.jaw_outline.pop();
    let candidate = photo(lm, None);

    let mut scorer = Scorer::with_seed(Tunables::default(), 3);
    let result = scorer.score(&reference, &candidate).unwrap();
    // Contour collapsed to maximal dissimilarity but the call succeeded
    assert!(result.score > 0);
}

#[test]
fn empty_region_is_rejected_before_scoring() {
    let reference = photo(base_landmarks(), None);
    let mut lm = base_landmarks();
    lm.mouth.clear();
    let candidate = photo(lm, None);

    let mut scorer = Scorer::with_seed(Tunables::default(), 3);
    let err = scorer.score(&reference, &candidate).unwrap_err();
    assert_eq!(err, ScoreError::EmptyLandmarks { region: "mouth" });
}

#[test]
fn message_belongs_to_the_scored_band() {
    let reference = photo(base_landmarks(), None);
    let candidate = photo(retouched_landmarks(), None);

    for seed in 0..16 {
        let mut scorer = Scorer::with_seed(Tunables::default(), seed);
        let result = scorer.score(&reference, &candidate).unwrap();
        let band = band_for_score(result.score);
        assert!(band.messages.contains(&result.message));
        assert_eq!(result.grade, band.grade);
    }
}
