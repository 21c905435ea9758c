use super::*;

#[test]
fn zeros_has_requested_shape() {
    let map = FeatureMap::zeros(3, 4, 5);
    assert_eq!(map.channels(), 3);
    assert_eq!(map.rows(), 4);
    assert_eq!(map.cols(), 5);
    assert_eq!(map.data().len(), 60);
    assert!(map.data().iter().all(|&v| v == 0.0));
}

#[test]
fn from_data_rejects_shape_mismatch() {
    let err = FeatureMap::from_data(2, 2, 2, vec![0.0; 7]).unwrap_err();
    assert!(err.to_string().contains("7 values for shape 2x2x2"));
    assert!(FeatureMap::from_data(2, 2, 2, vec![0.0; 8]).is_ok());
}

#[test]
fn set_and_get_are_channel_major() {
    let mut map = FeatureMap::zeros(2, 2, 3);
    map.set(1, 0, 2, 7.5);
    assert_eq!(map.get(1, 0, 2), 7.5);
    // Channel 1 starts after the 6 values of channel 0.
    assert_eq!(map.data()[6 + 2], 7.5);
}

#[test]
#[should_panic]
fn out_of_bounds_get_panics() {
    let map = FeatureMap::zeros(1, 1, 1);
    let _ = map.get(0, 0, 1);
}
