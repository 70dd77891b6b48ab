use ndarray::array;
use crate::activations::Activation;

#[test]
fn test_relu_activation() {
    let mut input = array![[-1.0, 0.0, 1.0, 2.0]];
    Activation::Relu.apply_batch(&mut input);
    assert_eq!(input, array![[0.0, 0.0, 1.0, 2.0]]);
}

#[test]
fn test_sigmoid_activation() {
    let mut input = array![[0.0]];
    Activation::Sigmoid.apply_batch(&mut input);
    assert!((input[[0, 0]] - 0.5).abs() < 1e-6);
}

#[test]
fn test_tanh_activation() {
    let mut input = array![[0.0, 100.0]];
    Activation::Tanh.apply_batch(&mut input);
    assert_eq!(input[[0, 0]], 0.0);
    assert!((input[[0, 1]] - 1.0).abs() < 1e-6);
}

#[test]
fn test_derivatives() {
    let pre = array![[-1.0, 0.0, 2.0]];
    assert_eq!(Activation::Relu.derivative_batch(pre.view()), array![[0.0, 0.0, 1.0]]);
    assert_eq!(Activation::Linear.derivative_batch(pre.view()), array![[1.0, 1.0, 1.0]]);

    let sigmoid = Activation::Sigmoid.derivative_batch(array![[0.0]].view());
    assert!((sigmoid[[0, 0]] - 0.25).abs() < 1e-6);

    let tanh = Activation::Tanh.derivative_batch(array![[0.0]].view());
    assert!((tanh[[0, 0]] - 1.0).abs() < 1e-6);
}

#[test]
fn test_activation_serde_names() {
    let json = serde_json::to_string(&Activation::Tanh).unwrap();
    assert_eq!(json, "\"tanh\"");
    let parsed: Activation = serde_json::from_str("\"linear\"").unwrap();
    assert_eq!(parsed, Activation::Linear);
}
