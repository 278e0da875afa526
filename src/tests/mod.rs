pub mod test_estimator;
