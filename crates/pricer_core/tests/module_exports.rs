//! Integration tests for module exports.
//!
//! Verify that all public modules and types are correctly exported
//! and accessible via absolute paths.

/// Test that grid functions are accessible via absolute path.
#[test]
fn test_grid_module_exports() {
    use pricer_core::math::grid::linspace;
    use pricer_core::math::grid::scaled_range;
    use pricer_core::math::grid::MIN_GRID_POINTS;

    assert_eq!(MIN_GRID_POINTS, 2);
    assert_eq!(linspace(0.0_f64, 1.0, 2).unwrap(), vec![0.0, 1.0]);
    assert_eq!(scaled_range(10.0_f64, 1.0, 2.0, 2).unwrap(), vec![10.0, 20.0]);
}

/// Test that math re-exports work.
#[test]
fn test_math_reexports() {
    use pricer_core::math::{linspace, scaled_range};

    let _ = linspace(0.0_f64, 1.0, 5).unwrap();
    let _ = scaled_range(100.0_f64, 0.7, 1.3, 50).unwrap();
}

/// Test that types module is accessible via absolute path.
#[test]
fn test_types_module_exports() {
    use pricer_core::types::error::{GridError, PricingError};
    use pricer_core::types::side::OptionSide;

    let side = OptionSide::Put;
    assert_eq!(side.to_string(), "put");

    let err: PricingError = GridError::InsufficientPoints { got: 0, need: 2 }.into();
    assert!(matches!(err, PricingError::InvalidGrid(_)));
}

/// Test that type re-exports work.
#[test]
fn test_types_reexports() {
    use pricer_core::types::{GridError, OptionSide, PricingError};

    let _ = OptionSide::Call;
    let _ = PricingError::InvalidInput("x".to_string());
    let _ = GridError::ReversedBounds {
        start: 1.0,
        end: 0.0,
    };
}

/// Test that OptionSide deserialises from lowercase names.
#[cfg(feature = "serde")]
#[test]
fn test_option_side_serde_names() {
    use pricer_core::types::OptionSide;
    use serde::de::value::Error as ValueError;
    use serde::de::IntoDeserializer;
    use serde::Deserialize;

    let side = OptionSide::deserialize(IntoDeserializer::<ValueError>::into_deserializer("put"));
    assert_eq!(side.unwrap(), OptionSide::Put);

    let side = OptionSide::deserialize(IntoDeserializer::<ValueError>::into_deserializer("Call"));
    assert!(side.is_err());
}
