//! Integration tests for module exports.
//!
//! Verify that the public modules and types are reachable via absolute paths.

/// Capability traits and helpers.
#[test]
fn test_traits_module_exports() {
    use tabulated_core::traits::math_function::MathFunction;
    use tabulated_core::traits::tabulated::{check_count, check_length_is_the_same, check_sorted};
    use tabulated_core::traits::{interpolate_linear, Insertable, Removable, TabulatedFunction, MIN_COUNT};

    struct Halve;

    impl MathFunction for Halve {
        fn apply(&self, x: f64) -> f64 {
            x / 2.0
        }
    }

    assert_eq!(Halve.apply(3.0), 1.5);
    assert_eq!(MIN_COUNT, 2);
    assert!(check_count(2).is_ok());
    assert!(check_length_is_the_same(&[0.0], &[1.0]).is_ok());
    assert!(check_sorted(&[0.0, 0.0, 1.0]).is_ok());
    assert_eq!(interpolate_linear(0.5, 0.0, 1.0, 0.0, 10.0), 5.0);

    fn assert_mutable<T: TabulatedFunction + Insertable + Removable>() {}
    assert_mutable::<tabulated_core::functions::ArrayTabulatedFunction>();
    assert_mutable::<tabulated_core::functions::LinkedListTabulatedFunction>();
    assert_mutable::<tabulated_core::functions::TabulatedFunctionEnum>();
}

/// Function types.
#[test]
fn test_functions_module_exports() {
    use tabulated_core::functions::composite::CompositeFunction;
    use tabulated_core::functions::simple::{ConstantFunction, IdentityFunction, SqrFunction, UnitFunction, ZeroFunction};
    use tabulated_core::functions::{ArrayTabulatedFunction, LinkedListTabulatedFunction, TabulatedFunctionEnum};
    use tabulated_core::traits::MathFunction;

    let composite = CompositeFunction::new(IdentityFunction, SqrFunction);
    assert_eq!(composite.apply(-3.0), 9.0);
    assert_eq!(ConstantFunction::new(2.0).apply(0.0), 2.0);
    assert_eq!(ZeroFunction.apply(1.0) + UnitFunction.apply(1.0), 1.0);

    let array = ArrayTabulatedFunction::new(&[0.0, 1.0], &[0.0, 1.0]).unwrap();
    let list = LinkedListTabulatedFunction::new(&[0.0, 1.0], &[0.0, 1.0]).unwrap();
    let _: TabulatedFunctionEnum = array.into();
    let _: TabulatedFunctionEnum = list.into();
}

/// Factories, operators, concurrency and I/O.
#[test]
fn test_service_module_exports() {
    use tabulated_core::concurrent::tasks::{Discipline, MultiplyingTask, ReadTask, WriteTask};
    use tabulated_core::concurrent::{run_doubling_harness, SynchronizedTabulatedFunction};
    use tabulated_core::factory::{
        ArrayTabulatedFunctionFactory, LinkedListTabulatedFunctionFactory, StorageKind, TabulatedFunctionFactory,
    };
    use tabulated_core::io::{read_binary, read_text, write_binary, write_text, DecimalSeparator};
    use tabulated_core::operators::{
        as_points, SteppingDifferentialOperator, SteppingScheme, TabulatedDifferentialOperator,
        TabulatedFunctionOperationService,
    };
    use tabulated_core::types::{FormatError, Point, TabulatedError};

    let f = ArrayTabulatedFunctionFactory.create(&[0.0, 1.0], &[0.0, 2.0]).unwrap();
    assert_eq!(as_points(&f), vec![Point::new(0.0, 0.0), Point::new(1.0, 2.0)]);
    assert_eq!(LinkedListTabulatedFunctionFactory.kind(), StorageKind::LinkedList);

    let _ = TabulatedDifferentialOperator::default();
    let _ = TabulatedFunctionOperationService::default();
    assert!(SteppingDifferentialOperator::new(SteppingScheme::Left, 0.0).is_err());

    let shared = std::sync::Arc::new(SynchronizedTabulatedFunction::new(f));
    let _ = MultiplyingTask::new(shared.clone());
    let _ = WriteTask::new(shared.clone(), 0.0);
    let _ = ReadTask::new(shared.clone());
    run_doubling_harness(&shared, 1, Discipline::Atomic).unwrap();

    let mut text = Vec::new();
    write_text(&mut text, &*shared).unwrap();
    let mut binary = Vec::new();
    write_binary(&mut binary, &*shared).unwrap();
    let from_text = read_text(text.as_slice(), &StorageKind::Array, DecimalSeparator::Dot).unwrap();
    let from_binary = read_binary(&mut binary.as_slice(), &StorageKind::Array).unwrap();
    assert_eq!(from_text, from_binary);

    let _: Option<FormatError> = None;
    let _: Option<TabulatedError> = None;
}
