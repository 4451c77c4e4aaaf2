use inplace_fn::space::*;
use inplace_fn::InplaceFunction;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Operation {
    Call(i64),
    Clone,
    Take,
    Swap,
}

proptest! {
    #[test]
    fn test_matches_bare_closure(k in any::<i64>(), scale in any::<i32>(), x in any::<i32>()) {
        let direct = move |x: i32| k.wrapping_add(i64::from(x).wrapping_mul(i64::from(scale)));
        let mut erased: InplaceFunction<fn(i32) -> i64, S2> = InplaceFunction::new(direct);

        prop_assert_eq!(erased.call(x), Ok(direct(x)));
    }

    #[test]
    fn test_widened_matches_original(captured in any::<[u16; 4]>(), index in 0usize..4) {
        let mut narrow: InplaceFunction<fn(usize) -> u16, S1> =
            InplaceFunction::new(move |i: usize| captured[i]);
        let mut cloned: InplaceFunction<fn(usize) -> u16, S4> = narrow.resize_cloned();
        let expected = narrow.call(index);
        let mut moved: InplaceFunction<fn(usize) -> u16, S8> = narrow.resize();

        prop_assert_eq!(expected, Ok(captured[index]));
        prop_assert_eq!(cloned.call(index), expected);
        prop_assert_eq!(moved.call(index), expected);
    }

    #[test]
    fn test_accumulators_stay_independent(ops in proptest::collection::vec(
        prop_oneof![
            any::<i64>().prop_map(Operation::Call),
            Just(Operation::Clone),
            Just(Operation::Take),
            Just(Operation::Swap),
        ],
        1..64
    )) {
        // model: the running total held by each slot, `None` when empty
        let mut model: [Option<i64>; 2] = [Some(0), None];
        let mut total = 0i64;
        let mut slots: [InplaceFunction<fn(i64) -> i64>; 2] = [
            InplaceFunction::new(move |x: i64| {
                total = total.wrapping_add(x);
                total
            }),
            InplaceFunction::empty(),
        ];

        for op in ops {
            match op {
                Operation::Call(x) => {
                    let expected = model[0].map(|t| t.wrapping_add(x));
                    model[0] = expected;
                    prop_assert_eq!(slots[0].call(x).ok(), expected);
                }
                Operation::Clone => {
                    model[1] = model[0];
                    let copy = slots[0].clone();
                    slots[1] = copy;
                }
                Operation::Take => {
                    model[1] = model[0].take();
                    let taken = slots[0].take();
                    slots[1] = taken;
                }
                Operation::Swap => {
                    model.swap(0, 1);
                    let [first, second] = &mut slots;
                    first.swap(second);
                }
            }

            prop_assert_eq!(slots[0].is_some(), model[0].is_some());
            prop_assert_eq!(slots[1].is_some(), model[1].is_some());
        }
    }
}
