//! Property-based checks that every layer follows the same laws.
//!
//! The async layers are checked against the synchronous ones: running a
//! lifted computation must give exactly what the synchronous combinator
//! gives, log included.

use nomad::monoid::Sum;
use nomad::{AsyncNomad, Either, Nomad, NomadEither, Semigroup, TaskNomad, TaskNomadEither};
use proptest::prelude::*;

type Ne = NomadEither<u8, String, i32>;

fn effects() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..6)
}

fn either() -> impl Strategy<Value = Either<String, i32>> {
    prop_oneof![
        "[a-z]{1,4}".prop_map(Either::left),
        any::<i32>().prop_map(Either::right),
    ]
}

fn nomad_either() -> impl Strategy<Value = Ne> {
    (effects(), either()).prop_map(|(effects, either)| {
        NomadEither::from_either(either).effect_many(effects)
    })
}

fn step(x: i32) -> Ne {
    if x % 3 == 0 {
        NomadEither::left(format!("{} divisible by 3", x)).effect(3)
    } else {
        NomadEither::right(x.wrapping_mul(2)).effect(2)
    }
}

fn tne(ne: &Ne) -> TaskNomadEither<u8, String, i32> {
    TaskNomadEither::from_nomad_either(ne.clone())
}

fn an(ne: &Ne) -> AsyncNomad<(), u8, String, i32> {
    AsyncNomad::from_nomad_either(ne.clone())
}

proptest! {
    #[test]
    fn prop_nomad_left_identity(x in any::<i32>(), log in effects()) {
        let f = |v: i32| Nomad::pure(v.wrapping_add(1)).effect_many(log.clone());
        prop_assert_eq!(Nomad::<u8, _>::pure(x).chain(f), f(x));
    }

    #[test]
    fn prop_nomad_right_identity(log in effects(), x in any::<i32>()) {
        let n = Nomad::new(log, x);
        prop_assert_eq!(n.clone().chain(Nomad::pure), n);
    }

    #[test]
    fn prop_nomad_semigroup_associative(
        a in (effects(), any::<i32>()),
        b in (effects(), any::<i32>()),
        c in (effects(), any::<i32>()),
    ) {
        let wrap = |(log, v): (Vec<u8>, i32)| Nomad::new(log, Sum(v as i64));
        let (a, b, c) = (wrap(a), wrap(b), wrap(c));
        prop_assert_eq!(
            a.clone().combine(b.clone()).combine(c.clone()),
            a.combine(b.combine(c))
        );
    }

    #[test]
    fn prop_nomad_either_chain_associative(ne in nomad_either()) {
        let g = |x: i32| NomadEither::right(x.wrapping_sub(5)).effect(7);
        prop_assert_eq!(
            ne.clone().chain(step).chain(g),
            ne.chain(move |x| step(x).chain(g))
        );
    }

    #[test]
    fn prop_effects_only_grow_at_the_end(ne in nomad_either(), extra in effects()) {
        let before = ne.effects().to_vec();
        let after = ne.effect_many(extra.clone());
        let mut expected = before;
        expected.extend(extra);
        prop_assert_eq!(after.effects(), &expected[..]);
    }

    #[test]
    fn prop_task_nomad_either_matches_sync_chain(ne in nomad_either()) {
        let sync = ne.clone().chain(step);
        let lifted = tne(&ne).chain(|x| TaskNomadEither::from_nomad_either(step(x)));
        prop_assert_eq!(tokio_test::block_on(lifted.run()), sync);
    }

    #[test]
    fn prop_task_nomad_either_matches_sync_ap(a in nomad_either(), b in nomad_either()) {
        let f = a.clone().map(|x| move |y: i32| x.wrapping_add(y));
        let sync = f.clone().ap(b.clone());
        let lifted = tne(&a).map(|x| move |y: i32| x.wrapping_add(y)).ap(tne(&b));
        prop_assert_eq!(tokio_test::block_on(lifted.run()), sync);
    }

    #[test]
    fn prop_async_nomad_matches_sync_alt(a in nomad_either(), b in nomad_either()) {
        let b2 = b.clone();
        let sync = a.clone().alt(move || b2.clone());
        let lifted = an(&a).alt(move || an(&b));
        prop_assert_eq!(tokio_test::block_on(lifted.execute(())), sync);
    }

    #[test]
    fn prop_async_nomad_matches_sync_first_success(a in nomad_either(), b in nomad_either()) {
        let wrap = |ne: Ne| ne.map(|x| Sum(x as i64));
        let sync = wrap(a.clone()).combine_first_success(wrap(b.clone()));
        let lifted = an(&a)
            .map(|x| Sum(x as i64))
            .combine_first_success(an(&b).map(|x| Sum(x as i64)));
        prop_assert_eq!(tokio_test::block_on(lifted.execute(())), sync);
    }

    #[test]
    fn prop_task_nomad_either_applicative_identity(ne in nomad_either()) {
        let lifted = TaskNomadEither::right(|x: i32| x).ap(tne(&ne));
        prop_assert_eq!(tokio_test::block_on(lifted.run()), ne);
    }

    #[test]
    fn prop_async_nomad_applicative_homomorphism(a in any::<i32>()) {
        let f = |x: i32| x.wrapping_sub(4);
        let lifted = AsyncNomad::<(), u8, String, _>::right(f).ap(AsyncNomad::right(a));
        prop_assert_eq!(tokio_test::block_on(lifted.execute(())), NomadEither::right(f(a)));
    }

    #[test]
    fn prop_async_nomad_failed_argument_keeps_log_order(ne in nomad_either(), l in "[a-z]{1,4}") {
        let failed = NomadEither::<u8, String, i32>::left(l.clone()).effect(1);
        let lifted = an(&ne).map(|x| move |y: i32| x.wrapping_add(y)).ap(an(&failed));
        let result = tokio_test::block_on(lifted.execute(()));
        let mut expected = vec![1];
        expected.extend_from_slice(ne.effects());
        prop_assert_eq!(result.effects(), &expected[..]);
        prop_assert!(result.is_left());
    }

    #[test]
    fn prop_task_nomad_functor_identity(log in effects(), x in any::<i32>()) {
        let task = TaskNomad::from_nomad(Nomad::new(log.clone(), x));
        prop_assert_eq!(tokio_test::block_on(task.map(|v| v).run()), Nomad::new(log, x));
    }

    #[test]
    fn prop_swap_is_involution_on_every_layer(ne in nomad_either()) {
        prop_assert_eq!(ne.clone().swap().swap(), ne.clone());
        prop_assert_eq!(tokio_test::block_on(an(&ne).swap().swap().execute(())), ne);
    }
}
