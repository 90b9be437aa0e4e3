use proptest::collection::vec;
use proptest::prelude::*;
use shapes::TypeId;
use tests_integration::Universe;
use unapply::pattern::{Candidate, SINGLE_HOLE};
use unapply::{Applied, Capability, InstanceEnvironment, InstanceHead, single};

const HEADS: usize = 7;

/// Builds one of `Box a`, `Pair a b`, `Either a b`, `Tuple3 a b c`,
/// `OptionT f a`, `ReaderT f a b` or `IndexedState f a b c`.
fn applied(universe: &mut Universe, head: usize, generic: bool, arguments: &[usize]) -> TypeId {
    let Universe { int, string, unit, boxed, option, list, pair, either, .. } = *universe;
    let Universe { option_t, reader_t, indexed, .. } = *universe;

    let (head, higher, arity) = match head {
        0 => (boxed, false, 1),
        1 => (pair, false, 2),
        2 => (either, false, 2),
        3 => (universe.tuple(3), false, 3),
        4 => (option_t, true, 1),
        5 => (reader_t, true, 2),
        _ => (indexed, true, 3),
    };

    let generic = if generic { option } else { list };
    let proper = [int, string, unit];

    let prefix = higher.then_some(generic);
    let arguments = arguments.iter().take(arity).map(|&index| proper[index]);
    universe.apply(head, prefix.into_iter().chain(arguments).collect::<Vec<_>>())
}

fn candidates(universe: &Universe, applied: TypeId) -> Vec<Candidate> {
    SINGLE_HOLE.iter().filter_map(|pattern| pattern.candidate(&universe.storage, applied)).collect()
}

fn is_registered(mask: u16, index: usize) -> bool {
    mask & (1 << index) != 0
}

proptest! {
    #[test]
    fn test_highest_priority_instance_wins(
        head in 0..HEADS,
        generic in any::<bool>(),
        arguments in vec(0usize..3, 3),
        mask in any::<u16>(),
    ) {
        let mut universe = Universe::default();
        let applied = applied(&mut universe, head, generic, &arguments);

        let candidates = candidates(&universe, applied);
        prop_assert!(candidates.len() >= 2);
        prop_assert!(candidates.last().is_some_and(|candidate| candidate.form.is_constant()));

        let capability = Capability::new("Subject");
        let mut instances = InstanceEnvironment::default();
        for (index, candidate) in candidates.iter().enumerate() {
            if is_registered(mask, index) {
                let head = InstanceHead::new(capability.clone(), candidate.form.clone());
                instances.register(head, ());
            }
        }

        let expected = candidates
            .iter()
            .enumerate()
            .find(|&(index, _)| is_registered(mask, index))
            .map(|(_, candidate)| candidate.pattern);

        let resolved = single::resolve(&universe.storage, &instances, &capability, applied);
        let again = single::resolve(&universe.storage, &instances, &capability, applied);
        prop_assert_eq!(resolved.as_ref().ok().map(|resolved| resolved.pattern()), expected);
        prop_assert_eq!(resolved, again);
    }

    #[test]
    fn test_round_trip(
        head in 0..HEADS,
        generic in any::<bool>(),
        arguments in vec(0usize..3, 3),
        payload in any::<i64>(),
    ) {
        let mut universe = Universe::default();
        let applied = applied(&mut universe, head, generic, &arguments);
        let capability = Capability::new("Subject");

        for candidate in candidates(&universe, applied) {
            let mut instances = InstanceEnvironment::default();
            instances.register(InstanceHead::new(capability.clone(), candidate.form.clone()), ());

            let resolved =
                single::resolve(&universe.storage, &instances, &capability, applied).unwrap();
            prop_assert_eq!(resolved.pattern(), candidate.pattern);
            prop_assert_eq!(resolved.form(), &candidate.form);

            let residual = resolved.residual();
            prop_assert!(resolved.form().reconstructs(&universe.storage, &[residual], applied));

            let value = Applied::new(applied, payload);
            let decomposed = resolved.to_decomposed(value.clone()).unwrap();
            prop_assert_eq!(&*decomposed.residuals, [residual]);
            prop_assert_eq!(resolved.to_applied(decomposed).unwrap(), value);

            let viewed = resolved.apply(payload);
            prop_assert_eq!(resolved.to_applied(viewed).unwrap(), Applied::new(applied, payload));
        }
    }
}

#[test]
fn test_constructor_patterns_are_generated() {
    let mut universe = Universe::default();
    let mut seen = vec![];

    for head in 0..HEADS {
        for first in 0..3 {
            for second in 0..3 {
                let applied = applied(&mut universe, head, true, &[first, second, 0]);
                let patterns = candidates(&universe, applied).into_iter().map(|c| c.pattern);
                seen.extend(patterns);
            }
        }
    }

    let missing = SINGLE_HOLE
        .iter()
        .filter(|pattern| !seen.contains(pattern))
        .map(|pattern| pattern.to_string())
        .collect::<Vec<_>>();
    assert_eq!(missing, ["trailing-4", "trailing-5", "trailing-6", "trailing-7"]);
}
