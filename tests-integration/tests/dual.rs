use shapes::{Form, Hole, Template};
use tests_integration::{Recording, Universe};
use unapply::{
    Applied, Capability, ErrorCrumb, ErrorKind, InstanceEnvironment, InstanceHead, Pattern, dual,
};

fn binary_form(universe: &mut Universe, head: Template) -> Form {
    let body = Template::application_all(
        head,
        [Template::Hole(Hole::FIRST), Template::Hole(Hole::SECOND)],
    );
    Form::new(&mut universe.storage, 2, body).unwrap()
}

#[test]
fn test_binary_both() {
    let mut universe = Universe::default();
    let Universe { either, int, string, .. } = universe;
    let applied = universe.apply(either, [int, string]);

    let bifunctor = Capability::new("Bifunctor");
    let form = binary_form(&mut universe, Template::Fixed(either));

    let mut instances = InstanceEnvironment::default();
    instances.register(InstanceHead::new(Capability::clone(&bifunctor), form), "either");

    let resolved = dual::resolve(&universe.storage, &instances, &bifunctor, applied).unwrap();
    assert_eq!(resolved.pattern(), Pattern::BinaryBoth);
    assert_eq!(resolved.first_residual(), int);
    assert_eq!(resolved.second_residual(), string);
    assert_eq!(resolved.applied(), applied);
}

#[test]
fn test_constructor_binary_both() {
    let mut universe = Universe::default();
    let Universe { reader_t, option, int, string, .. } = universe;
    let applied = universe.apply(reader_t, [option, int, string]);

    let profunctor = Capability::new("Profunctor");
    let head = universe.apply(reader_t, [option]);
    let form = binary_form(&mut universe, Template::Fixed(head));

    let mut instances = InstanceEnvironment::default();
    instances.register(InstanceHead::new(Capability::clone(&profunctor), form), ());

    let lookup = Recording::new(&universe.storage, &instances);
    let resolved = dual::resolve(&universe.storage, &lookup, &profunctor, applied).unwrap();

    assert_eq!(resolved.pattern(), Pattern::ConstructorBinaryBoth);
    assert_eq!(resolved.residuals(), (int, string));
    insta::assert_snapshot!(lookup.report(), @r"Profunctor (\a b -> ReaderT Option a b): found");
}

#[test]
fn test_no_vary_one_of_three() {
    let mut universe = Universe::default();
    let Universe { int, string, unit, .. } = universe;
    let tuple = universe.tuple(3);
    let applied = universe.apply(tuple, [int, string, unit]);

    let bifunctor = Capability::new("Bifunctor");
    let instances = InstanceEnvironment::<()>::default();

    let lookup = Recording::new(&universe.storage, &instances);
    let error = dual::resolve(&universe.storage, &lookup, &bifunctor, applied).unwrap_err();

    let ErrorKind::NoViableDecomposition { attempted, .. } = &error.kind else {
        unreachable!("invariant violated: expected NoViableDecomposition");
    };
    assert!(attempted.is_empty());
    assert!(lookup.queries().is_empty());
    assert_eq!(&*error.crumbs, [ErrorCrumb::Dual]);
}

#[test]
fn test_dual_round_trip() {
    let mut universe = Universe::default();
    let Universe { pair, reader_t, option, int, string, .. } = universe;
    let bifunctor = Capability::new("Bifunctor");

    let reader_option = universe.apply(reader_t, [option]);
    for head in [pair, reader_option] {
        let applied = universe.apply(head, [string, int]);
        let form = binary_form(&mut universe, Template::Fixed(head));

        let mut instances = InstanceEnvironment::default();
        instances.register(InstanceHead::new(Capability::clone(&bifunctor), form), ());

        let resolved = dual::resolve(&universe.storage, &instances, &bifunctor, applied).unwrap();
        let equality = resolved.equality();
        assert_eq!(equality.residuals(), [string, int]);
        assert!(resolved.form().reconstructs(&universe.storage, &[string, int], applied));

        let decomposed = resolved.apply("payload");
        assert_eq!(&*decomposed.residuals, [string, int]);
        assert_eq!(equality.to_applied(decomposed).unwrap(), Applied::new(applied, "payload"));

        let value = Applied::new(applied, 7);
        let decomposed = equality.to_decomposed(value.clone()).unwrap();
        assert_eq!(equality.to_applied(decomposed).unwrap(), value);
    }
}
