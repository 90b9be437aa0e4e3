pub mod trace;

use std::cell::RefCell;

use shapes::pretty::{print_form, print_type};
use shapes::{Form, Hole, Kind, Template, TypeId, TypeStorage};
use unapply::{Capability, InstanceEnvironment, InstanceHead, InstanceLookup};

/// A small universe of declared constructors shared by the tests.
pub struct Universe {
    pub storage: TypeStorage,

    pub int: TypeId,
    pub string: TypeId,
    pub unit: TypeId,

    /// `Type -> Type`
    pub boxed: TypeId,
    pub option: TypeId,
    pub list: TypeId,

    /// `Type -> Type -> Type`
    pub pair: TypeId,
    pub either: TypeId,

    /// `(Type -> Type) -> Type -> Type`
    pub option_t: TypeId,
    /// `(Type -> Type) -> Type -> Type -> Type`
    pub reader_t: TypeId,
    /// `(Type -> Type) -> Type -> Type -> Type -> Type`
    pub indexed: TypeId,
}

impl Default for Universe {
    fn default() -> Universe {
        let mut storage = TypeStorage::default();
        let mut declare = |name: &str, kind: Kind| storage.declare(name, kind).unwrap();

        let int = declare("Int", Kind::Type);
        let string = declare("String", Kind::Type);
        let unit = declare("Unit", Kind::Type);

        let boxed = declare("Box", Kind::constructor(1));
        let option = declare("Option", Kind::constructor(1));
        let list = declare("List", Kind::constructor(1));

        let pair = declare("Pair", Kind::constructor(2));
        let either = declare("Either", Kind::constructor(2));

        let higher = |arity| Kind::function(Kind::constructor(1), Kind::constructor(arity));
        let option_t = declare("OptionT", higher(1));
        let reader_t = declare("ReaderT", higher(2));
        let indexed = declare("IndexedState", higher(3));

        for arity in 3..=7 {
            declare(&format!("Tuple{arity}"), Kind::constructor(arity));
        }

        Universe {
            storage,
            int,
            string,
            unit,
            boxed,
            option,
            list,
            pair,
            either,
            option_t,
            reader_t,
            indexed,
        }
    }
}

impl Universe {
    pub fn apply(
        &mut self,
        function: TypeId,
        arguments: impl IntoIterator<Item = TypeId>,
    ) -> TypeId {
        self.storage.apply_all(function, arguments).unwrap()
    }

    /// The `TupleN` constructor declared for arities 3 through 7.
    pub fn tuple(&self, arity: usize) -> TypeId {
        self.storage.constructor(&format!("Tuple{arity}")).unwrap()
    }

    /// Builds `\a -> head arguments..`, where `None` marks the hole.
    pub fn form(&mut self, head: TypeId, arguments: &[Option<TypeId>]) -> Form {
        let arguments = arguments.iter().map(|argument| match argument {
            Some(id) => Template::Fixed(*id),
            None => Template::Hole(Hole::FIRST),
        });
        let body = Template::application_all(Template::Fixed(head), arguments);
        Form::new(&mut self.storage, 1, body).unwrap()
    }

    pub fn print(&self, id: TypeId) -> String {
        print_type(&self.storage, id).to_string()
    }
}

/// Registers `instance` under `capability` for each form.
pub fn environment<I: Clone>(
    capability: &Capability,
    forms: impl IntoIterator<Item = Form>,
    instance: I,
) -> InstanceEnvironment<I> {
    let mut environment = InstanceEnvironment::default();
    for form in forms {
        let head = InstanceHead::new(Capability::clone(capability), form);
        environment.register(head, I::clone(&instance));
    }
    environment
}

/// A lookup service that records every head it is queried with.
pub struct Recording<'a, L> {
    storage: &'a TypeStorage,
    inner: L,
    queries: RefCell<Vec<String>>,
}

impl<'a, L> Recording<'a, L> {
    pub fn new(storage: &'a TypeStorage, inner: L) -> Recording<'a, L> {
        Recording { storage, inner, queries: RefCell::default() }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.borrow().clone()
    }

    /// One line per query, in the order they were made.
    pub fn report(&self) -> String {
        self.queries.borrow().join("\n")
    }
}

impl<L> InstanceLookup for Recording<'_, L>
where
    L: InstanceLookup,
{
    type Instance = L::Instance;

    fn lookup_instance(&self, head: &InstanceHead) -> Option<L::Instance> {
        let form = print_form(self.storage, &head.form);
        let instance = self.inner.lookup_instance(head);
        let outcome = if instance.is_some() { "found" } else { "missing" };
        self.queries.borrow_mut().push(format!("{} ({form}): {outcome}", head.capability));
        instance
    }
}

/// An opaque runtime payload converted by isomorphisms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    Str(String),
    Option(Option<Box<Value>>),
    List(Vec<Value>),
}

/// `Option a -> List a`
pub fn option_to_list(value: Value) -> Value {
    match value {
        Value::Option(None) => Value::List(vec![]),
        Value::Option(Some(inner)) => Value::List(vec![*inner]),
        other => other,
    }
}

/// `List a -> Option a`, keeping the head of the list.
pub fn list_to_option(value: Value) -> Value {
    match value {
        Value::List(elements) => Value::Option(elements.into_iter().next().map(Box::new)),
        other => other,
    }
}
