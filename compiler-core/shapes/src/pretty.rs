//! Implements the pretty printer for types, kinds, and forms.

use itertools::Itertools;
use pretty::{Arena, DocAllocator, DocBuilder};
use smol_str::SmolStr;

use crate::core::{Kind, Type, TypeId};
use crate::form::{Form, Hole, Template};
use crate::storage::TypeStorage;
use crate::toolkit;

type Doc<'a> = DocBuilder<'a, Arena<'a>, ()>;

pub struct PrettyConfig {
    pub width: usize,
}

impl Default for PrettyConfig {
    fn default() -> PrettyConfig {
        PrettyConfig { width: 100 }
    }
}

pub fn print_type(storage: &TypeStorage, id: TypeId) -> SmolStr {
    print_type_with_config(storage, id, &PrettyConfig::default())
}

pub fn print_type_with_config(
    storage: &TypeStorage,
    id: TypeId,
    config: &PrettyConfig,
) -> SmolStr {
    render(storage, config, |printer| printer.traverse(Precedence::Top, id))
}

pub fn print_form(storage: &TypeStorage, form: &Form) -> SmolStr {
    print_form_with_config(storage, form, &PrettyConfig::default())
}

pub fn print_form_with_config(
    storage: &TypeStorage,
    form: &Form,
    config: &PrettyConfig,
) -> SmolStr {
    render(storage, config, |printer| printer.form(form))
}

pub fn print_kind(kind: &Kind) -> SmolStr {
    print_kind_with_config(kind, &PrettyConfig::default())
}

pub fn print_kind_with_config(kind: &Kind, config: &PrettyConfig) -> SmolStr {
    let arena = Arena::new();
    let document = kind_document(&arena, Precedence::Top, kind);
    finish(document, config)
}

/// The name used for a hole when rendering forms.
pub fn hole_name(hole: Hole) -> SmolStr {
    let offset = hole.0 % 26;
    SmolStr::new(char::from(b'a' + offset).to_string())
}

fn render(
    storage: &TypeStorage,
    config: &PrettyConfig,
    f: impl for<'a> FnOnce(&Printer<'a>) -> Doc<'a>,
) -> SmolStr {
    let arena = Arena::new();
    let printer = Printer { arena: &arena, storage };

    let document = f(&printer);
    finish(document, config)
}

fn finish(document: Doc<'_>, config: &PrettyConfig) -> SmolStr {
    let mut output = String::new();
    document
        .render_fmt(config.width, &mut output)
        .expect("critical failure: failed to render type");

    SmolStr::from(output)
}

fn kind_document<'a>(arena: &'a Arena<'a>, precedence: Precedence, kind: &Kind) -> Doc<'a> {
    match kind {
        Kind::Type => arena.text("Type"),
        Kind::Function(argument, result) => {
            let argument = kind_document(arena, Precedence::Application, argument);
            let result = kind_document(arena, Precedence::Top, result);
            let function = argument.append(arena.text(" -> ")).append(result);
            if precedence > Precedence::Top {
                arena.text("(").append(function).append(arena.text(")"))
            } else {
                function
            }
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Top,
    Application,
    Atom,
}

struct Printer<'a> {
    arena: &'a Arena<'a>,
    storage: &'a TypeStorage,
}

impl<'a> Printer<'a> {
    fn parens_if(&self, condition: bool, doc: Doc<'a>) -> Doc<'a> {
        if condition { self.arena.text("(").append(doc).append(self.arena.text(")")) } else { doc }
    }

    fn traverse(&self, precedence: Precedence, id: TypeId) -> Doc<'a> {
        match &self.storage[id] {
            Type::Constructor(name) => self.arena.text(name.to_string()),
            Type::Application(_, _) => {
                let spine = toolkit::spine(self.storage, id);
                let function = self.traverse(Precedence::Application, spine.head);
                let arguments = spine
                    .arguments
                    .iter()
                    .map(|&argument| self.traverse(Precedence::Atom, argument))
                    .collect_vec();
                self.application(precedence, function, arguments)
            }
        }
    }

    fn application(
        &self,
        precedence: Precedence,
        function: Doc<'a>,
        arguments: Vec<Doc<'a>>,
    ) -> Doc<'a> {
        let arguments = arguments.into_iter().fold(self.arena.nil(), |builder, argument| {
            builder.append(self.arena.line()).append(argument)
        });

        let application = function.append(arguments.nest(2)).group();
        self.parens_if(precedence > Precedence::Application, application)
    }

    fn template(&self, precedence: Precedence, template: &Template) -> Doc<'a> {
        match template {
            Template::Fixed(id) => self.traverse(precedence, *id),
            Template::Hole(hole) => self.arena.text(hole_name(*hole).to_string()),
            Template::Application(_, _) => {
                let mut arguments = vec![];
                let mut current = template;

                while let Template::Application(function, argument) = current {
                    arguments.push(argument.as_ref());
                    current = function.as_ref();
                }

                let function = self.template(Precedence::Application, current);
                let arguments = arguments
                    .into_iter()
                    .rev()
                    .map(|argument| self.template(Precedence::Atom, argument))
                    .collect_vec();

                self.application(precedence, function, arguments)
            }
        }
    }

    fn form(&self, form: &Form) -> Doc<'a> {
        let binders = (0..form.arity()).map(|index| hole_name(Hole(index))).join(" ");
        let body = self.template(Precedence::Top, form.body());
        let body = self.arena.line().append(body).nest(2);
        self.arena.text(format!("\\{binders} ->")).append(body).group()
    }
}

#[cfg(test)]
mod tests {
    use super::{print_form, print_kind, print_type};
    use crate::core::Kind;
    use crate::form::{Form, Hole, Slot};
    use crate::storage::TypeStorage;
    use crate::toolkit::spine;

    #[test]
    fn test_print_types() {
        let mut storage = TypeStorage::default();
        let int = storage.declare("Int", Kind::Type).unwrap();
        let string = storage.declare("String", Kind::Type).unwrap();
        let pair = storage.declare("Pair", Kind::constructor(2)).unwrap();
        let list = storage.declare("List", Kind::constructor(1)).unwrap();

        let list_int = storage.apply(list, int).unwrap();
        let nested = storage.apply_all(pair, [list_int, string]).unwrap();
        let partial = storage.apply(pair, list_int).unwrap();

        insta::assert_snapshot!(print_type(&storage, int), @"Int");
        insta::assert_snapshot!(print_type(&storage, nested), @"Pair (List Int) String");
        insta::assert_snapshot!(print_type(&storage, partial), @"Pair (List Int)");
    }

    #[test]
    fn test_print_forms() {
        let mut storage = TypeStorage::default();
        let int = storage.declare("Int", Kind::Type).unwrap();
        let string = storage.declare("String", Kind::Type).unwrap();
        let pair = storage.declare("Pair", Kind::constructor(2)).unwrap();
        let applied = storage.apply_all(pair, [int, string]).unwrap();
        let spine = spine(&storage, applied);

        let (first, _) =
            Form::decompose(&storage, &spine, &[Slot::Hole(Hole::FIRST), Slot::Fixed]).unwrap();
        let (second, _) =
            Form::decompose(&storage, &spine, &[Slot::Fixed, Slot::Hole(Hole::FIRST)]).unwrap();
        let (both, _) = Form::decompose(
            &storage,
            &spine,
            &[Slot::Hole(Hole::FIRST), Slot::Hole(Hole::SECOND)],
        )
        .unwrap();

        insta::assert_snapshot!(print_form(&storage, &first), @r"\a -> Pair a String");
        insta::assert_snapshot!(print_form(&storage, &second), @r"\a -> Pair Int a");
        insta::assert_snapshot!(print_form(&storage, &both), @r"\a b -> Pair a b");
        let constant = Form::constant(applied);
        insta::assert_snapshot!(print_form(&storage, &constant), @r"\a -> Pair Int String");
    }

    #[test]
    fn test_print_kinds() {
        let higher = Kind::function(Kind::constructor(1), Kind::constructor(1));

        insta::assert_snapshot!(print_kind(&Kind::Type), @"Type");
        insta::assert_snapshot!(print_kind(&Kind::constructor(2)), @"Type -> Type -> Type");
        insta::assert_snapshot!(print_kind(&higher), @"(Type -> Type) -> Type -> Type");
    }
}
