use crate::internal::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
  /// Maximum number of arena nodes, root included.
  pub arena_capacity: usize,
}

impl Default for ParseOptions {
  fn default() -> Self {
    ParseOptions { arena_capacity: 65_536 }
  }
}

/// Everything produced for one source unit: its tokens and its tree.
#[derive(Debug)]
pub struct Module {
  pub name: String,
  pub tokens: Vec<Token>,
  pub ast: Ast,
}

impl Module {
  pub fn new(name: impl Into<String>, options: ParseOptions) -> Self {
    Module {
      name: name.into(),
      tokens: Vec::with_capacity(128),
      ast: Ast::with_capacity(options.arena_capacity),
    }
  }

  pub const fn is_complete(&self) -> bool {
    self.ast.is_complete()
  }

  /// The tree, only once every statement has parsed.
  pub fn completed_ast(&self) -> Option<&Ast> {
    self.is_complete().then_some(&self.ast)
  }

  /// The token stream rendered back into readable source.
  pub fn source_text(&self) -> String {
    render_tokens(&self.tokens)
  }
}

/// Lexes and parses `src` in one go. The module comes back either way so a
/// failed parse can still be inspected.
pub fn parse_str(
  name: &str,
  src: &str,
  options: ParseOptions,
  reporter: &mut dyn Reporter,
) -> (Module, Result<(), ParseError>) {
  let mut module = Module::new(name, options);
  let lexer = Lexer::new(StrProvider::new(src));
  let result = Parser::new(&mut module, reporter).run(lexer);
  (module, result)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_util::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn empty_function() {
    assert_eq!(
      dump_module("fun hello() { }"),
      "(Sequence (Statement (Function hello void () (Sequence))))"
    );
  }

  #[test]
  fn definition_with_initializer() {
    assert_eq!(
      dump_module("int a = 1 + 1"),
      "(Sequence (Statement (Assignment (VariableDefinition int a) (BinaryOperation Add (Literal 1) (Literal 1)))))"
    );
  }

  #[test]
  fn call_statement() {
    assert_eq!(
      dump_module("hello(1)"),
      "(Sequence (Statement (Call hello (Literal 1))))"
    );
  }

  #[test]
  fn empty_if_and_else_bodies_are_absent() {
    assert_eq!(
      dump_module("if true { } else { }"),
      "(Sequence (Statement (IfStatement (Literal true) _ _)))"
    );
  }

  #[test]
  fn assignment_versus_definition() {
    assert_eq!(
      dump_module("a = 5\nint b = a"),
      "(Sequence (Statement (Assignment (Variable a) (Literal 5))) (Statement (Assignment (VariableDefinition int b) (Variable a))))"
    );
  }

  #[test]
  fn non_empty_bodies_are_kept() {
    assert_eq!(
      dump_module("if x < 1 {\n  f()\n}\nelse {\n  g()\n}"),
      "(Sequence (Statement (IfStatement (BinaryOperation Lt (Variable x) (Literal 1)) (Sequence (Statement (Call f))) (Sequence (Statement (Call g))))))"
    );
  }

  #[test]
  fn for_loop() {
    assert_eq!(
      dump_module("for int i = 0; i < 10; i = i + 1 { }"),
      "(Sequence (Statement (ForStatement (Assignment (VariableDefinition int i) (Literal 0)) (BinaryOperation Lt (Variable i) (Literal 10)) (Assignment (Variable i) (BinaryOperation Add (Variable i) (Literal 1))) _)))"
    );
    assert_eq!(
      dump_module("for i = 0; i < n; step(i) { print(i) }"),
      "(Sequence (Statement (ForStatement (Assignment (Variable i) (Literal 0)) (BinaryOperation Lt (Variable i) (Variable n)) (Call step (Variable i)) (Sequence (Statement (Call print (Variable i)))))))"
    );
  }

  #[test]
  fn function_with_params_and_return() {
    assert_eq!(
      dump_module("fun add(int a, int b) int {\n  return a + b\n}"),
      "(Sequence (Statement (Function add int ((VariableDefinition int a) (VariableDefinition int b)) (Sequence (Statement return (BinaryOperation Add (Variable a) (Variable b)))))))"
    );
  }

  #[test]
  fn extern_declaration_has_no_body() {
    assert_eq!(
      dump_module("extern fun puts(string s)"),
      "(Sequence (Statement (Function puts void ((VariableDefinition string s)))))"
    );
  }

  #[test]
  fn type_declaration() {
    assert_eq!(
      dump_module("type Point {\n  float x\n  float y\n}\nPoint p"),
      "(Sequence (Statement (TypeDeclaration Point (TypeMember (VariableDefinition float x)) (TypeMember (VariableDefinition float y)))) (Statement (VariableDefinition Point p)))"
    );
  }

  #[test]
  fn imports_asserts_and_comments() {
    assert_eq!(
      dump_module("# setup\nimport \"std/io\"\nassert not done"),
      "(Sequence (Statement (Comment \"setup\")) (Statement (Import \"std/io\")) (Statement (Assert (UnaryOperation Not (Variable done)))))"
    );
  }

  #[test]
  fn member_and_indexed_targets() {
    assert_eq!(
      dump_module("p.x = 1\nxs[2] = 3"),
      "(Sequence (Statement (Assignment (MemberAccess (Variable p) (Variable x)) (Literal 1))) (Statement (Assignment (Variable xs (Literal 2)) (Literal 3))))"
    );
  }

  #[test]
  fn array_definition() {
    assert_eq!(
      dump_module("int[3] xs"),
      "(Sequence (Statement (VariableDefinition int[3] xs)))"
    );
  }

  #[test]
  fn arena_capacity_boundary() {
    // root, definition, two literals, addition, assignment, statement
    let mut diags: Vec<Diagnostic> = Vec::new();
    let options = ParseOptions { arena_capacity: 7 };
    let (module, result) = parse_str("fits", "int a = 1 + 1", options, &mut diags);
    assert_eq!(result, Ok(()));
    assert!(module.is_complete());
    assert_eq!(module.ast.len(), 7);

    let options = ParseOptions { arena_capacity: 6 };
    let (module, result) = parse_str("full", "int a = 1 + 1", options, &mut diags);
    assert_eq!(
      result,
      Err(ParseError::ArenaExhausted(ArenaExhausted { capacity: 6 }))
    );
    assert!(module.completed_ast().is_none());
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].severity, Severity::Error);
  }

  #[test]
  fn rendered_source_lexes_to_the_same_kinds() {
    let src = "fun f(int[2] a) bool {\n  return a[0] <= -a[1] and not g(a.b, \"s\")\n}\n";
    let mut diags: Vec<Diagnostic> = Vec::new();
    let (module, result) = parse_str("rt", src, ParseOptions::default(), &mut diags);
    assert_eq!(result, Ok(()));
    let kinds = |tokens: &[Token]| tokens.iter().map(|t| t.kind).collect::<Vec<_>>();
    let rendered = module.source_text();
    assert_eq!(kinds(&tokens_of(&rendered)), kinds(&module.tokens));
  }

  #[test]
  fn parses_from_a_reader() {
    let src = std::io::Cursor::new("int x = 1\nprint(x)\n");
    let mut module = Module::new("reader", ParseOptions::default());
    let mut diags: Vec<Diagnostic> = Vec::new();
    let lexer = Lexer::new(ReadProvider::new(src));
    Parser::new(&mut module, &mut diags).run(lexer).unwrap();
    assert_eq!(module.ast.root_statements().len(), 2);
    assert!(module.completed_ast().is_some());
  }

  #[test]
  fn module_is_send() {
    fn assert_send<T: Send>() {}
    assert_send::<Module>();
  }
}
