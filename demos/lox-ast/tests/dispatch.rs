use lox_ast::expr::*;
use lox_ast::stmt::*;
use lox_ast::token::{Token, TokenType, Value};
use pretty_assertions::assert_eq;

/// Records every node it is dispatched to, walking children first-to-last.
#[derive(Default)]
struct Recorder {
    visited: Vec<String>,
}

impl ExprVisitor for Recorder {
    fn visit_assign_expr(&mut self, node: &AssignExpr) {
        self.visited.push(format!("assign {}", node.name().lexeme));
        node.value().accept(self);
    }

    fn visit_binary_expr(&mut self, node: &BinaryExpr) {
        self.visited.push(format!("binary {}", node.operator().lexeme));
        node.left().accept(self);
        node.right().accept(self);
    }

    fn visit_call_expr(&mut self, node: &CallExpr) {
        self.visited.push(format!("call/{}", node.arguments().len()));
        node.callee().accept(self);
        for argument in node.arguments() {
            argument.accept(self);
        }
    }

    fn visit_get_expr(&mut self, node: &GetExpr) {
        self.visited.push(format!("get {}", node.name().lexeme));
        node.object().accept(self);
    }

    fn visit_grouping_expr(&mut self, node: &GroupingExpr) {
        self.visited.push("grouping".to_string());
        node.expression().accept(self);
    }

    fn visit_literal_expr(&mut self, node: &LiteralExpr) {
        self.visited.push(format!("literal {}", node.value()));
    }

    fn visit_logical_expr(&mut self, node: &LogicalExpr) {
        self.visited.push(format!("logical {}", node.operator().lexeme));
        node.left().accept(self);
        node.right().accept(self);
    }

    fn visit_set_expr(&mut self, node: &SetExpr) {
        self.visited.push(format!("set {}", node.name().lexeme));
        node.object().accept(self);
        node.value().accept(self);
    }

    fn visit_super_expr(&mut self, node: &SuperExpr) {
        self.visited.push(format!("super {}", node.method().lexeme));
    }

    fn visit_this_expr(&mut self, _node: &ThisExpr) {
        self.visited.push("this".to_string());
    }

    fn visit_unary_expr(&mut self, node: &UnaryExpr) {
        self.visited.push(format!("unary {}", node.operator().lexeme));
        node.right().accept(self);
    }

    fn visit_variable_expr(&mut self, node: &VariableExpr) {
        self.visited.push(format!("variable {}", node.name().lexeme));
    }
}

impl StmtVisitor for Recorder {
    fn visit_block_stmt(&mut self, node: &BlockStmt) {
        self.visited.push("block".to_string());
        for stmt in node.statements() {
            stmt.accept(self);
        }
    }

    fn visit_break_stmt(&mut self, _node: &BreakStmt) {
        self.visited.push("break".to_string());
    }

    fn visit_class_stmt(&mut self, node: &ClassStmt) {
        self.visited.push(format!("class {}", node.name().lexeme));
        if let Some(super_class) = node.super_class() {
            super_class.accept(self);
        }
        for method in node.methods() {
            method.accept(self);
        }
    }

    fn visit_expression_stmt(&mut self, node: &ExpressionStmt) {
        self.visited.push("expression".to_string());
        node.expression().accept(self);
    }

    fn visit_function_stmt(&mut self, node: &FunctionStmt) {
        self.visited.push(format!("function {}", node.name().lexeme));
        for stmt in node.body() {
            stmt.accept(self);
        }
    }

    fn visit_if_stmt(&mut self, node: &IfStmt) {
        self.visited.push("if".to_string());
        node.condition().accept(self);
        node.then_branch().accept(self);
        if let Some(else_branch) = node.else_branch() {
            else_branch.accept(self);
        }
    }

    fn visit_print_stmt(&mut self, node: &PrintStmt) {
        self.visited.push("print".to_string());
        node.expression().accept(self);
    }

    fn visit_return_stmt(&mut self, node: &ReturnStmt) {
        self.visited.push("return".to_string());
        if let Some(value) = node.value() {
            value.accept(self);
        }
    }

    fn visit_var_stmt(&mut self, node: &VarStmt) {
        self.visited.push(format!("var {}", node.name().lexeme));
        if let Some(initializer) = node.initializer() {
            initializer.accept(self);
        }
    }

    fn visit_while_stmt(&mut self, node: &WhileStmt) {
        self.visited.push("while".to_string());
        node.condition().accept(self);
        node.body().accept(self);
    }
}

/// Counts nodes by computing a result instead of mutating state.
struct NodeCount;

impl NodeCount {
    fn count(&mut self, expr: &Expr) -> usize {
        expr.accept_typed(self)
    }
}

impl ExprTypedVisitor<usize> for NodeCount {
    fn visit_assign_expr(&mut self, node: &AssignExpr) -> usize {
        1 + self.count(node.value())
    }

    fn visit_binary_expr(&mut self, node: &BinaryExpr) -> usize {
        1 + self.count(node.left()) + self.count(node.right())
    }

    fn visit_call_expr(&mut self, node: &CallExpr) -> usize {
        let arguments: usize = node
            .arguments()
            .iter()
            .map(|argument| self.count(argument))
            .sum();
        1 + self.count(node.callee()) + arguments
    }

    fn visit_get_expr(&mut self, node: &GetExpr) -> usize {
        1 + self.count(node.object())
    }

    fn visit_grouping_expr(&mut self, node: &GroupingExpr) -> usize {
        1 + self.count(node.expression())
    }

    fn visit_literal_expr(&mut self, _node: &LiteralExpr) -> usize {
        1
    }

    fn visit_logical_expr(&mut self, node: &LogicalExpr) -> usize {
        1 + self.count(node.left()) + self.count(node.right())
    }

    fn visit_set_expr(&mut self, node: &SetExpr) -> usize {
        1 + self.count(node.object()) + self.count(node.value())
    }

    fn visit_super_expr(&mut self, _node: &SuperExpr) -> usize {
        1
    }

    fn visit_this_expr(&mut self, _node: &ThisExpr) -> usize {
        1
    }

    fn visit_unary_expr(&mut self, node: &UnaryExpr) -> usize {
        1 + self.count(node.right())
    }

    fn visit_variable_expr(&mut self, _node: &VariableExpr) -> usize {
        1
    }
}

fn token(kind: TokenType, lexeme: &str) -> Token {
    Token::new(kind, lexeme, 1)
}

fn number(n: f64) -> Expr {
    LiteralExpr::new(Value::Number(n)).into()
}

fn variable(name: &str) -> Expr {
    VariableExpr::new(token(TokenType::Identifier, name)).into()
}

/// `a.b = f(1, -2) or this`
fn sample_expr() -> Expr {
    let call = CallExpr::new(
        variable("f"),
        token(TokenType::RightParen, ")"),
        vec![
            number(1.0),
            UnaryExpr::new(token(TokenType::Minus, "-"), number(2.0)).into(),
        ],
    );
    let value = LogicalExpr::new(
        call.into(),
        token(TokenType::Or, "or"),
        ThisExpr::new(token(TokenType::This, "this")).into(),
    );
    SetExpr::new(variable("a"), token(TokenType::Identifier, "b"), value.into()).into()
}

#[test]
fn test_untyped_dispatch_walks_in_order() {
    let mut recorder = Recorder::default();
    sample_expr().accept(&mut recorder);
    assert_eq!(
        recorder.visited,
        [
            "set b",
            "variable a",
            "logical or",
            "call/2",
            "variable f",
            "literal 1",
            "unary -",
            "literal 2",
            "this",
        ]
    );
}

#[test]
fn test_variant_struct_dispatches_directly() {
    let mut recorder = Recorder::default();
    let node = SuperExpr::new(
        token(TokenType::Super, "super"),
        token(TokenType::Identifier, "init"),
    );
    node.accept(&mut recorder);
    Expr::from(node).accept(&mut recorder);
    assert_eq!(recorder.visited, ["super init", "super init"]);
}

#[test]
fn test_typed_dispatch_returns_visitor_result() {
    assert_eq!(NodeCount.count(&sample_expr()), 9);
    let assign: Expr = AssignExpr::new(
        token(TokenType::Identifier, "x"),
        GroupingExpr::new(number(3.0)).into(),
    )
    .into();
    assert_eq!(NodeCount.count(&assign), 3);
}

#[test]
fn test_dyn_visitor() {
    let mut recorder = Recorder::default();
    let visitor: &mut dyn ExprVisitor = &mut recorder;
    number(7.0).accept(visitor);
    assert_eq!(recorder.visited, ["literal 7"]);
}

#[test]
fn test_statement_dispatch() {
    let body = WhileStmt::new(
        variable("running"),
        BlockStmt::new(vec![
            ExpressionStmt::new(variable("tick")).into(),
            BreakStmt::new().into(),
        ])
        .into(),
    );
    let function = FunctionStmt::new(
        token(TokenType::Identifier, "run"),
        Vec::new(),
        vec![body.into(), ReturnStmt::new(token(TokenType::Return, "return"), None).into()],
    );
    let class: Stmt = ClassStmt::new(
        token(TokenType::Identifier, "Machine"),
        None,
        vec![function],
    )
    .into();

    let mut recorder = Recorder::default();
    class.accept(&mut recorder);
    assert_eq!(
        recorder.visited,
        [
            "class Machine",
            "function run",
            "while",
            "variable running",
            "block",
            "expression",
            "variable tick",
            "break",
            "return",
        ]
    );
}

#[test]
fn test_accessors_and_equality() {
    let node = VarStmt::new(token(TokenType::Identifier, "x"), Some(number(1.0)));
    assert_eq!(node.name().lexeme, "x");
    assert_eq!(node.initializer(), Some(&number(1.0)));
    assert_eq!(node.clone(), node);
    assert!(VarStmt::new(token(TokenType::Identifier, "x"), None)
        .initializer()
        .is_none());
}
