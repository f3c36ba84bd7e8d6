//! Prints a tree as nested parenthesized prefix notation, e.g.
//! `(* (- 123) (group 45.67))`.

use crate::expr::*;
use crate::stmt::*;

#[derive(Debug, Default)]
pub struct AstPrinter;

impl AstPrinter {
    pub fn print(&mut self, expr: &Expr) -> String {
        expr.accept_typed(self)
    }

    pub fn print_stmt(&mut self, stmt: &Stmt) -> String {
        stmt.accept_typed(self)
    }

    fn parenthesize<'a>(
        &mut self,
        name: &str,
        exprs: impl IntoIterator<Item = &'a Expr>,
    ) -> String {
        let mut out = format!("({name}");
        for expr in exprs {
            out.push(' ');
            out.push_str(&self.print(expr));
        }
        out.push(')');
        out
    }

    fn block(&mut self, name: &str, stmts: &[Stmt]) -> String {
        let mut out = format!("({name}");
        for stmt in stmts {
            out.push(' ');
            out.push_str(&self.print_stmt(stmt));
        }
        out.push(')');
        out
    }
}

impl ExprTypedVisitor<String> for AstPrinter {
    fn visit_assign_expr(&mut self, node: &AssignExpr) -> String {
        self.parenthesize(&format!("= {}", node.name().lexeme), [node.value()])
    }

    fn visit_binary_expr(&mut self, node: &BinaryExpr) -> String {
        self.parenthesize(&node.operator().lexeme, [node.left(), node.right()])
    }

    fn visit_call_expr(&mut self, node: &CallExpr) -> String {
        self.parenthesize(
            "call",
            std::iter::once(node.callee()).chain(node.arguments()),
        )
    }

    fn visit_get_expr(&mut self, node: &GetExpr) -> String {
        self.parenthesize(&format!(". {}", node.name().lexeme), [node.object()])
    }

    fn visit_grouping_expr(&mut self, node: &GroupingExpr) -> String {
        self.parenthesize("group", [node.expression()])
    }

    fn visit_literal_expr(&mut self, node: &LiteralExpr) -> String {
        node.value().to_string()
    }

    fn visit_logical_expr(&mut self, node: &LogicalExpr) -> String {
        self.parenthesize(&node.operator().lexeme, [node.left(), node.right()])
    }

    fn visit_set_expr(&mut self, node: &SetExpr) -> String {
        self.parenthesize(
            &format!("= {}", node.name().lexeme),
            [node.object(), node.value()],
        )
    }

    fn visit_super_expr(&mut self, node: &SuperExpr) -> String {
        format!("(super {})", node.method().lexeme)
    }

    fn visit_this_expr(&mut self, _node: &ThisExpr) -> String {
        "this".to_string()
    }

    fn visit_unary_expr(&mut self, node: &UnaryExpr) -> String {
        self.parenthesize(&node.operator().lexeme, [node.right()])
    }

    fn visit_variable_expr(&mut self, node: &VariableExpr) -> String {
        node.name().lexeme.clone()
    }
}

impl StmtTypedVisitor<String> for AstPrinter {
    fn visit_block_stmt(&mut self, node: &BlockStmt) -> String {
        self.block("block", node.statements())
    }

    fn visit_break_stmt(&mut self, _node: &BreakStmt) -> String {
        "(break)".to_string()
    }

    fn visit_class_stmt(&mut self, node: &ClassStmt) -> String {
        let mut out = format!("(class {}", node.name().lexeme);
        if let Some(super_class) = node.super_class() {
            out.push_str(" < ");
            out.push_str(&self.visit_variable_expr(super_class));
        }
        for method in node.methods() {
            out.push(' ');
            out.push_str(&self.visit_function_stmt(method));
        }
        out.push(')');
        out
    }

    fn visit_expression_stmt(&mut self, node: &ExpressionStmt) -> String {
        self.parenthesize(";", [node.expression()])
    }

    fn visit_function_stmt(&mut self, node: &FunctionStmt) -> String {
        let params = node
            .params()
            .iter()
            .map(|param| param.lexeme.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        self.block(
            &format!("fun {}({params})", node.name().lexeme),
            node.body(),
        )
    }

    fn visit_if_stmt(&mut self, node: &IfStmt) -> String {
        let condition = self.print(node.condition());
        let then_branch = self.print_stmt(node.then_branch());
        match node.else_branch() {
            Some(else_branch) => format!(
                "(if {condition} {then_branch} {})",
                self.print_stmt(else_branch)
            ),
            None => format!("(if {condition} {then_branch})"),
        }
    }

    fn visit_print_stmt(&mut self, node: &PrintStmt) -> String {
        self.parenthesize("print", [node.expression()])
    }

    fn visit_return_stmt(&mut self, node: &ReturnStmt) -> String {
        self.parenthesize("return", node.value())
    }

    fn visit_var_stmt(&mut self, node: &VarStmt) -> String {
        match node.initializer() {
            Some(initializer) => {
                self.parenthesize(&format!("var {} =", node.name().lexeme), [initializer])
            }
            None => format!("(var {})", node.name().lexeme),
        }
    }

    fn visit_while_stmt(&mut self, node: &WhileStmt) -> String {
        let condition = self.print(node.condition());
        format!("(while {condition} {})", self.print_stmt(node.body()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{Token, TokenType, Value};
    use pretty_assertions::assert_eq;

    fn number(n: f64) -> Expr {
        LiteralExpr::new(Value::Number(n)).into()
    }

    #[test]
    fn test_print_expression() {
        let expr: Expr = BinaryExpr::new(
            UnaryExpr::new(Token::new(TokenType::Minus, "-", 1), number(123.0)).into(),
            Token::new(TokenType::Star, "*", 1),
            GroupingExpr::new(number(45.67)).into(),
        )
        .into();
        assert_eq!(AstPrinter.print(&expr), "(* (- 123) (group 45.67))");
    }

    #[test]
    fn test_print_statements() {
        let name = Token::new(TokenType::Identifier, "x", 1);
        let stmt: Stmt = BlockStmt::new(vec![
            VarStmt::new(name.clone(), Some(number(1.0))).into(),
            VarStmt::new(name.clone(), None).into(),
            IfStmt::new(
                VariableExpr::new(name).into(),
                PrintStmt::new(LiteralExpr::new(Value::String("yes".into())).into()).into(),
                Some(BreakStmt::new().into()),
            )
            .into(),
        ])
        .into();
        assert_eq!(
            AstPrinter.print_stmt(&stmt),
            "(block (var x = 1) (var x) (if x (print \"yes\") (break)))"
        );
    }

    #[test]
    fn test_print_class() {
        let method = FunctionStmt::new(
            Token::new(TokenType::Identifier, "area", 2),
            vec![Token::new(TokenType::Identifier, "scale", 2)],
            vec![
                ReturnStmt::new(
                    Token::new(TokenType::Return, "return", 3),
                    Some(ThisExpr::new(Token::new(TokenType::This, "this", 3)).into()),
                )
                .into(),
            ],
        );
        let class: Stmt = ClassStmt::new(
            Token::new(TokenType::Identifier, "Square", 1),
            Some(VariableExpr::new(Token::new(TokenType::Identifier, "Shape", 1))),
            vec![method],
        )
        .into();
        assert_eq!(
            AstPrinter.print_stmt(&class),
            "(class Square < Shape (fun area(scale) (return this)))"
        );
    }
}
