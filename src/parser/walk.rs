//! # Syntax Tree Walk
//!
//! Breadth-first traversal over every statement and expression of a parsed
//! Python module. The walk is scope-unaware: bodies of functions, classes and
//! compound statements are visited exactly like module-level code.

use rustpython_parser::ast::{self, Expr, Stmt};
use std::collections::VecDeque;

/// A node yielded by [`walk`].
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    /// A statement node.
    Stmt(&'a Stmt),

    /// An expression node.
    Expr(&'a Expr),
}

/// Iterator returned by [`walk`].
pub struct Walk<'a> {
    queue: VecDeque<Node<'a>>,
}

/// Walks every node reachable from `suite` in breadth-first order.
///
/// The order is deterministic for a given source text: top-level statements
/// first, then their children level by level.
///
/// # Example
///
/// ```rust,ignore
/// let calls = walk(&module.ast)
///     .filter(|node| matches!(node, Node::Expr(Expr::Call(_))))
///     .count();
/// ```
pub fn walk(suite: &[Stmt]) -> Walk<'_> {
    Walk {
        queue: suite.iter().map(Node::Stmt).collect(),
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Node<'a>> {
        let node = self.queue.pop_front()?;
        match node {
            Node::Stmt(stmt) => push_stmt_children(stmt, &mut self.queue),
            Node::Expr(expr) => push_expr_children(expr, &mut self.queue),
        }
        Some(node)
    }
}

fn push_stmts<'a>(stmts: &'a [Stmt], queue: &mut VecDeque<Node<'a>>) {
    queue.extend(stmts.iter().map(Node::Stmt));
}

fn push_exprs<'a>(exprs: &'a [Expr], queue: &mut VecDeque<Node<'a>>) {
    queue.extend(exprs.iter().map(Node::Expr));
}

fn push_expr<'a>(expr: &'a Expr, queue: &mut VecDeque<Node<'a>>) {
    queue.push_back(Node::Expr(expr));
}

fn push_opt_expr<'a>(expr: &'a Option<Box<Expr>>, queue: &mut VecDeque<Node<'a>>) {
    queue.extend(expr.as_deref().map(Node::Expr));
}

fn push_stmt_children<'a>(stmt: &'a Stmt, queue: &mut VecDeque<Node<'a>>) {
    match stmt {
        Stmt::FunctionDef(ast::StmtFunctionDef {
            args,
            body,
            decorator_list,
            returns,
            ..
        })
        | Stmt::AsyncFunctionDef(ast::StmtAsyncFunctionDef {
            args,
            body,
            decorator_list,
            returns,
            ..
        }) => {
            push_arguments(args, queue);
            push_stmts(body, queue);
            push_exprs(decorator_list, queue);
            push_opt_expr(returns, queue);
        }
        Stmt::ClassDef(ast::StmtClassDef {
            bases,
            keywords,
            body,
            decorator_list,
            ..
        }) => {
            push_exprs(bases, queue);
            queue.extend(keywords.iter().map(|keyword| Node::Expr(&keyword.value)));
            push_stmts(body, queue);
            push_exprs(decorator_list, queue);
        }
        Stmt::Return(ast::StmtReturn { value, .. }) => push_opt_expr(value, queue),
        Stmt::Delete(ast::StmtDelete { targets, .. }) => push_exprs(targets, queue),
        Stmt::Assign(ast::StmtAssign { targets, value, .. }) => {
            push_exprs(targets, queue);
            push_expr(value, queue);
        }
        Stmt::AugAssign(ast::StmtAugAssign { target, value, .. }) => {
            push_expr(target, queue);
            push_expr(value, queue);
        }
        Stmt::AnnAssign(ast::StmtAnnAssign {
            target,
            annotation,
            value,
            ..
        }) => {
            push_expr(target, queue);
            push_expr(annotation, queue);
            push_opt_expr(value, queue);
        }
        Stmt::For(ast::StmtFor {
            target,
            iter,
            body,
            orelse,
            ..
        })
        | Stmt::AsyncFor(ast::StmtAsyncFor {
            target,
            iter,
            body,
            orelse,
            ..
        }) => {
            push_expr(target, queue);
            push_expr(iter, queue);
            push_stmts(body, queue);
            push_stmts(orelse, queue);
        }
        Stmt::While(ast::StmtWhile {
            test, body, orelse, ..
        })
        | Stmt::If(ast::StmtIf {
            test, body, orelse, ..
        }) => {
            push_expr(test, queue);
            push_stmts(body, queue);
            push_stmts(orelse, queue);
        }
        Stmt::With(ast::StmtWith { items, body, .. })
        | Stmt::AsyncWith(ast::StmtAsyncWith { items, body, .. }) => {
            for item in items {
                push_expr(&item.context_expr, queue);
                push_opt_expr(&item.optional_vars, queue);
            }
            push_stmts(body, queue);
        }
        Stmt::Match(ast::StmtMatch { subject, cases, .. }) => {
            push_expr(subject, queue);
            for case in cases {
                push_pattern_exprs(&case.pattern, queue);
                push_opt_expr(&case.guard, queue);
                push_stmts(&case.body, queue);
            }
        }
        Stmt::Raise(ast::StmtRaise { exc, cause, .. }) => {
            push_opt_expr(exc, queue);
            push_opt_expr(cause, queue);
        }
        Stmt::Try(ast::StmtTry {
            body,
            handlers,
            orelse,
            finalbody,
            ..
        })
        | Stmt::TryStar(ast::StmtTryStar {
            body,
            handlers,
            orelse,
            finalbody,
            ..
        }) => {
            push_stmts(body, queue);
            for handler in handlers {
                let ast::ExceptHandler::ExceptHandler(handler) = handler;
                push_opt_expr(&handler.type_, queue);
                push_stmts(&handler.body, queue);
            }
            push_stmts(orelse, queue);
            push_stmts(finalbody, queue);
        }
        Stmt::Assert(ast::StmtAssert { test, msg, .. }) => {
            push_expr(test, queue);
            push_opt_expr(msg, queue);
        }
        Stmt::Expr(ast::StmtExpr { value, .. }) => push_expr(value, queue),
        _ => {}
    }
}

/// Pushes parameter annotations and default values.
fn push_arguments<'a>(arguments: &'a ast::Arguments, queue: &mut VecDeque<Node<'a>>) {
    for arg in arguments
        .posonlyargs
        .iter()
        .chain(&arguments.args)
        .chain(&arguments.kwonlyargs)
    {
        push_opt_expr(&arg.def.annotation, queue);
        push_opt_expr(&arg.default, queue);
    }
    for arg in arguments.vararg.iter().chain(&arguments.kwarg) {
        push_opt_expr(&arg.annotation, queue);
    }
}

/// Pushes the expressions embedded in a `case` pattern.
fn push_pattern_exprs<'a>(pattern: &'a ast::Pattern, queue: &mut VecDeque<Node<'a>>) {
    match pattern {
        ast::Pattern::MatchValue(ast::PatternMatchValue { value, .. }) => push_expr(value, queue),
        ast::Pattern::MatchSequence(ast::PatternMatchSequence { patterns, .. })
        | ast::Pattern::MatchOr(ast::PatternMatchOr { patterns, .. }) => {
            for pattern in patterns {
                push_pattern_exprs(pattern, queue);
            }
        }
        ast::Pattern::MatchMapping(ast::PatternMatchMapping { keys, patterns, .. }) => {
            push_exprs(keys, queue);
            for pattern in patterns {
                push_pattern_exprs(pattern, queue);
            }
        }
        ast::Pattern::MatchClass(ast::PatternMatchClass {
            cls,
            patterns,
            kwd_patterns,
            ..
        }) => {
            push_expr(cls, queue);
            for pattern in patterns.iter().chain(kwd_patterns) {
                push_pattern_exprs(pattern, queue);
            }
        }
        ast::Pattern::MatchAs(ast::PatternMatchAs {
            pattern: Some(pattern),
            ..
        }) => push_pattern_exprs(pattern, queue),
        _ => {}
    }
}

fn push_comprehensions<'a>(generators: &'a [ast::Comprehension], queue: &mut VecDeque<Node<'a>>) {
    for generator in generators {
        push_expr(&generator.target, queue);
        push_expr(&generator.iter, queue);
        push_exprs(&generator.ifs, queue);
    }
}

fn push_expr_children<'a>(expr: &'a Expr, queue: &mut VecDeque<Node<'a>>) {
    match expr {
        Expr::BoolOp(ast::ExprBoolOp { values, .. }) => push_exprs(values, queue),
        Expr::NamedExpr(ast::ExprNamedExpr { target, value, .. }) => {
            push_expr(target, queue);
            push_expr(value, queue);
        }
        Expr::BinOp(ast::ExprBinOp { left, right, .. }) => {
            push_expr(left, queue);
            push_expr(right, queue);
        }
        Expr::UnaryOp(ast::ExprUnaryOp { operand, .. }) => push_expr(operand, queue),
        Expr::Lambda(ast::ExprLambda { args, body, .. }) => {
            push_arguments(args, queue);
            push_expr(body, queue);
        }
        Expr::IfExp(ast::ExprIfExp {
            test, body, orelse, ..
        }) => {
            push_expr(test, queue);
            push_expr(body, queue);
            push_expr(orelse, queue);
        }
        Expr::Dict(ast::ExprDict { keys, values, .. }) => {
            queue.extend(keys.iter().flatten().map(Node::Expr));
            push_exprs(values, queue);
        }
        Expr::Set(ast::ExprSet { elts, .. })
        | Expr::List(ast::ExprList { elts, .. })
        | Expr::Tuple(ast::ExprTuple { elts, .. }) => push_exprs(elts, queue),
        Expr::ListComp(ast::ExprListComp {
            elt, generators, ..
        })
        | Expr::SetComp(ast::ExprSetComp {
            elt, generators, ..
        })
        | Expr::GeneratorExp(ast::ExprGeneratorExp {
            elt, generators, ..
        }) => {
            push_expr(elt, queue);
            push_comprehensions(generators, queue);
        }
        Expr::DictComp(ast::ExprDictComp {
            key,
            value,
            generators,
            ..
        }) => {
            push_expr(key, queue);
            push_expr(value, queue);
            push_comprehensions(generators, queue);
        }
        Expr::Await(ast::ExprAwait { value, .. })
        | Expr::YieldFrom(ast::ExprYieldFrom { value, .. })
        | Expr::Attribute(ast::ExprAttribute { value, .. })
        | Expr::Starred(ast::ExprStarred { value, .. }) => push_expr(value, queue),
        Expr::Yield(ast::ExprYield { value, .. }) => push_opt_expr(value, queue),
        Expr::Compare(ast::ExprCompare {
            left, comparators, ..
        }) => {
            push_expr(left, queue);
            push_exprs(comparators, queue);
        }
        Expr::Call(ast::ExprCall {
            func,
            args,
            keywords,
            ..
        }) => {
            push_expr(func, queue);
            push_exprs(args, queue);
            queue.extend(keywords.iter().map(|keyword| Node::Expr(&keyword.value)));
        }
        Expr::JoinedStr(ast::ExprJoinedStr { values, .. }) => push_exprs(values, queue),
        Expr::FormattedValue(ast::ExprFormattedValue {
            value, format_spec, ..
        }) => {
            push_expr(value, queue);
            push_opt_expr(format_spec, queue);
        }
        Expr::Subscript(ast::ExprSubscript { value, slice, .. }) => {
            push_expr(value, queue);
            push_expr(slice, queue);
        }
        Expr::Slice(ast::ExprSlice {
            lower, upper, step, ..
        }) => {
            push_opt_expr(lower, queue);
            push_opt_expr(upper, queue);
            push_opt_expr(step, queue);
        }
        _ => {}
    }
}
