//! Pre-order traversal over every node of a tree.
//!
//! Used by tests and tools that need to enumerate node ids, for example to
//! confirm that a side table covers the whole tree.

use super::*;

/// Call `f` with the id of every node reachable from `root`, parents first.
pub fn walk_root(root: &Root<'_>, f: &mut impl FnMut(NodeId)) {
    f(root.id());
    if let Root::Program(program) = root {
        for decl in program.decls {
            walk_decl(decl, f);
        }
    }
}

/// Collect the ids of every node reachable from `root`.
pub fn node_ids(root: &Root<'_>) -> Vec<NodeId> {
    let mut ids = Vec::new();
    walk_root(root, &mut |id| ids.push(id));
    ids
}

pub fn walk_decl(decl: &Decl<'_>, f: &mut impl FnMut(NodeId)) {
    f(decl.id());
    if let Decl::Function(func) = decl {
        walk_block(&func.body, f);
    }
}

pub fn walk_block(block: &Block<'_>, f: &mut impl FnMut(NodeId)) {
    f(block.id);
    for stmt in block.stmts {
        walk_stmt(stmt, f);
    }
}

pub fn walk_stmt(stmt: &Stmt<'_>, f: &mut impl FnMut(NodeId)) {
    match stmt {
        Stmt::Var(var) => f(var.id),
        Stmt::Call(call) => walk_expr(&Expr::Call(*call), f),
        Stmt::Assign(assign) => {
            f(assign.id);
            walk_expr(&assign.dest, f);
            walk_expr(&assign.source, f);
        }
        Stmt::If(branch) => {
            f(branch.id);
            walk_expr(&branch.condition, f);
            walk_block(&branch.then_block, f);
            walk_block(&branch.else_block, f);
        }
        Stmt::While(lp) => {
            f(lp.id);
            walk_expr(&lp.condition, f);
            walk_block(&lp.body, f);
        }
        Stmt::Return(ret) => {
            f(ret.id);
            walk_expr(&ret.value, f);
        }
    }
}

pub fn walk_expr(expr: &Expr<'_>, f: &mut impl FnMut(NodeId)) {
    f(expr.id());
    match expr {
        Expr::Literal(_) | Expr::AddressOf(_) => {}
        Expr::Deref(e) => walk_expr(&e.operand, f),
        Expr::Not(e) => walk_expr(&e.operand, f),
        Expr::Index(e) => {
            walk_expr(&e.base, f);
            walk_expr(&e.index, f);
        }
        Expr::Binary(e) => {
            walk_expr(&e.left, f);
            walk_expr(&e.right, f);
        }
        Expr::Call(e) => {
            for arg in e.args {
                walk_expr(arg, f);
            }
        }
    }
}
