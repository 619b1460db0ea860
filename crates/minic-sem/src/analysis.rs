//! Semantic analysis (spec component C4): name resolution, scoping, and
//! type checking.
//!
//! Grounded directly on `original_source/MiniC/semantic.py`'s
//! `SemanticAnalyzer`: duplicate-function/missing-`main` checks, the
//! type-attribution rules in `eval_expr_type`, and the `type_compatible`
//! coercion table are all reproduced rule-for-rule. Function call arity and
//! argument types are deliberately not checked (spec §4.3 non-goal,
//! matching the original, which never inspects `FuncCall.args` against a
//! callee's parameter list).

use indexmap::IndexMap;
use minic_par::ast::{
    Assignment, BinOp, Block, Expr, For, FuncCall, Function, If, Literal, Program, Return, Stmt,
    TypeName, UnOp, VarDecl, VarRef, While,
};
use minic_util::{Interner, Symbol};

use crate::error::{Result, SemanticError};
use crate::scope::{ScopeTree, SymbolInfo, SymbolKind};

pub fn analyze(program: &Program, interner: &Interner) -> Result<()> {
    Analyzer::new(interner).analyze(program)
}

struct Analyzer<'a> {
    interner: &'a Interner,
    functions: IndexMap<Symbol, TypeName>,
}

impl<'a> Analyzer<'a> {
    fn new(interner: &'a Interner) -> Self {
        Self { interner, functions: IndexMap::new() }
    }

    fn name(&self, sym: Symbol) -> String {
        self.interner.resolve(sym).to_string()
    }

    fn analyze(&mut self, program: &Program) -> Result<()> {
        for f in &program.functions {
            if self.functions.insert(f.name, f.ret_type).is_some() {
                return Err(SemanticError::DuplicateFunction { name: self.name(f.name), span: f.span });
            }
        }
        if !self.functions.keys().any(|&name| self.interner.resolve(name) == "main") {
            return Err(SemanticError::MissingMain);
        }
        for f in &program.functions {
            self.analyze_function(f)?;
        }
        Ok(())
    }

    fn analyze_function(&mut self, func: &Function) -> Result<()> {
        let mut scope = ScopeTree::new();
        for param in &func.params {
            // Duplicate parameter names are caught by `declare` the same
            // way a duplicate local declaration would be.
            scope
                .declare(param.name, SymbolInfo { typ: param.ty, kind: SymbolKind::Var })
                .map_err(|_| SemanticError::DuplicateVariable {
                    name: self.name(param.name),
                    span: func.span,
                })?;
        }
        self.walk_block(&func.body, &mut scope, func.ret_type)
    }

    fn walk_block(&mut self, block: &Block, scope: &mut ScopeTree, ret_type: TypeName) -> Result<()> {
        for stmt in &block.statements {
            self.walk_stmt(stmt, scope, ret_type)?;
        }
        Ok(())
    }

    /// Walks a statement that is an `if`/`while`/`for` *body*: a `Block`
    /// body gets its own scope (discarded on exit), a bare statement body
    /// shares the caller's scope directly. See `scope.rs` for why this
    /// reproduces the original's `dict(symtab)`-vs-shared-`symtab` split.
    fn walk_body(&mut self, stmt: &Stmt, scope: &mut ScopeTree, ret_type: TypeName) -> Result<()> {
        if let Stmt::Block(block) = stmt {
            scope.push_scope();
            let result = self.walk_block(block, scope, ret_type);
            scope.pop_scope();
            result
        } else {
            self.walk_stmt(stmt, scope, ret_type)
        }
    }

    fn walk_stmt(&mut self, stmt: &Stmt, scope: &mut ScopeTree, ret_type: TypeName) -> Result<()> {
        match stmt {
            Stmt::VarDecl(decl) => self.walk_vardecl(decl, scope),
            Stmt::Expr(expr) => self.eval_expr_type(expr, scope).map(|_| ()),
            Stmt::If(stmt) => self.walk_if(stmt, scope, ret_type),
            Stmt::While(stmt) => self.walk_while(stmt, scope, ret_type),
            Stmt::For(stmt) => self.walk_for(stmt, scope, ret_type),
            Stmt::Return(stmt) => self.walk_return(stmt, scope, ret_type),
            Stmt::Block(block) => {
                scope.push_scope();
                let result = self.walk_block(block, scope, ret_type);
                scope.pop_scope();
                result
            }
        }
    }

    fn walk_vardecl(&mut self, decl: &VarDecl, scope: &mut ScopeTree) -> Result<()> {
        if let Some(init) = &decl.init {
            let init_type = self.eval_expr_type(init, scope)?;
            if !type_compatible(decl.var_type, init_type) {
                return Err(SemanticError::InitTypeMismatch {
                    name: self.name(decl.name),
                    dest: decl.var_type.as_str(),
                    src: init_type.as_str(),
                    span: decl.span,
                });
            }
        }
        scope
            .declare(decl.name, SymbolInfo { typ: decl.var_type, kind: SymbolKind::Var })
            .map_err(|_| SemanticError::DuplicateVariable { name: self.name(decl.name), span: decl.span })
    }

    fn walk_if(&mut self, stmt: &If, scope: &mut ScopeTree, ret_type: TypeName) -> Result<()> {
        let cond_type = self.eval_expr_type(&stmt.cond, scope)?;
        if cond_type != TypeName::Bool {
            return Err(SemanticError::ConditionNotBool { found: cond_type.as_str(), span: stmt.cond.span() });
        }
        self.walk_body(&stmt.then_branch, scope, ret_type)?;
        if let Some(else_branch) = &stmt.else_branch {
            self.walk_body(else_branch, scope, ret_type)?;
        }
        Ok(())
    }

    fn walk_while(&mut self, stmt: &While, scope: &mut ScopeTree, ret_type: TypeName) -> Result<()> {
        let cond_type = self.eval_expr_type(&stmt.cond, scope)?;
        if cond_type != TypeName::Bool {
            return Err(SemanticError::ConditionNotBool { found: cond_type.as_str(), span: stmt.cond.span() });
        }
        self.walk_body(&stmt.body, scope, ret_type)
    }

    fn walk_for(&mut self, stmt: &For, scope: &mut ScopeTree, ret_type: TypeName) -> Result<()> {
        if let Some(init) = &stmt.init {
            self.walk_stmt(init, scope, ret_type)?;
        }
        if let Some(cond) = &stmt.cond {
            let cond_type = self.eval_expr_type(cond, scope)?;
            if cond_type != TypeName::Bool {
                return Err(SemanticError::ConditionNotBool { found: cond_type.as_str(), span: cond.span() });
            }
        }
        if let Some(update) = &stmt.update {
            self.eval_expr_type(update, scope)?;
        }
        self.walk_body(&stmt.body, scope, ret_type)
    }

    fn walk_return(&mut self, stmt: &Return, scope: &mut ScopeTree, ret_type: TypeName) -> Result<()> {
        match &stmt.expr {
            None => {
                if ret_type != TypeName::Void {
                    return Err(SemanticError::MissingReturnValue { span: stmt.span });
                }
                Ok(())
            }
            Some(expr) => {
                let found = self.eval_expr_type(expr, scope)?;
                if !type_compatible(ret_type, found) {
                    return Err(SemanticError::ReturnTypeMismatch {
                        expected: ret_type.as_str(),
                        found: found.as_str(),
                        span: stmt.span,
                    });
                }
                Ok(())
            }
        }
    }

    fn eval_expr_type(&mut self, expr: &Expr, scope: &ScopeTree) -> Result<TypeName> {
        match expr {
            Expr::Literal(Literal { typ, .. }) => Ok(*typ),
            Expr::VarRef(VarRef { name, span }) => scope
                .resolve(*name)
                .map(|info| info.typ)
                .ok_or_else(|| SemanticError::UndeclaredVariable { name: self.name(*name), span: *span }),
            Expr::Assignment(assignment) => self.eval_assignment_type(assignment, scope),
            Expr::Unary(unary) => {
                let operand = self.eval_expr_type(&unary.expr, scope)?;
                if unary.op == UnOp::Not {
                    if operand != TypeName::Bool {
                        return Err(SemanticError::NotRequiresBool { found: operand.as_str(), span: unary.span });
                    }
                    Ok(TypeName::Bool)
                } else {
                    Ok(operand)
                }
            }
            Expr::Binary(binary) => {
                let lt = self.eval_expr_type(&binary.left, scope)?;
                let rt = self.eval_expr_type(&binary.right, scope)?;
                Ok(binary_result_type(binary.op, lt, rt))
            }
            Expr::FuncCall(call) => self.eval_call_type(call, scope),
        }
    }

    fn eval_assignment_type(&mut self, assignment: &Assignment, scope: &ScopeTree) -> Result<TypeName> {
        let target_info = scope.resolve(assignment.target).ok_or_else(|| SemanticError::AssignUndeclared {
            name: self.name(assignment.target),
            span: assignment.span,
        })?;
        let value_type = self.eval_expr_type(&assignment.value, scope)?;
        if !type_compatible(target_info.typ, value_type) {
            return Err(SemanticError::AssignTypeMismatch {
                name: self.name(assignment.target),
                dest: target_info.typ.as_str(),
                src: value_type.as_str(),
                span: assignment.span,
            });
        }
        Ok(target_info.typ)
    }

    /// Neither `print` nor a user function's arguments are evaluated here —
    /// matching `semantic.py`'s `eval_expr_type`'s `FuncCall` branch, which
    /// returns `'void'` or the callee's return type without ever touching
    /// `expr.args` (the one exception being `read`'s single-argument
    /// l-value check below). Arity/argument-type checking is a documented
    /// non-goal (spec §9 item 5); evaluating the args would additionally
    /// reject undeclared-variable arguments the original silently accepts.
    fn eval_call_type(&mut self, call: &FuncCall, scope: &ScopeTree) -> Result<TypeName> {
        let callee = self.name(call.name);
        if callee == "print" {
            return Ok(TypeName::Void);
        }
        if callee == "read" {
            let arg = call.args.first().ok_or(SemanticError::ReadExpectsVariable { span: call.span })?;
            let Expr::VarRef(var_ref) = arg else {
                return Err(SemanticError::ReadExpectsVariable { span: call.span });
            };
            if scope.resolve(var_ref.name).is_none() {
                return Err(SemanticError::ReadUndeclaredVariable {
                    name: self.name(var_ref.name),
                    span: call.span,
                });
            }
            return Ok(TypeName::Void);
        }
        match self.functions.get(&call.name) {
            Some(&ret_type) => Ok(ret_type),
            None => Err(SemanticError::UndefinedFunction { name: callee, span: call.span }),
        }
    }
}

/// `+ - * / %` yield `float` if either operand is `float`, else `int`.
/// Relational, equality, and logical operators always yield `bool`.
fn binary_result_type(op: BinOp, left: TypeName, right: TypeName) -> TypeName {
    if op.is_relational_or_equality() || op.is_logical() {
        return TypeName::Bool;
    }
    if left == TypeName::Float || right == TypeName::Float {
        TypeName::Float
    } else {
        TypeName::Int
    }
}

/// `dest == src`, `dest=float ∧ src=int`, `dest=int ∧ src=char`, or
/// `dest=char ∧ src=int` — no other combination is allowed (spec §4.3).
fn type_compatible(dest: TypeName, src: TypeName) -> bool {
    use TypeName::*;
    match (dest, src) {
        (d, s) if d == s => true,
        (Float, Int) => true,
        (Int, Char) => true,
        (Char, Int) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minic_lex::tokenize;

    fn analyze_src(src: &str) -> Result<()> {
        let mut interner = Interner::new();
        let tokens = tokenize(src, &mut interner);
        let program = minic_par::parse(tokens, &mut interner).expect("parse should succeed");
        analyze(&program, &interner)
    }

    #[test]
    fn accepts_a_well_typed_program() {
        assert!(analyze_src("int main() { int a = 2 + 3; return a; }").is_ok());
    }

    #[test]
    fn rejects_missing_main() {
        assert!(matches!(analyze_src("int foo() { return 0; }"), Err(SemanticError::MissingMain)));
    }

    #[test]
    fn rejects_shadowing_an_outer_variable_in_a_nested_block() {
        let result = analyze_src("int main() { int a = 1; { int a = 2; } return 0; }");
        assert!(matches!(result, Err(SemanticError::DuplicateVariable { .. })));
    }

    #[test]
    fn single_statement_body_declaration_leaks_into_enclosing_scope() {
        // Declaring `a` twice here must fail: the first `int a` inside the
        // bare (non-Block) if-body leaks into main's scope, colliding with
        // the second declaration.
        let result = analyze_src("int main() { if (true) int a = 1; int a = 2; return 0; }");
        assert!(matches!(result, Err(SemanticError::DuplicateVariable { .. })));
    }

    #[test]
    fn block_body_declaration_does_not_leak() {
        let result = analyze_src("int main() { if (true) { int a = 1; } int a = 2; return 0; }");
        assert!(result.is_ok());
    }

    #[test]
    fn int_to_float_widening_is_allowed_on_assignment() {
        assert!(analyze_src("int main() { float f = 1; return 0; }").is_ok());
    }

    #[test]
    fn float_to_int_narrowing_is_rejected() {
        let result = analyze_src("int main() { int i = 1.5; return 0; }");
        assert!(matches!(result, Err(SemanticError::InitTypeMismatch { .. })));
    }

    #[test]
    fn read_requires_a_declared_variable() {
        let result = analyze_src("int main() { read(x); return 0; }");
        assert!(matches!(result, Err(SemanticError::ReadUndeclaredVariable { .. })));
    }

    #[test]
    fn arithmetic_promotes_to_float_when_either_operand_is_float() {
        let mut interner = Interner::new();
        let tokens = tokenize("int main() { float f = 1 + 2.0; return 0; }", &mut interner);
        let program = minic_par::parse(tokens, &mut interner).unwrap();
        assert!(analyze(&program, &interner).is_ok());
    }
}
