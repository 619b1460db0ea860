//! AST → TAC lowering (spec component C5).
//!
//! Grounded on `MiniC/ir_generator.py`'s `IRGenerator`: one flat instruction
//! vector per program, fresh `tN`/`LN` counters that live on the generator
//! (never process-wide globals, so a fresh pipeline run starts clean), and a
//! single-pass recursive walk with no symbol-table bookkeeping of its own —
//! that work already happened in `minic-sem`.
//!
//! `cjump`'s shape is reproduced exactly as the source emits it: `If`/`While`/
//! `For` branch to `else`/`end` on the *condition's* temp, matching
//! `generate_statement`'s `TACInstruction('cjump', dest=cond_temp,
//! label=else_label)`. The bug this interacts with is not here — it is in
//! how `minic-gen`'s code generator lowers `cjump` to a stack-machine branch
//! (see that crate's docs).

use minic_par::ast::{
    Assignment, BinOp, Block, Expr, For, Function, If, Literal, Program, Return, Scalar, Stmt,
    TypeName, UnOp, VarDecl, While,
};
use minic_util::{Interner, Symbol};

use crate::tac::Instruction;

/// Lowers a type-checked `Program` to a flat TAC instruction sequence.
pub fn generate(program: &Program, interner: &Interner) -> Vec<Instruction> {
    let mut gen = IrGenerator::new(interner);
    gen.generate_program(program);
    gen.instructions
}

struct IrGenerator<'a> {
    interner: &'a Interner,
    temp_count: u32,
    label_count: u32,
    instructions: Vec<Instruction>,
}

impl<'a> IrGenerator<'a> {
    fn new(interner: &'a Interner) -> Self {
        Self { interner, temp_count: 0, label_count: 0, instructions: Vec::new() }
    }

    fn new_temp(&mut self) -> String {
        self.temp_count += 1;
        format!("t{}", self.temp_count)
    }

    fn new_label(&mut self) -> String {
        self.label_count += 1;
        format!("L{}", self.label_count)
    }

    fn name(&self, sym: Symbol) -> String {
        self.interner.resolve(sym).to_string()
    }

    fn emit(&mut self, instr: Instruction) {
        self.instructions.push(instr);
    }

    fn generate_program(&mut self, program: &Program) {
        for function in &program.functions {
            self.generate_function(function);
        }
    }

    fn generate_function(&mut self, function: &Function) {
        self.emit(Instruction::Label(self.name(function.name)));
        self.generate_block(&function.body);
        if function.ret_type == TypeName::Void {
            self.emit(Instruction::Return { dest: None });
        }
    }

    fn generate_block(&mut self, block: &Block) {
        for stmt in &block.statements {
            self.generate_stmt(stmt);
        }
    }

    fn generate_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::VarDecl(decl) => self.generate_vardecl(decl),
            Stmt::Expr(expr) => {
                self.generate_expr(expr);
            }
            Stmt::If(stmt) => self.generate_if(stmt),
            Stmt::While(stmt) => self.generate_while(stmt),
            Stmt::For(stmt) => self.generate_for(stmt),
            Stmt::Return(stmt) => self.generate_return(stmt),
            Stmt::Block(block) => self.generate_block(block),
        }
    }

    fn generate_vardecl(&mut self, decl: &VarDecl) {
        if let Some(init) = &decl.init {
            let value = self.generate_expr(init);
            self.emit(Instruction::Assign { dest: self.name(decl.name), src1: value });
        }
    }

    fn generate_if(&mut self, stmt: &If) {
        let cond = self.generate_expr(&stmt.cond);
        let else_label = self.new_label();
        self.emit(Instruction::Cjump { cond, label: else_label.clone() });
        self.generate_stmt(&stmt.then_branch);
        let end_label = self.new_label();
        self.emit(Instruction::Jump { label: end_label.clone() });
        self.emit(Instruction::Label(else_label));
        if let Some(else_branch) = &stmt.else_branch {
            self.generate_stmt(else_branch);
        }
        self.emit(Instruction::Label(end_label));
    }

    fn generate_while(&mut self, stmt: &While) {
        let start_label = self.new_label();
        self.emit(Instruction::Label(start_label.clone()));
        let cond = self.generate_expr(&stmt.cond);
        let end_label = self.new_label();
        self.emit(Instruction::Cjump { cond, label: end_label.clone() });
        self.generate_stmt(&stmt.body);
        self.emit(Instruction::Jump { label: start_label });
        self.emit(Instruction::Label(end_label));
    }

    fn generate_for(&mut self, stmt: &For) {
        if let Some(init) = &stmt.init {
            self.generate_stmt(init);
        }
        let start_label = self.new_label();
        self.emit(Instruction::Label(start_label.clone()));
        let end_label = self.new_label();
        if let Some(cond) = &stmt.cond {
            let cond_val = self.generate_expr(cond);
            self.emit(Instruction::Cjump { cond: cond_val, label: end_label.clone() });
        }
        self.generate_stmt(&stmt.body);
        if let Some(update) = &stmt.update {
            self.generate_expr(update);
        }
        self.emit(Instruction::Jump { label: start_label });
        self.emit(Instruction::Label(end_label));
    }

    fn generate_return(&mut self, stmt: &Return) {
        let dest = stmt.expr.as_ref().map(|expr| self.generate_expr(expr));
        self.emit(Instruction::Return { dest });
    }

    /// Lowers `expr`, returning the name (temp or variable) holding its value.
    fn generate_expr(&mut self, expr: &Expr) -> String {
        match expr {
            Expr::Literal(lit) => self.generate_literal(lit),
            Expr::VarRef(var_ref) => self.name(var_ref.name),
            Expr::Unary(unary) => {
                let operand = self.generate_expr(&unary.expr);
                let dest = self.new_temp();
                self.emit(Instruction::Unop {
                    dest: dest.clone(),
                    op: unop_symbol(unary.op).to_string(),
                    src2: operand,
                });
                dest
            }
            Expr::Binary(binary) => {
                let left = self.generate_expr(&binary.left);
                let right = self.generate_expr(&binary.right);
                let dest = self.new_temp();
                self.emit(Instruction::Binop {
                    dest: dest.clone(),
                    src1: left,
                    op: binop_symbol(binary.op).to_string(),
                    right,
                });
                dest
            }
            Expr::Assignment(assignment) => self.generate_assignment(assignment),
            Expr::FuncCall(call) => self.generate_call(&self.name(call.name), &call.args),
        }
    }

    fn generate_assignment(&mut self, assignment: &Assignment) -> String {
        let value = self.generate_expr(&assignment.value);
        let dest = self.name(assignment.target);
        self.emit(Instruction::Assign { dest: dest.clone(), src1: value });
        dest
    }

    fn generate_call(&mut self, name: &str, args: &[Expr]) -> String {
        let mut arg_values = Vec::with_capacity(args.len());
        for arg in args {
            arg_values.push(self.generate_expr(arg));
        }
        for value in &arg_values {
            self.emit(Instruction::Param { value: value.clone() });
        }
        let dest = self.new_temp();
        self.emit(Instruction::Call { dest: dest.clone(), name: name.to_string(), args: arg_values });
        dest
    }

    fn generate_literal(&mut self, lit: &Literal) -> String {
        let text = literal_text(&lit.value, self.interner);
        let dest = self.new_temp();
        self.emit(Instruction::Assign { dest: dest.clone(), src1: text });
        dest
    }
}

fn binop_symbol(op: BinOp) -> &'static str {
    op.as_str()
}

fn unop_symbol(op: UnOp) -> &'static str {
    op.as_str()
}

/// The wire text a literal lowers to — what `str(expr.value)` would have
/// produced in the source. Booleans print as `true`/`false` (MiniC's own
/// spelling), not Python's capitalized `True`/`False`: that capitalization is
/// an accident of the source's host language, not a documented wire
/// requirement, and spec §3/§4.7 only ever show digit-string literals.
fn literal_text(value: &Scalar, interner: &Interner) -> String {
    match value {
        Scalar::Int(n) => n.to_string(),
        Scalar::Float(f) => format!("{f}"),
        Scalar::Char(c) => c.to_string(),
        Scalar::Bool(b) => if *b { "true" } else { "false" }.to_string(),
        Scalar::Str(sym) => interner.resolve(*sym).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minic_par::parse;

    fn generate_src(src: &str) -> (Vec<Instruction>, Interner) {
        let mut interner = Interner::new();
        let tokens = minic_lex::tokenize(src, &mut interner);
        let program = parse(tokens, &mut interner).expect("parses");
        let tac = generate(&program, &interner);
        (tac, interner)
    }

    #[test]
    fn literal_lowers_to_a_fresh_temp_assignment() {
        let (tac, _) = generate_src("int main(){ int a = 2 + 3 * 4; return a; }");
        assert!(matches!(&tac[1], Instruction::Assign { src1, .. } if src1 == "2"));
    }

    #[test]
    fn if_else_emits_one_cjump_one_jump_and_two_labels() {
        let (tac, _) = generate_src(
            "int main(){ int x = 5; if (x > 3) { print(1); } else { print(0); } return 0; }",
        );
        let cjumps = tac.iter().filter(|i| matches!(i, Instruction::Cjump { .. })).count();
        let jumps = tac.iter().filter(|i| matches!(i, Instruction::Jump { .. })).count();
        let labels = tac.iter().filter(|i| matches!(i, Instruction::Label(_))).count();
        assert_eq!(cjumps, 1);
        assert_eq!(jumps, 1);
        // one label for the function itself, plus else/end
        assert_eq!(labels, 3);
    }

    #[test]
    fn void_function_gets_an_implicit_trailing_return() {
        let (tac, _) = generate_src("void f(){ int a = 1; }");
        assert!(matches!(tac.last(), Some(Instruction::Return { dest: None })));
    }

    #[test]
    fn call_always_allocates_a_dest_temp_even_for_print() {
        let (tac, _) = generate_src("int main(){ print(1); return 0; }");
        assert!(tac.iter().any(|i| matches!(i, Instruction::Call { name, .. } if name == "print")));
    }
}
