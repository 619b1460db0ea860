//! Stack pseudo-machine code generation (spec component C9).
//!
//! Grounded on `MiniC/codegen.py`'s `CodeGenerator`, line-for-line: one
//! `LOAD`/`STORE`/op-mnemonic/`JMP`/`CALL`/`PUSH`/`RET` sequence per TAC
//! instruction, no register allocation, no basic-block merging (both
//! explicit Non-goals).
//!
//! The one change from the source is Open Question 1: `cjump` lowers to
//! `JFALSE`, not `JTRUE`. The IR generator places the *then*-branch in the
//! fall-through path and branches to `else`/`end` only when the condition is
//! falsy; the source's codegen branched on *true*, which is backward. Fixing
//! the branch mnemonic (not the IR's instruction shape) is the Open Question
//! 1 resolution: the bug is in this file, not in `minic-ir`.

use minic_ir::Instruction;

/// Lowers optimized TAC to newline-joined pseudo-assembly text. Unix line
/// endings, no trailing header/footer (spec §6 "Pseudo-assembly format").
pub fn generate(instructions: &[Instruction]) -> String {
    let mut lines = Vec::new();
    for instr in instructions {
        generate_instruction(instr, &mut lines);
    }
    lines.join("\n")
}

fn generate_instruction(instr: &Instruction, out: &mut Vec<String>) {
    match instr {
        Instruction::Label(name) => out.push(format!("{name}:")),
        Instruction::Assign { dest, src1 } => {
            out.push(format!("LOAD {src1}"));
            out.push(format!("STORE {dest}"));
        }
        Instruction::Binop { dest, src1, op, right } => {
            out.push(format!("LOAD {src1}"));
            out.push(format!("LOAD {right}"));
            out.push(binop_mnemonic(op).to_string());
            out.push(format!("STORE {dest}"));
        }
        Instruction::Unop { dest, op, src2 } => {
            out.push(format!("LOAD {src2}"));
            out.push(unop_mnemonic(op).to_string());
            out.push(format!("STORE {dest}"));
        }
        Instruction::Jump { label } => out.push(format!("JMP {label}")),
        Instruction::Cjump { cond, label } => {
            out.push(format!("LOAD {cond}"));
            out.push(format!("JFALSE {label}"));
        }
        Instruction::Call { dest, name, args } => {
            for arg in args {
                out.push(format!("PUSH {arg}"));
            }
            out.push(format!("CALL {name}"));
            out.push(format!("STORE {dest}"));
        }
        Instruction::Return { dest } => {
            if let Some(dest) = dest {
                out.push(format!("LOAD {dest}"));
            }
            out.push("RET".to_string());
        }
        Instruction::Param { value } => out.push(format!("PUSH {value}")),
    }
}

/// Unrecognized op mnemonics never arise (`Instruction` is closed), so unlike
/// `codegen.py`'s `else: f"; {instr}"` fallback, every binop/unop symbol
/// reaching here is one of the fixed operator set spec §4.1 lexes.
fn binop_mnemonic(op: &str) -> &'static str {
    match op {
        "+" => "ADD",
        "-" => "SUB",
        "*" => "MUL",
        "/" => "DIV",
        "%" => "MOD",
        "&&" => "AND",
        "||" => "OR",
        "<" => "LT",
        ">" => "GT",
        "<=" => "LE",
        ">=" => "GE",
        "==" => "EQ",
        "!=" => "NE",
        other => unreachable!("unknown binary operator symbol {other:?}"),
    }
}

fn unop_mnemonic(op: &str) -> &'static str {
    match op {
        "-" => "NEG",
        "!" => "NOT",
        other => unreachable!("unknown unary operator symbol {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assign_lowers_to_load_store() {
        let tac = vec![Instruction::Assign { dest: "t1".into(), src1: "5".into() }];
        assert_eq!(generate(&tac), "LOAD 5\nSTORE t1");
    }

    #[test]
    fn binop_emits_both_loads_then_the_mnemonic_then_store() {
        let tac = vec![Instruction::Binop {
            dest: "t3".into(),
            src1: "t1".into(),
            op: "+".into(),
            right: "t2".into(),
        }];
        assert_eq!(generate(&tac), "LOAD t1\nLOAD t2\nADD\nSTORE t3");
    }

    #[test]
    fn cjump_branches_on_false_not_true() {
        let tac = vec![Instruction::Cjump { cond: "t1".into(), label: "L1".into() }];
        assert_eq!(generate(&tac), "LOAD t1\nJFALSE L1");
    }

    #[test]
    fn call_pushes_args_then_calls_then_stores_result() {
        let tac = vec![Instruction::Call {
            dest: "t2".into(),
            name: "print".into(),
            args: vec!["t1".into()],
        }];
        assert_eq!(generate(&tac), "PUSH t1\nCALL print\nSTORE t2");
    }

    #[test]
    fn bare_return_has_no_load() {
        let tac = vec![Instruction::Return { dest: None }];
        assert_eq!(generate(&tac), "RET");
    }
}
