//! TAC text rendering in the four dialects spec §4.7 requires (component C8).
//!
//! Grounded on `MiniC/ir_generator.py`'s `TACInstruction.__str__` (standard
//! dialect) and `MiniC/tac_printer.py`'s `TACPrinter` (quadruples, triples,
//! postfix). Because [`Instruction`](crate::tac::Instruction) is a closed
//! sum type with one variant per op, every dialect's match is exhaustive —
//! the source's `else: ...instr.op...` fallback for an unrecognized op
//! string has no counterpart here; there is no ninth op to fall back from.

use std::fmt::Write as _;

use crate::tac::Instruction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dialect {
    Standard,
    Quadruples,
    Triples,
    Postfix,
}

/// Renders `instructions` in `dialect`, one instruction per line.
pub fn print_tac(instructions: &[Instruction], dialect: Dialect) -> String {
    match dialect {
        Dialect::Standard => print_standard(instructions),
        Dialect::Quadruples => print_quadruples(instructions),
        Dialect::Triples => print_triples(instructions),
        Dialect::Postfix => print_postfix(instructions),
    }
}

fn print_standard(instructions: &[Instruction]) -> String {
    let mut out = String::new();
    for instr in instructions {
        writeln!(out, "{}", standard_line(instr)).unwrap();
    }
    out.pop(); // drop the trailing newline; callers add their own
    out
}

fn standard_line(instr: &Instruction) -> String {
    match instr {
        Instruction::Label(name) => format!("{name}:"),
        Instruction::Assign { dest, src1 } => format!("{dest} = {src1}"),
        Instruction::Binop { dest, src1, op, right } => format!("{dest} = {src1} {op} {right}"),
        Instruction::Unop { dest, op, src2 } => format!("{dest} = {op} {src2}"),
        Instruction::Jump { label } => format!("goto {label}"),
        Instruction::Cjump { cond, label } => format!("if {cond} goto {label}"),
        Instruction::Call { dest, name, args } => format!("{dest} = call {name}({})", args.join(", ")),
        Instruction::Return { dest } => match dest {
            Some(d) => format!("return {d}"),
            None => "return".to_string(),
        },
        Instruction::Param { value } => format!("param {value}"),
    }
}

fn print_quadruples(instructions: &[Instruction]) -> String {
    let mut lines = Vec::with_capacity(instructions.len());
    for (i, instr) in instructions.iter().enumerate() {
        let n = i + 1;
        let line = match instr {
            Instruction::Assign { dest, src1 } => format!("({n}) (assign, {src1}, -, {dest})"),
            Instruction::Binop { dest, src1, op, right } => format!("({n}) ({op}, {src1}, {right}, {dest})"),
            Instruction::Unop { dest, op, src2 } => format!("({n}) ({op}, {src2}, -, {dest})"),
            Instruction::Jump { label } => format!("({n}) (goto, -, -, {label})"),
            Instruction::Cjump { cond, label } => format!("({n}) (if, {cond}, -, {label})"),
            Instruction::Label(name) => format!("({n}) (label, -, -, {name})"),
            Instruction::Call { dest, name, args } => {
                let args_str = if args.is_empty() { "-".to_string() } else { args.join(", ") };
                format!("({n}) (call, {args_str}, {name}, {dest})")
            }
            Instruction::Return { dest } => {
                format!("({n}) (return, {}, -, -)", dest.as_deref().unwrap_or("-"))
            }
            Instruction::Param { value } => format!("({n}) (param, {value}, -, -)"),
        };
        lines.push(line);
    }
    lines.join("\n")
}

fn print_triples(instructions: &[Instruction]) -> String {
    let mut lines = Vec::with_capacity(instructions.len());
    for (i, instr) in instructions.iter().enumerate() {
        let n = i + 1;
        let line = match instr {
            Instruction::Assign { src1, .. } => format!("({n}) (assign, {src1}, -)"),
            Instruction::Binop { src1, op, right, .. } => format!("({n}) ({op}, {src1}, {right})"),
            Instruction::Unop { op, src2, .. } => format!("({n}) ({op}, {src2}, -)"),
            Instruction::Jump { label } => format!("({n}) (goto, -, {label})"),
            Instruction::Cjump { cond, label } => format!("({n}) (if, {cond}, {label})"),
            Instruction::Label(name) => format!("({n}) (label, -, {name})"),
            Instruction::Call { name, args, .. } => {
                let args_str = if args.is_empty() { "-".to_string() } else { args.join(", ") };
                format!("({n}) (call, {args_str}, {name})")
            }
            Instruction::Return { dest } => format!("({n}) (return, {}, -)", dest.as_deref().unwrap_or("-")),
            Instruction::Param { value } => format!("({n}) (param, {value}, -)"),
        };
        lines.push(line);
    }
    lines.join("\n")
}

fn print_postfix(instructions: &[Instruction]) -> String {
    let mut lines = Vec::with_capacity(instructions.len());
    for instr in instructions {
        let line = match instr {
            Instruction::Assign { dest, src1 } => format!("{src1} {dest} ="),
            Instruction::Binop { dest, src1, op, right } => format!("{src1} {right} {op} {dest} ="),
            Instruction::Unop { dest, op, src2 } => format!("{src2} {op} {dest} ="),
            Instruction::Jump { label } => format!("goto {label}"),
            Instruction::Cjump { cond, label } => format!("{cond} if goto {label}"),
            Instruction::Label(name) => format!("{name}:"),
            Instruction::Call { dest, name, args } => format!("{} {name} call {dest} =", args.join(" ")),
            Instruction::Return { dest } => match dest {
                Some(d) => format!("{d} return"),
                None => " return".to_string(),
            },
            Instruction::Param { value } => format!("{value} param"),
        };
        lines.push(line);
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Instruction> {
        vec![
            Instruction::Label("main".into()),
            Instruction::Assign { dest: "t1".into(), src1: "2".into() },
            Instruction::Binop { dest: "t2".into(), src1: "t1".into(), op: "+".into(), right: "3".into() },
            Instruction::Return { dest: Some("t2".into()) },
        ]
    }

    #[test]
    fn standard_dialect_matches_wire_forms() {
        let text = print_tac(&sample(), Dialect::Standard);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines, vec!["main:", "t1 = 2", "t2 = t1 + 3", "return t2"]);
    }

    #[test]
    fn quadruples_render_binop_op_from_the_packed_src2() {
        let text = print_tac(&sample(), Dialect::Quadruples);
        assert!(text.contains("(3) (+, t1, 3, t2)"));
    }

    #[test]
    fn triples_omit_the_result_column() {
        let text = print_tac(&sample(), Dialect::Triples);
        assert!(text.contains("(3) (+, t1, 3)"));
    }

    #[test]
    fn postfix_places_operator_after_operands() {
        let text = print_tac(&sample(), Dialect::Postfix);
        assert!(text.lines().any(|l| l == "t1 3 + t2 ="));
    }

    #[test]
    fn missing_return_value_renders_as_dash_in_quadruples() {
        let tac = vec![Instruction::Return { dest: None }];
        let text = print_tac(&tac, Dialect::Quadruples);
        assert_eq!(text, "(1) (return, -, -, -)");
    }

    #[test]
    fn bare_return_keeps_its_leading_space_in_postfix() {
        let tac = vec![Instruction::Return { dest: None }];
        let text = print_tac(&tac, Dialect::Postfix);
        assert_eq!(text, " return");
    }
}
