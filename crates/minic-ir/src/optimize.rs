//! TAC → TAC optimizer (spec component C7): constant propagation, constant
//! folding, a second propagation pass, basic-block CSE, and liveness-based
//! dead code elimination, run to a single fixed-point schedule (never
//! iterated to convergence — spec §4.6 "Ordering rule").
//!
//! Grounded on `MiniC/optimizer.py`'s `TACOptimizer`, with the four fixes
//! spec §9 calls for:
//!
//! 1. (Fixed in `minic-gen`, not here — `cjump`'s shape is unchanged by the
//!    optimizer; only the code generator's branch polarity was wrong.)
//! 2. Constant propagation here never rewrites a write target — see
//!    [`Instruction::propagation_targets_mut`], which excludes `dest`.
//! 3. CSE is scoped per basic block: [`split_into_blocks`] splits on
//!    `label`/`jump`/`cjump`, and [`common_subexpression_eliminate`] builds a
//!    fresh [`crate::dag::DagBuilder`] for each block instead of one across
//!    the whole function.
//! 4. Dead code elimination ties a `param`'s liveness to its `call`'s — see
//!    [`dead_code_eliminate`]'s `call_is_live` tracking.

use minic_util::{FxHashMap, FxHashSet};

use crate::dag::DagBuilder;
use crate::tac::{is_decimal_digit_string, Instruction};

/// Runs the fixed `(propagate, fold, propagate, cse, dce)` schedule.
pub fn optimize(instructions: Vec<Instruction>) -> Vec<Instruction> {
    let instructions = constant_propagate(instructions);
    let instructions = constant_fold(instructions);
    let instructions = constant_propagate(instructions);
    let instructions = common_subexpression_eliminate(instructions);
    dead_code_eliminate(instructions)
}

/// Forward scan: `assign dest = N` for a decimal-digit `N` binds `dest`;
/// copying a bound variable propagates its binding; any other write kills
/// `dest`'s binding. A second pass then substitutes bound values into
/// `src1`, `binop`'s right operand, and `call` argument lists only — never
/// into a write target (Open Question 2).
pub fn constant_propagate(mut instructions: Vec<Instruction>) -> Vec<Instruction> {
    let mut constants: FxHashMap<String, String> = FxHashMap::default();
    for instr in &instructions {
        match instr {
            Instruction::Assign { dest, src1 } => {
                if is_decimal_digit_string(src1) {
                    constants.insert(dest.clone(), src1.clone());
                } else if let Some(bound) = constants.get(src1).cloned() {
                    constants.insert(dest.clone(), bound);
                } else {
                    constants.remove(dest);
                }
            }
            Instruction::Binop { .. } | Instruction::Unop { .. } => {
                // Computed in the folding pass; propagation doesn't bind these.
            }
            _ => {
                if let Some(dest) = instr.legacy_dest_field() {
                    constants.remove(dest);
                }
            }
        }
    }

    for instr in &mut instructions {
        for slot in instr.propagation_targets_mut() {
            if let Some(bound) = constants.get(slot.as_str()) {
                *slot = bound.clone();
            }
        }
    }
    instructions
}

/// Folds a `binop`/`unop` whose operand(s) are decimal-digit literals into a
/// plain `assign`. Integer semantics only: `/` truncates, comparisons yield
/// `0`/`1` (spec §4.6 "Numeric semantics").
pub fn constant_fold(instructions: Vec<Instruction>) -> Vec<Instruction> {
    instructions
        .into_iter()
        .map(|instr| match instr {
            Instruction::Binop { dest, src1, op, right }
                if is_decimal_digit_string(&src1) && is_decimal_digit_string(&right) =>
            {
                let left: i64 = src1.parse().expect("digit string");
                let right_val: i64 = right.parse().expect("digit string");
                let result = compute_constant(&op, left, right_val);
                Instruction::Assign { dest, src1: result.to_string() }
            }
            Instruction::Unop { dest, op, src2 } if is_decimal_digit_string(&src2) => {
                let operand: i64 = src2.parse().expect("digit string");
                let result = match op.as_str() {
                    "-" => -operand,
                    "!" => i64::from(operand == 0),
                    _ => operand,
                };
                Instruction::Assign { dest, src1: result.to_string() }
            }
            other => other,
        })
        .collect()
}

/// Signed 64-bit arithmetic with truncating division. Overflow wraps,
/// matching Rust's `wrapping_*` integer ops — a consistent, documented
/// choice where the source (arbitrary-precision Python ints) left the
/// behavior unspecified (spec §4.6 "Numeric semantics").
fn compute_constant(op: &str, left: i64, right: i64) -> i64 {
    match op {
        "+" => left.wrapping_add(right),
        "-" => left.wrapping_sub(right),
        "*" => left.wrapping_mul(right),
        "/" => left.wrapping_div(right),
        "%" => left.wrapping_rem(right),
        "&&" => i64::from(left != 0 && right != 0),
        "||" => i64::from(left != 0 || right != 0),
        "<" => i64::from(left < right),
        ">" => i64::from(left > right),
        "<=" => i64::from(left <= right),
        ">=" => i64::from(left >= right),
        "==" => i64::from(left == right),
        "!=" => i64::from(left != right),
        _ => 0,
    }
}

/// Splits `instructions` on `label`/`jump`/`cjump` boundaries and runs CSE
/// independently within each straight-line run, fixing the whole-function
/// unsoundness in Open Question 3.
pub fn common_subexpression_eliminate(instructions: Vec<Instruction>) -> Vec<Instruction> {
    let mut result = Vec::with_capacity(instructions.len());
    let mut block: Vec<Instruction> = Vec::new();
    for instr in instructions {
        if instr.is_control_flow() {
            result.extend(cse_block(std::mem::take(&mut block)));
            result.push(instr);
        } else {
            block.push(instr);
        }
    }
    result.extend(cse_block(block));
    result
}

fn cse_block(mut block: Vec<Instruction>) -> Vec<Instruction> {
    let mut dag = DagBuilder::new();
    dag.build(&block);
    let groups = dag.detect_cse();

    let mut rename: FxHashMap<String, String> = FxHashMap::default();
    for group in &groups {
        let canonical = &group[0];
        for duplicate in &group[1..] {
            if duplicate != canonical {
                rename.entry(duplicate.clone()).or_insert_with(|| canonical.clone());
            }
        }
    }

    for instr in &mut block {
        for slot in instr.all_name_slots_mut() {
            if let Some(canonical) = rename.get(slot.as_str()) {
                *slot = canonical.clone();
            }
        }
    }
    block
}

/// Backward liveness pass. `written_dest`-bearing instructions
/// (`assign`/`binop`/`unop`/`call`) are removed when their target is not
/// live; everything else (`label`/`jump`/`cjump`/`return`) is always kept and
/// its operands always become live.
///
/// `param` is the one exception: rather than being an unconditional use (the
/// source's bug — Open Question 4), its liveness is tied to the `call` that
/// immediately follows its contiguous run of sibling `param`s. A dead call
/// drops its params along with it.
pub fn dead_code_eliminate(instructions: Vec<Instruction>) -> Vec<Instruction> {
    let mut live: FxHashSet<String> = FxHashSet::default();
    let mut kept = Vec::with_capacity(instructions.len());
    let mut call_is_live: Option<bool> = None;

    for instr in instructions.into_iter().rev() {
        if let Instruction::Param { value } = &instr {
            let keep = call_is_live.unwrap_or(true);
            if keep {
                live.insert(value.clone());
                kept.push(instr);
            }
            continue;
        }
        call_is_live = None;

        match instr.written_dest() {
            Some(dest) => {
                let dest = dest.to_string();
                let is_live = live.remove(&dest);
                if matches!(instr, Instruction::Call { .. }) {
                    call_is_live = Some(is_live);
                }
                if is_live {
                    for op in instr.read_operands() {
                        live.insert(op.to_string());
                    }
                    kept.push(instr);
                }
            }
            None => {
                for op in instr.read_operands() {
                    live.insert(op.to_string());
                }
                kept.push(instr);
            }
        }
    }
    kept.reverse();
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assign(dest: &str, src1: &str) -> Instruction {
        Instruction::Assign { dest: dest.into(), src1: src1.into() }
    }

    fn binop(dest: &str, src1: &str, op: &str, right: &str) -> Instruction {
        Instruction::Binop { dest: dest.into(), src1: src1.into(), op: op.into(), right: right.into() }
    }

    #[test]
    fn folds_arithmetic_constant_expression() {
        // t1 = 2; t2 = 3; t3 = 4; t4 = t2 * t3; t5 = t1 + t4
        let tac = vec![
            assign("t1", "2"),
            assign("t2", "3"),
            assign("t3", "4"),
            binop("t4", "t2", "*", "t3"),
            binop("t5", "t1", "+", "t4"),
            Instruction::Return { dest: Some("t5".into()) },
        ];
        let optimized = optimize(tac);
        assert!(optimized.iter().any(|i| matches!(i, Instruction::Assign { src1, .. } if src1 == "14")));
    }

    #[test]
    fn propagation_never_corrupts_a_write_target() {
        // t1 = 5; x = t1  -- propagation must rewrite src1, not turn `x` into "5"
        let tac = vec![assign("t1", "5"), assign("x", "t1")];
        let optimized = constant_propagate(tac);
        assert!(matches!(&optimized[1], Instruction::Assign { dest, src1 } if dest == "x" && src1 == "5"));
    }

    #[test]
    fn dead_assignment_to_unused_variable_is_removed() {
        // int a = 5; int b = 7; return a;  -- `b`'s instruction must be gone
        let tac = vec![assign("a", "5"), assign("b", "7"), Instruction::Return { dest: Some("a".into()) }];
        let optimized = optimize(tac);
        assert!(!optimized.iter().any(|i| i.written_dest() == Some("b")));
    }

    #[test]
    fn dead_call_removes_its_params_too() {
        let tac = vec![
            assign("t1", "5"),
            Instruction::Param { value: "t1".into() },
            Instruction::Call { dest: "t2".into(), name: "unused_fn".into(), args: vec!["t1".into()] },
            Instruction::Return { dest: None },
        ];
        let optimized = dead_code_eliminate(tac);
        assert!(!optimized.iter().any(|i| matches!(i, Instruction::Param { .. })));
        assert!(!optimized.iter().any(|i| matches!(i, Instruction::Call { .. })));
    }

    #[test]
    fn live_call_keeps_its_params() {
        let tac = vec![
            assign("t1", "5"),
            Instruction::Param { value: "t1".into() },
            Instruction::Call { dest: "t2".into(), name: "f".into(), args: vec!["t1".into()] },
            Instruction::Return { dest: Some("t2".into()) },
        ];
        let optimized = dead_code_eliminate(tac);
        assert!(optimized.iter().any(|i| matches!(i, Instruction::Param { .. })));
        assert!(optimized.iter().any(|i| matches!(i, Instruction::Call { .. })));
    }

    #[test]
    fn cse_is_idempotent() {
        let tac = vec![binop("t1", "a", "+", "b"), binop("t2", "t1", "*", "c"), binop("t3", "t1", "-", "d")];
        let once = common_subexpression_eliminate(tac.clone());
        let twice = common_subexpression_eliminate(once.clone());
        assert_eq!(once, twice);
    }
}
