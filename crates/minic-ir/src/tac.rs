//! Three-address code: the linear IR produced by [`crate::gen`] and consumed
//! by [`crate::optimize`], [`crate::printer`], and `minic-gen`.
//!
//! The source represents every instruction with one flat class carrying
//! `op`/`dest`/`src1`/`src2`/`label` fields, regardless of what those fields
//! mean for a given `op` (`dest` is a write target for `assign`/`binop`, but
//! a *read* for `cjump`/`return`/`param`). `Instruction` below is a sum type
//! with one variant per `op`, naming each field for what it actually holds;
//! the wire-level wording in each doc line is the §3 field name it replaces,
//! kept so the mapping back to the textual format stays obvious.
//!
//! Operands stay plain `String`s rather than a richer `Operand` enum: a
//! temporary, a variable name, and a decimal-literal text all flow through
//! the same constant-propagation and renaming machinery, exactly as they did
//! in the source's stringly-typed model.

/// One TAC instruction. See module docs for the field-naming rationale.
#[derive(Clone, Debug, PartialEq)]
pub enum Instruction {
    /// Wire form: `label:`
    Label(String),
    /// Wire form: `dest = src1`
    Assign { dest: String, src1: String },
    /// Wire form: `dest = src1 op right` (src2 = "op right" on the wire)
    Binop { dest: String, src1: String, op: String, right: String },
    /// Wire form: `dest = op src2` (src1 holds the operator symbol on the wire)
    Unop { dest: String, op: String, src2: String },
    /// Wire form: `goto label`
    Jump { label: String },
    /// Wire form: `if cond goto label` (§3 calls `cond` field `dest`)
    Cjump { cond: String, label: String },
    /// Wire form: `dest = call name(args...)`. `dest` is always present — the
    /// source's generator allocates a fresh temp for every call, including
    /// `print`/`read`, whose result nothing downstream reads. That unused
    /// temp is exactly what makes dead-code elimination eligible to drop a
    /// side-effecting call entirely (see `optimize::dead_code_eliminate`).
    Call { dest: String, name: String, args: Vec<String> },
    /// Wire form: `return dest?`
    Return { dest: Option<String> },
    /// Wire form: `param value` (§3 calls `value` field `dest`)
    Param { value: String },
}

impl Instruction {
    /// The variable/temporary this instruction writes, for passes that must
    /// never rewrite a write target (constant propagation, Open Question 2).
    pub fn written_dest(&self) -> Option<&str> {
        match self {
            Instruction::Assign { dest, .. }
            | Instruction::Binop { dest, .. }
            | Instruction::Unop { dest, .. }
            | Instruction::Call { dest, .. } => Some(dest),
            _ => None,
        }
    }

    /// Operand positions a constant-propagation rewrite may substitute into:
    /// `src1`, `src2`'s right operand, and `call`'s argument list (spec
    /// §4.6 step 1). Never includes a write target, and never includes
    /// `cjump`'s condition, `return`'s value, or `param`'s value — those are
    /// reads but the spec's fixed propagation pass does not rewrite them.
    pub fn propagation_targets_mut(&mut self) -> Vec<&mut String> {
        match self {
            Instruction::Assign { src1, .. } => vec![src1],
            Instruction::Binop { src1, right, .. } => vec![src1, right],
            Instruction::Unop { src2, .. } => vec![src2],
            Instruction::Call { args, .. } => args.iter_mut().collect(),
            _ => vec![],
        }
    }

    /// Every string slot that names a value (temp, var, or literal text),
    /// including write targets. Used by CSE renaming, which — unlike
    /// propagation — does rewrite `dest` (spec §4.6 step 4).
    pub fn all_name_slots_mut(&mut self) -> Vec<&mut String> {
        match self {
            Instruction::Label(_) | Instruction::Jump { .. } => vec![],
            Instruction::Assign { dest, src1 } => vec![dest, src1],
            Instruction::Binop { dest, src1, right, .. } => vec![dest, src1, right],
            Instruction::Unop { dest, src2, .. } => vec![dest, src2],
            Instruction::Cjump { cond, .. } => vec![cond],
            Instruction::Call { dest, args, .. } => {
                let mut slots: Vec<&mut String> = vec![dest];
                slots.extend(args.iter_mut());
                slots
            }
            Instruction::Return { dest } => dest.as_mut().into_iter().collect(),
            Instruction::Param { value } => vec![value],
        }
    }

    /// Operands this instruction reads, for backward liveness analysis.
    pub fn read_operands(&self) -> Vec<&str> {
        match self {
            Instruction::Label(_) | Instruction::Jump { .. } => vec![],
            Instruction::Assign { src1, .. } => vec![src1.as_str()],
            Instruction::Binop { src1, right, .. } => vec![src1.as_str(), right.as_str()],
            Instruction::Unop { src2, .. } => vec![src2.as_str()],
            Instruction::Cjump { cond, .. } => vec![cond.as_str()],
            Instruction::Call { args, .. } => args.iter().map(String::as_str).collect(),
            Instruction::Return { dest } => dest.iter().map(String::as_str).collect(),
            Instruction::Param { value } => vec![value.as_str()],
        }
    }

    /// The source's constant-propagation kill scan treats every instruction
    /// not explicitly an `assign`/`binop`/`unop` as "else: kill dest",
    /// reusing the same flat `dest` field whether it is a write (`call`) or
    /// a read (`cjump`'s condition, `return`'s value, `param`'s pushed
    /// value). This accessor names that literal field per op so the scan
    /// can reproduce the behavior exactly, warts included — unlike
    /// [`Instruction::written_dest`], which distinguishes a real write
    /// target from a read for passes where that distinction matters (DCE).
    pub fn legacy_dest_field(&self) -> Option<&str> {
        match self {
            Instruction::Cjump { cond, .. } => Some(cond),
            Instruction::Call { dest, .. } => Some(dest),
            Instruction::Return { dest } => dest.as_deref(),
            Instruction::Param { value } => Some(value),
            _ => None,
        }
    }

    /// True for `label`/`jump`/`cjump`: control-flow shape that basic-block
    /// scoped passes (DAG building, CSE) must treat as a block boundary.
    pub fn is_control_flow(&self) -> bool {
        matches!(self, Instruction::Label(_) | Instruction::Jump { .. } | Instruction::Cjump { .. })
    }
}

/// True when every byte of `s` is an ASCII decimal digit and `s` is
/// non-empty — the source's `str.isdigit()` check that gates which literals
/// constant propagation and folding touch. Only non-negative integer text
/// qualifies: floats (`3.14`) and negative literals never fold here, which
/// mirrors the source exactly (an accepted laxity, not a bug to fix).
pub fn is_decimal_digit_string(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_digit_string_accepts_only_plain_nonnegative_integers() {
        assert!(is_decimal_digit_string("14"));
        assert!(is_decimal_digit_string("0"));
        assert!(!is_decimal_digit_string("3.14"));
        assert!(!is_decimal_digit_string("-5"));
        assert!(!is_decimal_digit_string(""));
        assert!(!is_decimal_digit_string("t1"));
    }

    #[test]
    fn propagation_targets_never_include_a_write_target() {
        let mut instr = Instruction::Binop {
            dest: "t1".into(),
            src1: "a".into(),
            op: "+".into(),
            right: "b".into(),
        };
        for slot in instr.propagation_targets_mut() {
            assert_ne!(slot.as_str(), "t1");
        }
    }

    #[test]
    fn call_always_carries_a_dest_even_for_void_builtins() {
        let instr = Instruction::Call { dest: "t2".into(), name: "print".into(), args: vec!["t1".into()] };
        assert_eq!(instr.written_dest(), Some("t2"));
        assert_eq!(instr.read_operands(), vec!["t1"]);
    }
}
