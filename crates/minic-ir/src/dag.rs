//! Single-basic-block expression DAG for common-subexpression detection
//! (spec component C6).
//!
//! Grounded on `MiniC/dag_generator.py`'s `DAGNode`/`DAGGenerator`: the same
//! `(op, left, right, value)` structural dedup key, the same `var_to_node`
//! rebinding on `assign`, and the same `users`/`temp_var` bookkeeping that
//! `detect_cse` reads back. `temp_var` is last-write-wins (every instruction
//! that rebinds a node to a new `dest` overwrites it), and `users` holds
//! *consumer* nodes — other nodes that reference this one as an operand —
//! not a list of duplicate destinations. That is the source's own,
//! admittedly loose, definition of "common subexpression" (spec §4.5: "this
//! is the raw source policy"); the only change this module makes is the one
//! spec §9 Open Question 3 asks for: building one DAG per basic block
//! instead of one across an entire function's control flow.

use minic_util::FxHashMap;

use crate::tac::Instruction;

#[derive(Debug, Clone)]
pub struct DagNode {
    pub op: String,
    pub left: Option<usize>,
    pub right: Option<usize>,
    pub value: Option<String>,
    pub users: Vec<usize>,
    pub temp_var: Option<String>,
}

type NodeKey = (String, Option<usize>, Option<usize>, Option<String>);

/// Builds a DAG over one basic block's worth of straight-line TAC.
///
/// Only `assign`/`binop`/`unop` feed the DAG, matching the source: `call`,
/// `label`, `jump`, `cjump`, `return`, and `param` are opaque to it (a call's
/// result becomes a fresh `var` leaf the next time something reads it).
#[derive(Default)]
pub struct DagBuilder {
    nodes: Vec<DagNode>,
    key_to_node: FxHashMap<NodeKey, usize>,
    var_to_node: FxHashMap<String, usize>,
}

impl DagBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(&mut self, instructions: &[Instruction]) {
        for instr in instructions {
            self.process(instr);
        }
    }

    fn process(&mut self, instr: &Instruction) {
        match instr {
            Instruction::Assign { dest, src1 } => {
                let node = self.operand_node(src1);
                self.bind(dest, node);
            }
            Instruction::Binop { dest, src1, op, right } => {
                let left = self.operand_node(src1);
                let right = self.operand_node(right);
                let node = self.get_or_create(op.clone(), Some(left), Some(right), None);
                self.bind(dest, node);
            }
            Instruction::Unop { dest, op, src2 } => {
                let operand = self.operand_node(src2);
                let node = self.get_or_create(op.clone(), Some(operand), None, None);
                self.bind(dest, node);
            }
            _ => {}
        }
    }

    fn bind(&mut self, dest: &str, node: usize) {
        self.var_to_node.insert(dest.to_string(), node);
        self.nodes[node].temp_var = Some(dest.to_string());
    }

    fn operand_node(&mut self, operand: &str) -> usize {
        if let Some(&idx) = self.var_to_node.get(operand) {
            idx
        } else {
            self.get_or_create("var".to_string(), None, None, Some(operand.to_string()))
        }
    }

    fn get_or_create(
        &mut self,
        op: String,
        left: Option<usize>,
        right: Option<usize>,
        value: Option<String>,
    ) -> usize {
        let key = (op.clone(), left, right, value.clone());
        if let Some(&idx) = self.key_to_node.get(&key) {
            return idx;
        }
        let idx = self.nodes.len();
        self.nodes.push(DagNode { op, left, right, value, users: Vec::new(), temp_var: None });
        self.key_to_node.insert(key, idx);
        if let Some(l) = left {
            self.nodes[l].users.push(idx);
        }
        if let Some(r) = right {
            self.nodes[r].users.push(idx);
        }
        idx
    }

    /// A node with more than one user and a bound `temp_var` is a CSE
    /// candidate; the group is the node's own `temp_var` followed by each
    /// bound user's `temp_var`, in user-insertion order (spec §4.5).
    pub fn detect_cse(&self) -> Vec<Vec<String>> {
        let mut groups = Vec::new();
        for node in &self.nodes {
            if node.users.len() <= 1 {
                continue;
            }
            let Some(canonical) = &node.temp_var else { continue };
            let mut group = vec![canonical.clone()];
            for &user_idx in &node.users {
                if let Some(user_temp) = &self.nodes[user_idx].temp_var {
                    group.push(user_temp.clone());
                }
            }
            if group.len() > 1 {
                groups.push(group);
            }
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binop(dest: &str, src1: &str, op: &str, right: &str) -> Instruction {
        Instruction::Binop { dest: dest.into(), src1: src1.into(), op: op.into(), right: right.into() }
    }

    #[test]
    fn a_value_consumed_by_two_later_computations_forms_a_cse_group() {
        // t1 = a + b; t2 = t1 * c; t3 = t1 - d  -- t1's node has two distinct
        // consumer nodes (t2's and t3's), so it is a CSE candidate.
        let program =
            vec![binop("t1", "a", "+", "b"), binop("t2", "t1", "*", "c"), binop("t3", "t1", "-", "d")];
        let mut dag = DagBuilder::new();
        dag.build(&program);
        let groups = dag.detect_cse();
        assert!(groups.iter().any(|g| g == &vec!["t1".to_string(), "t2".to_string(), "t3".to_string()]));
    }

    #[test]
    fn rebinding_a_node_to_a_later_dest_overwrites_its_canonical_temp_var() {
        // t1 = a + b; t2 = a + b (same node, reused); the node's temp_var is
        // now "t2" -- last write wins, exactly as in the source.
        let program = vec![binop("t1", "a", "+", "b"), binop("t2", "a", "+", "b")];
        let mut dag = DagBuilder::new();
        dag.build(&program);
        assert_eq!(dag.var_to_node.get("t1"), dag.var_to_node.get("t2"));
    }

    #[test]
    fn distinct_expressions_do_not_collide() {
        let program = vec![binop("t1", "a", "+", "b"), binop("t2", "a", "-", "b")];
        let mut dag = DagBuilder::new();
        dag.build(&program);
        assert!(dag.detect_cse().is_empty());
    }
}
