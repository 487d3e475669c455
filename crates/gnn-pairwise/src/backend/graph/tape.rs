//! A small reverse-mode tape over 2-D arrays.
//!
//! Nodes are appended in evaluation order, so walking the tape backwards
//! visits every node after all of its consumers.

use ndarray::{s, Array2, ArrayView2, Axis};

use crate::mmd::MmdCriterion;

/// Handle to a node on a [`Tape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(usize);

#[derive(Debug)]
enum Op {
    Leaf,
    MatMul(NodeId, NodeId),
    /// Broadcast a `1×k` row over every row of the first operand.
    AddRow(NodeId, NodeId),
    Relu(NodeId),
    ConcatCols(NodeId, NodeId),
    /// Scalar criterion; holds `∂loss/∂input` when gradients are recorded.
    Mmd {
        input: NodeId,
        local_grad: Option<Array2<f64>>,
    },
}

#[derive(Debug)]
struct Node {
    value: Array2<f64>,
    op: Op,
}

#[derive(Debug)]
pub struct Tape {
    nodes: Vec<Node>,
    record_grad: bool,
}

impl Tape {
    /// `record_grad = false` skips the criterion's gradient computation.
    pub fn new(record_grad: bool) -> Self {
        Self {
            nodes: Vec::with_capacity(16),
            record_grad,
        }
    }

    pub fn value(&self, id: NodeId) -> &Array2<f64> {
        &self.nodes[id.0].value
    }

    pub fn leaf(&mut self, value: Array2<f64>) -> NodeId {
        self.push(value, Op::Leaf)
    }

    pub fn matmul(&mut self, a: NodeId, b: NodeId) -> NodeId {
        let value = self.value(a).dot(self.value(b));
        self.push(value, Op::MatMul(a, b))
    }

    pub fn add_row(&mut self, a: NodeId, row: NodeId) -> NodeId {
        let value = self.value(a) + self.value(row);
        self.push(value, Op::AddRow(a, row))
    }

    pub fn relu(&mut self, a: NodeId) -> NodeId {
        let value = self.value(a).mapv(|v| v.max(0.0));
        self.push(value, Op::Relu(a))
    }

    pub fn concat_cols(&mut self, a: NodeId, b: NodeId) -> NodeId {
        let (left, right) = (self.value(a), self.value(b));
        let mut value = Array2::zeros((left.nrows(), left.ncols() + right.ncols()));
        value.slice_mut(s![.., ..left.ncols()]).assign(left);
        value.slice_mut(s![.., left.ncols()..]).assign(right);
        self.push(value, Op::ConcatCols(a, b))
    }

    /// `1×1` node holding the criterion between `input` and `observed`.
    pub fn mmd(
        &mut self,
        input: NodeId,
        observed: ArrayView2<'_, f64>,
        criterion: &MmdCriterion,
    ) -> NodeId {
        let generated = self.value(input).view();
        let (loss, local_grad) = if self.record_grad {
            let (loss, grad) = criterion.loss_and_grad(generated, observed);
            (loss, Some(grad))
        } else {
            (criterion.loss(generated, observed), None)
        };
        self.push(Array2::from_elem((1, 1), loss), Op::Mmd { input, local_grad })
    }

    /// Gradients of the scalar `root` with respect to every node, indexed
    /// like the tape. Nodes that do not reach `root` get zeros.
    pub fn backward(&self, root: NodeId) -> Gradients {
        let mut grads: Vec<Array2<f64>> = self
            .nodes
            .iter()
            .map(|n| Array2::zeros(n.value.raw_dim()))
            .collect();
        grads[root.0].fill(1.0);

        for idx in (0..=root.0).rev() {
            let g = std::mem::replace(&mut grads[idx], Array2::zeros((0, 0)));
            match &self.nodes[idx].op {
                Op::Leaf => {}
                Op::MatMul(a, b) => {
                    let da = g.dot(&self.value(*b).t());
                    let db = self.value(*a).t().dot(&g);
                    grads[a.0] += &da;
                    grads[b.0] += &db;
                }
                Op::AddRow(a, row) => {
                    grads[a.0] += &g;
                    grads[row.0] += &g.sum_axis(Axis(0)).insert_axis(Axis(0));
                }
                Op::Relu(a) => {
                    let masked = ndarray::Zip::from(&g)
                        .and(self.value(*a))
                        .map_collect(|&d, &x| if x > 0.0 { d } else { 0.0 });
                    grads[a.0] += &masked;
                }
                Op::ConcatCols(a, b) => {
                    let split = self.value(*a).ncols();
                    grads[a.0] += &g.slice(s![.., ..split]);
                    grads[b.0] += &g.slice(s![.., split..]);
                }
                Op::Mmd { input, local_grad } => {
                    if let Some(local) = local_grad {
                        grads[input.0].scaled_add(g[[0, 0]], local);
                    }
                }
            }
            grads[idx] = g;
        }

        Gradients { grads }
    }

    fn push(&mut self, value: Array2<f64>, op: Op) -> NodeId {
        self.nodes.push(Node { value, op });
        NodeId(self.nodes.len() - 1)
    }
}

/// Result of [`Tape::backward`].
#[derive(Debug)]
pub struct Gradients {
    grads: Vec<Array2<f64>>,
}

impl Gradients {
    pub fn get(&self, id: NodeId) -> &Array2<f64> {
        &self.grads[id.0]
    }

    pub fn take(&mut self, id: NodeId) -> Array2<f64> {
        std::mem::replace(&mut self.grads[id.0], Array2::zeros((0, 0)))
    }
}
