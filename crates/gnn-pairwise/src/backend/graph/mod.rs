//! Graph backend: records the network and criterion on a tape and
//! differentiates it in reverse mode.

pub mod tape;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

use self::tape::{NodeId, Tape};
use super::{BackendKind, DirectionBackend};
use crate::mmd::MmdCriterion;
use crate::model::{GenerativeModel, ParameterSet};

#[derive(Debug, Clone, Copy, Default)]
pub struct GraphBackend;

/// Node handles for one recorded pass.
struct Recorded {
    tape: Tape,
    w_in: NodeId,
    b_in: NodeId,
    w_out: NodeId,
    b_out: NodeId,
    loss: NodeId,
}

impl GraphBackend {
    fn record(
        model: &GenerativeModel,
        cause: ArrayView1<'_, f64>,
        noise: ArrayView1<'_, f64>,
        observed: ArrayView2<'_, f64>,
        criterion: &MmdCriterion,
        record_grad: bool,
    ) -> Recorded {
        let p = model.parameters();
        let mut tape = Tape::new(record_grad);

        let cause = tape.leaf(column(cause));
        let noise = tape.leaf(column(noise));
        let w_in = tape.leaf(p.w_in.clone());
        let b_in = tape.leaf(row(&p.b_in));
        let w_out = tape.leaf(p.w_out.clone());
        let b_out = tape.leaf(row(&p.b_out));

        let input = tape.concat_cols(cause, noise);
        let pre = tape.matmul(input, w_in);
        let pre = tape.add_row(pre, b_in);
        let hidden = tape.relu(pre);
        let out = tape.matmul(hidden, w_out);
        let out = tape.add_row(out, b_out);
        let generated = tape.concat_cols(cause, out);
        let loss = tape.mmd(generated, observed, criterion);

        Recorded {
            tape,
            w_in,
            b_in,
            w_out,
            b_out,
            loss,
        }
    }
}

impl DirectionBackend for GraphBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Graph
    }

    fn loss(
        &self,
        model: &GenerativeModel,
        cause: ArrayView1<'_, f64>,
        noise: ArrayView1<'_, f64>,
        observed: ArrayView2<'_, f64>,
        criterion: &MmdCriterion,
    ) -> f64 {
        let r = Self::record(model, cause, noise, observed, criterion, false);
        r.tape.value(r.loss)[[0, 0]]
    }

    fn loss_and_gradients(
        &self,
        model: &GenerativeModel,
        cause: ArrayView1<'_, f64>,
        noise: ArrayView1<'_, f64>,
        observed: ArrayView2<'_, f64>,
        criterion: &MmdCriterion,
    ) -> (f64, ParameterSet) {
        let r = Self::record(model, cause, noise, observed, criterion, true);
        let loss = r.tape.value(r.loss)[[0, 0]];
        let mut grads = r.tape.backward(r.loss);
        let params = ParameterSet {
            w_in: grads.take(r.w_in),
            b_in: flatten(grads.take(r.b_in)),
            w_out: grads.take(r.w_out),
            b_out: flatten(grads.take(r.b_out)),
        };
        (loss, params)
    }
}

fn column(v: ArrayView1<'_, f64>) -> Array2<f64> {
    v.insert_axis(Axis(1)).to_owned()
}

fn row(v: &Array1<f64>) -> Array2<f64> {
    v.view().insert_axis(Axis(0)).to_owned()
}

fn flatten(m: Array2<f64>) -> Array1<f64> {
    m.index_axis_move(Axis(0), 0)
}
