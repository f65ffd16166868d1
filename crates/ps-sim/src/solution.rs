//! Queryable solutions produced by the model adapters.

use crate::model::OdeModel;
use crate::sim::SimRecord;
use nalgebra::DVector;
use ps_core::{InterpolatedSolution, SeriesSet, SeriesSetValue, TemporalSeriesSet, TimeQuery};

/// Dense output of one ODE integration.
///
/// States are reconstructed between accepted points by cubic Hermite
/// interpolation using the stored derivatives; model outputs are then
/// evaluated on the reconstructed state.
pub struct DenseSolution {
    model: Box<dyn OdeModel>,
    record: SimRecord,
}

impl DenseSolution {
    pub fn new(model: Box<dyn OdeModel>, record: SimRecord) -> Self {
        Self { model, record }
    }

    pub fn t_start(&self) -> f64 {
        self.record.t.first().copied().unwrap_or(0.0)
    }

    pub fn t_end(&self) -> f64 {
        self.record.t.last().copied().unwrap_or(0.0)
    }

    /// State at time `t`, clamped into the integrated range.
    pub fn state_at(&self, t: f64) -> DVector<f64> {
        let ts = &self.record.t;
        let t = t.max(self.t_start()).min(self.t_end());
        // index of the interval [ts[i], ts[i + 1]] containing t
        let upper = ts.partition_point(|&ti| ti < t);
        if upper == 0 {
            return self.record.y[0].clone();
        }
        let i = (upper - 1).min(ts.len().saturating_sub(2));
        let (t0, t1) = (ts[i], ts[i + 1]);
        let h = t1 - t0;
        let s = (t - t0) / h;
        let s2 = s * s;
        let s3 = s2 * s;
        let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
        let h10 = s3 - 2.0 * s2 + s;
        let h01 = -2.0 * s3 + 3.0 * s2;
        let h11 = s3 - s2;
        let rec = &self.record;
        &rec.y[i] * h00 + &rec.dydt[i] * (h10 * h) + &rec.y[i + 1] * h01 + &rec.dydt[i + 1] * (h11 * h)
    }
}

impl InterpolatedSolution for DenseSolution {
    fn query(&self, times: &TimeQuery) -> TemporalSeriesSet {
        let t = times.resolve(self.t_start(), self.t_end());
        let names: Vec<String> = self
            .model
            .names()
            .into_iter()
            .chain(self.model.output_names())
            .collect();

        let mut columns = vec![Vec::with_capacity(t.len()); names.len()];
        for &ti in &t {
            let y = self.state_at(ti);
            let out = self.model.output(ti, &y);
            for (col, v) in columns.iter_mut().zip(y.iter().chain(out.iter())) {
                col.push(*v);
            }
        }

        let values = names
            .into_iter()
            .zip(columns)
            .map(|(name, y)| SeriesSetValue::new(name, y))
            .collect();
        SeriesSet::new(t, values)
    }
}
