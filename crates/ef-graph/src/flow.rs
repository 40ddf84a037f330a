//! Flow: the attribute bundle carried by a directed edge.

use ef_core::Series;

use crate::error::{GraphError, GraphResult};

/// Attributes of one directed connection between two nodes.
///
/// A `Flow` exists only as long as its edge does: it is created by
/// [`EnergySystem::connect`](crate::EnergySystem::connect) and handed back by
/// [`EnergySystem::disconnect`](crate::EnergySystem::disconnect). All
/// attributes are optional; an empty `Flow` is a plain unbounded connection.
///
/// `min`/`max` are per-unit of `nominal_capacity`; `fixed` pins the flow to
/// a profile (per-unit as well). Time-varying attributes are validated
/// against the system's time index when the edge is created.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Flow {
    /// Installed capacity the per-unit attributes scale against.
    pub nominal_capacity: Option<f64>,
    /// Per-unit lower bound per time step (default 0).
    pub min: Option<Series>,
    /// Per-unit upper bound per time step (default 1 if nominal is set).
    pub max: Option<Series>,
    /// Per-unit fixed profile; when set, the flow is not a free variable.
    pub fixed: Option<Series>,
    /// Cost applied per unit of flow and time step.
    pub variable_costs: Option<Series>,
    /// Capacity is an investment decision rather than a fixed parameter.
    pub investment: bool,
    /// Flow has an associated on/off decision.
    pub binary: bool,
}

impl Flow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_nominal_capacity(mut self, value: f64) -> Self {
        self.nominal_capacity = Some(value);
        self
    }

    pub fn with_min(mut self, series: impl Into<Series>) -> Self {
        self.min = Some(series.into());
        self
    }

    pub fn with_max(mut self, series: impl Into<Series>) -> Self {
        self.max = Some(series.into());
        self
    }

    pub fn with_fixed(mut self, series: impl Into<Series>) -> Self {
        self.fixed = Some(series.into());
        self
    }

    pub fn with_variable_costs(mut self, series: impl Into<Series>) -> Self {
        self.variable_costs = Some(series.into());
        self
    }

    pub fn with_investment(mut self) -> Self {
        self.investment = true;
        self
    }

    pub fn with_binary(mut self) -> Self {
        self.binary = true;
        self
    }

    /// Validate attributes against the system horizon.
    ///
    /// Called by `connect`; a flow never enters the graph half-checked.
    pub(crate) fn validate(&self, horizon: usize) -> GraphResult<()> {
        if let Some(nominal) = self.nominal_capacity {
            if !nominal.is_finite() || nominal < 0.0 {
                return Err(GraphError::Core(ef_core::EfError::NonFinite {
                    what: "nominal_capacity",
                    value: nominal,
                }));
            }
        }
        for (what, series) in [
            ("min", &self.min),
            ("max", &self.max),
            ("fixed", &self.fixed),
            ("variable_costs", &self.variable_costs),
        ] {
            if let Some(s) = series {
                s.check_finite(what)?;
                if !s.matches_horizon(horizon) {
                    let actual = match s {
                        Series::Fixed(_) => horizon,
                        Series::Values(vs) => vs.len(),
                    };
                    return Err(GraphError::SeriesLength {
                        what,
                        expected: horizon,
                        actual,
                    });
                }
            }
        }
        Ok(())
    }
}
