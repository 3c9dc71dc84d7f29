//! Footer aggregates over the loaded result set.

use crate::order::ServiceOrder;

/// Sums shown in the table footer. Absent amounts count as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub count: usize,
    pub total_ordem_servico: f64,
    pub total_servicos: f64,
    pub total_pecas: f64,
}

impl Totals {
    pub fn compute(orders: &[ServiceOrder]) -> Self {
        let mut totals = Totals {
            count: orders.len(),
            ..Totals::default()
        };
        for order in orders {
            totals.total_ordem_servico += order.total_ordem_servico.unwrap_or(0.0);
            totals.total_servicos += order.total_servicos.unwrap_or(0.0);
            totals.total_pecas += order.total_pecas.unwrap_or(0.0);
        }
        totals
    }
}
